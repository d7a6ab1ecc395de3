
use boring_launcher::catalog::{Catalog, LaunchCategory, LaunchTarget};
use boring_launcher::dispatcher::DispatchOutcome;
use boring_launcher::install_state::InstallStore;
use boring_launcher::launcher::{Launcher, TapOutcome};
use boring_launcher::resolver::LaunchAction;
use boring_launcher::settings::Settings;
use mock_opener::MockOpener;
use std::sync::Arc;

fn catalog() -> Catalog {
    Catalog::new(vec![
        LaunchCategory {
            title: "Core".into(),
            apps: vec![
                LaunchTarget::new("Phone", "mobilephone://"),
                LaunchTarget::new("Nothing", ""),
            ],
        },
        LaunchCategory {
            title: "Life".into(),
            apps: vec![
                LaunchTarget {
                    alternate_schemes: vec!["home://".into()],
                    fallback_address: "https://home.google.com".into(),
                    ..LaunchTarget::new("Home", "googlehome://")
                },
                LaunchTarget {
                    uses_indirect_launch: true,
                    indirect_install_address: Some("https://example/install".into()),
                    ..LaunchTarget::new("Sweatcoin", "")
                },
            ],
        },
    ])
    .unwrap()
}

fn launcher(opener: &MockOpener) -> Launcher {
    Launcher::new(
        catalog(),
        Arc::new(InstallStore::in_memory()),
        Settings::default(),
        Box::new(opener.clone()),
    )
}

#[test]
fn tap_direct_entry_opens_scheme() {
    let opener = MockOpener::default();
    let launcher = launcher(&opener);
    assert_eq!(
        launcher.tap("Phone"),
        TapOutcome::Dispatched {
            action: LaunchAction::Open("mobilephone://".into()),
            outcome: DispatchOutcome::Delivered,
        }
    );
    assert_eq!(opener.opened().len(), 1);
}

#[test]
fn tap_shortcut_installs_then_runs() {
    let opener = MockOpener::default();
    let launcher = launcher(&opener);
    let changes = launcher.store().subscribe();

    launcher.tap("Sweatcoin");
    launcher.tap("Sweatcoin");

    assert_eq!(
        opener.opened(),
        vec![
            "https://example/install".to_string(),
            "shortcuts://run-shortcut?name=openSweatcoinApp".to_string(),
        ]
    );
    assert_eq!(changes.try_iter().count(), 1);
}

#[test]
fn menu_entries_dispatch_nothing_until_chosen() {
    let opener = MockOpener::default();
    let launcher = launcher(&opener);
    match launcher.tap("Home") {
        TapOutcome::Menu { choices, fallback } => {
            let labels: Vec<_> = choices.iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["Googlehome", "Home"]);
            assert_eq!(fallback.as_deref(), Some("https://home.google.com"));
        }
        other => panic!("expected menu, got {other:?}"),
    }
    assert!(opener.opened().is_empty());

    launcher.choose("Home", 1);
    assert_eq!(opener.opened(), vec!["home://".to_string()]);
    assert_eq!(launcher.choose("Home", 5), TapOutcome::Unknown);
}

#[test]
fn choose_on_shortcut_entry_does_not_latch() {
    let opener = MockOpener::default();
    let launcher = launcher(&opener);
    assert_eq!(launcher.choose("Sweatcoin", 0), TapOutcome::Unknown);
    assert!(!launcher.store().is_installed("Sweatcoin"));
}

#[test]
fn unknown_and_empty_entries_are_no_ops() {
    let opener = MockOpener::default();
    let launcher = launcher(&opener);
    assert_eq!(launcher.tap("Pager"), TapOutcome::Unknown);
    assert_eq!(
        launcher.tap("Nothing"),
        TapOutcome::Dispatched {
            action: LaunchAction::Open(String::new()),
            outcome: DispatchOutcome::Dropped,
        }
    );
    assert!(opener.opened().is_empty());
}

#[test]
fn run_prefix_comes_from_settings() {
    let opener = MockOpener::default();
    let store = Arc::new(InstallStore::in_memory());
    store.set_installed("Sweatcoin", true);
    let settings = Settings {
        run_prefix: "automate://run".into(),
        ..Settings::default()
    };
    let launcher = Launcher::new(catalog(), store, settings, Box::new(opener.clone()));
    launcher.tap("Sweatcoin");
    assert_eq!(
        opener.opened(),
        vec!["automate://run?name=openSweatcoinApp".to_string()]
    );
}
