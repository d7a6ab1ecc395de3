use boring_launcher::catalog::Catalog;
use boring_launcher::dispatcher::SystemOpener;
use boring_launcher::install_state::InstallStore;
use boring_launcher::launcher::{Launcher, TapOutcome};
use boring_launcher::logging;
use boring_launcher::settings::{Settings, SETTINGS_FILE};
use std::sync::Arc;

const USAGE: &str = "usage: boring_launcher [list | tap <name> | choose <name> <index>]";

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_ref().map(Into::into),
    );

    let catalog = Catalog::load(&settings.catalog_file)?;
    let store = Arc::new(InstallStore::open_file(&settings.state_file));
    let launcher = Launcher::new(catalog, store, settings, Box::new(SystemOpener));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["list"] => list(&launcher),
        ["tap", name] => report(launcher.tap(name)),
        ["choose", name, index] => {
            let index: usize = index.parse()?;
            report(launcher.choose(name, index));
        }
        _ => anyhow::bail!(USAGE),
    }
    Ok(())
}

fn list(launcher: &Launcher) {
    for category in launcher.catalog().categories() {
        println!("{}", category.title.to_uppercase());
        for app in &category.apps {
            let installed = launcher.store().is_installed(&app.identity);
            let marker = if app.uses_indirect_launch && installed {
                " (shortcut installed)"
            } else {
                ""
            };
            println!("  {}{marker}", app.identity);
        }
    }
}

fn report(outcome: TapOutcome) {
    match outcome {
        TapOutcome::Unknown => println!("nothing to launch"),
        TapOutcome::Menu { choices, fallback } => {
            for (i, choice) in choices.iter().enumerate() {
                println!("{i}: {} ({})", choice.label, choice.scheme);
            }
            if let Some(fallback) = fallback {
                println!("web: {fallback}");
            }
        }
        TapOutcome::Dispatched { action, outcome } => {
            println!("{:?} -> {outcome:?}", action);
        }
    }
}
