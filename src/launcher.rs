use crate::catalog::Catalog;
use crate::dispatcher::{dispatch, DispatchOutcome, Opener};
use crate::install_state::InstallStore;
use crate::resolver::{decide, resolve, Choice, LaunchAction, Resolution};
use crate::settings::Settings;
use std::sync::Arc;

/// Result of a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// No such entry, or no such menu item.
    Unknown,
    /// The entry has several equivalent targets; present these and call
    /// [`Launcher::choose`] with the picked index.
    Menu {
        choices: Vec<Choice>,
        fallback: Option<String>,
    },
    Dispatched {
        action: LaunchAction,
        outcome: DispatchOutcome,
    },
}

/// Owns everything a launch needs: the catalog, the shared install store,
/// the settings and the OS opener.
pub struct Launcher {
    catalog: Catalog,
    store: Arc<InstallStore>,
    settings: Settings,
    opener: Box<dyn Opener>,
}

impl Launcher {
    pub fn new(
        catalog: Catalog,
        store: Arc<InstallStore>,
        settings: Settings,
        opener: Box<dyn Opener>,
    ) -> Self {
        Self {
            catalog,
            store,
            settings,
            opener,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<InstallStore> {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tap(&self, identity: &str) -> TapOutcome {
        let Some(target) = self.catalog.find(identity) else {
            tracing::warn!("no catalog entry named '{identity}'");
            return TapOutcome::Unknown;
        };
        match resolve(target, &self.store, &self.settings.run_prefix) {
            Resolution::Choose { choices, fallback } => TapOutcome::Menu { choices, fallback },
            Resolution::Launch(action) => self.run(action),
        }
    }

    /// Open the `index`-th scheme of an entry's menu. Never touches the
    /// install flag.
    pub fn choose(&self, identity: &str, index: usize) -> TapOutcome {
        let Some(target) = self.catalog.find(identity) else {
            tracing::warn!("no catalog entry named '{identity}'");
            return TapOutcome::Unknown;
        };
        let installed = self.store.is_installed(identity);
        match decide(target, installed, &self.settings.run_prefix).choice(index) {
            Some(action) => self.run(action),
            None => TapOutcome::Unknown,
        }
    }

    fn run(&self, action: LaunchAction) -> TapOutcome {
        tracing::info!(?action, "launching");
        let outcome = dispatch(&action, self.opener.as_ref());
        TapOutcome::Dispatched { action, outcome }
    }
}
