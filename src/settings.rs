use crate::catalog::CATALOG_FILE;
use crate::install_state::DEFAULTS_FILE;
use crate::resolver::DEFAULT_RUN_PREFIX;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Address of the automation runner; `?name=<shortcut>` is appended.
    #[serde(default = "default_run_prefix")]
    pub run_prefix: String,
    /// Path of the JSON catalog of categories and apps.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
    /// Path of the defaults file holding the install flags.
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving log output in addition to stdout.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_run_prefix() -> String {
    DEFAULT_RUN_PREFIX.into()
}

fn default_catalog_file() -> String {
    CATALOG_FILE.into()
}

fn default_state_file() -> String {
    DEFAULTS_FILE.into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_prefix: default_run_prefix(),
            catalog_file: default_catalog_file(),
            state_file: default_state_file(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
