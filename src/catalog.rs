use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CATALOG_FILE: &str = "catalog.json";

/// A single launchable entry. Only `name` is required in the catalog file.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LaunchTarget {
    /// Display name, also used as the key of the installation flag.
    #[serde(rename = "name")]
    pub identity: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_scheme: String,
    /// Shown next to the disambiguation menu only. Never opened automatically.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback_address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_schemes: Vec<String>,
    #[serde(default)]
    pub uses_indirect_launch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect_install_address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indirect_install_addresses: Vec<String>,
}

impl LaunchTarget {
    pub fn new(identity: impl Into<String>, primary_scheme: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            primary_scheme: primary_scheme.into(),
            ..Default::default()
        }
    }

    /// Primary scheme followed by the alternates, blanks skipped. Equal values
    /// are kept.
    pub fn all_direct_schemes(&self) -> Vec<&str> {
        std::iter::once(self.primary_scheme.as_str())
            .chain(self.alternate_schemes.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Single install address followed by the install address list, blanks
    /// skipped.
    pub fn all_install_links(&self) -> Vec<&str> {
        self.indirect_install_address
            .iter()
            .chain(self.indirect_install_addresses.iter())
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Name of the automation shortcut that opens this entry, e.g.
    /// `"Gemini (beta)"` becomes `"openGeminiApp"`.
    pub fn generated_indirect_action_name(&self) -> String {
        let cleaned: String = self
            .identity
            .replace(" (beta)", "")
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        format!("open{cleaned}App")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LaunchCategory {
    pub title: String,
    #[serde(default)]
    pub apps: Vec<LaunchTarget>,
}

/// Ordered list of categories. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<LaunchCategory>,
}

impl Catalog {
    /// Build a catalog, rejecting blank or duplicate identities.
    pub fn new(categories: Vec<LaunchCategory>) -> anyhow::Result<Self> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let categories: Vec<LaunchCategory> = serde_json::from_str(&content)?;
        Self::new(categories)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.categories)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for target in self.targets() {
            if target.identity.trim().is_empty() {
                anyhow::bail!("catalog entry with an empty name");
            }
            if !seen.insert(target.identity.as_str()) {
                anyhow::bail!("duplicate catalog entry '{}'", target.identity);
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[LaunchCategory] {
        &self.categories
    }

    pub fn targets(&self) -> impl Iterator<Item = &LaunchTarget> {
        self.categories.iter().flat_map(|c| c.apps.iter())
    }

    pub fn find(&self, identity: &str) -> Option<&LaunchTarget> {
        self.targets().find(|t| t.identity == identity)
    }

    pub fn is_empty(&self) -> bool {
        self.targets().next().is_none()
    }
}
