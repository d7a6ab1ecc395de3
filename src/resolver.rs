use crate::catalog::LaunchTarget;
use crate::install_state::InstallStore;

/// Scheme prefix of the automation runner used for indirect launches.
pub const DEFAULT_RUN_PREFIX: &str = "shortcuts://run-shortcut";

/// A single address to hand to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    Open(String),
    OpenInstallLink(String),
    RunIndirect(String),
}

impl LaunchAction {
    pub fn address(&self) -> &str {
        match self {
            LaunchAction::Open(a)
            | LaunchAction::OpenInstallLink(a)
            | LaunchAction::RunIndirect(a) => a,
        }
    }
}

/// One entry of a disambiguation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub scheme: String,
}

impl Choice {
    pub fn from_scheme(scheme: &str) -> Self {
        Self {
            label: readable_name(scheme),
            scheme: scheme.to_string(),
        }
    }

    pub fn action(&self) -> LaunchAction {
        LaunchAction::Open(self.scheme.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// More than one direct scheme: the caller presents `choices` in order.
    /// `fallback` is display-only.
    Choose {
        choices: Vec<Choice>,
        fallback: Option<String>,
    },
    Launch(LaunchAction),
}

impl Resolution {
    pub fn choice(&self, index: usize) -> Option<LaunchAction> {
        match self {
            Resolution::Choose { choices, .. } => choices.get(index).map(Choice::action),
            Resolution::Launch(_) => None,
        }
    }

    pub fn schemes(&self) -> Vec<&str> {
        match self {
            Resolution::Choose { choices, .. } => choices.iter().map(|c| c.scheme.as_str()).collect(),
            Resolution::Launch(_) => Vec::new(),
        }
    }
}

/// Pick the action for `target` given its installation flag. Performs no I/O.
///
/// A target with several direct schemes always yields a menu, even when it is
/// marked for indirect launch.
pub fn decide(target: &LaunchTarget, installed: bool, run_prefix: &str) -> Resolution {
    let schemes = target.all_direct_schemes();
    if schemes.len() > 1 {
        let fallback = Some(target.fallback_address.clone()).filter(|f| !f.is_empty());
        return Resolution::Choose {
            choices: schemes.into_iter().map(Choice::from_scheme).collect(),
            fallback,
        };
    }
    if target.uses_indirect_launch {
        if installed {
            let address = run_address(target, run_prefix);
            return Resolution::Launch(LaunchAction::RunIndirect(address));
        }
        let link = target.all_install_links().first().copied().unwrap_or_default();
        return Resolution::Launch(LaunchAction::OpenInstallLink(link.to_string()));
    }
    Resolution::Launch(LaunchAction::Open(target.primary_scheme.clone()))
}

/// Decide using the stored flag. Sending the user to an install link latches
/// the flag so the next tap runs the shortcut instead.
pub fn resolve(target: &LaunchTarget, store: &InstallStore, run_prefix: &str) -> Resolution {
    let installed = store.is_installed(&target.identity);
    let resolution = decide(target, installed, run_prefix);
    if let Resolution::Launch(LaunchAction::OpenInstallLink(_)) = &resolution {
        tracing::info!(identity = %target.identity, "offering shortcut install");
        store.set_installed(&target.identity, true);
    }
    resolution
}

pub fn run_address(target: &LaunchTarget, run_prefix: &str) -> String {
    let name = target.generated_indirect_action_name();
    format!("{run_prefix}?name={}", urlencoding::encode(&name))
}

/// Menu label for a scheme: `"googlehome://"` becomes `"Googlehome"`.
pub fn readable_name(scheme: &str) -> String {
    scheme
        .replace("://", "")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
