use crate::resolver::LaunchAction;
use url::Url;

/// OS-level "open this address" capability.
pub trait Opener: Send + Sync {
    fn open(&self, url: &Url) -> anyhow::Result<()>;
}

/// Hands addresses to the platform handler via the `open` crate.
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, url: &Url) -> anyhow::Result<()> {
        open::that(url.as_str()).map_err(|e| e.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Passed to the opener. Whether the handler accepted it is not tracked.
    Delivered,
    /// Empty or malformed address; nothing was attempted.
    Dropped,
}

/// Execute `action`. Bad addresses are dropped silently and opener failures are
/// only logged.
pub fn dispatch(action: &LaunchAction, opener: &dyn Opener) -> DispatchOutcome {
    let address = action.address();
    if address.trim().is_empty() {
        tracing::debug!(?action, "dropping action with empty address");
        return DispatchOutcome::Dropped;
    }
    let url = match Url::parse(address) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(address, "dropping malformed address: {e}");
            return DispatchOutcome::Dropped;
        }
    };
    if let Err(e) = opener.open(&url) {
        tracing::warn!(address, "opener failed: {e}");
    }
    DispatchOutcome::Delivered
}
