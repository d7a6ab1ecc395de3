use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Key under which the installation flags are stored in the defaults backend.
pub const INSTALLED_KEY: &str = "installedShortcuts";
pub const DEFAULTS_FILE: &str = "defaults.json";

/// Durable key/value storage holding one JSON document per key.
pub trait DefaultsBackend: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

/// All keys live in a single JSON object on disk. Keys written by other
/// components are preserved.
pub struct JsonFileDefaults {
    path: String,
}

impl JsonFileDefaults {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<Map<String, Value>> {
        let content = std::fs::read_to_string(&self.path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl DefaultsBackend for JsonFileDefaults {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut all = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable defaults file {}: {e}", self.path);
            Map::new()
        });
        all.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&all)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDefaults {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let defaults = Self::new();
        if let Ok(mut guard) = defaults.values.lock() {
            guard.insert(key.to_string(), value);
        }
        defaults
    }
}

impl DefaultsBackend for MemoryDefaults {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let guard = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("defaults lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut guard = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("defaults lock poisoned"))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

/// Sent to subscribers once the new value is visible to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallChange {
    pub identity: String,
    pub installed: bool,
}

struct State {
    installed: HashMap<String, bool>,
    subscribers: Vec<Sender<InstallChange>>,
}

/// Persisted identity -> "install offered" flags.
///
/// Every mutation takes the same lock for the update, the write-through and
/// the notification, so writes from any thread are applied one at a time and a
/// read that follows a write observes it.
pub struct InstallStore {
    backend: Box<dyn DefaultsBackend>,
    state: Mutex<State>,
}

impl InstallStore {
    /// Load the stored flags. A missing or undecodable entry starts empty.
    pub fn open(backend: Box<dyn DefaultsBackend>) -> Self {
        let installed = load_flags(backend.as_ref()).unwrap_or_else(|e| {
            tracing::warn!("ignoring stored install flags: {e}");
            HashMap::new()
        });
        tracing::debug!(count = installed.len(), "loaded install flags");
        Self {
            backend,
            state: Mutex::new(State {
                installed,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn open_file(path: &str) -> Self {
        Self::open(Box::new(JsonFileDefaults::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryDefaults::new()))
    }

    pub fn is_installed(&self, identity: &str) -> bool {
        match self.state.lock() {
            Ok(state) => state.installed.get(identity).copied().unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Record the flag and write the whole mapping through to the backend.
    pub fn set_installed(&self, identity: &str, installed: bool) {
        let Ok(mut state) = self.state.lock() else {
            tracing::error!("install state lock poisoned; dropping update for {identity}");
            return;
        };
        let previous = state.installed.insert(identity.to_string(), installed);
        if let Err(e) = persist(self.backend.as_ref(), &state.installed) {
            tracing::error!("failed to persist install flags: {e}");
        }
        if previous != Some(installed) {
            tracing::debug!(identity, installed, "install flag changed");
            notify(
                &mut state.subscribers,
                InstallChange {
                    identity: identity.to_string(),
                    installed,
                },
            );
        }
    }

    /// Forget every flag.
    pub fn reset(&self) {
        let Ok(mut state) = self.state.lock() else {
            tracing::error!("install state lock poisoned; dropping reset");
            return;
        };
        let cleared: Vec<String> = state
            .installed
            .drain()
            .filter_map(|(identity, installed)| installed.then_some(identity))
            .collect();
        if let Err(e) = persist(self.backend.as_ref(), &state.installed) {
            tracing::error!("failed to persist install flags: {e}");
        }
        for identity in cleared {
            notify(
                &mut state.subscribers,
                InstallChange {
                    identity,
                    installed: false,
                },
            );
        }
    }

    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.state
            .lock()
            .map(|s| s.installed.clone())
            .unwrap_or_default()
    }

    /// Receive every subsequent change. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<InstallChange> {
        let (tx, rx) = channel();
        if let Ok(mut state) = self.state.lock() {
            state.subscribers.push(tx);
        }
        rx
    }
}

fn load_flags(backend: &dyn DefaultsBackend) -> anyhow::Result<HashMap<String, bool>> {
    match backend.get(INSTALLED_KEY)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(HashMap::new()),
    }
}

fn persist(backend: &dyn DefaultsBackend, installed: &HashMap<String, bool>) -> anyhow::Result<()> {
    backend.set(INSTALLED_KEY, serde_json::to_value(installed)?)
}

fn notify(subscribers: &mut Vec<Sender<InstallChange>>, change: InstallChange) {
    subscribers.retain(|tx| tx.send(change.clone()).is_ok());
}
