//! File-backed credential store for the CLI.
//!
//! The web application keeps credentials in `localStorage`; the CLI keeps
//! them in a JSON file under the user config directory so sessions survive
//! between invocations.

use clinio_core::CredentialStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

pub struct FileCredentialStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Open (or initialize) the store at the default path.
    pub fn open() -> anyhow::Result<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Open (or initialize) the store at `path`.
    pub fn at(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn default_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("clinio").join("credentials.json"))
    }

    fn persist(&self) {
        let entries = self.entries.read();
        let result = (|| -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&*entries)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        })();
        if let Err(err) = result {
            warn!(path = %self.path.display(), error = %err, "failed to persist credentials");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
        self.persist();
    }
}
