use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::traits::session_store::SessionStore;

/// Key under which a wallet-extension connection is remembered.
pub const CONNECTED_WALLET_KEY: &str = "connectedWalletAddress";

/// Store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
}

impl FileStore {
    /// Open the store, starting empty when the file is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = DashMap::new();

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(map) => {
                    debug!("Loaded {} stored keys from {}", map.len(), path.display());
                    entries.extend(map);
                }
                Err(e) => warn!("Ignoring unreadable store {}: {}", path.display(), e),
            }
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let map: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&map)
            .map_err(|e| DashboardError::Storage(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get(CONNECTED_WALLET_KEY).is_none());
        store.set(CONNECTED_WALLET_KEY, "0xabc").unwrap();
        assert_eq!(store.get(CONNECTED_WALLET_KEY).as_deref(), Some("0xabc"));
        store.remove(CONNECTED_WALLET_KEY).unwrap();
        assert!(store.get(CONNECTED_WALLET_KEY).is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        store.set(CONNECTED_WALLET_KEY, "0xabc").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(CONNECTED_WALLET_KEY).as_deref(), Some("0xabc"));
        reopened.remove(CONNECTED_WALLET_KEY).unwrap();

        let again = FileStore::open(&path).unwrap();
        assert!(again.get(CONNECTED_WALLET_KEY).is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get(CONNECTED_WALLET_KEY).is_none());
        store.set("k", "v").unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"k\""));
    }
}
