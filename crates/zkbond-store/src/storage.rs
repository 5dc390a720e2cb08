//! Local bond cache.
//!
//! Bonds are kept as one JSON list, newest first, under a single namespace
//! key of an injected key-value backend. The cache is advisory: every
//! `BondStore` operation logs failures and degrades to "not cached" instead
//! of returning an error.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use zkbond_core::{BoundIdentityProof, StorageConfig};

use crate::error::StoreError;

/// Minimal key-value backend a [`BondStore`] persists through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it if missing.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Bounded, newest-first bond cache over a [`KeyValueStore`].
pub struct BondStore<S> {
    backend: S,
    config: StorageConfig,
}

impl<S: KeyValueStore> BondStore<S> {
    pub fn new(backend: S, config: StorageConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All cached bonds, newest first. Empty when the cache is unreadable.
    pub fn list(&self) -> Vec<BoundIdentityProof> {
        match self.try_list() {
            Ok(bonds) => bonds,
            Err(e) => {
                tracing::warn!(key = %self.config.key, error = %e, "failed to read bond cache");
                Vec::new()
            }
        }
    }

    /// Cache `bond` at the front of the list, evicting the oldest entries
    /// beyond the cap. Re-saving an id moves it to the front.
    ///
    /// Returns `false` when the bond could not be kept, including when the
    /// cache is configured with a zero cap.
    pub fn save(&self, bond: &BoundIdentityProof) -> bool {
        if self.config.max_entries == 0 {
            tracing::warn!(bond_id = %bond.bond_id, "bond cache disabled by zero cap");
            return false;
        }
        let mut bonds = self.list();
        bonds.retain(|b| b.bond_id != bond.bond_id);
        bonds.insert(0, bond.clone());
        if bonds.len() > self.config.max_entries {
            let evicted = bonds.len() - self.config.max_entries;
            bonds.truncate(self.config.max_entries);
            tracing::debug!(evicted, "evicted oldest cached bonds");
        }
        let saved = self.write(&bonds);
        if saved {
            tracing::debug!(bond_id = %bond.bond_id, cached = bonds.len(), "bond cached");
        }
        saved
    }

    pub fn get(&self, bond_id: &str) -> Option<BoundIdentityProof> {
        self.list().into_iter().find(|b| b.bond_id == bond_id)
    }

    /// Remove the bond with `bond_id`. Returns whether one was removed.
    pub fn delete(&self, bond_id: &str) -> bool {
        let mut bonds = self.list();
        let before = bonds.len();
        bonds.retain(|b| b.bond_id != bond_id);
        if bonds.len() == before {
            return false;
        }
        self.write(&bonds)
    }

    pub fn clear(&self) -> bool {
        match self.backend.remove(&self.config.key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.config.key, error = %e, "failed to clear bond cache");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn try_list(&self) -> Result<Vec<BoundIdentityProof>, StoreError> {
        match self.backend.get(&self.config.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, bonds: &[BoundIdentityProof]) -> bool {
        let result = serde_json::to_string(bonds)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.set(&self.config.key, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.config.key, error = %e, "failed to write bond cache");
                false
            }
        }
    }
}
