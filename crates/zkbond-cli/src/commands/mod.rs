pub mod create;
pub mod encode;
pub mod list;
pub mod seed;
pub mod verify;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

use zkbond_core::BoundIdentityProof;
use zkbond_store::{decode_bond, proof_from_share_url, BondStore, FileStore};

use crate::config::ZkbondConfig;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Open the on-disk bond cache described by `config`.
pub fn open_store(config: &ZkbondConfig) -> anyhow::Result<BondStore<FileStore>> {
    let backend = FileStore::open(&config.storage.data_dir).with_context(|| {
        format!(
            "failed to open bond cache at {}",
            config.storage.data_dir.display()
        )
    })?;
    Ok(BondStore::new(backend, config.storage.cache.clone()))
}

/// Resolve a bond from a JSON file path, a share URL, or an encoded bond.
pub fn load_bond(input: &str) -> anyhow::Result<BoundIdentityProof> {
    let path = Path::new(input);
    if path.is_file() {
        return read_json(path);
    }

    let encoded = if input.contains("://") {
        proof_from_share_url(input)?
    } else {
        input.trim().to_string()
    };
    decode_bond(&encoded).context("input is neither a bond file, a share URL, nor an encoded bond")
}
