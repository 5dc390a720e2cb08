use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 256-bit hash functions a binding protocol version may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blake3 => write!(f, "blake3"),
            Self::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Versioned parameters of the holder-binding derivation.
///
/// Passed explicitly at every derivation and verification call site, so a
/// protocol upgrade is a new value rather than a changed default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingParams {
    /// Protocol version these parameters describe.
    #[serde(default = "default_binding_version")]
    pub version: u32,
    /// Domain separator prefixed to every binding preimage.
    #[serde(default = "default_domain_separator")]
    pub domain_separator: String,
    /// Hash used for the binding and the nullifier.
    #[serde(default)]
    pub hash: HashAlgorithm,
    /// Whether the epoch is part of the binding preimage.
    #[serde(default = "default_true")]
    pub epoch_bound: bool,
}

impl BindingParams {
    /// Version 1: BLAKE3, epoch-bound.
    pub fn v1() -> Self {
        Self {
            version: 1,
            domain_separator: default_domain_separator(),
            hash: HashAlgorithm::Blake3,
            epoch_bound: true,
        }
    }

    /// Same parameters with epoch binding switched off.
    pub fn without_epoch(mut self) -> Self {
        self.epoch_bound = false;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.domain_separator.is_empty() {
            return Err(CoreError::ValidationError(
                "binding domain separator must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BindingParams {
    fn default() -> Self {
        Self::v1()
    }
}

/// Verification tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Oldest binding epoch accepted, as an age in seconds.
    #[serde(default = "default_max_epoch_age")]
    pub max_epoch_age_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_epoch_age_secs: default_max_epoch_age(),
        }
    }
}

/// Local bond cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Namespace key the bond list lives under.
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Maximum number of cached bonds; the oldest are evicted first.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            max_entries: default_max_entries(),
        }
    }
}

// Default value functions
fn default_binding_version() -> u32 {
    1
}
fn default_domain_separator() -> String {
    "zkpf-holder-binding-v1".into()
}
fn default_true() -> bool {
    true
}
fn default_max_epoch_age() -> u64 {
    30 * 24 * 60 * 60
}
fn default_storage_key() -> String {
    "zkpf-bound-proofs".into()
}
fn default_max_entries() -> usize {
    50
}
