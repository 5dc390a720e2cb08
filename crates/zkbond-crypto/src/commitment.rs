//! Commitment derivation.
//!
//! Every function here is a pure BLAKE3 hash over a domain-tagged preimage.
//! Empty inputs are allowed and hash to a well-defined value; validating
//! inputs is the caller's job.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};
use zkbond_core::{Commitment, HashAlgorithm};

use crate::error::CryptoError;
use crate::hashing::hash_parts;

const IDENTITY_TAG: &[u8] = b"identity-commitment:";
const FUNDS_TAG: &[u8] = b"funds-commitment:";
const SEED_TAG: &[u8] = b"holder-secret-seed:";

/// Session-level master secret spanning the identity and funds domains.
///
/// Only used as salt material. Wiped on drop and never serialized.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct HolderSecretSeed([u8; 32]);

impl HolderSecretSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 32-byte seed from hex (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let mut bytes = hex::decode(trimmed)
            .map_err(|e| CryptoError::InvalidInput(format!("invalid seed hex: {}", e)))?;
        if bytes.len() != 32 {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(seed))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Salt for the identity commitment: bytes 0..16.
    pub fn identity_salt(&self) -> &[u8] {
        &self.0[..16]
    }

    /// Salt for the funds commitment: bytes 16..32.
    pub fn funds_salt(&self) -> &[u8] {
        &self.0[16..]
    }
}

impl fmt::Debug for HolderSecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HolderSecretSeed(<redacted>)")
    }
}

/// `H("identity-commitment:" || unique_identifier || salt)`.
pub fn derive_identity_commitment(unique_identifier: &str, salt: Option<&[u8]>) -> Commitment {
    let digest = hash_parts(
        HashAlgorithm::Blake3,
        &[IDENTITY_TAG, unique_identifier.as_bytes(), salt.unwrap_or_default()],
    );
    Commitment::new(digest)
}

/// `H("funds-commitment:" || rail_id || ":" || viewing_key_or_proxy || salt)`.
///
/// Without a viewing key, pass [`nullifier_proxy`] of the funds proof.
pub fn derive_funds_commitment(
    viewing_key_or_proxy: &str,
    rail_id: &str,
    salt: Option<&[u8]>,
) -> Commitment {
    let digest = hash_parts(
        HashAlgorithm::Blake3,
        &[
            FUNDS_TAG,
            rail_id.as_bytes(),
            b":",
            viewing_key_or_proxy.as_bytes(),
            salt.unwrap_or_default(),
        ],
    );
    Commitment::new(digest)
}

/// Stable stand-in for a viewing key: the proof's public nullifier as hex.
pub fn nullifier_proxy(nullifier: &[u8]) -> String {
    hex::encode(nullifier)
}

/// `H("holder-secret-seed:" || identity_unique_id || ":" || wallet_secret || ":" || scope)`.
pub fn derive_holder_secret_seed(
    identity_unique_id: &str,
    wallet_secret: &[u8],
    scope: &str,
) -> HolderSecretSeed {
    let digest = hash_parts(
        HashAlgorithm::Blake3,
        &[
            SEED_TAG,
            identity_unique_id.as_bytes(),
            b":",
            wallet_secret,
            b":",
            scope.as_bytes(),
        ],
    );
    HolderSecretSeed(digest)
}
