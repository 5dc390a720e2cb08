use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bundle::{FundsProofBundle, IdentityProofBundle};
use crate::types::{Commitment, HolderBinding};

/// Document format version written into every bond.
pub const BOND_VERSION: &str = "1.0.0";

/// Funds side of a bond policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsPolicy {
    pub policy_id: u64,
    pub threshold_raw: u64,
    /// Display currency (e.g. "ZEC", "USD").
    pub currency: String,
    #[serde(default)]
    pub currency_code: u32,
    /// Expected rail; `None` accepts the rail the funds bundle declares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rail_id: Option<String>,
    pub scope_id: u64,
}

/// What a verifier asks for: purpose, scope, validity window, identity query
/// and funds policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondPolicy {
    pub purpose: String,
    pub scope: String,
    /// Validity window in seconds.
    pub validity: u64,
    #[serde(default)]
    pub identity_query: serde_json::Value,
    pub funds_policy: FundsPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Structured facts disclosed by the identity proof.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDisclosures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_threshold_met: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_country: Option<String>,
    /// Any other query fields, keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, serde_json::Value>,
}

impl IdentityDisclosures {
    /// Whether nothing at all was disclosed.
    pub fn is_empty(&self) -> bool {
        self.age_threshold.is_none()
            && self.age_threshold_met.is_none()
            && self.nationality.is_none()
            && self.passport_valid.is_none()
            && self.issuing_country.is_none()
            && self.custom.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityComponent {
    pub proof: IdentityProofBundle,
    pub commitment: Commitment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_identifier: Option<String>,
    pub disclosures: IdentityDisclosures,
}

/// Snapshot of the funds policy the bond was created against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPolicy {
    pub policy_id: u64,
    pub threshold: u64,
    pub currency: String,
    #[serde(default)]
    pub currency_code: u32,
    pub rail_id: String,
    pub scope_id: u64,
}

/// Reference to the chain state a non-custodial funds proof was taken at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    /// Hex-encoded anchor (Merkle root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsComponent {
    pub proof: FundsProofBundle,
    pub commitment: Commitment,
    pub verified_policy: VerifiedPolicy,
    pub threshold_met: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_snapshot: Option<BalanceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondMetadata {
    pub purpose: String,
    pub scope: String,
    /// Expiry, in seconds since the Unix epoch.
    pub valid_until: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// The bond: an identity proof and a funds proof tied together by a
/// holder binding. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundIdentityProof {
    pub version: String,
    pub bond_id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub holder_binding: HolderBinding,
    pub identity: IdentityComponent,
    pub funds: FundsComponent,
    pub metadata: BondMetadata,
}

impl BoundIdentityProof {
    /// Whether the bond has expired at `now` (seconds).
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.metadata.valid_until
    }
}
