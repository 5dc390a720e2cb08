//! Opaque proof bundles consumed by the bond layer.
//!
//! Neither bundle is validated beyond shape and presence here: cryptographic
//! validity belongs to the proving engine and the identity SDK.

use serde::{Deserialize, Serialize};

/// Rail assumed when a funds bundle carries an empty `rail_id`.
pub const DEFAULT_RAIL_ID: &str = "CUSTODIAL_ATTESTATION";

/// One sub-proof produced by the identity SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySubProof {
    pub name: String,
    pub version: String,
    pub proof: String,
    #[serde(default)]
    pub public_inputs: Vec<String>,
    pub vkey_hash: String,
    pub index: u32,
    pub total: u32,
    /// Fields this layer does not interpret, carried through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity proof bundle (age / nationality / passport facts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProofBundle {
    pub proof_id: String,
    /// Scoped unique identifier issued by the identity SDK, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_identifier: Option<String>,
    #[serde(default)]
    pub proofs: Vec<IdentitySubProof>,
    #[serde(default)]
    pub query_result: serde_json::Value,
    pub request_id: String,
    /// Policy metadata attached by the requesting application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<serde_json::Value>,
}

impl IdentityProofBundle {
    /// The unique identifier, ignoring blank values.
    pub fn resolved_unique_identifier(&self) -> Option<&str> {
        self.unique_identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_query_result(&self) -> bool {
        match &self.query_result {
            serde_json::Value::Null => false,
            serde_json::Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }
}

/// Public inputs of a proof-of-funds proof, as emitted by the prover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsPublicInputs {
    pub threshold_raw: u64,
    pub required_currency_code: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_custodian_id: Option<u32>,
    pub current_epoch: u64,
    pub verifier_scope_id: u64,
    pub policy_id: u64,
    pub nullifier: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custodian_pubkey_hash: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_anchor_orchard: Option<Vec<u8>>,
    /// Prover outputs not listed above (e.g. `holder_binding`, `proven_sum`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Proof-of-funds bundle.
///
/// Field names follow the proving engine's snake_case wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsProofBundle {
    /// Rail identifier; empty for legacy custodial bundles.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rail_id: String,
    pub circuit_version: u32,
    pub proof: Vec<u8>,
    pub public_inputs: FundsPublicInputs,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FundsProofBundle {
    /// Rail id with the custodial default applied.
    pub fn effective_rail_id(&self) -> &str {
        if self.rail_id.trim().is_empty() {
            DEFAULT_RAIL_ID
        } else {
            &self.rail_id
        }
    }
}
