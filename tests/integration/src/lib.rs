//! Shared fixtures for the cross-crate scenario tests.

use chrono::{DateTime, Utc};

use zkbond_core::{
    BondPolicy, FundsPolicy, FundsProofBundle, FundsPublicInputs, IdentityProofBundle,
    IdentitySubProof,
};
use zkbond_crypto::{derive_holder_secret_seed, HolderSecretSeed};
use zkbond_proof::BondRequest;

/// Scope id every fixture binds to.
pub const SCOPE_ID: u64 = 42;

/// One day.
pub const VALIDITY: u64 = 86_400;

/// Fixed creation instant: 2025-06-01T12:00:00Z.
pub const CREATED_AT_SECS: u64 = 1_748_779_200;

pub fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(CREATED_AT_SECS as i64, 0).unwrap_or_default()
}

pub fn policy() -> BondPolicy {
    BondPolicy {
        purpose: "rental-deposit".into(),
        scope: "s1".into(),
        validity: VALIDITY,
        identity_query: serde_json::json!({"age": {"gte": 18}}),
        funds_policy: FundsPolicy {
            policy_id: 7,
            threshold_raw: 1_000_000,
            currency: "USD".into(),
            currency_code: 840,
            rail_id: None,
            scope_id: SCOPE_ID,
        },
        domain: Some("landlord.example".into()),
    }
}

pub fn identity(unique_identifier: Option<&str>) -> IdentityProofBundle {
    IdentityProofBundle {
        proof_id: "proof-1".into(),
        unique_identifier: unique_identifier.map(str::to_owned),
        proofs: vec![IdentitySubProof {
            name: "outer_evm_count_5".into(),
            version: "0.7.1".into(),
            proof: "0badc0de".into(),
            public_inputs: vec!["0x01".into()],
            vkey_hash: "0x5ca1ab1e".into(),
            index: 0,
            total: 1,
            extra: Default::default(),
        }],
        query_result: serde_json::json!({
            "age": {"gte": {"expected": 18, "result": true}},
            "nationality": {"disclose": {"result": "NLD"}},
            "expiry_date": {"gte": {"expected": "2025-06-01", "result": true}}
        }),
        request_id: "req-1".into(),
        policy: None,
    }
}

pub fn funds() -> FundsProofBundle {
    FundsProofBundle {
        rail_id: "CUSTODIAL_ATTESTATION".into(),
        circuit_version: 3,
        proof: vec![0xAB; 64],
        extra: Default::default(),
        public_inputs: FundsPublicInputs {
            threshold_raw: 2_500_000,
            required_currency_code: 840,
            required_custodian_id: Some(77),
            current_epoch: 1_748_779_200,
            verifier_scope_id: SCOPE_ID,
            policy_id: 7,
            nullifier: (1..=32).collect(),
            custodian_pubkey_hash: Some(vec![0x11; 32]),
            snapshot_block_height: Some(2_800_000),
            snapshot_anchor_orchard: None,
            extra: Default::default(),
        },
    }
}

pub fn seed() -> HolderSecretSeed {
    derive_holder_secret_seed("u1", b"wallet-secret", "s1")
}

pub fn request(unique_identifier: Option<&str>) -> BondRequest {
    BondRequest {
        policy: policy(),
        identity: identity(unique_identifier),
        funds: funds(),
        holder_secret_seed: seed(),
        note: None,
        dev_mode: None,
    }
}
