//! Integration test: transport encoding and the bond cache.
//!
//! Bonds created with zkbond-proof are encoded, shared, decoded and cached
//! with zkbond-store, then verified again after the round trip.

use std::path::PathBuf;

use zkbond_core::{
    BindingParams, BoundIdentityProof, FundsProofBundle, StorageConfig, VerificationConfig,
};
use zkbond_integration_tests::{created_at, request, CREATED_AT_SECS};
use zkbond_proof::{create_bound_identity_proof_at, BondVerifier};
use zkbond_store::{
    decode_bond, encode_bond, proof_from_share_url, share_url, BondStore, FileStore, MemoryStore,
};

fn bond_with_note(note: Option<&str>) -> BoundIdentityProof {
    let mut req = request(Some("u1"));
    req.note = note.map(str::to_owned);
    create_bound_identity_proof_at(&req, &BindingParams::v1(), created_at())
        .expect("bond creation should succeed")
        .bound_proof
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("zkbond-it-{}", rand::random::<u64>()))
}

// =========================================================================
// Encoding and share URLs
// =========================================================================

#[tokio::test]
async fn test_shared_bond_still_verifies() {
    let bond = bond_with_note(Some("deposit for flat 3B"));
    let url = share_url("https://verify.example.org", &bond).unwrap();
    assert!(url.starts_with("https://verify.example.org/verify-bond?proof="));

    let received = decode_bond(&proof_from_share_url(&url).unwrap()).unwrap();
    assert_eq!(received, bond);

    let result = BondVerifier::new(BindingParams::v1(), VerificationConfig::default())
        .verify_at(&received, CREATED_AT_SECS)
        .await;
    assert!(result.valid);
}

#[test]
fn test_roundtrip_non_ascii_note() {
    let bond = bond_with_note(Some("Kaution für Wohnung — 押金 ✓"));
    let decoded = decode_bond(&encode_bond(&bond).unwrap()).unwrap();
    assert_eq!(decoded.metadata.note, bond.metadata.note);
    assert_eq!(decoded, bond);
}

#[tokio::test]
async fn test_prover_fields_survive_bond_roundtrip() {
    let prover_output = serde_json::json!({
        "rail_id": "CUSTODIAL_ATTESTATION",
        "circuit_version": 3,
        "proof": [171, 171, 171, 171],
        "public_inputs": {
            "threshold_raw": 2_500_000,
            "required_currency_code": 840,
            "current_epoch": 5,
            "verifier_scope_id": 42,
            "policy_id": 7,
            "nullifier": [1, 2, 3, 4],
            "holder_binding": [9, 9],
            "proven_sum": 123456
        },
        "engine_version": "0.4.2"
    });
    let mut req = request(Some("u1"));
    req.funds = serde_json::from_value::<FundsProofBundle>(prover_output.clone()).unwrap();

    let bond = create_bound_identity_proof_at(&req, &BindingParams::v1(), created_at())
        .unwrap()
        .bound_proof;
    let received = decode_bond(&encode_bond(&bond).unwrap()).unwrap();

    assert_eq!(serde_json::to_value(&received.funds.proof).unwrap(), prover_output);
    let result = BondVerifier::new(BindingParams::v1(), VerificationConfig::default())
        .verify_at(&received, CREATED_AT_SECS)
        .await;
    assert!(result.valid);
}

#[tokio::test]
async fn test_tampered_encoding_detected() {
    let bond = bond_with_note(None);
    let mut json: serde_json::Value = serde_json::to_value(&bond).unwrap();
    json["holderBinding"]["scopeId"] = serde_json::json!(43);
    let forged: BoundIdentityProof = serde_json::from_value(json).unwrap();
    let forged = decode_bond(&encode_bond(&forged).unwrap()).unwrap();

    let result = BondVerifier::new(BindingParams::v1(), VerificationConfig::default())
        .verify_at(&forged, CREATED_AT_SECS)
        .await;
    assert!(!result.details.binding.binding_matched);
    assert!(!result.valid);
}

// =========================================================================
// Bond cache
// =========================================================================

#[test]
fn test_cache_keeps_newest_fifty() {
    let store = BondStore::new(MemoryStore::new(), StorageConfig::default());
    let mut ids = Vec::new();
    for _ in 0..52 {
        let bond = bond_with_note(None);
        ids.push(bond.bond_id.clone());
        assert!(store.save(&bond));
    }

    let cached = store.list();
    assert_eq!(cached.len(), 50);
    assert_eq!(cached[0].bond_id, ids[51]);
    assert!(store.get(&ids[0]).is_none());
    assert!(store.get(&ids[1]).is_none());
    assert!(store.get(&ids[2]).is_some());
}

#[test]
fn test_file_cache_survives_reopen() {
    let dir = temp_dir();
    let bond = bond_with_note(Some("persisted"));
    {
        let store = BondStore::new(FileStore::open(&dir).unwrap(), StorageConfig::default());
        assert!(store.save(&bond));
    }

    let store = BondStore::new(FileStore::open(&dir).unwrap(), StorageConfig::default());
    assert_eq!(store.get(&bond.bond_id), Some(bond.clone()));
    assert!(store.delete(&bond.bond_id));
    assert!(store.is_empty());
    std::fs::remove_dir_all(&dir).ok();
}
