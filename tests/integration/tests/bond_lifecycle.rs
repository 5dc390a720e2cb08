//! Integration test: bond creation and verification across crates.
//!
//! Creates bonds with zkbond-proof from fixture bundles, then verifies them
//! with the default structural verifiers and with injected ones.

use std::sync::Arc;

use async_trait::async_trait;
use zkbond_core::{BindingParams, FundsProofBundle, HashAlgorithm, VerificationConfig};
use zkbond_crypto::{derive_funds_commitment, derive_identity_commitment, nullifier_proxy};
use zkbond_integration_tests::{created_at, request, seed, CREATED_AT_SECS, SCOPE_ID, VALIDITY};
use zkbond_proof::{
    create_bound_identity_proof_at, verify_bound_identity_proof, BondCreation, BondVerifier,
    FundsProofVerifier, ProofError, WEAK_BINDING_WARNING,
};

fn verifier() -> BondVerifier {
    BondVerifier::new(BindingParams::v1(), VerificationConfig::default())
}

fn create(unique_identifier: Option<&str>) -> BondCreation {
    create_bound_identity_proof_at(&request(unique_identifier), &BindingParams::v1(), created_at())
        .expect("bond creation should succeed")
}

// =========================================================================
// Create, then verify
// =========================================================================

#[tokio::test]
async fn test_create_then_verify_is_valid() {
    let creation = create(Some("u1"));
    assert!(creation.warnings.is_empty());

    let bond = &creation.bound_proof;
    assert_eq!(bond.holder_binding.scope_id, SCOPE_ID);
    assert_eq!(bond.holder_binding.epoch, CREATED_AT_SECS);
    assert_eq!(bond.metadata.valid_until, CREATED_AT_SECS + VALIDITY);
    assert_eq!(bond.metadata.scope, "s1");
    assert_eq!(bond.identity.unique_identifier.as_deref(), Some("u1"));
    assert_eq!(bond.funds.verified_policy.rail_id, "CUSTODIAL_ATTESTATION");
    assert!(bond.funds.threshold_met);

    let result = verifier().verify_at(bond, CREATED_AT_SECS + 60).await;
    assert!(result.valid, "unexpected result: {:?}", result);
    assert!(result.identity_verified);
    assert!(result.funds_verified);
    assert!(result.binding_verified);
    assert!(!result.expired);
    assert!(result.details.binding.nullifier_unused);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_freshly_created_bond_verifies_now() {
    let creation =
        zkbond_proof::create_bound_identity_proof(&request(Some("u1")), &BindingParams::v1())
            .expect("bond creation should succeed");
    let result = verify_bound_identity_proof(&creation.bound_proof, &BindingParams::v1()).await;
    assert!(result.valid);
}

#[tokio::test]
async fn test_commitments_reproducible_by_holder() {
    let creation = create(Some("u1"));
    let bond = &creation.bound_proof;
    let seed = seed();

    assert_eq!(
        bond.identity.commitment,
        derive_identity_commitment("u1", Some(seed.identity_salt()))
    );
    assert_eq!(
        bond.funds.commitment,
        derive_funds_commitment(
            &nullifier_proxy(&bond.funds.proof.public_inputs.nullifier),
            "CUSTODIAL_ATTESTATION",
            Some(seed.funds_salt()),
        )
    );
}

#[tokio::test]
async fn test_disclosures_extracted() {
    let creation = create(Some("u1"));
    let disclosures = &creation.bound_proof.identity.disclosures;
    assert_eq!(disclosures.age_threshold, Some(18));
    assert_eq!(disclosures.age_threshold_met, Some(true));
    assert_eq!(disclosures.nationality.as_deref(), Some("NLD"));
    assert_eq!(disclosures.passport_valid, Some(true));
}

// =========================================================================
// Warnings and failures at creation
// =========================================================================

#[tokio::test]
async fn test_missing_identifier_warns_but_verifies() {
    let creation = create(None);
    assert_eq!(creation.warnings.len(), 1);
    assert!(creation.warnings[0].contains("weaker"));
    assert_eq!(creation.warnings[0], WEAK_BINDING_WARNING);
    assert!(creation.bound_proof.identity.unique_identifier.is_none());

    let result = verifier().verify_at(&creation.bound_proof, CREATED_AT_SECS).await;
    assert!(result.valid);
}

#[test]
fn test_blank_identifier_treated_as_missing() {
    let creation = create(Some("   "));
    assert_eq!(creation.warnings.len(), 1);
}

#[test]
fn test_empty_bundles_rejected() {
    let mut req = request(Some("u1"));
    req.identity.proofs.clear();
    let err = create_bound_identity_proof_at(&req, &BindingParams::v1(), created_at()).unwrap_err();
    assert_eq!(err.to_string(), "identity proof missing proofs");

    let mut req = request(Some("u1"));
    req.funds.proof.clear();
    let err = create_bound_identity_proof_at(&req, &BindingParams::v1(), created_at()).unwrap_err();
    assert_eq!(err.to_string(), "funds proof missing proof data");
}

// =========================================================================
// Verification failures
// =========================================================================

#[tokio::test]
async fn test_policy_drift_fails_scope_check() {
    let mut bond = create(Some("u1")).bound_proof;
    bond.funds.verified_policy.scope_id = SCOPE_ID + 1;

    let result = verifier().verify_at(&bond, CREATED_AT_SECS).await;
    assert!(!result.details.binding.scope_matched);
    assert!(result.details.binding.binding_matched);
    assert!(!result.binding_verified);
    assert!(!result.valid);
}

#[tokio::test]
async fn test_binding_tamper_isolated() {
    let mut bond = create(Some("u1")).bound_proof;
    bond.holder_binding.binding.0[0] ^= 0x01;

    let result = verifier().verify_at(&bond, CREATED_AT_SECS).await;
    assert!(!result.binding_verified);
    assert!(!result.details.binding.binding_matched);
    assert!(result.identity_verified);
    assert!(result.funds_verified);
    assert!(!result.expired);
    assert!(!result.valid);
}

#[tokio::test]
async fn test_rail_mismatch_warned_at_creation() {
    let mut req = request(Some("u1"));
    req.policy.funds_policy.rail_id = Some("ZCASH_ORCHARD".into());
    let creation = create_bound_identity_proof_at(&req, &BindingParams::v1(), created_at())
        .expect("bond creation should succeed");
    assert_eq!(creation.warnings.len(), 1);
    assert!(creation.warnings[0].contains("ZCASH_ORCHARD"));

    let result = verifier().verify_at(&creation.bound_proof, CREATED_AT_SECS).await;
    assert!(!result.details.funds.rail_matched);
    assert!(!result.funds_verified);
    assert!(!result.valid);
}

#[tokio::test]
async fn test_expiration_boundary() {
    let bond = create(Some("u1")).bound_proof;
    let valid_until = bond.metadata.valid_until;

    let before = verifier().verify_at(&bond, valid_until - 1).await;
    assert!(!before.expired);
    assert!(before.valid);

    let at = verifier().verify_at(&bond, valid_until).await;
    assert!(!at.expired);

    let after = verifier().verify_at(&bond, valid_until + 1).await;
    assert!(after.expired);
    assert!(!after.valid);
    assert!(after.binding_verified);
}

#[tokio::test]
async fn test_mismatched_params_fail_binding() {
    let bond = create(Some("u1")).bound_proof;

    let sha = BindingParams {
        hash: HashAlgorithm::Sha256,
        ..BindingParams::v1()
    };
    let result = BondVerifier::new(sha, VerificationConfig::default())
        .verify_at(&bond, CREATED_AT_SECS)
        .await;
    assert!(!result.details.binding.binding_matched);
    assert!(!result.details.binding.nullifier_matched);
    assert!(!result.valid);
}

#[tokio::test]
async fn test_sha256_params_roundtrip() {
    let params = BindingParams {
        hash: HashAlgorithm::Sha256,
        ..BindingParams::v1()
    };
    let bond = create_bound_identity_proof_at(&request(Some("u1")), &params, created_at())
        .unwrap()
        .bound_proof;
    let result = BondVerifier::new(params, VerificationConfig::default())
        .verify_at(&bond, CREATED_AT_SECS)
        .await;
    assert!(result.valid);
}

struct RejectingFundsVerifier;

#[async_trait]
impl FundsProofVerifier for RejectingFundsVerifier {
    async fn verify_funds(&self, _bundle: &FundsProofBundle) -> Result<bool, ProofError> {
        Err(ProofError::Verifier("custodian signature mismatch".into()))
    }
}

#[tokio::test]
async fn test_injected_verifier_error_reported() {
    let bond = create(Some("u1")).bound_proof;
    let result = verifier()
        .with_funds_verifier(Arc::new(RejectingFundsVerifier))
        .verify_at(&bond, CREATED_AT_SECS)
        .await;

    assert!(!result.funds_verified);
    assert!(result.identity_verified);
    assert!(result.binding_verified);
    assert!(!result.valid);
    let error = result.error.expect("verifier error should be reported");
    assert!(error.contains("custodian signature mismatch"));
}
