use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use zkbond_core::{BindingParams, BoundIdentityProof, HolderBindingInput, VerificationConfig};
use zkbond_crypto::recompute_matches;

use crate::error::ProofError;
use crate::verifier::{
    FundsProofVerifier, IdentityProofVerifier, StructuralFundsVerifier,
    StructuralIdentityVerifier,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDetails {
    pub query_result_present: bool,
    pub disclosures_present: bool,
    pub proof_verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsDetails {
    pub proof_verified: bool,
    pub threshold_met: bool,
    pub rail_matched: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDetails {
    pub binding_matched: bool,
    pub nullifier_matched: bool,
    pub scope_matched: bool,
    pub epoch_in_window: bool,
    /// Always `true`: there is no nullifier-spend registry.
    pub nullifier_unused: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationDetails {
    pub valid_until: u64,
    pub checked_at: u64,
    pub expired: bool,
}

/// Per-check breakdown of a verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    pub identity: IdentityDetails,
    pub funds: FundsDetails,
    pub binding: BindingDetails,
    pub expiration: ExpirationDetails,
}

/// Outcome of verifying a bond. Always fully populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondVerificationResult {
    pub valid: bool,
    pub identity_verified: bool,
    pub funds_verified: bool,
    pub binding_verified: bool,
    pub expired: bool,
    pub details: VerificationDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Verifies bonds against a fixed set of binding parameters.
///
/// Sub-proof verification is delegated to injected verifiers; without them
/// the structural presence checks are used.
pub struct BondVerifier {
    params: BindingParams,
    config: VerificationConfig,
    identity_verifier: Option<Arc<dyn IdentityProofVerifier>>,
    funds_verifier: Option<Arc<dyn FundsProofVerifier>>,
}

impl BondVerifier {
    pub fn new(params: BindingParams, config: VerificationConfig) -> Self {
        Self {
            params,
            config,
            identity_verifier: None,
            funds_verifier: None,
        }
    }

    /// Use `verifier` for the identity sub-proof.
    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityProofVerifier>) -> Self {
        self.identity_verifier = Some(verifier);
        self
    }

    /// Use `verifier` for the funds sub-proof.
    pub fn with_funds_verifier(mut self, verifier: Arc<dyn FundsProofVerifier>) -> Self {
        self.funds_verifier = Some(verifier);
        self
    }

    pub fn params(&self) -> &BindingParams {
        &self.params
    }

    /// Verify `bond` at the current time.
    pub async fn verify(&self, bond: &BoundIdentityProof) -> BondVerificationResult {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        self.verify_at(bond, now).await
    }

    /// Verify `bond` as of `now` (seconds since the Unix epoch).
    ///
    /// Every check group runs regardless of the others so the details are
    /// complete. Verifier failures are reported in `error`, never propagated.
    pub async fn verify_at(&self, bond: &BoundIdentityProof, now: u64) -> BondVerificationResult {
        let mut errors = Vec::new();

        // Identity
        let identity_verifier: &dyn IdentityProofVerifier = self
            .identity_verifier
            .as_deref()
            .unwrap_or(&StructuralIdentityVerifier);
        let identity = IdentityDetails {
            query_result_present: bond.identity.proof.has_query_result(),
            disclosures_present: !bond.identity.disclosures.is_empty(),
            proof_verified: guarded(
                "identity",
                identity_verifier.verify_identity(&bond.identity.proof),
                &mut errors,
            )
            .await,
        };

        // Funds
        let funds_verifier: &dyn FundsProofVerifier = self
            .funds_verifier
            .as_deref()
            .unwrap_or(&StructuralFundsVerifier);
        let funds = FundsDetails {
            proof_verified: guarded(
                "funds",
                funds_verifier.verify_funds(&bond.funds.proof),
                &mut errors,
            )
            .await,
            threshold_met: bond.funds.threshold_met,
            rail_matched: bond.funds.proof.effective_rail_id()
                == bond.funds.verified_policy.rail_id,
        };

        // Binding
        let stored = &bond.holder_binding;
        let input = HolderBindingInput {
            identity_commitment: bond.identity.commitment,
            funds_commitment: bond.funds.commitment,
            scope_id: stored.scope_id,
            epoch: stored.epoch,
            custom_data: None,
        };
        let (binding_matched, nullifier_matched) =
            recompute_matches(&input, stored, &self.params);
        let window_start = now.saturating_sub(self.config.max_epoch_age_secs);
        let binding = BindingDetails {
            binding_matched,
            nullifier_matched,
            scope_matched: stored.scope_id == bond.funds.verified_policy.scope_id,
            epoch_in_window: stored.epoch >= window_start && stored.epoch <= now,
            // TODO: consult a nullifier-spend registry once one exists.
            nullifier_unused: true,
        };

        // Expiration
        let expired = bond.is_expired_at(now);
        let expiration = ExpirationDetails {
            valid_until: bond.metadata.valid_until,
            checked_at: now,
            expired,
        };

        let identity_verified = identity.query_result_present
            && identity.disclosures_present
            && identity.proof_verified;
        let funds_verified = funds.proof_verified && funds.threshold_met && funds.rail_matched;
        let binding_verified = binding.binding_matched
            && binding.nullifier_matched
            && binding.scope_matched
            && binding.epoch_in_window
            && binding.nullifier_unused;
        let valid = identity_verified && funds_verified && binding_verified && !expired;

        tracing::info!(
            bond_id = %bond.bond_id,
            valid,
            identity_verified,
            funds_verified,
            binding_verified,
            expired,
            "bond verified"
        );

        BondVerificationResult {
            valid,
            identity_verified,
            funds_verified,
            binding_verified,
            expired,
            details: VerificationDetails {
                identity,
                funds,
                binding,
                expiration,
            },
            error: if errors.is_empty() {
                None
            } else {
                Some(errors.join("; "))
            },
        }
    }
}

impl Default for BondVerifier {
    fn default() -> Self {
        Self::new(BindingParams::v1(), VerificationConfig::default())
    }
}

/// Verify a bond with the structural sub-proof checks and default window.
pub async fn verify_bound_identity_proof(
    bond: &BoundIdentityProof,
    params: &BindingParams,
) -> BondVerificationResult {
    BondVerifier::new(params.clone(), VerificationConfig::default())
        .verify(bond)
        .await
}

/// Await an injected verifier, turning errors and panics into `false`.
async fn guarded<F>(label: &str, check: F, errors: &mut Vec<String>) -> bool
where
    F: Future<Output = Result<bool, ProofError>>,
{
    match AssertUnwindSafe(check).catch_unwind().await {
        Ok(Ok(verified)) => verified,
        Ok(Err(e)) => {
            tracing::warn!(check = label, error = %e, "sub-proof verifier failed");
            errors.push(format!("{} verification failed: {}", label, e));
            false
        }
        Err(_) => {
            tracing::error!(check = label, "sub-proof verifier panicked");
            errors.push(format!("{} verifier panicked", label));
            false
        }
    }
}
