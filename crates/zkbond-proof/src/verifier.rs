use async_trait::async_trait;

use zkbond_core::{FundsProofBundle, IdentityProofBundle};

use crate::error::ProofError;

/// Verifies the wrapped identity proof.
///
/// Production callers plug in the identity SDK; the bond layer itself never
/// depends on a proving library.
#[async_trait]
pub trait IdentityProofVerifier: Send + Sync {
    async fn verify_identity(&self, bundle: &IdentityProofBundle) -> Result<bool, ProofError>;
}

/// Verifies the wrapped proof-of-funds proof.
#[async_trait]
pub trait FundsProofVerifier: Send + Sync {
    async fn verify_funds(&self, bundle: &FundsProofBundle) -> Result<bool, ProofError>;
}

/// Accepts any identity bundle carrying at least one sub-proof.
///
/// This is a presence check, not a cryptographic one. Operators that need
/// real assurance must inject the identity SDK's verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralIdentityVerifier;

#[async_trait]
impl IdentityProofVerifier for StructuralIdentityVerifier {
    async fn verify_identity(&self, bundle: &IdentityProofBundle) -> Result<bool, ProofError> {
        Ok(!bundle.proofs.is_empty())
    }
}

/// Accepts any funds bundle with non-empty proof bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralFundsVerifier;

#[async_trait]
impl FundsProofVerifier for StructuralFundsVerifier {
    async fn verify_funds(&self, bundle: &FundsProofBundle) -> Result<bool, ProofError> {
        Ok(!bundle.proof.is_empty())
    }
}
