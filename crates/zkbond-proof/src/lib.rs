//! zkbond Proof: Bond assembly and verification.
//!
//! - Assembly: validates both proof bundles, derives the identity and funds
//!   commitments, binds them to a scope and epoch, extracts disclosures.
//! - Verification: recomputes the binding from the bond's own data, checks
//!   both sub-proofs through injected verifiers, checks expiration.

pub mod assembly;
pub mod disclosures;
pub mod error;
pub mod verification;
pub mod verifier;

pub use assembly::{
    create_bound_identity_proof, create_bound_identity_proof_at, BondCreation, BondRequest,
    WEAK_BINDING_WARNING,
};
pub use disclosures::extract_disclosures;
pub use error::ProofError;
pub use verification::{
    verify_bound_identity_proof, BindingDetails, BondVerificationResult, BondVerifier,
    ExpirationDetails, FundsDetails, IdentityDetails, VerificationDetails,
};
pub use verifier::{
    FundsProofVerifier, IdentityProofVerifier, StructuralFundsVerifier,
    StructuralIdentityVerifier,
};
