/// Bond assembly and verification errors.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    #[error("identity proof missing proofs")]
    MissingIdentityProofs,

    #[error("funds proof missing proof data")]
    MissingFundsProof,

    #[error("verifier error: {0}")]
    Verifier(String),

    #[error("core error: {0}")]
    Core(#[from] zkbond_core::CoreError),

    #[error("serialization error: {0}")]
    Serialization(String),
}
