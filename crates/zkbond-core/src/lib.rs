//! zkbond Core: Fundamental types, errors, and versioned parameters for
//! binding an identity proof and a proof-of-funds to the same holder.

pub mod bond;
pub mod bundle;
pub mod config;
pub mod error;
pub mod types;

pub use bond::{
    BalanceSnapshot, BondMetadata, BondPolicy, BoundIdentityProof, FundsComponent, FundsPolicy,
    IdentityComponent, IdentityDisclosures, VerifiedPolicy, BOND_VERSION,
};
pub use bundle::{
    FundsProofBundle, FundsPublicInputs, IdentityProofBundle, IdentitySubProof,
    DEFAULT_RAIL_ID,
};
pub use config::{BindingParams, HashAlgorithm, StorageConfig, VerificationConfig};
pub use error::CoreError;
pub use types::{Bytes32, Commitment, HolderBinding, HolderBindingInput};
