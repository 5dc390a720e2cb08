pub mod binding;
pub mod commitment;
pub mod error;
pub mod hashing;

pub use binding::{derive_holder_binding, recompute_matches};
pub use commitment::{
    derive_funds_commitment, derive_holder_secret_seed, derive_identity_commitment,
    nullifier_proxy, HolderSecretSeed,
};
pub use error::CryptoError;
pub use hashing::{hash, hash_parts, hash_with, Hash};
