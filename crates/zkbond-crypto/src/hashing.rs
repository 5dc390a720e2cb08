use sha2::{Digest, Sha256};
use zkbond_core::HashAlgorithm;

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Hash arbitrary data using BLAKE3.
pub fn hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Hash arbitrary data with the selected algorithm.
pub fn hash_with(algorithm: HashAlgorithm, data: &[u8]) -> Hash {
    hash_parts(algorithm, &[data])
}

/// Hash the concatenation of `parts` without building the joined buffer.
pub fn hash_parts(algorithm: HashAlgorithm, parts: &[&[u8]]) -> Hash {
    match algorithm {
        HashAlgorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            for part in parts {
                hasher.update(part);
            }
            *hasher.finalize().as_bytes()
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().into()
        }
    }
}
