//! zkbond Store: Canonical bond encoding and the local bond cache.

pub mod encoding;
pub mod error;
pub mod storage;

pub use encoding::{decode_bond, encode_bond, proof_from_share_url, share_url, VERIFY_PATH};
pub use error::StoreError;
pub use storage::{BondStore, FileStore, KeyValueStore, MemoryStore};
