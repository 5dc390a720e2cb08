use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A fixed 32-byte value (hash output, commitment, binding or nullifier).
///
/// Serialized as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes32(pub [u8; 32]);

/// One-way commitment standing in for a secret value.
pub type Commitment = Bytes32;

impl Bytes32 {
    /// The all-zero value.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Wrap a raw array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, which must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed)?;
        Self::from_slice(&bytes)
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({})", self.to_hex())
    }
}

impl FromStr for Bytes32 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Inputs to a holder-binding derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderBindingInput {
    pub identity_commitment: Commitment,
    pub funds_commitment: Commitment,
    pub scope_id: u64,
    pub epoch: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Vec<u8>>,
}

/// A binding tying an identity commitment and a funds commitment together
/// for one scope and epoch, plus the nullifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderBinding {
    pub binding: Bytes32,
    pub nullifier: Bytes32,
    pub scope_id: u64,
    pub epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let value = Bytes32::new([0xABu8; 32]);
        let hex = value.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 66);
        assert_eq!(Bytes32::from_hex(&hex).unwrap(), value);
    }

    #[test]
    fn test_from_hex_without_prefix() {
        let raw = "11".repeat(32);
        let value: Bytes32 = raw.parse().unwrap();
        assert_eq!(value, Bytes32::new([0x11; 32]));
    }

    #[test]
    fn test_from_hex_wrong_length() {
        let err = Bytes32::from_hex("0x0102").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidLength {
                expected: 32,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_from_hex_invalid_chars() {
        assert!(Bytes32::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let value = Bytes32::new([0x01; 32]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(32)));
        let back: Bytes32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_holder_binding_field_names() {
        let hb = HolderBinding {
            binding: Bytes32::ZERO,
            nullifier: Bytes32::ZERO,
            scope_id: 7,
            epoch: 1_700_000_000,
        };
        let json = serde_json::to_value(&hb).unwrap();
        assert!(json.get("scopeId").is_some());
        assert!(json.get("epoch").is_some());
        assert!(json.get("binding").is_some());
        assert!(json.get("nullifier").is_some());
    }

    #[test]
    fn test_binding_input_custom_data_omitted() {
        let input = HolderBindingInput {
            identity_commitment: Bytes32::ZERO,
            funds_commitment: Bytes32::ZERO,
            scope_id: 1,
            epoch: 2,
            custom_data: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("customData").is_none());
    }
}
