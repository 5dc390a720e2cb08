//! Canonical bond encoding: JSON, then URL-safe base64 without padding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use url::Url;
use zkbond_core::BoundIdentityProof;

use crate::error::StoreError;

/// Path of the verification page a share URL points at.
pub const VERIFY_PATH: &str = "/verify-bond";

const PROOF_PARAM: &str = "proof";

/// URL-safe alphabet, no padding on encode, padding optional on decode.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a bond for transport in a URL.
pub fn encode_bond(bond: &BoundIdentityProof) -> Result<String, StoreError> {
    let json = serde_json::to_vec(bond)?;
    Ok(URL_SAFE_LENIENT.encode(json))
}

/// Decode a bond produced by [`encode_bond`].
///
/// Also accepts padded input and the standard base64 alphabet.
pub fn decode_bond(encoded: &str) -> Result<BoundIdentityProof, StoreError> {
    let normalized: String = encoded
        .trim()
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let json = URL_SAFE_LENIENT.decode(normalized)?;
    Ok(serde_json::from_slice(&json)?)
}

/// `<base_url>/verify-bond?proof=<encoded>`.
pub fn share_url(base_url: &str, bond: &BoundIdentityProof) -> Result<String, StoreError> {
    let encoded = encode_bond(bond)?;
    Ok(format!(
        "{}{}?{}={}",
        base_url.trim_end_matches('/'),
        VERIFY_PATH,
        PROOF_PARAM,
        encoded
    ))
}

/// Extract the encoded bond from a share URL's `proof` query parameter.
///
/// The value is percent-decoded. Base64 never contains spaces, so a space
/// produced by form decoding is read back as the `+` it came from.
pub fn proof_from_share_url(link: &str) -> Result<String, StoreError> {
    let parsed = Url::parse(link.trim()).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

    parsed
        .query_pairs()
        .find(|(key, _)| key == PROOF_PARAM)
        .map(|(_, value)| value.replace(' ', "+"))
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StoreError::InvalidUrl(format!("missing '{}' parameter", PROOF_PARAM)))
}
