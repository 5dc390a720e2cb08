//! Holder-binding and nullifier derivation.
//!
//! `binding   = H(domain || identity_commitment || funds_commitment || scope_id || epoch? || custom_data?)`
//! `nullifier = H(binding || ":nullifier:" || scope_id)`
//!
//! Integers are encoded as 8-byte big-endian. The epoch is only part of the
//! preimage when `BindingParams::epoch_bound` is set. Anyone holding the two
//! commitments, the scope and the epoch can reproduce both values.

use zkbond_core::{BindingParams, Bytes32, HolderBinding, HolderBindingInput};

use crate::hashing::hash_parts;

const NULLIFIER_TAG: &[u8] = b":nullifier:";

/// Derive the holder binding and its nullifier.
pub fn derive_holder_binding(input: &HolderBindingInput, params: &BindingParams) -> HolderBinding {
    let scope = input.scope_id.to_be_bytes();
    let epoch = input.epoch.to_be_bytes();
    let epoch_part: &[u8] = if params.epoch_bound { &epoch } else { &[] };
    let custom = input.custom_data.as_deref().unwrap_or_default();

    let binding = hash_parts(
        params.hash,
        &[
            params.domain_separator.as_bytes(),
            input.identity_commitment.as_bytes(),
            input.funds_commitment.as_bytes(),
            &scope,
            epoch_part,
            custom,
        ],
    );
    let nullifier = hash_parts(params.hash, &[&binding, NULLIFIER_TAG, &scope]);

    tracing::debug!(
        scope_id = input.scope_id,
        epoch = input.epoch,
        version = params.version,
        hash = %params.hash,
        "derived holder binding"
    );

    HolderBinding {
        binding: Bytes32::new(binding),
        nullifier: Bytes32::new(nullifier),
        scope_id: input.scope_id,
        epoch: input.epoch,
    }
}

/// Recompute a binding from `input` and compare it against `stored`.
///
/// Returns `(binding_matches, nullifier_matches)`.
pub fn recompute_matches(
    input: &HolderBindingInput,
    stored: &HolderBinding,
    params: &BindingParams,
) -> (bool, bool) {
    let recomputed = derive_holder_binding(input, params);
    (
        recomputed.binding == stored.binding,
        recomputed.nullifier == stored.nullifier,
    )
}
