use chrono::{DateTime, Utc};

use zkbond_core::{
    BalanceSnapshot, BindingParams, BondMetadata, BondPolicy, BoundIdentityProof, FundsComponent,
    FundsProofBundle, HolderBindingInput, IdentityComponent, IdentityProofBundle, VerifiedPolicy,
    BOND_VERSION,
};
use zkbond_crypto::{
    derive_funds_commitment, derive_holder_binding, derive_identity_commitment, nullifier_proxy,
    HolderSecretSeed,
};

use crate::disclosures::extract_disclosures;
use crate::error::ProofError;

/// Warning attached when the identity proof carries no unique identifier.
pub const WEAK_BINDING_WARNING: &str = "identity proof has no unique identifier; the identity \
     commitment falls back to the query result, so the holder binding is weaker";

/// Everything needed to assemble a bond.
#[derive(Debug, Clone)]
pub struct BondRequest {
    pub policy: BondPolicy,
    pub identity: IdentityProofBundle,
    pub funds: FundsProofBundle,
    pub holder_secret_seed: HolderSecretSeed,
    pub note: Option<String>,
    pub dev_mode: Option<bool>,
}

/// A successfully assembled bond plus any non-fatal warnings.
#[derive(Debug, Clone)]
pub struct BondCreation {
    pub bound_proof: BoundIdentityProof,
    pub warnings: Vec<String>,
}

/// Assemble a bond at the current time.
pub fn create_bound_identity_proof(
    request: &BondRequest,
    params: &BindingParams,
) -> Result<BondCreation, ProofError> {
    create_bound_identity_proof_at(request, params, Utc::now())
}

/// Assemble a bond as of `now`.
///
/// Fails fast when either bundle is missing its proof material. A missing
/// unique identifier is not fatal: the bond is still created, with a warning.
pub fn create_bound_identity_proof_at(
    request: &BondRequest,
    params: &BindingParams,
    now: DateTime<Utc>,
) -> Result<BondCreation, ProofError> {
    if request.identity.proofs.is_empty() {
        return Err(ProofError::MissingIdentityProofs);
    }
    if request.funds.proof.is_empty() {
        return Err(ProofError::MissingFundsProof);
    }
    params.validate()?;

    let policy = &request.policy;
    let funds_policy = &policy.funds_policy;
    let seed = &request.holder_secret_seed;
    let mut warnings = Vec::new();

    // 1-2. Identity commitment.
    let unique_identifier = request
        .identity
        .resolved_unique_identifier()
        .map(str::to_owned);
    let identity_source = match &unique_identifier {
        Some(id) => id.clone(),
        None => {
            tracing::warn!(
                proof_id = %request.identity.proof_id,
                "identity proof has no unique identifier, using query result"
            );
            warnings.push(WEAK_BINDING_WARNING.to_string());
            serde_json::to_string(&request.identity.query_result)
                .map_err(|e| ProofError::Serialization(e.to_string()))?
        }
    };
    let identity_commitment =
        derive_identity_commitment(&identity_source, Some(seed.identity_salt()));

    // 3. Funds commitment.
    let rail_id = request.funds.effective_rail_id().to_string();
    let funds_commitment = derive_funds_commitment(
        &nullifier_proxy(&request.funds.public_inputs.nullifier),
        &rail_id,
        Some(seed.funds_salt()),
    );

    // 4. Holder binding.
    let epoch = u64::try_from(now.timestamp()).unwrap_or(0);
    let holder_binding = derive_holder_binding(
        &HolderBindingInput {
            identity_commitment,
            funds_commitment,
            scope_id: funds_policy.scope_id,
            epoch,
            custom_data: None,
        },
        params,
    );

    // 5. Disclosures.
    let disclosures = extract_disclosures(&request.identity.query_result);

    // 6. Funds snapshot and bond.
    let inputs = &request.funds.public_inputs;
    let threshold_met = inputs.threshold_raw >= funds_policy.threshold_raw;
    if !threshold_met {
        warnings.push(format!(
            "funds proof threshold {} is below the policy threshold {}",
            inputs.threshold_raw, funds_policy.threshold_raw
        ));
    }
    if inputs.verifier_scope_id != funds_policy.scope_id {
        warnings.push(format!(
            "funds proof was generated for scope {} but the policy scope is {}",
            inputs.verifier_scope_id, funds_policy.scope_id
        ));
    }
    let policy_rail = funds_policy.rail_id.clone().unwrap_or_else(|| rail_id.clone());
    if policy_rail != rail_id {
        tracing::warn!(policy_rail = %policy_rail, bundle_rail = %rail_id, "funds rail mismatch");
        warnings.push(format!(
            "funds proof is on rail {} but the policy requires {}; the bond will not verify",
            rail_id, policy_rail
        ));
    }

    let verified_policy = VerifiedPolicy {
        policy_id: funds_policy.policy_id,
        threshold: funds_policy.threshold_raw,
        currency: funds_policy.currency.clone(),
        currency_code: funds_policy.currency_code,
        rail_id: policy_rail,
        scope_id: funds_policy.scope_id,
    };

    let bond_id = generate_bond_id(now);
    let bound_proof = BoundIdentityProof {
        version: BOND_VERSION.to_string(),
        bond_id: bond_id.clone(),
        timestamp: u64::try_from(now.timestamp_millis()).unwrap_or(0),
        holder_binding,
        identity: IdentityComponent {
            proof: request.identity.clone(),
            commitment: identity_commitment,
            unique_identifier,
            disclosures,
        },
        funds: FundsComponent {
            proof: request.funds.clone(),
            commitment: funds_commitment,
            verified_policy,
            threshold_met,
            balance_snapshot: balance_snapshot(&request.funds),
        },
        metadata: BondMetadata {
            purpose: policy.purpose.clone(),
            scope: policy.scope.clone(),
            valid_until: epoch.saturating_add(policy.validity),
            dev_mode: request.dev_mode,
            note: request.note.clone(),
            domain: policy.domain.clone(),
        },
    };

    tracing::info!(
        bond_id = %bond_id,
        scope_id = funds_policy.scope_id,
        epoch,
        warnings = warnings.len(),
        "bound identity proof created"
    );

    Ok(BondCreation {
        bound_proof,
        warnings,
    })
}

/// `bond_<millis>_<random hex>`: locally distinguishing, not globally unique.
fn generate_bond_id(now: DateTime<Utc>) -> String {
    let suffix: [u8; 4] = rand::random();
    format!("bond_{}_{}", now.timestamp_millis(), hex::encode(suffix))
}

fn balance_snapshot(funds: &FundsProofBundle) -> Option<BalanceSnapshot> {
    let inputs = &funds.public_inputs;
    if inputs.snapshot_block_height.is_none() && inputs.snapshot_anchor_orchard.is_none() {
        return None;
    }
    Some(BalanceSnapshot {
        block_height: inputs.snapshot_block_height,
        anchor: inputs.snapshot_anchor_orchard.as_deref().map(hex::encode),
    })
}
