//! `zkbond verify`: Verify a bond.

use clap::Args;

use zkbond_proof::{BondVerificationResult, BondVerifier};

use super::load_bond;
use crate::config::ZkbondConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Bond JSON file, encoded bond, or share URL.
    pub input: String,

    /// Verify as of this Unix time (seconds) instead of now.
    #[arg(long)]
    pub at: Option<u64>,

    /// Print the full verification result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &VerifyArgs, config: &ZkbondConfig) -> anyhow::Result<()> {
    let bond = load_bond(&args.input)?;
    let verifier = BondVerifier::new(config.binding.clone(), config.verification.clone());

    let result = match args.at {
        Some(now) => verifier.verify_at(&bond, now).await,
        None => verifier.verify(&bond).await,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&bond.bond_id, &result);
    }

    if !result.valid {
        anyhow::bail!("bond {} is not valid", bond.bond_id);
    }
    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAILED"
    }
}

fn print_summary(bond_id: &str, result: &BondVerificationResult) {
    let d = &result.details;
    println!("Bond {}: {}", bond_id, if result.valid { "VALID" } else { "INVALID" });
    println!("  Identity:   {}", mark(result.identity_verified));
    println!("    query result:  {}", mark(d.identity.query_result_present));
    println!("    disclosures:   {}", mark(d.identity.disclosures_present));
    println!("    proof:         {}", mark(d.identity.proof_verified));
    println!("  Funds:      {}", mark(result.funds_verified));
    println!("    proof:         {}", mark(d.funds.proof_verified));
    println!("    threshold:     {}", mark(d.funds.threshold_met));
    println!("    rail:          {}", mark(d.funds.rail_matched));
    println!("  Binding:    {}", mark(result.binding_verified));
    println!("    binding:       {}", mark(d.binding.binding_matched));
    println!("    nullifier:     {}", mark(d.binding.nullifier_matched));
    println!("    scope:         {}", mark(d.binding.scope_matched));
    println!("    epoch window:  {}", mark(d.binding.epoch_in_window));
    println!(
        "  Expiration: {} (valid until {}, checked at {})",
        mark(!result.expired),
        d.expiration.valid_until,
        d.expiration.checked_at
    );
    if let Some(error) = &result.error {
        println!("  Error: {}", error);
    }
}
