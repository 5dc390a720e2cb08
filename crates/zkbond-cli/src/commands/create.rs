//! `zkbond create`: Create a bond from a policy and two proof bundles.

use clap::Args;
use std::path::PathBuf;

use zkbond_core::{BondPolicy, FundsProofBundle, IdentityProofBundle};
use zkbond_crypto::HolderSecretSeed;
use zkbond_proof::{create_bound_identity_proof, BondRequest};

use super::{open_store, read_json};
use crate::config::ZkbondConfig;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Bond policy (JSON file).
    #[arg(short, long)]
    pub policy: PathBuf,

    /// Identity proof bundle (JSON file).
    #[arg(short, long)]
    pub identity: PathBuf,

    /// Proof-of-funds bundle (JSON file).
    #[arg(short, long)]
    pub funds: PathBuf,

    /// Holder secret seed, 32 bytes hex (see `zkbond seed`).
    #[arg(short, long)]
    pub seed: String,

    /// Free-form note carried in the bond metadata.
    #[arg(short, long)]
    pub note: Option<String>,

    /// Mark the bond as created in development mode.
    #[arg(long)]
    pub dev_mode: bool,

    /// Write the bond here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not add the bond to the local cache.
    #[arg(long)]
    pub no_cache: bool,
}

pub fn run(args: &CreateArgs, config: &ZkbondConfig) -> anyhow::Result<()> {
    let policy: BondPolicy = read_json(&args.policy)?;
    let identity: IdentityProofBundle = read_json(&args.identity)?;
    let funds: FundsProofBundle = read_json(&args.funds)?;
    let holder_secret_seed = HolderSecretSeed::from_hex(&args.seed)?;

    let request = BondRequest {
        policy,
        identity,
        funds,
        holder_secret_seed,
        note: args.note.clone(),
        dev_mode: args.dev_mode.then_some(true),
    };

    let creation = create_bound_identity_proof(&request, &config.binding)?;
    for warning in &creation.warnings {
        eprintln!("warning: {}", warning);
    }

    let bond = &creation.bound_proof;
    if !args.no_cache {
        if open_store(config)?.save(bond) {
            tracing::debug!(bond_id = %bond.bond_id, "bond added to local cache");
        } else {
            eprintln!("warning: bond could not be cached");
        }
    }

    let json = serde_json::to_string_pretty(bond)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("Bond {} written to {}", bond.bond_id, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
