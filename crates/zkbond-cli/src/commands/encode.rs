//! `zkbond encode` / `decode` / `share`: Transport encodings.

use clap::Args;
use std::path::PathBuf;

use zkbond_core::BoundIdentityProof;
use zkbond_store::{decode_bond, encode_bond, share_url};

use super::{load_bond, open_store, read_json};
use crate::config::ZkbondConfig;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Bond JSON file.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded bond.
    pub encoded: String,
}

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Bond JSON file or encoded bond. Omit to use --id.
    pub input: Option<String>,

    /// Share a cached bond by id.
    #[arg(long, conflicts_with = "input")]
    pub id: Option<String>,

    /// Override the configured verification page origin.
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn run_encode(args: &EncodeArgs) -> anyhow::Result<()> {
    let bond: BoundIdentityProof = read_json(&args.file)?;
    println!("{}", encode_bond(&bond)?);
    Ok(())
}

pub fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let bond = decode_bond(&args.encoded)?;
    println!("{}", serde_json::to_string_pretty(&bond)?);
    Ok(())
}

pub fn run_share(args: &ShareArgs, config: &ZkbondConfig) -> anyhow::Result<()> {
    let bond = match (&args.input, &args.id) {
        (Some(input), _) => load_bond(input)?,
        (None, Some(id)) => open_store(config)?
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("no cached bond with id {}", id))?,
        (None, None) => anyhow::bail!("pass a bond file, an encoded bond, or --id"),
    };

    let base_url = args.base_url.as_deref().unwrap_or(&config.share.base_url);
    println!("{}", share_url(base_url, &bond)?);
    Ok(())
}
