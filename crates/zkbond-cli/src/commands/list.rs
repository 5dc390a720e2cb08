//! `zkbond list` / `delete`: Inspect the local bond cache.

use chrono::{DateTime, Utc};
use clap::Args;

use super::open_store;
use crate::config::ZkbondConfig;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the cached bonds as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the bond to delete.
    pub bond_id: Option<String>,

    /// Delete every cached bond.
    #[arg(long, conflicts_with = "bond_id")]
    pub all: bool,
}

pub fn run_list(args: &ListArgs, config: &ZkbondConfig) -> anyhow::Result<()> {
    let bonds = open_store(config)?.list();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bonds)?);
        return Ok(());
    }

    if bonds.is_empty() {
        println!("No cached bonds in {}", config.storage.data_dir.display());
        return Ok(());
    }

    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);

    println!("Cached bonds ({}):", bonds.len());
    for bond in &bonds {
        let status = if bond.is_expired_at(now) { "expired" } else { "active" };
        let valid_until = i64::try_from(bond.metadata.valid_until)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| bond.metadata.valid_until.to_string());
        println!(
            "  {}  {:<8} purpose={} scope={} valid_until={}",
            bond.bond_id, status, bond.metadata.purpose, bond.metadata.scope, valid_until
        );
    }
    Ok(())
}

pub fn run_delete(args: &DeleteArgs, config: &ZkbondConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if args.all {
        if !store.clear() {
            anyhow::bail!("failed to clear the bond cache");
        }
        println!("Bond cache cleared.");
        return Ok(());
    }

    let Some(bond_id) = &args.bond_id else {
        anyhow::bail!("pass a bond id or --all");
    };
    if !store.delete(bond_id) {
        anyhow::bail!("no cached bond with id {}", bond_id);
    }
    println!("Deleted bond {}", bond_id);
    Ok(())
}
