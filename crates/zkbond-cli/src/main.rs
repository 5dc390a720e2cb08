//! zkbond CLI: Bound identity + proof-of-funds bonds, offline.
//!
//! Subcommands: seed, create, verify, encode, decode, share, list, delete.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::ZkbondConfig;

/// zkbond: Bind an identity proof and a proof of funds to one holder.
#[derive(Parser, Debug)]
#[command(name = "zkbond", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "zkbond.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Override the bond cache directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive a holder secret seed from an identifier and a wallet secret.
    Seed(commands::seed::SeedArgs),
    /// Create a bond from a policy and two proof bundles.
    Create(commands::create::CreateArgs),
    /// Verify a bond file, encoded bond, or share URL.
    Verify(commands::verify::VerifyArgs),
    /// Encode a bond JSON file for transport.
    Encode(commands::encode::EncodeArgs),
    /// Decode an encoded bond back to JSON.
    Decode(commands::encode::DecodeArgs),
    /// Build a shareable verification URL for a bond.
    Share(commands::encode::ShareArgs),
    /// List cached bonds, newest first.
    List(commands::list::ListArgs),
    /// Delete a cached bond.
    Delete(commands::list::DeleteArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle --init flag
    if cli.init {
        let config = ZkbondConfig::default();
        config.save(&cli.config)?;
        println!("Wrote default config to {}", cli.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = ZkbondConfig::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    init_tracing(&config);
    tracing::debug!(
        config = %cli.config.display(),
        data_dir = %config.storage.data_dir.display(),
        binding_version = config.binding.version,
        "configuration loaded"
    );

    let Some(command) = cli.command else {
        anyhow::bail!("no subcommand given; run `zkbond --help`");
    };

    match &command {
        Commands::Seed(args) => commands::seed::run(args),
        Commands::Create(args) => commands::create::run(args, &config),
        Commands::Verify(args) => commands::verify::run(args, &config).await,
        Commands::Encode(args) => commands::encode::run_encode(args),
        Commands::Decode(args) => commands::encode::run_decode(args),
        Commands::Share(args) => commands::encode::run_share(args, &config),
        Commands::List(args) => commands::list::run_list(args, &config),
        Commands::Delete(args) => commands::list::run_delete(args, &config),
    }
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing(config: &ZkbondConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
