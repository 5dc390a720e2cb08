//! `zkbond seed`: Derive a holder secret seed.

use clap::Args;

use zkbond_crypto::derive_holder_secret_seed;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Identity unique identifier the seed is tied to.
    #[arg(short, long)]
    pub identifier: String,

    /// Wallet secret (raw string, or hex with --hex).
    #[arg(short, long)]
    pub wallet_secret: String,

    /// Treat the wallet secret as hex.
    #[arg(long)]
    pub hex: bool,

    /// Scope the seed is derived for.
    #[arg(short, long)]
    pub scope: String,
}

pub fn run(args: &SeedArgs) -> anyhow::Result<()> {
    let secret = if args.hex {
        hex::decode(args.wallet_secret.trim_start_matches("0x"))
            .map_err(|e| anyhow::anyhow!("invalid wallet secret hex: {}", e))?
    } else {
        args.wallet_secret.as_bytes().to_vec()
    };

    let seed = derive_holder_secret_seed(&args.identifier, &secret, &args.scope);
    println!("{}", seed.to_hex());
    Ok(())
}
