//! `bullet-intent`: encode, sign and verify Bullet intents from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bullet-intent", version)]
#[command(about = "Encode, sign and verify Bullet intents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical encoding of an intent as hex
    Encode {
        /// Path to the intent JSON
        #[arg(long)]
        intent: PathBuf,
    },
    /// Decode a hex encoded intent and print it as JSON
    Decode {
        /// The canonical intent bytes as hex
        hex: String,
    },
    /// Sign an intent and print the signed intention as JSON
    Sign {
        /// Path to the deployment config YAML
        #[arg(long)]
        config: PathBuf,
        /// Path to the intent JSON
        #[arg(long)]
        intent: PathBuf,
        /// The signer's enterprise address bytes as hex
        #[arg(long)]
        address: String,
        /// The 32 byte Ed25519 secret key as hex
        #[arg(long, env = "BULLET_SIGNING_KEY", hide_env_values = true)]
        signing_key: String,
        /// The owning account's stake credential hash (default: the config's `stake_bullet`)
        #[arg(long)]
        user_stake: Option<String>,
    },
    /// Verify a signed intention, exiting with an error if any signature is invalid
    Verify {
        /// Path to the deployment config YAML
        #[arg(long)]
        config: PathBuf,
        /// Path to the signed intention JSON
        #[arg(long)]
        signed: PathBuf,
        /// The signer's enterprise address bytes as hex
        #[arg(long)]
        address: String,
        /// Ed25519 public keys as hex, one per signature, in order
        #[arg(long = "public-key", required = true)]
        public_keys: Vec<String>,
    },
    /// Print the redeemer for a batch of signed intentions as CBOR hex
    Redeemer {
        /// Paths to signed intention JSON files
        #[arg(long, required = true)]
        signed: Vec<PathBuf>,
        /// Index of the change output
        #[arg(long, default_value_t = 0)]
        change_output: u64,
        /// Index of the first constrained output
        #[arg(long, default_value_t = 0)]
        constraint_output: u64,
        /// Index of the first constrained redeemer
        #[arg(long, default_value_t = 0)]
        constraint_redeemer: u64,
        /// Intention groups as hex
        #[arg(long = "group")]
        groups: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode { intent } => commands::encode(&intent),
        Command::Decode { hex } => commands::decode(&hex),
        Command::Sign {
            config,
            intent,
            address,
            signing_key,
            user_stake,
        } => {
            let args = commands::SignArgs {
                config,
                intent,
                address,
                signing_key,
                user_stake,
            };
            commands::sign(args).await
        }
        Command::Verify {
            config,
            signed,
            address,
            public_keys,
        } => commands::verify(&config, &signed, &address, &public_keys),
        Command::Redeemer {
            signed,
            change_output,
            constraint_output,
            constraint_redeemer,
            groups,
        } => {
            let args = commands::RedeemerArgs {
                signed,
                change_output,
                constraint_output,
                constraint_redeemer,
                groups,
            };
            commands::redeemer(args)
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
