//! kvcodec Inspector
//!
//! Decodes raw storage keys and values for debugging on-disk data.

use clap::{Parser, Subcommand, ValueEnum};
use kvcodec::{hash_slot, CodecConfig, KeyKind, StorageKey, StorageValue};
use tracing_subscriber::{fmt, EnvFilter};

/// kvcodec Inspector
#[derive(Parser, Debug)]
#[command(name = "kvcodec-inspect")]
#[command(about = "Inspect kvcodec storage keys and values")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the cluster slot of a key
    Slot {
        /// The logical key
        key: String,
    },

    /// Print the encoded meta key of a logical key (hex)
    MetaKey {
        /// The logical key
        key: String,
    },

    /// Decode a hex-encoded storage key
    Key {
        /// Expected key kind
        #[arg(value_enum)]
        kind: KindArg,

        /// Encoded key, hex
        hex: String,
    },

    /// Decode a hex-encoded storage value
    Value {
        /// Encoded value, hex
        hex: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Meta,
    Item,
    Zscore,
    List,
    Delete,
}

impl From<KindArg> for KeyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Meta => KeyKind::Meta,
            KindArg::Item => KeyKind::Item,
            KindArg::Zscore => KeyKind::ZScore,
            KindArg::List => KeyKind::List,
            KindArg::Delete => KeyKind::Delete,
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kvcodec=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Slot { key } => {
            println!("{}", hash_slot(key.as_bytes()));
        }
        Commands::MetaKey { key } => {
            let encoded = StorageKey::meta(key.into_bytes()).encode(&CodecConfig::default())?;
            println!("{}", hex::encode(&encoded));
        }
        Commands::Key { kind, hex } => {
            let bytes = hex::decode(hex.trim())?;
            let key = StorageKey::decode(kind.into(), &bytes)?;
            println!("{:?}", key);
            println!("slot: {}", key.slot());
        }
        Commands::Value { hex } => {
            let bytes = hex::decode(hex.trim())?;
            println!("{:?}", StorageValue::decode(&bytes)?);
        }
    }
    Ok(())
}
