//! Contact token demo binary.
//!
//! # Usage
//!
//! ```bash
//! # Alice/Bob self-test
//! contactkx
//!
//! # Also establish contacts between Alice and 5 more peers, with debug logs
//! contactkx --peers 5 --log-level debug
//! ```
//!
//! Public keys and tokens go to stdout, logs to stderr. Exits non-zero if any
//! derivation fails or the two sides disagree.

use std::io;

use clap::Parser;
use contactkx_cli::{DemoConfig, run_demo};
use contactkx_core::{HexPublisher, SystemEnv};
use contactkx_crypto::X25519Blake2b;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Contact token self-test
#[derive(Parser, Debug)]
#[command(name = "contactkx")]
#[command(about = "Derive and verify contact tokens between two freshly generated parties")]
#[command(version)]
struct Args {
    /// Extra peers to establish contacts with after the Alice/Bob run
    #[arg(long, default_value = "0")]
    peers: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::info!(peers = args.peers, "contact token self-test starting");

    let kx = X25519Blake2b::new();
    let env = SystemEnv::new();
    let mut publisher = HexPublisher::new(io::stdout());
    let mut out = io::stdout();
    let config = DemoConfig { extra_peers: args.peers };

    let report = run_demo(&kx, &env, &mut publisher, &mut out, &config).inspect_err(|err| {
        tracing::error!(%err, "self-test failed");
    })?;

    tracing::info!(contacts = report.contacts_verified, "self-test passed");

    Ok(())
}
