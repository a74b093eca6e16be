//! urc-mock-server binary: serve division fixtures over HTTP
//!
//! Run with:
//! ```bash
//! cargo run -p urc-mock-server -- --fixtures ./fixtures.json --port 3100
//! ```
//!
//! Each fixture is then served at `http://127.0.0.1:3100/divisions/<slug>`.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use urc_mock_server::{fixtures::FixtureSet, ServerBuilder};

#[derive(Parser, Debug)]
#[command(name = "urc-mock-server")]
#[command(about = "Serve division driver fixtures for the URC dashboard")]
struct Args {
    /// Fixture file: JSON object of slug -> fixture
    #[arg(long)]
    fixtures: PathBuf,

    /// Port to listen on (loopback only)
    #[arg(long, default_value = "3100")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("urc_mock_server=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let fixtures = FixtureSet::load(&args.fixtures)?;
    tracing::info!(divisions = fixtures.len(), path = %args.fixtures.display(), "Fixtures loaded");

    let server = ServerBuilder::new(fixtures).port(args.port).build();
    server.run().await?;

    Ok(())
}
