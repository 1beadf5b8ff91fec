//! `terraform-provider-netbox`
//!
//! Serves the provider over stdin/stdout, one JSON request and response per
//! line. Logs go to stderr and are filtered with `RUST_LOG`.

use anyhow::Context;
use netbox_provider::{NetboxProvider, Server};
use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let version = env!("CARGO_PKG_VERSION");
    info!("Starting Netbox provider {}", version);

    let mut server = Server::new(NetboxProvider::new(version));
    server
        .serve(BufReader::new(io::stdin()), io::stdout())
        .await
        .context("serving host requests")?;

    info!("Netbox provider stopped");
    Ok(())
}
