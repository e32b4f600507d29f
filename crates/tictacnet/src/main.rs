//! Process bootstrap: logging, then the accept loop.
//!
//! The only configuration is the listen address, taken from the first
//! CLI argument if present. Banner and word-list assets are embedded;
//! `RUST_LOG` controls verbosity.

use tictacnet::Server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut builder = Server::builder();
    if let Some(addr) = std::env::args().nth(1) {
        builder = builder.bind(&addr);
    }

    let server = builder.build().await?;
    tracing::info!(addr = %server.local_addr()?, "tictacnet listening");
    server.run().await?;
    Ok(())
}
