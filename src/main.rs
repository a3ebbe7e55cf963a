//! Pokedex - A command-line Pokedex backed by PokeAPI
//!
//! Browses location areas, explores encounters and catches Pokemon.

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, CommandRegistry, Config, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the PokeAPI client, its caches and their reapers
/// 4. Build the command registry
/// 5. Run the input loop on stdin/stdout
/// 6. Stop the cache reapers
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to warnings only so logs do not interleave with the REPL;
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: base_url={}, cache_ttl={}s, page_size={}",
        config.base_url, config.cache_ttl, config.page_size
    );

    let mut session = Session::from_config(&config).context("failed to start the Pokedex")?;
    let registry = CommandRegistry::new();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let outcome = repl::run(&registry, &mut session, stdin, &mut stdout).await;

    session.client.close().await;
    info!("Pokedex closed");

    outcome.context("error reading input")
}
