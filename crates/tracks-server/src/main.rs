//! Tracks service entry point.
//!
//! Loads the JSON configuration file (creating or completing it from the
//! built-in defaults), then serves the cached track catalogue over HTTP.
//!
//! # Usage
//!
//! ```text
//! tracks-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>  Configuration file [default: config.json]
//!   --port   <PORT>  Override the HTTP port stored in the configuration
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable        | Default       | Description              |
//! |-----------------|---------------|--------------------------|
//! | `TRACKS_CONFIG` | `config.json` | Configuration file path  |
//! | `TRACKS_PORT`   | (from config) | HTTP port override       |
//! | `RUST_LOG`      | `info`        | Log filter               |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tracks_core::ConfigStore;
use tracks_server::application::TrackCache;
use tracks_server::domain::{settings, ServerSettings};
use tracks_server::infrastructure::{run_server, InMemoryTrackCache};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Read-only HTTP service for cached tracks.
#[derive(Debug, Parser)]
#[command(
    name = "tracks-server",
    about = "Serves cached tracks over HTTP, configured by a JSON file",
    version
)]
struct Cli {
    /// Path of the JSON configuration file.  Created on first start.
    #[arg(long, default_value = "config.json", env = "TRACKS_CONFIG")]
    config: PathBuf,

    /// HTTP port; overrides `http.port` from the configuration file.
    #[arg(long, env = "TRACKS_PORT")]
    port: Option<u16>,
}

/// Builds the config store, registers the server defaults and initializes it.
///
/// File problems are not fatal: the store falls back to defaults and keeps the
/// recovered errors as diagnostics.
fn load_configuration(path: PathBuf) -> anyhow::Result<ConfigStore> {
    let mut store = ConfigStore::new(path);
    settings::register_defaults(&mut store).context("invalid built-in defaults")?;
    store.initialize().context("configuration already initialized")?;

    if !store.diagnostics().is_empty() {
        warn!(
            count = store.diagnostics().len(),
            "configuration loaded with recovered errors; running with defaults where needed"
        );
    }
    Ok(store)
}

/// Resolves on Ctrl+C.
///
/// If the handler cannot be installed, logs the error and never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, initiating graceful shutdown"),
        Err(e) => {
            tracing::error!("failed to listen for Ctrl+C signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = load_configuration(cli.config)?;
    let server_settings = ServerSettings::from_store(&store, cli.port)
        .with_context(|| format!("invalid settings in {}", store.path().display()))?;

    info!(
        "tracks service starting: http={}, config={}",
        server_settings.bind_addr,
        store.path().display()
    );

    // Population is owned by whatever feeds the cache; it starts empty here.
    let cache: Arc<dyn TrackCache> = Arc::new(InMemoryTrackCache::new());

    run_server(server_settings, cache, shutdown_signal()).await?;

    info!("tracks service stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
