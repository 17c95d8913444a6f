//! `pricepulse-tui` — terminal front-end for PricePulse.
//!
//! Built on [ratatui](https://ratatui.rs). Catalog screens (login, register,
//! product list, product detail) render [`HomeSnapshot`](pricepulse_core::HomeSnapshot)s
//! from a `HomeStore`; the search overlay (`/`) renders the `SearchStore`.
//!
//! Logs are written to a file (default `/tmp/pricepulse-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge forwards every
//! snapshot into the app's action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use pricepulse_config::Config;
use pricepulse_core::{
    ClientConfig, HomeStore, LiveCatalog, SearchProvider, SearchSnapshot, SearchStore,
};

use crate::app::App;

/// Track product prices across Amazon, Flipkart and Myntra.
#[derive(Parser, Debug)]
#[command(name = "pricepulse-tui", version, about)]
struct Cli {
    /// PricePulse API base URL (e.g., http://127.0.0.1:8000/)
    #[arg(short = 'u', long)]
    base_url: Option<Url>,

    /// Search API key; omit for demo search results
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Log file path (defaults to /tmp/pricepulse-tui.log)
    #[arg(long, default_value = "/tmp/pricepulse-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the terminal UI. Hold the guard
/// for the lifetime of the app so buffered lines get flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pricepulse_tui={log_level},pricepulse_core={log_level},pricepulse_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("pricepulse-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file + env, then CLI flags on top.
fn resolve_config(cli: &Cli) -> Result<(Config, ClientConfig)> {
    // A read-only config dir is not fatal; defaults still apply.
    match pricepulse_config::ensure_config() {
        Ok(Some(path)) => info!(path = %path.display(), "wrote default config"),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "could not write default config"),
    }

    let mut cfg = pricepulse_config::load_config()?;
    if let Some(url) = &cli.base_url {
        cfg.api.base_url = url.to_string();
    }
    if let Some(key) = &cli.api_key {
        cfg.api.api_key = Some(key.clone());
        cfg.api.api_key_env = None;
    }
    let client = cfg.to_client_config()?;
    Ok((cfg, client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let (cfg, client) = resolve_config(&cli)?;
    info!(
        base_url = %client.base_url,
        demo = client.data_mode.is_demo(),
        "starting pricepulse-tui"
    );

    let home = HomeStore::new(LiveCatalog::new(&client)?);
    let search = SearchStore::with_snapshot(
        SearchProvider::from_config(&client)?,
        SearchSnapshot {
            category: cfg.search.default_category,
            ..SearchSnapshot::default()
        },
    );

    let mut app = App::new(home, search);
    app.run().await?;

    Ok(())
}
