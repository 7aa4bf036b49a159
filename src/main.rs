use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

use keydeck::app::{App, AppEvent};
use keydeck::config::Config;
use keydeck::signal::signal_channel;
use keydeck::ui;

#[derive(Parser, Debug)]
#[command(
    name = "keydeck",
    about = "Keyboard-driven curation shell with a command palette"
)]
struct Args {
    /// Config file (defaults to ~/.config/keydeck/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs here; filtered by RUST_LOG
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Route tracing output to a file. The terminal UI owns stdout, so without a
/// log file nothing is recorded.
fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = match args.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => {
            tracing::warn!("HOME not set, using default configuration");
            Config::default()
        }
    };

    let (signals, signal_rx) = signal_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut app = App::new(&config, signals, event_tx);
    tracing::info!(
        shortcuts = app.registry.len(),
        key_style = app.key_style.label(),
        "Starting keydeck"
    );

    ui::run(&mut app, signal_rx, event_rx).await?;

    Ok(())
}
