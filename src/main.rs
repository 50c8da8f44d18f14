use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use bubbletea_gallery::config::{self, Config, Overrides};
use bubbletea_gallery::App;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Search Pixabay images from the terminal.
#[derive(Debug, Parser)]
#[command(name = "bubbletea-gallery", version, about)]
struct Cli {
    /// Search for this right away.
    query: Option<String>,

    /// Results per page (3-200).
    #[arg(long)]
    per_page: Option<u32>,

    /// Number of page buttons to show.
    #[arg(long)]
    max_visible: Option<u32>,

    /// Pixabay API key (defaults to PIXABAY_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Search endpoint (defaults to PIXABAY_BASE_URL or the public API).
    #[arg(long)]
    base_url: Option<String>,

    /// Where to write logs.
    #[arg(long, default_value = "bubbletea-gallery.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();
    init_logging(&cli.log_file)?;
    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }

    let config = Config::from_env()?.with_overrides(Overrides {
        api_key: cli.api_key,
        base_url: cli.base_url,
        per_page: cli.per_page,
        max_visible: cli.max_visible,
        query: cli.query,
    });
    config.validate()?;
    info!(
        base_url = %config.base_url,
        per_page = config.per_page,
        max_visible = config.max_visible,
        "starting"
    );
    config::init(config)?;

    let program = bubbletea_rs::Program::<App>::builder()
        .alt_screen(true)
        .build()?;
    program.run().await?;
    info!("bye");
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &PathBuf) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bubbletea_gallery=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
