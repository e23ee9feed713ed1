use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use farcaster_analytics::analytics_client::AnalyticsClient;
use farcaster_analytics::config::{Args, Config};
use farcaster_analytics::host::{CommandHost, HostBridge, ReadySignal};
use farcaster_analytics::store::Store;
use farcaster_analytics::ui;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

// NB: stdout belongs to the alternate screen, so logs go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let config = Config::from_args(args)?;

    init_logging(&config.log_file)?;
    info!(fid = %config.fid, api_base_url = %config.api_base_url, "starting");

    let client = AnalyticsClient::new(config.api_base_url.as_str())?;
    let store = Arc::new(Store::new(
        Arc::new(client),
        config.fid.clone(),
        config.top_posts_limit,
    ));

    let host = config
        .ready_command
        .as_deref()
        .map(|command| Box::new(CommandHost::new(command)) as Box<dyn HostBridge>);

    let mut ui = ui::UI::new(store, ReadySignal::new(host))?;
    ui.initialize(config.fid.clone())?;
    let result = ui.event_loop().await;

    ui::reset()?;
    result
}
