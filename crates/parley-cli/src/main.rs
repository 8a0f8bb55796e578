use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use parley_application::ChatApp;
use parley_infrastructure::{ChannelNotifier, ConfigService, ReqwestApiClient};

mod commands;
mod completion;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Parley - terminal chat client", long_about = None)]
struct Cli {
    /// Backend base URL (the `/api` segment is added if missing)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&cli.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", format!("File logging disabled: {e:#}").yellow());
            None
        }
    };

    let service = cli
        .config
        .map(ConfigService::with_path)
        .unwrap_or_default();
    let mut config = service.load()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout_secs.filter(|secs| *secs > 0) {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let api = Arc::new(ReqwestApiClient::new(config)?);
    let (notifier, notifications) = ChannelNotifier::new();
    let app = ChatApp::new(api, Arc::new(notifier));

    let mut repl = repl::Repl::new(app, notifications)?;
    repl.run().await
}
