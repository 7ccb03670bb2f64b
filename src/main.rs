use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use jobmatch::cli::{handle_command, Cli};
use jobmatch::core::ConfigManager;
use tracing::{error, info};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::load()?;
    cli.apply_overrides(&mut config);

    init_tracing(&config, &cli.log_filter(&config))?;
    info!(
        "Using '{}' configuration profile, analysis service at {}",
        config.profile, config.service.api_base_url
    );

    if let Err(e) = handle_command(cli, config).await {
        error!("{:#}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(config: &ConfigManager, default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match &config.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(Mutex::new(file))
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }

    Ok(())
}
