use anyhow::Context;
use clap::Parser;
use routeplan_bridge::{
    sdk::config::BridgeConfig,
    sdk::routing::{provider::RemoteCarelandProvider, route::DirectionsService},
    sdk::server,
    sdk::util::log::init_logging,
};
use std::path::PathBuf;

/// Serves Careland route plans through a Mapbox Directions compatible endpoint
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flat key=value configuration file
    #[arg(short, long, default_value = "./config.txt")]
    config: PathBuf,

    /// [Optional] Log file to append to, overriding `log_file` from the config
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// [Optional] Port to listen on, overriding `port` from the config
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = BridgeConfig::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    init_logging(Some(config.log_file.as_path()));
    log::info!(
        "Starting bridge against {} (plan {})",
        config.base_url,
        config.plan
    );

    let provider = RemoteCarelandProvider::new(&config).context("Failed to build provider client")?;
    let service = DirectionsService::new(Box::new(provider));

    actix_web::rt::System::new()
        .block_on(server::run(service, &config.host, config.port, config.workers))
        .with_context(|| format!("Server on {}:{} failed", config.host, config.port))?;

    Ok(())
}
