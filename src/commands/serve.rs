use anyhow::Result;
use colored::Colorize;
use homepro::{config::Config, server};
use std::path::PathBuf;
use tracing::info;

/// Execute the serve command with an already loaded configuration
pub async fn execute(cfg: Config, config_path: PathBuf) -> Result<()> {
    println!(
        "{} {}:{}",
        "Starting homepro on".green(),
        cfg.server.host,
        cfg.server.port
    );
    info!(config = %config_path.display(), "Starting homepro server");

    // Blocks until shutdown
    server::start_server(cfg, config_path).await
}
