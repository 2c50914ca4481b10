use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use homepro::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Serve => {
            // Logging settings come from the config file, so load it first
            let cfg = config::load_config(&args.config)?;
            init_tracing(&cfg.server.log_level, cfg.server.log_format == "json");
            commands::serve::execute(cfg, args.config.clone()).await?;
        }
        cli::Commands::Estimate(estimate_args) => {
            init_tracing("warn", false);
            commands::estimate::execute(&estimate_args.to_spec(), estimate_args.json)?;
        }
        cli::Commands::Render(render_args) => {
            init_tracing("info", false);
            let cfg = config::load_config(&args.config)?;
            commands::render::execute(&cfg, &render_args).await?;
        }
        cli::Commands::Config { action } => {
            init_tracing("warn", false);
            match action {
                cli::ConfigCommands::Show => commands::config::show(&args.config)?,
                cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
            }
        }
        cli::Commands::Version => {
            println!("homepro v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
