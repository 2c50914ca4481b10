use anyhow::Result;
use colored::Colorize;
use homepro::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!(path = %path.display(), "Loading configuration for display");

    let cfg = config::load_config(path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", toml::to_string_pretty(&sanitized)?);

    Ok(())
}

/// Execute the config validate command
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!(path = %path.display(), "Validating configuration file");

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!(
        "  {}: {} ({})",
        "Logging".cyan(),
        cfg.server.log_level,
        cfg.server.log_format
    );
    println!("  {}: {}", "Gemini".cyan(), cfg.gemini.base_url);
    println!(
        "  {}: {}",
        "Pro model".cyan(),
        if cfg.gemini.has_pro_key() {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
    println!(
        "  {}: {} (max {} images)",
        "Default model".cyan(),
        cfg.render.default_model,
        cfg.render.max_image_count
    );
    println!(
        "  {}: {}",
        "Metrics".cyan(),
        if cfg.metrics.enabled {
            cfg.metrics.endpoint.as_str().green()
        } else {
            "disabled".red()
        }
    );

    Ok(())
}

/// Mask API keys for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.gemini.api_key = mask_api_key(&sanitized.gemini.api_key);
    sanitized.gemini.pro_api_key = sanitized.gemini.pro_api_key.as_deref().map(mask_api_key);
    sanitized
}

/// Shows first 7 and last 4 characters
/// Example: "AIzaSyA1234567890abcd" -> "AIzaSyA...abcd"
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }

    let prefix: String = chars[..7].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
