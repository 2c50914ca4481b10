use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::{DEFAULT_MODEL, MAX_IMAGE_COUNT, PRO_MODEL};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Key for the pro image model; the pro model is locked without it
    #[serde(default)]
    pub pro_api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    /// A blank key counts as unset
    pub fn has_pro_key(&self) -> bool {
        self.pro_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderSettings {
    #[serde(default = "default_render_model")]
    pub default_model: String,
    /// Models clients may request
    #[serde(default = "default_allowed_models")]
    pub allowed_models: Vec<String>,
    #[serde(default = "default_max_image_count")]
    pub max_image_count: u8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_model: default_render_model(),
            allowed_models: default_allowed_models(),
            max_image_count: default_max_image_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_render_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_allowed_models() -> Vec<String> {
    vec![DEFAULT_MODEL.to_string(), PRO_MODEL.to_string()]
}

fn default_max_image_count() -> u8 {
    MAX_IMAGE_COUNT
}

/// Load configuration from `path` overlaid with `HOMEPRO__*` environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("HOMEPRO")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    if !matches!(cfg.server.log_format.as_str(), "text" | "json") {
        anyhow::bail!(
            "Invalid log format '{}': expected 'text' or 'json'",
            cfg.server.log_format
        );
    }

    if cfg.gemini.api_key.trim().is_empty() {
        anyhow::bail!("Gemini API key cannot be empty");
    }

    if !cfg.gemini.base_url.starts_with("http://") && !cfg.gemini.base_url.starts_with("https://") {
        anyhow::bail!("Gemini base_url must be an HTTP(S) URL");
    }

    if cfg.gemini.timeout_seconds == 0 {
        anyhow::bail!("Gemini timeout_seconds must be greater than zero");
    }

    if cfg.render.max_image_count == 0 || cfg.render.max_image_count > MAX_IMAGE_COUNT {
        anyhow::bail!(
            "render.max_image_count must be between 1 and {}",
            MAX_IMAGE_COUNT
        );
    }

    if !cfg.render.allowed_models.contains(&cfg.render.default_model) {
        anyhow::bail!(
            "Default render model '{}' is not in render.allowed_models",
            cfg.render.default_model
        );
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("Metrics endpoint must start with '/'");
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_body_bytes: default_max_body_bytes(),
        },
        gemini: GeminiConfig {
            api_key: "AIza-test-key-0000".to_string(),
            pro_api_key: None,
            base_url: default_gemini_base_url(),
            timeout_seconds: 30,
        },
        render: RenderSettings::default(),
        metrics: MetricsConfig::default(),
    }
}
