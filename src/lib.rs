pub mod catalog;
pub mod config;
pub mod error;
pub mod estimator;
pub mod format;
pub mod handlers;
pub mod image_utils;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod render;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides `default_level`. `json` switches to one JSON object per line.
/// Can only be called once per process.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
