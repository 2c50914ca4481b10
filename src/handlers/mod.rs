//! HTTP handlers

pub mod estimate;
pub mod render;
pub mod site;
pub mod status;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::Config;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub http_client: reqwest::Client,
}
