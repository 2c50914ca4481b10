use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    handlers::AppState,
    image_utils,
    render::{RenderConfig, Renderer},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Site photo as a base64 data URL
    pub original: String,
    /// Optional style reference as a base64 data URL
    #[serde(default)]
    pub reference: Option<String>,
    /// Partial `RenderConfig`; omitted keys take the server defaults
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub images: Vec<String>,
}

/// Handle POST /api/render
pub async fn handle_render(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let original = image_utils::parse_data_url(&request.original)?;
    let reference = request
        .reference
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(image_utils::parse_data_url)
        .transpose()?;

    let config = state.config.load();
    let render_config =
        resolve_render_config(&config.render.default_model, request.config.unwrap_or_default())?;

    let renderer = Renderer::new(state.http_client.clone(), &config);
    let images = renderer
        .render(&original, reference.as_ref(), &render_config)
        .await?;

    Ok(Json(RenderResponse { images }))
}

/// Overlay the client's fields on defaults seeded with the configured model
fn resolve_render_config(
    default_model: &str,
    overrides: Map<String, Value>,
) -> Result<RenderConfig, AppError> {
    let seed = RenderConfig {
        model: default_model.to_string(),
        ..RenderConfig::default()
    };
    let Value::Object(mut merged) = serde_json::to_value(seed)
        .map_err(|e| AppError::InvalidInput(format!("invalid render config: {}", e)))?
    else {
        return Err(AppError::InvalidInput("invalid render config".to_string()));
    };
    merged.extend(overrides);

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| AppError::InvalidInput(format!("invalid render config: {}", e)))
}
