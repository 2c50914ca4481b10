use crate::{
    error::AppError,
    models::gemini::{GenerateContentRequest, GenerateContentResponse},
};
use reqwest::Client;
use std::time::Duration;

/// Connection settings for one Gemini call
#[derive(Debug, Clone)]
pub struct GeminiEndpoint {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

/// Call Gemini Generate Content API
/// Note: Model name is part of the URL path
pub async fn generate_content(
    client: &Client,
    endpoint: &GeminiEndpoint,
    model: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    // Gemini API format: /v1beta/models/{model}:generateContent
    let url = format!(
        "{}/models/{}:generateContent",
        endpoint.base_url.trim_end_matches('/'),
        model
    );

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(endpoint.timeout_seconds))
        .query(&[("key", &endpoint.api_key)])
        .json(request)
        .send()
        .await?;

    // Check for HTTP errors
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError {
            status,
            message: error_text,
        });
    }

    Ok(response.json::<GenerateContentResponse>().await?)
}
