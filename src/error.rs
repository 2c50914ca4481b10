use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::estimator::EstimateError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Malformed or out-of-range request input
    InvalidInput(String),
    /// Plot specification rejected by the estimator
    Estimate(EstimateError),
    /// Uploaded image could not be decoded or is not acceptable
    ImageError(String),
    /// Pro render model selected without an authorized key
    ProAuthorizationRequired(String),
    /// Upstream API error
    UpstreamError { status: StatusCode, message: String },
    /// HTTP request error
    HttpRequest(reqwest::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Estimate(err) => write!(f, "Invalid plot specification: {}", err),
            Self::ImageError(msg) => write!(f, "Image error: {}", msg),
            Self::ProAuthorizationRequired(msg) => {
                write!(f, "Pro model authorization required: {}", msg)
            }
            Self::UpstreamError { status, message } => {
                write!(f, "Upstream error ({}): {}", status, message)
            }
            Self::HttpRequest(err) => write!(f, "HTTP request error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Estimate(err) => Some(err),
            Self::HttpRequest(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Estimate(_) => StatusCode::BAD_REQUEST,
            Self::ImageError(_) => StatusCode::BAD_REQUEST,
            Self::ProAuthorizationRequired(_) => StatusCode::FORBIDDEN,
            // Upstream 4xx maps to 502
            Self::UpstreamError { status, .. } if status.is_server_error() => *status,
            Self::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            Self::HttpRequest(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

pub fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidInput(_) => "invalid_input",
        AppError::Estimate(_) => "invalid_plot_spec",
        AppError::ImageError(_) => "image_error",
        AppError::ProAuthorizationRequired(_) => "pro_authorization_required",
        AppError::UpstreamError { .. } => "upstream_error",
        AppError::HttpRequest(_) => "http_request_error",
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        Self::Estimate(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpRequest(err)
    }
}
