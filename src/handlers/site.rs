use axum::{response::IntoResponse, Json};

use crate::catalog::Catalog;

/// Landing page content: services, featured projects, testimonials
pub async fn site_content() -> impl IntoResponse {
    Json(Catalog::site())
}
