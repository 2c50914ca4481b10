use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    estimator::{self, AreaBreakdown, PlotSpec},
    format::{format_area, format_vnd},
    metrics,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub breakdown: AreaBreakdown,
    pub formatted: FormattedEstimate,
}

/// Display strings for the calculator panel
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedEstimate {
    pub plot_area: String,
    pub foundation_area: String,
    pub floors_area: String,
    pub basement_area: String,
    pub roof_area: String,
    pub total_area: String,
    pub unit_price: String,
    pub total_price: String,
}

impl From<&AreaBreakdown> for FormattedEstimate {
    fn from(b: &AreaBreakdown) -> Self {
        Self {
            plot_area: format_area(b.plot_area),
            foundation_area: format_area(b.foundation_area),
            floors_area: format_area(b.floors_area),
            basement_area: format_area(b.basement_area),
            roof_area: format_area(b.roof_area),
            total_area: format_area(b.total_converted_area),
            unit_price: format_vnd(b.unit_price),
            total_price: format_vnd(b.total_price),
        }
    }
}

/// Handle POST /api/estimate
pub async fn handle_estimate(
    payload: Result<Json<PlotSpec>, JsonRejection>,
) -> Result<Json<EstimateResponse>, AppError> {
    let Json(spec) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let breakdown = estimator::estimate_checked(&spec).map_err(|e| {
        tracing::debug!(error = %e, "Rejected plot specification");
        e
    })?;

    tracing::info!(
        width = spec.width,
        length = spec.length,
        floors = spec.floors,
        basement = spec.has_basement,
        package = %spec.contract_package,
        tier = %spec.quality_tier,
        total_area = breakdown.total_converted_area,
        total_price = breakdown.total_price,
        "Computed estimate"
    );

    metrics::record_estimate(
        spec.contract_package.as_str(),
        spec.quality_tier.as_str(),
        breakdown.total_price,
    );

    Ok(Json(EstimateResponse {
        formatted: FormattedEstimate::from(&breakdown),
        breakdown,
    }))
}
