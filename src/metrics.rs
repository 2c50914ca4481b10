use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    // Install the exporter
    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "homepro_estimates_total",
        "Total number of cost estimates computed"
    );
    describe_histogram!(
        "homepro_estimate_total_price_vnd",
        "Estimated total price in VND"
    );
    describe_counter!(
        "homepro_renders_total",
        "Total number of render requests by outcome"
    );
    describe_counter!(
        "homepro_render_images_total",
        "Total number of images produced by renders"
    );
    describe_histogram!(
        "homepro_render_duration_seconds",
        "Render duration in seconds"
    );
    describe_gauge!("homepro_info", "Service version information");

    gauge!("homepro_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a computed estimate
pub fn record_estimate(package: &str, tier: &str, total_price: f64) {
    counter!(
        "homepro_estimates_total",
        "package" => package.to_string(),
        "tier" => tier.to_string(),
    )
    .increment(1);

    if total_price.is_finite() {
        histogram!("homepro_estimate_total_price_vnd").record(total_price);
    }
}

/// Record a render outcome: "success", "error" or "unauthorized"
pub fn record_render(model: &str, outcome: &str) {
    counter!(
        "homepro_renders_total",
        "model" => model.to_string(),
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}

/// Record images returned by a render
pub fn record_render_images(model: &str, count: u64) {
    counter!("homepro_render_images_total", "model" => model.to_string()).increment(count);
}

/// Record render duration
pub fn record_render_duration(model: &str, duration: Duration) {
    histogram!("homepro_render_duration_seconds", "model" => model.to_string())
        .record(duration.as_secs_f64());
}
