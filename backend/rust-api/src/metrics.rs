use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref PROGRESS_RECORDED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "progress_recorded_total",
        "Total number of graded attempts stored",
        &["correct"]
    )
    .unwrap();

    pub static ref BOOKMARK_TOGGLES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "bookmark_toggles_total",
        "Total number of bookmark toggles",
        &["state"]
    )
    .unwrap();

    pub static ref QUESTIONS_SERVED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "questions_served_total",
        "Total number of questions returned by listing endpoints",
        &["mode"]
    )
    .unwrap();

    pub static ref CATALOG_QUESTIONS: IntGauge = register_int_gauge!(
        "catalog_questions",
        "Number of questions in the loaded catalog"
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}
