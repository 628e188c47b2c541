// * Telemetry - JSON Logging and Prometheus Metrics
// * Structured logging setup and engine counters for load, export and summary activity

use crate::ingest::loader::LoadReport;
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Encoder,
    Histogram, IntCounter, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    // * Dataset loads by outcome (success / failure)
    pub static ref DATASETS_LOADED_TOTAL: CounterVec = register_counter_vec!(
        "innovation_datasets_loaded_total",
        "Dataset loads by outcome",
        &["outcome"]
    ).unwrap();

    // * Records produced by the normalizer
    pub static ref RECORDS_PARSED_TOTAL: IntCounter = register_int_counter!(
        "innovation_records_parsed_total",
        "Records successfully parsed and normalized"
    ).unwrap();

    // * NDJSON lines dropped as unparsable
    pub static ref LINES_SKIPPED_TOTAL: IntCounter = register_int_counter!(
        "innovation_lines_skipped_total",
        "NDJSON lines skipped because they failed to parse"
    ).unwrap();

    // * Fetch + parse duration
    pub static ref LOAD_DURATION_SECONDS: Histogram = register_histogram!(
        "innovation_load_duration_seconds",
        "Dataset load duration in seconds",
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();

    // * Exports by file format
    pub static ref EXPORTS_TOTAL: CounterVec = register_counter_vec!(
        "innovation_exports_total",
        "Generated export files by format",
        &["format"]
    ).unwrap();

    // * AI summaries by outcome (applied / superseded / no_matches)
    pub static ref SUMMARIES_TOTAL: CounterVec = register_counter_vec!(
        "innovation_summaries_total",
        "AI summary requests by outcome",
        &["outcome"]
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use innovation_explorer::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(records = 120, "Dataset loaded");
/// ```
pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Initializes tracing with custom log level
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty())
        .init();
}

/// Returns the current metrics in the Prometheus text format
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Records a completed load and its parse statistics
pub fn record_load_success(report: &LoadReport) {
    DATASETS_LOADED_TOTAL.with_label_values(&["success"]).inc();
    RECORDS_PARSED_TOTAL.inc_by(report.records_parsed as u64);
    LINES_SKIPPED_TOTAL.inc_by(report.skipped_count() as u64);
    LOAD_DURATION_SECONDS.observe(report.duration.as_secs_f64());
}

/// Records a load whose source could not be read
pub fn record_load_failure() {
    DATASETS_LOADED_TOTAL.with_label_values(&["failure"]).inc();
}

/// Records one generated export file
pub fn record_export(format: &str) {
    EXPORTS_TOTAL.with_label_values(&[format]).inc();
}

/// Records how a summary request ended
pub fn record_summary(outcome: &str) {
    SUMMARIES_TOTAL.with_label_values(&[outcome]).inc();
}
