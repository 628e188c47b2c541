// * Operations: structured logging and Prometheus counters

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, init_tracing_with_level,
    record_export, record_load_failure, record_load_success, record_summary,
};
