// * Dataset Loader
// * NDJSON text -> ordered list of normalized records.
// * Partial success is the policy: a bad line is logged and skipped, never fatal.

use crate::ingest::errors::LoadError;
use crate::ingest::record::InnovationRecord;
use crate::ingest::source::DatasetSource;
use crate::ops::telemetry;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of one successful load
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Normalized records, in source order
    pub records: Arc<[InnovationRecord]>,
    /// The verbatim source text, forwarded to the chat assistant as context
    pub raw_text: Arc<str>,
    pub report: LoadReport,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-load parsing statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Non-blank lines considered
    pub lines_seen: usize,
    pub records_parsed: usize,
    /// 1-based line numbers that failed to parse
    pub skipped_lines: Vec<usize>,
    pub duration: Duration,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped_lines.len()
    }
}

/// Parses NDJSON text. Total: bad lines are skipped.
pub fn parse_ndjson(text: &str) -> (Vec<InnovationRecord>, LoadReport) {
    let start = Instant::now();
    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report.lines_seen += 1;

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(raw)) => {
                records.push(InnovationRecord::from_raw(&raw));
            }
            Ok(other) => {
                warn!(line = idx + 1, kind = json_kind(&other), "Skipping non-object NDJSON line");
                report.skipped_lines.push(idx + 1);
            }
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Failed to parse NDJSON line");
                report.skipped_lines.push(idx + 1);
            }
        }
    }

    report.records_parsed = records.len();
    report.duration = start.elapsed();
    (records, report)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loads datasets from a [`DatasetSource`]
pub struct DatasetLoader<S> {
    source: S,
}

impl<S: DatasetSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches and parses the dataset.
    ///
    /// Fails only when the source itself cannot be read; the caller must
    /// surface that as an error state, not as an empty dataset.
    pub async fn load(&self) -> Result<Dataset, LoadError> {
        let start = Instant::now();
        let origin = self.source.describe();

        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                warn!(source = %origin, error = %e, "Dataset fetch failed");
                telemetry::record_load_failure();
                return Err(e);
            }
        };

        let (records, mut report) = parse_ndjson(&text);
        report.duration = start.elapsed();

        telemetry::record_load_success(&report);
        info!(
            source = %origin,
            records = report.records_parsed,
            skipped = report.skipped_count(),
            duration_ms = report.duration.as_millis() as u64,
            "Dataset loaded"
        );

        Ok(Dataset {
            records: records.into(),
            raw_text: text.into(),
            report,
        })
    }
}
