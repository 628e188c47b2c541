// * Innovation Explorer
// * Ingestion, faceting, filtering, aggregation and export engine for the
// * agricultural-innovation dashboard, plus its AI assistant collaborators.

pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod export;
pub mod ingest;
pub mod ops;

// * Re-exports for convenient access
pub use dashboard::{Dashboard, DashboardStats, DashboardView, EngineConfig, LoadState};
pub use engine::{Aggregates, Aggregator, FacetIndex, FilterMap};
pub use export::{ExportError, ExportFile, ExportFormat};
pub use ingest::{Dataset, DatasetLoader, InnovationRecord, LoadError, RecordField};
