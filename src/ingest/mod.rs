// * Ingestion: fetch the NDJSON feed and normalize every record.
// * Produces the immutable record list every other component derives from.

pub mod errors;
pub mod loader;
pub mod record;
pub mod source;

// * Re-exports for convenient access
pub use errors::LoadError;
pub use loader::{parse_ndjson, Dataset, DatasetLoader, LoadReport};
pub use record::{value_text, InnovationRecord, RecordField};
pub use source::{DatasetSource, FetchResult, FileSource, HttpSource, LoaderConfig, StaticSource};
