// * The pure faceting engine: options, filtering and chart aggregation.
// * Everything here is synchronous and total over normalized records.

pub mod aggregate;
pub mod facets;
pub mod filter;
pub mod tokens;

// * Re-exports for convenient access
pub use aggregate::{
    aggregate, normalize_scale, scale_rank, Aggregates, Aggregator, AggregatorConfig,
    CategoryCount,
};
pub use facets::{extract_facets, FacetDefinition, FacetIndex, FacetOptions, DEFAULT_FACETS};
pub use filter::{facet_matches, filter_records, record_matches, FilterMap};
pub use tokens::{contains_value, split_values};
