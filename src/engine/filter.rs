// * Filter Evaluator
// * Returns the records matching every facet selection, in load order.

use crate::config::constants::ALL_SENTINEL;
use crate::engine::facets::{FacetDefinition, DEFAULT_FACETS};
use crate::engine::tokens::contains_value;
use crate::ingest::record::{InnovationRecord, RecordField};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::debug;

/// Current facet selections.
///
/// Every facet defaults to `"All"`. Updates return a new map; the old one
/// is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterMap {
    selections: BTreeMap<RecordField, String>,
}

impl FilterMap {
    /// All facets of `facets` set to the sentinel
    pub fn for_facets(facets: &[FacetDefinition]) -> Self {
        let selections = facets
            .iter()
            .map(|f| (f.field, ALL_SENTINEL.to_string()))
            .collect();
        Self { selections }
    }

    /// Returns a copy with one facet changed. Unknown fields are ignored.
    pub fn with(&self, field: RecordField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match next.selections.get_mut(&field) {
            Some(slot) => *slot = value.into(),
            None => debug!(field = %field, "Ignoring selection for a field that is not a facet"),
        }
        next
    }

    /// Returns a copy with every facet back on the sentinel
    pub fn cleared(&self) -> Self {
        let selections = self
            .selections
            .keys()
            .map(|k| (*k, ALL_SENTINEL.to_string()))
            .collect();
        Self { selections }
    }

    pub fn selected(&self, field: RecordField) -> &str {
        self.selections
            .get(&field)
            .map(String::as_str)
            .unwrap_or(ALL_SENTINEL)
    }

    /// Selections other than the sentinel
    pub fn active(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.selections
            .iter()
            .filter(|(_, v)| v.as_str() != ALL_SENTINEL)
            .map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_unfiltered(&self) -> bool {
        self.active().next().is_none()
    }
}

impl Default for FilterMap {
    fn default() -> Self {
        Self::for_facets(&DEFAULT_FACETS)
    }
}

/// Whether one record satisfies one facet selection
pub fn facet_matches(record: &InnovationRecord, facet: &FacetDefinition, selected: &str) -> bool {
    if selected == ALL_SENTINEL {
        return true;
    }

    let value = record.get(facet.field);
    if facet.multi_valued {
        !value.is_empty() && contains_value(value, selected)
    } else {
        // * Options are built from trimmed values, so compare trimmed
        value.trim() == selected
    }
}

/// Whether one record satisfies every facet selection
pub fn record_matches(
    record: &InnovationRecord,
    facets: &[FacetDefinition],
    filters: &FilterMap,
) -> bool {
    facets
        .iter()
        .all(|facet| facet_matches(record, facet, filters.selected(facet.field)))
}

/// Filters `records`, preserving their order
pub fn filter_records<'a, R: Borrow<InnovationRecord>>(
    records: &'a [R],
    facets: &[FacetDefinition],
    filters: &FilterMap,
) -> Vec<&'a InnovationRecord> {
    records
        .iter()
        .filter_map(|r| {
            let record: &InnovationRecord = r.borrow();
            record_matches(record, facets, filters).then_some(record)
        })
        .collect()
}
