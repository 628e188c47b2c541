// * Facet Extractor
// * Computes the dropdown options of every facet from the full, unfiltered record list.
// * Facets are independent: a selection in one never narrows another's options.

use crate::config::constants::ALL_SENTINEL;
use crate::engine::tokens::split_values;
use crate::ingest::record::{InnovationRecord, RecordField};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// One filter dimension shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetDefinition {
    pub label: &'static str,
    pub field: RecordField,
    /// Field may hold several `,`/`;` separated values
    pub multi_valued: bool,
}

impl FacetDefinition {
    pub const fn single(label: &'static str, field: RecordField) -> Self {
        Self { label, field, multi_valued: false }
    }

    pub const fn multi(label: &'static str, field: RecordField) -> Self {
        Self { label, field, multi_valued: true }
    }
}

/// Default facet table, in display order
pub const DEFAULT_FACETS: [FacetDefinition; 5] = [
    FacetDefinition::multi("Centre (s) involved", RecordField::CentresInvolved),
    FacetDefinition::single("Type of innovations/solutions", RecordField::TypeOfInnovation),
    FacetDefinition::single("Scale", RecordField::Scale),
    FacetDefinition::single("Climate Classification", RecordField::ClimateClassification),
    FacetDefinition::multi("Country", RecordField::Country),
];

/// Options of one facet: the sentinel first, then sorted distinct values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOptions {
    pub facet: FacetDefinition,
    pub options: Vec<String>,
}

impl FacetOptions {
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    /// Number of real values, excluding the sentinel
    pub fn value_count(&self) -> usize {
        self.options.len().saturating_sub(1)
    }
}

/// Option lists for a whole facet table
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FacetIndex {
    pub facets: Vec<FacetOptions>,
}

impl FacetIndex {
    pub fn get(&self, field: RecordField) -> Option<&FacetOptions> {
        self.facets.iter().find(|f| f.facet.field == field)
    }

    /// Options for a field, empty when the field is not a facet
    pub fn options(&self, field: RecordField) -> &[String] {
        self.get(field).map(|f| f.options.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacetOptions> {
        self.facets.iter()
    }
}

/// Computes option lists for every facet in `facets`.
///
/// Deterministic for a fixed record list: `"All"` first, then values in
/// lexicographic order.
pub fn extract_facets<R: Borrow<InnovationRecord>>(
    records: &[R],
    facets: &[FacetDefinition],
) -> FacetIndex {
    let mut sets: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); facets.len()];

    for record in records {
        let record: &InnovationRecord = record.borrow();
        for (facet, set) in facets.iter().zip(sets.iter_mut()) {
            let raw = record.get(facet.field);
            if facet.multi_valued {
                set.extend(split_values(raw));
            } else {
                let value = raw.trim();
                if !value.is_empty() {
                    set.insert(value);
                }
            }
        }
    }

    let facets = facets
        .iter()
        .zip(sets)
        .map(|(facet, set)| {
            let options = std::iter::once(ALL_SENTINEL)
                // ? A literal "All" value in the data collapses into the sentinel
                .chain(set.into_iter().filter(|v| *v != ALL_SENTINEL))
                .map(str::to_string)
                .collect();
            FacetOptions { facet: *facet, options }
        })
        .collect();

    FacetIndex { facets }
}
