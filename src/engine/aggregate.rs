// * Aggregator
// * Three independent category/count breakdowns of the filtered records, one per chart.
// * Pure functions: same input, same output, no state kept between calls.

use crate::config::constants::{
    OTHER_BUCKET_MIN_CATEGORIES, OTHER_BUCKET_RATIO, OTHER_CATEGORY, TOP_COUNTRY_LIMIT,
    UNKNOWN_CATEGORY,
};
use crate::engine::tokens::split_values;
use crate::ingest::record::InnovationRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

// * Smallest-to-largest ordering of the known scales
const SCALE_RANKS: [(&str, u32); 7] = [
    ("Plot", 1),
    ("Farm", 2),
    ("Community", 3),
    ("Landscape", 4),
    ("Multiscale", 5),
    ("National", 6),
    ("Unknown", 99),
];

// * Rank for any scale outside the lexicon
const UNRANKED_SCALE: u32 = 50;

/// One bar/slice of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// The three chart series for one filtered view
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregates {
    pub by_type: Vec<CategoryCount>,
    pub by_country: Vec<CategoryCount>,
    pub by_scale: Vec<CategoryCount>,
}

impl Aggregates {
    /// True for the zero-match view
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty() && self.by_country.is_empty() && self.by_scale.is_empty()
    }
}

/// Aggregation thresholds
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Share of records below which a type is folded into "Other"
    pub other_ratio: f64,
    /// Folding only happens with more distinct types than this
    pub other_min_categories: usize,
    /// Countries kept after sorting
    pub top_countries: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            other_ratio: OTHER_BUCKET_RATIO,
            other_min_categories: OTHER_BUCKET_MIN_CATEGORIES,
            top_countries: TOP_COUNTRY_LIMIT,
        }
    }
}

/// Computes chart breakdowns
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// All three breakdowns at once
    pub fn aggregate<R: Borrow<InnovationRecord>>(&self, records: &[R]) -> Aggregates {
        Aggregates {
            by_type: self.by_type(records),
            by_country: self.by_country(records),
            by_scale: self.by_scale(records),
        }
    }

    /// Counts per innovation type, small types folded into "Other", largest first
    pub fn by_type<R: Borrow<InnovationRecord>>(&self, records: &[R]) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            let record: &InnovationRecord = record.borrow();
            let category = match record.type_of_innovation.trim() {
                "" => UNKNOWN_CATEGORY,
                t => t,
            };
            *counts.entry(category).or_insert(0) += 1;
        }

        let threshold = (records.len() as f64 * self.config.other_ratio).max(1.0);
        let should_group = counts.len() > self.config.other_min_categories;

        let mut grouped: Vec<CategoryCount> = Vec::with_capacity(counts.len() + 1);
        let mut other = 0usize;
        for (category, count) in counts {
            if should_group && (count as f64) < threshold {
                other += count;
            } else {
                grouped.push(CategoryCount::new(category, count));
            }
        }

        if other > 0 {
            // ! A real "Other" type that survived grouping absorbs the bucket
            match grouped.iter_mut().find(|c| c.category == OTHER_CATEGORY) {
                Some(existing) => existing.count += other,
                None => grouped.push(CategoryCount::new(OTHER_CATEGORY, other)),
            }
        }

        sort_by_count_desc(&mut grouped);
        grouped
    }

    /// Counts per country (multi-country records count once per country), top N
    pub fn by_country<R: Borrow<InnovationRecord>>(&self, records: &[R]) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            let record: &InnovationRecord = record.borrow();
            let raw = match record.country.as_str() {
                "" => UNKNOWN_CATEGORY,
                c => c,
            };
            for country in split_values(raw) {
                *counts.entry(country).or_insert(0) += 1;
            }
        }

        let mut out: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(c, n)| CategoryCount::new(c, n))
            .collect();
        sort_by_count_desc(&mut out);
        out.truncate(self.config.top_countries);
        out
    }

    /// Counts per normalized scale, in semantic order (Plot .. National, others, Unknown)
    pub fn by_scale<R: Borrow<InnovationRecord>>(&self, records: &[R]) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            let record: &InnovationRecord = record.borrow();
            *counts.entry(normalize_scale(&record.scale)).or_insert(0) += 1;
        }

        let mut out: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(c, n)| CategoryCount::new(c, n))
            .collect();
        out.sort_by(|a, b| {
            scale_rank(&a.category)
                .cmp(&scale_rank(&b.category))
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.category.cmp(&b.category))
        });
        out
    }
}

/// Convenience function using the default thresholds
pub fn aggregate<R: Borrow<InnovationRecord>>(records: &[R]) -> Aggregates {
    Aggregator::new().aggregate(records)
}

/// Maps free-form scale text onto its display form
pub fn normalize_scale(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_CATEGORY.to_string();
    }

    let lower = trimmed.to_lowercase();
    if let Some((canonical, _)) = SCALE_RANKS
        .iter()
        .find(|(name, _)| name.to_lowercase() == lower)
    {
        return canonical.to_string();
    }

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => UNKNOWN_CATEGORY.to_string(),
    }
}

/// Sort key of a normalized scale
pub fn scale_rank(category: &str) -> u32 {
    SCALE_RANKS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED_SCALE)
}

// * Largest first; equal counts fall back to name so output is stable
fn sort_by_count_desc(items: &mut [CategoryCount]) {
    items.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });
}
