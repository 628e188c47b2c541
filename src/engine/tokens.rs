// * Multi-valued field tokenizer
// * One split rule shared by facet extraction, filtering, aggregation and stats.

use regex::Regex;
use std::sync::LazyLock;

// * Values are joined by either separator in the source feed
static PATTERN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]").expect("Invalid separator regex"));

/// Splits a multi-valued field into trimmed, non-empty components
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    PATTERN_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// True when `needle` is exactly one of the components of `raw`
pub fn contains_value(raw: &str, needle: &str) -> bool {
    split_values(raw).any(|token| token == needle)
}
