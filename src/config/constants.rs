// * Configuration Constants
// * Central location for every default threshold, timeout and label used by the engine

// * Dataset resource fetched by the default loader
pub const DEFAULT_DATASET_URL: &str = "Descriptions_of_innovations.json";

// * HTTP fetch timeout in milliseconds
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

// * Option meaning "do not filter on this facet"
pub const ALL_SENTINEL: &str = "All";

// * Quiescence window before an AI summary request is dispatched
pub const SUMMARY_DEBOUNCE_MS: u64 = 800;

// * Share of the filtered records below which a type is folded into "Other"
pub const OTHER_BUCKET_RATIO: f64 = 0.05;

// * Grouping only applies when there are more distinct types than this
pub const OTHER_BUCKET_MIN_CATEGORIES: usize = 6;

// * Number of countries kept in the country breakdown
pub const TOP_COUNTRY_LIMIT: usize = 10;

// * Category labels synthesized by the aggregator
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const OTHER_CATEGORY: &str = "Other";

// * Display value for an empty climate classification
pub const CLIMATE_FALLBACK: &str = "N/A";

// * Spreadsheet layout
pub const SHEET_NAME: &str = "Innovations";
pub const COLUMN_WIDTHS: [f64; 7] = [30.0, 25.0, 30.0, 15.0, 20.0, 15.0, 50.0];

// * Generative Language API defaults
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_SUMMARY_MODEL: &str = "gemini-2.5-flash-lite";
pub const ASSISTANT_TIMEOUT_MS: u64 = 60_000;
