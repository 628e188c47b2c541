// * Dashboard coordinator
// * Owns the load state, the loaded records and the current filter map.
// * Every derived value (options, rows, charts, stats, exports) is recomputed
// * from those three on demand; nothing derived is cached or mutated.
// * Each filter change or load also bumps the summary generation, so a summary
// * still waiting on an older view is discarded.

use crate::assistant::summary::{
    SummaryConfig, SummaryCoordinator, SummaryOutcome, NO_MATCHES_MESSAGE,
};
use crate::assistant::SummaryProvider;
use crate::engine::aggregate::{Aggregates, Aggregator, AggregatorConfig};
use crate::engine::facets::{extract_facets, FacetDefinition, FacetIndex, DEFAULT_FACETS};
use crate::engine::filter::{filter_records, FilterMap};
use crate::engine::tokens::split_values;
use crate::export::{self, ExportError, ExportFile, ExportFormat};
use crate::ingest::errors::LoadError;
use crate::ingest::loader::{Dataset, DatasetLoader, LoadReport};
use crate::ingest::record::{InnovationRecord, RecordField};
use crate::ingest::source::{DatasetSource, HttpSource, LoaderConfig};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown in place of the dashboard when the dataset cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Error loading dataset. Please try refreshing.";

/// Engine-wide configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub facets: Vec<FacetDefinition>,
    pub loader: LoaderConfig,
    pub aggregator: AggregatorConfig,
    pub summary: SummaryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            facets: DEFAULT_FACETS.to_vec(),
            loader: LoaderConfig::default(),
            aggregator: AggregatorConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn facets(mut self, facets: Vec<FacetDefinition>) -> Self {
        self.facets = facets;
        self
    }

    pub fn loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }

    pub fn aggregator(mut self, aggregator: AggregatorConfig) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }
}

/// Where the dataset is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Source could not be read; distinct from a loaded but empty dataset
    Error(String),
}

/// Headline numbers above the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub innovations: usize,
    pub countries: usize,
    pub centres: usize,
}

impl DashboardStats {
    /// Counts distinct split values, so `"Kenya; Tanzania"` adds two countries
    pub fn compute(records: &[&InnovationRecord]) -> Self {
        let mut countries = BTreeSet::new();
        let mut centres = BTreeSet::new();
        for record in records {
            countries.extend(split_values(&record.country));
            centres.extend(split_values(&record.centres_involved));
        }

        Self {
            innovations: records.len(),
            countries: countries.len(),
            centres: centres.len(),
        }
    }
}

/// Everything the UI renders for the current filter map
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub state: &'a LoadState,
    pub filters: &'a FilterMap,
    pub options: FacetIndex,
    pub records: Vec<&'a InnovationRecord>,
    pub aggregates: Aggregates,
    pub stats: DashboardStats,
}

impl DashboardView<'_> {
    /// Message replacing the table and charts, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self.state {
            LoadState::Error(_) => Some(LOAD_ERROR_MESSAGE),
            LoadState::Loaded if self.records.is_empty() => Some(NO_MATCHES_MESSAGE),
            _ => None,
        }
    }
}

/// Dashboard state holder
pub struct Dashboard {
    config: EngineConfig,
    state: LoadState,
    dataset: Option<Dataset>,
    filters: FilterMap,
    aggregator: Aggregator,
    summary: Option<SummaryCoordinator<dyn SummaryProvider>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let filters = FilterMap::for_facets(&config.facets);
        let aggregator = Aggregator::with_config(config.aggregator.clone());
        Self {
            config,
            state: LoadState::Idle,
            dataset: None,
            filters,
            aggregator,
            summary: None,
        }
    }

    /// Attaches the summary collaborator, debounced per `config.summary`
    pub fn with_summary_provider(mut self, provider: Arc<dyn SummaryProvider>) -> Self {
        self.summary = Some(SummaryCoordinator::with_config(
            provider,
            self.config.summary.clone(),
        ));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Loads a dataset, replacing the previous one and resetting filters.
    ///
    /// `&mut self` keeps loads from overlapping.
    pub async fn load<S: DatasetSource>(
        &mut self,
        loader: &DatasetLoader<S>,
    ) -> Result<&LoadReport, LoadError> {
        self.state = LoadState::Loading;
        self.invalidate_summary();

        match loader.load().await {
            Ok(dataset) => {
                info!(records = dataset.len(), "Dashboard dataset replaced");
                self.filters = FilterMap::for_facets(&self.config.facets);
                self.state = LoadState::Loaded;
                Ok(&self.dataset.insert(dataset).report)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Loads over HTTP from `base_url`, using the configured resource and timeout
    pub async fn load_from(&mut self, base_url: &str) -> Result<&LoadReport, LoadError> {
        let source = match HttpSource::from_config(base_url, &self.config.loader) {
            Ok(source) => source,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };
        let loader = DatasetLoader::new(source);
        self.load(&loader).await
    }

    fn fail(&mut self, error: &LoadError) {
        warn!(error = %error, "Dashboard load failed");
        self.invalidate_summary();
        self.dataset = None;
        self.state = LoadState::Error(error.to_string());
    }

    /// Full, unfiltered record list (empty unless loaded)
    pub fn records(&self) -> &[InnovationRecord] {
        self.dataset.as_ref().map(|d| &*d.records).unwrap_or(&[])
    }

    /// Raw NDJSON text, used as chat context (empty unless loaded)
    pub fn raw_text(&self) -> &str {
        self.dataset.as_ref().map(|d| &*d.raw_text).unwrap_or("")
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Changes one facet selection; the filter map is replaced, not edited
    pub fn set_filter(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = %field, value = %value, "Filter changed");
        self.filters = self.filters.with(field, value);
        self.invalidate_summary();
    }

    /// Puts every facet back on "All"
    pub fn reset_filters(&mut self) {
        debug!("Filters reset");
        self.filters = self.filters.cleared();
        self.invalidate_summary();
    }

    fn invalidate_summary(&self) {
        if let Some(summary) = &self.summary {
            summary.invalidate();
        }
    }

    /// Starts a summary of the current filtered view.
    ///
    /// The returned future is detached from the dashboard; a later filter
    /// change or load makes it resolve to [`SummaryOutcome::Superseded`].
    /// `None` when no summary provider is attached.
    pub fn request_summary(&self) -> Option<impl Future<Output = SummaryOutcome> + Send + 'static> {
        let summary = self.summary.as_ref()?;
        let records: Vec<InnovationRecord> = self.filtered().into_iter().cloned().collect();
        Some(summary.schedule(records))
    }

    /// Options of every facet, from the full list
    pub fn facet_options(&self) -> FacetIndex {
        extract_facets(self.records(), &self.config.facets)
    }

    /// Records matching the current filter map, in load order
    pub fn filtered(&self) -> Vec<&InnovationRecord> {
        filter_records(self.records(), &self.config.facets, &self.filters)
    }

    pub fn view(&self) -> DashboardView<'_> {
        let records = self.filtered();
        let aggregates = self.aggregator.aggregate(&records);
        let stats = DashboardStats::compute(&records);

        DashboardView {
            state: &self.state,
            filters: &self.filters,
            options: self.facet_options(),
            records,
            aggregates,
            stats,
        }
    }

    /// Exports the filtered view
    pub fn export(&self, format: ExportFormat, date: NaiveDate) -> Result<ExportFile, ExportError> {
        export::export(&self.filtered(), format, date)
    }
}
