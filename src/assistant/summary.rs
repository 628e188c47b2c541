// * Debounced AI summary coordination
// * Every request bumps a shared generation counter. A request waits out the
// * debounce window, then asks the provider, and only applies its text if no
// * newer request has started in the meantime.

use crate::assistant::SummaryProvider;
use crate::config::constants::SUMMARY_DEBOUNCE_MS;
use crate::ingest::record::InnovationRecord;
use crate::ops::telemetry;
use std::borrow::Borrow;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Shown instead of a summary when the filtered view is empty
pub const NO_MATCHES_MESSAGE: &str = "No innovations match the selected criteria.";

/// Coordinator configuration
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub debounce: Duration,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(SUMMARY_DEBOUNCE_MS),
        }
    }
}

impl SummaryConfig {
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// How a single summary request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Latest request; its text should be displayed
    Applied(String),
    /// A newer request started; discard this one
    Superseded,
    /// Filtered view was empty; the provider was not called
    NoMatches,
}

impl SummaryOutcome {
    /// Text to display, if this outcome should replace what is shown
    pub fn display_text(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Applied(text) => Some(text),
            SummaryOutcome::NoMatches => Some(NO_MATCHES_MESSAGE),
            SummaryOutcome::Superseded => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SummaryOutcome::Applied(_) => "applied",
            SummaryOutcome::Superseded => "superseded",
            SummaryOutcome::NoMatches => "no_matches",
        }
    }
}

/// Debounces summary requests and discards stale results
pub struct SummaryCoordinator<P: ?Sized> {
    provider: Arc<P>,
    generation: Arc<AtomicU64>,
    config: SummaryConfig,
}

impl<P: ?Sized> Clone for SummaryCoordinator<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            generation: Arc::clone(&self.generation),
            config: self.config.clone(),
        }
    }
}

impl<P: SummaryProvider + ?Sized> SummaryCoordinator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_config(provider, SummaryConfig::default())
    }

    pub fn with_config(provider: Arc<P>, config: SummaryConfig) -> Self {
        Self {
            provider,
            generation: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Current generation; increases with every request or invalidation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Makes every in-flight request stale
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Requests a summary of the filtered view
    pub async fn request<R>(&self, records: &[R]) -> SummaryOutcome
    where
        R: Borrow<InnovationRecord>,
    {
        let generation = self.next_generation();
        let refs: Vec<&InnovationRecord> = records
            .iter()
            .map(<R as Borrow<InnovationRecord>>::borrow)
            .collect();
        self.resolve(generation, &refs).await
    }

    /// Like [`request`](Self::request) over owned records, but the generation is
    /// taken immediately, so any later change supersedes it even before the
    /// returned future is first polled.
    pub fn schedule(
        &self,
        records: Vec<InnovationRecord>,
    ) -> impl Future<Output = SummaryOutcome> + Send + 'static
    where
        P: 'static,
    {
        let generation = self.next_generation();
        let coordinator = self.clone();
        async move {
            let refs: Vec<&InnovationRecord> = records.iter().collect();
            coordinator.resolve(generation, &refs).await
        }
    }

    async fn resolve(&self, generation: u64, records: &[&InnovationRecord]) -> SummaryOutcome {
        let outcome = if records.is_empty() {
            SummaryOutcome::NoMatches
        } else {
            self.run(generation, records).await
        };

        debug!(generation, outcome = outcome.label(), "Summary request finished");
        telemetry::record_summary(outcome.label());
        outcome
    }

    async fn run(&self, generation: u64, records: &[&InnovationRecord]) -> SummaryOutcome {
        tokio::time::sleep(self.config.debounce).await;
        if !self.is_current(generation) {
            return SummaryOutcome::Superseded;
        }

        let text = self.provider.summarize(records).await;

        // * A newer request may have started while the provider was working
        if !self.is_current(generation) {
            return SummaryOutcome::Superseded;
        }
        SummaryOutcome::Applied(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ReplyFuture;
    use std::sync::atomic::AtomicUsize;

    /// Returns the record count and counts its calls
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl SummaryProvider for CountingProvider {
        fn summarize<'a>(&'a self, records: &'a [&'a InnovationRecord]) -> ReplyFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { format!("{} innovations", records.len()) })
        }
    }

    fn coordinator(provider: Arc<CountingProvider>) -> SummaryCoordinator<CountingProvider> {
        SummaryCoordinator::with_config(
            provider,
            SummaryConfig::default().debounce(Duration::from_millis(50)),
        )
    }

    #[test]
    fn test_default_debounce() {
        assert_eq!(SummaryConfig::default().debounce, Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_single_request_applied() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());
        let records = vec![InnovationRecord::default(), InnovationRecord::default()];

        let outcome = coordinator.request(&records).await;

        assert_eq!(outcome, SummaryOutcome::Applied("2 innovations".to_string()));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_view_skips_provider() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());
        let records: Vec<InnovationRecord> = Vec::new();

        let outcome = coordinator.request(&records).await;

        assert_eq!(outcome, SummaryOutcome::NoMatches);
        assert_eq!(outcome.display_text(), Some(NO_MATCHES_MESSAGE));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_newer_request_supersedes() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());
        let first = vec![InnovationRecord::default()];
        let second = vec![InnovationRecord::default(), InnovationRecord::default()];

        let (a, b) = tokio::join!(coordinator.request(&first), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            coordinator.request(&second).await
        });

        assert_eq!(a, SummaryOutcome::Superseded);
        assert_eq!(b, SummaryOutcome::Applied("2 innovations".to_string()));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_discards_in_flight() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());
        let records = vec![InnovationRecord::default()];

        let (outcome, _) = tokio::join!(coordinator.request(&records), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            coordinator.invalidate();
        });

        assert_eq!(outcome, SummaryOutcome::Superseded);
        assert!(outcome.display_text().is_none());
    }

    #[tokio::test]
    async fn test_scheduled_request_superseded_before_first_poll() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());

        let pending = coordinator.schedule(vec![InnovationRecord::default()]);
        coordinator.invalidate();

        assert_eq!(pending.await, SummaryOutcome::Superseded);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scheduled_request_applied() {
        let provider = Arc::new(CountingProvider::default());
        let coordinator = coordinator(provider.clone());

        let outcome = tokio::spawn(coordinator.schedule(vec![InnovationRecord::default()]))
            .await
            .unwrap();

        assert_eq!(outcome, SummaryOutcome::Applied("1 innovations".to_string()));
    }

    #[test]
    fn test_clones_share_generation() {
        let coordinator = coordinator(Arc::new(CountingProvider::default()));
        let other = coordinator.clone();

        other.invalidate();
        assert_eq!(coordinator.generation(), 1);
    }
}
