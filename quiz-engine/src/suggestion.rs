use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::ClubIndex;
use quiz_types::ClubSuggestion;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::debug;

/// Handle to one scheduled lookup. Superseding it or tearing the service
/// down invalidates the handle so its callback can never fire afterwards.
struct ScheduledLookup {
    handle: JoinHandle<()>,
}

impl ScheduledLookup {
    fn cancel(self) {
        self.handle.abort();
    }
}

/// Debounces rapid keystrokes in front of `ClubIndex::lookup`. Last write
/// wins: a new query supersedes any scheduled or in-flight lookup, so stale
/// results are never emitted and at most one lookup is pending per input
/// stream. Lookup problems degrade to an empty suggestion list.
pub struct SuggestionService {
    index: Arc<ClubIndex>,
    debounce: Duration,
    limit: usize,
    generation: Arc<AtomicU64>,
    pending: Option<ScheduledLookup>,
    results_tx: mpsc::Sender<Vec<ClubSuggestion>>,
}

impl SuggestionService {
    pub fn new(
        index: Arc<ClubIndex>,
        debounce: Duration,
        limit: usize,
    ) -> (Self, mpsc::Receiver<Vec<ClubSuggestion>>) {
        let (results_tx, results_rx) = mpsc::channel(16);
        (
            Self {
                index,
                debounce,
                limit,
                generation: Arc::new(AtomicU64::new(0)),
                pending: None,
                results_tx,
            },
            results_rx,
        )
    }

    /// Schedule a lookup for `text` after the quiet period, superseding any
    /// earlier scheduled or in-flight lookup.
    pub fn on_query_changed(&mut self, text: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }

        let index = Arc::clone(&self.index);
        let live_generation = Arc::clone(&self.generation);
        let results_tx = self.results_tx.clone();
        let debounce = self.debounce;
        let limit = self.limit;
        let query = text.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if live_generation.load(Ordering::SeqCst) != generation {
                return; // superseded while waiting
            }
            let suggestions = index.lookup(&query, limit);
            if live_generation.load(Ordering::SeqCst) != generation {
                return; // superseded during the lookup
            }
            debug!(query = %query, hits = suggestions.len(), "suggestions ready");
            let _ = results_tx.send(suggestions).await;
        });

        self.pending = Some(ScheduledLookup { handle });
    }

    /// Cancel any scheduled or in-flight lookup without emitting anything.
    pub fn cancel_pending(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

impl Drop for SuggestionService {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_types::{Club, ClubKind};
    use tokio::time::sleep;
    use uuid::Uuid;

    fn club(name: &str) -> Club {
        Club {
            id: Uuid::new_v4(),
            name: name.to_string(),
            name_variations: Vec::new(),
            kind: ClubKind::Club,
            country: None,
            league: None,
        }
    }

    fn test_index() -> Arc<ClubIndex> {
        Arc::new(ClubIndex::new(vec![
            club("Real Madrid"),
            club("Real Sociedad"),
            club("Arsenal"),
        ]))
    }

    #[tokio::test]
    async fn test_rapid_edits_collapse_to_one_lookup() {
        let (mut service, mut results) =
            SuggestionService::new(test_index(), Duration::from_millis(20), 10);

        service.on_query_changed("re");
        sleep(Duration::from_millis(5)).await;
        service.on_query_changed("real");

        let suggestions = results.recv().await.unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.name.starts_with("Real")));

        // Only the final query produced an emission.
        sleep(Duration::from_millis(50)).await;
        assert!(results.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_pending_suppresses_emission() {
        let (mut service, mut results) =
            SuggestionService::new(test_index(), Duration::from_millis(10), 10);

        service.on_query_changed("real");
        service.cancel_pending();

        sleep(Duration::from_millis(40)).await;
        assert!(results.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_short_query_emits_empty_list() {
        let (mut service, mut results) =
            SuggestionService::new(test_index(), Duration::from_millis(5), 10);

        service.on_query_changed("r");
        let suggestions = results.recv().await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_unloaded_index_degrades_to_empty() {
        let (mut service, mut results) = SuggestionService::new(
            Arc::new(ClubIndex::empty()),
            Duration::from_millis(5),
            10,
        );

        service.on_query_changed("real");
        let suggestions = results.recv().await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_service_never_fires() {
        let (mut service, mut results) =
            SuggestionService::new(test_index(), Duration::from_millis(10), 10);

        service.on_query_changed("real");
        drop(service);

        sleep(Duration::from_millis(40)).await;
        assert!(results.recv().await.is_none());
    }
}
