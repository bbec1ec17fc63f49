//! The debounce coordinator.
//!
//! One long-lived worker turns query updates into committed filtered
//! views. Every update carries a generation from a monotonically
//! increasing counter shared with the controller; the worker recomputes
//! only after the quiescence window has passed since the *most recent*
//! update, and commits only while its generation is still the latest. A
//! burst of keystrokes therefore costs exactly one recomputation, and a
//! superseded recomputation can never overwrite a newer view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::ViewEntry;
use crate::candidate::Candidate;
use crate::matcher::Matcher;
use crate::ranker;
use crate::spinlock::SpinLock;

struct QueryUpdate {
    generation: u64,
    query: String,
}

/// A recomputed view, tagged with the generation that produced it.
pub struct CommittedView {
    /// Generation of the query this view reflects.
    pub generation: u64,
    /// The replacement filtered view.
    pub view: Vec<ViewEntry>,
}

/// Handle to the debounce worker.
///
/// Dropping the coordinator closes the update channel and the worker
/// exits; there is nothing else to release.
pub struct DebounceCoordinator {
    update_tx: UnboundedSender<QueryUpdate>,
    generation: Arc<AtomicU64>,
    mailbox: Arc<SpinLock<Option<CommittedView>>>,
}

impl DebounceCoordinator {
    /// Spawns the worker on the current runtime. Returns the coordinator
    /// and the channel on which commit notifications arrive.
    pub fn spawn(
        corpus: Arc<Vec<Arc<Candidate>>>,
        matcher: Matcher,
        limit: Option<usize>,
        window: Duration,
        generation: Arc<AtomicU64>,
    ) -> (Self, UnboundedReceiver<()>) {
        let (update_tx, mut update_rx) = unbounded_channel::<QueryUpdate>();
        let (notify_tx, notify_rx) = unbounded_channel::<()>();
        let mailbox: Arc<SpinLock<Option<CommittedView>>> = Arc::new(SpinLock::new(None));

        let worker_mailbox = mailbox.clone();
        let worker_generation = generation.clone();
        tokio::spawn(async move {
            while let Some(mut update) = update_rx.recv().await {
                // Quiescence: keep absorbing newer updates until the window
                // passes with none arriving.
                loop {
                    select! {
                        more = update_rx.recv() => match more {
                            Some(newer) => update = newer,
                            None => return,
                        },
                        _ = tokio::time::sleep(window) => break,
                    }
                }
                if update.generation != worker_generation.load(Ordering::SeqCst) {
                    trace!("skipping superseded query {:?} (gen {})", update.query, update.generation);
                    continue;
                }
                let view = compute_view(&matcher, &update.query, &corpus, limit);
                // Re-check: the query may have been cleared or replaced
                // while the view was being computed.
                if update.generation == worker_generation.load(Ordering::SeqCst) {
                    debug!(
                        "committing view for {:?} (gen {}, {} entries)",
                        update.query,
                        update.generation,
                        view.len()
                    );
                    *worker_mailbox.lock() = Some(CommittedView {
                        generation: update.generation,
                        view,
                    });
                    let _ = notify_tx.send(());
                } else {
                    trace!("discarding stale result for {:?} (gen {})", update.query, update.generation);
                }
            }
        });

        (
            Self {
                update_tx,
                generation,
                mailbox,
            },
            notify_rx,
        )
    }

    /// Sends a query update to the worker under a fresh generation.
    pub fn update(&self, query: &str) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("query update {query:?} -> gen {generation}");
        let _ = self.update_tx.send(QueryUpdate {
            generation,
            query: query.to_string(),
        });
        generation
    }

    /// Takes the most recent committed view out of the mailbox.
    pub fn take(&self) -> Option<CommittedView> {
        self.mailbox.lock().take()
    }

    /// The latest generation handed out.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Runs the ranker and shapes hits into view entries.
fn compute_view(matcher: &Matcher, query: &str, corpus: &[Arc<Candidate>], limit: Option<usize>) -> Vec<ViewEntry> {
    let hits = match limit {
        Some(n) => ranker::search_with_limit(matcher, query, corpus, n),
        None => ranker::search(matcher, query, corpus),
    };
    hits.into_iter()
        .map(|hit| ViewEntry {
            index: hit.index,
            score: hit.matched.score,
            positions: hit.matched.positions,
            highlights: hit.matched.highlights,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Arc<Vec<Arc<Candidate>>> {
        Arc::new(texts.iter().map(|t| Arc::new(Candidate::new(*t))).collect())
    }

    fn spawn_with_window(window_ms: u64) -> (DebounceCoordinator, UnboundedReceiver<()>, Arc<Vec<Arc<Candidate>>>) {
        let corpus = corpus(&["edit file", "open browser", "view log files", "edit configuration"]);
        let generation = Arc::new(AtomicU64::new(0));
        let (coordinator, notify) = DebounceCoordinator::spawn(
            corpus.clone(),
            Matcher::default(),
            None,
            Duration::from_millis(window_ms),
            generation,
        );
        (coordinator, notify, corpus)
    }

    #[tokio::test]
    async fn burst_of_updates_commits_once_with_the_final_query() {
        let (coordinator, mut notify, corpus) = spawn_with_window(40);
        for query in ["e", "ed", "edi", "edit"] {
            coordinator.update(query);
        }
        notify.recv().await.expect("one commit");
        let committed = coordinator.take().expect("mailbox holds the view");
        assert_eq!(committed.generation, 4);

        let texts: Vec<&str> = committed.view.iter().map(|e| corpus[e.index].text.as_str()).collect();
        assert_eq!(texts, vec!["edit file", "edit configuration"]);

        // No further commits arrive for the earlier queries.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(notify.try_recv().is_err());
        assert!(coordinator.take().is_none());
    }

    #[tokio::test]
    async fn invalidated_generation_is_never_committed() {
        let (coordinator, mut notify, _corpus) = spawn_with_window(30);
        coordinator.update("edit");
        // The controller's fast path bumps the generation while the worker
        // is still inside its quiescence window.
        coordinator.generation.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(notify.try_recv().is_err(), "stale result must be discarded");
        assert!(coordinator.take().is_none());
    }

    #[tokio::test]
    async fn later_update_supersedes_earlier_one() {
        let (coordinator, mut notify, corpus) = spawn_with_window(30);
        coordinator.update("edit");
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.update("view");
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Two commits, and the second reflects the newer query.
        notify.recv().await.unwrap();
        notify.recv().await.unwrap();
        let committed = coordinator.take().unwrap();
        assert_eq!(committed.generation, coordinator.latest_generation());
        let texts: Vec<&str> = committed.view.iter().map(|e| corpus[e.index].text.as_str()).collect();
        assert_eq!(texts, vec!["view log files"]);
    }

    #[tokio::test]
    async fn limit_caps_the_view() {
        let corpus = corpus(&["edit a", "edit b", "edit c"]);
        let generation = Arc::new(AtomicU64::new(0));
        let (coordinator, mut notify) = DebounceCoordinator::spawn(
            corpus,
            Matcher::default(),
            Some(2),
            Duration::from_millis(10),
            generation,
        );
        coordinator.update("edit");
        notify.recv().await.unwrap();
        assert_eq!(coordinator.take().unwrap().view.len(), 2);
    }

    #[test]
    fn compute_view_keeps_match_data() {
        let corpus = corpus(&["edit file"]);
        let view = compute_view(&Matcher::default(), "edit", &corpus, None);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].index, 0);
        assert!(view[0].score >= 0.8);
        assert_eq!(view[0].positions, vec![0, 1, 2, 3]);
        assert_eq!(view[0].highlights, vec![0..4]);
    }
}
