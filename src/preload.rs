//! Best-effort network warming for hosted videos.
//!
//! A process-wide FIFO of hosted URLs drained by a single worker task: one
//! resource hint per URL, then a fixed pause before the next, so the network
//! is not flooded. No cancellation, priority, or retry.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::catalog::library::Catalog;
use crate::catalog::record::VideoRecord;

/// Pause between two hints.
pub const PRELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// Mechanism that turns a URL into a prefetch hint.
pub trait ResourceHinter: Send + Sync {
    fn hint(&self, url: &str);
}

/// Remembers every hinted URL so pages can emit `<link rel="preload">` tags.
#[derive(Debug, Default)]
pub struct HintRegistry {
    hinted: Mutex<Vec<String>>,
}

impl HintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hinted URLs in the order they were drained.
    pub fn hinted(&self) -> Vec<String> {
        self.hinted.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ResourceHinter for HintRegistry {
    fn hint(&self, url: &str) {
        let mut hinted = self.hinted.lock().unwrap_or_else(PoisonError::into_inner);
        if !hinted.iter().any(|u| u == url) {
            hinted.push(url.to_string());
        }
    }
}

/// Discards hints. For contexts with nothing to warm.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHinter;

impl ResourceHinter for NoopHinter {
    fn hint(&self, _url: &str) {}
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<String>,
    draining: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    hinter: Arc<dyn ResourceHinter>,
    interval: Duration,
}

/// Handle to the preload queue. Clones share the same queue and worker.
#[derive(Clone)]
pub struct PreloadQueue {
    shared: Arc<Shared>,
}

impl PreloadQueue {
    pub fn new(hinter: Arc<dyn ResourceHinter>) -> Self {
        Self::with_interval(hinter, PRELOAD_INTERVAL)
    }

    pub fn with_interval(hinter: Arc<dyn ResourceHinter>, interval: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState::default()),
                hinter,
                interval,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `url` for hinting. Returns false if it is already queued.
    ///
    /// Starts the worker if it is idle. Must be called inside a tokio runtime
    /// for the worker to start; otherwise the URL stays queued until the next
    /// enqueue from within one.
    pub fn enqueue(&self, url: &str) -> bool {
        let runtime = tokio::runtime::Handle::try_current().ok();
        let start_worker = {
            let mut state = self.lock();
            if state.pending.iter().any(|u| u == url) {
                return false;
            }
            state.pending.push_back(url.to_string());
            if state.draining || runtime.is_none() {
                false
            } else {
                state.draining = true;
                true
            }
        };

        match runtime {
            Some(handle) if start_worker => {
                handle.spawn(drain(Arc::clone(&self.shared)));
            }
            Some(_) => {}
            None => tracing::warn!("No async runtime; preload of {} deferred", url),
        }
        true
    }

    /// Queue the record's hosted URL. Locally served records are skipped.
    pub fn preload_record(&self, record: &VideoRecord) -> bool {
        match &record.hosted_url {
            Some(url) => self.enqueue(url),
            None => false,
        }
    }

    /// Queue every hosted URL in the catalog. Returns how many were newly queued.
    pub fn preload_all(&self, catalog: &Catalog) -> usize {
        catalog
            .records()
            .iter()
            .filter(|r| self.preload_record(r))
            .count()
    }

    /// URLs waiting to be hinted.
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_draining(&self) -> bool {
        self.lock().draining
    }
}

/// Worker loop: pop, hint, wait. Exits (and clears `draining`) once empty.
async fn drain(shared: Arc<Shared>) {
    loop {
        let next = {
            let mut state = shared.state.lock().unwrap_or_else(PoisonError::into_inner);
            match state.pending.pop_front() {
                Some(url) => url,
                None => {
                    state.draining = false;
                    return;
                }
            }
        };
        tracing::debug!("preload hint: {}", next);
        shared.hinter.hint(&next);
        tokio::time::sleep(shared.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> (Arc<HintRegistry>, PreloadQueue) {
        let registry = Arc::new(HintRegistry::new());
        let queue = PreloadQueue::new(registry.clone());
        (registry, queue)
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_is_idempotent() {
        let (_registry, queue) = queue();
        assert!(queue.enqueue("https://cdn.example.com/a.mp4"));
        assert!(!queue.enqueue("https://cdn.example.com/a.mp4"));
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drains_one_url_per_interval_and_restarts() {
        let (registry, queue) = queue();
        queue.enqueue("a");
        queue.enqueue("b");

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(registry.hinted(), vec!["a"]);
        assert_eq!(queue.len(), 1);

        tokio::time::sleep(PRELOAD_INTERVAL).await;
        assert_eq!(registry.hinted(), vec!["a", "b"]);

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert!(!queue.is_draining());
        assert!(queue.is_empty());

        queue.enqueue("c");
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(registry.hinted(), vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn noop_hinter_drains_to_empty() {
        let queue = PreloadQueue::new(Arc::new(NoopHinter));
        queue.enqueue("a");
        queue.enqueue("b");
        assert!(queue.is_draining());

        tokio::time::sleep(PRELOAD_INTERVAL * 3).await;
        assert!(queue.is_empty());
        assert!(!queue.is_draining());
    }

    #[tokio::test(start_paused = true)]
    async fn preload_all_skips_local_records() {
        let (_registry, queue) = queue();
        let catalog = Catalog::new(vec![
            VideoRecord::local("1", "Local", "", "local.mp4", "2025-01-01"),
            VideoRecord::local("2", "Hosted", "", "x.mp4", "2025-01-01")
                .with_hosted_url("https://cdn.example.com/x.mp4"),
        ])
        .unwrap();
        assert_eq!(queue.preload_all(&catalog), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn enqueue_without_runtime_defers_worker() {
        let (_registry, queue) = queue();
        assert!(queue.enqueue("a"));
        assert!(!queue.is_draining());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn registry_dedupes_hints() {
        let registry = HintRegistry::new();
        registry.hint("a");
        registry.hint("a");
        assert_eq!(registry.hinted(), vec!["a"]);
    }
}
