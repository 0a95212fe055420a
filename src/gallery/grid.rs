use std::time::Duration;

/// Number of cards rendered before any scrolling.
pub const INITIAL_VISIBLE: usize = 6;
/// Cards added per reveal.
pub const REVEAL_BATCH: usize = 3;
/// Artificial loading delay before a batch appears.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    pub initial: usize,
    pub batch: usize,
    pub delay: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            initial: INITIAL_VISIBLE,
            batch: REVEAL_BATCH,
            delay: REVEAL_DELAY,
        }
    }
}

/// Proof that a reveal was started; handed back to [`RevealGrid::finish`].
#[derive(Debug)]
#[must_use = "a started reveal must be finished or the grid stays loading"]
pub struct RevealTicket(());

/// Incremental reveal over a catalog of `total` items.
///
/// Renders a prefix, and grows it by one batch each time the end-of-list
/// sentinel becomes visible. At most one reveal runs at a time.
#[derive(Debug, Clone)]
pub struct RevealGrid {
    total: usize,
    visible: usize,
    loading: bool,
    config: RevealConfig,
}

impl RevealGrid {
    pub fn new(total: usize) -> Self {
        Self::with_config(total, RevealConfig::default())
    }

    pub fn with_config(total: usize, config: RevealConfig) -> Self {
        Self {
            total,
            visible: config.initial.min(total),
            loading: false,
            config,
        }
    }

    /// Start with `shown` items already visible (clamped to the catalog).
    pub fn resume(total: usize, shown: usize, config: RevealConfig) -> Self {
        let mut grid = Self::with_config(total, config);
        grid.visible = shown.max(grid.visible).min(total);
        grid
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Whether the sentinel (and its observer) should exist.
    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    /// Count the next batch would reveal.
    pub fn next_batch_len(&self) -> usize {
        self.config.batch.min(self.total - self.visible)
    }

    /// Sentinel came into view. Returns a ticket if a reveal should start.
    pub fn on_sentinel_visible(&mut self) -> Option<RevealTicket> {
        if self.loading || !self.has_more() {
            return None;
        }
        self.loading = true;
        Some(RevealTicket(()))
    }

    /// Complete a reveal started by [`Self::on_sentinel_visible`]. Returns the
    /// new visible count.
    pub fn finish(&mut self, _ticket: RevealTicket) -> usize {
        self.visible = (self.visible + self.config.batch).min(self.total);
        self.loading = false;
        if !self.has_more() {
            tracing::debug!("all {} items revealed; sentinel retired", self.total);
        }
        self.visible
    }

    /// Run one full reveal cycle: trigger, wait out the delay, reveal.
    /// Returns false if the trigger was ignored.
    pub async fn reveal(&mut self) -> bool {
        let Some(ticket) = self.on_sentinel_visible() else {
            return false;
        };
        tokio::time::sleep(self.config.delay).await;
        self.finish(ticket);
        true
    }
}
