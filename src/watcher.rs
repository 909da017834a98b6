//! Subtree mutation watching with a debounced rescan.

use web_time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::host::Host;

/// Watches the body subtree and decides when a rescan is due.
///
/// Once started it never stops; mutations before [`start`](Self::start)
/// are ignored.
#[derive(Debug)]
pub struct MutationWatcher {
    started: bool,
    debounce: Debouncer,
    batches: usize,
}

impl MutationWatcher {
    /// Watcher whose rescan fires `window` after the last mutation.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            started: false,
            debounce: Debouncer::new(window),
            batches: 0,
        }
    }

    /// Begin observing. Returns `false` if already started.
    pub fn start<H: Host>(&mut self, host: &mut H) -> bool {
        if self.started {
            return false;
        }
        host.watch_subtree();
        self.started = true;
        log::debug!("Watching document body for inserted elements");
        true
    }

    /// Whether [`start`](Self::start) has run.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Record a mutation batch, returning when the rescan is now due.
    pub fn on_mutation(&mut self, now: Instant) -> Option<Instant> {
        if !self.started {
            return None;
        }
        self.batches += 1;
        Some(self.debounce.trigger(now))
    }

    /// Pending rescan deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Consume the pending rescan if it is due.
    pub fn take_due(&mut self, now: Instant) -> bool {
        self.debounce.fire_if_due(now)
    }

    /// Mutation batches seen since starting.
    #[must_use]
    pub const fn batches(&self) -> usize {
        self.batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryDocument;

    #[test]
    fn ignores_mutations_before_start() {
        let t0 = Instant::now();
        let mut watcher = MutationWatcher::new(Duration::from_millis(250));
        assert_eq!(watcher.on_mutation(t0), None);
        assert_eq!(watcher.deadline(), None);
        assert_eq!(watcher.batches(), 0);
    }

    #[test]
    fn starts_once() {
        let mut doc = MemoryDocument::new(800);
        let mut watcher = MutationWatcher::new(Duration::from_millis(250));
        assert!(watcher.start(&mut doc));
        assert!(!watcher.start(&mut doc));
        assert!(doc.is_watching_subtree());
        assert!(watcher.is_started());
    }

    #[test]
    fn burst_yields_single_due_rescan() {
        let t0 = Instant::now();
        let mut doc = MemoryDocument::new(800);
        let mut watcher = MutationWatcher::new(Duration::from_millis(250));
        let _ = watcher.start(&mut doc);

        let mut due = None;
        for i in 0..5 {
            due = watcher.on_mutation(t0 + Duration::from_millis(50 * i));
        }
        assert_eq!(due, Some(t0 + Duration::from_millis(450)));
        assert!(!watcher.take_due(t0 + Duration::from_millis(449)));
        assert!(watcher.take_due(t0 + Duration::from_millis(450)));
        assert!(!watcher.take_due(t0 + Duration::from_millis(900)));
        assert_eq!(watcher.batches(), 5);
    }
}
