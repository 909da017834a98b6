//! One-shot viewport activation.

use crate::host::Host;

/// Running totals for a [`ViewportObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserverStats {
    /// Elements registered so far.
    pub registered: usize,
    /// Elements activated so far.
    pub activated: usize,
}

impl ObserverStats {
    /// Registered elements still waiting to become visible.
    #[must_use]
    pub const fn watching(self) -> usize {
        self.registered.saturating_sub(self.activated)
    }
}

/// The shared intersection session.
///
/// Registration is per element. The first visibility report for an element
/// activates it and ends its registration; later reports (including hidden
/// ones) change nothing.
#[derive(Debug)]
pub struct ViewportObserver {
    activated_class: String,
    stats: ObserverStats,
}

impl ViewportObserver {
    /// Observer that marks activation with `activated_class`.
    #[must_use]
    pub fn new(activated_class: &str) -> Self {
        Self {
            activated_class: activated_class.to_owned(),
            stats: ObserverStats::default(),
        }
    }

    /// Register a prepared element.
    pub fn watch<H: Host>(&mut self, host: &mut H, element: &H::Element) {
        host.observe(element);
        self.stats.registered += 1;
    }

    /// Handle a visibility-enter report. Returns whether this call
    /// activated the element.
    ///
    /// Unregisters unconditionally, so a report racing an earlier
    /// activation is harmless.
    pub fn on_visible<H: Host>(
        &mut self,
        host: &mut H,
        element: &H::Element,
    ) -> bool {
        let newly_activated = !host.has_class(element, &self.activated_class);
        if newly_activated {
            host.add_class(element, &self.activated_class);
            self.stats.activated += 1;
        }
        host.unobserve(element);
        newly_activated
    }

    /// Totals so far.
    #[must_use]
    pub const fn stats(&self) -> ObserverStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryDocument;

    #[test]
    fn activates_once_and_unregisters() {
        let mut doc = MemoryDocument::new(1024);
        let el = doc.insert(&[("data-cc-animate", "")]);
        let mut observer = ViewportObserver::new("cc-animate-in");
        observer.watch(&mut doc, &el);
        assert!(doc.is_observed(el));

        assert!(observer.on_visible(&mut doc, &el));
        assert!(!doc.is_observed(el));
        assert!(!observer.on_visible(&mut doc, &el));

        assert_eq!(doc.classes(el), ["cc-animate-in".to_owned()]);
        assert_eq!(
            observer.stats(),
            ObserverStats {
                registered: 1,
                activated: 1
            }
        );
        assert_eq!(observer.stats().watching(), 0);
    }

    #[test]
    fn already_activated_element_is_still_unregistered() {
        let mut doc = MemoryDocument::new(1024);
        let el = doc.insert(&[]);
        doc.add_class(&el, "cc-animate-in");
        doc.observe(&el);

        let mut observer = ViewportObserver::new("cc-animate-in");
        assert!(!observer.on_visible(&mut doc, &el));
        assert!(!doc.is_observed(el));
        assert_eq!(observer.stats().activated, 0);
    }
}
