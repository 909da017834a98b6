//! Per-element lifecycle and declared animation attributes.

use crate::host::Host;
use crate::options::MarkerOptions;

/// Where an animatable element sits in its one-way lifecycle.
///
/// Phases only move forward; `Activated` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementPhase {
    /// Eligible but not yet seen by the scanner.
    Uncollected,
    /// Styles applied and init class added; never collected again.
    Prepared,
    /// Registered with the viewport observer.
    Watching,
    /// Entered the viewport; activated class present, no longer observed.
    Activated,
}

impl ElementPhase {
    /// Derive the phase of `element` from its classes.
    ///
    /// The scanner registers an element in the same step that prepares it,
    /// so outside a scan an initialized element is always `Watching`. An
    /// activated class present in markup before any scan does not count;
    /// the element is still collected by the next scan.
    #[must_use]
    pub fn of<H: Host>(
        host: &H,
        element: &H::Element,
        markers: &MarkerOptions,
    ) -> Self {
        if !host.has_class(element, &markers.init_class) {
            Self::Uncollected
        } else if host.has_class(element, &markers.activated_class) {
            Self::Activated
        } else {
            Self::Watching
        }
    }
}

/// The optional attributes an eligible element declares.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// Class naming the CSS animation to play.
    pub animation: Option<String>,
    /// Value for `animation-delay`.
    pub delay: Option<String>,
    /// Value for `animation-duration`.
    pub duration: Option<String>,
}

impl Declaration {
    /// Read the declaration off an element.
    #[must_use]
    pub fn read<H: Host>(
        host: &H,
        element: &H::Element,
        markers: &MarkerOptions,
    ) -> Self {
        let attr = |name: &str| {
            host.attribute(element, name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        Self {
            // Class lists are whitespace separated; a value with spaces is
            // not a single valid class.
            animation: attr(&markers.animate_attribute)
                .filter(|v| !v.contains(char::is_whitespace)),
            delay: attr(&markers.delay_attribute),
            duration: attr(&markers.duration_attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryDocument;

    #[test]
    fn declaration_skips_empty_and_missing_values() {
        let markers = MarkerOptions::default();
        let mut doc = MemoryDocument::new(1200);
        let full = doc.insert(&[
            ("data-cc-animate", "cc-fade-in-up"),
            ("data-cc-animate-delay", "0.2s"),
            ("data-cc-animate-duration", " 1s "),
        ]);
        let bare = doc.insert(&[
            ("data-cc-animate", ""),
            ("data-cc-animate-delay", "  "),
        ]);

        let decl = Declaration::read(&doc, &full, &markers);
        assert_eq!(decl.animation.as_deref(), Some("cc-fade-in-up"));
        assert_eq!(decl.delay.as_deref(), Some("0.2s"));
        assert_eq!(decl.duration.as_deref(), Some("1s"));

        assert_eq!(Declaration::read(&doc, &bare, &markers), Declaration::default());
    }

    #[test]
    fn animation_value_with_spaces_is_not_a_class() {
        let markers = MarkerOptions::default();
        let mut doc = MemoryDocument::new(1200);
        let el = doc.insert(&[("data-cc-animate", "fade in")]);
        assert_eq!(Declaration::read(&doc, &el, &markers).animation, None);
    }

    #[test]
    fn authored_activated_class_is_still_uncollected() {
        let markers = MarkerOptions::default();
        let mut doc = MemoryDocument::new(1200);
        let el = doc.insert(&[("data-cc-animate", "")]);
        doc.add_class(&el, "cc-animate-in");
        assert_eq!(
            ElementPhase::of(&doc, &el, &markers),
            ElementPhase::Uncollected
        );

        doc.add_class(&el, "cc-animate-init");
        assert_eq!(
            ElementPhase::of(&doc, &el, &markers),
            ElementPhase::Activated
        );
    }

    #[test]
    fn phases_are_ordered() {
        assert!(ElementPhase::Uncollected < ElementPhase::Prepared);
        assert!(ElementPhase::Prepared < ElementPhase::Watching);
        assert!(ElementPhase::Watching < ElementPhase::Activated);
    }
}
