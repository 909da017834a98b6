//! Collects eligible elements and prepares them for activation.

use crate::element::Declaration;
use crate::host::Host;
use crate::observer::ViewportObserver;
use crate::options::MarkerOptions;

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Elements prepared and registered by this pass.
    pub prepared: usize,
}

/// Prepare every eligible element not yet initialized and register it
/// with `observer`.
///
/// The init class is the only guard against double registration, so a
/// scan may be repeated freely. Runs synchronously; nothing else touches
/// the document mid-pass.
pub fn scan<H: Host>(
    host: &mut H,
    markers: &MarkerOptions,
    observer: &mut ViewportObserver,
) -> ScanReport {
    let pending = host.pending_elements(markers);
    if pending.is_empty() {
        return ScanReport::default();
    }

    for element in &pending {
        let decl = Declaration::read(host, element, markers);
        if let Some(delay) = &decl.delay {
            host.set_style(element, "animation-delay", delay);
        }
        if let Some(duration) = &decl.duration {
            host.set_style(element, "animation-duration", duration);
        }
        if let Some(animation) = &decl.animation {
            host.add_class(element, animation);
        }
        host.add_class(element, &markers.init_class);
        observer.watch(host, element);
    }

    log::debug!("Prepared {} animatable element(s)", pending.len());
    ScanReport {
        prepared: pending.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPhase;
    use crate::host::memory::MemoryDocument;

    fn setup() -> (MemoryDocument, MarkerOptions, ViewportObserver) {
        let markers = MarkerOptions::default();
        let observer = ViewportObserver::new(&markers.activated_class);
        (MemoryDocument::new(1280), markers, observer)
    }

    #[test]
    fn applies_declared_attributes() {
        let (mut doc, markers, mut observer) = setup();
        let el = doc.insert(&[
            ("data-cc-animate", "cc-zoom-out"),
            ("data-cc-animate-delay", "0.3s"),
            ("data-cc-animate-duration", "2s"),
        ]);

        let report = scan(&mut doc, &markers, &mut observer);

        assert_eq!(report.prepared, 1);
        assert_eq!(doc.style(el, "animation-delay"), Some("0.3s"));
        assert_eq!(doc.style(el, "animation-duration"), Some("2s"));
        assert_eq!(
            doc.classes(el),
            ["cc-zoom-out".to_owned(), "cc-animate-init".to_owned()]
        );
        assert!(doc.is_observed(el));
        assert_eq!(
            ElementPhase::of(&doc, &el, &markers),
            ElementPhase::Watching
        );
    }

    #[test]
    fn bare_marker_only_gets_init_class() {
        let (mut doc, markers, mut observer) = setup();
        let el = doc.insert(&[("data-cc-animate", "")]);
        let _ = scan(&mut doc, &markers, &mut observer);
        assert_eq!(doc.classes(el), ["cc-animate-init".to_owned()]);
        assert_eq!(doc.style_writes(el), 0);
    }

    #[test]
    fn repeated_scans_prepare_each_element_once() {
        let (mut doc, markers, mut observer) = setup();
        let el = doc.insert(&[
            ("data-cc-animate", "cc-fade-in"),
            ("data-cc-animate-delay", "0.1s"),
        ]);

        for _ in 0..5 {
            let _ = scan(&mut doc, &markers, &mut observer);
        }

        let init_count = doc
            .classes(el)
            .iter()
            .filter(|c| *c == "cc-animate-init")
            .count();
        assert_eq!(init_count, 1);
        assert_eq!(doc.style_writes(el), 1);
        assert_eq!(doc.observe_calls(el), 1);
        assert_eq!(observer.stats().registered, 1);
    }

    #[test]
    fn empty_document_is_a_no_op() {
        let (mut doc, markers, mut observer) = setup();
        let _plain = doc.insert(&[("class", "banner")]);
        assert_eq!(scan(&mut doc, &markers, &mut observer), ScanReport::default());
        assert_eq!(doc.observed_count(), 0);
    }

    #[test]
    fn only_new_elements_are_collected_on_rescan() {
        let (mut doc, markers, mut observer) = setup();
        let _first = doc.insert(&[("data-cc-animate", "")]);
        assert_eq!(scan(&mut doc, &markers, &mut observer).prepared, 1);

        let second = doc.insert(&[("data-cc-animate", "")]);
        let third = doc.insert(&[("data-cc-animate", "")]);
        assert_eq!(scan(&mut doc, &markers, &mut observer).prepared, 2);
        assert!(doc.is_observed(second) && doc.is_observed(third));
    }
}
