//! In-memory document implementing [`Host`].
//!
//! Models just enough of a page for the coordinator: element attributes,
//! class lists, inline styles, viewport membership, intersection
//! registrations and subtree mutation delivery. Notifications are queued
//! rather than dispatched, so the caller decides when each batch is fed
//! back into the coordinator, the same way a browser queues observer
//! callbacks onto its event loop.

use rustc_hash::{FxHashMap, FxHashSet};

use super::Host;
use crate::options::MarkerOptions;

/// Handle to an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// One queued intersection notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    /// Element whose visibility changed.
    pub element: ElementId,
    /// Whether it now overlaps the viewport.
    pub is_intersecting: bool,
}

#[derive(Debug, Default)]
struct Node {
    attributes: FxHashMap<String, String>,
    /// Ordered so tests can assert a class appears exactly once.
    classes: Vec<String>,
    style: FxHashMap<String, String>,
    style_writes: usize,
    in_viewport: bool,
    connected: bool,
    observe_calls: usize,
}

/// A page held entirely in memory.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root_classes: Vec<String>,
    root_properties: FxHashMap<String, String>,
    viewport_width: u32,
    observed: FxHashSet<ElementId>,
    entries: Vec<VisibilityEntry>,
    watching_subtree: bool,
    pending_mutations: usize,
}

impl MemoryDocument {
    /// Empty document with the given viewport width in CSS pixels.
    #[must_use]
    pub fn new(viewport_width: u32) -> Self {
        Self {
            nodes: Vec::new(),
            root_classes: Vec::new(),
            root_properties: FxHashMap::default(),
            viewport_width,
            observed: FxHashSet::default(),
            entries: Vec::new(),
            watching_subtree: false,
            pending_mutations: 0,
        }
    }

    /// Document whose body already carries `class` (the theme's opt-in).
    #[must_use]
    pub fn with_root_class(viewport_width: u32, class: &str) -> Self {
        let mut doc = Self::new(viewport_width);
        doc.root_classes.push(class.to_owned());
        doc
    }

    /// Append an element with the given attributes, off screen.
    ///
    /// Queues a mutation record once subtree watching has started.
    pub fn insert(&mut self, attributes: &[(&str, &str)]) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            connected: true,
            ..Node::default()
        });
        self.record_mutation();
        id
    }

    /// Detach an element. It keeps any registration, as a browser would,
    /// but is no longer returned by queries.
    pub fn remove(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.connected = false;
            self.record_mutation();
        }
    }

    /// Move an element into or out of the viewport, queueing a
    /// notification if it is observed and its visibility changed.
    pub fn set_in_viewport(&mut self, element: ElementId, visible: bool) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        if node.in_viewport == visible {
            return;
        }
        node.in_viewport = visible;
        if self.observed.contains(&element) {
            self.entries.push(VisibilityEntry {
                element,
                is_intersecting: visible,
            });
        }
    }

    /// Resize the viewport.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Set a computed custom property on the root element.
    pub fn set_root_property(&mut self, name: &str, value: &str) {
        let _ = self
            .root_properties
            .insert(name.to_owned(), value.to_owned());
    }

    /// Drain queued intersection notifications, oldest first.
    pub fn take_entries(&mut self) -> Vec<VisibilityEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Drain queued mutation records, returning how many were batched.
    pub fn take_mutations(&mut self) -> usize {
        std::mem::take(&mut self.pending_mutations)
    }

    /// Class list of an element, in insertion order.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.nodes
            .get(element.0)
            .map_or(&[], |node| node.classes.as_slice())
    }

    /// Inline style property value.
    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(element.0)
            .and_then(|node| node.style.get(property))
            .map(String::as_str)
    }

    /// How many inline style writes an element has received.
    #[must_use]
    pub fn style_writes(&self, element: ElementId) -> usize {
        self.nodes.get(element.0).map_or(0, |node| node.style_writes)
    }

    /// Whether an element is currently registered for visibility reports.
    #[must_use]
    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    /// How many times an element has been registered.
    #[must_use]
    pub fn observe_calls(&self, element: ElementId) -> usize {
        self.nodes.get(element.0).map_or(0, |node| node.observe_calls)
    }

    /// Number of elements currently registered.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Whether subtree mutation reporting has started.
    #[must_use]
    pub fn is_watching_subtree(&self) -> bool {
        self.watching_subtree
    }

    fn record_mutation(&mut self) {
        if self.watching_subtree {
            self.pending_mutations += 1;
        }
    }
}

impl Host for MemoryDocument {
    type Element = ElementId;

    fn pending_elements(&self, markers: &MarkerOptions) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                node.connected
                    && node.attributes.contains_key(&markers.animate_attribute)
                    && !node.classes.iter().any(|c| *c == markers.init_class)
            })
            .map(|(idx, _)| ElementId(idx))
            .collect()
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(element.0)
            .and_then(|node| node.attributes.get(name))
            .cloned()
    }

    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.classes(*element).iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: &ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        }
    }

    fn set_style(&mut self, element: &ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            let _ = node.style.insert(property.to_owned(), value.to_owned());
            node.style_writes += 1;
        }
    }

    fn root_has_class(&self, class: &str) -> bool {
        self.root_classes.iter().any(|c| c == class)
    }

    fn set_root_class(&mut self, class: &str, present: bool) {
        if present {
            if !self.root_has_class(class) {
                self.root_classes.push(class.to_owned());
            }
        } else {
            self.root_classes.retain(|c| c != class);
        }
    }

    fn root_style_property(&self, name: &str) -> Option<String> {
        self.root_properties.get(name).cloned()
    }

    fn matches_min_width(&self, min_width: u32) -> bool {
        self.viewport_width >= min_width
    }

    fn observe(&mut self, element: &ElementId) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        node.observe_calls += 1;
        // Registration delivers an initial report, like IntersectionObserver.
        if self.observed.insert(*element) {
            self.entries.push(VisibilityEntry {
                element: *element,
                is_intersecting: node.in_viewport,
            });
        }
    }

    fn unobserve(&mut self, element: &ElementId) {
        let _ = self.observed.remove(element);
    }

    fn watch_subtree(&mut self) {
        self.watching_subtree = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_query_skips_initialized_and_detached() {
        let mut doc = MemoryDocument::new(1024);
        let a = doc.insert(&[("data-cc-animate", "")]);
        let b = doc.insert(&[("data-cc-animate", "")]);
        let c = doc.insert(&[("data-cc-animate", "")]);
        let _plain = doc.insert(&[("class", "hero")]);
        doc.add_class(&b, "cc-animate-init");
        doc.remove(c);
        assert_eq!(doc.pending_elements(&MarkerOptions::default()), vec![a]);
    }

    #[test]
    fn observe_reports_initial_state_then_changes() {
        let mut doc = MemoryDocument::new(1024);
        let el = doc.insert(&[]);
        doc.set_in_viewport(el, true);
        assert!(doc.take_entries().is_empty(), "not observed yet");

        doc.observe(&el);
        assert_eq!(
            doc.take_entries(),
            vec![VisibilityEntry {
                element: el,
                is_intersecting: true,
            }]
        );

        doc.set_in_viewport(el, false);
        doc.unobserve(&el);
        doc.set_in_viewport(el, true);
        assert_eq!(
            doc.take_entries(),
            vec![VisibilityEntry {
                element: el,
                is_intersecting: false,
            }]
        );
    }

    #[test]
    fn mutations_only_counted_while_watching() {
        let mut doc = MemoryDocument::new(1024);
        let _ = doc.insert(&[]);
        assert_eq!(doc.take_mutations(), 0);
        doc.watch_subtree();
        let a = doc.insert(&[]);
        doc.remove(a);
        assert_eq!(doc.take_mutations(), 2);
        assert_eq!(doc.take_mutations(), 0);
    }

    #[test]
    fn root_class_toggle_is_idempotent() {
        let mut doc = MemoryDocument::with_root_class(1024, "cc-animate-enabled");
        doc.set_root_class("cc-animate-enabled", true);
        assert!(doc.root_has_class("cc-animate-enabled"));
        doc.set_root_class("cc-animate-enabled", false);
        doc.set_root_class("cc-animate-enabled", false);
        assert!(!doc.root_has_class("cc-animate-enabled"));
    }
}
