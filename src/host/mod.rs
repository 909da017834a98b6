//! The seam between the coordinator and the page it runs against.
//!
//! [`Host`] is the only thing the core knows about the DOM. The browser
//! adapter implements it with `web-sys`; [`memory::MemoryDocument`]
//! implements it in plain Rust for tests and native consumers.

pub mod memory;

use crate::options::MarkerOptions;

/// DOM operations the coordinator needs.
///
/// Methods that mutate take `&mut self` even though browser handles are
/// shared JS references; the coordinator is the only writer.
pub trait Host {
    /// Handle to one element in the document.
    type Element: Clone;

    /// Elements carrying the eligibility attribute but not the init class,
    /// in document order.
    fn pending_elements(&self, markers: &MarkerOptions) -> Vec<Self::Element>;

    /// Attribute value, `None` when absent.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Whether `element` carries `class`.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add `class` to `element`. Adding a present class is a no-op.
    fn add_class(&mut self, element: &Self::Element, class: &str);

    /// Set an inline style property (e.g. `animation-delay`).
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    /// Whether the document root carries `class`.
    fn root_has_class(&self, class: &str) -> bool;

    /// Add or remove `class` on the document root.
    fn set_root_class(&mut self, class: &str, present: bool);

    /// Computed value of a custom property on the root element.
    fn root_style_property(&self, name: &str) -> Option<String>;

    /// Whether a `(min-width: {min_width}px)` media query currently matches.
    fn matches_min_width(&self, min_width: u32) -> bool;

    /// Start reporting visibility changes for `element`.
    fn observe(&mut self, element: &Self::Element);

    /// Stop reporting visibility changes for `element`. Idempotent.
    fn unobserve(&mut self, element: &Self::Element);

    /// Start reporting child-list mutations anywhere under the body.
    fn watch_subtree(&mut self);
}

/// Host features probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Viewport-intersection detection is available.
    pub intersection: bool,
    /// Subtree-mutation detection is available.
    pub mutation: bool,
    /// Media queries can report live `change` events.
    pub media_change: bool,
}

impl Capabilities {
    /// Every capability present.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            intersection: true,
            mutation: true,
            media_change: true,
        }
    }

    /// Whether the subsystem can run at all.
    #[must_use]
    pub const fn supports_reveal(self) -> bool {
        self.intersection && self.mutation
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}
