//! [`Host`] implementation over the live browser DOM.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, MutationObserver,
    MutationObserverInit, Window,
};

use crate::host::Host;
use crate::options::MarkerOptions;

/// Media query text for a min-width threshold.
pub(crate) fn min_width_query(min_width: u32) -> String {
    format!("(min-width: {min_width}px)")
}

/// The page as seen through `web-sys`.
///
/// Observers are `None` when the browser lacks them; the coordinator never
/// starts in that case, so the corresponding methods are never reached.
pub struct WebHost {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) body: HtmlElement,
    pub(crate) intersection: Option<IntersectionObserver>,
    pub(crate) mutation: Option<MutationObserver>,
}

impl Host for WebHost {
    type Element = Element;

    fn pending_elements(&self, markers: &MarkerOptions) -> Vec<Element> {
        let selector = markers.pending_selector();
        let list = match self.document.query_selector_all(&selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("querySelectorAll('{selector}') failed: {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("Could not add class '{class}': {e:?}");
        }
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            log::debug!("Skipping {property} on non-HTML element");
            return;
        };
        if let Err(e) = html.style().set_property(property, value) {
            log::warn!("Could not set {property}: {e:?}");
        }
    }

    fn root_has_class(&self, class: &str) -> bool {
        self.body.class_list().contains(class)
    }

    fn set_root_class(&mut self, class: &str, present: bool) {
        let classes = self.body.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(e) = result {
            log::warn!("Could not toggle body class '{class}': {e:?}");
        }
    }

    fn root_style_property(&self, name: &str) -> Option<String> {
        let root = self.document.document_element()?;
        let style = self.window.get_computed_style(&root).ok().flatten()?;
        style
            .get_property_value(name)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn matches_min_width(&self, min_width: u32) -> bool {
        self.window
            .match_media(&min_width_query(min_width))
            .ok()
            .flatten()
            .map_or(min_width == 0, |mq| mq.matches())
    }

    fn observe(&mut self, element: &Element) {
        if let Some(observer) = &self.intersection {
            observer.observe(element);
        }
    }

    fn unobserve(&mut self, element: &Element) {
        if let Some(observer) = &self.intersection {
            observer.unobserve(element);
        }
    }

    fn watch_subtree(&mut self) {
        let Some(observer) = &self.mutation else {
            return;
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&self.body, &init) {
            log::error!("Failed to observe document body: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_text() {
        assert_eq!(min_width_query(768), "(min-width: 768px)");
        assert_eq!(min_width_query(0), "(min-width: 0px)");
    }
}
