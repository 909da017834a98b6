use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Markers", inline)]
#[serde(default)]
/// Attribute and class names forming the markup contract with the theme.
pub struct MarkerOptions {
    /// Presence marks an element as eligible; its value names the animation
    /// class to add.
    #[schemars(title = "Eligibility Attribute")]
    pub animate_attribute: String,
    /// Optional attribute copied into `animation-delay`.
    #[schemars(title = "Delay Attribute")]
    pub delay_attribute: String,
    /// Optional attribute copied into `animation-duration`.
    #[schemars(title = "Duration Attribute")]
    pub duration_attribute: String,
    /// Class added once an element has been prepared.
    #[schemars(title = "Init Class")]
    pub init_class: String,
    /// Class added when an element first enters the viewport.
    #[schemars(title = "Activated Class")]
    pub activated_class: String,
    /// Class on the document body that turns the animated styles on.
    #[schemars(title = "Enabled Class")]
    pub enabled_class: String,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            animate_attribute: "data-cc-animate".to_owned(),
            delay_attribute: "data-cc-animate-delay".to_owned(),
            duration_attribute: "data-cc-animate-duration".to_owned(),
            init_class: "cc-animate-init".to_owned(),
            activated_class: "cc-animate-in".to_owned(),
            enabled_class: "cc-animate-enabled".to_owned(),
        }
    }
}

impl MarkerOptions {
    /// CSS selector for eligible elements that have not been prepared yet.
    #[must_use]
    pub fn pending_selector(&self) -> String {
        format!("[{}]:not(.{})", self.animate_attribute, self.init_class)
    }
}
