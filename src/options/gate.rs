use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Responsive Gate", inline)]
#[serde(default)]
/// Where the minimum-width threshold comes from.
pub struct GateOptions {
    /// Custom property on the root element holding the threshold in pixels.
    #[schemars(title = "Min Width Property")]
    pub min_width_property: String,
    /// Threshold used when the property is absent or unparsable.
    #[schemars(title = "Fallback Min Width (px)")]
    pub fallback_min_width: u32,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            min_width_property: "--aos-min-width".to_owned(),
            fallback_min_width: 0,
        }
    }
}

impl GateOptions {
    /// Resolve the threshold from the raw custom-property value.
    ///
    /// Accepts a bare number or a `px` length (`"768"`, `" 768px "`);
    /// fractional values are truncated. Anything else falls back.
    #[must_use]
    pub fn resolve_min_width(&self, raw: Option<&str>) -> u32 {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.fallback_min_width;
        };
        let number = raw.strip_suffix("px").unwrap_or(raw).trim();
        match number.parse::<f64>() {
            Ok(px) if px.is_finite() && px >= 0.0 => px as u32,
            _ => {
                log::warn!(
                    "Ignoring malformed {} value '{raw}'",
                    self.min_width_property
                );
                self.fallback_min_width
            }
        }
    }
}
