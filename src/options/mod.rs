//! Centralized subsystem options with TOML and JSON support.
//!
//! Everything the coordinator would otherwise read ad hoc from the page
//! (attribute names, class names, timer windows, the threshold property) is
//! consolidated here and passed by argument at startup.

mod gate;
mod markers;
mod timing;

use std::path::Path;

pub use gate::GateOptions;
pub use markers::MarkerOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::TimingOptions;

use crate::error::RevealError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial documents (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Markup contract: attribute and class names.
    pub markers: MarkerOptions,
    /// Debounce and re-enable timer windows.
    pub timing: TimingOptions,
    /// Responsive threshold source.
    pub gate: GateOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a JSON string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`RevealError::OptionsParse`] if the JSON is malformed or mistyped.
    pub fn from_json(json: &str) -> Result<Self, RevealError> {
        serde_json::from_str(json)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`RevealError::Io`] if the file cannot be read,
    /// [`RevealError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, RevealError> {
        let content = std::fs::read_to_string(path).map_err(RevealError::Io)?;
        toml::from_str(&content)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`RevealError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RevealError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RevealError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RevealError::Io)?;
        }
        std::fs::write(path, content).map_err(RevealError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[timing]
rescan_debounce_ms = 400
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.timing.rescan_debounce_ms, 400);
        // Everything else should be default
        assert_eq!(opts.timing.reenable_delay_ms, 100);
        assert_eq!(opts.markers.activated_class, "cc-animate-in");
        assert_eq!(opts.gate.min_width_property, "--aos-min-width");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts =
            Options::from_json(r#"{"markers":{"init_class":"aos-ready"}}"#)
                .unwrap();
        assert_eq!(opts.markers.init_class, "aos-ready");
        assert_eq!(opts.markers.animate_attribute, "data-cc-animate");
        assert_eq!(opts.timing, TimingOptions::default());
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        let err = Options::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RevealError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = std::env::temp_dir()
            .join(format!("scroll-reveal-opts-{}", std::process::id()));
        let path = dir.join("nested").join("reveal.toml");
        let mut opts = Options::default();
        opts.gate.fallback_min_width = 750;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::load(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, RevealError::Io(_)));
    }

    #[test]
    fn pending_selector_excludes_prepared_elements() {
        let markers = MarkerOptions::default();
        assert_eq!(
            markers.pending_selector(),
            "[data-cc-animate]:not(.cc-animate-init)"
        );
    }

    #[test]
    fn min_width_resolution() {
        let gate = GateOptions::default();
        assert_eq!(gate.resolve_min_width(None), 0);
        assert_eq!(gate.resolve_min_width(Some("   ")), 0);
        assert_eq!(gate.resolve_min_width(Some(" 768")), 768);
        assert_eq!(gate.resolve_min_width(Some("1024px")), 1024);
        assert_eq!(gate.resolve_min_width(Some("600.9")), 600);
        assert_eq!(gate.resolve_min_width(Some("wide")), 0);
        assert_eq!(gate.resolve_min_width(Some("-5")), 0);

        let gate = GateOptions {
            fallback_min_width: 480,
            ..GateOptions::default()
        };
        assert_eq!(gate.resolve_min_width(Some("oops")), 480);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("markers"));
        assert!(props.contains_key("timing"));
        assert!(props.contains_key("gate"));

        let timing = &props["timing"]["properties"];
        assert!(timing.get("rescan_debounce_ms").is_some());
        assert!(timing.get("reenable_delay_ms").is_some());

        let markers = &props["markers"]["properties"];
        assert!(markers.get("animate_attribute").is_some());
        assert!(markers.get("activated_class").is_some());

        let gate = &props["gate"]["properties"];
        assert!(gate.get("min_width_property").is_some());
        assert!(gate.get("fallback_min_width").is_some());
    }
}
