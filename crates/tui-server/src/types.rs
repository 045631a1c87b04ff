//! Parameter and result types for the `tui-builder` tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tui_core::SessionAction;

const fn default_true() -> bool {
    true
}

fn default_widget_type() -> String {
    "Static".to_string()
}

/// Parameters for `generate_widget`.
///
/// # Examples
///
/// ```
/// use tui_server::types::GenerateWidgetParams;
///
/// let params: GenerateWidgetParams = serde_json::from_str(r#"{"name": "status_bar"}"#).unwrap();
/// assert_eq!(params.widget_type, "Static");
/// assert!(params.with_css);
/// assert!(!params.with_bindings);
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateWidgetParams {
    /// Name of the widget type (e.g., "StatusBar" or "status_bar")
    pub name: String,

    /// Built-in widget to extend (default: "Static")
    #[serde(default = "default_widget_type")]
    pub widget_type: String,

    /// Include example CSS (default: true)
    #[serde(default = "default_true")]
    pub with_css: bool,

    /// Include an example key binding (default: false)
    #[serde(default)]
    pub with_bindings: bool,
}

/// Parameters for `generate_screen`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateScreenParams {
    /// Name of the screen type (e.g., "SettingsScreen")
    pub name: String,

    /// Declare a modal screen (default: false)
    #[serde(default)]
    pub modal: bool,

    /// Add Header and Footer widgets; ignored for modal screens (default: true)
    #[serde(default = "default_true")]
    pub with_header_footer: bool,
}

/// Parameters for `generate_app`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateAppParams {
    /// Name of the application type (e.g., "MyApp" or "my_app")
    pub name: String,

    /// Add a settings screen reachable with `s` (default: false)
    #[serde(default)]
    pub with_screens: bool,

    /// Use a sidebar layout (default: false)
    #[serde(default)]
    pub with_sidebar: bool,
}

/// Parameters for `validate_css`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateCssParams {
    /// CSS text to check
    pub css: String,
}

/// Parameters for tools that read a source without running it.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InspectSourceParams {
    /// Application source
    pub source: String,
}

/// Parameters for tools that run an application source.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SourceParams {
    /// Application source (TOML document with `[[app]]`, `[[screen]]` and
    /// `[[widget]]` declarations)
    pub source: String,

    /// Application type to run when the source declares several
    #[serde(default)]
    pub entry: Option<String>,
}

/// Parameters for `simulate_keys`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimulateKeysParams {
    /// Application source
    pub source: String,

    /// Keys to press in order (e.g., ["tab", "enter", "q"])
    pub keys: Vec<String>,

    /// Application type to run when the source declares several
    #[serde(default)]
    pub entry: Option<String>,
}

/// Parameters for `simulate_click`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimulateClickParams {
    /// Application source
    pub source: String,

    /// Selector of the widget to click (e.g., "#submit")
    pub selector: String,

    /// Application type to run when the source declares several
    #[serde(default)]
    pub entry: Option<String>,
}

/// Parameters for `drive_session`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveSessionParams {
    /// Application source
    pub source: String,

    /// Steps applied in order, e.g.
    /// `[{"action": "press", "keys": ["tab"]}, {"action": "click", "selector": "#ok"}]`
    #[serde(default)]
    pub actions: Vec<SessionAction>,

    /// Application type to run when the source declares several
    #[serde(default)]
    pub entry: Option<String>,
}

/// Parameters for `compare_snapshots`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompareSnapshotsParams {
    /// Expected capture
    pub expected: String,

    /// Actual capture
    pub actual: String,
}

/// Result of `generate_*` tools.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GeneratedSource {
    /// Generated type name
    pub class_name: String,

    /// Generated text
    pub source: String,
}

/// Result of `list_widgets` and `list_containers`: type name to summary.
pub type ComponentList = BTreeMap<String, String>;
