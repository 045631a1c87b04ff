//! Application source documents.
//!
//! An application source is a TOML document declaring application types
//! (`[[app]]`), screen types (`[[screen]]`) and custom widget types
//! (`[[widget]]`). Each declaration composes a tree of widget nodes.
//!
//! # Examples
//!
//! ```
//! use tui_harness::document::AppDocument;
//!
//! let source = r#"
//! [[app]]
//! class = "HelloApp"
//! description = "Greets the user."
//!
//! [[app.bindings]]
//! key = "q"
//! action = "quit"
//! description = "Quit"
//!
//! [[app.widgets]]
//! type = "Static"
//! id = "greeting"
//! text = "Hello, world"
//! "#;
//!
//! let document = AppDocument::parse(source).unwrap();
//! assert_eq!(document.app_classes(), ["HelloApp"]);
//! ```

use serde::{Deserialize, Serialize};
use tui_core::{Error, Result};

/// A parsed application source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppDocument {
    /// Application types
    #[serde(default)]
    pub app: Vec<AppDecl>,

    /// Screen types, pushed with `push_screen(Class)`
    #[serde(default)]
    pub screen: Vec<ScreenDecl>,

    /// Custom widget types, usable as a node `type`
    #[serde(default)]
    pub widget: Vec<WidgetDecl>,
}

/// An application type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppDecl {
    /// Class name, used as the entry point
    pub class: String,

    /// Human readable summary
    #[serde(default)]
    pub description: Option<String>,

    /// Title shown by `Header`; defaults to the class name
    #[serde(default)]
    pub title: Option<String>,

    /// Subtitle shown by `Header`
    #[serde(default)]
    pub sub_title: Option<String>,

    /// Stylesheet
    #[serde(default)]
    pub css: Option<String>,

    /// App-wide key bindings
    #[serde(default)]
    pub bindings: Vec<BindingDecl>,

    /// Widgets composed on the default screen
    #[serde(default)]
    pub widgets: Vec<WidgetNode>,
}

/// A screen type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenDecl {
    /// Class name, referenced by `push_screen`
    pub class: String,

    /// Human readable summary
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the screen is modal
    #[serde(default)]
    pub modal: bool,

    /// Stylesheet
    #[serde(default)]
    pub css: Option<String>,

    /// Screen key bindings
    #[serde(default)]
    pub bindings: Vec<BindingDecl>,

    /// Widgets composed on the screen
    #[serde(default)]
    pub widgets: Vec<WidgetNode>,
}

/// A custom widget type extending a built-in widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetDecl {
    /// Class name, usable as a node `type`
    pub class: String,

    /// Human readable summary
    #[serde(default)]
    pub description: Option<String>,

    /// Built-in widget this type extends
    #[serde(default = "default_base")]
    pub base: String,

    /// Default text content
    #[serde(default)]
    pub text: Option<String>,

    /// Stylesheet
    #[serde(default)]
    pub css: Option<String>,

    /// Bindings active while focus is inside an instance
    #[serde(default)]
    pub bindings: Vec<BindingDecl>,

    /// Widgets composed inside every instance
    #[serde(default)]
    pub children: Vec<WidgetNode>,
}

fn default_base() -> String {
    "Static".to_string()
}

/// A key binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingDecl {
    /// Key identifier (`q`, `ctrl+s`, `escape`)
    pub key: String,

    /// Action string (`quit`, `set_text('#status', 'Saved')`)
    pub action: String,

    /// Label shown by `Footer`
    #[serde(default)]
    pub description: Option<String>,

    /// Whether `Footer` lists the binding
    #[serde(default = "default_true")]
    pub show: bool,
}

const fn default_true() -> bool {
    true
}

/// One node of a composition tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetNode {
    /// Built-in widget name or custom widget class
    #[serde(rename = "type")]
    pub kind: String,

    /// Unique id, matched by `#id`
    #[serde(default)]
    pub id: Option<String>,

    /// Style classes, matched by `.class`
    #[serde(default)]
    pub classes: Vec<String>,

    /// Text or label content
    #[serde(default)]
    pub text: Option<String>,

    /// Input placeholder
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Initial input value
    #[serde(default)]
    pub value: Option<String>,

    /// Initial state of toggles
    #[serde(default)]
    pub checked: bool,

    /// Initial progress
    #[serde(default)]
    pub progress: Option<f64>,

    /// Progress total; indeterminate when absent
    #[serde(default)]
    pub total: Option<f64>,

    /// Rows of list-like widgets
    #[serde(default)]
    pub items: Vec<String>,

    /// Button variant (`primary`, `success`, `warning`, `error`)
    #[serde(default)]
    pub variant: Option<String>,

    /// Starts hidden
    #[serde(default)]
    pub hidden: bool,

    /// Ignores focus and activation
    #[serde(default)]
    pub disabled: bool,

    /// Action run when a button-like widget is activated
    #[serde(default)]
    pub on_press: Option<String>,

    /// Action run when `enter` is pressed in an input
    #[serde(default)]
    pub on_submit: Option<String>,

    /// Nested widgets
    #[serde(default)]
    pub children: Vec<WidgetNode>,
}

impl AppDocument {
    /// Parses an application source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the text is not valid TOML or does not
    /// follow the document schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_harness::document::AppDocument;
    ///
    /// let err = AppDocument::parse("[[app]\nclass = 1").unwrap_err();
    /// assert!(err.to_string().starts_with("Syntax error:"));
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| {
            let message = e.message().trim_end().to_string();
            let message = match e.span() {
                Some(span) => format!("line {}: {message}", line_of(source, span.start)),
                None => message,
            };
            Error::Syntax { message }
        })
    }

    /// Names of declared application types, in declaration order.
    #[must_use]
    pub fn app_classes(&self) -> Vec<&str> {
        self.app.iter().map(|a| a.class.as_str()).collect()
    }

    /// Looks up an application type by class name.
    #[must_use]
    pub fn find_app(&self, class: &str) -> Option<&AppDecl> {
        self.app.iter().find(|a| a.class == class)
    }

    /// Looks up a screen type by class name.
    #[must_use]
    pub fn find_screen(&self, class: &str) -> Option<&ScreenDecl> {
        self.screen.iter().find(|s| s.class == class)
    }

    /// Looks up a custom widget type by class name.
    #[must_use]
    pub fn find_widget(&self, class: &str) -> Option<&WidgetDecl> {
        self.widget.iter().find(|w| w.class == class)
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source
        .get(..offset)
        .map_or(1, |prefix| prefix.matches('\n').count() + 1)
}
