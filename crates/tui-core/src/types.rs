//! Result records and input types shared by the harness and the servers.
//!
//! Every record here is created and returned within a single operation; none
//! of them is shared or mutated after it is handed back to the caller.
//!
//! # Examples
//!
//! ```
//! use tui_core::{ComparisonResult, SessionResult};
//!
//! let ok = SessionResult::success("Hello");
//! assert!(ok.success && ok.error.is_none());
//!
//! let failed = SessionResult::failure("No App class found");
//! assert!(!failed.success && failed.output.is_empty());
//!
//! assert!(ComparisonResult::matching().matches);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder output for applications that render no extractable text.
pub const EMPTY_RENDER_PLACEHOLDER: &str = "App rendered";

/// Outcome of a session-driving operation.
///
/// `error` is set if and only if `success` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionResult {
    /// Whether the session ran to completion
    pub success: bool,

    /// Text content captured from the application after all actions
    pub output: String,

    /// Failure description, present only when `success` is false
    pub error: Option<String>,
}

impl SessionResult {
    /// Creates a successful result carrying the captured output.
    #[must_use]
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    /// Creates a failed result with an empty output.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for SessionResult {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(output) => Self::success(output),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Outcome of comparing two text snapshots.
///
/// `diff` is present if and only if the snapshots differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonResult {
    /// Whether both snapshots are identical
    #[serde(rename = "match")]
    pub matches: bool,

    /// Unified diff from `expected` to `actual`
    pub diff: Option<String>,
}

impl ComparisonResult {
    /// Result for identical snapshots.
    #[must_use]
    pub const fn matching() -> Self {
        Self {
            matches: true,
            diff: None,
        }
    }

    /// Result for differing snapshots.
    #[must_use]
    pub const fn differing(diff: String) -> Self {
        Self {
            matches: false,
            diff: Some(diff),
        }
    }
}

/// Outcome of a validator.
///
/// Errors invalidate the input; warnings never do.
///
/// # Examples
///
/// ```
/// use tui_core::ValidationResult;
///
/// let mut result = ValidationResult::default();
/// result.warn("Unknown CSS property: colour");
/// assert!(result.valid);
///
/// result.error("Unbalanced braces: 1 opening, 0 closing");
/// assert!(!result.valid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    /// Whether the input passed validation
    pub valid: bool,

    /// Hard problems
    pub errors: Vec<String>,

    /// Advisory findings
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationResult {
    /// Records an error and marks the input invalid.
    pub fn error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// One input step applied to a running application.
///
/// # Examples
///
/// ```
/// use tui_core::SessionAction;
///
/// let action: SessionAction =
///     serde_json::from_str(r#"{"action": "press", "keys": ["tab", "enter"]}"#).unwrap();
/// assert_eq!(action, SessionAction::press(["tab", "enter"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    /// Send key presses in order (e.g. `"q"`, `"tab"`, `"shift+tab"`)
    Press {
        /// Key identifiers; a session rejects an empty list
        keys: Vec<String>,
    },

    /// Click the widget matched by a selector (e.g. `"#submit"`)
    Click {
        /// Selector resolved against the active screen
        selector: String,
    },
}

impl SessionAction {
    /// Builds a `press` action from key identifiers.
    #[must_use]
    pub fn press<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Press {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a `click` action.
    #[must_use]
    pub fn click(selector: impl Into<String>) -> Self {
        Self::Click {
            selector: selector.into(),
        }
    }
}
