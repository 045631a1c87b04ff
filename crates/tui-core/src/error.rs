//! Error types for TUI Builder.
//!
//! This module provides the error hierarchy shared by the harness and the MCP
//! servers. Public session operations never surface these errors directly;
//! they are rendered into result records at the operation boundary.
//!
//! # Examples
//!
//! ```
//! use tui_core::{Error, Result};
//!
//! fn resolve_entry(classes: &[&str]) -> Result<()> {
//!     if classes.is_empty() {
//!         return Err(Error::NoAppFound);
//!     }
//!     Ok(())
//! }
//!
//! let err = resolve_entry(&[]).unwrap_err();
//! assert_eq!(err.to_string(), "No App class found");
//! ```

use std::time::Duration;
use thiserror::Error;

/// Main error type for TUI Builder.
///
/// All errors in the workspace use this type, providing consistent error
/// handling across the harness and the servers.
#[derive(Error, Debug)]
pub enum Error {
    /// Application source could not be parsed.
    ///
    /// Raised before anything is staged or executed.
    #[error("Syntax error: {message}")]
    Syntax {
        /// Parser message, including the location when available
        message: String,
    },

    /// The source declares no application type.
    #[error("No App class found")]
    NoAppFound,

    /// The requested entry point is not declared in the source.
    #[error("Class {class} not found")]
    ClassNotFound {
        /// Requested class name
        class: String,
    },

    /// Several application types are declared and none was named.
    #[error("Multiple App classes found ({}); name the entry point explicitly", classes.join(", "))]
    AmbiguousEntry {
        /// Declared application class names
        classes: Vec<String>,
    },

    /// The source parsed but does not describe a runnable application.
    ///
    /// Covers unknown widget types, recursive custom widgets and
    /// unresolvable screens.
    #[error("Invalid application: {message}")]
    InvalidApp {
        /// Description of the problem
        message: String,
    },

    /// An action string could not be parsed or names an unknown action.
    #[error("Invalid action '{action}': {reason}")]
    InvalidAction {
        /// The offending action string
        action: String,
        /// Why it was rejected
        reason: String,
    },

    /// A selector uses syntax the query engine does not support.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The offending selector
        selector: String,
        /// Why it was rejected
        reason: String,
    },

    /// A selector matched no widget on the active screen.
    #[error("No nodes match '{selector}'")]
    NoMatches {
        /// The selector that matched nothing
        selector: String,
    },

    /// The widget exists but cannot receive a click.
    #[error("Widget '{selector}' cannot be clicked: {reason}")]
    NotClickable {
        /// The selector that resolved to the widget
        selector: String,
        /// Why the click cannot be delivered
        reason: String,
    },

    /// A `click` step failed; aborts the whole session.
    #[error("Click failed: {source}")]
    ClickFailed {
        /// Why the click could not be delivered
        #[source]
        source: Box<Error>,
    },

    /// The driven application stopped processing events unexpectedly.
    #[error("Session failed: {message}")]
    SessionFailed {
        /// Description of the failure
        message: String,
    },

    /// Timeout error.
    ///
    /// Occurs when an operation exceeds its configured timeout limit.
    #[error("{operation} timed out after {}", display_limit(.limit))]
    Timeout {
        /// Name of the operation that timed out
        operation: String,
        /// Limit that was exceeded
        limit: Duration,
    },

    /// Filesystem or process I/O failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being done when the failure happened
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when tool parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Wraps an I/O error with a short description of the failed step.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_core::Error;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    /// let err = Error::io("reading task file", io);
    /// assert_eq!(err.to_string(), "reading task file: missing");
    /// ```
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if the source text could not be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_core::Error;
    ///
    /// let err = Error::Syntax { message: "expected `=`".to_string() };
    /// assert!(err.is_syntax_error());
    /// ```
    #[must_use]
    pub const fn is_syntax_error(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns `true` if entry-point resolution failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_core::Error;
    ///
    /// assert!(Error::NoAppFound.is_entry_error());
    /// assert!(Error::ClassNotFound { class: "Demo".into() }.is_entry_error());
    /// ```
    #[must_use]
    pub const fn is_entry_error(&self) -> bool {
        matches!(
            self,
            Self::NoAppFound | Self::ClassNotFound { .. } | Self::AmbiguousEntry { .. }
        )
    }

    /// Returns `true` if a selector failed to resolve or parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_core::Error;
    ///
    /// let err = Error::NoMatches { selector: "#missing".to_string() };
    /// assert!(err.is_selector_error());
    /// ```
    #[must_use]
    pub const fn is_selector_error(&self) -> bool {
        matches!(
            self,
            Self::NoMatches { .. } | Self::InvalidSelector { .. } | Self::NotClickable { .. }
        )
    }

    /// Returns `true` if this is a timeout error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use tui_core::Error;
    ///
    /// let err = Error::Timeout {
    ///     operation: "Session".to_string(),
    ///     limit: Duration::from_secs(30),
    /// };
    /// assert!(err.is_timeout());
    /// ```
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Whole seconds as `5s`, anything else in milliseconds.
fn display_limit(limit: &Duration) -> String {
    if limit.subsec_nanos() == 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{}ms", limit.as_millis())
    }
}

/// Result type alias for TUI Builder operations.
///
/// # Examples
///
/// ```
/// use tui_core::{Error, Result};
///
/// fn terminal_width(value: u16) -> Result<u16> {
///     if value == 0 {
///         return Err(Error::ConfigError {
///             message: "width must be non-zero".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(terminal_width(80).is_ok());
/// assert!(terminal_width(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::Syntax {
            message: "TOML parse error at line 1".to_string(),
        };
        assert_eq!(err.to_string(), "Syntax error: TOML parse error at line 1");
        assert!(err.is_syntax_error());
        assert!(!err.is_entry_error());
    }

    #[test]
    fn test_entry_errors() {
        assert_eq!(Error::NoAppFound.to_string(), "No App class found");

        let err = Error::ClassNotFound {
            class: "CounterApp".to_string(),
        };
        assert_eq!(err.to_string(), "Class CounterApp not found");

        let err = Error::AmbiguousEntry {
            classes: vec!["A".to_string(), "B".to_string()],
        };
        assert!(err.to_string().contains("A, B"));
        assert!(err.is_entry_error());
    }

    #[test]
    fn test_selector_errors() {
        let err = Error::NoMatches {
            selector: "#nope".to_string(),
        };
        assert_eq!(err.to_string(), "No nodes match '#nope'");
        assert!(err.is_selector_error());

        let err = Error::InvalidSelector {
            selector: "a[b]".to_string(),
            reason: "attribute selectors are not supported".to_string(),
        };
        assert!(err.is_selector_error());
    }

    #[test]
    fn test_click_failed_wraps_cause() {
        let err = Error::ClickFailed {
            source: Box::new(Error::NoMatches {
                selector: "#go".to_string(),
            }),
        };
        assert_eq!(err.to_string(), "Click failed: No nodes match '#go'");
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout {
            operation: "Session".to_string(),
            limit: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "Session timed out after 5s");
        assert!(err.is_timeout());

        let err = Error::Timeout {
            operation: "Session".to_string(),
            limit: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "Session timed out after 250ms");
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = Error::io(
            "staging source",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "staging source: denied");
    }

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "bad".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_timeout());
    }
}
