//! Error types for project development operations.

/// Result type for project development operations.
pub type Result<T> = std::result::Result<T, DevError>;

/// Errors that can occur while serving project development tools.
#[derive(thiserror::Error, Debug)]
pub enum DevError {
    /// A caller-supplied path resolves outside the project root.
    ///
    /// # Examples
    ///
    /// ```
    /// use dev_server::DevError;
    /// use dev_server::paths::resolve_within;
    /// use std::path::Path;
    ///
    /// let err = resolve_within(Path::new("/project"), "../etc/passwd").unwrap_err();
    /// assert!(matches!(err, DevError::OutsideRoot { .. }));
    /// ```
    #[error("Path escapes the project root: {path}")]
    OutsideRoot {
        /// Path as supplied
        path: String,
    },

    /// A name used as a file stem is not usable.
    #[error("Invalid {kind} '{name}': {reason}")]
    InvalidName {
        /// What the name identifies (task, template)
        kind: &'static str,
        /// Name as supplied
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// A configured command could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configured command is empty.
    #[error("Command for {purpose} is empty")]
    EmptyCommand {
        /// What the command is for
        purpose: &'static str,
    },

    /// Filesystem failure.
    #[error("{context}: {source}")]
    Io {
        /// What was being done when the failure happened
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DevError {
    /// Wraps an I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if the error was caused by caller input rather than
    /// the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use dev_server::DevError;
    ///
    /// let err = DevError::OutsideRoot { path: "/etc".to_string() };
    /// assert!(err.is_invalid_input());
    ///
    /// let err = DevError::EmptyCommand { purpose: "tests" };
    /// assert!(!err.is_invalid_input());
    /// ```
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::OutsideRoot { .. } | Self::InvalidName { .. })
    }
}
