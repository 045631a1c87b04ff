//! Configuration for the TUI Builder servers.
//!
//! Configuration is stored in TOML format. The file is looked up in this
//! order:
//! 1. An explicit path (the `--config` flag of the server binaries)
//! 2. The `TUI_BUILDER_CONFIG` environment variable
//! 3. `<config dir>/tui-builder/config.toml`
//!    (`~/.config` on Linux, `%APPDATA%` on Windows)
//!
//! A missing file yields the defaults.
//!
//! # Examples
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [harness]
//! width = 80
//! height = 24
//! timeout_seconds = 30
//!
//! [project]
//! root = "."
//! agents_dir = ".agents"
//! test_command = ["cargo", "test"]
//! lint_command = ["cargo", "clippy", "--all-targets"]
//! lint_fix_flag = "--fix"
//! format_command = ["cargo", "fmt"]
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "TUI_BUILDER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Session harness settings
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Project-dev server settings
    #[serde(default)]
    pub project: ProjectConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Virtual terminal and session limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Terminal width in cells
    pub width: u16,

    /// Terminal height in cells
    pub height: u16,

    /// Upper bound for one session-driving call
    pub timeout_seconds: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            timeout_seconds: 30,
        }
    }
}

impl HarnessConfig {
    /// Session timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Project layout and developer commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root; caller-supplied paths are confined to it
    pub root: PathBuf,

    /// Agent workspace directory, relative to `root`
    pub agents_dir: PathBuf,

    /// Command used by `run_tests`
    pub test_command: Vec<String>,

    /// Command used by `run_lint`
    pub lint_command: Vec<String>,

    /// Extra argument appended to the lint command when fixing
    pub lint_fix_flag: String,

    /// Command used by `format_code`
    pub format_command: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            agents_dir: PathBuf::from(".agents"),
            test_command: vec!["cargo".to_string(), "test".to_string()],
            lint_command: vec![
                "cargo".to_string(),
                "clippy".to_string(),
                "--all-targets".to_string(),
            ],
            lint_fix_flag: "--fix".to_string(),
            format_command: vec!["cargo".to_string(), "fmt".to_string()],
        }
    }
}

impl ProjectConfig {
    /// Absolute-or-relative path of the agent workspace.
    #[must_use]
    pub fn agents_path(&self) -> PathBuf {
        self.root.join(&self.agents_dir)
    }
}

impl Config {
    /// Parses configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML or fails
    /// validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_core::Config;
    ///
    /// let config = Config::from_toml_str("[harness]\nwidth = 120\n").unwrap();
    /// assert_eq!(config.harness.width, 120);
    /// assert_eq!(config.harness.height, 24);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when no file exists.
    ///
    /// `explicit` takes precedence over the environment variable and the
    /// per-user config directory. An explicit path that does not exist is an
    /// error; the implicit locations are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            return Self::load_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - terminal width or height is zero
    /// - the session timeout is zero
    /// - any developer command is empty
    pub fn validate(&self) -> Result<()> {
        if self.harness.width == 0 || self.harness.height == 0 {
            return Err(Error::ConfigError {
                message: "terminal size must be non-zero".to_string(),
            });
        }

        if self.harness.timeout_seconds == 0 {
            return Err(Error::ConfigError {
                message: "session timeout must be greater than zero".to_string(),
            });
        }

        for (name, command) in [
            ("test_command", &self.project.test_command),
            ("lint_command", &self.project.lint_command),
            ("format_command", &self.project.format_command),
        ] {
            if command.is_empty() {
                return Err(Error::ConfigError {
                    message: format!("{name} cannot be empty"),
                });
            }
        }

        Ok(())
    }
}

/// Per-user config file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tui-builder").join("config.toml"))
}
