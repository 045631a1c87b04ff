//! Core records, errors and configuration for TUI Builder.
//!
//! This crate provides the foundational types used across the harness and
//! the MCP servers.
//!
//! # Architecture
//!
//! The core consists of:
//! - Result records returned by every tool (`SessionResult`,
//!   `ComparisonResult`, `ValidationResult`)
//! - The session input type (`SessionAction`)
//! - Error hierarchy with contextual information
//! - TOML configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub use config::{
    CONFIG_ENV_VAR, Config, GeneralConfig, HarnessConfig, ProjectConfig, default_config_path,
};
pub use error::{Error, Result};
pub use types::{
    ComparisonResult, EMPTY_RENDER_PLACEHOLDER, SessionAction, SessionResult, ValidationResult,
};
