//! MCP servers for working on a project.
//!
//! Two servers live here:
//!
//! - [`ProjectDevService`] (`project-dev` binary): runs the configured test,
//!   lint and format commands and keeps agent tasks, learnings and templates
//!   under the project's agents directory
//! - [`StarterService`] (`starter-mcp` binary): a minimal server to copy when
//!   starting a new one
//!
//! # Agents directory
//!
//! ```text
//! .agents/
//! ├── tasks/       # one Markdown file per task, with frontmatter
//! ├── learnings/   # one Markdown file per learning
//! └── templates/   # files with {{name}} placeholders
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod commands;
pub mod error;
pub mod learnings;
pub mod paths;
pub mod service;
pub mod starter;
pub mod tasks;
pub mod templates;
pub mod types;

pub use error::{DevError, Result};
pub use service::ProjectDevService;
pub use starter::StarterService;
