//! MCP server for building terminal applications.
//!
//! Applications are TOML documents declaring an `[[app]]`, optional
//! `[[screen]]`s and custom `[[widget]]` types (see
//! [`tui_harness::document`]). This server helps an assistant write them and
//! then proves they work by running them headlessly.
//!
//! # Architecture
//!
//! - [`docs`]: widget, container, CSS and layout reference material
//! - [`generate`]: Handlebars-backed source and test scaffolding
//! - [`validate`]: CSS, lint and accessibility checks
//! - [`resources`]: `tui://` URIs over the reference material
//! - [`service`]: the MCP tool, prompt and resource surface
//!
//! # Workflow
//!
//! 1. Claude reads `tui://widgets/...` or calls `list_widgets`
//! 2. Claude calls `generate_app` and edits the result
//! 3. Claude checks it with `validate_css`, `lint_widget` and
//!    `check_accessibility`
//! 4. Claude runs it with `run_app_pilot`, `simulate_keys` or
//!    `drive_session` and compares captures with `compare_snapshots`
//!
//! # Examples
//!
//! ```no_run
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//! use tui_harness::session::SessionOptions;
//! use tui_server::TuiBuilderService;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = TuiBuilderService::new(SessionOptions::default())?
//!     .serve(stdio())
//!     .await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod docs;
pub mod generate;
pub mod resources;
pub mod service;
pub mod types;
pub mod validate;

pub use service::TuiBuilderService;
pub use types::{
    CompareSnapshotsParams, ComponentList, DriveSessionParams, GenerateAppParams,
    GenerateScreenParams, GenerateWidgetParams, GeneratedSource, InspectSourceParams,
    SimulateClickParams, SimulateKeysParams, SourceParams, ValidateCssParams,
};
