//! Headless session harness for TUI Builder.
//!
//! Loads an application source, runs it on a virtual terminal, drives it
//! with key presses and clicks and captures the rendered text.
//!
//! # Architecture
//!
//! - [`bridge`]: runs async work from sync callers, with or without an
//!   active runtime
//! - [`document`]: the TOML application source format
//! - [`action`], [`selector`]: action strings and widget selectors
//! - [`widget`], [`layout`], [`app`]: the widget runtime
//! - [`pilot`]: event loop and remote control for a running app
//! - [`loader`]: staging and entry-point resolution
//! - [`session`]: the session-driving operations
//! - [`snapshot`]: text snapshot comparison
//!
//! # Examples
//!
//! ```
//! use tui_harness::session::Harness;
//!
//! let result = Harness::default().run_app_pilot(
//!     "[[app]]\nclass = \"Hello\"\n\n[[app.widgets]]\ntype = \"Static\"\ntext = \"Hello\"\n",
//! );
//! assert!(result.success);
//! assert_eq!(result.output, "Hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod action;
pub mod app;
pub mod bridge;
pub mod document;
pub mod layout;
pub mod loader;
pub mod pilot;
pub mod selector;
pub mod session;
pub mod snapshot;
pub mod widget;

pub use session::{Harness, SessionOptions, drive_session, drive_session_async};
pub use snapshot::compare_snapshots;
