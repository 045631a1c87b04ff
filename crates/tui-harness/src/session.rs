//! Headless session driving.
//!
//! A session stages an application source, instantiates its entry point on a
//! virtual terminal, applies a list of [`SessionAction`]s in order and
//! captures the text of the active screen. Public operations never fail:
//! every error becomes a [`SessionResult`] with `success == false`.
//!
//! # Examples
//!
//! ```
//! use tui_core::SessionAction;
//! use tui_harness::session::{SessionOptions, drive_session};
//!
//! let source = r#"
//! [[app]]
//! class = "Counter"
//!
//! [[app.widgets]]
//! type = "Digits"
//! id = "count"
//! text = "0"
//!
//! [[app.widgets]]
//! type = "Button"
//! id = "plus"
//! text = "+1"
//! on_press = "increment('#count')"
//! "#;
//!
//! let result = drive_session(
//!     source,
//!     &[SessionAction::click("#plus"), SessionAction::press(["enter"])],
//!     &SessionOptions::default(),
//! );
//! assert!(result.success);
//! assert_eq!(result.output, "2\n+1");
//! ```

use crate::bridge;
use crate::document::AppDocument;
use crate::layout::Size;
use crate::loader;
use crate::pilot::Pilot;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{debug, warn};
use tui_core::{
    EMPTY_RENDER_PLACEHOLDER, Error, HarnessConfig, Result, SessionAction, SessionResult,
};

/// Parameters of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Application class to run; required when the source declares several
    pub entry: Option<String>,
    /// Virtual terminal size
    pub size: Size,
    /// Upper bound for the whole session
    pub timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&HarnessConfig::default())
    }
}

impl From<&HarnessConfig> for SessionOptions {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            entry: None,
            size: Size::new(config.width, config.height),
            timeout: config.timeout(),
        }
    }
}

impl SessionOptions {
    /// Sets the entry class.
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }
}

/// Runs a session from synchronous code.
///
/// Syntax errors are reported before anything is staged or any runtime is
/// started. The session itself runs through [`bridge::run_blocking`], so
/// this may be called with or without a tokio runtime on the current thread.
#[must_use]
pub fn drive_session(
    source: &str,
    actions: &[SessionAction],
    options: &SessionOptions,
) -> SessionResult {
    if let Err(e) = AppDocument::parse(source) {
        debug!(error = %e, "source rejected before staging");
        return SessionResult::failure(e.to_string());
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        bridge::run_blocking(drive_session_async(source, actions, options))
    }));

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => SessionResult::failure(e.to_string()),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "session panicked");
            SessionResult::failure(message)
        }
    }
}

/// Runs a session on the current runtime.
///
/// Failures are reported in the returned [`SessionResult`], as with
/// [`drive_session`].
///
/// # Panics
///
/// Panics if polled outside a tokio runtime, or on a runtime built without
/// the time driver (`enable_time` or `enable_all`). [`drive_session`]
/// always supplies a suitable runtime.
pub async fn drive_session_async(
    source: &str,
    actions: &[SessionAction],
    options: &SessionOptions,
) -> SessionResult {
    if let Err(e) = AppDocument::parse(source) {
        return SessionResult::failure(e.to_string());
    }

    let staged = match loader::stage(source) {
        Ok(staged) => staged,
        Err(e) => return SessionResult::failure(e.to_string()),
    };

    let outcome = with_timeout(options.timeout, async {
        let document = staged.load()?;
        let app = loader::load_app(&document, options.entry.as_deref(), options.size)?;
        let pilot = Pilot::start(app);
        let applied = apply_actions(&pilot, actions).await;
        let captured = match applied {
            Ok(()) => pilot.text_content().await,
            Err(e) => Err(e),
        };
        pilot.finish().await?;
        captured
    })
    .await;

    staged.close();

    match outcome {
        Ok(text) => {
            let output = text.unwrap_or_else(|| EMPTY_RENDER_PLACEHOLDER.to_string());
            debug!(bytes = output.len(), "session finished");
            SessionResult::success(output)
        }
        Err(e) => {
            debug!(error = %e, "session failed");
            SessionResult::failure(e.to_string())
        }
    }
}

async fn apply_actions(pilot: &Pilot, actions: &[SessionAction]) -> Result<()> {
    for (step, action) in actions.iter().enumerate() {
        debug!(step, ?action, "applying action");
        match action {
            SessionAction::Press { keys } if keys.is_empty() => {
                return Err(Error::InvalidAction {
                    action: "press".to_string(),
                    reason: "at least one key is required".to_string(),
                });
            }
            SessionAction::Press { keys } => pilot.press(keys.as_slice()).await?,
            SessionAction::Click { selector } => {
                pilot
                    .click(selector)
                    .await
                    .map_err(|e| Error::ClickFailed {
                        source: Box::new(e),
                    })?;
            }
        }
    }
    Ok(())
}

async fn with_timeout<T>(
    limit: Duration,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or_else(|_| {
            Err(Error::Timeout {
                operation: "Session".to_string(),
                limit,
            })
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "session panicked".to_string())
}

/// Session operations bound to one set of options.
///
/// # Examples
///
/// ```
/// use tui_harness::session::Harness;
///
/// let harness = Harness::default();
/// let result = harness.simulate_keys(
///     "[[app]]\nclass = \"A\"\n\n[[app.widgets]]\ntype = \"Input\"\n",
///     &["o", "k"],
/// );
/// assert_eq!(result.output, "ok");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Harness {
    options: SessionOptions,
}

impl Harness {
    /// Creates a harness with the given options.
    #[must_use]
    pub const fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    /// Options every session runs with.
    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Starts the app, lets it render and captures its text.
    #[must_use]
    pub fn run_app_pilot(&self, source: &str) -> SessionResult {
        drive_session(source, &[], &self.options)
    }

    /// Captures the initial render; same as [`Harness::run_app_pilot`].
    #[must_use]
    pub fn take_snapshot(&self, source: &str) -> SessionResult {
        self.run_app_pilot(source)
    }

    /// Presses `keys` one at a time, then captures.
    #[must_use]
    pub fn simulate_keys(&self, source: &str, keys: &[impl AsRef<str>]) -> SessionResult {
        let actions: Vec<_> = keys
            .iter()
            .map(|key| SessionAction::press([key.as_ref()]))
            .collect();
        drive_session(source, &actions, &self.options)
    }

    /// Clicks the widget matching `selector`, then captures.
    #[must_use]
    pub fn simulate_click(&self, source: &str, selector: &str) -> SessionResult {
        drive_session(source, &[SessionAction::click(selector)], &self.options)
    }
}
