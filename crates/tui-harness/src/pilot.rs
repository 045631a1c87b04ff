//! Drive a running [`App`] from test code.
//!
//! [`Pilot::start`] moves the application onto a tokio task that owns it
//! and processes commands from a channel one at a time. Every pilot call
//! waits for the task to acknowledge its command, so after `press` returns
//! the key has been fully handled.
//!
//! # Examples
//!
//! ```
//! use tui_harness::app::App;
//! use tui_harness::document::AppDocument;
//! use tui_harness::layout::Size;
//! use tui_harness::pilot::Pilot;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tui_core::Result<()> {
//! let document = AppDocument::parse(r#"
//! [[app]]
//! class = "Greeter"
//!
//! [[app.widgets]]
//! type = "Input"
//! id = "name"
//! "#)?;
//! let app = App::load(&document, &document.app[0], Size::default())?;
//!
//! let pilot = Pilot::start(app);
//! pilot.press(&["h", "i"]).await?;
//! assert_eq!(pilot.text_content().await?.as_deref(), Some("hi"));
//! pilot.finish().await?;
//! # Ok(())
//! # }
//! ```

use crate::app::App;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;
use tui_core::{Error, Result};

type Inspector = Box<dyn FnOnce(&App) + Send>;

enum Command {
    Press(String, oneshot::Sender<Result<()>>),
    Click(String, oneshot::Sender<Result<()>>),
    Inspect(Inspector),
}

/// Handle to an application running on its own task.
#[derive(Debug)]
pub struct Pilot {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<App>,
}

impl Pilot {
    /// Starts `app` on a new task of the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(app: App) -> Self {
        let (commands, receiver) = mpsc::channel(16);
        let task = tokio::spawn(event_loop(app, receiver));
        Self { commands, task }
    }

    /// Presses each key in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while handling a key, or
    /// [`Error::SessionFailed`] if the application task is gone.
    pub async fn press(&self, keys: &[impl AsRef<str>]) -> Result<()> {
        for key in keys {
            let (ack, done) = oneshot::channel();
            self.send(Command::Press(key.as_ref().to_string(), ack))
                .await?;
            done.await.map_err(|_| stopped())??;
        }
        Ok(())
    }

    /// Clicks the first widget matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector matches nothing, the widget cannot
    /// be clicked, or the application task is gone.
    pub async fn click(&self, selector: &str) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(Command::Click(selector.to_string(), ack)).await?;
        done.await.map_err(|_| stopped())?
    }

    /// Runs `f` against the live application and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionFailed`] if the application task is gone.
    pub async fn inspect<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&App) -> R + Send + 'static,
    {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Inspect(Box::new(move |app: &App| {
            let _ = reply.send(f(app));
        })))
        .await?;
        answer.await.map_err(|_| stopped())
    }

    /// Captures the text of the active screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionFailed`] if the application task is gone.
    pub async fn text_content(&self) -> Result<Option<String>> {
        self.inspect(App::text_content).await
    }

    /// Stops the event loop and returns the application.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionFailed`] if the application task panicked or
    /// was cancelled.
    pub async fn finish(self) -> Result<App> {
        drop(self.commands);
        self.task.await.map_err(|e| Error::SessionFailed {
            message: format!("application task ended abnormally: {e}"),
        })
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).await.map_err(|_| stopped())
    }
}

fn stopped() -> Error {
    Error::SessionFailed {
        message: "application event loop stopped".to_string(),
    }
}

async fn event_loop(mut app: App, mut commands: mpsc::Receiver<Command>) -> App {
    debug!(app = %app.class(), "event loop started");
    while let Some(command) = commands.recv().await {
        match command {
            Command::Press(key, ack) => {
                let _ = ack.send(app.press(&key));
            }
            Command::Click(selector, ack) => {
                let _ = ack.send(app.click(&selector));
            }
            Command::Inspect(inspect) => inspect(&app),
        }
        tokio::task::yield_now().await;
    }
    debug!(app = %app.class(), "event loop finished");
    app
}
