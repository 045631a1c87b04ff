//! Staging and loading application sources.
//!
//! Source text is written to a uniquely named temporary file and the
//! document is read back from there, so each session works from its own
//! isolated copy. The entry point is resolved by name, never guessed from
//! the text.

use crate::app::App;
use crate::document::{AppDecl, AppDocument};
use crate::layout::Size;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use tui_core::{Error, Result};

/// A source staged in a temporary file.
///
/// The file is removed by [`StagedSource::close`], or on drop if `close` is
/// never reached.
#[derive(Debug)]
pub struct StagedSource {
    file: NamedTempFile,
}

/// Writes `source` to a fresh temporary file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn stage(source: &str) -> Result<StagedSource> {
    let mut file = tempfile::Builder::new()
        .prefix("tui-app-")
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::io("failed to create staging file", e))?;

    file.write_all(source.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| Error::io("failed to write staging file", e))?;

    debug!(path = %file.path().display(), bytes = source.len(), "source staged");
    Ok(StagedSource { file })
}

impl StagedSource {
    /// Location of the staged copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads and parses the staged copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Syntax`] if it does not parse.
    pub fn load(&self) -> Result<AppDocument> {
        let text = std::fs::read_to_string(self.path())
            .map_err(|e| Error::io("failed to read staged source", e))?;
        AppDocument::parse(&text)
    }

    /// Deletes the staged copy. Failures are logged, never returned.
    pub fn close(self) {
        let path = self.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!(path = %path.display(), "staging file removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove staging file"),
        }
    }
}

/// Picks the application type to run.
///
/// With `entry` the named class must be declared. Without it the document
/// must declare exactly one application type.
///
/// # Errors
///
/// Returns [`Error::NoAppFound`], [`Error::ClassNotFound`] or
/// [`Error::AmbiguousEntry`].
///
/// # Examples
///
/// ```
/// use tui_harness::document::AppDocument;
/// use tui_harness::loader::resolve_entry;
///
/// let document = AppDocument::parse("[[app]]\nclass = \"A\"\n\n[[app]]\nclass = \"B\"\n").unwrap();
/// assert_eq!(resolve_entry(&document, Some("B")).unwrap().class, "B");
/// assert!(resolve_entry(&document, None).is_err());
/// ```
pub fn resolve_entry<'a>(document: &'a AppDocument, entry: Option<&str>) -> Result<&'a AppDecl> {
    match entry {
        Some(class) => document.find_app(class).ok_or_else(|| Error::ClassNotFound {
            class: class.to_string(),
        }),
        None => match document.app.as_slice() {
            [] => Err(Error::NoAppFound),
            [only] => Ok(only),
            several => Err(Error::AmbiguousEntry {
                classes: several.iter().map(|a| a.class.clone()).collect(),
            }),
        },
    }
}

/// Resolves the entry point and instantiates it.
///
/// # Errors
///
/// Returns entry resolution errors and any error from [`App::load`].
pub fn load_app(document: &AppDocument, entry: Option<&str>, size: Size) -> Result<App> {
    let decl = resolve_entry(document, entry)?;
    debug!(app = %decl.class, %size, "instantiating application");
    App::load(document, decl, size)
}
