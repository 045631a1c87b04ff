//! File templates with `{{name}}` placeholders.

use crate::error::{DevError, Result};
use crate::paths::validate_file_name;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of [`TemplateStore::instantiate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instantiated {
    /// The file was written
    Created(PathBuf),
    /// No template with that name; carries the available names
    TemplateNotFound(Vec<String>),
    /// The destination already exists and was left untouched
    DestinationExists,
}

/// Templates stored as plain files in one directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Creates a store over `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Template file names, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn names(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| DevError::io(format!("failed to read {}", self.dir.display()), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| DevError::io(format!("failed to read {}", self.dir.display()), e))?
                .path();
            if path.is_file()
                && let Some(name) = path.file_name()
            {
                names.push(name.to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Writes `destination` from `template`, replacing each `{{key}}` with
    /// its value. Placeholders without a value are left as they are.
    ///
    /// Parent directories of `destination` are created.
    ///
    /// # Errors
    ///
    /// Returns [`DevError::InvalidName`] if `template` is not a plain file
    /// name, or an I/O error.
    pub fn instantiate(
        &self,
        template: &str,
        destination: &Path,
        variables: &BTreeMap<String, String>,
    ) -> Result<Instantiated> {
        validate_file_name("template", template)?;

        let source = self.dir.join(template);
        if !source.is_file() {
            return Ok(Instantiated::TemplateNotFound(self.names()?));
        }
        if destination.exists() {
            return Ok(Instantiated::DestinationExists);
        }

        let text = fs::read_to_string(&source)
            .map_err(|e| DevError::io(format!("failed to read {}", source.display()), e))?;
        let text = substitute(&text, variables);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DevError::io(format!("failed to create {}", parent.display()), e))?;
        }
        fs::write(destination, text)
            .map_err(|e| DevError::io(format!("failed to write {}", destination.display()), e))?;
        debug!(template, destination = %destination.display(), "template instantiated");

        Ok(Instantiated::Created(destination.to_path_buf()))
    }
}

fn substitute(text: &str, variables: &BTreeMap<String, String>) -> String {
    variables
        .iter()
        .fold(text.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{{{key}}}}}"), value)
        })
}
