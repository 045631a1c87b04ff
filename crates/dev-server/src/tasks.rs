//! Markdown task files with a `---` frontmatter header.
//!
//! ```text
//! ---
//! title: Port the parser
//! status: pending
//! created: 2026-01-02T03:04:05
//! ---
//!
//! # Port the parser
//!
//! No description provided.
//! ```

use crate::error::{DevError, Result};
use crate::paths::validate_file_name;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const FRONTMATTER: &str = "---";
const COMPLETED: &str = "completed";

/// Fields of one task: `id`, `file` and every frontmatter key.
pub type Task = BTreeMap<String, String>;

/// A task written by [`TaskStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// File stem of the task
    pub task_id: String,
    /// Path of the task file
    pub file: PathBuf,
}

/// Task files in one directory.
#[derive(Debug, Clone)]
pub struct TaskStore {
    dir: PathBuf,
}

impl TaskStore {
    /// Creates a store over `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lists tasks ordered by id, optionally keeping only one status.
    ///
    /// A missing directory holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a task file cannot be read.
    pub fn list(&self, status: Option<&str>) -> Result<Vec<Task>> {
        let mut files = markdown_files(&self.dir)?;
        files.sort();

        let mut tasks = Vec::with_capacity(files.len());
        for file in files {
            let content = fs::read_to_string(&file)
                .map_err(|e| DevError::io(format!("failed to read {}", file.display()), e))?;

            let mut task = Task::new();
            task.insert("id".to_string(), stem(&file));
            task.insert("file".to_string(), file.display().to_string());
            for (key, value) in parse_frontmatter(&content) {
                task.entry(key).or_insert(value);
            }

            if status.is_none_or(|wanted| task.get("status").map(String::as_str) == Some(wanted)) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Writes a new pending task named after the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn add(&self, title: &str, description: Option<&str>) -> Result<NewTask> {
        self.add_at(title, description, Local::now().naive_local())
    }

    fn add_at(&self, title: &str, description: Option<&str>, now: NaiveDateTime) -> Result<NewTask> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DevError::io(format!("failed to create {}", self.dir.display()), e))?;

        let base = now.format("%Y%m%d_%H%M%S").to_string();
        let mut task_id = base.clone();
        let mut counter = 1;
        while self.task_path(&task_id).exists() {
            task_id = format!("{base}_{counter}");
            counter += 1;
        }

        let title = title.replace(['\r', '\n'], " ");
        let content = format!(
            "---\ntitle: {title}\nstatus: pending\ncreated: {}\n---\n\n# {title}\n\n{}\n",
            now.format("%Y-%m-%dT%H:%M:%S"),
            description.unwrap_or("No description provided."),
        );

        let file = self.task_path(&task_id);
        fs::write(&file, content)
            .map_err(|e| DevError::io(format!("failed to write {}", file.display()), e))?;
        debug!(task_id, "task created");

        Ok(NewTask { task_id, file })
    }

    /// Sets a task's status to `completed`. Returns `false` if no such task
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`DevError::InvalidName`] for ids that are not plain file
    /// stems, or an I/O error.
    pub fn complete(&self, task_id: &str) -> Result<bool> {
        validate_file_name("task", task_id)?;

        let file = self.task_path(task_id);
        if !file.is_file() {
            return Ok(false);
        }

        let content = fs::read_to_string(&file)
            .map_err(|e| DevError::io(format!("failed to read {}", file.display()), e))?;
        fs::write(&file, with_status(&content, COMPLETED))
            .map_err(|e| DevError::io(format!("failed to write {}", file.display()), e))?;
        debug!(task_id, "task completed");

        Ok(true)
    }

    fn task_path(&self, task_id: &str) -> PathBuf {
        self.dir.join(format!("{task_id}.md"))
    }
}

/// Markdown files directly inside `dir`; empty if `dir` does not exist.
pub(crate) fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries =
        fs::read_dir(dir).map_err(|e| DevError::io(format!("failed to read {}", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| DevError::io(format!("failed to read {}", dir.display()), e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(files)
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Splits `content` into its frontmatter header and the rest.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    content.strip_prefix(FRONTMATTER)?.split_once(FRONTMATTER)
}

fn parse_frontmatter(content: &str) -> BTreeMap<String, String> {
    split_frontmatter(content)
        .map(|(header, _)| {
            header
                .lines()
                .filter_map(|line| line.split_once(':'))
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn with_status(content: &str, status: &str) -> String {
    let Some((header, body)) = split_frontmatter(content) else {
        return format!("---\nstatus: {status}\n---\n\n{content}");
    };

    let mut found = false;
    let mut lines: Vec<String> = header
        .split('\n')
        .map(|line| match line.split_once(':') {
            Some((key, _)) if key.trim() == "status" => {
                found = true;
                format!("status: {status}")
            }
            _ => line.to_string(),
        })
        .collect();

    if !found {
        // keep the closing marker on its own line
        let closing = lines.pop().unwrap_or_default();
        lines.push(format!("status: {status}"));
        lines.push(closing);
    }

    format!("{FRONTMATTER}{}{FRONTMATTER}{body}", lines.join("\n"))
}
