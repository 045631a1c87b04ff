//! Project learnings, one Markdown file each.

use crate::error::{DevError, Result};
use crate::tasks::markdown_files;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MAX_SLUG_CHARS: usize = 50;

/// Learning files in one directory.
#[derive(Debug, Clone)]
pub struct LearningStore {
    dir: PathBuf,
}

impl LearningStore {
    /// Creates a store over `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes a learning to a file named after its title. Existing files
    /// are never overwritten; a numeric suffix is added instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn add(&self, category: &str, title: &str, content: &str) -> Result<PathBuf> {
        self.add_on(category, title, content, Local::now().date_naive())
    }

    fn add_on(&self, category: &str, title: &str, content: &str, date: NaiveDate) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DevError::io(format!("failed to create {}", self.dir.display()), e))?;

        let slug = slug(title);
        let mut file = self.dir.join(format!("{slug}.md"));
        let mut counter = 1;
        while file.exists() {
            file = self.dir.join(format!("{slug}-{counter}.md"));
            counter += 1;
        }

        let text = format!(
            "# {title}\n\n**Category:** {category}\n**Date:** {}\n\n## Learning\n\n{content}\n",
            date.format("%Y-%m-%d")
        );
        fs::write(&file, text)
            .map_err(|e| DevError::io(format!("failed to write {}", file.display()), e))?;
        debug!(file = %file.display(), category, "learning recorded");

        Ok(file)
    }

    /// Every learning in file-name order, as one Markdown document.
    ///
    /// # Errors
    ///
    /// Returns an error if a learning file cannot be read.
    pub fn all(&self) -> Result<String> {
        if !self.dir.is_dir() {
            return Ok("# No learnings yet".to_string());
        }

        let mut files = markdown_files(&self.dir)?;
        files.sort();

        let mut parts = vec!["# Project Learnings\n".to_string()];
        for file in files {
            let text = fs::read_to_string(&file)
                .map_err(|e| DevError::io(format!("failed to read {}", file.display()), e))?;
            parts.push(format!("\n---\n\n{text}"));
        }
        Ok(parts.join("\n"))
    }
}

/// File stem for a title: lowercase, dashes for anything but letters,
/// digits, `-` and `_`.
fn slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .take(MAX_SLUG_CHARS)
        .collect();

    if slug.chars().all(|c| c == '-') {
        "learning".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Use Arc for Shared State"), "use-arc-for-shared-state");
        assert_eq!(slug("../../etc"), "------etc");
        assert_eq!(slug("///"), "learning");
        assert_eq!(slug(&"x".repeat(80)).len(), MAX_SLUG_CHARS);
    }

    #[test]
    fn test_add_and_collect() {
        let temp = TempDir::new().unwrap();
        let store = LearningStore::new(temp.path().join("learnings"));
        assert_eq!(store.all().unwrap(), "# No learnings yet");

        let first = store.add_on("gotchas", "Blocking in async", "Use spawn_blocking.", day()).unwrap();
        let second = store.add_on("gotchas", "Blocking in async", "Again.", day()).unwrap();
        assert!(first.ends_with("blocking-in-async.md"));
        assert!(second.ends_with("blocking-in-async-1.md"));

        let text = fs::read_to_string(&first).unwrap();
        assert_eq!(
            text,
            "# Blocking in async\n\n**Category:** gotchas\n**Date:** 2026-03-04\n\n## Learning\n\nUse spawn_blocking.\n"
        );

        let all = store.all().unwrap();
        assert!(all.starts_with("# Project Learnings\n\n\n---\n\n# Blocking in async"));
        assert_eq!(all.matches("\n---\n").count(), 2);
        assert!(all.contains("Use spawn_blocking.") && all.contains("Again."));
    }
}
