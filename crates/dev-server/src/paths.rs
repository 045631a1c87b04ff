//! Confinement of caller-supplied paths and names.
//!
//! Resolution is lexical: `..` may not climb above the root and absolute
//! paths must already lie under it. Symlinks inside the root are followed by
//! the filesystem as usual.

use crate::error::{DevError, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves `candidate` against `root`, rejecting anything that would leave
/// it.
///
/// # Errors
///
/// Returns [`DevError::OutsideRoot`] if the path escapes `root`.
///
/// # Examples
///
/// ```
/// use dev_server::paths::resolve_within;
/// use std::path::Path;
///
/// let root = Path::new("/project");
/// assert_eq!(
///     resolve_within(root, "src/../tests/a.rs").unwrap(),
///     Path::new("/project/tests/a.rs")
/// );
/// assert_eq!(resolve_within(root, "/project/src").unwrap(), Path::new("/project/src"));
/// assert!(resolve_within(root, "/etc/passwd").is_err());
/// ```
pub fn resolve_within(root: &Path, candidate: &str) -> Result<PathBuf> {
    let outside = || DevError::OutsideRoot {
        path: candidate.to_string(),
    };

    let path = Path::new(candidate);
    let relative = if path.is_absolute() {
        path.strip_prefix(root).map_err(|_| outside())?
    } else {
        path
    };

    let mut resolved = root.to_path_buf();
    let mut depth = 0_usize;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(outside());
                }
                resolved.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }

    Ok(resolved)
}

/// Validates a name used directly as a file name.
///
/// Names must be non-empty, must not be `.` or `..`, and must not contain
/// path separators or control characters.
///
/// # Errors
///
/// Returns [`DevError::InvalidName`] describing the first problem found.
pub fn validate_file_name(kind: &'static str, name: &str) -> Result<()> {
    let invalid = |reason: &str| DevError::InvalidName {
        kind,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("cannot be '.' or '..'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("cannot contain path separators"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("cannot contain control characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_stay_inside() {
        let root = Path::new("/work/project");
        assert_eq!(
            resolve_within(root, "./src/lib.rs").unwrap(),
            Path::new("/work/project/src/lib.rs")
        );
        assert_eq!(resolve_within(root, "").unwrap(), root);
        assert_eq!(resolve_within(root, "a/..").unwrap(), root);
    }

    #[test]
    fn test_escapes_rejected() {
        let root = Path::new("/work/project");
        for candidate in ["..", "../other", "src/../../other", "/work/other", "/work"] {
            assert!(
                matches!(
                    resolve_within(root, candidate),
                    Err(DevError::OutsideRoot { .. })
                ),
                "{candidate}"
            );
        }
    }

    #[test]
    fn test_file_names() {
        assert!(validate_file_name("task", "20260101_120000").is_ok());
        assert!(validate_file_name("template", "module.rs.tmpl").is_ok());
        for name in ["", ".", "..", "a/b", "a\\b", "a\nb"] {
            assert!(validate_file_name("task", name).is_err(), "{name:?}");
        }
    }
}
