//! Diagnostics and deferred fix commands.
//!
//! A rule's `check` reports drift as [`Diagnostic`] values and never touches
//! the filesystem itself. The repair is carried as a [`Fix`] command that the
//! host interprets later, zero or one time per diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FixError;

/// A deferred repair action attached to a diagnostic.
///
/// Fixes are plain data describing the mutation, so detection stays
/// side-effect-free and dry-run mode costs nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    /// Delete the file at `path`.
    DeleteFile {
        /// File to remove.
        path: PathBuf,
    },
    /// Write `contents` to `path`, creating missing ancestor directories and
    /// overwriting any existing file.
    WriteFile {
        /// File to write.
        path: PathBuf,
        /// Full UTF-8 contents to write.
        contents: String,
    },
}

impl Fix {
    /// Returns the path this fix mutates.
    pub fn target(&self) -> &Path {
        match self {
            Fix::DeleteFile { path } => path,
            Fix::WriteFile { path, .. } => path,
        }
    }

    /// Applies the fix to the filesystem.
    pub fn apply(&self) -> Result<(), FixError> {
        match self {
            Fix::DeleteFile { path } => {
                fs::remove_file(path).map_err(|source| FixError::Delete {
                    path: path.clone(),
                    source,
                })
            }
            Fix::WriteFile { path, contents } => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|source| FixError::Write {
                        path: path.clone(),
                        source,
                    })?;
                }
                fs::write(path, contents).map_err(|source| FixError::Write {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// A reported drift finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File the finding is about.
    pub path: PathBuf,
    /// Short human-readable description.
    pub message: String,
    /// Expanded structural diff between expected and actual state.
    pub long_message: Option<String>,
    /// Optional deferred repair.
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Creates a diagnostic with the required fields.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            long_message: None,
            fix: None,
        }
    }

    /// Builder method to attach an expanded diff.
    pub fn with_long_message(mut self, long_message: impl Into<String>) -> Self {
        self.long_message = Some(long_message.into());
        self
    }

    /// Builder method to attach a fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns true if this diagnostic carries a repair.
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}
