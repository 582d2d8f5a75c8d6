//! Error types for rule execution and fix application.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a package manifest through the check context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}")]
    Read {
        /// Path to the manifest file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid JSON.
    #[error("failed to parse manifest {path}")]
    Parse {
        /// Path to the manifest file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest root is valid JSON but not an object.
    #[error("manifest {path} is not a JSON object")]
    NotAnObject {
        /// Path to the manifest file.
        path: PathBuf,
    },
}

/// Fatal errors raised synchronously out of a rule's `check`.
///
/// Drift findings are never represented here; they are [`Diagnostic`]s
/// registered on the check context. A `RuleError` means the check itself
/// could not run (bad configuration or a broken environment).
///
/// [`Diagnostic`]: crate::diagnostic::Diagnostic
#[derive(Debug, Error)]
pub enum RuleError {
    /// A configured template file could not be read.
    #[error("failed to read template file {path}")]
    TemplateRead {
        /// Path the template reference resolved to.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing target file could not be read.
    #[error("failed to read {path}")]
    TargetRead {
        /// Path to the target file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raw rule options did not decode against the rule's options type.
    #[error("invalid options for rule `{rule}`")]
    InvalidOptions {
        /// Identifier of the rule the options were meant for.
        rule: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest access through the context failed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Errors raised while applying a [`Fix`](crate::diagnostic::Fix).
#[derive(Debug, Error)]
pub enum FixError {
    /// The target file could not be deleted.
    #[error("failed to delete {path}")]
    Delete {
        /// Path to the file being deleted.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Path to the file being written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
