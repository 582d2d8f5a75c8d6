//! Per-package check context.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::error::ContextError;
use crate::json::{self, Manifest};

/// Accessor bundle handed to a rule's `check` for one package.
///
/// The context resolves paths, reads the package manifest, and collects the
/// diagnostics the rule registers. One context is built per package per
/// check invocation; nothing is shared or cached across invocations, so the
/// host is free to check many packages concurrently with one context each.
pub struct CheckContext {
    package_dir: PathBuf,
    workspace_root: PathBuf,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CheckContext {
    /// Creates a context for a package inside a workspace.
    pub fn new(package_dir: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            workspace_root: workspace_root.into(),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Resolution root for a rule's target file paths.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Workspace root. Shared template files are resolved against this, not
    /// against the package directory.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Path to this package's manifest.
    pub fn package_json_path(&self) -> PathBuf {
        self.package_dir.join("package.json")
    }

    /// Reads this package's manifest. Every call re-reads the file.
    pub fn package_json(&self) -> Result<Manifest, ContextError> {
        json::read_json(&self.package_json_path())
    }

    /// Registers a drift finding.
    pub fn add_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if any diagnostic has been registered.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    /// Drains the registered diagnostics for the host to render or fix.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}
