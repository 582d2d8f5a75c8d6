//! packlint Rule Contract Library
//!
//! This crate defines the seam between packlint rules and the host engine
//! that runs them: the per-package [`CheckContext`], the [`Diagnostic`] and
//! deferred [`Fix`] commands rules produce, and the [`Rule`] trait they
//! implement.
//!
//! The contract is two-phase. `check` inspects a package and registers
//! diagnostics without touching the filesystem; each diagnostic may carry a
//! `Fix` command that the host applies later, or never in dry-run mode.
//!
//! # Example
//!
//! ```no_run
//! use packlint_core::{CheckContext, Rule};
//!
//! fn run_rule<R: Rule>(rule: &R, raw: &serde_json::Value) -> Result<(), packlint_core::RuleError> {
//!     let ctx = CheckContext::new("/ws/packages/app", "/ws");
//!     let options = rule.decode_options(raw)?;
//!     rule.check(&ctx, &options)?;
//!     for diagnostic in ctx.take_diagnostics() {
//!         eprintln!("{}: {}", diagnostic.path.display(), diagnostic.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod diagnostic;
pub mod error;
pub mod json;
pub mod rule;

// Re-export commonly used types at the crate root
pub use context::CheckContext;
pub use diagnostic::{Diagnostic, Fix};
pub use error::{ContextError, FixError, RuleError};
pub use json::{read_json, to_json_string, Manifest};
pub use rule::Rule;
