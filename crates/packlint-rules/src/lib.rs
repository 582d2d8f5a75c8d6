//! packlint Built-in Rules
//!
//! Two check/fix rules over package directories:
//!
//! - [`FileContents`]: a file's contents must match an expected value coming
//!   from an inline template, a workspace-level template file, or a
//!   generator function.
//! - [`PackageOrder`]: top-level keys in `package.json` must follow a
//!   configured order.
//!
//! Both rules detect drift without touching the filesystem and attach a
//! deferred [`Fix`](packlint_core::Fix) command to each diagnostic.
//!
//! # Example
//!
//! ```no_run
//! use packlint_core::{CheckContext, Rule};
//! use packlint_rules::{FileContents, FileContentsOptions};
//!
//! let ctx = CheckContext::new("/ws/packages/app", "/ws");
//! let options = FileContentsOptions::template_file("LICENSE", "templates/LICENSE");
//! FileContents.check(&ctx, &options)?;
//!
//! for diagnostic in ctx.take_diagnostics() {
//!     if let Some(fix) = &diagnostic.fix {
//!         fix.apply()?;
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod diff;
pub mod file_contents;
pub mod package_order;

pub use file_contents::{ContentGenerator, ContentSource, FileContents, FileContentsOptions};
pub use package_order::{
    ComparatorFactory, KeyComparator, KeyOrder, PackageOrder, PackageOrderOptions,
};
