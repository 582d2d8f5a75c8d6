//! The check/fix rule contract.

use serde::de::DeserializeOwned;

use crate::context::CheckContext;
use crate::error::RuleError;

/// A pluggable check/fix rule invoked by the host once per package.
///
/// A rule exposes two things to the host: `check`, which inspects one
/// package and registers zero or one [`Diagnostic`] on the context, and an
/// options type the host decodes raw configuration against before calling
/// `check`. Rules hold no state; the same rule value may serve any number of
/// concurrent check invocations.
///
/// `check` must never mutate the filesystem. Repairs travel as
/// [`Fix`] commands attached to diagnostics, applied later (or never) by the
/// host.
///
/// [`Diagnostic`]: crate::diagnostic::Diagnostic
/// [`Fix`]: crate::diagnostic::Fix
pub trait Rule: Send + Sync {
    /// Validated configuration for this rule.
    type Options: DeserializeOwned;

    /// Stable identifier, used in error messages and host configuration.
    fn id(&self) -> &'static str;

    /// Checks one package, registering any drift finding on the context.
    ///
    /// An `Err` means the check could not run at all (unreadable template,
    /// broken manifest); drift is reported through the context instead.
    fn check(&self, ctx: &CheckContext, options: &Self::Options) -> Result<(), RuleError>;

    /// Decodes raw JSON configuration into this rule's options.
    ///
    /// Hosts call this once per configured rule entry, before any `check`.
    /// Option shapes that can only be built programmatically (generator
    /// functions, custom comparators) are not reachable from JSON and are
    /// constructed directly instead.
    fn decode_options(&self, raw: &serde_json::Value) -> Result<Self::Options, RuleError> {
        serde_json::from_value(raw.clone()).map_err(|source| RuleError::InvalidOptions {
            rule: self.id(),
            source,
        })
    }
}
