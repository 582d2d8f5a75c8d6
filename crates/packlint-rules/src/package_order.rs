//! Rule: top-level keys in package.json must follow a configured order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::de::Deserializer;
use serde::Deserialize;

use packlint_core::{CheckContext, Diagnostic, Fix, Manifest, Rule, RuleError};

use crate::diff;

/// A ready-made two-argument ordering over manifest key names.
pub type KeyComparator = Box<dyn Fn(&str, &str) -> Ordering>;

/// Builds a [`KeyComparator`] from the check context. Invoked once per check.
pub type ComparatorFactory = Arc<dyn Fn(&CheckContext) -> KeyComparator + Send + Sync>;

/// The desired key ordering.
#[derive(Clone)]
pub enum KeyOrder {
    /// Keys sort by their index in this list; keys absent from the list sort
    /// after every listed key, alphabetically among themselves.
    Keys(Vec<String>),
    /// A caller-supplied comparator owning the full ordering contract. The
    /// built-in tie-break logic is bypassed entirely. Only constructible
    /// programmatically.
    Comparator(ComparatorFactory),
}

impl KeyOrder {
    fn comparator(&self, ctx: &CheckContext) -> KeyComparator {
        match self {
            KeyOrder::Keys(keys) => {
                let keys = keys.clone();
                Box::new(move |a, b| compare_by_list(&keys, a, b))
            }
            KeyOrder::Comparator(factory) => factory(ctx),
        }
    }
}

impl fmt::Debug for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrder::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            KeyOrder::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

/// Compares two keys against an explicit order list.
fn compare_by_list(order: &[String], a: &str, b: &str) -> Ordering {
    let a_index = order.iter().position(|key| key == a);
    let b_index = order.iter().position(|key| key == b);
    match (a_index, b_index) {
        // Keys missing from the list sort after every listed key.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a_index), Some(b_index)) if a_index != b_index => a_index.cmp(&b_index),
        // Alphabetical tie-break, code-point order.
        _ => a.cmp(b),
    }
}

/// Options for [`PackageOrder`].
#[derive(Debug, Clone)]
pub struct PackageOrderOptions {
    /// Desired top-level key ordering.
    pub order: KeyOrder,
}

impl PackageOrderOptions {
    /// Options with an explicit key list.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: KeyOrder::Keys(keys.into_iter().map(Into::into).collect()),
        }
    }

    /// Options with a caller-supplied comparator factory.
    pub fn comparator<F>(factory: F) -> Self
    where
        F: Fn(&CheckContext) -> KeyComparator + Send + Sync + 'static,
    {
        Self {
            order: KeyOrder::Comparator(Arc::new(factory)),
        }
    }
}

impl<'de> Deserialize<'de> for PackageOrderOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            order: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(PackageOrderOptions {
            order: KeyOrder::Keys(raw.order),
        })
    }
}

/// Checks that a manifest's top-level keys follow the configured order.
///
/// On drift, registers a diagnostic whose fix rewrites the whole manifest
/// with keys in the expected order and every value untouched.
pub struct PackageOrder;

impl Rule for PackageOrder {
    type Options = PackageOrderOptions;

    fn id(&self) -> &'static str {
        "package-order"
    }

    fn check(&self, ctx: &CheckContext, options: &Self::Options) -> Result<(), RuleError> {
        let manifest = ctx.package_json()?;
        let manifest_path = ctx.package_json_path();

        let comparator = options.order.comparator(ctx);
        let actual_order: Vec<String> = manifest.keys().cloned().collect();
        // Sort a copy; the actual sequence must survive for the comparison.
        let mut expected_order = actual_order.clone();
        expected_order.sort_by(|a, b| comparator(a, b));

        // Whole-sequence equality: length and every position. Both sides are
        // permutations of the same key set, so lengths agree by construction.
        if actual_order != expected_order {
            let contents =
                packlint_core::to_json_string(&reorder(&manifest, &expected_order));
            ctx.add_diagnostic(
                Diagnostic::new(
                    manifest_path.clone(),
                    "Incorrect order of fields in package.json",
                )
                .with_long_message(diff::diff_keys(&expected_order, &actual_order))
                .with_fix(Fix::WriteFile {
                    path: manifest_path,
                    contents,
                }),
            );
        }
        Ok(())
    }
}

/// Rebuilds a manifest with keys in `order`, copying each existing value.
fn reorder(manifest: &Manifest, order: &[String]) -> Manifest {
    let mut reordered = Manifest::new();
    for key in order {
        if let Some(value) = manifest.get(key) {
            reordered.insert(key.clone(), value.clone());
        }
    }
    reordered
}
