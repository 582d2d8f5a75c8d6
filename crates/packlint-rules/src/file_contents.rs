//! Rule: a file's contents must match an expected, generated value.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::{Deserializer, Error as DeError};
use serde::Deserialize;

use packlint_core::{CheckContext, Diagnostic, Fix, Rule, RuleError};

use crate::diff;

/// Produces the expected contents for a target file.
///
/// Returning `None` means the file must not exist.
pub type ContentGenerator = Arc<dyn Fn(&CheckContext) -> Option<String> + Send + Sync>;

/// Where the expected contents come from. Exactly one source per rule entry.
#[derive(Clone)]
pub enum ContentSource {
    /// An inline template string, used verbatim.
    Template(String),
    /// A template file resolved against the workspace root, so shared
    /// templates live once and are referenced by every package.
    TemplateFile(PathBuf),
    /// A generator invoked with the check context. Only constructible
    /// programmatically; JSON configuration cannot carry a function.
    Generator(ContentGenerator),
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Template(template) => {
                f.debug_tuple("Template").field(template).finish()
            }
            ContentSource::TemplateFile(path) => {
                f.debug_tuple("TemplateFile").field(path).finish()
            }
            ContentSource::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Options for [`FileContents`].
#[derive(Debug, Clone)]
pub struct FileContentsOptions {
    /// Target file path, relative to the package directory.
    pub file: PathBuf,
    /// Source of the expected contents.
    pub source: ContentSource,
}

impl FileContentsOptions {
    /// Options with an inline template.
    pub fn template(file: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source: ContentSource::Template(template.into()),
        }
    }

    /// Options with a template file shared at the workspace root.
    pub fn template_file(file: impl Into<PathBuf>, template_file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            source: ContentSource::TemplateFile(template_file.into()),
        }
    }

    /// Options with a content generator.
    pub fn generator<F>(file: impl Into<PathBuf>, generator: F) -> Self
    where
        F: Fn(&CheckContext) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            file: file.into(),
            source: ContentSource::Generator(Arc::new(generator)),
        }
    }
}

impl<'de> Deserialize<'de> for FileContentsOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            file: PathBuf,
            #[serde(default)]
            template: Option<String>,
            #[serde(default, rename = "templateFile")]
            template_file: Option<PathBuf>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let source = match (raw.template, raw.template_file) {
            (Some(template), None) => ContentSource::Template(template),
            (None, Some(template_file)) => ContentSource::TemplateFile(template_file),
            (Some(_), Some(_)) => {
                return Err(DeError::custom(
                    "`template` and `templateFile` are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(DeError::custom(
                    "one of `template` or `templateFile` is required",
                ))
            }
        };
        Ok(FileContentsOptions {
            file: raw.file,
            source,
        })
    }
}

/// Checks that a package file matches its expected, generated contents.
///
/// On drift, registers a diagnostic whose fix writes the expected contents
/// (creating missing ancestor directories) or deletes the file when the
/// expected contents are "absent".
pub struct FileContents;

impl Rule for FileContents {
    type Options = FileContentsOptions;

    fn id(&self) -> &'static str {
        "file-contents"
    }

    fn check(&self, ctx: &CheckContext, options: &Self::Options) -> Result<(), RuleError> {
        let full_path = ctx.package_dir().join(&options.file);
        let expected = expected_content(ctx, &options.source)?;

        let actual = match fs::read_to_string(&full_path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(RuleError::TargetRead {
                    path: full_path,
                    source,
                })
            }
        };

        // Strict equality, absent-on-both-sides included. No normalization.
        if actual != expected {
            let fix = match &expected {
                Some(contents) => Fix::WriteFile {
                    path: full_path.clone(),
                    contents: contents.clone(),
                },
                None => Fix::DeleteFile {
                    path: full_path.clone(),
                },
            };
            ctx.add_diagnostic(
                Diagnostic::new(full_path, "Expect file contents to match")
                    .with_long_message(diff::diff_content(expected.as_deref(), actual.as_deref()))
                    .with_fix(fix),
            );
        }
        Ok(())
    }
}

/// Resolves the expected contents from the configured source.
///
/// An unreadable template file is a setup failure and aborts the check; it
/// is never reported as a drift finding.
fn expected_content(
    ctx: &CheckContext,
    source: &ContentSource,
) -> Result<Option<String>, RuleError> {
    match source {
        ContentSource::Generator(generator) => Ok(generator(ctx)),
        ContentSource::TemplateFile(template_file) => {
            let path = ctx.workspace_root().join(template_file);
            let template = fs::read_to_string(&path)
                .map_err(|source| RuleError::TemplateRead { path, source })?;
            Ok(Some(template))
        }
        ContentSource::Template(template) => Ok(Some(template.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> CheckContext {
        CheckContext::new(dir.path(), dir.path())
    }

    fn check(ctx: &CheckContext, options: &FileContentsOptions) -> Vec<Diagnostic> {
        FileContents.check(ctx, options).unwrap();
        ctx.take_diagnostics()
    }

    #[test]
    fn test_matching_template_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# hello\n").unwrap();

        let ctx = context(&dir);
        let options = FileContentsOptions::template("README.md", "# hello\n");
        assert_eq!(check(&ctx, &options), vec![]);
    }

    #[test]
    fn test_mismatch_registers_one_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# stale\n").unwrap();

        let ctx = context(&dir);
        let options = FileContentsOptions::template("README.md", "# hello\n");
        let diagnostics = check(&ctx, &options);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.path, dir.path().join("README.md"));
        assert_eq!(diagnostic.message, "Expect file contents to match");

        let long_message = diagnostic.long_message.as_ref().unwrap();
        assert!(long_message.contains("- # hello"));
        assert!(long_message.contains("+ # stale"));
    }

    #[test]
    fn test_fix_then_recheck_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# stale\n").unwrap();

        let ctx = context(&dir);
        let options = FileContentsOptions::template("README.md", "# hello\n");
        let diagnostics = check(&ctx, &options);
        diagnostics[0].fix.as_ref().unwrap().apply().unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "# hello\n"
        );
        assert_eq!(check(&ctx, &options), vec![]);
    }

    #[test]
    fn test_missing_file_fix_creates_ancestor_directories() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let options = FileContentsOptions::template("config/ci/pipeline.yml", "stages: []\n");

        let diagnostics = check(&ctx, &options);
        assert_eq!(diagnostics.len(), 1);
        diagnostics[0].fix.as_ref().unwrap().apply().unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("config/ci/pipeline.yml")).unwrap(),
            "stages: []\n"
        );
        assert_eq!(check(&ctx, &options), vec![]);
    }

    #[test]
    fn test_absent_expected_and_absent_file_agree() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let options = FileContentsOptions::generator("legacy.cfg", |_ctx| None);
        assert_eq!(check(&ctx, &options), vec![]);
    }

    #[test]
    fn test_absent_expected_with_present_file_deletes_it() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("legacy.cfg"), "obsolete\n").unwrap();

        let ctx = context(&dir);
        let options = FileContentsOptions::generator("legacy.cfg", |_ctx| None);
        let diagnostics = check(&ctx, &options);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].fix,
            Some(Fix::DeleteFile {
                path: dir.path().join("legacy.cfg")
            })
        );

        diagnostics[0].fix.as_ref().unwrap().apply().unwrap();
        assert!(!dir.path().join("legacy.cfg").exists());
        assert_eq!(check(&ctx, &options), vec![]);
    }

    #[test]
    fn test_generator_observes_the_context() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let options = FileContentsOptions::generator("dir.txt", |ctx| {
            Some(format!("{}\n", ctx.package_dir().display()))
        });

        let diagnostics = check(&ctx, &options);
        assert_eq!(diagnostics.len(), 1);
        match diagnostics[0].fix.as_ref().unwrap() {
            Fix::WriteFile { contents, .. } => {
                assert_eq!(contents, &format!("{}\n", dir.path().display()));
            }
            other => panic!("expected a write fix, got {:?}", other),
        }
    }

    #[test]
    fn test_template_file_resolves_against_workspace_root() {
        let workspace = tempfile::tempdir().unwrap();
        let package_dir = workspace.path().join("packages/app");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(workspace.path().join("LICENSE.tmpl"), "MIT\n").unwrap();
        // A decoy inside the package proves resolution uses the root.
        fs::write(package_dir.join("LICENSE.tmpl"), "WRONG\n").unwrap();

        let ctx = CheckContext::new(&package_dir, workspace.path());
        let options = FileContentsOptions::template_file("LICENSE", "LICENSE.tmpl");
        let diagnostics = check(&ctx, &options);

        assert_eq!(diagnostics.len(), 1);
        diagnostics[0].fix.as_ref().unwrap().apply().unwrap();
        assert_eq!(
            fs::read_to_string(package_dir.join("LICENSE")).unwrap(),
            "MIT\n"
        );
    }

    #[test]
    fn test_missing_template_file_is_fatal_not_a_finding() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let options = FileContentsOptions::template_file("LICENSE", "missing.tmpl");

        let err = FileContents.check(&ctx, &options).unwrap_err();
        assert!(matches!(err, RuleError::TemplateRead { .. }));
        assert!(!ctx.has_diagnostics());
    }

    #[test]
    fn test_decode_inline_template_options() {
        let raw = serde_json::json!({ "file": "README.md", "template": "# hi\n" });
        let options = FileContents.decode_options(&raw).unwrap();
        assert_eq!(options.file, PathBuf::from("README.md"));
        assert!(matches!(options.source, ContentSource::Template(ref t) if t == "# hi\n"));
    }

    #[test]
    fn test_decode_template_file_options() {
        let raw = serde_json::json!({ "file": "LICENSE", "templateFile": "LICENSE.tmpl" });
        let options = FileContents.decode_options(&raw).unwrap();
        assert!(matches!(options.source, ContentSource::TemplateFile(_)));
    }

    #[test]
    fn test_decode_rejects_both_sources() {
        let raw = serde_json::json!({
            "file": "LICENSE",
            "template": "MIT\n",
            "templateFile": "LICENSE.tmpl",
        });
        assert!(matches!(
            FileContents.decode_options(&raw),
            Err(RuleError::InvalidOptions {
                rule: "file-contents",
                ..
            })
        ));
    }

    #[test]
    fn test_decode_rejects_missing_source() {
        let raw = serde_json::json!({ "file": "LICENSE" });
        assert!(FileContents.decode_options(&raw).is_err());
    }
}
