//! Expanded structural diffs for diagnostic long messages.
//!
//! Both rules render drift as a full-context line diff: every line of both
//! sides appears, with `-` marking expected-only lines and `+` marking
//! actual-only lines. Full context (rather than changed hunks) keeps short
//! generated files and manifest key lists readable in one glance.

use similar::{ChangeTag, TextDiff};

const HEADER: &str = "- Expected\n+ Received\n\n";

/// Diffs two optional file contents.
///
/// `None` means "file absent" and renders as an empty document, so a file
/// that should not exist shows all of its actual lines as received-only.
pub fn diff_content(expected: Option<&str>, actual: Option<&str>) -> String {
    render(expected.unwrap_or(""), actual.unwrap_or(""))
}

/// Diffs two key sequences, one key per line.
pub fn diff_keys(expected: &[String], actual: &[String]) -> String {
    render(&expected.join("\n"), &actual.join("\n"))
}

fn render(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::from(HEADER);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        out.push(sign);
        out.push(' ');
        out.push_str(change.value().trim_end_matches('\n'));
        out.push('\n');
    }
    out
}
