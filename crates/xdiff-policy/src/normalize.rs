//! Structural path normalization.
//!
//! Diff paths carry 1-based positions (`/EXPERIMENT/TITLE[1]`); rule patterns
//! usually do not. Both sides are reduced to the same key before matching:
//! every `[<digits>]` suffix removed, surrounding whitespace trimmed,
//! lowercased.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A 1-based position suffix such as `[3]`.
static POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("position pattern is valid"));

/// Normalize a diff path or rule pattern into its matching key.
///
/// Idempotent: `normalize_path(&normalize_path(p)) == normalize_path(p)`.
pub fn normalize_path(path: &str) -> String {
    let mut current = strip_positions(path).into_owned();
    // Removing an index can splice brackets into a new one (`[[1]2]`).
    loop {
        match strip_positions(&current) {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => current = next,
        }
    }
    current.trim().to_lowercase()
}

fn strip_positions(path: &str) -> Cow<'_, str> {
    POSITION.replace_all(path, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_positions_and_lowercases() {
        assert_eq!(
            normalize_path("/EXPERIMENT/IDENTIFIERS[1]/PRIMARY_ID[1]"),
            "/experiment/identifiers/primary_id"
        );
    }

    #[test]
    fn rule_pattern_matches_diff_path_case_insensitively() {
        assert_eq!(normalize_path("/EXPERIMENT/Title"), normalize_path("/experiment/title[1]"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_path("  /A/B[12] \n"), "/a/b");
    }

    #[test]
    fn non_numeric_brackets_are_kept() {
        assert_eq!(normalize_path("/a[x]/b[]/c[1a]"), "/a[x]/b[]/c[1a]");
    }

    #[test]
    fn namespaced_segments_survive() {
        assert_eq!(normalize_path("/{urn:X}Root/{urn:X}A[3]"), "/{urn:x}root/{urn:x}a");
    }

    #[test]
    fn spliced_brackets_are_stripped_until_stable() {
        assert_eq!(normalize_path("/a[[1]2]/b"), "/a/b");
    }

    #[test]
    fn idempotent() {
        for p in ["/A[1]/B[2]", "/a[[1]2]", " /X/y[10] ", "/a[", "/a]b[3"] {
            let once = normalize_path(p);
            assert_eq!(normalize_path(&once), once, "input {p:?}");
        }
    }
}
