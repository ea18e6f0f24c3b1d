//! Ruleset model and loading.
//!
//! A ruleset file is a JSON array of rules:
//!
//! ```json
//! [
//!   { "xpath": "/EXPERIMENT/TITLE", "type": "warn", "note": "title may be edited" },
//!   { "xpath": "/EXPERIMENT/IDENTIFIERS/PRIMARY_ID", "type": "error" }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use xdiff_engine::Verdict;

use crate::error::{PolicyError, PolicyResult};
use crate::normalize::normalize_path;

/// One path-keyed policy rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Structural path, with or without position indices. Matched after
    /// normalization.
    #[serde(rename = "xpath", alias = "path", alias = "path_pattern")]
    pub path_pattern: String,
    #[serde(rename = "type", alias = "verdict")]
    pub verdict: Verdict,
    #[serde(default)]
    pub note: String,
}

impl PolicyRule {
    pub fn new(path_pattern: impl Into<String>, verdict: Verdict, note: impl Into<String>) -> Self {
        Self {
            path_pattern: path_pattern.into(),
            verdict,
            note: note.into(),
        }
    }

    /// The normalized key this rule matches against.
    pub fn key(&self) -> String {
        normalize_path(&self.path_pattern)
    }
}

/// An ordered list of rules. Earlier rules take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ruleset {
    rules: Vec<PolicyRule>,
}

impl Ruleset {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Parse a ruleset from JSON text.
    pub fn from_json_str(input: &str) -> PolicyResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a ruleset file.
    ///
    /// Returns `Ok(None)` when the file does not exist or cannot be read,
    /// and an error when it exists but is malformed.
    pub fn load(path: impl AsRef<Path>) -> PolicyResult<Option<Self>> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "ruleset not found");
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ruleset unreadable, skipping classification");
                return Ok(None);
            }
        };

        let ruleset: Self = serde_json::from_str(&text).map_err(|source| PolicyError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), rules = ruleset.len(), "loaded ruleset");
        Ok(Some(ruleset))
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PolicyRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<PolicyRule> for Ruleset {
    fn from_iter<I: IntoIterator<Item = PolicyRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
