//! Where a diff run gets its ruleset from.

use std::path::{Path, PathBuf};

use tracing::debug;
use xdiff_engine::DiffConfig;
use xdiff_tree::Document;

use crate::error::PolicyResult;
use crate::ruleset::Ruleset;

/// Locate the conventional ruleset `<dir>/<root_key>.json`, where
/// `root_key` is a document's [`Document::root_key`].
///
/// Pure lookup with no caching, so concurrent runs never share state.
pub fn locate_ruleset(dir: &Path, root_key: &str) -> Option<PathBuf> {
    let path = dir.join(format!("{root_key}.json"));
    path.is_file().then_some(path)
}

/// Ruleset resolution, in precedence order.
#[derive(Clone, Debug, Default)]
pub enum RulesetSource {
    /// A ruleset supplied by the caller.
    Explicit(Ruleset),
    /// A ruleset file chosen by the caller. If it is missing, classification
    /// is skipped; discovery is not attempted.
    File(PathBuf),
    /// Discover `<root>.json` in this directory.
    Discover(PathBuf),
    /// No classification.
    #[default]
    Disabled,
}

impl RulesetSource {
    /// Pick the source from an explicit file (if given) or the configured
    /// discovery directory.
    pub fn from_config(config: &DiffConfig, explicit: Option<PathBuf>) -> Self {
        if !config.classify {
            return Self::Disabled;
        }
        match explicit {
            Some(path) => Self::File(path),
            None => Self::Discover(config.policy_dir()),
        }
    }

    /// Resolve to a ruleset for `document` (the old side of a diff).
    ///
    /// `Ok(None)` means no ruleset is available and records stay
    /// unclassified. A malformed ruleset file is an error.
    pub fn resolve(self, document: &Document) -> PolicyResult<Option<Ruleset>> {
        match self {
            Self::Explicit(ruleset) => Ok(Some(ruleset)),
            Self::File(path) => Ruleset::load(path),
            Self::Discover(dir) => {
                let root_key = document.root_key();
                match locate_ruleset(&dir, &root_key) {
                    Some(path) => Ruleset::load(path),
                    None => {
                        debug!(
                            dir = %dir.display(),
                            root = %root_key,
                            "no ruleset found for document root"
                        );
                        Ok(None)
                    }
                }
            }
            Self::Disabled => Ok(None),
        }
    }
}
