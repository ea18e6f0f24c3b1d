use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Environment variable that overrides the default policy directory.
pub const POLICY_DIR_ENV: &str = "XDIFF_POLICY_DIR";

/// Directory searched for `<root>.json` rulesets when nothing else is set.
pub const DEFAULT_POLICY_DIR: &str = "policies";

/// Configuration for one diff invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// When `true`, a fallback level that records at least one move skips
    /// its positional add/delete/recurse pass.
    pub suppress_positional_after_move: bool,
    /// Directory holding per-root-tag rulesets. `None` means
    /// `$XDIFF_POLICY_DIR`, falling back to `./policies`.
    pub policy_dir: Option<PathBuf>,
    /// Whether to run policy classification at all.
    pub classify: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            suppress_positional_after_move: false,
            policy_dir: None,
            classify: true,
        }
    }
}

impl DiffConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> EngineResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded diff configuration");
        Self::from_toml_str(&text)
    }

    /// The directory used for ruleset auto-discovery.
    pub fn policy_dir(&self) -> PathBuf {
        if let Some(dir) = &self.policy_dir {
            return dir.clone();
        }
        std::env::var_os(POLICY_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POLICY_DIR))
    }
}
