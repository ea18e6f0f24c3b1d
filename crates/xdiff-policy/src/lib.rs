//! Policy classification for xdiff.
//!
//! Rulesets map structural paths to a verdict (`allow`, `warn`, `error`) and
//! a note. After a diff run completes, every record is matched against the
//! ruleset by normalized path (positions stripped, case folded) and
//! annotated. Records with no matching rule get `warn` and
//! [`POLICY_UNDEFINED`].
//!
//! Rulesets come from, in order of precedence, the caller, an explicit file,
//! or `<policy_dir>/<root>.json` where `<root>` is the lowercased local name
//! of the old document's root element. When none is found classification is
//! skipped and records keep no policy.
//!
//! # Quick Start
//!
//! ```rust
//! use xdiff_engine::{DiffConfig, Verdict};
//! use xdiff_policy::{diff_and_classify, PolicyRule, Ruleset, RulesetSource};
//! use xdiff_tree::parse_str;
//!
//! let old = parse_str("<EXPERIMENT><TITLE>AAA</TITLE></EXPERIMENT>").unwrap();
//! let new = parse_str("<EXPERIMENT><TITLE>BBB</TITLE></EXPERIMENT>").unwrap();
//! let rules = Ruleset::new(vec![PolicyRule::new("/EXPERIMENT/TITLE", Verdict::Warn, "")]);
//!
//! let records =
//!     diff_and_classify(&old, &new, &DiffConfig::default(), RulesetSource::Explicit(rules))
//!         .unwrap();
//! assert_eq!(records[0].policy(), Some(Verdict::Warn));
//! ```

pub mod classify;
pub mod error;
pub mod normalize;
pub mod ruleset;
pub mod source;

pub use classify::{classify, diff_and_classify, Classifier, DEFAULT_VERDICT, POLICY_UNDEFINED};
pub use error::{PolicyError, PolicyResult};
pub use normalize::normalize_path;
pub use ruleset::{PolicyRule, Ruleset};
pub use source::{locate_ruleset, RulesetSource};
