//! Policy classification of diff records.

use tracing::debug;
use xdiff_engine::{diff_documents, DiffConfig, DiffRecord, DiffStore, Verdict};
use xdiff_tree::Document;

use crate::error::PolicyResult;
use crate::normalize::normalize_path;
use crate::ruleset::{PolicyRule, Ruleset};
use crate::source::RulesetSource;

/// Note attached to records that no rule matched.
pub const POLICY_UNDEFINED: &str = "policy undefined";

/// Verdict for records that no rule matched.
pub const DEFAULT_VERDICT: Verdict = Verdict::Warn;

/// Matches record paths against a ruleset. Rule keys are normalized once.
pub struct Classifier<'r> {
    rules: Vec<(String, &'r PolicyRule)>,
}

impl<'r> Classifier<'r> {
    pub fn new(ruleset: &'r Ruleset) -> Self {
        Self {
            rules: ruleset.iter().map(|rule| (rule.key(), rule)).collect(),
        }
    }

    /// Verdict and note for a structural path. The first rule whose key
    /// equals the normalized path wins.
    pub fn verdict_for(&self, path: &str) -> (Verdict, &'r str) {
        let key = normalize_path(path);
        self.rules
            .iter()
            .find(|(rule_key, _)| *rule_key == key)
            .map(|&(_, rule)| (rule.verdict, rule.note.as_str()))
            .unwrap_or((DEFAULT_VERDICT, POLICY_UNDEFINED))
    }

    /// Annotate every record of a finished diff run.
    pub fn classify(&self, store: DiffStore) -> Vec<DiffRecord> {
        store
            .into_iter()
            .map(|record| {
                let (verdict, note) = self.verdict_for(record.path());
                record.classified(verdict, note)
            })
            .collect()
    }
}

/// Classify a finished diff run. Without a ruleset the records are returned
/// unannotated.
pub fn classify(store: DiffStore, ruleset: Option<&Ruleset>) -> Vec<DiffRecord> {
    match ruleset {
        Some(ruleset) => {
            let records = Classifier::new(ruleset).classify(store);
            debug!(records = records.len(), rules = ruleset.len(), "classified diff");
            records
        }
        None => {
            debug!("no ruleset available, records left unclassified");
            store.into_records()
        }
    }
}

/// Diff two documents and classify the result in one call.
///
/// The ruleset is resolved against the old document's root. A malformed
/// ruleset fails the whole call; nothing is partially classified.
pub fn diff_and_classify(
    old: &Document,
    new: &Document,
    config: &DiffConfig,
    source: RulesetSource,
) -> PolicyResult<Vec<DiffRecord>> {
    let store = diff_documents(old, new, config);
    let ruleset = source.resolve(old)?;
    Ok(classify(store, ruleset.as_ref()))
}
