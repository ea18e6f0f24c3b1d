//! Per-kind and per-verdict record counts.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use xdiff_engine::{DiffKind, DiffRecord, Verdict};

/// Counts over one diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total number of records.
    pub total: usize,
    /// Records per kind; kinds with no records are absent.
    pub by_kind: BTreeMap<DiffKind, usize>,
    /// Records per verdict; unclassified records are not counted here.
    pub by_verdict: BTreeMap<Verdict, usize>,
    /// Records with no verdict.
    pub unclassified: usize,
}

impl Summary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DiffRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            *summary.by_kind.entry(record.kind()).or_default() += 1;
            match record.policy() {
                Some(verdict) => *summary.by_verdict.entry(verdict).or_default() += 1,
                None => summary.unclassified += 1,
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn kind_count(&self, kind: DiffKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn verdict_count(&self, verdict: Verdict) -> usize {
        self.by_verdict.get(&verdict).copied().unwrap_or(0)
    }

    /// Whether any record was classified `error`.
    pub fn has_errors(&self) -> bool {
        self.verdict_count(Verdict::Error) > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no differences");
        }
        let noun = if self.total == 1 { "difference" } else { "differences" };
        write!(f, "{} {noun}", self.total)?;

        let kinds: Vec<String> = DiffKind::ALL
            .iter()
            .filter(|kind| self.kind_count(**kind) > 0)
            .map(|kind| format!("{} {kind}", self.kind_count(*kind)))
            .collect();
        write!(f, " ({})", kinds.join(", "))?;

        if !self.by_verdict.is_empty() {
            let verdicts: Vec<String> = self
                .by_verdict
                .iter()
                .map(|(verdict, n)| format!("{verdict}: {n}"))
                .collect();
            write!(f, "; {}", verdicts.join(", "))?;
        }
        if self.unclassified > 0 && !self.by_verdict.is_empty() {
            write!(f, ", unclassified: {}", self.unclassified)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DiffRecord> {
        vec![
            DiffRecord::modify_text("/E/T[1]", "a", "b").classified(Verdict::Warn, ""),
            DiffRecord::moved("/E/X[1]", 0, 1).classified(Verdict::Allow, ""),
            DiffRecord::moved("/E/Y[2]", 1, 0).classified(Verdict::Error, "no"),
        ]
    }

    #[test]
    fn counts_by_kind_and_verdict() {
        let summary = Summary::from_records(&sample());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.kind_count(DiffKind::Move), 2);
        assert_eq!(summary.kind_count(DiffKind::Add), 0);
        assert_eq!(summary.verdict_count(Verdict::Warn), 1);
        assert_eq!(summary.unclassified, 0);
        assert!(summary.has_errors());
    }

    #[test]
    fn unclassified_records_are_counted_separately() {
        let records = vec![DiffRecord::add("/a/b[1]", "<b/>".into())];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.unclassified, 1);
        assert!(summary.by_verdict.is_empty());
        assert!(!summary.has_errors());
    }

    #[test]
    fn display_lists_kinds_in_reporting_order() {
        let summary = Summary::from_records(&sample());
        assert_eq!(
            summary.to_string(),
            "3 differences (1 modify_text, 2 move); allow: 1, warn: 1, error: 1"
        );
    }

    #[test]
    fn display_empty() {
        assert_eq!(Summary::default().to_string(), "no differences");
    }
}
