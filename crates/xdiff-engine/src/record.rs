//! Diff records and the append-only store they accumulate in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy classification of a difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Expected or benign change.
    Allow,
    /// Notable but non-blocking change.
    Warn,
    /// Change that violates a hard rule.
    Error,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Warn => "warn",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of difference a record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    ModifyTag,
    ModifyNs,
    ModifyAttr,
    ModifyText,
    Add,
    Delete,
    Move,
}

impl DiffKind {
    /// All kinds, in reporting order.
    pub const ALL: [DiffKind; 7] = [
        DiffKind::ModifyTag,
        DiffKind::ModifyNs,
        DiffKind::ModifyAttr,
        DiffKind::ModifyText,
        DiffKind::Add,
        DiffKind::Delete,
        DiffKind::Move,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::ModifyTag => "modify_tag",
            DiffKind::ModifyNs => "modify_ns",
            DiffKind::ModifyAttr => "modify_attr",
            DiffKind::ModifyText => "modify_text",
            DiffKind::Add => "add",
            DiffKind::Delete => "delete",
            DiffKind::Move => "move",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-dependent payload of a record side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    /// Child index, used by `move`.
    Position(usize),
    /// Tag name, namespace URI, trimmed text or serialized subtree.
    Text(String),
    /// Full attribute map, used by `modify_attr`.
    Attributes(BTreeMap<String, String>),
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffValue::Position(p) => write!(f, "{p}"),
            DiffValue::Text(s) => f.write_str(s),
            DiffValue::Attributes(attrs) => {
                f.write_str("{")?;
                for (i, (k, v)) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v:?}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// One reported difference.
///
/// Records are created by the aligner with no policy. Classification
/// produces a new, annotated record via [`DiffRecord::classified`]; the
/// policy fields have no setters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    path: String,
    kind: DiffKind,
    before: Option<DiffValue>,
    after: Option<DiffValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy_note: Option<String>,
}

impl DiffRecord {
    fn new(
        path: impl Into<String>,
        kind: DiffKind,
        before: Option<DiffValue>,
        after: Option<DiffValue>,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            before,
            after,
            policy: None,
            policy_note: None,
        }
    }

    pub fn modify_tag(path: impl Into<String>, old: &str, new: &str) -> Self {
        Self::new(
            path,
            DiffKind::ModifyTag,
            Some(DiffValue::Text(old.to_string())),
            Some(DiffValue::Text(new.to_string())),
        )
    }

    /// An absent namespace is reported as `None` on that side.
    pub fn modify_ns(path: impl Into<String>, old: Option<&str>, new: Option<&str>) -> Self {
        Self::new(
            path,
            DiffKind::ModifyNs,
            old.map(|ns| DiffValue::Text(ns.to_string())),
            new.map(|ns| DiffValue::Text(ns.to_string())),
        )
    }

    pub fn modify_attr(
        path: impl Into<String>,
        old: &BTreeMap<String, String>,
        new: &BTreeMap<String, String>,
    ) -> Self {
        Self::new(
            path,
            DiffKind::ModifyAttr,
            Some(DiffValue::Attributes(old.clone())),
            Some(DiffValue::Attributes(new.clone())),
        )
    }

    pub fn modify_text(path: impl Into<String>, old: &str, new: &str) -> Self {
        Self::new(
            path,
            DiffKind::ModifyText,
            Some(DiffValue::Text(old.to_string())),
            Some(DiffValue::Text(new.to_string())),
        )
    }

    pub fn add(path: impl Into<String>, subtree: String) -> Self {
        Self::new(path, DiffKind::Add, None, Some(DiffValue::Text(subtree)))
    }

    pub fn delete(path: impl Into<String>, subtree: String) -> Self {
        Self::new(path, DiffKind::Delete, Some(DiffValue::Text(subtree)), None)
    }

    pub fn moved(path: impl Into<String>, from: usize, to: usize) -> Self {
        Self::new(
            path,
            DiffKind::Move,
            Some(DiffValue::Position(from)),
            Some(DiffValue::Position(to)),
        )
    }

    /// Return this record annotated with a policy verdict and note.
    pub fn classified(mut self, verdict: Verdict, note: impl Into<String>) -> Self {
        self.policy = Some(verdict);
        self.policy_note = Some(note.into());
        self
    }

    /// The policy verdict, `None` until classification has run.
    pub fn policy(&self) -> Option<Verdict> {
        self.policy
    }

    pub fn policy_note(&self) -> Option<&str> {
        self.policy_note.as_deref()
    }

    pub fn is_classified(&self) -> bool {
        self.policy.is_some()
    }

    /// Structural path, e.g. `/EXPERIMENT/TITLE[1]`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    /// Old-side payload; `None` for `add` and for an absent namespace.
    pub fn before(&self) -> Option<&DiffValue> {
        self.before.as_ref()
    }

    /// New-side payload; `None` for `delete` and for an absent namespace.
    pub fn after(&self) -> Option<&DiffValue> {
        self.after.as_ref()
    }
}

/// Ordered, append-only collection of records from one diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffStore {
    records: Vec<DiffRecord>,
}

impl DiffStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: DiffRecord) {
        tracing::trace!(path = %record.path(), kind = %record.kind(), "diff record");
        self.records.push(record);
    }

    /// Returns `true` if no differences were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffRecord> {
        self.records.iter()
    }

    /// Number of records of the given kind.
    pub fn count(&self, kind: DiffKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Records whose path equals `path` exactly.
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a DiffRecord> + 'a {
        self.records.iter().filter(move |r| r.path == path)
    }

    pub fn into_records(self) -> Vec<DiffRecord> {
        self.records
    }
}

impl FromIterator<DiffRecord> for DiffStore {
    fn from_iter<I: IntoIterator<Item = DiffRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiffStore {
    type Item = DiffRecord;
    type IntoIter = std::vec::IntoIter<DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiffStore {
    type Item = &'a DiffRecord;
    type IntoIter = std::slice::Iter<'a, DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_delete_populate_exactly_one_side() {
        let add = DiffRecord::add("/r/a[1]", "<a/>".into());
        assert!(add.before().is_none());
        assert_eq!(add.after(), Some(&DiffValue::Text("<a/>".into())));

        let del = DiffRecord::delete("/r/a[1]", "<a/>".into());
        assert_eq!(del.before(), Some(&DiffValue::Text("<a/>".into())));
        assert!(del.after().is_none());
    }

    #[test]
    fn names_convert_by_value() {
        assert_eq!(Some(Verdict::Error).map(Verdict::as_str), Some("error"));
        assert_eq!(DiffKind::ALL.map(DiffKind::as_str)[6], "move");
    }

    #[test]
    fn classification_keeps_record_content() {
        let rec = DiffRecord::modify_tag("/E/A[2]", "A", "B").classified(Verdict::Allow, "renamed");
        assert_eq!(rec.path(), "/E/A[2]");
        assert_eq!(rec.kind(), DiffKind::ModifyTag);
        assert_eq!(rec.before(), Some(&DiffValue::Text("A".into())));
        assert_eq!(rec.after(), Some(&DiffValue::Text("B".into())));
    }

    #[test]
    fn classification_sets_policy_once() {
        let rec = DiffRecord::modify_text("/E/T[1]", "a", "b");
        assert!(!rec.is_classified());
        let rec = rec.classified(Verdict::Error, "required field");
        assert_eq!(rec.policy(), Some(Verdict::Error));
        assert_eq!(rec.policy_note(), Some("required field"));
    }

    #[test]
    fn json_shape_uses_snake_case_kinds_and_plain_payloads() {
        let rec = DiffRecord::moved("/r/b[2]", 1, 0);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["kind"], "move");
        assert_eq!(json["before"], 1);
        assert_eq!(json["after"], 0);
        assert!(json.get("policy").is_none());

        let rec = DiffRecord::modify_text("/r", "a", "b").classified(Verdict::Warn, "");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["policy"], "warn");
        assert_eq!(json["before"], "a");
    }

    #[test]
    fn records_deserialize_back() {
        let mut old = BTreeMap::new();
        old.insert("x".to_string(), "1".to_string());
        let rec = DiffRecord::modify_attr("/r/a[1]", &old, &BTreeMap::new())
            .classified(Verdict::Allow, "ok");
        let json = serde_json::to_string(&rec).unwrap();
        let back: DiffRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn store_counts_by_kind() {
        let store: DiffStore = vec![
            DiffRecord::add("/r/a[1]", "<a/>".into()),
            DiffRecord::add("/r/a[2]", "<a/>".into()),
            DiffRecord::moved("/r/b[1]", 0, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 3);
        assert_eq!(store.count(DiffKind::Add), 2);
        assert_eq!(store.count(DiffKind::Move), 1);
        assert_eq!(store.count(DiffKind::Delete), 0);
    }

    #[test]
    fn attribute_payload_display() {
        let mut attrs = BTreeMap::new();
        attrs.insert("a".to_string(), "1".to_string());
        attrs.insert("b".to_string(), "2".to_string());
        assert_eq!(DiffValue::Attributes(attrs).to_string(), r#"{a="1", b="2"}"#);
    }
}
