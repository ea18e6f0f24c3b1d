//! End-to-end classification of sequencing-archive EXPERIMENT records against
//! the bundled `policies/experiment.json` ruleset.

use std::path::PathBuf;

use xdiff_engine::{DiffConfig, DiffKind, DiffValue, Verdict};
use xdiff_policy::{diff_and_classify, RulesetSource, POLICY_UNDEFINED};
use xdiff_tree::{parse_file, parse_str, Document};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/experiment.xml")
}

fn policy_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../policies")
}

fn fixture_text() -> String {
    std::fs::read_to_string(fixture_path()).unwrap()
}

fn edited(from: &str, to: &str) -> Document {
    let text = fixture_text();
    assert!(text.contains(from), "fixture does not contain {from:?}");
    parse_str(&text.replacen(from, to, 1)).unwrap()
}

fn discover(old: &Document, new: &Document) -> Vec<xdiff_engine::DiffRecord> {
    diff_and_classify(
        old,
        new,
        &DiffConfig::default(),
        RulesetSource::Discover(policy_dir()),
    )
    .unwrap()
}

#[test]
fn self_diff_of_fixture_is_empty() {
    let doc = parse_file(fixture_path()).unwrap();
    assert!(discover(&doc, &doc).is_empty());
}

#[test]
fn title_edit_is_warn_with_explicit_file() {
    let old = parse_file(fixture_path()).unwrap();
    let new = edited(
        "Illumina paired-end Sequencing of KAS22024554 (KAE22252420)",
        "Illumina paired-end sequencing of KAS22024554",
    );
    let records = diff_and_classify(
        &old,
        &new,
        &DiffConfig::default(),
        RulesetSource::File(policy_dir().join("experiment.json")),
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.kind(), DiffKind::ModifyText);
    assert_eq!(record.path(), "/EXPERIMENT/TITLE[2]");
    assert_eq!(
        record.after(),
        Some(&DiffValue::Text("Illumina paired-end sequencing of KAS22024554".into()))
    );
    assert_eq!(record.policy(), Some(Verdict::Warn));
}

#[test]
fn ruleset_is_discovered_from_root_tag() {
    let old = parse_file(fixture_path()).unwrap();
    let new = edited("<PRIMARY_ID>KAE22252420</PRIMARY_ID>", "<PRIMARY_ID>KAE22252421</PRIMARY_ID>");
    let records = discover(&old, &new);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path(), "/EXPERIMENT/IDENTIFIERS[1]/PRIMARY_ID[1]");
    assert_eq!(records[0].policy(), Some(Verdict::Error));
    assert_eq!(records[0].policy_note(), Some("primary accession must not change"));
}

#[test]
fn free_text_description_is_allowed() {
    let old = parse_file(fixture_path()).unwrap();
    let new = edited("Whole genome resequencing", "Whole-genome resequencing, 30x");
    let records = discover(&old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].policy(), Some(Verdict::Allow));
}

#[test]
fn unlisted_path_defaults_to_warn() {
    let old = parse_file(fixture_path()).unwrap();
    let new = edited(r#"NOMINAL_LENGTH="350""#, r#"NOMINAL_LENGTH="400""#);
    let records = discover(&old, &new);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), DiffKind::ModifyAttr);
    assert_eq!(records[0].policy(), Some(Verdict::Warn));
    assert_eq!(records[0].policy_note(), Some(POLICY_UNDEFINED));
}

#[test]
fn study_ref_attribute_change_is_error() {
    let old = parse_file(fixture_path()).unwrap();
    let new = edited(
        r#"<STUDY_REF accession="KAP220529"/>"#,
        r#"<STUDY_REF accession="KAP220530"/>"#,
    );
    let records = discover(&old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), DiffKind::ModifyAttr);
    assert_eq!(records[0].policy(), Some(Verdict::Error));
}

#[test]
fn reordered_sections_are_moves_and_fully_classified() {
    let swapped = parse_str(
        r#"<EXPERIMENT><TITLE>t</TITLE><IDENTIFIERS><PRIMARY_ID>p</PRIMARY_ID></IDENTIFIERS></EXPERIMENT>"#,
    )
    .unwrap();
    let before = parse_str(
        r#"<EXPERIMENT><IDENTIFIERS><PRIMARY_ID>p</PRIMARY_ID></IDENTIFIERS><TITLE>t</TITLE></EXPERIMENT>"#,
    )
    .unwrap();
    let records = discover(&before, &swapped);
    assert_eq!(records.iter().filter(|r| r.kind() == DiffKind::Move).count(), 2);
    assert!(records.iter().all(|r| r.is_classified()));
}

#[test]
fn unknown_root_is_left_unclassified() {
    let old = parse_str("<RUN><TITLE>a</TITLE></RUN>").unwrap();
    let new = parse_str("<RUN><TITLE>b</TITLE></RUN>").unwrap();
    let records = discover(&old, &new);
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_classified());
}
