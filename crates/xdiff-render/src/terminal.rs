//! One-line-per-record terminal output.
//!
//! ```text
//! t [modify_text] /EXPERIMENT/TITLE[2]: "AAA" -> "BBB" [warn]  // title may change
//! ```
//!
//! With color enabled the foreground follows the record kind and the
//! background follows the verdict.

use colored::{Color, Colorize};
use xdiff_engine::{DiffKind, DiffRecord, DiffValue, Verdict};

/// Single-character marker for a record kind.
pub fn icon(kind: DiffKind) -> char {
    match kind {
        DiffKind::Add => '+',
        DiffKind::Delete => '-',
        DiffKind::ModifyTag => 'T',
        DiffKind::ModifyAttr => 'A',
        DiffKind::ModifyText => 't',
        DiffKind::ModifyNs => 'N',
        DiffKind::Move => 'M',
    }
}

fn kind_color(kind: DiffKind) -> Color {
    match kind {
        DiffKind::Add => Color::Green,
        DiffKind::Delete => Color::Red,
        DiffKind::ModifyTag => Color::Magenta,
        DiffKind::ModifyAttr => Color::Cyan,
        DiffKind::ModifyText => Color::Blue,
        DiffKind::ModifyNs => Color::BrightBlue,
        DiffKind::Move => Color::BrightMagenta,
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Allow => Color::Green,
        Verdict::Warn => Color::Yellow,
        Verdict::Error => Color::Red,
    }
}

/// Display form of one side of a record. Text is quoted; absent is `none`.
pub fn show_value(value: Option<&DiffValue>) -> String {
    match value {
        None => "none".to_string(),
        Some(DiffValue::Text(text)) => format!("{text:?}"),
        Some(other) => other.to_string(),
    }
}

/// Renders records as terminal lines.
#[derive(Clone, Copy, Debug)]
pub struct TerminalRenderer {
    color: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Plain lines with no escape sequences.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// The uncolored text of one record line.
    pub fn line(record: &DiffRecord) -> String {
        let mut line = format!(
            "{} [{}] {}: {} -> {}",
            icon(record.kind()),
            record.kind(),
            record.path(),
            show_value(record.before()),
            show_value(record.after()),
        );
        if let Some(verdict) = record.policy() {
            line.push_str(&format!(" [{verdict}]"));
        }
        if let Some(note) = record.policy_note().filter(|n| !n.is_empty()) {
            line.push_str(&format!("  // {note}"));
        }
        line
    }

    pub fn render_record(&self, record: &DiffRecord) -> String {
        let line = Self::line(record);
        if !self.color {
            return line;
        }
        let colored = line.as_str().color(kind_color(record.kind()));
        match record.policy() {
            Some(verdict) => colored.on_color(verdict_color(verdict)).to_string(),
            None => colored.to_string(),
        }
    }

    /// All records, newline separated.
    pub fn render(&self, records: &[DiffRecord]) -> String {
        records
            .iter()
            .map(|record| self.render_record(record))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn text_line_layout() {
        let record = DiffRecord::modify_text("/EXPERIMENT/TITLE[2]", "AAA", "BBB")
            .classified(Verdict::Warn, "title may change");
        assert_eq!(
            TerminalRenderer::plain().render_record(&record),
            r#"t [modify_text] /EXPERIMENT/TITLE[2]: "AAA" -> "BBB" [warn]  // title may change"#
        );
    }

    #[test]
    fn unclassified_line_has_no_policy_suffix() {
        let record = DiffRecord::moved("/a/b[1]", 0, 2);
        assert_eq!(TerminalRenderer::plain().render_record(&record), "M [move] /a/b[1]: 0 -> 2");
    }

    #[test]
    fn empty_note_is_omitted() {
        let record = DiffRecord::add("/a/c[3]", "<c/>".into()).classified(Verdict::Allow, "");
        assert_eq!(
            TerminalRenderer::plain().render_record(&record),
            r#"+ [add] /a/c[3]: none -> "<c/>" [allow]"#
        );
    }

    #[test]
    fn attribute_maps_are_shown_in_full() {
        let old = BTreeMap::from([("id".to_string(), "1".to_string())]);
        let new = BTreeMap::from([("id".to_string(), "2".to_string())]);
        let record = DiffRecord::modify_attr("/a", &old, &new);
        let line = TerminalRenderer::plain().render_record(&record);
        assert!(line.starts_with("A [modify_attr] /a: "));
        assert!(line.contains(r#"{id="1"} -> {id="2"}"#));
    }

    #[test]
    fn colored_line_keeps_text_contiguous() {
        colored::control::set_override(true);
        let record = DiffRecord::delete("/a/b[1]", "<b/>".into()).classified(Verdict::Error, "gone");
        let rendered = TerminalRenderer::new(true).render_record(&record);
        assert!(rendered.contains(&TerminalRenderer::line(&record)));
        assert!(rendered.starts_with('\u{1b}'));
    }

    #[test]
    fn render_joins_lines() {
        let records = vec![
            DiffRecord::modify_tag("/a", "a", "b"),
            DiffRecord::modify_ns("/a", None, Some("urn:x")),
        ];
        let out = TerminalRenderer::plain().render(&records);
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().nth(1).unwrap().starts_with("N [modify_ns] /a: none -> \"urn:x\""));
    }
}
