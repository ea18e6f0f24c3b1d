//! HTML table report.

use std::fmt::Write;

use quick_xml::escape::escape;
use xdiff_engine::{DiffKind, DiffRecord, DiffValue, Verdict};

use crate::terminal::icon;

/// Longest value shown in a cell, in characters.
pub const MAX_CELL_CHARS: usize = 200;

fn kind_background(kind: DiffKind) -> &'static str {
    match kind {
        DiffKind::Add => "#d4f8e8",
        DiffKind::Delete => "#ffd6d6",
        DiffKind::ModifyTag => "#e0d4fd",
        DiffKind::ModifyAttr | DiffKind::ModifyText => "#d4eafd",
        DiffKind::ModifyNs => "#ffffff",
        DiffKind::Move => "#fce4ff",
    }
}

fn verdict_background(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Allow => "#d4edda",
        Verdict::Warn => "#fff3cd",
        Verdict::Error => "#f8d7da",
    }
}

/// Row background: the verdict color when classified, else the kind color.
pub fn row_background(record: &DiffRecord) -> &'static str {
    record
        .policy()
        .map(verdict_background)
        .unwrap_or_else(|| kind_background(record.kind()))
}

fn cell(value: Option<&DiffValue>) -> String {
    let text = value.map(ToString::to_string).unwrap_or_default();
    let truncated: String = text.chars().take(MAX_CELL_CHARS).collect();
    escape(truncated.as_str()).into_owned()
}

/// Render records as a standalone HTML table.
pub fn render_html(records: &[DiffRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        "<table border=\"1\" cellspacing=\"0\" cellpadding=\"4\" \
         style=\"border-collapse:collapse;font-size:13px;\">\n",
    );
    out.push_str(
        "<thead><tr style=\"background:#eee;font-weight:bold;\">\
         <th>kind</th><th>xpath</th><th>old</th><th>new</th><th>policy</th><th>note</th>\
         </tr></thead>\n<tbody>\n",
    );
    for record in records {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "<tr style=\"background:{bg};\"><td>{icon} <b>{kind}</b></td>\
             <td style=\"font-family:monospace;\">{path}</td>\
             <td style=\"max-width:200px;overflow:auto;font-family:monospace;\">{old}</td>\
             <td style=\"max-width:200px;overflow:auto;font-family:monospace;\">{new}</td>\
             <td><b>{policy}</b></td><td>{note}</td></tr>",
            bg = row_background(record),
            icon = icon(record.kind()),
            kind = record.kind(),
            path = escape(record.path()),
            old = cell(record.before()),
            new = cell(record.after()),
            policy = record.policy().map(Verdict::as_str).unwrap_or(""),
            note = escape(record.policy_note().unwrap_or("")),
        );
    }
    out.push_str("</tbody></table>\n");
    out
}
