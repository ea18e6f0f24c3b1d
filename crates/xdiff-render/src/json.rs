//! JSON output.

use xdiff_engine::DiffRecord;

use crate::error::RenderResult;

/// Pretty-printed JSON array of records. Unclassified records omit the
/// `policy` and `policy_note` fields.
pub fn render_json(records: &[DiffRecord]) -> RenderResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
