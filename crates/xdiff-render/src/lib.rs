//! Presentation of xdiff records.
//!
//! Renderers are pure consumers of a finished record list; none of them
//! alter records or depend on how they were produced.
//!
//! # Key Types
//!
//! - [`TerminalRenderer`] -- One colored line per record
//! - [`render_html`] -- HTML table with verdict-colored rows
//! - [`render_json`] -- Pretty-printed JSON array
//! - [`Summary`] -- Counts per kind and per verdict
//! - [`Format`] -- Output format selector

pub mod error;
pub mod html;
pub mod json;
pub mod summary;
pub mod terminal;

pub use error::{RenderError, RenderResult};
pub use html::render_html;
pub use json::render_json;
pub use summary::Summary;
pub use terminal::TerminalRenderer;

use xdiff_engine::DiffRecord;

/// Output format for a record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Terminal lines, colored when `color` is set.
    Text { color: bool },
    Json,
    Html,
}

impl Format {
    pub fn render(self, records: &[DiffRecord]) -> RenderResult<String> {
        match self {
            Format::Text { color } => Ok(TerminalRenderer::new(color).render(records)),
            Format::Json => render_json(records),
            Format::Html => Ok(render_html(records)),
        }
    }
}
