//! Read-only XML tree model for xdiff.
//!
//! Documents are parsed once into an owned [`Document`] whose [`Node`]s are
//! then only borrowed by the diff engine. Each node carries exactly what the
//! structural comparison needs and nothing more.
//!
//! # Key Types
//!
//! - [`Document`] -- A parsed document owning its root [`Node`]
//! - [`Node`] -- Qualified name, attribute map, trimmed text, ordered children
//! - [`QName`] -- Namespace URI (optional) plus local name
//! - [`TreeError`] -- Parse and I/O failures

pub mod error;
pub mod node;
pub mod parse;

pub use error::{TreeError, TreeResult};
pub use node::{Attributes, Document, Node, QName};
pub use parse::{parse_bytes, parse_file, parse_str};
