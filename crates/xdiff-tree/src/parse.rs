//! XML parsing into the read-only node model, using quick-xml's
//! namespace-aware reader.
//!
//! Only elements are kept. Comments, processing instructions, the XML
//! declaration and the doctype are skipped. A node's text is the text that
//! precedes its first child element, comment or processing instruction
//! (anything after is ignored), with entity and character references
//! resolved and surrounding whitespace trimmed.

use std::path::Path;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use tracing::{debug, trace};

use crate::error::{TreeError, TreeResult};
use crate::node::{Document, Node, QName};

/// Parse a document from a string.
pub fn parse_str(input: &str) -> TreeResult<Document> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    TreeBuilder::new(input).build()
}

/// Parse a document from UTF-8 bytes.
pub fn parse_bytes(input: &[u8]) -> TreeResult<Document> {
    parse_str(std::str::from_utf8(input)?)
}

/// Read and parse a document file.
pub fn parse_file(path: impl AsRef<Path>) -> TreeResult<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "parsing document");
    parse_bytes(&bytes)
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    node: Node,
    text: String,
    /// Set once the first child element starts; later text is tail text.
    text_closed: bool,
}

struct TreeBuilder<'i> {
    reader: NsReader<&'i [u8]>,
    stack: Vec<OpenElement>,
    root: Option<Node>,
}

impl<'i> TreeBuilder<'i> {
    fn new(input: &'i str) -> Self {
        Self {
            reader: NsReader::from_str(input),
            stack: Vec::new(),
            root: None,
        }
    }

    fn build(mut self) -> TreeResult<Document> {
        loop {
            let (resolve, event) = match self.reader.read_resolved_event() {
                Ok(pair) => pair,
                Err(e) => return Err(self.parse_error(e)),
            };
            let namespace = resolve_namespace(resolve)?;

            match event {
                Event::Start(ref e) => {
                    let node = self.open_node(namespace, e)?;
                    if let Some(parent) = self.stack.last_mut() {
                        parent.text_closed = true;
                    }
                    self.stack.push(OpenElement {
                        node,
                        text: String::new(),
                        text_closed: false,
                    });
                }
                Event::Empty(ref e) => {
                    let node = self.open_node(namespace, e)?;
                    if let Some(parent) = self.stack.last_mut() {
                        parent.text_closed = true;
                    }
                    self.attach(node)?;
                }
                Event::End(_) => {
                    let open = self.stack.pop().ok_or(TreeError::UnbalancedTags)?;
                    let mut node = open.node;
                    node.set_text(open.text.trim().to_string());
                    self.attach(node)?;
                }
                Event::Text(e) => {
                    let text = e.decode().map_err(|e| self.parse_error(e))?;
                    self.push_text(&text);
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)?;
                    self.push_text(text);
                }
                Event::GeneralRef(e) => {
                    let raw = e.decode().map_err(|e| self.parse_error(e))?;
                    let resolved = self.resolve_entity(&raw)?;
                    self.push_text(&resolved);
                }
                Event::Comment(_) | Event::PI(_) => {
                    if let Some(open) = self.stack.last_mut() {
                        open.text_closed = true;
                    }
                }
                Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if !self.stack.is_empty() {
            return Err(TreeError::UnbalancedTags);
        }
        self.root.map(Document::from_root).ok_or(TreeError::NoRoot)
    }

    fn open_node(&self, namespace: Option<String>, start: &BytesStart<'_>) -> TreeResult<Node> {
        let local = std::str::from_utf8(start.local_name().into_inner())?;
        let name = match namespace {
            Some(ns) => QName::namespaced(ns, local),
            None => QName::local(local),
        };
        let mut node = Node::new(name);

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.parse_error(e))?;
            let key = attr.key;
            if key.as_ref() == b"xmlns" {
                continue;
            }
            if key.prefix().is_some_and(|p| p.as_ref() == b"xmlns") {
                continue;
            }

            let (attr_resolve, _) = self.reader.resolver().resolve_attribute(key);
            let attr_local = std::str::from_utf8(key.local_name().into_inner())?;
            let attr_key = match resolve_namespace(attr_resolve)? {
                Some(ns) => format!("{{{ns}}}{attr_local}"),
                None => attr_local.to_string(),
            };
            let value = attr.unescape_value().map_err(|e| self.parse_error(e))?;
            node.insert_attr(attr_key, value.into_owned());
        }

        trace!(name = %node.name(), attrs = node.attributes().len(), "element");
        Ok(node)
    }

    fn attach(&mut self, node: Node) -> TreeResult<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.node.push_child(node);
        } else if self.root.is_some() {
            return Err(TreeError::MultipleRoots(node.name().to_string()));
        } else {
            self.root = Some(node);
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let Some(open) = self.stack.last_mut() {
            if !open.text_closed {
                open.text.push_str(text);
            }
        }
    }

    fn resolve_entity(&self, raw: &str) -> TreeResult<String> {
        if let Some(resolved) = resolve_xml_entity(raw) {
            return Ok(resolved.to_string());
        }

        if let Some(rest) = raw.strip_prefix('#') {
            let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => rest.parse::<u32>().ok(),
            };
            return code
                .and_then(char::from_u32)
                .map(String::from)
                .ok_or_else(|| self.parse_error(format!("invalid character reference &{raw};")));
        }

        // Entities declared in a DTD are kept verbatim.
        Ok(format!("&{raw};"))
    }

    fn parse_error(&self, message: impl ToString) -> TreeError {
        TreeError::Parse {
            position: self.reader.buffer_position() as u64,
            message: message.to_string(),
        }
    }
}

fn resolve_namespace(resolve: ResolveResult<'_>) -> TreeResult<Option<String>> {
    match resolve {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(TreeError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}
