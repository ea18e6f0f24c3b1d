//! Node, qualified name and document types.

use std::collections::BTreeMap;
use std::fmt;

use quick_xml::escape::escape;

/// Attribute map of a node. Keys are unique; namespaced attributes are keyed
/// in Clark notation (`{uri}local`).
pub type Attributes = BTreeMap<String, String>;

/// A qualified element name: optional namespace URI plus local name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// A name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// A name bound to a namespace URI.
    pub fn namespaced(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// Parse a Clark-notation name (`{uri}local` or `local`).
    pub fn from_clark(name: &str) -> Self {
        match name.strip_prefix('{').and_then(|rest| rest.split_once('}')) {
            Some((ns, local)) => Self::namespaced(ns, local),
            None => Self::local(name),
        }
    }

    /// The namespace URI, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local part of the name.
    pub fn local_name(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One element of a parsed document.
///
/// Nodes are built by the parser (or the builder methods below) and are
/// read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    name: QName,
    attributes: Attributes,
    text: String,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty element with the given qualified name.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Shorthand for an element without a namespace.
    pub fn element(local: impl Into<String>) -> Self {
        Self::new(QName::local(local))
    }

    /// Builder: set the namespace URI.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.name.namespace = Some(namespace.into());
        self
    }

    /// Builder: add or replace an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: set the direct text. Surrounding whitespace is trimmed.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text = text.as_ref().trim().to_string();
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn insert_attr(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        self.name.local_name()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.name.namespace()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Trimmed direct text (empty when the element has none).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Serialize this subtree as XML text.
    ///
    /// Default namespaces are declared wherever an element's namespace
    /// differs from its parent's; namespaced attributes get generated
    /// `ns0`, `ns1`, ... prefixes.
    pub fn to_xml(&self) -> String {
        self.to_string()
    }

    fn write_xml(&self, f: &mut fmt::Formatter<'_>, parent_ns: Option<&str>) -> fmt::Result {
        let local = self.local_name();
        write!(f, "<{local}")?;

        if self.namespace() != parent_ns {
            write!(f, " xmlns=\"{}\"", escape(self.namespace().unwrap_or_default()))?;
        }

        let mut prefixes: Vec<String> = Vec::new();
        for (key, value) in &self.attributes {
            let name = QName::from_clark(key);
            match name.namespace() {
                Some(ns) => {
                    let idx = match prefixes.iter().position(|p| p == ns) {
                        Some(idx) => idx,
                        None => {
                            prefixes.push(ns.to_string());
                            let idx = prefixes.len() - 1;
                            write!(f, " xmlns:ns{idx}=\"{}\"", escape(ns))?;
                            idx
                        }
                    };
                    write!(f, " ns{idx}:{}=\"{}\"", name.local_name(), escape(value.as_str()))?;
                }
                None => write!(f, " {key}=\"{}\"", escape(value.as_str()))?,
            }
        }

        if self.text.is_empty() && self.children.is_empty() {
            return f.write_str("/>");
        }

        write!(f, ">{}", escape(self.text.as_str()))?;
        for child in &self.children {
            child.write_xml(f, self.namespace())?;
        }
        write!(f, "</{local}>")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_xml(f, None)
    }
}

/// A parsed document. Owns the whole tree; comparisons borrow from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap an already-built root element.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Lowercased local name of the root element. Used to discover the
    /// ruleset for a document by convention.
    pub fn root_key(&self) -> String {
        self.root.local_name().to_lowercase()
    }
}
