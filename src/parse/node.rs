//! Generic markup node tree
//!
//! The neutral tree exchanged between the XML reader/writer and the
//! document builder/serializer. It knows nothing about SVG semantics.

use crate::models::Attribute;

/// One element of a parsed markup document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlNode {
    /// Local element name as written (case preserved)
    pub name: String,
    /// Default namespace URI of the element, if any
    pub namespace: Option<String>,
    /// Attributes in document order; prefixed names keep their prefix
    pub attributes: Vec<Attribute>,
    /// Leading text content (used for `<title>` and `<desc>`)
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Exact-name attribute lookup
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Case-insensitive element name test
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Direct child elements with the given name (case-insensitive)
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |child| child.is(name))
    }
}
