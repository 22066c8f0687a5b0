//! Parsed MPD element tree
//!
//! A [`ManifestDocument`] is an immutable, owned tree of [`Element`]s built
//! once from MPD text. Element and attribute names are stored as local names,
//! so `<mpd:AdaptationSet>` and `<AdaptationSet>` under a default namespace
//! look the same to the indexers.

mod parser;

use crate::Result;
use std::path::Path;
use tracing::{debug, instrument};

/// `AdaptationSet` element name
pub const ADAPTATION_SET: &str = "AdaptationSet";
/// `Representation` element name
pub const REPRESENTATION: &str = "Representation";
/// `Role` element name
pub const ROLE: &str = "Role";

/// A single element of the manifest tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first attribute with the given local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Element children in document order
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Direct children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first pre-order traversal, starting with `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over an element subtree
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// An already-parsed MPD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    root: Element,
}

impl ManifestDocument {
    /// Wrap an element tree built elsewhere
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse MPD text
    #[instrument(skip(xml), fields(len = xml.len()))]
    pub fn parse(xml: &str) -> Result<Self> {
        let root = parser::parse_tree(xml)?;
        debug!(root = root.name(), "Parsed manifest");
        Ok(Self { root })
    }

    /// Read and parse an MPD from a local file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every `AdaptationSet` element, in document order, at any depth
    pub fn adaptation_sets(&self) -> impl Iterator<Item = &Element> {
        self.root.descendants().filter(|e| e.name() == ADAPTATION_SET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendants_are_pre_order() {
        let root = Element::new("MPD").with_child(
            Element::new("Period")
                .with_child(Element::new("AdaptationSet").with_attribute("id", "1"))
                .with_child(Element::new("AdaptationSet").with_attribute("id", "2")),
        );

        let names: Vec<_> = root.descendants().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["MPD", "Period", "AdaptationSet", "AdaptationSet"]);

        let doc = ManifestDocument::new(root);
        let ids: Vec<_> = doc
            .adaptation_sets()
            .filter_map(|a| a.attribute("id"))
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn test_attribute_lookup() {
        let el = Element::new("Representation")
            .with_attribute("id", "v1")
            .with_attribute("bandwidth", "500000");
        assert_eq!(el.attribute("bandwidth"), Some("500000"));
        assert_eq!(el.attribute("width"), None);
    }

    #[test]
    fn test_child_lookup() {
        let el = Element::new("AdaptationSet")
            .with_child(Element::new("Role").with_attribute("value", "alternate"))
            .with_child(Element::new("Representation"))
            .with_child(Element::new("Representation"));
        assert_eq!(el.child("Role").and_then(|r| r.attribute("value")), Some("alternate"));
        assert_eq!(el.children_named("Representation").count(), 2);
        assert!(el.child("SegmentTemplate").is_none());
    }
}
