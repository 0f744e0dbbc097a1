//! A small owned markup tree.
//!
//! [`Element`] is what the declarative binder scans and what
//! [`ElementSurface`](crate::surface::ElementSurface) renders into. Trees can
//! be built by hand or parsed from HTML with [`parse`] / [`parse_fragment`],
//! which run `html5ever` and copy the resulting `RcDom` into owned nodes.
//! Comments and doctypes are dropped, as is whitespace-only text at the top
//! level of a fragment. Text inside elements is kept as written.
//!
//! # Examples
//!
//! ```rust
//! use datalist_widgets::markup::{self, Element};
//!
//! let card = Element::new("div")
//!     .with_attr("class", "card")
//!     .with_child(Element::new("h3").with_text("Widget & Co"));
//! assert_eq!(card.to_html(), r#"<div class="card"><h3>Widget &amp; Co</h3></div>"#);
//!
//! let parsed = markup::parse(r#"<ul id="list"><li>one</li><li>two</li></ul>"#).unwrap();
//! assert_eq!(parsed.tag(), "ul");
//! assert_eq!(parsed.find_all(|e| e.tag() == "li").len(), 2);
//! ```

use crate::error::MarkupError;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A run of text.
    Text(String),
}

impl Node {
    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(&escape(t)),
        }
    }
}

/// An element: tag name, ordered attributes, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute (builder pattern).
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Appends a child element (builder pattern).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a text node (builder pattern).
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// The lower-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true when the attribute is present, whatever its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Removes an attribute, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(index).1)
    }

    /// Iterates over attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Direct children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Inserts a child node at `index`, shifting later children right.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of children.
    pub fn insert(&mut self, index: usize, node: Node) {
        self.children.insert(index, node);
    }

    /// Removes every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replaces the children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::Text(text.to_string()));
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(e) => e.collect_text(out),
                Node::Text(t) => out.push_str(t),
            }
        }
    }

    /// All descendant elements (not including `self`) matching `pred`, in
    /// document order.
    pub fn find_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.collect_matching(&pred, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(e) = child {
                if pred(e) {
                    out.push(e);
                }
                e.collect_matching(pred, out);
            }
        }
    }

    /// The first descendant element matching `pred`.
    pub fn find_first<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.find_first_inner(&pred)
    }

    fn find_first_inner(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(e) = child {
                if pred(e) {
                    return Some(e);
                }
                if let Some(found) = e.find_first_inner(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// The first descendant element matching `pred`, mutably.
    pub fn find_first_mut<F>(&mut self, pred: F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.find_first_mut_inner(&pred)
    }

    fn find_first_mut_inner(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if pred(e) {
                    return Some(e);
                }
                if let Some(found) = e.find_first_mut_inner(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Removes every descendant element matching `pred`, with its subtree.
    /// Returns how many were removed.
    pub fn remove_descendants<F>(&mut self, pred: F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        self.remove_matching(&pred)
    }

    fn remove_matching(&mut self, pred: &dyn Fn(&Element) -> bool) -> usize {
        let before = self.children.len();
        self.children
            .retain(|child| !matches!(child, Node::Element(e) if pred(e)));
        let mut removed = before - self.children.len();
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                removed += e.remove_matching(pred);
            }
        }
        removed
    }

    /// Visits every descendant element (not including `self`) in document order.
    pub fn for_each_descendant_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        self.visit_mut(&mut f);
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                f(e);
                e.visit_mut(f);
            }
        }
    }

    /// Serializes the element as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escapes text for use in HTML content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Parses an HTML fragment into its top-level nodes.
pub fn parse_fragment(html: &str) -> Result<Vec<Node>, MarkupError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let Some(body) = find_body(&dom.document) else {
        return Ok(Vec::new());
    };
    let nodes = body
        .children
        .borrow()
        .iter()
        .filter_map(convert)
        .filter(|node| !node.is_blank_text())
        .collect();
    Ok(nodes)
}

/// Parses HTML and returns its first top-level element.
pub fn parse(html: &str) -> Result<Element, MarkupError> {
    parse_fragment(html)?
        .into_iter()
        .find_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
        .ok_or(MarkupError::NoElement)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(&name.local);
            element.attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            element.children = handle.children.borrow().iter().filter_map(convert).collect();
            Some(Node::Element(element))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_order_and_update_in_place() {
        let mut el = Element::new("DIV").with_attr("a", "1").with_attr("b", "2");
        el.set_attr("a", "3");
        let attrs: Vec<_> = el.attrs().collect();
        assert_eq!(attrs, vec![("a", "3"), ("b", "2")]);
        assert_eq!(el.tag(), "div");
        assert_eq!(el.remove_attr("a").as_deref(), Some("3"));
        assert!(!el.has_attr("a"));
    }

    #[test]
    fn void_and_boolean_attributes_serialize_bare() {
        let input = Element::new("input").with_attr("disabled", "").with_attr("type", "search");
        assert_eq!(input.to_html(), r#"<input disabled type="search">"#);
    }

    #[test]
    fn parsing_keeps_structure_and_inner_whitespace() {
        let root = parse(
            r#"<section data-x="1">
                 <p item.name>placeholder</p>
                 <input data-search>
               </section>"#,
        )
        .unwrap();

        assert_eq!(root.attr("data-x"), Some("1"));
        let elements = root.children().iter().filter_map(Node::as_element).count();
        assert_eq!(elements, 2);
        let p = root.find_first(|e| e.has_attr("item.name")).unwrap();
        assert_eq!(p.text(), "placeholder");
        assert!(root.find_first(|e| e.tag() == "input").is_some());
    }

    #[test]
    fn blank_text_is_dropped_only_around_the_fragment() {
        let nodes = parse_fragment("  <p><b>Ada</b> <i>Lovelace</i></p>\n  ").unwrap();
        assert_eq!(nodes.len(), 1);
        let p = nodes[0].as_element().unwrap();
        assert_eq!(p.text(), "Ada Lovelace");
        assert_eq!(p.to_html(), "<p><b>Ada</b> <i>Lovelace</i></p>");
    }

    #[test]
    fn fragments_may_hold_several_nodes() {
        let nodes = parse_fragment("<li>a</li><li>b</li>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(matches!(parse("just text"), Err(MarkupError::NoElement)));
    }

    #[test]
    fn set_text_replaces_children_and_escapes() {
        let mut el = parse("<p><b>old</b></p>").unwrap();
        el.set_text("<new>");
        assert_eq!(el.to_html(), "<p>&lt;new&gt;</p>");
    }

    #[test]
    fn mutable_search_and_visit() {
        let mut root = Element::new("div")
            .with_child(Element::new("span").with_attr("id", "a"))
            .with_child(Element::new("span").with_attr("id", "b"));

        root.find_first_mut(|e| e.attr("id") == Some("b"))
            .unwrap()
            .set_text("found");
        let mut seen = 0;
        root.for_each_descendant_mut(|_| seen += 1);

        assert_eq!(seen, 2);
        assert_eq!(root.text(), "found");

        assert_eq!(root.remove_descendants(|e| e.tag() == "span"), 2);
        assert!(root.children().is_empty());
    }
}
