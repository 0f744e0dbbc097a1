//! View surfaces: where a list renders.
//!
//! The engine only ever clears a [`Region`] or appends a markup fragment to
//! it. [`MemorySurface`] records fragments per region, which is what tests
//! and non-HTML hosts use. [`ElementSurface`] renders into an owned
//! [`Element`] tree, turning each appended fragment into exactly one
//! element.

use crate::markup::{self, Element, Node};

/// Attribute marking the element that receives rendered items.
pub const ITEMS_ATTR: &str = "data-list-items";
/// Attribute marking the element that receives loading and error blocks.
pub const STATUS_ATTR: &str = "data-list-status";

/// A part of the surface the engine writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Rendered records and the empty-state block.
    Items,
    /// Page controls.
    Pagination,
    /// Loading and error blocks.
    Status,
}

impl Region {
    /// All regions, in render order.
    pub const ALL: [Region; 3] = [Region::Status, Region::Items, Region::Pagination];
}

/// Capability to display rendered output.
pub trait Surface {
    /// Removes everything previously appended to `region`.
    fn clear(&mut self, region: Region);

    /// Appends a markup fragment to `region`.
    fn append(&mut self, region: Region, fragment: &str);

    /// Clears every region.
    fn clear_all(&mut self) {
        for region in Region::ALL {
            self.clear(region);
        }
    }
}

/// A surface that keeps fragments in memory.
///
/// ```rust
/// use datalist_widgets::surface::{MemorySurface, Region, Surface};
///
/// let mut surface = MemorySurface::new();
/// surface.append(Region::Items, "<li>a</li>");
/// surface.append(Region::Items, "<li>b</li>");
/// assert_eq!(surface.html(Region::Items), "<li>a</li><li>b</li>");
///
/// surface.clear(Region::Items);
/// assert!(surface.is_blank());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    items: Vec<String>,
    pagination: Vec<String>,
    status: Vec<String>,
}

impl MemorySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragments currently in `region`, in append order.
    pub fn fragments(&self, region: Region) -> &[String] {
        match region {
            Region::Items => &self.items,
            Region::Pagination => &self.pagination,
            Region::Status => &self.status,
        }
    }

    /// Concatenated markup of `region`.
    pub fn html(&self, region: Region) -> String {
        self.fragments(region).concat()
    }

    /// Returns true when no region holds anything.
    pub fn is_blank(&self) -> bool {
        Region::ALL.iter().all(|r| self.fragments(*r).is_empty())
    }

    fn region_mut(&mut self, region: Region) -> &mut Vec<String> {
        match region {
            Region::Items => &mut self.items,
            Region::Pagination => &mut self.pagination,
            Region::Status => &mut self.status,
        }
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self, region: Region) {
        self.region_mut(region).clear();
    }

    fn append(&mut self, region: Region, fragment: &str) {
        self.region_mut(region).push(fragment.to_string());
    }
}

/// A surface backed by an owned markup tree.
///
/// The container element is searched for a status element
/// (`data-list-status`), an items element (`data-list-items`) and a
/// pagination element (matched by id). Missing ones are added to the
/// container as `div`s, with status and items placed before the pagination
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSurface {
    root: Element,
    pagination_id: String,
}

impl ElementSurface {
    /// Wraps `root`, creating any missing region elements.
    pub fn new(mut root: Element, pagination_id: &str) -> Self {
        let mut missing = Vec::new();
        if root.find_first(|e| e.has_attr(STATUS_ATTR)).is_none() {
            missing.push(Node::Element(Element::new("div").with_attr(STATUS_ATTR, "")));
        }
        if root.find_first(|e| e.has_attr(ITEMS_ATTR)).is_none() {
            missing.push(Node::Element(Element::new("div").with_attr(ITEMS_ATTR, "")));
        }
        // Created regions go ahead of a pagination mount that is a direct child.
        let mut at = root
            .children()
            .iter()
            .position(|n| n.as_element().and_then(|e| e.attr("id")) == Some(pagination_id))
            .unwrap_or(root.children().len());
        for node in missing {
            root.insert(at, node);
            at += 1;
        }
        if root
            .find_first(|e| e.attr("id") == Some(pagination_id))
            .is_none()
        {
            root.push(Node::Element(
                Element::new("div").with_attr("id", pagination_id),
            ));
        }
        Self {
            root,
            pagination_id: pagination_id.to_string(),
        }
    }

    /// The container element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consumes the surface, returning the container element.
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Id of the pagination element.
    pub fn pagination_id(&self) -> &str {
        &self.pagination_id
    }

    /// The element backing `region`.
    pub fn region(&self, region: Region) -> Option<&Element> {
        match region {
            Region::Items => self.root.find_first(|e| e.has_attr(ITEMS_ATTR)),
            Region::Status => self.root.find_first(|e| e.has_attr(STATUS_ATTR)),
            Region::Pagination => {
                let id = self.pagination_id.as_str();
                self.root.find_first(|e| e.attr("id") == Some(id))
            }
        }
    }

    /// Serialized container.
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    fn region_mut(&mut self, region: Region) -> Option<&mut Element> {
        match region {
            Region::Items => self.root.find_first_mut(|e| e.has_attr(ITEMS_ATTR)),
            Region::Status => self.root.find_first_mut(|e| e.has_attr(STATUS_ATTR)),
            Region::Pagination => {
                let id = self.pagination_id.clone();
                self.root
                    .find_first_mut(move |e| e.attr("id") == Some(id.as_str()))
            }
        }
    }
}

/// Turns a fragment into a single element: its only element when it has
/// exactly one and no stray text, otherwise a `div` wrapping everything.
fn materialize(fragment: &str) -> Option<Element> {
    let nodes = match markup::parse_fragment(fragment) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("could not parse rendered fragment: {}", e);
            return None;
        }
    };
    if nodes.is_empty() {
        return None;
    }
    if let [Node::Element(only)] = nodes.as_slice() {
        return Some(only.clone());
    }
    let mut wrapper = Element::new("div");
    for node in nodes {
        wrapper.push(node);
    }
    Some(wrapper)
}

impl Surface for ElementSurface {
    fn clear(&mut self, region: Region) {
        if let Some(target) = self.region_mut(region) {
            target.clear();
        }
    }

    fn append(&mut self, region: Region, fragment: &str) {
        let Some(element) = materialize(fragment) else {
            return;
        };
        match self.region_mut(region) {
            Some(target) => target.push(Node::Element(element)),
            None => log::warn!("surface has no {:?} region", region),
        }
    }
}
