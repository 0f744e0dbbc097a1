//! Declarative binding: lists configured entirely by markup attributes.
//!
//! [`scan`] walks a markup tree and turns every element carrying
//! [`attrs::ID`] into a [`list::Model`] rendering into an
//! [`ElementSurface`]. The item template is the first descendant marked
//! with [`attrs::TEMPLATE`]; inside it, elements carrying
//! `item.<field>` receive the record's field as text.
//!
//! ```
//! use datalist_widgets::binder;
//! use datalist_widgets::markup;
//!
//! let page = markup::parse(r#"
//!   <div data-list-id="products" data-list-source="/products.json"
//!        data-list-page-size="5" data-list-search-key="name, category">
//!     <input data-list-search-input>
//!     <div item hidden><h3 item.name></h3><span item.category></span></div>
//!   </div>
//! "#).unwrap();
//!
//! let scan = binder::scan(&page);
//! assert!(scan.warnings.is_empty());
//! let list = &scan.instances[0];
//! assert_eq!(list.key(), Some("products"));
//! assert_eq!(list.pagination_settings().items_per_page, 5);
//! assert_eq!(list.search_settings().search_keys, vec!["name", "category"]);
//! ```
//!
//! Problems with one candidate never stop the scan; they are logged and
//! returned as [`DeclarativeWarning`]s.

use crate::config::{
    PaginationConfig, PaginationOption, SearchConfig, SearchKeys, SearchOption,
    DEFAULT_ITEMS_PER_PAGE,
};
use crate::error::DeclarativeWarning;
use crate::list::{ItemTemplate, Model};
use crate::loader::{default_fetcher, DataSource, Fetch};
use crate::markup::{Element, Node};
use crate::record::Record;
use crate::surface::ElementSurface;
use std::collections::HashSet;
use std::sync::Arc;

/// Attribute names of the declarative surface.
pub mod attrs {
    /// Instance key; marks an element as a list.
    pub const ID: &str = "data-list-id";
    /// Data resource identifier. Required.
    pub const SOURCE: &str = "data-list-source";
    /// Records per page. Defaults to 10.
    pub const PAGE_SIZE: &str = "data-list-page-size";
    /// Field name, or comma-separated field names, to search.
    pub const SEARCH_KEY: &str = "data-list-search-key";
    /// Marks the item template.
    pub const TEMPLATE: &str = "item";
    /// Prefix of text-binding attributes inside the template, as in `item.name`.
    pub const FIELD_PREFIX: &str = "item.";
    /// Live search field.
    pub const SEARCH_INPUT: &str = "data-list-search-input";
    /// Immediate-search trigger.
    pub const SEARCH_ACTION: &str = "data-list-search-action";
    /// Pagination mount point.
    pub const PAGINATION: &str = "data-list-pagination";
}

/// An item template built from a template element.
///
/// Each render clones the element, and every element of the clone with an
/// `item.<field>` attribute gets that field's text as its only child.
/// Fields that are missing or null leave the element's content as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTemplate {
    element: Element,
}

impl MarkupTemplate {
    /// Prepares `template`: reveals it and drops the template marker.
    pub fn new(template: &Element) -> Self {
        let mut element = template.clone();
        element.remove_attr(attrs::TEMPLATE);
        element.remove_attr("hidden");
        if let Some(style) = element.remove_attr("style") {
            let kept = strip_display_none(&style);
            if !kept.is_empty() {
                element.set_attr("style", &kept);
            }
        }
        Self { element }
    }

    /// The prepared template element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Binds `record` into a fresh copy of the template.
    pub fn bind(&self, record: &Record) -> Element {
        let mut element = self.element.clone();
        bind_fields(&mut element, record);
        element.for_each_descendant_mut(|e| bind_fields(e, record));
        element
    }
}

impl ItemTemplate for MarkupTemplate {
    fn render(&self, record: &Record) -> String {
        self.bind(record).to_html()
    }
}

fn bind_fields(element: &mut Element, record: &Record) {
    let value = element
        .attrs()
        .filter_map(|(name, _)| name.strip_prefix(attrs::FIELD_PREFIX))
        .filter_map(|field| record.get_loose(field))
        .find(|value| !value.is_null())
        .map(ToString::to_string);
    if let Some(value) = value {
        element.set_text(&value);
    }
}

fn strip_display_none(style: &str) -> String {
    style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            let compact: String = decl
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            compact != "display:none"
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of a scan.
#[derive(Debug, Default)]
pub struct Scan {
    /// One list per valid candidate, in document order. Nothing is loaded yet.
    pub instances: Vec<Model<ElementSurface>>,
    /// Problems found along the way.
    pub warnings: Vec<DeclarativeWarning>,
}

/// Scans `root` and its descendants using the default fetcher.
pub fn scan(root: &Element) -> Scan {
    scan_with(root, default_fetcher())
}

/// Scans `root` and its descendants; every list loads through `fetcher`.
pub fn scan_with(root: &Element, fetcher: Arc<dyn Fetch>) -> Scan {
    let mut candidates = Vec::new();
    if root.has_attr(attrs::ID) {
        candidates.push(root);
    }
    candidates.extend(root.find_all(|e| e.has_attr(attrs::ID)));

    let mut scan = Scan::default();
    let mut seen = HashSet::new();
    for candidate in candidates {
        if let Some(list) = bind_candidate(candidate, &fetcher, &mut seen, &mut scan.warnings) {
            scan.instances.push(list);
        }
    }
    log::debug!(
        "declarative scan found {} list(s), {} warning(s)",
        scan.instances.len(),
        scan.warnings.len()
    );
    scan
}

fn warn(warnings: &mut Vec<DeclarativeWarning>, warning: DeclarativeWarning) {
    log::warn!("{}", warning);
    warnings.push(warning);
}

fn bind_candidate(
    candidate: &Element,
    fetcher: &Arc<dyn Fetch>,
    seen: &mut HashSet<String>,
    warnings: &mut Vec<DeclarativeWarning>,
) -> Option<Model<ElementSurface>> {
    let id = candidate.attr(attrs::ID).unwrap_or_default().trim().to_string();
    if id.is_empty() {
        warn(warnings, DeclarativeWarning::MissingId);
        return None;
    }

    let source = candidate
        .attr(attrs::SOURCE)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let Some(source) = source else {
        warn(warnings, DeclarativeWarning::MissingSource { id });
        return None;
    };

    let templates = candidate.find_all(|e| e.has_attr(attrs::TEMPLATE));
    let Some(template) = templates.first() else {
        warn(warnings, DeclarativeWarning::MissingTemplate { id });
        return None;
    };
    if templates.len() > 1 {
        warn(
            warnings,
            DeclarativeWarning::ExtraTemplates {
                id: id.clone(),
                count: templates.len(),
            },
        );
    }
    let template = MarkupTemplate::new(template);

    if !seen.insert(id.clone()) {
        warn(warnings, DeclarativeWarning::DuplicateId { id });
        return None;
    }

    let has_input = candidate
        .find_first(|e| e.has_attr(attrs::SEARCH_INPUT))
        .is_some();
    let has_action = candidate
        .find_first(|e| e.has_attr(attrs::SEARCH_ACTION))
        .is_some();
    let search_keys = candidate.attr(attrs::SEARCH_KEY);
    let search = if search_keys.is_some() || has_input || has_action {
        SearchOption::Custom(SearchConfig {
            keys: search_keys.map(SearchKeys::parse_list),
            ..SearchConfig::default()
        })
    } else {
        SearchOption::Toggle(false)
    };

    let page_size = candidate
        .attr(attrs::PAGE_SIZE)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE as i64);
    let pagination = PaginationOption::Custom(PaginationConfig {
        enabled: None,
        items_per_page: Some(page_size),
    });

    let mut container = candidate.clone();
    container.remove_descendants(|e| e.has_attr(attrs::TEMPLATE));
    let pagination_id = mount_pagination(&mut container, &id);
    let surface = ElementSurface::new(container, &pagination_id);

    let mut builder = Model::builder()
        .container(surface)
        .data(DataSource::Remote(source.to_string()))
        .item_template(template)
        .key(&id)
        .search(search)
        .pagination(pagination)
        .fetcher(Arc::clone(fetcher));
    if has_input {
        builder = builder.with_search_input();
    }
    if has_action {
        builder = builder.with_search_action();
    }

    match builder.build() {
        Ok(list) => {
            log::debug!("bound declarative list `{}` to {}", id, source);
            Some(list)
        }
        Err(e) => {
            log::warn!("list `{}` could not be built: {}", id, e);
            None
        }
    }
}

/// Returns the id of the pagination mount, creating the mount or its id
/// as needed.
fn mount_pagination(container: &mut Element, id: &str) -> String {
    let generated = format!("{}-pagination", id);
    match container.find_first_mut(|e| e.has_attr(attrs::PAGINATION)) {
        Some(mount) => {
            let existing = mount
                .attr("id")
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            existing.unwrap_or_else(|| {
                mount.set_attr("id", &generated);
                generated
            })
        }
        None => {
            container.push(Node::Element(
                Element::new("div")
                    .with_attr(attrs::PAGINATION, "")
                    .with_attr("id", &generated),
            ));
            generated
        }
    }
}
