//! The list instance and its builder.

use super::types::{ItemTemplate, Lifecycle, Messages, Overlay};
use crate::bindings::{Bindings, EventSource};
use crate::config::{
    normalize_pagination, normalize_search, ListConfig, PaginationOption, PaginationSettings,
    SearchOption, SearchSettings,
};
use crate::debounce::Debouncer;
use crate::error::ConfigError;
use crate::loader::{default_fetcher, DataSource, Fetch};
use crate::paginator;
use crate::record::Record;
use crate::surface::Surface;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// One list instance: dataset, filtered view, page state and the surface it
/// renders into.
///
/// Build one with [`Model::builder`]:
///
/// ```
/// use datalist_widgets::config::{PaginationConfig, PaginationOption};
/// use datalist_widgets::list::Model;
/// use datalist_widgets::surface::{MemorySurface, Region};
/// use datalist_widgets::{DataSource, Record};
///
/// let records: Vec<Record> = (1..=25)
///     .map(|n| Record::new().with("name", format!("Item {}", n)))
///     .collect();
///
/// let mut list = Model::builder()
///     .container(MemorySurface::new())
///     .data(DataSource::records(records))
///     .item_template(|r: &Record| format!("<li>{}</li>", r.text("name").unwrap_or_default()))
///     .pagination(PaginationOption::Custom(PaginationConfig {
///         enabled: None,
///         items_per_page: Some(10),
///     }))
///     .build()
///     .unwrap();
///
/// futures::executor::block_on(list.load()).unwrap();
/// assert_eq!(list.surface().fragments(Region::Items).len(), 10);
///
/// list.go_to_page(3);
/// assert_eq!(list.current_page_slice().len(), 5);
/// ```
pub struct Model<S: Surface> {
    pub(super) id: i64,
    pub(super) key: Option<String>,
    pub(super) surface: S,
    pub(super) template: Box<dyn ItemTemplate>,
    pub(super) source: DataSource,
    pub(super) fetcher: Arc<dyn Fetch>,
    pub(super) dataset: Vec<Record>,
    pub(super) filtered: Vec<Record>,
    pub(super) paginator: paginator::Model,
    pub(super) search: SearchSettings,
    pub(super) pagination: PaginationSettings,
    pub(super) query: String,
    pub(super) debouncer: Debouncer,
    pub(super) bindings: Bindings,
    pub(super) messages: Messages,
    pub(super) overlay: Option<Overlay>,
    pub(super) lifecycle: Lifecycle,
    pub(super) load_tag: u64,
}

impl<S: Surface> std::fmt::Debug for Model<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("lifecycle", &self.lifecycle)
            .field("records", &self.dataset.len())
            .field("filtered", &self.filtered.len())
            .field("page", &self.paginator.page)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Model<S> {
    /// Starts building a list.
    pub fn builder() -> Builder<S> {
        Builder::new()
    }

    /// Process-unique id; messages carry it to address this instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Registry key, if the list has one.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The surface the list renders into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The loaded records, in source order.
    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    /// Records matching the active query, in source order.
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    /// The active query; empty when unfiltered.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current page, 1-based.
    pub fn page(&self) -> usize {
        self.paginator.page
    }

    /// Total pages of the filtered view, at least 1.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages
    }

    /// Normalized search settings.
    pub fn search_settings(&self) -> &SearchSettings {
        &self.search
    }

    /// Normalized pagination settings.
    pub fn pagination_settings(&self) -> PaginationSettings {
        self.pagination
    }

    /// Attached event handlers.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Where the instance is in its life.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns true once [`destroy`](Model::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// The data source this list loads from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// The query waiting for its debounce window, if any.
    pub fn pending_query(&self) -> Option<&str> {
        self.debouncer.pending()
    }
}

/// Builder for [`Model`].
///
/// `container`, `data` and `item_template` are required; the rest default to
/// search and pagination disabled, the default fetcher and default messages.
pub struct Builder<S: Surface> {
    container: Option<S>,
    data: Option<DataSource>,
    template: Option<Box<dyn ItemTemplate>>,
    search: Option<SearchOption>,
    pagination: Option<PaginationOption>,
    fetcher: Option<Arc<dyn Fetch>>,
    messages: Messages,
    key: Option<String>,
    search_input: bool,
    search_action: bool,
}

impl<S: Surface> Default for Builder<S> {
    fn default() -> Self {
        Self {
            container: None,
            data: None,
            template: None,
            search: None,
            pagination: None,
            fetcher: None,
            messages: Messages::default(),
            key: None,
            search_input: false,
            search_action: false,
        }
    }
}

impl<S: Surface> Builder<S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the surface to render into.
    pub fn container(mut self, surface: S) -> Self {
        self.container = Some(surface);
        self
    }

    /// Sets the data source.
    pub fn data(mut self, source: impl Into<DataSource>) -> Self {
        self.data = Some(source.into());
        self
    }

    /// Sets the item template.
    pub fn item_template(mut self, template: impl ItemTemplate + 'static) -> Self {
        self.template = Some(Box::new(template));
        self
    }

    /// Sets the search option.
    pub fn search(mut self, option: SearchOption) -> Self {
        self.search = Some(option);
        self
    }

    /// Sets the pagination option.
    pub fn pagination(mut self, option: PaginationOption) -> Self {
        self.pagination = Some(option);
        self
    }

    /// Applies a deserialized configuration: data, search and pagination.
    pub fn config(mut self, config: ListConfig) -> Self {
        self.data = Some(config.data);
        self.search = config.search;
        self.pagination = config.pagination;
        self
    }

    /// Sets the fetch capability used for remote sources.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Sets the user-facing strings.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the registry key.
    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Attaches a live (debounced) search field. Ignored when search is disabled.
    pub fn with_search_input(mut self) -> Self {
        self.search_input = true;
        self
    }

    /// Attaches an immediate search action. Ignored when search is disabled.
    pub fn with_search_action(mut self) -> Self {
        self.search_action = true;
        self
    }

    /// Validates the options and creates the instance.
    ///
    /// Nothing is loaded or rendered yet; call [`Model::load`] or
    /// [`Model::load_cmd`].
    pub fn build(self) -> Result<Model<S>, ConfigError> {
        let surface = self.container.ok_or(ConfigError::MissingContainer)?;
        let source = self.data.ok_or(ConfigError::MissingData)?;
        let template = self.template.ok_or(ConfigError::MissingItemTemplate)?;

        let search = normalize_search(self.search.as_ref());
        let pagination = normalize_pagination(self.pagination.as_ref());

        let id = next_id();
        let mut bindings = Bindings::new();
        if search.enabled {
            if self.search_input {
                bindings.attach(EventSource::SearchInput);
            }
            if self.search_action {
                bindings.attach(EventSource::SearchAction);
            }
        }

        Ok(Model {
            id,
            key: self.key,
            surface,
            template,
            source,
            fetcher: self.fetcher.unwrap_or_else(default_fetcher),
            dataset: Vec::new(),
            filtered: Vec::new(),
            paginator: paginator::Model::new().with_per_page(pagination.items_per_page),
            debouncer: Debouncer::new(id, search.debounce()),
            search,
            pagination,
            query: String::new(),
            bindings,
            messages: self.messages,
            overlay: None,
            lifecycle: Lifecycle::Idle,
            load_tag: 0,
        })
    }
}
