//! Core types of the list engine.
//!
//! This module contains the item-rendering capability, the user-facing
//! strings, the lifecycle states and the messages a list reacts to.

use crate::error::DataError;
use crate::paginator::PageControlKind;
use crate::record::Record;

/// Renders one record into a markup fragment.
///
/// Any `Fn(&Record) -> String` is a template:
///
/// ```
/// use datalist_widgets::list::ItemTemplate;
/// use datalist_widgets::Record;
///
/// let template = |r: &Record| format!("<li>{}</li>", r.text("name").unwrap_or_default());
/// let record = Record::new().with("name", "Widget");
/// assert_eq!(template.render(&record), "<li>Widget</li>");
/// ```
///
/// Templates are responsible for escaping the field values they interpolate.
pub trait ItemTemplate: Send + Sync {
    /// Returns the fragment for `record`.
    fn render(&self, record: &Record) -> String;
}

impl<F> ItemTemplate for F
where
    F: Fn(&Record) -> String + Send + Sync,
{
    fn render(&self, record: &Record) -> String {
        self(record)
    }
}

/// User-facing strings shown by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the dataset itself is empty.
    pub empty_data: String,
    /// Shown when a query or page leaves nothing to display.
    pub no_results: String,
    /// Body of the loading block.
    pub loading: String,
    /// Heading of the error block shown when loading fails.
    pub load_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_data: "No data available".to_string(),
            no_results: "No results found".to_string(),
            loading: "Loading...".to_string(),
            load_failed: "Failed to load data".to_string(),
        }
    }
}

impl Messages {
    /// Sets the empty-dataset message.
    pub fn with_empty_data(mut self, message: &str) -> Self {
        self.empty_data = message.to_string();
        self
    }

    /// Sets the no-results message.
    pub fn with_no_results(mut self, message: &str) -> Self {
        self.no_results = message.to_string();
        self
    }

    /// Sets the loading message.
    pub fn with_loading(mut self, message: &str) -> Self {
        self.loading = message.to_string();
        self
    }

    /// Sets the load-failure heading.
    pub fn with_load_failed(mut self, message: &str) -> Self {
        self.load_failed = message.to_string();
        self
    }
}

/// Where an instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built, nothing loaded yet.
    Idle,
    /// A load is in progress.
    Loading,
    /// Data is loaded and rendered.
    Ready,
    /// The last load failed; the error block is shown.
    Failed,
    /// `destroy()` ran; every operation is a no-op.
    Destroyed,
}

/// What the status region currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overlay {
    Loading,
    Error,
}

/// The live search field changed. Debounced.
#[derive(Debug, Clone)]
pub struct SearchInputMsg {
    /// Target instance.
    pub id: i64,
    /// Current content of the field.
    pub value: String,
}

/// The search action was triggered. Runs immediately.
#[derive(Debug, Clone)]
pub struct SearchSubmitMsg {
    /// Target instance.
    pub id: i64,
    /// Current content of the search field.
    pub value: String,
}

/// A pagination control was activated.
#[derive(Debug, Clone)]
pub struct PageMsg {
    /// Target instance.
    pub id: i64,
    /// The activated control.
    pub control: PageControlKind,
}

/// A load started with [`Model::load_cmd`](super::Model::load_cmd) finished.
#[derive(Debug, Clone)]
pub struct LoadedMsg {
    /// Target instance.
    pub id: i64,
    /// Outcome of the load.
    pub result: Result<Vec<Record>, DataError>,
    pub(crate) tag: u64,
}
