//! The list engine: keeps a rendered view in sync with a dataset, a search
//! query and a page.
//!
//! This module exposes a generic `Model<S: Surface>` plus supporting types:
//! - `ItemTemplate`: turns one `Record` into a markup fragment
//! - `Builder`: validates options and creates a `Model`
//! - `Messages`: user-facing strings of the empty, loading and error blocks
//! - Message types routed through `Model::update`
//!
//! ## State flow
//!
//! ```text
//! dataset ──search──▶ filtered ──page──▶ current slice ──render──▶ surface
//! ```
//!
//! - `dataset` is set once per load and never mutated by search.
//! - `filtered` is an order-preserving copy of the matching records; it
//!   equals the dataset when the query is empty.
//! - Every new query resets the page to 1.
//! - `render()` clears the items region and redraws the current slice, or an
//!   empty-state block distinguishing "no data" from "no results".
//!
//! ## Events
//!
//! Hosts forward user events as messages. Each one only takes effect while
//! the matching binding is attached (see [`Bindings`](crate::bindings::Bindings)):
//! - `SearchInputMsg`: schedules a debounced search and returns the tick
//!   command; when the resulting `DebounceMsg` comes back current, the search
//!   runs.
//! - `SearchSubmitMsg`: cancels any pending debounce and searches at once.
//! - `PageMsg`: activates a Previous, numbered or Next control.
//! - `LoadedMsg`: result of `load_cmd`; stale results are dropped.
//!
//! ```
//! use datalist_widgets::config::{SearchConfig, SearchKeys, SearchOption};
//! use datalist_widgets::list::{Model, SearchSubmitMsg};
//! use datalist_widgets::surface::MemorySurface;
//! use datalist_widgets::{DataSource, Record};
//!
//! let records = vec![
//!     Record::new().with("name", "Widget"),
//!     Record::new().with("name", "Gadget"),
//! ];
//! let mut list = Model::builder()
//!     .container(MemorySurface::new())
//!     .data(DataSource::records(records))
//!     .item_template(|r: &Record| format!("<p>{}</p>", r.text("name").unwrap_or_default()))
//!     .search(SearchOption::Custom(SearchConfig {
//!         keys: Some(SearchKeys::from("name")),
//!         ..SearchConfig::default()
//!     }))
//!     .with_search_action()
//!     .build()
//!     .unwrap();
//! futures::executor::block_on(list.load()).unwrap();
//!
//! let id = list.id();
//! list.update(Box::new(SearchSubmitMsg { id, value: "gad".into() }));
//! assert_eq!(list.filtered().len(), 1);
//! ```

mod api;
mod filtering;
mod model;
mod rendering;
mod types;

#[cfg(test)]
mod tests;

pub use filtering::filter_records;
pub use model::{Builder, Model};
pub use types::{
    ItemTemplate, Lifecycle, LoadedMsg, Messages, PageMsg, SearchInputMsg, SearchSubmitMsg,
};

use crate::bindings::EventSource;
use crate::debounce::DebounceMsg;
use crate::surface::Surface;
use bubbletea_rs::{Cmd, Msg};

impl<S: Surface> Model<S> {
    /// Handles one message addressed to this instance.
    ///
    /// Messages for other instances and events without an attached binding
    /// are ignored. Returns the debounce tick command for search input.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.guard_destroyed("update") {
            return None;
        }

        if let Some(input) = msg.downcast_ref::<SearchInputMsg>() {
            if input.id == self.id && self.bindings.is_attached(EventSource::SearchInput) {
                return Some(self.debouncer.schedule(&input.value));
            }
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<DebounceMsg>() {
            if let Some(query) = self.debouncer.accept(tick) {
                self.search(&query);
            }
            return None;
        }

        if let Some(submit) = msg.downcast_ref::<SearchSubmitMsg>() {
            if submit.id == self.id && self.bindings.is_attached(EventSource::SearchAction) {
                self.debouncer.cancel();
                self.search(&submit.value);
            }
            return None;
        }

        if let Some(page) = msg.downcast_ref::<PageMsg>() {
            if page.id == self.id
                && self
                    .bindings
                    .is_attached(EventSource::PageControl(page.control))
            {
                let target = self.paginator.target_of(page.control);
                self.go_to_page(target);
            }
            return None;
        }

        if let Ok(loaded) = msg.downcast::<LoadedMsg>() {
            if loaded.id == self.id {
                self.accept_loaded(*loaded);
            }
        }
        None
    }
}
