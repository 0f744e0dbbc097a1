//! Search: case-insensitive substring matching over the configured fields.
//!
//! Matching is deliberately simple. The query is lower-cased once; a record
//! is kept when any search key holds a non-null value whose lower-cased text
//! contains the query. Record order is preserved and the dataset is never
//! touched.

use super::Model;
use crate::record::Record;
use crate::surface::Surface;

/// Returns the records of `dataset` matching `query` on any of `keys`.
///
/// An empty or all-whitespace query returns a copy of the whole dataset.
///
/// ```
/// use datalist_widgets::list::filter_records;
/// use datalist_widgets::Record;
///
/// let data = vec![
///     Record::new().with("name", "Widget").with("category", "Tools"),
///     Record::new().with("name", "Gadget").with("category", "Toys"),
/// ];
/// let keys = vec!["name".to_string(), "category".to_string()];
///
/// let hits = filter_records(&data, &keys, "tool");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].text("name").as_deref(), Some("Widget"));
/// assert_eq!(filter_records(&data, &keys, "   ").len(), 2);
/// ```
pub fn filter_records(dataset: &[Record], keys: &[String], query: &str) -> Vec<Record> {
    if query.trim().is_empty() {
        return dataset.to_vec();
    }
    let needle = query.to_lowercase();
    dataset
        .iter()
        .filter(|record| matches(record, keys, &needle))
        .cloned()
        .collect()
}

fn matches(record: &Record, keys: &[String], needle: &str) -> bool {
    keys.iter().any(|key| {
        record
            .text(key)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

impl<S: Surface> Model<S> {
    /// Filters the dataset by `query`, returns to page 1 and renders.
    ///
    /// Never debounced; debounce applies only to search-input events.
    pub fn search(&mut self, query: &str) {
        if self.guard_destroyed("search") {
            return;
        }
        self.apply_query(query);
        log::debug!(
            "list {}: query {:?} matched {} of {} records",
            self.id,
            self.query,
            self.filtered.len(),
            self.dataset.len()
        );
        self.render();
    }

    /// Recomputes the filtered view for `query` and resets paging.
    pub(super) fn apply_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.filtered = filter_records(&self.dataset, &self.search.search_keys, query);
        self.paginator.set_total_items(self.filtered.len());
        self.paginator.reset();
    }
}
