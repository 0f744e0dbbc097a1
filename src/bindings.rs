//! Registry of attached event handlers.
//!
//! A list reacts to an event only while a binding for its source is
//! attached. Rendering rewires the page-control bindings; `destroy()`
//! detaches everything exactly once, after which no event fires a handler.

use crate::paginator::PageControlKind;

/// Something that can trigger a list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// Live search field; changes are debounced.
    SearchInput,
    /// Search button; triggers an immediate search.
    SearchAction,
    /// One control of the pagination strip.
    PageControl(PageControlKind),
}

impl EventSource {
    /// Returns true for pagination controls.
    pub fn is_page_control(&self) -> bool {
        matches!(self, EventSource::PageControl(_))
    }
}

/// The set of attached event sources of one list instance.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    attached: Vec<EventSource>,
}

impl Bindings {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler for `source`. Attaching twice is a no-op.
    pub fn attach(&mut self, source: EventSource) {
        if !self.is_attached(source) {
            self.attached.push(source);
        }
    }

    /// Detaches the handler for `source`. Returns whether one was attached.
    pub fn detach(&mut self, source: EventSource) -> bool {
        let before = self.attached.len();
        self.attached.retain(|s| *s != source);
        before != self.attached.len()
    }

    /// Detaches every pagination-control handler. Returns how many were removed.
    pub fn detach_page_controls(&mut self) -> usize {
        let before = self.attached.len();
        self.attached.retain(|s| !s.is_page_control());
        before - self.attached.len()
    }

    /// Detaches everything. Returns how many handlers were removed.
    pub fn detach_all(&mut self) -> usize {
        let removed = self.attached.len();
        self.attached.clear();
        removed
    }

    /// Returns true when a handler for `source` is attached.
    pub fn is_attached(&self, source: EventSource) -> bool {
        self.attached.contains(&source)
    }

    /// Iterates over attached sources in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &EventSource> {
        self.attached.iter()
    }

    /// Number of attached handlers.
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Returns true when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
