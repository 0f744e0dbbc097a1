//! Trailing-edge debounce for live search input.
//!
//! A [`Debouncer`] belongs to the event-binding layer, not to the search
//! algorithm. Each input event schedules a tick command carrying a
//! [`DebounceMsg`] stamped with the debouncer's current tag; scheduling again
//! (or cancelling) bumps the tag, so when the earlier ticks arrive they no
//! longer match and are dropped. Only the last query within the window runs.
//!
//! ```text
//! input "w"   → tag 1 ┐
//! input "wi"  → tag 2 ├─ within the window
//! input "wid" → tag 3 ┘
//! tick(tag 1) → stale, ignored
//! tick(tag 2) → stale, ignored
//! tick(tag 3) → accepted, search("wid")
//! ```
//!
//! # Examples
//!
//! ```rust
//! use datalist_widgets::debounce::Debouncer;
//! use std::time::Duration;
//!
//! let mut debouncer = Debouncer::new(7, Duration::from_millis(300));
//! let _first = debouncer.schedule("w");
//! let _second = debouncer.schedule("wi");
//! assert_eq!(debouncer.pending(), Some("wi"));
//!
//! debouncer.cancel();
//! assert_eq!(debouncer.pending(), None);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

/// Delivered when a debounce window elapses.
///
/// Only the [`Debouncer`] that produced it, and only while its tag is still
/// current, will accept it.
#[derive(Debug, Clone)]
pub struct DebounceMsg {
    /// Id of the list instance that scheduled the tick.
    pub id: i64,
    /// The query captured when the tick was scheduled.
    pub query: String,
    tag: u64,
}

impl DebounceMsg {
    #[cfg(test)]
    pub(crate) fn new(id: i64, tag: u64, query: &str) -> Self {
        Self {
            id,
            query: query.to_string(),
            tag,
        }
    }
}

/// Tag-based trailing debounce owned by one list instance.
#[derive(Debug, Clone)]
pub struct Debouncer {
    id: i64,
    delay: Duration,
    tag: u64,
    pending: Option<String>,
}

impl Debouncer {
    /// Creates a debouncer for the instance `id` with the given window.
    pub fn new(id: i64, delay: Duration) -> Self {
        Self {
            id,
            delay,
            tag: 0,
            pending: None,
        }
    }

    /// The debounce window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The query that will run if no further input arrives.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// The current tag. Increases on every schedule and cancel.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Schedules `query`, superseding any pending one.
    ///
    /// Returns the tick command that will deliver the [`DebounceMsg`].
    pub fn schedule(&mut self, query: &str) -> Cmd {
        self.tag += 1;
        self.pending = Some(query.to_string());

        let id = self.id;
        let tag = self.tag;
        let query = query.to_string();
        bubbletea_tick(self.delay, move |_| {
            Box::new(DebounceMsg {
                id,
                query: query.clone(),
                tag,
            }) as Msg
        })
    }

    /// Drops the pending query; in-flight ticks become stale.
    pub fn cancel(&mut self) {
        self.tag += 1;
        self.pending = None;
    }

    /// Consumes a tick. Returns the query to run when the tick is current.
    pub fn accept(&mut self, msg: &DebounceMsg) -> Option<String> {
        if msg.id != self.id || msg.tag != self.tag {
            return None;
        }
        self.pending.take()
    }
}
