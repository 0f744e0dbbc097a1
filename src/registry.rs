//! Instance registry: list instances by key, owned by the host.
//!
//! There is no global registry. A host creates a [`Registry`], registers
//! programmatic lists or scans markup for declarative ones, and forwards
//! every message to [`Registry::update`], which routes it to the instance
//! it is addressed to.
//!
//! ```
//! use datalist_widgets::list::Model;
//! use datalist_widgets::registry::Registry;
//! use datalist_widgets::surface::MemorySurface;
//! use datalist_widgets::{DataSource, Record};
//!
//! let list = Model::builder()
//!     .container(MemorySurface::new())
//!     .data(DataSource::records(vec![Record::new().with("name", "Widget")]))
//!     .item_template(|r: &Record| r.text("name").unwrap_or_default())
//!     .key("widgets")
//!     .build()
//!     .unwrap();
//!
//! let mut registry = Registry::new();
//! registry.register(list).unwrap();
//! let results = futures::executor::block_on(registry.load_all());
//! assert!(results.iter().all(|(_, r)| r.is_ok()));
//! assert_eq!(registry.get("widgets").unwrap().dataset().len(), 1);
//! ```

use crate::binder;
use crate::debounce::DebounceMsg;
use crate::error::{DataError, DeclarativeWarning};
use crate::list::{LoadedMsg, Model, PageMsg, SearchInputMsg, SearchSubmitMsg};
use crate::loader::Fetch;
use crate::markup::Element;
use crate::surface::{ElementSurface, Surface};
use bubbletea_rs::{Cmd, Msg};
use std::sync::Arc;

/// List instances by key, in registration order.
pub struct Registry<S: Surface> {
    entries: Vec<(String, Model<S>)>,
}

impl<S: Surface> Default for Registry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: Surface> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<S: Surface> Registry<S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `list` under its key, or under its id when it has none.
    ///
    /// Fails with [`DeclarativeWarning::DuplicateId`] when the key is taken;
    /// the rejected list is dropped.
    pub fn register(&mut self, list: Model<S>) -> Result<(), DeclarativeWarning> {
        let key = list
            .key()
            .map(str::to_string)
            .unwrap_or_else(|| list.id().to_string());
        if self.contains(&key) {
            let warning = DeclarativeWarning::DuplicateId { id: key };
            log::warn!("{}", warning);
            return Err(warning);
        }
        log::debug!("registered list `{}`", key);
        self.entries.push((key, list));
        Ok(())
    }

    /// Returns true when a list is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The list registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Model<S>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, l)| l)
    }

    /// The list registered under `key`, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Model<S>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, l)| l)
    }

    /// Unregisters the list under `key` and returns it, still alive.
    pub fn remove(&mut self, key: &str) -> Option<Model<S>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of registered lists.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads every registered list concurrently.
    ///
    /// Returns each list's key with its outcome, in registration order.
    /// Failures are also rendered by the failing list.
    pub async fn load_all(&mut self) -> Vec<(String, Result<(), DataError>)> {
        let loads = self.entries.iter_mut().map(|(key, list)| async move {
            let result = list.load().await;
            (key.clone(), result)
        });
        futures::future::join_all(loads).await
    }

    /// Routes `msg` to the list it is addressed to.
    ///
    /// Messages that are not list messages, or that address no registered
    /// list, are dropped.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let target = addressee(&msg)?;
        match self.entries.iter_mut().find(|(_, l)| l.id() == target) {
            Some((_, list)) => list.update(msg),
            None => {
                log::debug!("no registered list with id {}", target);
                None
            }
        }
    }

    /// Destroys and unregisters every list. Returns how many were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.entries.len();
        for (_, list) in self.entries.iter_mut() {
            list.destroy();
        }
        self.entries.clear();
        count
    }
}

impl Registry<ElementSurface> {
    /// Scans `root` for declarative lists and registers them.
    ///
    /// Returns the scan warnings plus one warning per list whose key was
    /// already registered.
    pub fn scan(&mut self, root: &Element, fetcher: Arc<dyn Fetch>) -> Vec<DeclarativeWarning> {
        let scan = binder::scan_with(root, fetcher);
        let mut warnings = scan.warnings;
        for list in scan.instances {
            if let Err(warning) = self.register(list) {
                warnings.push(warning);
            }
        }
        warnings
    }
}

/// The instance id a list message is addressed to.
fn addressee(msg: &Msg) -> Option<i64> {
    if let Some(m) = msg.downcast_ref::<SearchInputMsg>() {
        return Some(m.id);
    }
    if let Some(m) = msg.downcast_ref::<SearchSubmitMsg>() {
        return Some(m.id);
    }
    if let Some(m) = msg.downcast_ref::<DebounceMsg>() {
        return Some(m.id);
    }
    if let Some(m) = msg.downcast_ref::<PageMsg>() {
        return Some(m.id);
    }
    msg.downcast_ref::<LoadedMsg>().map(|m| m.id)
}
