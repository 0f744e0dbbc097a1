//! Public operations on a list: loading, paging and teardown.

use super::types::{Lifecycle, LoadedMsg};
use super::Model;
use crate::error::DataError;
use crate::loader;
use crate::record::Record;
use crate::surface::Surface;
use bubbletea_rs::{Cmd, Msg};
use std::sync::Arc;

impl<S: Surface> Model<S> {
    /// Loads the data source, then renders.
    ///
    /// Shows the loading block while the source is read. On failure the
    /// error block replaces it and the error is returned. Taking `&mut self`
    /// means two loads of one instance can never overlap; a load also
    /// supersedes any pending [`load_cmd`](Model::load_cmd).
    pub async fn load(&mut self) -> Result<(), DataError> {
        if self.guard_destroyed("load") {
            return Ok(());
        }
        self.load_tag += 1;
        self.begin_load();
        let result = loader::load(&self.source, self.fetcher.as_ref()).await;
        self.finish_load(result)
    }

    /// Starts a load as a command; its [`LoadedMsg`] must be fed back
    /// through [`update`](Model::update).
    ///
    /// Starting another load makes earlier results stale: only the latest
    /// request is applied.
    pub fn load_cmd(&mut self) -> Option<Cmd> {
        if self.guard_destroyed("load_cmd") {
            return None;
        }
        self.load_tag += 1;
        self.begin_load();

        let id = self.id;
        let tag = self.load_tag;
        let source = self.source.clone();
        let fetcher = Arc::clone(&self.fetcher);
        Some(Box::pin(async move {
            let result = loader::load(&source, fetcher.as_ref()).await;
            Some(Box::new(LoadedMsg { id, result, tag }) as Msg)
        }))
    }

    /// Applies a finished command-driven load unless a newer one started.
    pub(super) fn accept_loaded(&mut self, msg: LoadedMsg) {
        if msg.tag != self.load_tag {
            log::debug!("list {}: discarding stale load #{}", self.id, msg.tag);
            return;
        }
        // The error block already reports failures.
        let _ = self.finish_load(msg.result);
    }

    fn begin_load(&mut self) {
        self.lifecycle = Lifecycle::Loading;
        self.show_loading();
    }

    fn finish_load(&mut self, result: Result<Vec<Record>, DataError>) -> Result<(), DataError> {
        self.hide_loading();
        match result {
            Ok(records) => {
                log::info!("list {}: loaded {} records", self.id, records.len());
                self.dataset = records;
                self.apply_query("");
                self.lifecycle = Lifecycle::Ready;
                self.render();
                Ok(())
            }
            Err(e) => {
                log::warn!("list {}: load failed: {}", self.id, e);
                self.lifecycle = Lifecycle::Failed;
                let heading = self.messages.load_failed.clone();
                self.show_error(&heading, &e.to_string());
                Err(e)
            }
        }
    }

    /// Moves to page `page` (1-based) and renders.
    ///
    /// Pages outside `[1, total_pages]` are ignored: nothing changes and
    /// nothing is rendered.
    pub fn go_to_page(&mut self, page: usize) {
        if self.guard_destroyed("go_to_page") {
            return;
        }
        if !self.paginator.go_to(page) {
            log::debug!(
                "list {}: page {} out of range 1..={}",
                self.id,
                page,
                self.paginator.total_pages
            );
            return;
        }
        log::debug!("list {}: page {}", self.id, page);
        self.render();
    }

    /// The records of the current page; the whole filtered view when
    /// pagination is disabled.
    pub fn current_page_slice(&self) -> &[Record] {
        let (start, end) = self.slice_bounds();
        &self.filtered[start..end]
    }

    pub(super) fn slice_bounds(&self) -> (usize, usize) {
        if self.pagination.enabled {
            self.paginator.get_slice_bounds(self.filtered.len())
        } else {
            (0, self.filtered.len())
        }
    }

    /// Tears the instance down.
    ///
    /// Detaches every event handler, cancels a pending debounced search,
    /// discards in-flight loads and clears all regions. Every later operation
    /// is a no-op. Calling `destroy` again does nothing.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        let detached = self.bindings.detach_all();
        self.debouncer.cancel();
        self.load_tag += 1;
        self.surface.clear_all();
        self.overlay = None;
        self.lifecycle = Lifecycle::Destroyed;
        log::debug!("list {}: destroyed, {} handler(s) detached", self.id, detached);
    }

    /// Returns true, with a warning, when the instance is destroyed.
    pub(super) fn guard_destroyed(&self, operation: &str) -> bool {
        if self.is_destroyed() {
            log::warn!("list {}: {} called after destroy; ignoring", self.id, operation);
            return true;
        }
        false
    }
}
