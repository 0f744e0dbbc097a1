//! Rendering of the current page, the page controls and the status blocks.

use super::types::Overlay;
use super::Model;
use crate::bindings::EventSource;
use crate::markup::escape;
use crate::surface::{Region, Surface};

impl<S: Surface> Model<S> {
    /// Renders the current page slice and the page controls.
    ///
    /// Idempotent: rendering twice without a state change produces the same
    /// surface content.
    pub fn render(&mut self) {
        if self.guard_destroyed("render") {
            return;
        }
        self.overlay = None;
        self.surface.clear(Region::Status);
        self.surface.clear(Region::Items);

        let (start, end) = self.slice_bounds();
        if start == end {
            let message = if self.dataset.is_empty() {
                &self.messages.empty_data
            } else {
                &self.messages.no_results
            };
            let block = format!(r#"<div class="list-empty">{}</div>"#, escape(message));
            self.surface.append(Region::Items, &block);
            self.clear_pagination();
            return;
        }

        for record in &self.filtered[start..end] {
            let fragment = self.template.render(record);
            self.surface.append(Region::Items, &fragment);
        }
        self.render_pagination();
    }

    fn render_pagination(&mut self) {
        if !self.pagination.enabled || self.paginator.total_pages <= 1 {
            self.clear_pagination();
            return;
        }

        self.surface.clear(Region::Pagination);
        self.bindings.detach_page_controls();
        for control in self.paginator.controls() {
            self.surface.append(Region::Pagination, &control.to_markup());
            if control.enabled {
                self.bindings.attach(EventSource::PageControl(control.kind));
            }
        }
    }

    fn clear_pagination(&mut self) {
        self.surface.clear(Region::Pagination);
        self.bindings.detach_page_controls();
    }

    /// Replaces the surface content with a loading block.
    pub fn show_loading(&mut self) {
        if self.guard_destroyed("show_loading") {
            return;
        }
        self.clear_output();
        let block = format!(
            r#"<div class="list-loading">{}</div>"#,
            escape(&self.messages.loading)
        );
        self.surface.append(Region::Status, &block);
        self.overlay = Some(Overlay::Loading);
    }

    /// Removes the loading block, if one is shown.
    pub fn hide_loading(&mut self) {
        if self.guard_destroyed("hide_loading") {
            return;
        }
        if self.overlay == Some(Overlay::Loading) {
            self.surface.clear(Region::Status);
            self.overlay = None;
        }
    }

    /// Replaces the surface content with an error block.
    ///
    /// Both strings are escaped.
    pub fn show_error(&mut self, message: &str, details: &str) {
        if self.guard_destroyed("show_error") {
            return;
        }
        self.clear_output();
        let block = format!(
            r#"<div class="list-error"><strong>{}</strong><p>{}</p></div>"#,
            escape(message),
            escape(details)
        );
        self.surface.append(Region::Status, &block);
        self.overlay = Some(Overlay::Error);
    }

    fn clear_output(&mut self) {
        self.surface.clear_all();
        self.bindings.detach_page_controls();
    }
}
