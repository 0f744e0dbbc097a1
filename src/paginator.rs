//! Pagination state and page-control metadata.
//!
//! This component calculates pagination and describes the control strip
//! (Previous, one control per page, Next). It does not render pages of
//! content itself; the list slices its records with
//! [`Model::get_slice_bounds`] and renders the controls returned by
//! [`Model::controls`].
//!
//! Pages are 1-based: the first page is page 1.

use crate::markup::escape;

/// Which control of the strip a [`PageControl`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageControlKind {
    /// Go back one page.
    Previous,
    /// Jump to a specific page.
    Number(usize),
    /// Go forward one page.
    Next,
}

impl PageControlKind {
    /// The value written to the control's `data-page` attribute.
    pub fn data_value(&self) -> String {
        match self {
            PageControlKind::Previous => "prev".to_string(),
            PageControlKind::Number(n) => n.to_string(),
            PageControlKind::Next => "next".to_string(),
        }
    }

    /// Parses a `data-page` attribute value.
    pub fn from_data_value(value: &str) -> Option<Self> {
        match value {
            "prev" => Some(PageControlKind::Previous),
            "next" => Some(PageControlKind::Next),
            n => n.parse().ok().map(PageControlKind::Number),
        }
    }
}

/// One control of the pagination strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    /// What the control does.
    pub kind: PageControlKind,
    /// Visible label.
    pub label: String,
    /// Disabled controls render but do not react to activation.
    pub enabled: bool,
    /// Marks the current page.
    pub active: bool,
}

impl PageControl {
    /// Renders the control as a button fragment.
    ///
    /// ```rust
    /// use datalist_widgets::paginator::{PageControl, PageControlKind};
    ///
    /// let control = PageControl {
    ///     kind: PageControlKind::Number(2),
    ///     label: "2".to_string(),
    ///     enabled: true,
    ///     active: true,
    /// };
    /// assert_eq!(
    ///     control.to_markup(),
    ///     r#"<button type="button" class="page-btn active" data-page="2" aria-current="page">2</button>"#
    /// );
    /// ```
    pub fn to_markup(&self) -> String {
        let mut class = String::from("page-btn");
        if self.active {
            class.push_str(" active");
        }
        let mut extra = String::new();
        if self.active {
            extra.push_str(r#" aria-current="page""#);
        }
        if !self.enabled {
            extra.push_str(" disabled");
        }
        format!(
            r#"<button type="button" class="{}" data-page="{}"{}>{}</button>"#,
            class,
            self.kind.data_value(),
            extra,
            escape(&self.label)
        )
    }
}

/// A paginator model for handling pagination state.
///
/// # Examples
///
/// ```rust
/// use datalist_widgets::paginator::Model;
///
/// let mut paginator = Model::new()
///     .with_per_page(10)
///     .with_total_items(25); // 3 pages
///
/// assert_eq!(paginator.total_pages, 3);
/// assert_eq!(paginator.get_slice_bounds(25), (0, 10));
///
/// assert!(paginator.go_to(3));
/// assert_eq!(paginator.get_slice_bounds(25), (20, 25));
///
/// assert!(!paginator.go_to(4)); // out of range, ignored
/// assert_eq!(paginator.page, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// The current page, 1-based.
    pub page: usize,
    /// The number of items per page.
    pub per_page: usize,
    /// The total number of pages, at least 1.
    pub total_pages: usize,
    /// Label of the Previous control.
    pub prev_label: String,
    /// Label of the Next control.
    pub next_label: String,
}

impl Default for Model {
    /// Page 1 of 1, ten items per page.
    fn default() -> Self {
        Self {
            page: 1,
            per_page: crate::config::DEFAULT_ITEMS_PER_PAGE,
            total_pages: 1,
            prev_label: "Previous".to_string(),
            next_label: "Next".to_string(),
        }
    }
}

impl Model {
    /// Creates a new paginator model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of items and calculates total pages (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the number of items per page (builder pattern).
    ///
    /// Values less than 1 are clamped to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the number of items per page. Values less than 1 are clamped to 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Sets the labels of the Previous and Next controls.
    pub fn set_labels(&mut self, prev: &str, next: &str) {
        self.prev_label = prev.to_string();
        self.next_label = next.to_string();
    }

    /// Calculates total pages from an item count.
    ///
    /// The result is always at least 1, even for 0 items. A current page
    /// past the new end is moved to the last page.
    ///
    /// ```rust
    /// use datalist_widgets::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_per_page(10);
    /// paginator.set_total_items(95);
    /// assert_eq!(paginator.total_pages, 10);
    /// paginator.set_total_items(0);
    /// assert_eq!(paginator.total_pages, 1);
    /// ```
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        self.page = self.page.clamp(1, self.total_pages);
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Returns true if `page` is within `[1, total_pages]`.
    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Moves to `page` when it is in range. Returns whether the page was valid.
    pub fn go_to(&mut self, page: usize) -> bool {
        if !self.contains(page) {
            return false;
        }
        self.page = page;
        true
    }

    /// Calculates slice bounds for the current page.
    ///
    /// Returns the half-open range `(start, end)` clipped to `length`.
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.per_page).min(length);
        let end = start.saturating_add(self.per_page).min(length);
        (start, end)
    }

    /// Returns the number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.get_slice_bounds(total_items);
        end - start
    }

    /// Returns true if the paginator is on the first page.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns true if the paginator is on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// The page a control leads to from the current page.
    pub fn target_of(&self, kind: PageControlKind) -> usize {
        match kind {
            PageControlKind::Previous => self.page.saturating_sub(1),
            PageControlKind::Number(n) => n,
            PageControlKind::Next => self.page + 1,
        }
    }

    /// Describes the control strip for the current state.
    ///
    /// ```rust
    /// use datalist_widgets::paginator::{Model, PageControlKind};
    ///
    /// let paginator = Model::new().with_per_page(10).with_total_items(25);
    /// let controls = paginator.controls();
    ///
    /// assert_eq!(controls.len(), 5); // prev, 1, 2, 3, next
    /// assert_eq!(controls[0].kind, PageControlKind::Previous);
    /// assert!(!controls[0].enabled);
    /// assert!(controls[1].active);
    /// assert!(controls[4].enabled);
    /// ```
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(self.total_pages + 2);
        controls.push(PageControl {
            kind: PageControlKind::Previous,
            label: self.prev_label.clone(),
            enabled: !self.on_first_page(),
            active: false,
        });
        for n in 1..=self.total_pages {
            controls.push(PageControl {
                kind: PageControlKind::Number(n),
                label: n.to_string(),
                enabled: true,
                active: n == self.page,
            });
        }
        controls.push(PageControl {
            kind: PageControlKind::Next,
            label: self.next_label.clone(),
            enabled: !self.on_last_page(),
            active: false,
        });
        controls
    }

    /// Renders the control strip as markup, one button per control.
    pub fn view(&self) -> String {
        self.controls().iter().map(PageControl::to_markup).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_items_make_three_pages() {
        let mut paginator = Model::new().with_per_page(10).with_total_items(25);
        assert_eq!(paginator.total_pages, 3);
        assert_eq!(paginator.get_slice_bounds(25), (0, 10));
        paginator.go_to(2);
        assert_eq!(paginator.get_slice_bounds(25), (10, 20));
        paginator.go_to(3);
        assert_eq!(paginator.get_slice_bounds(25), (20, 25));
        assert_eq!(paginator.items_on_page(25), 5);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut paginator = Model::new().with_per_page(10).with_total_items(25);
        paginator.go_to(2);
        assert!(!paginator.go_to(0));
        assert!(!paginator.go_to(4));
        assert_eq!(paginator.page, 2);
    }

    #[test]
    fn shrinking_clamps_the_current_page() {
        let mut paginator = Model::new().with_per_page(5).with_total_items(50);
        paginator.go_to(10);
        paginator.set_total_items(12);
        assert_eq!(paginator.total_pages, 3);
        assert_eq!(paginator.page, 3);
    }

    #[test]
    fn per_page_clamps_to_one() {
        let paginator = Model::new().with_per_page(0);
        assert_eq!(paginator.per_page, 1);
    }

    #[test]
    fn empty_input_slices_to_nothing() {
        let paginator = Model::new().with_per_page(10).with_total_items(0);
        assert_eq!(paginator.total_pages, 1);
        assert_eq!(paginator.get_slice_bounds(0), (0, 0));
    }

    #[test]
    fn controls_mark_edges_disabled() {
        let mut paginator = Model::new().with_per_page(10).with_total_items(30);
        paginator.go_to(3);
        let controls = paginator.controls();
        assert!(controls.first().unwrap().enabled);
        assert!(!controls.last().unwrap().enabled);
        assert!(controls[3].active);
        assert_eq!(paginator.target_of(PageControlKind::Previous), 2);
        assert_eq!(paginator.target_of(PageControlKind::Next), 4);
    }

    #[test]
    fn data_values_round_trip_through_markup_attributes() {
        for kind in [
            PageControlKind::Previous,
            PageControlKind::Number(12),
            PageControlKind::Next,
        ] {
            assert_eq!(PageControlKind::from_data_value(&kind.data_value()), Some(kind));
        }
        assert_eq!(PageControlKind::from_data_value("x"), None);
    }

    #[test]
    fn disabled_controls_render_disabled() {
        let paginator = Model::new().with_per_page(10).with_total_items(20);
        let view = paginator.view();
        assert!(view.starts_with(
            r#"<button type="button" class="page-btn" data-page="prev" disabled>Previous</button>"#
        ));
        assert!(view.ends_with(r#"data-page="next">Next</button>"#));
    }
}
