//! Pagination/selection synchronization state machine.
//!
//! The controller keeps four pieces of state mutually consistent as the
//! user pages through a remote collection: the loaded [`PageWindow`],
//! the number of rows shown from it, the pager cursor offset, and the
//! accumulated cross-page [`SelectionSet`]. Handlers never perform I/O;
//! a page change returns an [`Effect::Fetch`] for the driver to execute
//! and the result re-enters through [`TableController::on_page_loaded`].

use super::{BulkSelection, Effect, PageWindow, RequestId, SelectionSet, TableRecord};
use thiserror::Error;
use tracing::debug;

/// Errors rejected at the handler boundary. No state is mutated when
/// one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("rows per page must be at least 1, got {0}")]
    InvalidRowsPerPage(usize),
}

/// Controller for a server-paginated, multi-select table.
#[derive(Debug)]
pub struct TableController<T: TableRecord> {
    /// 1-based page most recently requested
    page_number: u32,

    /// How many rows of the loaded page are shown
    rows_per_page: usize,

    /// Pager cursor offset: the row index the pager widget considers
    /// the start of the visible window
    first: u32,

    /// Most recently applied page window
    window: PageWindow<T>,

    /// Accumulated cross-page selection
    selection: SelectionSet<T>,

    /// Outstanding bulk-selection request
    bulk: BulkSelection,

    /// Source for monotonic fetch tags
    next_request: u64,

    /// Latest issued fetch, cleared when it resolves
    in_flight: Option<RequestId>,

    /// Message from the most recent failed fetch
    last_error: Option<String>,
}

impl<T: TableRecord> TableController<T> {
    /// Create a controller showing `rows_per_page` rows, positioned on
    /// page 1 with nothing loaded yet.
    pub fn new(rows_per_page: usize) -> Result<Self, ControllerError> {
        if rows_per_page == 0 {
            return Err(ControllerError::InvalidRowsPerPage(rows_per_page));
        }
        Ok(Self {
            page_number: 1,
            rows_per_page,
            first: rows_per_page as u32 - 1,
            window: PageWindow::empty(),
            selection: SelectionSet::new(),
            bulk: BulkSelection::default(),
            next_request: 0,
            in_flight: None,
            last_error: None,
        })
    }

    /// Handle a pager page-change event.
    ///
    /// `requested_page` is 0-based (pager widget convention); internal
    /// page numbering is 1-based. Moving the pager consumes one page's
    /// worth of any outstanding bulk target, measured with the
    /// rows-per-page value in effect before this event.
    pub fn on_page_change(
        &mut self,
        requested_page: u32,
        rows_per_page: usize,
    ) -> Result<Vec<Effect>, ControllerError> {
        if rows_per_page == 0 {
            return Err(ControllerError::InvalidRowsPerPage(rows_per_page));
        }

        let prior_rows = self.rows_per_page;
        self.rows_per_page = rows_per_page;
        self.page_number = requested_page + 1;
        self.first = self.page_number * (rows_per_page as u32 - 1);

        // One page's worth of rows has been passed over by the pager.
        self.bulk.remaining = self.bulk.remaining.saturating_sub(prior_rows);

        Ok(vec![self.issue_fetch()])
    }

    /// Handle a rows-per-page change.
    ///
    /// The cursor is recomputed with the size-ratio rule, which
    /// preserves the page block the pager is on rather than the
    /// absolute row offset. This is intentionally a different formula
    /// from the page-change path. No fetch is needed: the loaded page
    /// does not change, only how many of its rows are shown.
    pub fn on_rows_per_page_change(
        &mut self,
        new_rows_per_page: usize,
    ) -> Result<(), ControllerError> {
        if new_rows_per_page == 0 {
            return Err(ControllerError::InvalidRowsPerPage(new_rows_per_page));
        }

        self.first = (self.first / self.rows_per_page as u32) * new_rows_per_page as u32;
        self.rows_per_page = new_rows_per_page;
        Ok(())
    }

    /// Handle a bulk-selection submit for `target` rows.
    ///
    /// Rows are taken from the currently loaded page immediately; if the
    /// target exceeds the page size the request stays active and keeps
    /// draining pages as the user pages forward.
    pub fn on_bulk_select_submit(&mut self, target: usize) {
        let take = target.min(self.window.items.len());
        self.append_from_window(take);

        self.bulk = BulkSelection {
            requested: target,
            remaining: target,
            active: target > self.rows_per_page,
        };
    }

    /// Toggle selection of a single record. Independent of bulk
    /// accumulation, which only ever appends.
    ///
    /// Returns `true` if the record is selected after the call.
    pub fn on_row_toggle(&mut self, record: T) -> bool {
        self.selection.toggle(record)
    }

    /// Apply a resolved page fetch.
    ///
    /// A fetch whose tag is no longer the latest issued one is dropped
    /// untouched: the window always reflects the most recently
    /// requested page, regardless of response ordering.
    pub fn on_page_loaded(&mut self, request: RequestId, window: PageWindow<T>) {
        if self.in_flight != Some(request) {
            debug!(
                request = request.0,
                page = window.page_number,
                "discarding stale page fetch"
            );
            return;
        }

        self.in_flight = None;
        self.last_error = None;
        self.window = window;

        if self.bulk.active {
            self.drain_into_selection();
        }
    }

    /// Record a failed page fetch.
    ///
    /// The previous window remains displayed unchanged; the message is
    /// kept for the presentation layer. Stale failures are ignored.
    pub fn on_fetch_failed(&mut self, request: RequestId, message: impl Into<String>) {
        if self.in_flight != Some(request) {
            debug!(request = request.0, "discarding stale fetch failure");
            return;
        }

        self.in_flight = None;
        self.last_error = Some(message.into());
    }

    /// Rows currently shown: the first `rows_per_page` items of the
    /// loaded window.
    pub fn visible(&self) -> &[T] {
        let end = self.rows_per_page.min(self.window.items.len());
        &self.window.items[..end]
    }

    /// Accumulated selection
    pub fn selection(&self) -> &SelectionSet<T> {
        &self.selection
    }

    /// 1-based page most recently requested
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Rows shown per page
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Total page count reported by the last applied fetch
    pub fn total_pages(&self) -> u32 {
        self.window.total_pages
    }

    /// Pager cursor offset
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Outstanding bulk-selection request
    pub fn bulk(&self) -> BulkSelection {
        self.bulk
    }

    /// Whether a fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Message from the most recent failed fetch, cleared by the next
    /// successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Drain the freshly loaded window into the selection while a bulk
    /// request is outstanding: take `min(remaining, page len)` rows and
    /// deactivate the request once the page covers the remainder.
    fn drain_into_selection(&mut self) {
        let take = self.bulk.remaining.min(self.window.items.len());
        self.append_from_window(take);

        if take == self.bulk.remaining {
            self.bulk.active = false;
        }
    }

    /// Append the first `take` rows of the window, skipping ids already
    /// selected.
    fn append_from_window(&mut self, take: usize) {
        for record in self.window.items.iter().take(take) {
            if !self.selection.contains(record.id()) {
                self.selection.insert(record.clone());
            }
        }
    }

    fn issue_fetch(&mut self) -> Effect {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.in_flight = Some(request);
        Effect::Fetch {
            page: self.page_number,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u64);

    impl TableRecord for Row {
        fn id(&self) -> u64 {
            self.0
        }
    }

    fn page(page_number: u32, first_id: u64, count: usize, total_pages: u32) -> PageWindow<Row> {
        PageWindow {
            page_number,
            items: (first_id..first_id + count as u64).map(Row).collect(),
            total_pages,
        }
    }

    fn request_of(effects: &[Effect]) -> RequestId {
        match effects {
            [Effect::Fetch { request, .. }] => *request,
            other => panic!("expected one fetch effect, got {other:?}"),
        }
    }

    fn selected_ids(controller: &TableController<Row>) -> Vec<u64> {
        controller.selection().records().iter().map(|r| r.id()).collect()
    }

    /// Load `window` into the controller as the resolution of a fresh
    /// page-change to its page.
    fn load(controller: &mut TableController<Row>, window: PageWindow<Row>) {
        let effects = controller
            .on_page_change(window.page_number - 1, controller.rows_per_page())
            .unwrap();
        controller.on_page_loaded(request_of(&effects), window);
    }

    #[test]
    fn test_visible_is_prefix_of_window() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 12, 10));

        let visible: Vec<u64> = controller.visible().iter().map(|r| r.id()).collect();
        assert_eq!(visible, vec![1, 2, 3, 4, 5]);

        // Idempotent: same inputs, same slice.
        let again: Vec<u64> = controller.visible().iter().map(|r| r.id()).collect();
        assert_eq!(visible, again);
    }

    #[test]
    fn test_visible_handles_short_window() {
        let mut controller = TableController::new(10).unwrap();
        load(&mut controller, page(1, 1, 3, 1));

        assert_eq!(controller.visible().len(), 3);
    }

    #[test]
    fn test_page_change_updates_page_and_cursor() {
        let mut controller = TableController::<Row>::new(5).unwrap();

        let effects = controller.on_page_change(1, 5).unwrap();
        assert_eq!(controller.page_number(), 2);
        assert_eq!(controller.first(), 8); // 2 * (5 - 1)
        assert!(matches!(effects[0], Effect::Fetch { page: 2, .. }));
        assert!(controller.is_loading());
    }

    #[test]
    fn test_size_ratio_cursor_recompute() {
        let mut controller = TableController::<Row>::new(5).unwrap();
        controller.on_page_change(1, 5).unwrap();
        assert_eq!(controller.first(), 8);

        controller.on_rows_per_page_change(10).unwrap();
        assert_eq!(controller.first(), 10); // (8 / 5) * 10
        assert_eq!(controller.rows_per_page(), 10);
    }

    #[test]
    fn test_rows_per_page_change_does_not_fetch() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 12, 10));

        controller.on_rows_per_page_change(10).unwrap();
        assert!(!controller.is_loading());
        assert_eq!(controller.visible().len(), 10);
    }

    #[test]
    fn test_bulk_within_current_page() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 12, 10));

        controller.on_bulk_select_submit(3);
        assert_eq!(selected_ids(&controller), vec![1, 2, 3]);
        assert!(!controller.bulk().active);

        // An inactive request ignores later pages.
        load(&mut controller, page(2, 13, 12, 10));
        assert_eq!(controller.selection().len(), 3);
    }

    #[test]
    fn test_bulk_takes_from_full_window_not_visible_slice() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 12, 10));

        // 8 > rows shown (5), but the loaded window has 12 rows.
        controller.on_bulk_select_submit(8);
        assert_eq!(controller.selection().len(), 8);
        assert!(controller.bulk().active);
    }

    #[test]
    fn test_bulk_satisfaction_across_pages() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));

        controller.on_bulk_select_submit(12);
        assert_eq!(controller.selection().len(), 5);
        assert!(controller.bulk().active);

        // Page forward: 12 - 5 = 7 outstanding, page 2 supplies 5 more.
        load(&mut controller, page(2, 6, 5, 4));
        assert_eq!(controller.selection().len(), 10);
        assert!(controller.bulk().active);

        // Page forward: 7 - 5 = 2 outstanding, page 3 covers it.
        load(&mut controller, page(3, 11, 5, 4));
        assert_eq!(controller.selection().len(), 12);
        assert!(!controller.bulk().active);

        // A further page adds nothing.
        load(&mut controller, page(4, 16, 5, 4));
        assert_eq!(controller.selection().len(), 12);
    }

    #[test]
    fn test_bulk_decrement_uses_prior_rows_per_page() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));

        controller.on_bulk_select_submit(12);

        // The page change also switches to 10 rows; the decrement is one
        // page's worth under the size in effect when the rows were shown.
        controller.on_page_change(1, 10).unwrap();
        assert_eq!(controller.bulk().remaining, 7);
    }

    #[test]
    fn test_manual_toggle_independent_of_bulk() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));

        controller.on_row_toggle(Row(2));
        controller.on_bulk_select_submit(5);

        // One entry for id 2: not duplicated, not removed.
        assert_eq!(selected_ids(&controller), vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_no_duplicates_across_handlers() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));

        controller.on_row_toggle(Row(1));
        controller.on_bulk_select_submit(4);
        controller.on_bulk_select_submit(5);
        controller.on_row_toggle(Row(9));

        let mut ids = selected_ids(&controller);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), controller.selection().len());
    }

    #[test]
    fn test_stale_fetch_discarded_either_order() {
        // Slow response for page 2 arrives after the page 3 response.
        let mut controller = TableController::new(5).unwrap();
        let slow = request_of(&controller.on_page_change(1, 5).unwrap());
        let fast = request_of(&controller.on_page_change(2, 5).unwrap());

        controller.on_page_loaded(fast, page(3, 11, 5, 4));
        controller.on_page_loaded(slow, page(2, 6, 5, 4));
        assert_eq!(controller.page_number(), 3);
        assert_eq!(controller.visible()[0].id(), 11);

        // Same outcome when the stale response arrives first.
        let mut controller = TableController::new(5).unwrap();
        let slow = request_of(&controller.on_page_change(1, 5).unwrap());
        let fast = request_of(&controller.on_page_change(2, 5).unwrap());

        controller.on_page_loaded(slow, page(2, 6, 5, 4));
        assert!(controller.visible().is_empty());
        controller.on_page_loaded(fast, page(3, 11, 5, 4));
        assert_eq!(controller.visible()[0].id(), 11);
    }

    #[test]
    fn test_stale_window_does_not_feed_bulk() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));
        controller.on_bulk_select_submit(12);

        let slow = request_of(&controller.on_page_change(1, 5).unwrap());
        let fast = request_of(&controller.on_page_change(2, 5).unwrap());
        controller.on_page_loaded(fast, page(3, 11, 5, 4));
        let selected = controller.selection().len();

        controller.on_page_loaded(slow, page(2, 6, 5, 4));
        assert_eq!(controller.selection().len(), selected);
    }

    #[test]
    fn test_invalid_rows_per_page_rejected() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));
        let first = controller.first();

        let err = controller.on_page_change(3, 0).unwrap_err();
        assert_eq!(err, ControllerError::InvalidRowsPerPage(0));
        assert_eq!(controller.page_number(), 1);
        assert_eq!(controller.first(), first);

        let err = controller.on_rows_per_page_change(0).unwrap_err();
        assert_eq!(err, ControllerError::InvalidRowsPerPage(0));
        assert_eq!(controller.rows_per_page(), 5);

        assert!(TableController::<Row>::new(0).is_err());
    }

    #[test]
    fn test_fetch_failure_keeps_previous_window() {
        let mut controller = TableController::new(5).unwrap();
        load(&mut controller, page(1, 1, 5, 4));

        let request = request_of(&controller.on_page_change(1, 5).unwrap());
        controller.on_fetch_failed(request, "connection reset");

        assert_eq!(controller.visible()[0].id(), 1);
        assert!(!controller.is_loading());
        assert_eq!(controller.last_error(), Some("connection reset"));

        // The next successful fetch clears the error.
        let request = request_of(&controller.on_page_change(1, 5).unwrap());
        controller.on_page_loaded(request, page(2, 6, 5, 4));
        assert_eq!(controller.last_error(), None);
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut controller = TableController::new(5).unwrap();
        let slow = request_of(&controller.on_page_change(1, 5).unwrap());
        let fast = request_of(&controller.on_page_change(2, 5).unwrap());

        controller.on_page_loaded(fast, page(3, 11, 5, 4));
        controller.on_fetch_failed(slow, "timed out");
        assert_eq!(controller.last_error(), None);
    }
}
