//! Pagination state.

use serde::Deserialize;
use serde::Serialize;

use crate::config::TotalRenderer;
use crate::error::TransitionError;

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page, page size and the last total reported by the data source.
///
/// Invariant: while `total_rows > 0`, `(page - 1) * page_size < total_rows`.
/// Page 1 is always valid, even for an empty table.
///
/// # Example
///
/// ```
/// use datatable_lib::pagination::PaginationState;
///
/// let mut pagination = PaginationState::initial(None);
/// pagination.set_total(119);
///
/// assert!(pagination.go_to_page(12).is_ok());
/// assert!(pagination.go_to_page(13).is_err());
/// assert_eq!(pagination.page(), 12);
/// assert_eq!(pagination.display_range().to_string(), "Showing 111 to 119 of 119 Results");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
    total_rows: usize,
}

impl PaginationState {
    /// Creates the state for page 1 with an unknown (zero) total.
    ///
    /// A missing or zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn initial(page_size: Option<usize>) -> Self {
        Self {
            page: 1,
            page_size: page_size.filter(|&size| size > 0).unwrap_or(DEFAULT_PAGE_SIZE),
            total_rows: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns the number of pages; at least 1.
    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// Returns `true` if `page` exists for the current total.
    pub fn is_valid_page(&self, page: usize) -> bool {
        page == 1 || (page > 1 && (page - 1).saturating_mul(self.page_size) < self.total_rows)
    }

    /// Moves to `page`. Pages that do not exist are rejected without change.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), TransitionError> {
        if !self.is_valid_page(page) {
            return Err(TransitionError::PageOutOfRange {
                page,
                page_count: self.page_count(),
            });
        }
        self.page = page;
        Ok(())
    }

    /// Returns to page 1.
    pub fn first_page(&mut self) {
        self.page = 1;
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TransitionError> {
        if page_size == 0 {
            return Err(TransitionError::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Records the total reported by the data source, clamping the page to
    /// the last one that exists.
    ///
    /// Returns `true` if the page had to move.
    pub fn set_total(&mut self, total_rows: usize) -> bool {
        self.total_rows = total_rows;
        let last = self.page_count();
        if total_rows > 0 && self.page > last {
            self.page = last;
            return true;
        }
        false
    }

    /// Applies persisted values without range checks.
    ///
    /// The total is unknown when state is restored; the next
    /// [`set_total`](Self::set_total) clamps the page if needed.
    pub fn restore(&mut self, page: Option<usize>, page_size: Option<usize>) {
        if let Some(size) = page_size.filter(|&size| size > 0) {
            self.page_size = size;
        }
        if let Some(page) = page.filter(|&page| page > 0) {
            self.page = page;
        }
    }

    /// Returns the 1-based range of rows shown on the current page.
    pub fn display_range(&self) -> DisplayRange {
        if self.total_rows == 0 {
            return DisplayRange::default();
        }
        let from = (self.page - 1) * self.page_size + 1;
        let to = (self.page * self.page_size).min(self.total_rows);
        DisplayRange {
            from,
            to,
            total: self.total_rows,
        }
    }

    /// Renders the total text, using `renderer` in place of the default text.
    pub fn total_text(&self, renderer: Option<&TotalRenderer>) -> String {
        let range = self.display_range();
        match renderer {
            Some(render) => render(range.from, range.to, range.total),
            None => range.to_string(),
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::initial(None)
    }
}

/// Rows shown on the current page. All zero for an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DisplayRange {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl std::fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} to {} of {} Results", self.from, self.to, self.total)
    }
}
