//! Read-only snapshot for the rendering layer.

use chrono::DateTime;
use chrono::Utc;

use crate::column::ColumnSpec;
use crate::fetch::Row;
use crate::filter::FilterValue;
use crate::pagination::DisplayRange;
use crate::sort::SortState;

use super::TableStatus;

/// Message shown for a failed fetch when no error renderer is configured.
pub const DEFAULT_ERROR_MESSAGE: &str =
    "The table failed to initialise. Please check you are connected to the internet and try again.";

/// Everything the rendering layer needs for one render cycle.
///
/// Produced by [`TableController::view`](super::TableController::view); it
/// owns its data and does not change when the controller does.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    pub table_id: Option<String>,
    pub title: Option<String>,
    pub status: TableStatus,
    pub body: ViewBody,
}

impl TableViewModel {
    /// Returns the failure text if the table is not rendered at all.
    pub fn failure_text(&self) -> Option<&str> {
        match &self.body {
            ViewBody::Uninitialized(text) | ViewBody::Failed(text) => Some(text),
            ViewBody::Table(_) => None,
        }
    }

    /// Returns the table contents if the table is rendered.
    pub fn table(&self) -> Option<&TableView> {
        match &self.body {
            ViewBody::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// What replaces the table area.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Configuration error text, e.g. "Missing table identifier".
    Uninitialized(String),
    /// Default or custom-rendered fetch failure. Nothing else is shown.
    Failed(String),
    Table(Box<TableView>),
}

/// The normal table UI.
///
/// Optional affordances are structural: `search` is `None` and `filter_row`
/// is `None` when the table has no searchable column, and `show_export` is
/// `false` without an exportable column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub key_field: String,
    pub min_width: Option<u32>,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Row>,
    pub search: Option<SearchBox>,
    pub show_export: bool,
    pub filter_row: Option<FilterRow>,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub range: DisplayRange,
    /// Default "Showing X to Y of Z Results" or the custom renderer's output.
    pub total_text: String,
    /// No response has arrived yet.
    pub loading: bool,
    /// A request is in flight.
    pub fetching: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// The global search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub term: String,
}

/// Per-column filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRow {
    /// Toggled by the user; the row exists either way.
    pub visible: bool,
    /// Current value of each filterable column, in column order.
    pub filters: Vec<FilterCell>,
}

impl FilterRow {
    /// Returns the value shown for a column.
    pub fn value(&self, key: &str) -> Option<&FilterValue> {
        self.filters.iter().find(|f| f.key == key).map(|f| &f.value)
    }
}

/// One filter input.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCell {
    pub key: String,
    pub value: FilterValue,
}
