//! Transition error types

use crate::filter::FilterKind;

/// A rejected state mutation.
///
/// Sub-state operations return these; the controller logs them and leaves the
/// previous valid state in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    /// The requested page does not exist.
    #[error("Page {page} is out of range ({page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    /// Page sizes must be positive.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// No column has the given key.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// The column is marked non-sortable.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },

    /// The column has no filter.
    #[error("Column '{key}' has no filter")]
    NotFilterable { key: String },

    /// The value's shape does not match the column's filter kind.
    #[error("Filter value for '{key}' does not match its {expected} filter")]
    KindMismatch { key: String, expected: FilterKind },

    /// The value is not one of the column's select options.
    #[error("'{value}' is not an option of column '{key}'")]
    OptionNotAllowed { key: String, value: String },

    /// The table has no searchable column, so there is no search box.
    #[error("Table has no searchable columns")]
    SearchUnavailable,
}

impl TransitionError {
    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates a new non-sortable column error.
    pub fn not_sortable(key: impl Into<String>) -> Self {
        Self::NotSortable { key: key.into() }
    }

    /// Creates a new non-filterable column error.
    pub fn not_filterable(key: impl Into<String>) -> Self {
        Self::NotFilterable { key: key.into() }
    }

    /// Creates a new kind mismatch error.
    pub fn kind_mismatch(key: impl Into<String>, expected: FilterKind) -> Self {
        Self::KindMismatch {
            key: key.into(),
            expected,
        }
    }
}
