//! Global search state.

use crate::column::ColumnRegistry;

/// The global free-text search term.
///
/// Only exists for tables with at least one searchable column; see
/// [`SearchState::for_registry`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    term: String,
    columns: Vec<String>,
}

impl SearchState {
    /// Creates the search state for a column set, or `None` if no column is
    /// searchable.
    pub fn for_registry(registry: &ColumnRegistry, default_search: Option<&str>) -> Option<Self> {
        if !registry.has_any_searchable() {
            return None;
        }
        Some(Self {
            term: default_search.unwrap_or_default().to_string(),
            columns: registry.search_all_columns(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Keys of the columns the term is matched against.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if no term is entered.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Replaces the term. Returns `true` if it changed.
    pub fn set_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.term {
            return false;
        }
        self.term = term;
        true
    }
}
