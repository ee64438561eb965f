//! Resolved columns and capability defaults.

mod registry;

pub use registry::ColumnRegistry;

use serde::Serialize;

use crate::config::ColumnDeclaration;
use crate::config::FilterOptions;
use crate::error::ConfigError;
use crate::filter::Comparator;
use crate::filter::FilterKind;
use crate::filter::FilterValue;

/// A per-column capability that is declared tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Searchable,
    Sortable,
    Exportable,
    DisableSearchAll,
}

impl Capability {
    /// Value of the capability when the declaration leaves it unset.
    ///
    /// Searching, sorting and exporting are opt-out; excluding a column from
    /// the global search is opt-in.
    pub fn default_value(self) -> bool {
        match self {
            Capability::Searchable | Capability::Sortable | Capability::Exportable => true,
            Capability::DisableSearchAll => false,
        }
    }

    /// Resolves a tri-state declaration to a concrete value.
    pub fn resolve(self, declared: Option<bool>) -> bool {
        declared.unwrap_or(self.default_value())
    }
}

/// A column with all defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub key: String,
    pub title: String,
    pub filter_kind: FilterKind,
    /// Select options in declaration order. Empty for other kinds.
    pub filter_options: FilterOptions,
    /// Configured initial filter value, already fitted to `filter_kind`.
    pub default_value: Option<FilterValue>,
    pub searchable: bool,
    pub sortable: bool,
    pub exportable: bool,
    pub disable_search_all: bool,
    pub width: Option<u32>,
}

impl ColumnSpec {
    /// Resolves one declaration.
    ///
    /// Searchable columns without a declared filter get a text filter;
    /// non-searchable columns never have one.
    pub fn resolve(declaration: &ColumnDeclaration) -> Result<Self, ConfigError> {
        let searchable = Capability::Searchable.resolve(declaration.searchable);
        let filter_kind = if searchable {
            declaration.filter.unwrap_or(FilterKind::Text)
        } else {
            FilterKind::None
        };

        let default_value = match (&declaration.default_value, filter_kind) {
            (_, FilterKind::None) | (None, _) => None,
            (Some(value), kind) => Some(
                kind.accept(value.clone())
                    .ok_or_else(|| ConfigError::default_kind_mismatch(&declaration.key, kind))?,
            ),
        };

        let filter_options = if filter_kind == FilterKind::Select {
            declaration.filter_options.clone()
        } else {
            FilterOptions::new()
        };

        Ok(Self {
            key: declaration.key.clone(),
            title: declaration.title.clone(),
            filter_kind,
            filter_options,
            default_value,
            searchable,
            sortable: Capability::Sortable.resolve(declaration.sortable),
            exportable: Capability::Exportable.resolve(declaration.exportable),
            disable_search_all: Capability::DisableSearchAll.resolve(declaration.disable_search_all),
            width: declaration.width,
        })
    }

    /// Returns `true` if the column has a filter.
    pub fn has_filter(&self) -> bool {
        self.filter_kind != FilterKind::None
    }

    /// Returns `true` if the global search applies to this column.
    pub fn in_search_all(&self) -> bool {
        self.searchable && !self.disable_search_all
    }

    /// Comparator pre-selected by the column's default, if any.
    pub fn preset_comparator(&self) -> Option<Comparator> {
        match &self.default_value {
            Some(FilterValue::Number(n)) => n.comparator,
            _ => None,
        }
    }

    /// Returns `true` if `option` may be selected.
    ///
    /// The empty option (unset) is always allowed, as is anything when no
    /// options were declared.
    pub fn allows_option(&self, option: &str) -> bool {
        option.is_empty() || self.filter_options.is_empty() || self.filter_options.contains(option)
    }
}
