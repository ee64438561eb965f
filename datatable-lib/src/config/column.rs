//! Raw column declarations.

use serde::Deserialize;
use serde::Serialize;

use crate::filter::FilterKind;
use crate::filter::FilterValue;

use super::FilterOptions;

/// One column as declared in the table settings, before defaults are applied.
///
/// Capabilities are tri-state: `Some(true)`, `Some(false)` or undeclared.
/// [`ColumnRegistry::resolve`](crate::column::ColumnRegistry::resolve) turns
/// declarations into [`ColumnSpec`](crate::column::ColumnSpec)s.
///
/// # Example
///
/// ```
/// use datatable_lib::config::ColumnDeclaration;
/// use datatable_lib::filter::FilterKind;
///
/// let column = ColumnDeclaration::new("type", "Type")
///     .with_filter(FilterKind::Select)
///     .with_option("Add", "Add")
///     .with_option("Remove", "Remove")
///     .with_exportable(false);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDeclaration {
    /// Data field this column displays. Must be unique.
    pub key: String,
    #[serde(default)]
    pub title: String,
    /// Filter widget; undeclared means a text filter on searchable columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterKind>,
    /// Select options, value to label, in declaration order.
    #[serde(default, skip_serializing_if = "FilterOptions::is_empty")]
    pub filter_options: FilterOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, rename = "export", skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
    /// Excludes the column from the global search while keeping its filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_search_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl ColumnDeclaration {
    /// Creates a declaration with every capability left undeclared.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the filter kind.
    pub fn with_filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    /// Adds a select option.
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.filter_options.insert(value, label);
        self
    }

    /// Sets the default filter value.
    pub fn with_default(mut self, value: FilterValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Declares whether the column is searchable.
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = Some(searchable);
        self
    }

    /// Declares whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    /// Declares whether the column is included in exports.
    pub fn with_exportable(mut self, exportable: bool) -> Self {
        self.exportable = Some(exportable);
        self
    }

    /// Excludes the column from the global search.
    pub fn with_search_all_disabled(mut self) -> Self {
        self.disable_search_all = Some(true);
        self
    }

    /// Sets the column width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}
