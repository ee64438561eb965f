//! Table configuration
//!
//! A [`TableConfiguration`] is the declarative input of a table: identifier,
//! columns and the optional defaults the controller derives its state from.
//! It can be built in code or read from the JSON table settings format.
//!
//! # Example
//!
//! ```
//! use datatable_lib::config::{ColumnDeclaration, TableConfiguration};
//! use datatable_lib::sort::Direction;
//!
//! let config = TableConfiguration::new("ExampleDataTable")
//!     .with_key_field("request_id")
//!     .with_default_sort("request_id", Direction::Desc)
//!     .with_column(ColumnDeclaration::new("request_id", "Ref"))
//!     .with_column(ColumnDeclaration::new("email", "Email Address"));
//!
//! let json = r#"{
//!     "tableID": "ExampleDataTable",
//!     "keyField": "request_id",
//!     "defaultSort": ["request_id", "desc"],
//!     "tableColumns": [
//!         { "title": "Ref", "key": "request_id" },
//!         { "title": "Email Address", "key": "email" }
//!     ]
//! }"#;
//! let parsed = TableConfiguration::from_json(json).unwrap();
//! assert_eq!(parsed.table_id(), config.table_id());
//! ```

mod column;
mod options;
mod render;

pub use column::*;
pub use options::*;
pub use render::*;

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::sort::Direction;

/// Declarative description of one table.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfiguration {
    /// Identifies the table's fetch results and persisted state. Required.
    #[serde(default, rename = "tableID")]
    pub table_id: Option<String>,
    /// Field that uniquely identifies a row.
    #[serde(default)]
    pub key_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    /// Initial sort as `(column, direction)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<(String, Direction)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    /// Whether state is persisted through the controller's state store.
    #[serde(default, rename = "useLocalStorage")]
    pub use_persistence: bool,
    /// Rows per page. Default: 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, rename = "tableColumns")]
    pub columns: Vec<ColumnDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_search: Option<String>,
    #[serde(skip)]
    pub total_renderer: Option<TotalRenderer>,
    #[serde(skip)]
    pub error_renderer: Option<ErrorRenderer>,
}

impl TableConfiguration {
    /// Creates a configuration for the given table identifier.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: Some(table_id.into()),
            ..Self::default()
        }
    }

    /// Parses a configuration from the JSON table settings format.
    ///
    /// Renderers cannot be expressed in JSON; attach them afterwards.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the table identifier, or an error if it is missing or blank.
    pub fn table_id(&self) -> Result<&str, ConfigError> {
        match self.table_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(ConfigError::MissingTableId),
        }
    }

    /// Sets the key field.
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Sets the display title.
    pub fn with_display_title(mut self, title: impl Into<String>) -> Self {
        self.display_title = Some(title.into());
        self
    }

    /// Sets the initial sort.
    pub fn with_default_sort(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.default_sort = Some((column.into(), direction));
        self
    }

    /// Sets the minimum table width.
    pub fn with_min_width(mut self, width: u32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Enables or disables state persistence.
    pub fn with_persistence(mut self, enabled: bool) -> Self {
        self.use_persistence = enabled;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Appends a column.
    pub fn with_column(mut self, column: ColumnDeclaration) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces all columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDeclaration>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Sets the initial global search term.
    pub fn with_default_search(mut self, term: impl Into<String>) -> Self {
        self.default_search = Some(term.into());
        self
    }

    /// Sets a custom pagination total renderer.
    pub fn with_total_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(usize, usize, usize) -> String + Send + Sync + 'static,
    {
        self.total_renderer = Some(Arc::new(renderer));
        self
    }

    /// Sets a custom error renderer.
    pub fn with_error_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    {
        self.error_renderer = Some(Arc::new(renderer));
        self
    }
}

impl std::fmt::Debug for TableConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableConfiguration")
            .field("table_id", &self.table_id)
            .field("key_field", &self.key_field)
            .field("display_title", &self.display_title)
            .field("default_sort", &self.default_sort)
            .field("min_width", &self.min_width)
            .field("use_persistence", &self.use_persistence)
            .field("page_size", &self.page_size)
            .field("columns", &self.columns)
            .field("default_search", &self.default_search)
            .field("total_renderer", &self.total_renderer.is_some())
            .field("error_renderer", &self.error_renderer.is_some())
            .finish()
    }
}
