//! Column registry.

use std::collections::HashSet;

use crate::config::ColumnDeclaration;
use crate::error::ConfigError;

use super::ColumnSpec;

/// The resolved, ordered column set of a table.
///
/// Capability queries on the registry decide whether the search box, export
/// affordance and filter row exist at all.
///
/// # Example
///
/// ```
/// use datatable_lib::column::ColumnRegistry;
/// use datatable_lib::config::ColumnDeclaration;
///
/// let registry = ColumnRegistry::resolve(&[
///     ColumnDeclaration::new("request_id", "Ref").with_searchable(false),
///     ColumnDeclaration::new("first_name", "First Name").with_exportable(false),
/// ]).unwrap();
///
/// assert!(registry.has_any_searchable());
/// assert!(registry.has_any_exportable());
/// assert_eq!(registry.filterable_columns().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRegistry {
    columns: Vec<ColumnSpec>,
}

impl ColumnRegistry {
    /// Resolves declarations in order. Column keys must be unique.
    pub fn resolve(declarations: &[ColumnDeclaration]) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(declarations.len());
        let mut columns = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            if !seen.insert(declaration.key.as_str()) {
                return Err(ConfigError::duplicate_column(&declaration.key));
            }
            columns.push(ColumnSpec::resolve(declaration)?);
        }

        Ok(Self { columns })
    }

    /// Returns all columns in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Returns the column with the given key.
    pub fn get(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns `true` if any column is searchable.
    ///
    /// Without a searchable column there is no search box and no filter row.
    pub fn has_any_searchable(&self) -> bool {
        self.columns.iter().any(|c| c.searchable)
    }

    /// Returns `true` if any column is exportable.
    pub fn has_any_exportable(&self) -> bool {
        self.columns.iter().any(|c| c.exportable)
    }

    /// Returns the columns that have a filter.
    pub fn filterable_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.has_filter()).collect()
    }

    /// Returns the columns included in exports.
    pub fn exportable_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.exportable).collect()
    }

    /// Returns the keys of the columns the global search applies to.
    pub fn search_all_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.in_search_all())
            .map(|c| c.key.clone())
            .collect()
    }

    /// Returns `true` if the column exists and is sortable.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.sortable)
    }
}
