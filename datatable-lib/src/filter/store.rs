//! Current filter value per column.

use std::collections::BTreeMap;

use crate::column::ColumnSpec;
use crate::error::TransitionError;

use super::FilterValue;
use super::NumberFilter;

/// Holds the current filter value of every filterable column.
///
/// Values are keyed by column key in a `BTreeMap`, so iteration order (and
/// therefore request serialization) is stable.
///
/// # Example
///
/// ```
/// use datatable_lib::column::ColumnRegistry;
/// use datatable_lib::config::ColumnDeclaration;
/// use datatable_lib::filter::{FilterKind, FilterStateStore, FilterValue};
///
/// let registry = ColumnRegistry::resolve(&[
///     ColumnDeclaration::new("first_name", "First Name").with_default(FilterValue::text("Dave")),
/// ]).unwrap();
///
/// let mut store = FilterStateStore::new(registry.columns());
/// assert_eq!(store.get("first_name"), Some(&FilterValue::text("Dave")));
///
/// store.clear_all();
/// assert_eq!(store.get("first_name"), Some(&FilterValue::text("")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStateStore {
    columns: Vec<ColumnSpec>,
    values: BTreeMap<String, FilterValue>,
}

impl FilterStateStore {
    /// Creates a store holding the default value of every filterable column.
    pub fn new(columns: &[ColumnSpec]) -> Self {
        let values = columns
            .iter()
            .filter_map(|column| Some((column.key.clone(), Self::default_for(column)?)))
            .collect();
        Self {
            columns: columns.to_vec(),
            values,
        }
    }

    /// Returns the initial value of a column's filter.
    ///
    /// This is the configured default when there is one, otherwise the kind's
    /// unset value. Returns `None` for columns without a filter.
    pub fn default_for(column: &ColumnSpec) -> Option<FilterValue> {
        let empty = Self::empty_for(column)?;
        Some(column.default_value.clone().unwrap_or(empty))
    }

    /// Returns the unset value of a column's filter.
    ///
    /// Number filters keep the comparator the column was configured with.
    fn empty_for(column: &ColumnSpec) -> Option<FilterValue> {
        match column.filter_kind.empty_value()? {
            FilterValue::Number(_) => Some(FilterValue::Number(NumberFilter {
                comparator: column.preset_comparator(),
                number: None,
            })),
            empty => Some(empty),
        }
    }

    /// Replaces the value of one column's filter.
    ///
    /// Rejects unknown and non-filterable columns, values whose shape does not
    /// match the column's kind, and select values outside the column's options.
    /// A rejected value leaves the store unchanged.
    pub fn set_filter(&mut self, key: &str, value: FilterValue) -> Result<(), TransitionError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| TransitionError::unknown_column(key))?;

        if !column.has_filter() {
            return Err(TransitionError::not_filterable(key));
        }

        let value = column
            .filter_kind
            .accept(value)
            .ok_or_else(|| TransitionError::kind_mismatch(key, column.filter_kind))?;

        if let FilterValue::Select(option) = &value {
            if !column.allows_option(option) {
                return Err(TransitionError::OptionNotAllowed {
                    key: key.to_string(),
                    value: option.clone(),
                });
            }
        }

        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Resets every filter to its unset value.
    ///
    /// Configured defaults are not restored: clearing always empties.
    pub fn clear_all(&mut self) {
        for column in &self.columns {
            if let Some(empty) = Self::empty_for(column) {
                self.values.insert(column.key.clone(), empty);
            }
        }
    }

    /// Returns the value of one column's filter.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Returns the current value of every filterable column.
    pub fn current_values(&self) -> &BTreeMap<String, FilterValue> {
        &self.values
    }

    /// Returns the values that are set, in key order.
    pub fn active_values(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_unset())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns `true` if any filter is set.
    pub fn has_active(&self) -> bool {
        self.active_values().next().is_some()
    }

    /// Rebuilds the store for a new column list.
    ///
    /// Columns that still exist with the same filter kind keep an entered
    /// value (as long as it is still a valid option). A value still equal to
    /// the column's previous default follows the new default, new columns
    /// start at their default, and values of removed columns are dropped.
    pub fn reconcile(&mut self, columns: &[ColumnSpec]) {
        let mut previous = std::mem::take(&mut self.values);
        for column in &self.columns {
            if previous.get(&column.key) == Self::default_for(column).as_ref() {
                previous.remove(&column.key);
            }
        }
        *self = Self::new(columns);

        for column in columns {
            let Some(old) = previous.remove(&column.key) else {
                continue;
            };
            let fits = old.kind() == column.filter_kind
                && match &old {
                    FilterValue::Select(option) => column.allows_option(option),
                    _ => true,
                };
            if fits {
                self.values.insert(column.key.clone(), old);
            }
        }
    }

    /// Applies previously persisted values, skipping any that no longer fit.
    pub fn restore(&mut self, values: BTreeMap<String, FilterValue>) {
        for (key, value) in values {
            if let Err(err) = self.set_filter(&key, value) {
                log::debug!("[filters] Skipping persisted filter: {}", err);
            }
        }
    }
}
