//! Sort state.

use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnRegistry;
use crate::error::TransitionError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// The active sort column and direction.
///
/// Only changed by an explicit sort action or a configuration change; a data
/// refresh never resets it.
///
/// # Example
///
/// ```
/// use datatable_lib::column::ColumnRegistry;
/// use datatable_lib::config::ColumnDeclaration;
/// use datatable_lib::sort::{Direction, SortState};
///
/// let registry = ColumnRegistry::resolve(&[ColumnDeclaration::new("name", "Name")]).unwrap();
/// let mut sort = SortState::unsorted();
///
/// sort.apply_sort("name", &registry).unwrap();
/// assert_eq!(sort.direction(), Direction::Asc);
///
/// sort.apply_sort("name", &registry).unwrap();
/// assert_eq!(sort.direction(), Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    column: Option<String>,
    direction: Direction,
}

impl SortState {
    /// Creates an unsorted state.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Creates the initial sort from a configured default.
    ///
    /// The default only applies if it names a sortable column.
    pub fn initial(default_sort: Option<&(String, Direction)>, registry: &ColumnRegistry) -> Self {
        match default_sort {
            Some((column, direction)) if registry.is_sortable(column) => Self {
                column: Some(column.clone()),
                direction: *direction,
            },
            Some((column, _)) => {
                log::debug!("[sort] Ignoring default sort on non-sortable column '{}'", column);
                Self::unsorted()
            }
            None => Self::unsorted(),
        }
    }

    /// Returns the sorted column, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if a column is sorted.
    pub fn is_sorted(&self) -> bool {
        self.column.is_some()
    }

    /// Sorts by `key`.
    ///
    /// Sorting the current column again toggles its direction; any other
    /// column starts ascending. Non-sortable columns are rejected.
    pub fn apply_sort(&mut self, key: &str, registry: &ColumnRegistry) -> Result<(), TransitionError> {
        let column = registry
            .get(key)
            .ok_or_else(|| TransitionError::unknown_column(key))?;
        if !column.sortable {
            return Err(TransitionError::not_sortable(key));
        }

        if self.column.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.column = Some(key.to_string());
            self.direction = Direction::Asc;
        }
        Ok(())
    }

    /// Moves to a new configuration's initial sort.
    ///
    /// An entered sort is kept while its column is still sortable. A sort
    /// still equal to the previous configuration's initial sort follows the
    /// new one.
    pub fn reconcile(&mut self, previous_initial: &SortState, initial: SortState, registry: &ColumnRegistry) {
        let still_valid = match &self.column {
            Some(column) => registry.is_sortable(column),
            None => true,
        };
        if !still_valid || *self == *previous_initial {
            *self = initial;
        }
    }

    /// Applies a persisted sort if its column is still sortable.
    pub fn restore(&mut self, persisted: SortState, registry: &ColumnRegistry) {
        match persisted.column() {
            Some(column) if !registry.is_sortable(column) => {
                log::debug!("[sort] Skipping persisted sort on '{}'", column);
            }
            _ => *self = persisted,
        }
    }
}
