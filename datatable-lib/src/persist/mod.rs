//! State persistence
//!
//! Provides a `StateStore` trait for key-value stores that keep table state
//! across sessions, keyed by table identifier, and the [`PersistedState`]
//! payload the controller writes after every state change.

mod memory;

pub use memory::*;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::filter::FilterValue;
use crate::sort::SortState;

/// Trait for state stores.
///
/// Values are opaque strings (JSON of a [`PersistedState`]). The controller
/// reads a table's entry once when it mounts and overwrites it after every
/// state change; it never expects a save to fail.
///
/// # Example
///
/// ```
/// use datatable_lib::persist::{InMemoryStore, StateStore};
///
/// let store = InMemoryStore::new();
/// store.save("ExampleDataTable", r#"{"page":2}"#.to_string());
/// assert_eq!(store.load("ExampleDataTable").as_deref(), Some(r#"{"page":2}"#));
/// ```
pub trait StateStore: Send + Sync {
    /// Returns the stored value for a table, if any.
    fn load(&self, table_id: &str) -> Option<String>;

    /// Stores the value for a table, replacing any previous one.
    fn save(&self, table_id: &str, state: String);

    /// Removes the stored value for a table.
    fn remove(&self, table_id: &str);
}

/// The serializable part of a table's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub filters: BTreeMap<String, FilterValue>,
    pub sort: SortState,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
}

impl PersistedState {
    /// Reads and decodes a table's state.
    ///
    /// An undecodable entry is logged and treated as absent.
    pub fn load(store: &dyn StateStore, table_id: &str) -> Option<Self> {
        let raw = store.load(table_id)?;
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("[persist] Ignoring unreadable state for '{}': {}", table_id, err);
                None
            }
        }
    }

    /// Encodes and writes a table's state.
    pub fn save(&self, store: &dyn StateStore, table_id: &str) -> Result<(), serde_json::Error> {
        store.save(table_id, serde_json::to_string(self)?);
        Ok(())
    }
}
