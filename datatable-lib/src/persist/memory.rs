//! In-memory state store implementation using DashMap

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;

use super::StateStore;

#[derive(Debug, Clone)]
struct StoredState {
    data: String,
    saved_at: DateTime<Utc>,
}

/// An in-memory state store backed by a concurrent hash map.
///
/// Thread-safe, but data is lost when the process exits. Useful for tests and
/// for embedding applications that persist the map themselves.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    store: DashMap<String, StoredState>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Creates a new store with the specified initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: DashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of stored tables.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns when a table's state was last saved.
    pub fn saved_at(&self, table_id: &str) -> Option<DateTime<Utc>> {
        self.store.get(table_id).map(|entry| entry.saved_at)
    }
}

impl StateStore for InMemoryStore {
    fn load(&self, table_id: &str) -> Option<String> {
        self.store.get(table_id).map(|entry| entry.data.clone())
    }

    fn save(&self, table_id: &str, state: String) {
        self.store.insert(
            table_id.to_string(),
            StoredState {
                data: state,
                saved_at: Utc::now(),
            },
        );
    }

    fn remove(&self, table_id: &str) {
        self.store.remove(table_id);
    }
}
