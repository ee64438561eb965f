//! Table controller
//!
//! [`TableController`] owns a table's filter, sort, pagination and search
//! state, issues fetches through an injected [`Dispatcher`], applies the
//! responses it is given, and derives the [`TableViewModel`] the rendering
//! layer consumes.
//!
//! The controller is driven by discrete events (mount, configuration change,
//! user interaction, fetch response) and never blocks: dispatch is
//! fire-and-forget, and responses come back through [`TableController::receive`].
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use datatable_lib::config::{ColumnDeclaration, TableConfiguration};
//! use datatable_lib::dispatch::FetchAction;
//! use datatable_lib::fetch::{FetchResponse, FetchResult};
//! use datatable_lib::TableController;
//!
//! let config = TableConfiguration::new("Requests")
//!     .with_key_field("request_id")
//!     .with_column(ColumnDeclaration::new("request_id", "Ref"))
//!     .with_column(ColumnDeclaration::new("email", "Email Address"));
//!
//! let sent: Arc<Mutex<Vec<FetchAction>>> = Arc::default();
//! let outbox = sent.clone();
//! let mut controller = TableController::builder()
//!     .config(config)
//!     .api_location("https://my.api/service")
//!     .dispatcher(move |action: FetchAction| outbox.lock().unwrap().push(action))
//!     .mount();
//!
//! // Mounting fires the first request.
//! let first = sent.lock().unwrap()[0].clone();
//! controller.receive(FetchResponse::for_action(&first, FetchResult::success(vec![], 119)));
//!
//! assert!(controller.status().is_ready());
//! assert_eq!(controller.view().table().unwrap().total_text, "Showing 1 to 10 of 119 Results");
//! ```

mod state;
mod status;
mod view;

pub use status::TableStatus;
pub use view::*;

use std::sync::Arc;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

use crate::column::ColumnRegistry;
use crate::config::TableConfiguration;
use crate::dispatch::ActionKind;
use crate::dispatch::Dispatcher;
use crate::dispatch::FetchAction;
use crate::error::ConfigError;
use crate::error::TransitionError;
use crate::fetch::FetchResponse;
use crate::fetch::FetchResult;
use crate::filter::FilterStateStore;
use crate::filter::FilterValue;
use crate::pagination::PaginationState;
use crate::persist::PersistedState;
use crate::persist::StateStore;
use crate::request::FetchRequest;
use crate::sort::SortState;

use state::TableState;

/// Fetch lifecycle of a mounted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Ready,
    Failed,
}

/// Orchestrates the state of one data table.
///
/// Invalid configurations (such as a missing table identifier) leave the
/// controller [`Uninitialized`](TableStatus::Uninitialized): it renders only
/// the failure text, ignores every interaction and never dispatches.
///
/// Interactions return `true` when they were applied. Rejected interactions
/// (an out-of-range page, a non-sortable column, ...) are logged and leave
/// the previous state intact.
pub struct TableController {
    config: TableConfiguration,
    api_location: String,
    dispatcher: Arc<dyn Dispatcher>,
    store: Option<Arc<dyn StateStore>>,
    table: Result<TableState, ConfigError>,
    phase: Phase,
    result: FetchResult,
    filters_visible: bool,
    /// Sequence number of the most recently dispatched page fetch.
    sequence: u64,
    last_applied: Option<u64>,
    last_dispatched: Option<FetchRequest>,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl TableController {
    /// Creates a new builder for mounting a controller.
    pub fn builder() -> TableControllerBuilder<Missing, Missing> {
        TableControllerBuilder::new()
    }

    fn mount(
        config: TableConfiguration,
        api_location: String,
        dispatcher: Arc<dyn Dispatcher>,
        store: Option<Arc<dyn StateStore>>,
    ) -> Self {
        let mut controller = Self {
            config,
            api_location,
            dispatcher,
            store,
            table: Err(ConfigError::MissingTableId),
            phase: Phase::Loading,
            result: FetchResult::default(),
            filters_visible: false,
            sequence: 0,
            last_applied: None,
            last_dispatched: None,
            last_refreshed_at: None,
        };

        match TableState::derive(&controller.config) {
            Ok(mut table) => {
                if let Some(persisted) = controller.load_persisted(&table.table_id) {
                    table.restore(persisted);
                }
                log::info!(
                    "[table] Mounted '{}' with {} columns",
                    table.table_id,
                    table.registry.len()
                );
                controller.table = Ok(table);
                controller.reconcile(false);
            }
            Err(reason) => controller.fail(reason),
        }

        controller
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// Returns the lifecycle state.
    pub fn status(&self) -> TableStatus {
        match (&self.table, self.phase) {
            (Err(reason), _) => TableStatus::Uninitialized {
                reason: reason.clone(),
            },
            (Ok(_), Phase::Loading) => TableStatus::Loading,
            (Ok(_), Phase::Ready) => TableStatus::Ready,
            (Ok(_), Phase::Failed) => TableStatus::Error,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TableConfiguration {
        &self.config
    }

    /// Returns the resolved columns of a mounted table.
    pub fn registry(&self) -> Option<&ColumnRegistry> {
        self.table.as_ref().ok().map(|t| &t.registry)
    }

    pub fn filters(&self) -> Option<&FilterStateStore> {
        self.table.as_ref().ok().map(|t| &t.filters)
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.table.as_ref().ok().map(|t| &t.sort)
    }

    pub fn pagination(&self) -> Option<&PaginationState> {
        self.table.as_ref().ok().map(|t| &t.pagination)
    }

    /// Returns the search term, or `None` if the table has no search box.
    pub fn search_term(&self) -> Option<&str> {
        self.table
            .as_ref()
            .ok()
            .and_then(|t| t.search.as_ref())
            .map(|s| s.term())
    }

    /// Returns the latest applied fetch result.
    pub fn result(&self) -> &FetchResult {
        &self.result
    }

    /// Returns the request of the most recent page fetch.
    pub fn last_request(&self) -> Option<&FetchRequest> {
        self.last_dispatched.as_ref()
    }

    /// Returns when the table was last refreshed explicitly.
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    /// Returns `true` if the filter row is shown.
    pub fn filters_visible(&self) -> bool {
        self.filters_visible && self.has_filter_row()
    }

    /// Returns `true` if the table has a global search box.
    pub fn has_search_box(&self) -> bool {
        self.table.as_ref().is_ok_and(|t| t.search.is_some())
    }

    /// Returns `true` if the table has a filter row.
    pub fn has_filter_row(&self) -> bool {
        self.registry().is_some_and(ColumnRegistry::has_any_searchable)
    }

    /// Returns `true` if the table has an export affordance.
    pub fn has_export(&self) -> bool {
        self.registry().is_some_and(ColumnRegistry::has_any_exportable)
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Sets one column's filter and returns to page 1.
    pub fn set_filter(&mut self, key: &str, value: FilterValue) -> bool {
        self.mutate("filter change", |table| {
            table.filters.set_filter(key, value)?;
            table.pagination.first_page();
            Ok(())
        })
    }

    /// Empties every filter and returns to page 1.
    pub fn clear_filters(&mut self) -> bool {
        self.mutate("clear filters", |table| {
            table.filters.clear_all();
            table.pagination.first_page();
            Ok(())
        })
    }

    /// Sorts by a column, toggling the direction if it is already sorted.
    pub fn apply_sort(&mut self, key: &str) -> bool {
        self.mutate("sort", |table| table.sort.apply_sort(key, &table.registry))
    }

    /// Moves to a page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.mutate("page change", |table| table.pagination.go_to_page(page))
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        self.mutate("page size change", |table| {
            table.pagination.set_page_size(page_size)
        })
    }

    /// Replaces the global search term. A changed term returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.mutate("search", |table| {
            let search = table
                .search
                .as_mut()
                .ok_or(TransitionError::SearchUnavailable)?;
            if search.set_term(term) {
                table.pagination.first_page();
            }
            Ok(())
        })
    }

    /// Shows or hides the filter row. Returns the new visibility.
    pub fn toggle_filters(&mut self) -> bool {
        if !self.has_filter_row() {
            return false;
        }
        self.filters_visible = !self.filters_visible;
        self.filters_visible
    }

    /// Re-fires the current request, even if nothing changed.
    ///
    /// Records a refresh timestamp that strictly increases with every call
    /// and travels with the dispatched action.
    pub fn refresh(&mut self) -> bool {
        if self.table.is_err() {
            return false;
        }

        let now = Utc::now();
        let stamp = match self.last_refreshed_at {
            Some(previous) if now <= previous => previous + TimeDelta::milliseconds(1),
            _ => now,
        };
        self.last_refreshed_at = Some(stamp);
        log::info!("[table] Refresh requested at {}", stamp);

        self.reconcile(true)
    }

    /// Dispatches an export of every matching row of the exportable columns.
    ///
    /// Returns `false` if no column is exportable.
    pub fn export(&mut self) -> bool {
        let Ok(table) = &self.table else {
            return false;
        };

        let columns: Vec<String> = table
            .registry
            .exportable_columns()
            .into_iter()
            .map(|c| c.key.clone())
            .collect();
        if columns.is_empty() {
            log::debug!("[table] No exportable columns in '{}'", table.table_id);
            return false;
        }

        let mut request = table.request();
        request.page = 1;
        request.page_size = table.pagination.total_rows().max(table.pagination.page_size());

        log::info!("[table] Exporting {} columns of '{}'", columns.len(), table.table_id);
        self.dispatcher.dispatch(FetchAction {
            table_id: table.table_id.clone(),
            api_location: self.api_location.clone(),
            kind: ActionKind::Export { columns },
            refreshed_at: self.last_refreshed_at,
            request,
        });
        true
    }

    // -------------------------------------------------------------------------
    // External updates
    // -------------------------------------------------------------------------

    /// Applies a fetch response.
    ///
    /// Responses for other tables and responses older than the last applied
    /// one are discarded. Returns `true` if the response was applied.
    pub fn receive(&mut self, response: FetchResponse) -> bool {
        let Ok(table) = self.table.as_mut() else {
            return false;
        };
        if response.table_id != table.table_id {
            log::debug!(
                "[table] Ignoring response for '{}' in '{}'",
                response.table_id,
                table.table_id
            );
            return false;
        }

        match response.sequence {
            Some(sequence) if self.last_applied.is_some_and(|last| sequence < last) => {
                log::debug!(
                    "[table] Discarding stale response #{} (last applied #{:?})",
                    sequence,
                    self.last_applied
                );
                return false;
            }
            Some(sequence) => self.last_applied = Some(sequence),
            None => self.last_applied = Some(self.sequence),
        }

        let result = response.result;
        self.phase = if result.is_failed() {
            Phase::Failed
        } else if result.fetched {
            Phase::Ready
        } else {
            Phase::Loading
        };

        let clamped = result.fetched
            && !result.is_failed()
            && table.pagination.set_total(result.data_total_size);
        self.result = result;

        if clamped {
            self.persist();
            self.reconcile(false);
        }
        true
    }

    /// Replaces the configuration and re-derives all dependent state.
    ///
    /// For the same table, entered filter values, sort, page and search term
    /// are kept where they still fit the new columns, while values still at
    /// the previous defaults take the new defaults. A different table
    /// identifier starts over. An uninitialized controller stays
    /// uninitialized.
    pub fn reconfigure(&mut self, config: TableConfiguration) {
        if self.table.is_err() {
            log::debug!("[table] Ignoring configuration change of uninitialized table");
            return;
        }

        let previous = std::mem::replace(&mut self.config, config);
        let fresh = match TableState::derive(&self.config) {
            Ok(fresh) => fresh,
            Err(reason) => {
                self.fail(reason);
                return;
            }
        };

        let table = match std::mem::replace(&mut self.table, Err(ConfigError::MissingTableId)) {
            Ok(current) if current.table_id == fresh.table_id => {
                current.carry_over(fresh, &self.config, &previous)
            }
            _ => {
                let mut fresh = fresh;
                if let Some(persisted) = self.load_persisted(&fresh.table_id) {
                    fresh.restore(persisted);
                }
                log::info!("[table] Switched to table '{}'", fresh.table_id);
                self.phase = Phase::Loading;
                self.result = FetchResult::default();
                self.last_applied = None;
                self.last_dispatched = None;
                fresh
            }
        };

        self.table = Ok(table);
        self.persist();
        self.reconcile(false);
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Derives the snapshot the rendering layer consumes.
    pub fn view(&self) -> TableViewModel {
        let body = match &self.table {
            Err(reason) => ViewBody::Uninitialized(reason.to_string()),
            Ok(_) if self.phase == Phase::Failed => ViewBody::Failed(self.error_text()),
            Ok(table) => ViewBody::Table(Box::new(self.table_view(table))),
        };

        TableViewModel {
            table_id: self.table.as_ref().ok().map(|t| t.table_id.clone()),
            title: self.config.display_title.clone(),
            status: self.status(),
            body,
        }
    }

    fn error_text(&self) -> String {
        let Some(render) = &self.config.error_renderer else {
            return DEFAULT_ERROR_MESSAGE.to_string();
        };
        match &self.result.error {
            Some(error) => render(error.payload()),
            None => render(&serde_json::Value::Null),
        }
    }

    fn table_view(&self, table: &TableState) -> TableView {
        let filter_row = table.registry.has_any_searchable().then(|| FilterRow {
            visible: self.filters_visible,
            filters: table
                .registry
                .filterable_columns()
                .into_iter()
                .filter_map(|column| {
                    Some(FilterCell {
                        key: column.key.clone(),
                        value: table.filters.get(&column.key)?.clone(),
                    })
                })
                .collect(),
        });

        TableView {
            key_field: self.config.key_field.clone(),
            min_width: self.config.min_width,
            columns: table.registry.columns().to_vec(),
            rows: self.result.data.clone(),
            search: table.search.as_ref().map(|s| SearchBox {
                term: s.term().to_string(),
            }),
            show_export: table.registry.has_any_exportable(),
            filter_row,
            sort: table.sort.clone(),
            page: table.pagination.page(),
            page_size: table.pagination.page_size(),
            page_count: table.pagination.page_count(),
            range: table.pagination.display_range(),
            total_text: table.pagination.total_text(self.config.total_renderer.as_ref()),
            loading: !self.result.fetched,
            fetching: self.result.fetching || self.awaiting_response(),
            last_refreshed_at: self.last_refreshed_at,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn fail(&mut self, reason: ConfigError) {
        log::warn!("[table] Configuration error: {}", reason);
        self.table = Err(reason);
    }

    fn awaiting_response(&self) -> bool {
        self.sequence > 0 && self.last_applied.is_none_or(|last| last < self.sequence)
    }

    fn mutate<F>(&mut self, operation: &str, apply: F) -> bool
    where
        F: FnOnce(&mut TableState) -> Result<(), TransitionError>,
    {
        let Ok(table) = self.table.as_mut() else {
            log::debug!("[table] Ignoring {} on uninitialized table", operation);
            return false;
        };

        // Sub-state operations validate before changing anything.
        if let Err(err) = apply(table) {
            log::debug!("[table] Rejected {}: {}", operation, err);
            return false;
        }

        self.persist();
        self.reconcile(false);
        true
    }

    /// Dispatches the current request if it differs from the last one
    /// dispatched, or unconditionally when `force` is set.
    fn reconcile(&mut self, force: bool) -> bool {
        let Ok(table) = &self.table else {
            return false;
        };

        let request = table.request();
        if !force && self.last_dispatched.as_ref() == Some(&request) {
            log::trace!("[table] Request for '{}' unchanged", table.table_id);
            return false;
        }

        self.sequence += 1;
        let action = FetchAction {
            table_id: table.table_id.clone(),
            api_location: self.api_location.clone(),
            kind: ActionKind::Page {
                sequence: self.sequence,
            },
            refreshed_at: self.last_refreshed_at,
            request: request.clone(),
        };
        log::debug!(
            "[table] Dispatching fetch #{} for '{}' (page {})",
            self.sequence,
            table.table_id,
            request.page
        );

        self.last_dispatched = Some(request);
        if self.phase == Phase::Failed {
            self.phase = Phase::Loading;
        }
        self.dispatcher.dispatch(action);
        true
    }

    fn load_persisted(&self, table_id: &str) -> Option<PersistedState> {
        if !self.config.use_persistence {
            return None;
        }
        PersistedState::load(self.store.as_deref()?, table_id)
    }

    fn persist(&self) {
        if !self.config.use_persistence {
            return;
        }
        let (Ok(table), Some(store)) = (&self.table, self.store.as_deref()) else {
            return;
        };
        if let Err(err) = table.persisted().save(store, &table.table_id) {
            log::warn!("[persist] Failed to encode state for '{}': {}", table.table_id, err);
        }
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("config", &self.config)
            .field("api_location", &self.api_location)
            .field("status", &self.status())
            .field("sequence", &self.sequence)
            .field("last_applied", &self.last_applied)
            .field("last_refreshed_at", &self.last_refreshed_at)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for mounting a [`TableController`].
///
/// Uses the typestate pattern to ensure the configuration and dispatcher are
/// set at compile time.
///
/// # Required Fields
///
/// - `config` - The [`TableConfiguration`]
/// - `dispatcher` - A [`Dispatcher`] implementation (or closure)
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use datatable_lib::config::TableConfiguration;
/// use datatable_lib::dispatch::FetchAction;
/// use datatable_lib::persist::InMemoryStore;
/// use datatable_lib::TableController;
///
/// let _controller = TableController::builder()
///     .config(TableConfiguration::new("Requests").with_persistence(true))
///     .dispatcher(|_action: FetchAction| {})
///     .api_location("https://my.api/service")
///     .store(Arc::new(InMemoryStore::new()))
///     .mount();
/// ```
pub struct TableControllerBuilder<Config, Dispatch> {
    config: Config,
    dispatcher: Dispatch,
    api_location: String,
    store: Option<Arc<dyn StateStore>>,
}

impl TableControllerBuilder<Missing, Missing> {
    fn new() -> Self {
        Self {
            config: Missing,
            dispatcher: Missing,
            api_location: String::new(),
            store: None,
        }
    }
}

impl<D> TableControllerBuilder<Missing, D> {
    /// Sets the table configuration (required).
    pub fn config(self, config: TableConfiguration) -> TableControllerBuilder<Set<TableConfiguration>, D> {
        TableControllerBuilder {
            config: Set(config),
            dispatcher: self.dispatcher,
            api_location: self.api_location,
            store: self.store,
        }
    }
}

impl<C> TableControllerBuilder<C, Missing> {
    /// Sets the dispatcher fetches are handed to (required).
    pub fn dispatcher(
        self,
        dispatcher: impl Dispatcher + 'static,
    ) -> TableControllerBuilder<C, Set<Arc<dyn Dispatcher>>> {
        let dispatcher: Arc<dyn Dispatcher> = Arc::new(dispatcher);
        TableControllerBuilder {
            config: self.config,
            dispatcher: Set(dispatcher),
            api_location: self.api_location,
            store: self.store,
        }
    }
}

impl<C, D> TableControllerBuilder<C, D> {
    /// Sets the API location carried by every dispatched action.
    pub fn api_location(mut self, api_location: impl Into<String>) -> Self {
        self.api_location = api_location.into();
        self
    }

    /// Sets the state store used when the configuration enables persistence.
    pub fn store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl TableControllerBuilder<Set<TableConfiguration>, Set<Arc<dyn Dispatcher>>> {
    /// Mounts the controller and fires the first request.
    pub fn mount(self) -> TableController {
        TableController::mount(self.config.0, self.api_location, self.dispatcher.0, self.store)
    }
}
