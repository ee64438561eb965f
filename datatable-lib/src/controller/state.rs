//! Sub-states owned by a mounted controller.

use crate::column::ColumnRegistry;
use crate::config::TableConfiguration;
use crate::error::ConfigError;
use crate::filter::FilterStateStore;
use crate::pagination::PaginationState;
use crate::persist::PersistedState;
use crate::request::FetchRequest;
use crate::request::RequestBuilder;
use crate::search::SearchState;
use crate::sort::SortState;

/// Everything derived from a valid configuration.
#[derive(Debug, Clone)]
pub(super) struct TableState {
    pub table_id: String,
    pub registry: ColumnRegistry,
    pub filters: FilterStateStore,
    pub sort: SortState,
    pub pagination: PaginationState,
    pub search: Option<SearchState>,
}

impl TableState {
    /// Derives fresh state from a configuration.
    pub fn derive(config: &TableConfiguration) -> Result<Self, ConfigError> {
        let table_id = config.table_id()?.to_string();
        let registry = ColumnRegistry::resolve(&config.columns)?;

        Ok(Self {
            table_id,
            filters: FilterStateStore::new(registry.columns()),
            sort: SortState::initial(config.default_sort.as_ref(), &registry),
            pagination: PaginationState::initial(config.page_size),
            search: SearchState::for_registry(&registry, config.default_search.as_deref()),
            registry,
        })
    }

    /// Carries user-entered state over into state derived from a new
    /// configuration of the same table.
    ///
    /// Filters, sort and search term still at the previous configuration's
    /// defaults take the new defaults. A page size change in the
    /// configuration overrides the current page size and returns to page 1.
    pub fn carry_over(
        self,
        mut fresh: TableState,
        config: &TableConfiguration,
        previous: &TableConfiguration,
    ) -> TableState {
        let mut filters = self.filters;
        filters.reconcile(fresh.registry.columns());
        fresh.filters = filters;

        let previous_sort = SortState::initial(previous.default_sort.as_ref(), &self.registry);
        let mut sort = self.sort;
        sort.reconcile(&previous_sort, fresh.sort.clone(), &fresh.registry);
        fresh.sort = sort;

        let configured_size = fresh.pagination.page_size();
        fresh.pagination = self.pagination;
        if config.page_size != previous.page_size {
            // Derived sizes are always positive.
            let _ = fresh.pagination.set_page_size(configured_size);
        }

        let previous_term = previous.default_search.as_deref().unwrap_or_default();
        if let (Some(search), Some(entered)) = (fresh.search.as_mut(), self.search) {
            if entered.term() != previous_term {
                search.set_term(entered.term());
            }
        }

        fresh
    }

    /// Applies persisted state, skipping anything that no longer fits.
    pub fn restore(&mut self, persisted: PersistedState) {
        self.filters.restore(persisted.filters);
        self.sort.restore(persisted.sort, &self.registry);
        self.pagination.restore(persisted.page, persisted.page_size);
        if let (Some(search), Some(term)) = (self.search.as_mut(), persisted.search) {
            search.set_term(term);
        }
    }

    /// Returns the serializable part of the state.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            filters: self.filters.current_values().clone(),
            sort: self.sort.clone(),
            page: Some(self.pagination.page()),
            page_size: Some(self.pagination.page_size()),
            search: self.search.as_ref().map(|s| s.term().to_string()),
        }
    }

    /// Builds the request for the current state.
    pub fn request(&self) -> FetchRequest {
        RequestBuilder::new(&self.pagination)
            .filters(&self.filters)
            .sort(&self.sort)
            .search(self.search.as_ref())
            .build()
    }
}
