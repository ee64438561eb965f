//! Fetch request construction.
//!
//! [`RequestBuilder`] merges filter, sort, pagination and search state into a
//! [`FetchRequest`]. Requests are plain data with a stable field and filter
//! order, so two requests built from the same state serialize to identical
//! bytes and can be compared or used as cache keys.
//!
//! # Example
//!
//! ```
//! use datatable_lib::column::ColumnRegistry;
//! use datatable_lib::config::ColumnDeclaration;
//! use datatable_lib::filter::{FilterStateStore, FilterValue};
//! use datatable_lib::pagination::PaginationState;
//! use datatable_lib::request::RequestBuilder;
//! use datatable_lib::sort::SortState;
//!
//! let registry = ColumnRegistry::resolve(&[ColumnDeclaration::new("name", "Name")]).unwrap();
//! let mut filters = FilterStateStore::new(registry.columns());
//! filters.set_filter("name", FilterValue::text("Ted")).unwrap();
//!
//! let request = RequestBuilder::new(&PaginationState::initial(None))
//!     .filters(&filters)
//!     .sort(&SortState::unsorted())
//!     .build();
//!
//! assert_eq!(request.to_json().unwrap(), r#"{"page":1,"pageSize":10,"filters":{"name":"Ted"}}"#);
//! ```

mod query;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::filter::FilterStateStore;
use crate::filter::FilterValue;
use crate::pagination::PaginationState;
use crate::search::SearchState;
use crate::sort::Direction;
use crate::sort::SortState;

/// Normalized parameters for fetching one page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub page: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchParam>,
    /// Set filters only; unset filters are omitted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, FilterValue>,
}

impl FetchRequest {
    /// Serializes the request to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Sort parameter of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParam {
    pub column: String,
    pub direction: Direction,
}

/// Search parameter of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParam {
    pub term: String,
    /// Columns the term is matched against.
    pub columns: Vec<String>,
}

/// Builder for [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    pagination: &'a PaginationState,
    filters: Option<&'a FilterStateStore>,
    sort: Option<&'a SortState>,
    search: Option<&'a SearchState>,
}

impl<'a> RequestBuilder<'a> {
    /// Starts a request for the current page.
    pub fn new(pagination: &'a PaginationState) -> Self {
        Self {
            pagination,
            filters: None,
            sort: None,
            search: None,
        }
    }

    /// Includes the set filters.
    pub fn filters(mut self, filters: &'a FilterStateStore) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Includes the active sort.
    pub fn sort(mut self, sort: &'a SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Includes the search term. Tables without a search box pass `None`.
    pub fn search(mut self, search: Option<&'a SearchState>) -> Self {
        self.search = search;
        self
    }

    /// Builds the request.
    pub fn build(self) -> FetchRequest {
        let sort = self.sort.and_then(|sort| {
            Some(SortParam {
                column: sort.column()?.to_string(),
                direction: sort.direction(),
            })
        });

        let search = self.search.filter(|s| !s.is_empty()).map(|s| SearchParam {
            term: s.term().to_string(),
            columns: s.columns().to_vec(),
        });

        let filters = self
            .filters
            .map(|store| {
                store
                    .active_values()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        FetchRequest {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            sort,
            search,
            filters,
        }
    }
}
