//! Data table state controller
//!
//! Derives filter, sort, pagination and search state from a declarative table
//! configuration, and builds the requests needed to fetch each page of rows
//! from a remote data source.

pub mod column;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pagination;
pub mod persist;
pub mod request;
pub mod search;
pub mod sort;

pub use config::TableConfiguration;
pub use controller::TableController;
pub use controller::TableStatus;
pub use controller::TableViewModel;
