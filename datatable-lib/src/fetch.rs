//! Fetch results published by the data layer.

use serde::Deserialize;
use serde::Serialize;

use crate::dispatch::FetchAction;
use crate::error::FetchError;

/// One row of table data, keyed by field name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The data layer's latest state for one table.
///
/// `fetched` stays `false` until the first response arrives, `fetching` is
/// `true` while a request is in flight, and `error` is only set for the most
/// recent failed request.
///
/// # Example
///
/// ```
/// use datatable_lib::fetch::FetchResult;
///
/// let result: FetchResult = serde_json::from_str(r#"{
///     "data": [{ "request_id": 1 }],
///     "dataTotalSize": 119,
///     "error": null,
///     "fetched": true,
///     "fetching": false
/// }"#).unwrap();
///
/// assert_eq!(result.data_total_size, 119);
/// assert!(!result.is_failed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchResult {
    pub data: Vec<Row>,
    pub data_total_size: usize,
    pub error: Option<FetchError>,
    pub fetched: bool,
    pub fetching: bool,
}

impl FetchResult {
    /// Creates a successful result.
    pub fn success(data: Vec<Row>, data_total_size: usize) -> Self {
        Self {
            data,
            data_total_size,
            error: None,
            fetched: true,
            fetching: false,
        }
    }

    /// Creates a failed result carrying the error payload.
    pub fn failure(payload: impl Into<serde_json::Value>) -> Self {
        Self {
            error: Some(FetchError::new(payload)),
            fetched: true,
            ..Self::default()
        }
    }

    /// Returns `true` if the most recent request failed.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// A [`FetchResult`] delivered back to the controller.
///
/// `sequence` is the sequence number of the request being answered. Results
/// published without one are treated as answering the latest request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub table_id: String,
    pub sequence: Option<u64>,
    pub result: FetchResult,
}

impl FetchResponse {
    /// Creates a response to a specific request.
    pub fn new(table_id: impl Into<String>, sequence: u64, result: FetchResult) -> Self {
        Self {
            table_id: table_id.into(),
            sequence: Some(sequence),
            result,
        }
    }

    /// Creates a response that is not correlated to a request.
    pub fn published(table_id: impl Into<String>, result: FetchResult) -> Self {
        Self {
            table_id: table_id.into(),
            sequence: None,
            result,
        }
    }

    /// Creates the response to a dispatched action.
    pub fn for_action(action: &FetchAction, result: FetchResult) -> Self {
        Self {
            table_id: action.table_id.clone(),
            sequence: action.sequence(),
            result,
        }
    }
}
