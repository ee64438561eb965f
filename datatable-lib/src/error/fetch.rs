//! Fetch error types

use serde::Deserialize;
use serde::Serialize;

/// A failure reported by the remote data source.
///
/// Fetch errors are data, not exceptions: they travel inside
/// [`FetchResult::error`](crate::fetch::FetchResult::error) and are rendered
/// by the controller's error view. The payload is kept exactly as the data
/// layer published it so a custom error renderer can inspect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("Fetch failed: {payload}")]
pub struct FetchError {
    payload: serde_json::Value,
}

impl FetchError {
    /// Creates a new fetch error from a raw payload.
    pub fn new(payload: impl Into<serde_json::Value>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Returns the raw error payload.
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Returns the payload's `message` field, if it has one.
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(|m| m.as_str())
    }
}
