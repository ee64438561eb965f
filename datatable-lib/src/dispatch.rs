//! Dispatch boundary.
//!
//! The controller hands every fetch to an injected [`Dispatcher`] and returns
//! immediately; the embedding application performs the network call and
//! delivers the result back with
//! [`TableController::receive`](crate::controller::TableController::receive).

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::mpsc;
use url::Url;

use crate::error::ConfigError;
use crate::request::FetchRequest;

/// What a dispatched action asks the data layer to do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ActionKind {
    /// Fetch a page of rows for display.
    Page { sequence: u64 },
    /// Fetch every matching row of the exportable columns.
    Export { columns: Vec<String> },
}

/// A fetch handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchAction {
    pub table_id: String,
    pub api_location: String,
    pub kind: ActionKind,
    /// Set by an explicit refresh so the transport can bypass caches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    pub request: FetchRequest,
}

impl FetchAction {
    /// Returns the sequence number of a page fetch.
    pub fn sequence(&self) -> Option<u64> {
        match self.kind {
            ActionKind::Page { sequence } => Some(sequence),
            ActionKind::Export { .. } => None,
        }
    }

    /// Returns `true` for export actions.
    pub fn is_export(&self) -> bool {
        matches!(self.kind, ActionKind::Export { .. })
    }

    /// Builds a GET URL from the API location and the request's query pairs.
    ///
    /// The API location must be an absolute URL.
    pub fn url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.api_location)
            .map_err(|e| ConfigError::invalid_api_location(&self.api_location, e.to_string()))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("tableID", &self.table_id);
            query.extend_pairs(self.request.query_pairs());
            if let ActionKind::Export { columns } = &self.kind {
                query.append_pair("export", &columns.join(","));
            }
            if let Some(at) = self.refreshed_at {
                query.append_pair("refresh", &at.timestamp_millis().to_string());
            }
        }

        Ok(url)
    }
}

/// Receives fetch actions from a controller.
///
/// Implemented for any `Fn(FetchAction)` closure and for [`ChannelDispatcher`].
pub trait Dispatcher: Send + Sync {
    /// Hands off one action. Must not block.
    fn dispatch(&self, action: FetchAction);
}

impl<F> Dispatcher for F
where
    F: Fn(FetchAction) + Send + Sync,
{
    fn dispatch(&self, action: FetchAction) {
        self(action)
    }
}

/// A dispatcher that forwards actions over an unbounded tokio channel.
///
/// # Example
///
/// ```
/// use datatable_lib::dispatch::ChannelDispatcher;
///
/// let (dispatcher, mut actions) = ChannelDispatcher::new();
/// // Hand `dispatcher` to a controller, then drain `actions` in a task
/// // that performs the network calls.
/// assert!(actions.try_recv().is_err());
/// # drop(dispatcher);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<FetchAction>,
}

impl ChannelDispatcher {
    /// Creates a dispatcher and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FetchAction>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, action: FetchAction) {
        if let Err(err) = self.sender.send(action) {
            log::warn!(
                "[dispatch] Receiver dropped, discarding fetch for '{}'",
                err.0.table_id
            );
        }
    }
}
