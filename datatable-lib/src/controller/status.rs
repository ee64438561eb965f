//! Controller lifecycle states.

use crate::error::ConfigError;

/// Where the controller is in its fetch lifecycle.
///
/// ```text
/// Uninitialized (terminal)
/// Loading ──success──▶ Ready
///    ▲  └──failure──▶ Error ◀──failure── Ready
///    └─────next request─────┘
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    /// The configuration is invalid. Nothing is ever fetched.
    Uninitialized { reason: ConfigError },
    /// Waiting for the first response, or for the response after a failure.
    Loading,
    /// Rows from a successful response are available.
    Ready,
    /// The most recent response was a failure.
    Error,
}

impl TableStatus {
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, TableStatus::Uninitialized { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TableStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TableStatus::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TableStatus::Error)
    }
}
