//! Configuration error types

use crate::filter::FilterKind;

/// Errors detected while deriving state from a [`TableConfiguration`].
///
/// A configuration error is fatal to the table instance: the controller
/// renders a fixed failure view and never issues a fetch.
///
/// [`TableConfiguration`]: crate::config::TableConfiguration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// No table identifier was configured, or it was blank.
    #[error("Missing table identifier")]
    MissingTableId,

    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// A column's default value does not fit its filter kind.
    #[error("Default value of column '{key}' does not match its {kind} filter")]
    DefaultKindMismatch { key: String, kind: FilterKind },

    /// The API location cannot be turned into a request URL.
    #[error("Invalid API location '{location}': {message}")]
    InvalidApiLocation { location: String, message: String },

    /// The configuration document could not be parsed.
    #[error("Invalid table configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Creates a new default/kind mismatch error.
    pub fn default_kind_mismatch(key: impl Into<String>, kind: FilterKind) -> Self {
        Self::DefaultKindMismatch {
            key: key.into(),
            kind,
        }
    }

    /// Creates a new invalid API location error.
    pub fn invalid_api_location(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidApiLocation {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
