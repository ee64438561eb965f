//! Pluggable renderers.

use std::sync::Arc;

/// Renders the pagination total from `(from, to, total)`.
///
/// Replaces the default "Showing X to Y of Z Results" text entirely.
pub type TotalRenderer = Arc<dyn Fn(usize, usize, usize) -> String + Send + Sync>;

/// Renders the failure view from a fetch error payload.
pub type ErrorRenderer = Arc<dyn Fn(&serde_json::Value) -> String + Send + Sync>;
