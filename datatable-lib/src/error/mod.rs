//! Error types

mod config;
mod fetch;
mod transition;

pub use config::*;
pub use fetch::*;
pub use transition::*;
