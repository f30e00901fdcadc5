//! Error types for the service facade

use thiserror::Error;

/// Errors a caller can see from the three operations.
///
/// Aggregation and parsing are total and never appear here; only invalid
/// configuration, a missing selection, and provider failures surface.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or invalid settings; the message names the offending field
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation requires a selected passage and none was supplied
    #[error("selected_text is required for this operation")]
    EmptySelection,

    /// The model provider failed; its message is attached, opaque,
    /// and was not retried
    #[error("Provider error: {0}")]
    Provider(String),
}
