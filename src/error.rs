//! Error types for colony construction and configuration.

use thiserror::Error as ThisError;

/// Errors surfaced to the caller before any iteration runs.
///
/// Degenerate geometry (zero or non-finite distances) is never reported
/// here; it is absorbed by the tour evaluator so that every tour stays
/// comparable.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AbcError {
    /// A configuration parameter is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The location set is empty, so no tour can be formed.
    #[error("location set is empty")]
    EmptyLocations,
}

impl AbcError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AbcError>;
