//! Error type for the MoodTickler core.

use thiserror::Error;
use tumble::WorldConfigError;

/// Errors surfaced by configuration, parsing and history persistence.
///
/// Stepping, rolling and resetting the die never fail; only construction and
/// I/O-shaped operations return this type.
#[derive(Debug, Error)]
pub enum MoodError {
    /// A label that is not in the mood catalog.
    #[error("unknown mood `{0}`")]
    UnknownMood(String),

    /// A resolver parameter is out of range.
    #[error("invalid resolver config: {0}")]
    InvalidConfig(String),

    /// The physics world rejected its configuration.
    #[error("invalid physics config: {0}")]
    World(#[from] WorldConfigError),

    /// History or config JSON could not be read or written.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
