//! Error types for dungeon generation

use thiserror::Error;

/// Errors raised by generation operations
///
/// Shortfalls (fewer rooms than requested, no path between two points) are
/// reported through return values, never through this type.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Invalid side '{0}': expected one of top, bottom, left, right")]
    InvalidSide(String),

    #[error("Room is a dead end and has no exit")]
    DeadEnd,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Room of {width}x{height} is too small for an interior (minimum 3x3)")]
    RoomTooSmall { width: i32, height: i32 },

    #[error("Entry point ({x}, {y}) lies outside the room")]
    EntryOutOfBounds { x: i32, y: i32 },

    #[error("Could not parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl GenError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        GenError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Result alias for generation operations
pub type Result<T> = std::result::Result<T, GenError>;
