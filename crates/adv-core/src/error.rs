//! Error types for adventure construction and validation

use thiserror::Error;

/// Errors surfaced to callers of the core.
///
/// Structural defects in a freshly generated map are never reported here; the
/// repair pipeline owns those. These cover user-supplied documents, catalogs
/// and configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdventureError {
    #[error("Duplicate room id: {0}")]
    DuplicateRoomId(String),

    #[error("Start room {0} does not exist")]
    MissingStartRoom(String),

    #[error("Room {room} has an exit with unknown direction {dir:?}")]
    UnknownDirection { room: String, dir: String },

    #[error("Unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion { expected: u32, found: u32 },

    #[error("Room count {requested} outside {min}..={max}")]
    RoomCountOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("Room cap must be at least 1")]
    InvalidCap,

    #[error("Room {room} has type {slug} which is not in the catalog")]
    UnknownArchetype { room: String, slug: String },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}
