//! adv-core: procedural room maps for text adventures
//!
//! Generates a room graph from a seed, repairs it into a structurally valid
//! map and provides the glue around it: archetype assignment, room text
//! enrichment and a small explorer for walking the result.
//!
//! The crate does no I/O; snapshots live in `adv-save`.

pub mod catalog;
pub mod direction;
pub mod enrich;
pub mod explore;
pub mod repair;
pub mod topology;

mod config;
mod error;
mod generate;
mod model;
mod rng;

pub use config::{
    DEFAULT_ROOMS, DEFAULT_THEME, DEFAULT_TITLE, GenerationConfig, MAX_ROOMS, MIN_ROOMS,
};
pub use direction::{Direction, canon_dir};
pub use error::AdventureError;
pub use generate::{Generated, generate_adventure};
pub use model::{Adventure, Exit, PLACEHOLDER_DESCRIPTION, Room, SCHEMA_VERSION};
pub use repair::{DEFAULT_ROOM_CAP, RepairOptions, RepairReport, revalidate, validate_and_fix};
pub use rng::{GameRng, new_seed};
