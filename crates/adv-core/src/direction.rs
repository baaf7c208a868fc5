//! Exit directions
//!
//! Canonical direction codes, the alias table used to normalize free-form
//! direction strings, and the opposite pairing used to mirror exits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Canonical exit direction
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Direction {
    #[strum(serialize = "n")]
    #[serde(rename = "n")]
    North,
    #[strum(serialize = "s")]
    #[serde(rename = "s")]
    South,
    #[strum(serialize = "e")]
    #[serde(rename = "e")]
    East,
    #[strum(serialize = "w")]
    #[serde(rename = "w")]
    West,
    #[strum(serialize = "ne")]
    #[serde(rename = "ne")]
    NorthEast,
    #[strum(serialize = "nw")]
    #[serde(rename = "nw")]
    NorthWest,
    #[strum(serialize = "se")]
    #[serde(rename = "se")]
    SouthEast,
    #[strum(serialize = "sw")]
    #[serde(rename = "sw")]
    SouthWest,
    #[strum(serialize = "up")]
    #[serde(rename = "up")]
    Up,
    #[strum(serialize = "down")]
    #[serde(rename = "down")]
    Down,
    #[strum(serialize = "in")]
    #[serde(rename = "in")]
    In,
    #[strum(serialize = "out")]
    #[serde(rename = "out")]
    Out,
    #[strum(serialize = "enter")]
    #[serde(rename = "enter")]
    Enter,
    #[strum(serialize = "exit")]
    #[serde(rename = "exit")]
    Exit,
}

impl Direction {
    /// The direction an exit back should carry.
    ///
    /// `Enter` and `Exit` are one-way pairings: their mirrors are `Out` and
    /// `In`, whose own mirrors are `In` and `Out`.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
            Direction::Enter => Direction::Out,
            Direction::Exit => Direction::In,
        }
    }

    /// Short code as stored in exits
    pub fn code(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
            Direction::East => "e",
            Direction::West => "w",
            Direction::NorthEast => "ne",
            Direction::NorthWest => "nw",
            Direction::SouthEast => "se",
            Direction::SouthWest => "sw",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Enter => "enter",
            Direction::Exit => "exit",
        }
    }

    /// Parse an exact canonical code
    pub fn from_code(code: &str) -> Option<Direction> {
        code.parse().ok()
    }

    /// All canonical codes, in declaration order
    pub fn codes() -> impl Iterator<Item = &'static str> {
        Direction::iter().map(Direction::code)
    }
}

/// Long-form and abbreviated spellings mapped to canonical codes
const ALIASES: &[(&str, &str)] = &[
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("northeast", "ne"),
    ("north-east", "ne"),
    ("north east", "ne"),
    ("northwest", "nw"),
    ("north-west", "nw"),
    ("north west", "nw"),
    ("southeast", "se"),
    ("south-east", "se"),
    ("south east", "se"),
    ("southwest", "sw"),
    ("south-west", "sw"),
    ("south west", "sw"),
    ("u", "up"),
    ("d", "down"),
    ("inward", "in"),
    ("outward", "out"),
];

/// Normalize a direction string.
///
/// Trims and lowercases, then maps known aliases to their canonical code.
/// Anything else comes back in its trimmed lowercase form.
pub fn canon_dir(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(lowered)
}

/// Opposite code for a direction string, if it is a canonical code.
pub fn opposite_code(code: &str) -> Option<&'static str> {
    Direction::from_code(code).map(|d| d.opposite().code())
}
