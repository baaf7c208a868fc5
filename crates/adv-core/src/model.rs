//! Adventure data model
//!
//! Rooms, their exits and the adventure aggregate that owns them. Generation,
//! enrichment and repair all read and write these shapes directly.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::AdventureError;

/// Current snapshot schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Placeholder description given to freshly generated rooms
pub const PLACEHOLDER_DESCRIPTION: &str = "(to be written)";

/// A directed exit from one room to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exit {
    /// Direction code. Canonical after repair; may hold free-form text before.
    pub dir: String,
    /// Destination room id
    pub to: String,
}

impl Exit {
    pub fn new(dir: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            to: to.into(),
        }
    }

    /// Parsed direction, if the code is canonical
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_code(&self.dir)
    }
}

/// A single location in the adventure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exits: Vec<Exit>,
    /// Archetype slug from a location catalog
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: Vec::new(),
            room_type: None,
            tags: Vec::new(),
        }
    }

    /// Room with generated placeholder text
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = format!("Room {}", id);
        Self::new(id, name, PLACEHOLDER_DESCRIPTION)
    }

    /// Number of exits, counting duplicates
    pub fn degree(&self) -> usize {
        self.exits.len()
    }

    /// First exit matching a canonical direction code
    pub fn exit_towards(&self, dir: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.dir == dir)
    }

    /// Does this room have an exit to `target` labeled `dir`?
    pub fn has_exit(&self, dir: &str, target: &str) -> bool {
        self.exits.iter().any(|e| e.dir == dir && e.to == target)
    }

    /// Sorted, deduplicated direction codes of this room's exits
    pub fn exit_directions(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self.exits.iter().map(|e| e.dir.as_str()).collect();
        dirs.sort_unstable();
        dirs.dedup();
        dirs
    }
}

/// The whole generated world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Adventure {
    pub schema_version: u32,
    pub title: String,
    /// Seed the topology was generated from
    pub seed: u64,
    /// Rooms in creation order. Capping keeps a prefix of this list.
    pub rooms: Vec<Room>,
    pub start_room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_guide: Option<Vec<String>>,
}

impl Adventure {
    pub fn new(
        title: impl Into<String>,
        seed: u64,
        rooms: Vec<Room>,
        start_room: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            title: title.into(),
            seed,
            rooms,
            start_room: start_room.into(),
            lore: None,
            style_guide: None,
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn contains_room(&self, id: &str) -> bool {
        self.rooms.iter().any(|r| r.id == id)
    }

    /// Map from room id to its position in `rooms`
    pub fn index(&self) -> HashMap<&str, usize> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect()
    }

    pub fn room_ids(&self) -> HashSet<&str> {
        self.rooms.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn exit_count(&self) -> usize {
        self.rooms.iter().map(Room::degree).sum()
    }

    /// Types of the rooms reachable in one step from `id`, in exit order.
    pub fn neighbour_types(&self, id: &str) -> Vec<String> {
        let Some(room) = self.room(id) else {
            return Vec::new();
        };
        room.exits
            .iter()
            .filter_map(|e| self.room(&e.to))
            .filter_map(|r| r.room_type.clone())
            .collect()
    }

    /// Check a document before it is accepted from outside.
    ///
    /// Rejects duplicate ids, a dangling start room, non-canonical exit
    /// directions and unknown schema versions. Dangling exit targets and
    /// missing reverse exits are left for the repair pipeline.
    pub fn validate(&self) -> Result<(), AdventureError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(AdventureError::UnsupportedSchemaVersion {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }

        let mut seen = HashSet::new();
        for room in &self.rooms {
            if !seen.insert(room.id.as_str()) {
                return Err(AdventureError::DuplicateRoomId(room.id.clone()));
            }
        }

        if !seen.contains(self.start_room.as_str()) {
            return Err(AdventureError::MissingStartRoom(self.start_room.clone()));
        }

        for room in &self.rooms {
            if let Some(bad) = room.exits.iter().find(|e| e.direction().is_none()) {
                return Err(AdventureError::UnknownDirection {
                    room: room.id.clone(),
                    dir: bad.dir.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> Adventure {
        let mut a = Room::new("A", "Hall", "A hall.");
        a.exits.push(Exit::new("n", "B"));
        let b = Room::new("B", "Vault", "A vault.");
        Adventure::new("Test", 1, vec![a, b], "A")
    }

    #[test]
    fn test_placeholder_room() {
        let room = Room::placeholder("R3");
        assert_eq!(room.name, "Room R3");
        assert_eq!(room.description, PLACEHOLDER_DESCRIPTION);
        assert!(room.exits.is_empty());
        assert!(room.room_type.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(two_rooms().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let mut adv = two_rooms();
        adv.rooms.push(Room::new("A", "Copy", "Again."));
        assert_eq!(
            adv.validate(),
            Err(AdventureError::DuplicateRoomId("A".to_string()))
        );
    }

    #[test]
    fn test_validate_missing_start() {
        let mut adv = two_rooms();
        adv.start_room = "Z".to_string();
        assert_eq!(
            adv.validate(),
            Err(AdventureError::MissingStartRoom("Z".to_string()))
        );
    }

    #[test]
    fn test_validate_unknown_direction() {
        let mut adv = two_rooms();
        adv.rooms[1].exits.push(Exit::new("north", "A"));
        assert!(matches!(
            adv.validate(),
            Err(AdventureError::UnknownDirection { .. })
        ));
    }

    #[test]
    fn test_validate_schema_version() {
        let mut adv = two_rooms();
        adv.schema_version = 7;
        assert!(matches!(
            adv.validate(),
            Err(AdventureError::UnsupportedSchemaVersion { found: 7, .. })
        ));
    }

    #[test]
    fn test_validate_allows_dangling_exit() {
        let mut adv = two_rooms();
        adv.rooms[0].exits.push(Exit::new("e", "nowhere"));
        assert!(adv.validate().is_ok());
    }

    #[test]
    fn test_exit_directions_sorted_unique() {
        let mut room = Room::placeholder("R1");
        room.exits.push(Exit::new("w", "R2"));
        room.exits.push(Exit::new("e", "R3"));
        room.exits.push(Exit::new("e", "R4"));
        assert_eq!(room.exit_directions(), vec!["e", "w"]);
        assert_eq!(room.degree(), 3);
        assert_eq!(room.exit_towards("e").map(|e| e.to.as_str()), Some("R3"));
    }

    #[test]
    fn test_neighbour_types() {
        let mut adv = two_rooms();
        adv.rooms[1].room_type = Some("airlock".to_string());
        assert_eq!(adv.neighbour_types("A"), vec!["airlock".to_string()]);
        assert!(adv.neighbour_types("B").is_empty());
        assert!(adv.neighbour_types("missing").is_empty());
    }

    #[test]
    fn test_type_field_name() {
        let mut room = Room::placeholder("R1");
        room.room_type = Some("corridor".to_string());
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["type"], "corridor");
        assert!(json.get("room_type").is_none());
    }

    #[test]
    fn test_room_json_is_byte_stable() {
        let json = r#"{"id":"A","name":"Hall","description":"","exits":[]}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&room).unwrap(), json);

        let tagged =
            r#"{"id":"A","name":"H","description":"","exits":[],"type":"airlock","tags":["x"]}"#;
        let room: Room = serde_json::from_str(tagged).unwrap();
        assert_eq!(serde_json::to_string(&room).unwrap(), tagged);
    }

    #[test]
    fn test_required_fields() {
        let no_exits = r#"{"id":"A","name":"Hall","description":""}"#;
        assert!(serde_json::from_str::<Room>(no_exits).is_err());

        let no_version = r#"{"title":"t","seed":0,"rooms":[],"start_room":""}"#;
        assert!(serde_json::from_str::<Adventure>(no_version).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"id":"A","name":"A","description":"","exits":[],"tags":[],"colour":"red"}"#;
        assert!(serde_json::from_str::<Room>(json).is_err());
    }
}
