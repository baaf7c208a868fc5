//! Location archetype catalog and room type assignment
//!
//! A catalog lists named archetypes with occurrence bounds. Assignment walks
//! the finished room graph and hands out archetypes in four passes:
//! 1. Hub archetype on the two best-connected rooms
//! 2. Chokepoint archetype on rooms with at most two exits
//! 3. Remaining minimums, in catalog order
//! 4. Random fill from archetypes that still have capacity

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AdventureError;
use crate::model::{Adventure, Room};
use crate::rng::GameRng;

/// Hub slugs, most preferred first
pub const HUB_SLUGS: &[&str] = &[
    "control_center",
    "server_core",
    "observation_dome",
    "command_deck",
    "central_hub",
];

/// Chokepoint slugs, most preferred first
pub const CHOKEPOINT_SLUGS: &[&str] = &[
    "airlock",
    "vacuum_corridor",
    "corridor",
    "decom_room",
    "pressure_tunnel",
];

/// Rooms with at most this many exits count as chokepoints
pub const CHOKEPOINT_MAX_DEGREE: usize = 2;

/// How many of the best-connected rooms may become hubs
const HUB_ROOMS: usize = 2;

fn default_max() -> usize {
    1
}

/// One kind of location rooms can be typed as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArchetype {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub min: usize,
    #[serde(default = "default_max")]
    pub max: usize,
}

impl LocationArchetype {
    pub fn new(slug: impl Into<String>, min: usize, max: usize) -> Self {
        Self {
            slug: slug.into(),
            name: None,
            tags: Vec::new(),
            min,
            max,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }
}

/// Set of archetypes available to a world
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCatalog {
    #[serde(default)]
    pub locations: Vec<LocationArchetype>,
}

impl LocationCatalog {
    pub fn new(locations: Vec<LocationArchetype>) -> Self {
        Self { locations }
    }

    /// Parse and check a catalog document
    pub fn from_json(json: &str) -> Result<Self, AdventureError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|e| AdventureError::InvalidCatalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Slugs must be unique and non-empty, and `min <= max`.
    pub fn validate(&self) -> Result<(), AdventureError> {
        let mut seen = HashSet::new();
        for loc in &self.locations {
            if loc.slug.is_empty() {
                return Err(AdventureError::InvalidCatalog("empty slug".to_string()));
            }
            if !seen.insert(loc.slug.as_str()) {
                return Err(AdventureError::InvalidCatalog(format!(
                    "duplicate slug {}",
                    loc.slug
                )));
            }
            if loc.min > loc.max {
                return Err(AdventureError::InvalidCatalog(format!(
                    "{}: min {} exceeds max {}",
                    loc.slug, loc.min, loc.max
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&LocationArchetype> {
        self.locations.iter().find(|l| l.slug == slug)
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// First archetype present from a preference list
    fn pick_by_slug(&self, candidates: &[&str]) -> Option<&LocationArchetype> {
        candidates.iter().find_map(|slug| self.get(slug))
    }
}

/// Per-slug usage counts during assignment
struct Usage<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> Usage<'a> {
    fn new(catalog: &'a LocationCatalog, rooms: &[Room]) -> Self {
        let mut counts: HashMap<&'a str, usize> =
            catalog.locations.iter().map(|l| (l.slug.as_str(), 0)).collect();
        for slug in rooms.iter().filter_map(|r| r.room_type.as_deref()) {
            if let Some(count) = counts.get_mut(slug) {
                *count += 1;
            }
        }
        Self { counts }
    }

    fn count(&self, slug: &str) -> usize {
        self.counts.get(slug).copied().unwrap_or(0)
    }

    fn has_capacity(&self, loc: &LocationArchetype) -> bool {
        self.count(&loc.slug) < loc.max
    }

    fn assign(&mut self, room: &mut Room, loc: &'a LocationArchetype) {
        room.room_type = Some(loc.slug.clone());
        room.tags = loc.tags.clone();
        *self.counts.entry(loc.slug.as_str()).or_insert(0) += 1;
    }
}

/// Assign a type and tags to untyped rooms from the catalog.
///
/// Degrees are read from the current exits, so this should run on a repaired
/// map. Rooms that already carry a type are left alone but count toward
/// their archetype's limits. Returns the number of rooms typed.
pub fn assign_room_types(
    adv: &mut Adventure,
    catalog: &LocationCatalog,
    rng: &mut GameRng,
) -> usize {
    if catalog.is_empty() {
        return 0;
    }

    let mut usage = Usage::new(catalog, &adv.rooms);
    let degree: Vec<usize> = adv.rooms.iter().map(Room::degree).collect();
    let mut typed = 0;

    // Hubs: best-connected rooms, ties kept in room order
    let mut by_degree: Vec<usize> = (0..adv.rooms.len()).collect();
    by_degree.sort_by(|&a, &b| degree[b].cmp(&degree[a]));
    if let Some(hub) = catalog.pick_by_slug(HUB_SLUGS) {
        for &i in by_degree.iter().take(HUB_ROOMS) {
            let room = &mut adv.rooms[i];
            if room.room_type.is_none() && usage.has_capacity(hub) {
                usage.assign(room, hub);
                typed += 1;
            }
        }
    }

    if let Some(choke) = catalog.pick_by_slug(CHOKEPOINT_SLUGS) {
        for (i, room) in adv.rooms.iter_mut().enumerate() {
            if room.room_type.is_none()
                && degree[i] <= CHOKEPOINT_MAX_DEGREE
                && usage.has_capacity(choke)
            {
                usage.assign(room, choke);
                typed += 1;
            }
        }
    }

    // Minimums, in catalog order, onto the earliest untyped rooms
    let mut untyped = adv
        .rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.room_type.is_none())
        .map(|(i, _)| i)
        .collect::<Vec<_>>()
        .into_iter();
    'minimums: for loc in &catalog.locations {
        while usage.count(&loc.slug) < loc.min {
            let Some(i) = untyped.next() else {
                break 'minimums;
            };
            usage.assign(&mut adv.rooms[i], loc);
            typed += 1;
        }
    }

    // Random fill from whatever still has room
    let mut pool: Vec<&LocationArchetype> =
        catalog.locations.iter().filter(|l| l.max > 0).collect();
    for i in untyped {
        if pool.is_empty() {
            break;
        }
        rng.shuffle(&mut pool);
        let Some(choice) = pool.iter().copied().find(|l| usage.has_capacity(l)) else {
            break;
        };
        usage.assign(&mut adv.rooms[i], choice);
        typed += 1;
    }

    tracing::debug!(typed, rooms = adv.rooms.len(), "assigned room types");
    typed
}

/// Reject rooms whose type is not an archetype in `catalog`.
pub fn check_room_types(adv: &Adventure, catalog: &LocationCatalog) -> Result<(), AdventureError> {
    for room in &adv.rooms {
        if let Some(slug) = &room.room_type {
            if catalog.get(slug).is_none() {
                return Err(AdventureError::UnknownArchetype {
                    room: room.id.clone(),
                    slug: slug.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exit;

    /// Star: R1 in the middle with five spokes, R2 also linked to R3
    fn star() -> Adventure {
        let mut rooms: Vec<Room> = (1..=6).map(|i| Room::placeholder(format!("R{i}"))).collect();
        for i in 2..=6 {
            rooms[0].exits.push(Exit::new("n", format!("R{i}")));
            rooms[i - 1].exits.push(Exit::new("s", "R1"));
        }
        rooms[1].exits.push(Exit::new("e", "R3"));
        rooms[2].exits.push(Exit::new("w", "R2"));
        Adventure::new("t", 0, rooms, "R1")
    }

    fn catalog() -> LocationCatalog {
        LocationCatalog::new(vec![
            LocationArchetype::new("control_center", 0, 1).with_tags(&["hub"]),
            LocationArchetype::new("airlock", 0, 2).with_tags(&["hazard"]),
            LocationArchetype::new("lab", 1, 3),
            LocationArchetype::new("storage", 0, 5),
        ])
    }

    #[test]
    fn test_hub_goes_to_highest_degree() {
        let mut adv = star();
        let mut rng = GameRng::new(1);
        assign_room_types(&mut adv, &catalog(), &mut rng);
        assert_eq!(adv.rooms[0].room_type.as_deref(), Some("control_center"));
        assert_eq!(adv.rooms[0].tags, vec!["hub".to_string()]);
    }

    #[test]
    fn test_chokepoints_respect_max() {
        let mut adv = star();
        let mut rng = GameRng::new(1);
        assign_room_types(&mut adv, &catalog(), &mut rng);
        let airlocks: Vec<&str> = adv
            .rooms
            .iter()
            .filter(|r| r.room_type.as_deref() == Some("airlock"))
            .map(|r| r.id.as_str())
            .collect();
        // R2 is untyped with degree 2 and comes first among chokepoints
        assert_eq!(airlocks.len(), 2);
        assert!(airlocks.contains(&"R2"));
    }

    #[test]
    fn test_every_room_typed_and_limits_hold() {
        let mut adv = star();
        let mut rng = GameRng::new(99);
        let cat = catalog();
        let typed = assign_room_types(&mut adv, &cat, &mut rng);
        assert_eq!(typed, 6);

        for loc in &cat.locations {
            let count = adv
                .rooms
                .iter()
                .filter(|r| r.room_type.as_deref() == Some(loc.slug.as_str()))
                .count();
            assert!(count <= loc.max, "{} used {} times", loc.slug, count);
            assert!(count >= loc.min, "{} used {} times", loc.slug, count);
        }
        assert!(check_room_types(&adv, &cat).is_ok());
    }

    #[test]
    fn test_existing_types_are_kept() {
        let mut adv = star();
        adv.rooms[0].room_type = Some("storage".to_string());
        let mut rng = GameRng::new(3);
        assign_room_types(&mut adv, &catalog(), &mut rng);
        assert_eq!(adv.rooms[0].room_type.as_deref(), Some("storage"));
    }

    #[test]
    fn test_runs_out_of_capacity() {
        let mut adv = star();
        let cat = LocationCatalog::new(vec![LocationArchetype::new("lab", 0, 2)]);
        let mut rng = GameRng::new(3);
        assert_eq!(assign_room_types(&mut adv, &cat, &mut rng), 2);
        assert_eq!(adv.rooms.iter().filter(|r| r.room_type.is_none()).count(), 4);
    }

    #[test]
    fn test_empty_catalog_is_noop() {
        let mut adv = star();
        let mut rng = GameRng::new(3);
        assert_eq!(assign_room_types(&mut adv, &LocationCatalog::default(), &mut rng), 0);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{"locations":[
            {"slug":"airlock","tags":["hazard"],"min":1,"max":2},
            {"slug":"lab"}
        ]}"#;
        let cat = LocationCatalog::from_json(json).unwrap();
        assert_eq!(cat.locations.len(), 2);
        assert_eq!(cat.get("lab").map(|l| (l.min, l.max)), Some((0, 1)));
    }

    #[test]
    fn test_catalog_rejects_bad_bounds() {
        let json = r#"{"locations":[{"slug":"lab","min":3,"max":1}]}"#;
        assert!(matches!(
            LocationCatalog::from_json(json),
            Err(AdventureError::InvalidCatalog(_))
        ));
        let json = r#"{"locations":[{"slug":"lab"},{"slug":"lab"}]}"#;
        assert!(LocationCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_check_room_types_rejects_unknown() {
        let mut adv = star();
        adv.rooms[3].room_type = Some("ballroom".to_string());
        assert_eq!(
            check_room_types(&adv, &catalog()),
            Err(AdventureError::UnknownArchetype {
                room: "R4".to_string(),
                slug: "ballroom".to_string(),
            })
        );
    }
}
