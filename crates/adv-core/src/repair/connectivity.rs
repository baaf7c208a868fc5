//! Room connectivity tracking
//!
//! Equivalence classes over room positions: rooms in the same class are
//! reachable from each other when exits are read as undirected edges.

use crate::model::Adventure;

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class (rooms in same class are connected)
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    /// Build a tracker from an adventure's exits.
    ///
    /// Exits to unknown rooms are ignored.
    pub fn from_adventure(adv: &Adventure) -> Self {
        let index = adv.index();
        let mut tracker = Self::new(adv.rooms.len());
        for (from, room) in adv.rooms.iter().enumerate() {
            for exit in &room.exits {
                if let Some(&to) = index.get(exit.to.as_str()) {
                    tracker.merge(from, to);
                }
            }
        }
        tracker
    }

    /// Merge equivalence classes when rooms are connected
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }

        let old_class = self.classes[b];
        let new_class = self.classes[a];
        if old_class == new_class {
            return;
        }

        for class in &mut self.classes {
            if *class == old_class {
                *class = new_class;
            }
        }
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        match self.classes.first() {
            None => true,
            Some(&first) => self.classes.iter().all(|&c| c == first),
        }
    }

    /// Connected components as lists of room positions.
    ///
    /// Components are ordered by their lowest room position and each list is
    /// ascending, so the first entry is the earliest-created room.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut order: Vec<usize> = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (room, &class) in self.classes.iter().enumerate() {
            match order.iter().position(|&c| c == class) {
                Some(slot) => groups[slot].push(room),
                None => {
                    order.push(class);
                    groups.push(vec![room]);
                }
            }
        }
        groups
    }

    pub fn component_count(&self) -> usize {
        self.components().len()
    }
}

/// Number of connected components in an adventure's room graph
pub fn component_count(adv: &Adventure) -> usize {
    ConnectivityTracker::from_adventure(adv).component_count()
}

/// True when every room reaches every other room
pub fn is_connected(adv: &Adventure) -> bool {
    ConnectivityTracker::from_adventure(adv).all_connected()
}
