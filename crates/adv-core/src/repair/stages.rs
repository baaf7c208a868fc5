//! Individual repair stages
//!
//! Each stage mutates the adventure in place and returns how much it changed.
//! The pipeline in `mod.rs` runs them in a fixed order.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::direction::{Direction, canon_dir, opposite_code};
use crate::model::{Adventure, Exit};

use super::connectivity::ConnectivityTracker;

/// Rewrite every exit direction through the alias table.
///
/// Returns the number of exits whose direction string changed.
pub fn normalize_directions(adv: &mut Adventure) -> usize {
    let mut changed = 0;
    for exit in adv.rooms.iter_mut().flat_map(|r| r.exits.iter_mut()) {
        let canon = canon_dir(&exit.dir);
        if canon != exit.dir {
            exit.dir = canon;
            changed += 1;
        }
    }
    changed
}

/// Remove exits whose target room does not exist.
///
/// Returns the number of exits removed.
pub fn drop_invalid_targets(adv: &mut Adventure) -> usize {
    let valid: HashSet<String> = adv.rooms.iter().map(|r| r.id.clone()).collect();
    let mut dropped = 0;
    for room in &mut adv.rooms {
        let before = room.exits.len();
        room.exits.retain(|e| valid.contains(&e.to));
        dropped += before - room.exits.len();
    }
    dropped
}

/// Give every exit with a known opposite a matching exit back.
///
/// An exit `A --d--> B` is satisfied when `B` has an exit to `A` labeled with
/// the opposite of `d`. Exits added here are queued and checked in turn, which
/// matters for `enter`/`exit` whose mirrors do not mirror back. Only appends.
///
/// Returns the number of exits added.
pub fn ensure_bidirectional(adv: &mut Adventure) -> usize {
    let index: HashMap<String, usize> = adv
        .rooms
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.clone(), i))
        .collect();

    let mut queue: VecDeque<(usize, usize)> = adv
        .rooms
        .iter()
        .enumerate()
        .flat_map(|(ri, r)| (0..r.exits.len()).map(move |ei| (ri, ei)))
        .collect();

    let mut added = 0;
    while let Some((ri, ei)) = queue.pop_front() {
        let exit = &adv.rooms[ri].exits[ei];
        let Some(back_dir) = opposite_code(&exit.dir) else {
            continue;
        };
        let Some(&bi) = index.get(&exit.to) else {
            continue;
        };

        let from_id = adv.rooms[ri].id.clone();
        let back_room = &mut adv.rooms[bi];
        if back_room.has_exit(back_dir, &from_id) {
            continue;
        }

        back_room.exits.push(Exit::new(back_dir, from_id));
        queue.push_back((bi, back_room.exits.len() - 1));
        added += 1;
    }

    added
}

/// Join disconnected components into one.
///
/// Components are ordered by their earliest room; component `k` is linked to
/// component `k + 1` through their earliest rooms with an `e`/`w` pair.
///
/// Returns the number of corridors added.
pub fn ensure_connected(adv: &mut Adventure) -> usize {
    let components = ConnectivityTracker::from_adventure(adv).components();
    if components.len() <= 1 {
        return 0;
    }

    let east = Direction::East.code();
    let west = Direction::West.code();

    let mut corridors = 0;
    for pair in components.windows(2) {
        let a = pair[0][0];
        let b = pair[1][0];
        let a_id = adv.rooms[a].id.clone();
        let b_id = adv.rooms[b].id.clone();
        adv.rooms[a].exits.push(Exit::new(east, b_id));
        adv.rooms[b].exits.push(Exit::new(west, a_id));
        corridors += 1;
    }

    corridors
}

/// Result of the capping stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapOutcome {
    /// Rooms removed from the tail
    pub rooms_removed: usize,
    /// Exits removed because their target was capped away
    pub exits_dropped: usize,
    /// Start room had to move to the first kept room
    pub start_moved: bool,
}

/// Keep only the first `cap` rooms, then strip exits into removed rooms.
///
/// Rooms are kept by creation order only. This can split the kept rooms into
/// several components; the caller decides whether to reconnect.
pub fn cap_rooms(adv: &mut Adventure, cap: usize) -> CapOutcome {
    if adv.rooms.len() <= cap {
        return CapOutcome::default();
    }

    let rooms_removed = adv.rooms.len() - cap;
    adv.rooms.truncate(cap);
    let exits_dropped = drop_invalid_targets(adv);

    let mut start_moved = false;
    if !adv.contains_room(&adv.start_room) {
        if let Some(first) = adv.rooms.first() {
            adv.start_room = first.id.clone();
            start_moved = true;
        }
    }

    CapOutcome {
        rooms_removed,
        exits_dropped,
        start_moved,
    }
}
