//! Grid coordinate sampling
//!
//! Rooms are laid on a small square grid before they are wired together. The
//! grid is only used to pick plausible compass directions for exits.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Smallest grid side ever used
pub const MIN_SIDE: u32 = 3;

/// Rejected draws allowed per grid cell before the grid widens
const DRAWS_PER_CELL: usize = 8;

/// A room's position on the layout grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid side for `n` rooms: `max(3, ceil(sqrt(n * 1.2)))`.
///
/// Computed in integers as the smallest `s` with `5 * s^2 >= 6 * n`.
pub fn grid_side(n: usize) -> u32 {
    let mut side = MIN_SIDE;
    while 5 * (side as usize) * (side as usize) < 6 * n {
        side += 1;
    }
    side
}

/// Draw `n` distinct grid coordinates by rejection sampling.
///
/// Each grid width gets a bounded number of draws. When that runs out, or the
/// grid cannot hold `n` cells at all, the side grows by one and sampling
/// continues with the coordinates already kept.
pub fn sample_coords(rng: &mut GameRng, n: usize) -> Vec<GridCoord> {
    let mut side = grid_side(n);
    let mut coords = Vec::with_capacity(n);
    let mut taken = HashSet::with_capacity(n);

    while coords.len() < n {
        let cells = (side as usize) * (side as usize);
        if cells < n {
            side += 1;
            continue;
        }

        let mut budget = cells * DRAWS_PER_CELL;
        while coords.len() < n && budget > 0 {
            budget -= 1;
            let (x, y) = rng.random_coord(side);
            let coord = GridCoord::new(x as i32, y as i32);
            if taken.insert(coord) {
                coords.push(coord);
            }
        }

        if coords.len() < n {
            tracing::debug!(
                side,
                kept = coords.len(),
                n,
                "coordinate sampling stalled, widening grid"
            );
            side += 1;
        }
    }

    coords
}
