//! Room graph construction
//!
//! Builds the raw room graph in three passes:
//! 1. Random-attachment spanning tree over the sampled nodes
//! 2. A few extra edges so the map has loops
//! 3. One compass direction per edge, taken from the grid positions
//!
//! Only the forward exit of each edge is created here. Reverse exits are added
//! by the repair pipeline.

use std::collections::HashSet;

use crate::direction::Direction;
use crate::model::{Adventure, Exit, Room};
use crate::rng::GameRng;

use super::sampler::{GridCoord, sample_coords};

/// Undirected edge between two node indices, recorded as drawn
pub type Edge = (usize, usize);

/// Output of the topology builder
#[derive(Debug, Clone)]
pub struct Topology {
    /// Rooms `R1..Rn` in creation order
    pub rooms: Vec<Room>,
    /// Always the first room created
    pub start_room: String,
    /// Grid position of each room, parallel to `rooms`
    pub coords: Vec<GridCoord>,
    /// Tree edges followed by loop edges
    pub edges: Vec<Edge>,
}

/// Room id for the node at `index`
pub fn room_id(index: usize) -> String {
    format!("R{}", index + 1)
}

/// Grow a random-attachment spanning tree.
///
/// The node order is shuffled and its head becomes the root. Each step joins a
/// random visited node to a random unvisited node (unvisited nodes are drawn in
/// creation order). Early nodes end up with higher degree.
pub fn spanning_tree(rng: &mut GameRng, n: usize) -> Vec<Edge> {
    if n == 0 {
        return Vec::new();
    }

    let mut nodes: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut nodes);

    let mut in_tree = vec![false; n];
    let mut visited = vec![nodes[0]];
    in_tree[nodes[0]] = true;

    let mut edges = Vec::with_capacity(n - 1);
    while visited.len() < n {
        let a = visited[rng.index(visited.len())];
        let unvisited: Vec<usize> = (0..n).filter(|&i| !in_tree[i]).collect();
        let Some(&b) = rng.choose(&unvisited) else {
            break;
        };
        edges.push((a, b));
        in_tree[b] = true;
        visited.push(b);
    }

    edges
}

/// Number of loop edges to add for `n` rooms
pub fn loop_target(n: usize) -> usize {
    (n / 6).max(1)
}

/// Add up to `loop_target(n)` edges that duplicate no existing edge.
///
/// Stops early once the graph is complete or after a bounded number of draws.
/// Returns how many edges were added.
pub fn add_loops(rng: &mut GameRng, n: usize, edges: &mut Vec<Edge>) -> usize {
    if n < 2 {
        return 0;
    }

    let mut known: HashSet<Edge> = edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
    let complete = n * (n - 1) / 2;
    let target = loop_target(n);
    let nodes: Vec<usize> = (0..n).collect();

    let mut added = 0;
    let mut attempts = target * 32;
    while added < target && known.len() < complete && attempts > 0 {
        attempts -= 1;
        let pair = rng.sample(&nodes, 2);
        let (a, b) = (*pair[0], *pair[1]);
        if known.insert((a.min(b), a.max(b))) {
            edges.push((a, b));
            added += 1;
        }
    }

    added
}

/// Compass directions consistent with moving from `from` to `to`.
///
/// Screen coordinates: `y` grows southward. Identical positions give `[e]`.
pub fn grid_dirs(from: GridCoord, to: GridCoord) -> Vec<Direction> {
    let mut dirs = Vec::with_capacity(2);
    if to.y < from.y {
        dirs.push(Direction::North);
    }
    if to.y > from.y {
        dirs.push(Direction::South);
    }
    if to.x > from.x {
        dirs.push(Direction::East);
    }
    if to.x < from.x {
        dirs.push(Direction::West);
    }
    if dirs.is_empty() {
        dirs.push(Direction::East);
    }
    dirs
}

/// RNG for the direction choice on one edge.
///
/// Keyed by the base seed and the sorted endpoint ids, so the choice depends on
/// the edge itself and not on the order edges are visited.
pub fn edge_rng(seed: u64, a: &str, b: &str) -> GameRng {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut key = Vec::with_capacity(lo.len() + hi.len() + 1);
    key.extend_from_slice(lo.as_bytes());
    key.push(0);
    key.extend_from_slice(hi.as_bytes());
    GameRng::derive(seed, &key)
}

/// Build the raw room graph for `n` rooms.
pub fn build_topology(seed: u64, n: usize) -> Topology {
    let mut rng = GameRng::new(seed);

    let coords = sample_coords(&mut rng, n);
    let mut rooms: Vec<Room> = (0..n).map(|i| Room::placeholder(room_id(i))).collect();

    let mut edges = spanning_tree(&mut rng, n);
    let tree_edges = edges.len();
    let loops = add_loops(&mut rng, n, &mut edges);

    for &(a, b) in &edges {
        let dirs = grid_dirs(coords[a], coords[b]);
        let mut pick = edge_rng(seed, &rooms[a].id, &rooms[b].id);
        let dir = pick.choose(&dirs).copied().unwrap_or(Direction::East);
        let target = rooms[b].id.clone();
        rooms[a].exits.push(Exit::new(dir.code(), target));
    }

    tracing::debug!(seed, n, tree_edges, loops, "built topology");

    let start_room = rooms.first().map(|r| r.id.clone()).unwrap_or_default();
    Topology {
        rooms,
        start_room,
        coords,
        edges,
    }
}

/// Generate an unrepaired adventure with placeholder text.
pub fn make_adventure(title: &str, seed: u64, n: usize) -> Adventure {
    let topology = build_topology(seed, n);
    Adventure::new(title, seed, topology.rooms, topology.start_room)
}
