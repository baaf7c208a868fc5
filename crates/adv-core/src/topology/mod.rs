//! Topology generation
//!
//! Samples grid positions for the rooms, then wires them into a connected
//! graph with a few loops and one compass exit per edge.

mod builder;
mod sampler;

pub use builder::{
    Edge, Topology, add_loops, build_topology, edge_rng, grid_dirs, loop_target, make_adventure,
    room_id, spanning_tree,
};
pub use sampler::{GridCoord, MIN_SIDE, grid_side, sample_coords};
