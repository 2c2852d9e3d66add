//! A* pathfinding on hexagonal grids.
//!
//! The search is built from three layers:
//!
//! - [`PriorityQueue`]: an indexed binary min-heap whose nodes remember
//!   their heap position, giving O(1) membership tests and in-place
//!   decrease-key.
//! - [`SearchNode`] / [`SearchGraph`]: per-hex search records keyed by
//!   coordinate, relaxed in place when a cheaper route turns up. Ties on
//!   cost favour fewer turns, then discovery order, so results are
//!   reproducible.
//! - [`PathFinder`]: the A* state machine, driven step by step or run to
//!   completion with [`find_path`] / [`find_path_with`].
//!
//! Movement rules come from a [`HexPather`]; a plain `Fn(HexCoord) -> bool`
//! blocking predicate is one.
//!
//! [`HexCoord`]: hexfield_core::HexCoord

mod config;
mod graph;
mod node;
mod pathfinder;
mod queue;
mod traits;

pub use config::{DEFAULT_SEARCH_MARGIN, SearchConfig};
pub use graph::{NodeId, PathStep, Relaxation, SearchGraph};
pub use node::{Priority, SearchNode};
pub use pathfinder::{
    Path, PathFinder, PathOutcome, SearchState, SearchStats, find_path, find_path_with,
};
pub use queue::{PriorityQueue, QueueNode};
pub use traits::HexPather;
