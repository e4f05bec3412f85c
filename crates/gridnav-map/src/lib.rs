//! `gridnav-map` – the grid the planner searches over.
//!
//! Supplies connectivity, edge costs, and per-cell search state for
//! `gridnav-planner`.
//!
//! # Modules
//!
//! - [`cost_map`] – [`CostMap`][cost_map::CostMap]: the trait the planner
//!   consumes (successors and edge costs), and
//!   [`OccupancyMap`][cost_map::OccupancyMap], a dense 8-connected grid with
//!   obstacles and per-cell traversal costs.
//! - [`node_grid`] – [`NodeGrid`][node_grid::NodeGrid]: a flat arena of
//!   [`Node`][node_grid::Node]s holding `g`, `f`, `closed`, and parent
//!   indices for one search at a time.
//! - [`random`] – seeded random map generation for benchmarks and tests.
//! - [`map_file`] – loading maps from TOML files.

pub mod cost_map;
pub mod map_file;
pub mod node_grid;
pub mod random;

pub use cost_map::{Cell, CostMap, OccupancyMap};
pub use map_file::{MapFile, load_map, parse_map};
pub use node_grid::{Node, NodeGrid};
pub use random::RandomMapParams;
