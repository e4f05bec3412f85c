//! `gridnav-planner` – informed search over occupancy grids.
//!
//! # Modules
//!
//! - [`planner`] – [`PathPlanner`][planner::PathPlanner]: Dijkstra, greedy
//!   best-first, and A* over any [`CostMap`][gridnav_map::CostMap], sharing a
//!   single relaxation loop.  Paths are rebuilt from parent indices stored in
//!   the [`NodeGrid`][gridnav_map::NodeGrid] arena.
//! - [`frontier`] – [`Frontier`][frontier::Frontier]: the min-priority queue
//!   of discovered nodes, with FIFO tie-breaking and lazy discard of stale
//!   entries.
//!
//! # Outcomes
//!
//! An unreachable goal is a normal result ([`Plan::unreachable`]: empty path,
//! infinite cost).  [`NavError`] is reserved for off-grid endpoints and an
//! exhausted [`PlannerConfig::max_expansions`] budget.

pub mod frontier;
pub mod planner;

pub use frontier::Frontier;
pub use planner::{PathPlanner, PlannerConfig, path_cost};

pub use gridnav_types::{Algorithm, GridPos, NavError, Plan};
