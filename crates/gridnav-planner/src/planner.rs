//! [`PathPlanner`] – best-first search over a [`CostMap`].
//!
//! Dijkstra, greedy best-first, and A* share one relaxation loop.  The only
//! difference between them is the priority key a node is queued with:
//!
//! | Algorithm | Key         |
//! |-----------|-------------|
//! | Dijkstra  | `g`         |
//! | Greedy    | `h`         |
//! | A*        | `g + h`     |
//!
//! `h` is the Euclidean distance to the goal.  Every algorithm tracks the
//! accumulated cost `g` and reports the goal's `g` as the plan cost.
//!
//! Dijkstra and A* never revisit a closed node: once popped, its `g` is
//! final.  Greedy search keeps relaxing closed successors, so a node it
//! settled early through an expensive route can later be re-parented onto a
//! cheaper one.  Nodes downstream of it keep their older `g`, which means a
//! greedy plan's cost can exceed [`path_cost`] of its path (never fall below
//! it).
//!
//! # Example
//!
//! ```rust
//! use gridnav_map::OccupancyMap;
//! use gridnav_planner::PathPlanner;
//! use gridnav_types::GridPos;
//!
//! let map = OccupancyMap::from_ascii(
//!     ".#.\n\
//!      .#.\n\
//!      ...",
//! ).unwrap();
//! let mut planner = PathPlanner::new(map);
//!
//! let plan = planner.a_star(GridPos::new(0, 0), GridPos::new(0, 2)).unwrap();
//! assert_eq!(plan.start(), Some(GridPos::new(0, 0)));
//! assert_eq!(plan.goal(), Some(GridPos::new(0, 2)));
//! assert!(plan.cost.is_finite());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use gridnav_map::{CostMap, NodeGrid};
use gridnav_types::{Algorithm, GridPos, NavError, Plan};

use crate::frontier::Frontier;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for [`PathPlanner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of nodes a single call may expand.  A search that needs
    /// more fails with [`NavError::ExpansionLimit`]; `Some(0)` refuses every
    /// search.  `None` searches until the frontier is exhausted.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// PathPlanner
// ─────────────────────────────────────────────────────────────────────────────

/// Grid path planner owning a cost map and the search state sized to it.
///
/// Every planning call resets the node grid on entry, so calls take
/// `&mut self` and run one at a time per planner.  Use separate planners for
/// concurrent searches.
pub struct PathPlanner<M: CostMap> {
    map: M,
    grid: NodeGrid,
    config: PlannerConfig,
}

impl<M: CostMap> PathPlanner<M> {
    /// Create a planner with an unbounded search budget.
    pub fn new(map: M) -> Self {
        Self::with_config(map, PlannerConfig::default())
    }

    pub fn with_config(map: M, config: PlannerConfig) -> Self {
        let grid = NodeGrid::for_map(&map);
        Self { map, grid, config }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Search state left behind by the most recent call.
    pub fn node_grid(&self) -> &NodeGrid {
        &self.grid
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Restore every node to its initial search state.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Uniform-cost search.  Returns a minimum-cost path.
    pub fn dijkstra(&mut self, start: GridPos, goal: GridPos) -> Result<Plan, NavError> {
        self.search(Algorithm::Dijkstra, start, goal)
    }

    /// Greedy best-first search.  Fast, but the path is not necessarily the
    /// cheapest one.
    pub fn greedy(&mut self, start: GridPos, goal: GridPos) -> Result<Plan, NavError> {
        self.search(Algorithm::Greedy, start, goal)
    }

    /// A* search.  Returns a minimum-cost path.
    pub fn a_star(&mut self, start: GridPos, goal: GridPos) -> Result<Plan, NavError> {
        self.search(Algorithm::AStar, start, goal)
    }

    /// Plan with the given algorithm.
    ///
    /// An unreachable goal yields `Ok` with an empty path and infinite cost.
    ///
    /// # Errors
    ///
    /// - [`NavError::OutOfBounds`] when `start` or `goal` is off the grid.
    /// - [`NavError::ExpansionLimit`] when
    ///   [`PlannerConfig::max_expansions`] is reached before the goal.
    pub fn plan(
        &mut self,
        algorithm: Algorithm,
        start: GridPos,
        goal: GridPos,
    ) -> Result<Plan, NavError> {
        self.search(algorithm, start, goal)
    }

    #[instrument(level = "debug", skip_all, fields(%algorithm, %start, %goal))]
    fn search(
        &mut self,
        algorithm: Algorithm,
        start: GridPos,
        goal: GridPos,
    ) -> Result<Plan, NavError> {
        self.grid.reset();
        let start_idx = self.grid.index(start)?;
        let goal_idx = self.grid.index(goal)?;

        let mut frontier = Frontier::new();
        let start_key = priority_key(algorithm, 0.0, start, goal);
        {
            let node = self.grid.node_mut(start_idx);
            node.g = 0.0;
            node.f = start_key;
        }
        frontier.push(start_key, start_idx);

        let mut expanded = 0usize;

        while let Some((key, current)) = frontier.pop() {
            let node = self.grid.node_mut(current);
            if node.closed {
                continue;
            }
            if let Some(limit) = self.config.max_expansions
                && expanded >= limit
            {
                warn!(limit, "expansion budget exhausted before reaching goal");
                return Err(NavError::ExpansionLimit { limit });
            }
            node.closed = true;
            expanded += 1;

            let pos = node.position();
            let g_current = node.g;
            trace!(%pos, key, g = g_current, "expand");

            if current == goal_idx {
                let path = construct_path(&self.grid, goal_idx);
                debug!(
                    cost = g_current,
                    len = path.len(),
                    expanded,
                    pushes = frontier.pushes(),
                    "goal reached"
                );
                return Ok(Plan {
                    algorithm,
                    path,
                    cost: g_current,
                    expanded,
                });
            }

            for next in self.map.successors(pos) {
                let next_idx = self.grid.index(next)?;
                let edge = self.map.edge_cost(pos, next);
                debug_assert!(edge >= 0.0, "negative edge cost {edge} from {pos} to {next}");

                let succ = self.grid.node_mut(next_idx);
                // A closed node's g is final under a cost-ordered frontier.
                if succ.closed && algorithm.is_cost_optimal() {
                    continue;
                }
                let tentative = g_current + edge;
                if tentative < succ.g {
                    succ.g = tentative;
                    succ.f = priority_key(algorithm, tentative, next, goal);
                    succ.parent = Some(current);
                    frontier.push(succ.f, next_idx);
                }
            }
        }

        debug!(expanded, "frontier exhausted; goal unreachable");
        Ok(Plan::unreachable(algorithm, expanded))
    }
}

/// Frontier key for a node at `pos` reached with cost `g`.
fn priority_key(algorithm: Algorithm, g: f64, pos: GridPos, goal: GridPos) -> f64 {
    match algorithm {
        Algorithm::Dijkstra => g,
        Algorithm::Greedy => pos.distance_to(goal),
        Algorithm::AStar => g + pos.distance_to(goal),
    }
}

/// Follow parent links from `goal_idx` back to the root and return the
/// positions in start-to-goal order.
fn construct_path(grid: &NodeGrid, goal_idx: usize) -> Vec<GridPos> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_idx);
    while let Some(idx) = cursor {
        debug_assert!(path.len() < grid.len(), "parent links form a cycle");
        let node = grid.node(idx);
        path.push(node.position());
        cursor = node.parent;
    }
    path.reverse();
    path
}

/// Sum of edge costs along `path`.
///
/// A single-cell path costs `0`; an empty path (no route) costs `∞`.
pub fn path_cost<M: CostMap + ?Sized>(map: &M, path: &[GridPos]) -> f64 {
    if path.is_empty() {
        return f64::INFINITY;
    }
    path.windows(2).map(|w| map.edge_cost(w[0], w[1])).sum()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
