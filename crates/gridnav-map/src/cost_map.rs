//! Cost maps: the source of connectivity and edge costs for the planner.
//!
//! The planner never looks at cells directly.  It asks a [`CostMap`] which
//! cells are reachable in one step from a given cell and what that step
//! costs.  [`OccupancyMap`] is the dense, 8-connected implementation used
//! throughout the workspace.
//!
//! # Edge cost model
//!
//! | Step       | Cost                                   |
//! |------------|----------------------------------------|
//! | straight   | `1 × (cost(a) + cost(b)) / 2`          |
//! | diagonal   | `√2 × (cost(a) + cost(b)) / 2`         |
//!
//! Cell costs are at least `1.0`, so every edge costs at least its
//! Euclidean length and the straight-line heuristic never overestimates.
//!
//! # Example
//!
//! ```rust
//! use gridnav_map::cost_map::{CostMap, OccupancyMap};
//! use gridnav_types::GridPos;
//!
//! let map = OccupancyMap::from_ascii(
//!     "...\n\
//!      .#.\n\
//!      ...",
//! ).unwrap();
//!
//! assert!(!map.is_traversable(GridPos::new(1, 1)));
//! assert_eq!(map.successors(GridPos::new(0, 0)).len(), 2);
//! assert_eq!(map.edge_cost(GridPos::new(0, 0), GridPos::new(0, 1)), 1.0);
//! ```

use gridnav_types::{GridPos, NavError};

/// Offsets for the 8-connected neighbourhood: N, S, W, E, then diagonals.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

// ────────────────────────────────────────────────────────────────────────────
// CostMap trait
// ────────────────────────────────────────────────────────────────────────────

/// Connectivity and edge costs over a rectangular grid.
///
/// Implementations must return non-negative edge costs and a successor order
/// that is stable across calls; the planner's determinism depends on it.
pub trait CostMap {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// True when `pos` lies inside the grid.
    fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    /// True when a path may pass through `pos`.
    fn is_traversable(&self, pos: GridPos) -> bool;

    /// Cells reachable in one step from `pos`.
    fn successors(&self, pos: GridPos) -> Vec<GridPos>;

    /// Cost of moving from `from` to the adjacent cell `to`.
    fn edge_cost(&self, from: GridPos, to: GridPos) -> f64;
}

impl<M: CostMap + ?Sized> CostMap for &M {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn contains(&self, pos: GridPos) -> bool {
        (**self).contains(pos)
    }

    fn is_traversable(&self, pos: GridPos) -> bool {
        (**self).is_traversable(pos)
    }

    fn successors(&self, pos: GridPos) -> Vec<GridPos> {
        (**self).successors(pos)
    }

    fn edge_cost(&self, from: GridPos, to: GridPos) -> f64 {
        (**self).edge_cost(from, to)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cell
// ────────────────────────────────────────────────────────────────────────────

/// The content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Traversable cell with the given traversal cost (≥ 1).
    Free(f64),
    /// Blocked cell; never returned as a successor.
    Obstacle,
}

impl Cell {
    pub fn cost(&self) -> Option<f64> {
        match self {
            Cell::Free(c) => Some(*c),
            Cell::Obstacle => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OccupancyMap
// ────────────────────────────────────────────────────────────────────────────

/// Dense row-major occupancy grid with per-cell traversal costs.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyMap {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl OccupancyMap {
    /// Create a `rows × cols` map where every cell is free with cost `1.0`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, NavError> {
        Self::filled(rows, cols, 1.0)
    }

    /// Create a map where every cell is free with cost `cost`.
    pub fn filled(rows: usize, cols: usize, cost: f64) -> Result<Self, NavError> {
        if rows == 0 || cols == 0 {
            return Err(NavError::InvalidMap(format!(
                "grid dimensions must be non-zero, got {rows}x{cols}"
            )));
        }
        if !(cost.is_finite() && cost >= 1.0) {
            return Err(NavError::InvalidMap(format!(
                "default cell cost must be finite and at least 1, got {cost}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Free(cost); rows * cols],
        })
    }

    /// Parse a map from text: one line per row, `.` for a free cell of cost
    /// 1, `1`–`9` for a free cell of that cost, `#` for an obstacle.
    ///
    /// Leading/trailing whitespace on each line and blank lines are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, NavError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut map = Self::new(rows, cols)?;

        for (i, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(NavError::InvalidMap(format!(
                    "row {i} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (j, ch) in line.chars().enumerate() {
                let pos = GridPos::new(i, j);
                match ch {
                    '.' => {}
                    '#' => map.set_obstacle(pos)?,
                    '1'..='9' => map.set_cost(pos, f64::from(ch as u8 - b'0'))?,
                    other => {
                        return Err(NavError::InvalidMap(format!(
                            "unexpected character `{other}` at {pos}"
                        )));
                    }
                }
            }
        }
        Ok(map)
    }

    fn offset(&self, pos: GridPos) -> Result<usize, NavError> {
        if self.contains(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(NavError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Return the cell at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: GridPos) -> Option<Cell> {
        self.offset(pos).ok().map(|o| self.cells[o])
    }

    /// Traversal cost of the cell at `pos`; `None` for obstacles and
    /// out-of-bounds positions.
    pub fn cell_cost(&self, pos: GridPos) -> Option<f64> {
        self.cell(pos).and_then(|c| c.cost())
    }

    /// Mark `pos` as free with the given traversal cost.
    pub fn set_cost(&mut self, pos: GridPos, cost: f64) -> Result<(), NavError> {
        validate_cost(pos, cost)?;
        let o = self.offset(pos)?;
        self.cells[o] = Cell::Free(cost);
        Ok(())
    }

    /// Mark `pos` as an obstacle.
    pub fn set_obstacle(&mut self, pos: GridPos) -> Result<(), NavError> {
        let o = self.offset(pos)?;
        self.cells[o] = Cell::Obstacle;
        Ok(())
    }

    /// Mark every cell in the inclusive rectangle spanned by `a` and `b` as
    /// an obstacle.  The corners may be given in any order.
    pub fn fill_rect_obstacle(&mut self, a: GridPos, b: GridPos) -> Result<(), NavError> {
        self.offset(a)?;
        self.offset(b)?;
        for row in a.row.min(b.row)..=a.row.max(b.row) {
            for col in a.col.min(b.col)..=a.col.max(b.col) {
                self.set_obstacle(GridPos::new(row, col))?;
            }
        }
        Ok(())
    }

    /// All traversable cells in row-major order.
    pub fn free_cells(&self) -> Vec<GridPos> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| GridPos::new(row, col)))
            .filter(|&p| self.is_traversable(p))
            .collect()
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| matches!(c, Cell::Obstacle)).count()
    }
}

impl CostMap for OccupancyMap {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_traversable(&self, pos: GridPos) -> bool {
        matches!(self.cell(pos), Some(Cell::Free(_)))
    }

    fn successors(&self, pos: GridPos) -> Vec<GridPos> {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(di, dj)| {
                let row = pos.row.checked_add_signed(di)?;
                let col = pos.col.checked_add_signed(dj)?;
                Some(GridPos::new(row, col))
            })
            .filter(|&p| self.is_traversable(p))
            .collect()
    }

    fn edge_cost(&self, from: GridPos, to: GridPos) -> f64 {
        match (self.cell_cost(from), self.cell_cost(to)) {
            (Some(a), Some(b)) => {
                let factor = if from.is_diagonal_to(to) {
                    std::f64::consts::SQRT_2
                } else {
                    1.0
                };
                factor * (a + b) / 2.0
            }
            _ => f64::INFINITY,
        }
    }
}

fn validate_cost(pos: GridPos, cost: f64) -> Result<(), NavError> {
    if cost.is_finite() && cost >= 1.0 {
        Ok(())
    } else {
        Err(NavError::InvalidCellCost { pos, cost })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> GridPos {
        GridPos::new(row, col)
    }

    // ── Construction ────────────────────────────────────────────────────────

    #[test]
    fn zero_sized_map_is_rejected() {
        assert!(matches!(OccupancyMap::new(0, 5), Err(NavError::InvalidMap(_))));
        assert!(matches!(OccupancyMap::new(5, 0), Err(NavError::InvalidMap(_))));
    }

    #[test]
    fn cost_below_one_is_rejected() {
        let mut map = OccupancyMap::new(3, 3).unwrap();
        assert!(matches!(
            map.set_cost(p(1, 1), 0.5),
            Err(NavError::InvalidCellCost { .. })
        ));
        assert!(map.set_cost(p(1, 1), f64::NAN).is_err());
        assert!(map.set_cost(p(1, 1), f64::INFINITY).is_err());
    }

    #[test]
    fn filled_rejects_bad_default_cost_for_whole_map() {
        match OccupancyMap::filled(2, 2, 0.0) {
            Err(NavError::InvalidMap(msg)) => assert!(msg.contains("default cell cost"), "{msg}"),
            other => panic!("expected InvalidMap, got {other:?}"),
        }
        assert!(matches!(
            OccupancyMap::filled(2, 2, f64::INFINITY),
            Err(NavError::InvalidMap(_))
        ));
        assert!(OccupancyMap::filled(2, 2, 3.0).is_ok());
    }

    #[test]
    fn out_of_bounds_mutation_is_rejected() {
        let mut map = OccupancyMap::new(3, 3).unwrap();
        assert!(matches!(
            map.set_obstacle(p(3, 0)),
            Err(NavError::OutOfBounds { rows: 3, cols: 3, .. })
        ));
        assert!(map.fill_rect_obstacle(p(0, 0), p(5, 5)).is_err());
        assert_eq!(map.obstacle_count(), 0);
    }

    #[test]
    fn from_ascii_parses_obstacles_and_costs() {
        let map = OccupancyMap::from_ascii(
            "
            .#3
            9..
            ",
        )
        .unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 3);
        assert_eq!(map.cell(p(0, 1)), Some(Cell::Obstacle));
        assert_eq!(map.cell_cost(p(0, 2)), Some(3.0));
        assert_eq!(map.cell_cost(p(1, 0)), Some(9.0));
        assert_eq!(map.cell_cost(p(1, 1)), Some(1.0));
    }

    #[test]
    fn from_ascii_rejects_ragged_rows_and_unknown_chars() {
        assert!(OccupancyMap::from_ascii("...\n..").is_err());
        assert!(OccupancyMap::from_ascii("..x").is_err());
        assert!(OccupancyMap::from_ascii("").is_err());
    }

    #[test]
    fn fill_rect_accepts_corners_in_any_order() {
        let mut map = OccupancyMap::new(5, 5).unwrap();
        map.fill_rect_obstacle(p(3, 3), p(1, 2)).unwrap();
        assert_eq!(map.obstacle_count(), 6);
        assert!(!map.is_traversable(p(1, 2)));
        assert!(!map.is_traversable(p(3, 3)));
        assert!(map.is_traversable(p(0, 0)));
    }

    // ── Connectivity ────────────────────────────────────────────────────────

    #[test]
    fn interior_cell_has_eight_successors_in_fixed_order() {
        let map = OccupancyMap::new(3, 3).unwrap();
        assert_eq!(
            map.successors(p(1, 1)),
            vec![
                p(0, 1),
                p(2, 1),
                p(1, 0),
                p(1, 2),
                p(0, 0),
                p(0, 2),
                p(2, 0),
                p(2, 2)
            ]
        );
    }

    #[test]
    fn corner_cell_successors_stay_in_bounds() {
        let map = OccupancyMap::new(3, 3).unwrap();
        assert_eq!(map.successors(p(0, 0)), vec![p(1, 0), p(0, 1), p(1, 1)]);
        assert_eq!(map.successors(p(2, 2)), vec![p(1, 2), p(2, 1), p(1, 1)]);
    }

    #[test]
    fn obstacles_are_never_successors() {
        let map = OccupancyMap::from_ascii("#.\n..").unwrap();
        let succ = map.successors(p(1, 1));
        assert!(!succ.contains(&p(0, 0)));
        assert_eq!(succ.len(), 2);
    }

    #[test]
    fn free_cells_excludes_obstacles() {
        let map = OccupancyMap::from_ascii("#.\n.#").unwrap();
        assert_eq!(map.free_cells(), vec![p(0, 1), p(1, 0)]);
    }

    // ── Edge costs ──────────────────────────────────────────────────────────

    #[test]
    fn straight_edge_costs_mean_of_cell_costs() {
        let map = OccupancyMap::from_ascii("13").unwrap();
        assert!((map.edge_cost(p(0, 0), p(0, 1)) - 2.0).abs() < 1e-12);
        assert!((map.edge_cost(p(0, 1), p(0, 0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_edge_is_scaled_by_sqrt_two() {
        let map = OccupancyMap::from_ascii("1.\n.3").unwrap();
        let expected = std::f64::consts::SQRT_2 * 2.0;
        assert!((map.edge_cost(p(0, 0), p(1, 1)) - expected).abs() < 1e-12);
    }

    #[test]
    fn edge_cost_never_below_euclidean_step() {
        let map = OccupancyMap::from_ascii("1234\n5678\n9.1.").unwrap();
        for cell in map.free_cells() {
            for next in map.successors(cell) {
                assert!(map.edge_cost(cell, next) >= cell.distance_to(next) - 1e-12);
            }
        }
    }

    #[test]
    fn edge_into_obstacle_is_infinite() {
        let map = OccupancyMap::from_ascii(".#").unwrap();
        assert!(map.edge_cost(p(0, 0), p(0, 1)).is_infinite());
    }

    #[test]
    fn reference_impl_forwards_to_map() {
        let map = OccupancyMap::new(2, 2).unwrap();
        let by_ref: &OccupancyMap = &map;
        assert_eq!(CostMap::rows(&by_ref), 2);
        assert_eq!(CostMap::successors(&by_ref, p(0, 0)).len(), 3);
    }
}
