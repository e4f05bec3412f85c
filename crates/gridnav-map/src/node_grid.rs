//! Per-cell search state, stored as a flat arena.
//!
//! Every cell of a cost map owns exactly one [`Node`].  Nodes live in a
//! single `Vec` indexed by `row * cols + col`; a node's `parent` is an index
//! into that same `Vec`, so the predecessor tree built during a search needs
//! no pointers and cannot form ownership cycles.
//!
//! ```rust
//! use gridnav_map::node_grid::NodeGrid;
//! use gridnav_types::GridPos;
//!
//! let mut grid = NodeGrid::new(4, 4);
//! let idx = grid.index(GridPos::new(2, 3)).unwrap();
//! grid.node_mut(idx).g = 1.5;
//! grid.reset();
//! assert!(grid.node(idx).g.is_infinite());
//! ```

use gridnav_types::{GridPos, NavError};

use crate::cost_map::CostMap;

// ────────────────────────────────────────────────────────────────────────────
// Node
// ────────────────────────────────────────────────────────────────────────────

/// Search bookkeeping for a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: GridPos,
    /// Best known cost from the start.
    pub g: f64,
    /// Priority key last used to push this node onto the frontier.
    pub f: f64,
    /// Set once the node has been expanded; never cleared mid-search.
    pub closed: bool,
    /// Arena index of the predecessor on the best known path.
    pub parent: Option<usize>,
}

impl Node {
    fn new(position: GridPos) -> Self {
        Self {
            position,
            g: f64::INFINITY,
            f: f64::INFINITY,
            closed: false,
            parent: None,
        }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Euclidean distance from this node's cell to `pos`.
    pub fn distance_to(&self, pos: GridPos) -> f64 {
        self.position.distance_to(pos)
    }

    /// Restore the initial search state.
    pub fn reset(&mut self) {
        self.g = f64::INFINITY;
        self.f = f64::INFINITY;
        self.closed = false;
        self.parent = None;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// NodeGrid
// ────────────────────────────────────────────────────────────────────────────

/// Arena of [`Node`]s, one per grid cell.
#[derive(Debug, Clone)]
pub struct NodeGrid {
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
}

impl NodeGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let nodes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Node::new(GridPos::new(row, col))))
            .collect();
        Self { rows, cols, nodes }
    }

    /// Create a grid sized to `map`.
    pub fn for_map<M: CostMap + ?Sized>(map: &M) -> Self {
        Self::new(map.rows(), map.cols())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reset every node to `g = ∞, f = ∞, closed = false, parent = None`.
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset);
    }

    /// Arena index of the node at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfBounds`] when `pos` is outside the grid.
    pub fn index(&self, pos: GridPos) -> Result<usize, NavError> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(NavError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Node at arena index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was not produced by [`NodeGrid::index`] on this grid.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Node at `pos`, with bounds checking.
    pub fn get(&self, pos: GridPos) -> Result<&Node, NavError> {
        self.index(pos).map(|idx| &self.nodes[idx])
    }

    pub fn position(&self, idx: usize) -> GridPos {
        self.nodes[idx].position
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_map::OccupancyMap;

    #[test]
    fn new_grid_is_in_initial_state() {
        let grid = NodeGrid::new(3, 4);
        assert_eq!(grid.len(), 12);
        for node in grid.iter() {
            assert!(node.g.is_infinite());
            assert!(node.f.is_infinite());
            assert!(!node.closed);
            assert!(node.parent.is_none());
        }
    }

    #[test]
    fn index_and_position_agree() {
        let grid = NodeGrid::new(3, 4);
        for row in 0..3 {
            for col in 0..4 {
                let pos = GridPos::new(row, col);
                let idx = grid.index(pos).unwrap();
                assert_eq!(idx, row * 4 + col);
                assert_eq!(grid.position(idx), pos);
                assert_eq!(grid.node(idx).position(), pos);
            }
        }
    }

    #[test]
    fn index_rejects_out_of_bounds() {
        let grid = NodeGrid::new(2, 2);
        assert_eq!(
            grid.index(GridPos::new(2, 0)),
            Err(NavError::OutOfBounds {
                pos: GridPos::new(2, 0),
                rows: 2,
                cols: 2
            })
        );
        assert!(grid.get(GridPos::new(0, 5)).is_err());
    }

    #[test]
    fn reset_restores_every_field() {
        let mut grid = NodeGrid::new(2, 2);
        {
            let n = grid.node_mut(3);
            n.g = 2.0;
            n.f = 3.0;
            n.closed = true;
            n.parent = Some(0);
        }
        grid.reset();
        let n = grid.node(3);
        assert!(n.g.is_infinite() && n.f.is_infinite());
        assert!(!n.closed);
        assert_eq!(n.parent, None);
        assert_eq!(n.position(), GridPos::new(1, 1));
    }

    #[test]
    fn for_map_matches_dimensions() {
        let map = OccupancyMap::new(5, 7).unwrap();
        let grid = NodeGrid::for_map(&map);
        assert_eq!((grid.rows(), grid.cols()), (5, 7));
    }

    #[test]
    fn node_distance_is_euclidean() {
        let grid = NodeGrid::new(5, 5);
        let n = grid.get(GridPos::new(1, 1)).unwrap();
        assert!((n.distance_to(GridPos::new(4, 5)) - 5.0).abs() < 1e-12);
    }
}
