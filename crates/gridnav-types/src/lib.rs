use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell coordinate on the planning grid: `row` (i) and `col` (j).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Euclidean distance between two cell centres, in cells.
    pub fn distance_to(&self, other: GridPos) -> f64 {
        let di = self.row as f64 - other.row as f64;
        let dj = self.col as f64 - other.col as f64;
        di.hypot(dj)
    }

    /// True when `other` differs in both row and column (a diagonal step).
    pub fn is_diagonal_to(&self, other: GridPos) -> bool {
        self.row != other.row && self.col != other.col
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"i,j"` (whitespace around either number is ignored).
impl FromStr for GridPos {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| NavError::Config(format!("expected `row,col`, got `{s}`")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| NavError::Config(format!("invalid coordinate `{}`: {e}", v.trim())))
        };
        Ok(Self::new(parse(row)?, parse(col)?))
    }
}

/// The informed-search strategy used to order the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Uniform-cost search; priority key is `g`.
    Dijkstra,
    /// Greedy best-first search; priority key is `h`.
    Greedy,
    /// Priority key is `g + h`.
    #[default]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::Greedy, Algorithm::AStar];

    /// True for the algorithms that guarantee a minimum-cost path.
    pub fn is_cost_optimal(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => write!(f, "dijkstra"),
            Algorithm::Greedy => write!(f, "greedy"),
            Algorithm::AStar => write!(f, "a-star"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "ucs" => Ok(Algorithm::Dijkstra),
            "greedy" | "gbfs" => Ok(Algorithm::Greedy),
            "a-star" | "astar" | "a*" | "a_star" => Ok(Algorithm::AStar),
            other => Err(NavError::Config(format!("unknown algorithm `{other}`"))),
        }
    }
}

/// The outcome of one planning call.
///
/// An unreachable goal is a normal result: `path` is empty and `cost` is
/// `f64::INFINITY`.  Serialized JSON renders the infinite cost as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub algorithm: Algorithm,
    /// Cells from start to goal inclusive.
    pub path: Vec<GridPos>,
    /// Accumulated edge cost along `path`.
    #[serde(with = "cost_repr")]
    pub cost: f64,
    /// Number of nodes settled (popped and closed) during the search.
    pub expanded: usize,
}

impl Plan {
    /// The result reported when the frontier empties before the goal is reached.
    pub fn unreachable(algorithm: Algorithm, expanded: usize) -> Self {
        Self {
            algorithm,
            path: Vec::new(),
            cost: f64::INFINITY,
            expanded,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn start(&self) -> Option<GridPos> {
        self.path.first().copied()
    }

    pub fn goal(&self) -> Option<GridPos> {
        self.path.last().copied()
    }
}

mod cost_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cost: &f64, s: S) -> Result<S::Ok, S::Error> {
        if cost.is_finite() {
            s.serialize_some(cost)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
    }
}

/// Errors raised by the grid collaborator, the planner's iteration cap, and
/// configuration loading.  "No path" is never an error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavError {
    #[error("Position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: GridPos, rows: usize, cols: usize },

    #[error("Invalid cell cost {cost} at {pos}: costs must be finite and >= 1")]
    InvalidCellCost { pos: GridPos, cost: f64 },

    #[error("Search aborted after expanding {limit} nodes")]
    ExpansionLimit { limit: usize },

    #[error("Invalid map: {0}")]
    InvalidMap(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}
