//! TOML map files.
//!
//! Two layouts are accepted.  A drawn map:
//!
//! ```toml
//! ascii = """
//! ....#
//! .##.#
//! .....
//! """
//! ```
//!
//! or an explicit description:
//!
//! ```toml
//! rows = 20
//! cols = 30
//! default_cost = 1.0
//! obstacles = [[3, 4], [3, 5]]
//! obstacle_rects = [{ top = 10, left = 2, bottom = 12, right = 20 }]
//! costs = [{ row = 0, col = 0, cost = 4.0 }]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gridnav_types::{GridPos, NavError};

use crate::cost_map::OccupancyMap;

/// Inclusive obstacle rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

/// A single cell cost override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSpec {
    pub row: usize,
    pub col: usize,
    pub cost: f64,
}

/// On-disk representation of an [`OccupancyMap`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii: Option<String>,
    #[serde(default)]
    pub rows: usize,
    #[serde(default)]
    pub cols: usize,
    #[serde(default = "default_cost")]
    pub default_cost: f64,
    #[serde(default)]
    pub obstacles: Vec<[usize; 2]>,
    #[serde(default)]
    pub obstacle_rects: Vec<RectSpec>,
    #[serde(default)]
    pub costs: Vec<CostSpec>,
}

fn default_cost() -> f64 {
    1.0
}

impl MapFile {
    /// Build the described map.  Cost overrides are applied before
    /// obstacles, and obstacles are applied on top of a drawn `ascii` map.
    pub fn build(&self) -> Result<OccupancyMap, NavError> {
        let mut map = match &self.ascii {
            Some(text) => OccupancyMap::from_ascii(text)?,
            None => OccupancyMap::filled(self.rows, self.cols, self.default_cost)?,
        };
        for c in &self.costs {
            map.set_cost(GridPos::new(c.row, c.col), c.cost)?;
        }
        for &[row, col] in &self.obstacles {
            map.set_obstacle(GridPos::new(row, col))?;
        }
        for r in &self.obstacle_rects {
            map.fill_rect_obstacle(GridPos::new(r.top, r.left), GridPos::new(r.bottom, r.right))?;
        }
        Ok(map)
    }
}

/// Parse a TOML map description.
pub fn parse_map(raw: &str) -> Result<OccupancyMap, NavError> {
    let file: MapFile = toml::from_str(raw)
        .map_err(|e| NavError::InvalidMap(format!("failed to parse map file: {e}")))?;
    file.build()
}

/// Read and parse a TOML map file from disk.
pub fn load_map(path: &Path) -> Result<OccupancyMap, NavError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        NavError::InvalidMap(format!("failed to read map at {}: {e}", path.display()))
    })?;
    parse_map(&raw)
}
