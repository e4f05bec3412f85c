//! Seeded random map generation.
//!
//! Produces [`OccupancyMap`]s scattered with rectangular obstacles and
//! rectangular "rough" patches of higher traversal cost.  The same
//! `(rows, cols, params, seed)` always yields the same map, which keeps
//! benchmark runs and property tests reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use gridnav_types::{GridPos, NavError};

use crate::cost_map::OccupancyMap;

/// Knobs for [`OccupancyMap::random`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomMapParams {
    /// Number of rectangular obstacles to place.
    pub obstacle_count: usize,
    /// Maximum side length of an obstacle rectangle, in cells.
    pub max_obstacle_size: usize,
    /// Number of rough patches to place.
    pub rough_patch_count: usize,
    /// Maximum side length of a rough patch, in cells.
    pub max_patch_size: usize,
    /// Upper bound of the cost drawn for a rough patch (lower bound is 1).
    pub max_cell_cost: f64,
}

impl Default for RandomMapParams {
    fn default() -> Self {
        Self {
            obstacle_count: 12,
            max_obstacle_size: 8,
            rough_patch_count: 8,
            max_patch_size: 12,
            max_cell_cost: 5.0,
        }
    }
}

impl OccupancyMap {
    /// Generate a random map from `seed`.
    ///
    /// Rough patches are laid down first and obstacles on top of them, so an
    /// obstacle always wins where the two overlap.
    pub fn random(
        rows: usize,
        cols: usize,
        params: &RandomMapParams,
        seed: u64,
    ) -> Result<Self, NavError> {
        if !(params.max_cell_cost.is_finite() && params.max_cell_cost >= 1.0) {
            return Err(NavError::InvalidMap(format!(
                "max_cell_cost must be finite and >= 1, got {}",
                params.max_cell_cost
            )));
        }
        let mut map = OccupancyMap::new(rows, cols)?;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..params.rough_patch_count {
            let (a, b) = random_rect(&mut rng, rows, cols, params.max_patch_size);
            let cost = if params.max_cell_cost > 1.0 {
                rng.gen_range(1.0..=params.max_cell_cost)
            } else {
                1.0
            };
            for row in a.row..=b.row {
                for col in a.col..=b.col {
                    map.set_cost(GridPos::new(row, col), cost)?;
                }
            }
        }

        for _ in 0..params.obstacle_count {
            let (a, b) = random_rect(&mut rng, rows, cols, params.max_obstacle_size);
            map.fill_rect_obstacle(a, b)?;
        }

        Ok(map)
    }
}

/// Pick a rectangle of side at most `max_size` (at least 1) lying inside the grid.
fn random_rect(rng: &mut StdRng, rows: usize, cols: usize, max_size: usize) -> (GridPos, GridPos) {
    let max_size = max_size.max(1);
    let height = rng.gen_range(1..=max_size.min(rows));
    let width = rng.gen_range(1..=max_size.min(cols));
    let top = rng.gen_range(0..=rows - height);
    let left = rng.gen_range(0..=cols - width);
    (
        GridPos::new(top, left),
        GridPos::new(top + height - 1, left + width - 1),
    )
}
