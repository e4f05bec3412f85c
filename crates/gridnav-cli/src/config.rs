//! Configuration – reads/writes `~/.gridnav/config.toml`.
//!
//! ```toml
//! default_algorithm = "a-star"
//!
//! [planner]
//! max_expansions = 250000
//!
//! [map]
//! rows = 60
//! cols = 80
//! seed = 7
//! obstacle_count = 20
//! max_cell_cost = 4.0
//!
//! [bench]
//! runs = 100
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use gridnav_map::RandomMapParams;
use gridnav_planner::PlannerConfig;
use gridnav_types::Algorithm;

/// Random map used when no map file is given on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,

    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Seed for map generation and for picking benchmark problems.
    #[serde(default)]
    pub seed: u64,

    #[serde(flatten)]
    pub params: RandomMapParams,
}

/// Monte-Carlo benchmark settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of random start/goal problems per algorithm.
    #[serde(default = "default_runs")]
    pub runs: usize,
}

/// Persisted user configuration stored in `~/.gridnav/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Algorithm used by `gridnav plan` when `--algorithm` is omitted.
    #[serde(default)]
    pub default_algorithm: Algorithm,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub bench: BenchConfig,
}

fn default_rows() -> usize {
    60
}
fn default_cols() -> usize {
    80
}
fn default_runs() -> usize {
    100
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed: 0,
            params: RandomMapParams::default(),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
        }
    }
}

/// Return the path to `~/.gridnav/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".gridnav").join("config.toml")
}

/// Load the config from `path` (or the default location), falling back to
/// defaults when the file does not exist.  Environment overrides are applied
/// in both cases.
pub fn load(path: Option<&Path>) -> Result<Config, String> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let mut cfg = load_from(&path)?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Load the config from a specific path.  Returns `None` if the file does
/// not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Apply `GRIDNAV_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `GRIDNAV_ALGORITHM` | `default_algorithm` |
/// | `GRIDNAV_MAX_EXPANSIONS` | `planner.max_expansions` |
/// | `GRIDNAV_SEED` | `map.seed` |
/// | `GRIDNAV_MAP_ROWS` | `map.rows` |
/// | `GRIDNAV_MAP_COLS` | `map.cols` |
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("GRIDNAV_ALGORITHM")
        && let Ok(alg) = v.parse::<Algorithm>()
    {
        cfg.default_algorithm = alg;
    }
    if let Ok(v) = std::env::var("GRIDNAV_MAX_EXPANSIONS")
        && let Ok(n) = v.parse::<usize>()
    {
        cfg.planner.max_expansions = Some(n);
    }
    if let Ok(v) = std::env::var("GRIDNAV_SEED")
        && let Ok(seed) = v.parse::<u64>()
    {
        cfg.map.seed = seed;
    }
    if let Ok(v) = std::env::var("GRIDNAV_MAP_ROWS")
        && let Ok(rows) = v.parse::<usize>()
    {
        cfg.map.rows = rows;
    }
    if let Ok(v) = std::env::var("GRIDNAV_MAP_COLS")
        && let Ok(cols) = v.parse::<usize>()
    {
        cfg.map.cols = cols;
    }
}

/// Save the config to `path`, creating parent directories if necessary.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))
}
