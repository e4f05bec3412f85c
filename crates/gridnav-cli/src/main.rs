//! `gridnav` – grid path planning from the command line.
//!
//! Subcommands:
//!
//! - `plan` – run one algorithm between two cells and print the path.
//! - `compare` – run Dijkstra, greedy, and A* on the same problem.
//! - `bench` – Monte-Carlo timing and cost statistics over random problems.
//! - `init-config` – write a default `~/.gridnav/config.toml`.
//!
//! Without `--map`, every command plans over a random map generated from
//! the `[map]` section of the configuration.

mod config;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use gridnav_map::{CostMap, OccupancyMap, load_map};
use gridnav_planner::PathPlanner;
use gridnav_types::{Algorithm, GridPos, NavError};

use crate::config::Config;
use crate::report::BenchRecord;

#[derive(Debug, Parser)]
#[command(name = "gridnav", version, about = "Grid path planning with Dijkstra, greedy search, and A*")]
struct Cli {
    /// Configuration file (defaults to ~/.gridnav/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a single path.
    Plan {
        /// dijkstra, greedy, or a-star (defaults to the configured algorithm).
        #[arg(long, short)]
        algorithm: Option<Algorithm>,
        /// Start cell as `row,col`.
        #[arg(long)]
        start: GridPos,
        /// Goal cell as `row,col`.
        #[arg(long)]
        goal: GridPos,
        /// TOML map file.
        #[arg(long)]
        map: Option<PathBuf>,
        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run every algorithm on the same problem.
    Compare {
        #[arg(long)]
        start: GridPos,
        #[arg(long)]
        goal: GridPos,
        #[arg(long)]
        map: Option<PathBuf>,
    },
    /// Time every algorithm over random start/goal problems.
    Bench {
        /// Number of problems (defaults to `bench.runs`).
        #[arg(long)]
        runs: Option<usize>,
        /// Seed for the map and problems (defaults to `map.seed`).
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        map: Option<PathBuf>,
    },
    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG controls the filter (default "info").  GRIDNAV_LOG_FORMAT=json
    // switches to newline-delimited JSON.  Logs go to stderr so that
    // `plan --json` output on stdout stays machine-readable.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("GRIDNAV_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    let cli = Cli::parse();

    let cfg = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(?cfg, "configuration loaded");

    let result = match cli.command {
        Command::Plan {
            algorithm,
            start,
            goal,
            map,
            json,
        } => run_plan(&cfg, algorithm.unwrap_or(cfg.default_algorithm), start, goal, map.as_deref(), json),
        Command::Compare { start, goal, map } => run_compare(&cfg, start, goal, map.as_deref()),
        Command::Bench { runs, seed, map } => run_bench(
            &cfg,
            runs.unwrap_or(cfg.bench.runs),
            seed.unwrap_or(cfg.map.seed),
            map.as_deref(),
        ),
        Command::InitConfig { force } => run_init_config(&cfg, cli.config.as_deref(), force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn run_plan(
    cfg: &Config,
    algorithm: Algorithm,
    start: GridPos,
    goal: GridPos,
    map_path: Option<&Path>,
    json: bool,
) -> Result<(), NavError> {
    let map = resolve_map(cfg, map_path, cfg.map.seed)?;
    check_endpoints(&map, start, goal)?;

    let mut planner = PathPlanner::with_config(map, cfg.planner.clone());
    let plan = planner.plan(algorithm, start, goal)?;

    if json {
        let out = serde_json::to_string_pretty(&plan)
            .map_err(|e| NavError::Config(format!("failed to encode plan: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if plan.is_found() {
        println!(
            "  {} {} → {} with {}: cost {}, {} cells, {} nodes expanded",
            "✓".green().bold(),
            start,
            goal,
            algorithm.to_string().bold(),
            report::format_cost(plan.cost).bold(),
            plan.path.len(),
            plan.expanded,
        );
        let steps: Vec<String> = plan.path.iter().map(ToString::to_string).collect();
        println!("  {}", steps.join(" → ").dimmed());
    } else {
        println!(
            "  {} no path from {} to {} ({} nodes expanded)",
            "✗".yellow().bold(),
            start,
            goal,
            plan.expanded,
        );
    }
    Ok(())
}

fn run_compare(
    cfg: &Config,
    start: GridPos,
    goal: GridPos,
    map_path: Option<&Path>,
) -> Result<(), NavError> {
    let map = resolve_map(cfg, map_path, cfg.map.seed)?;
    check_endpoints(&map, start, goal)?;

    let mut planner = PathPlanner::with_config(map, cfg.planner.clone());
    println!();
    report::print_compare_header();
    for algorithm in Algorithm::ALL {
        let t0 = Instant::now();
        let plan = planner.plan(algorithm, start, goal)?;
        report::print_compare_row(&plan, t0.elapsed());
    }
    report::print_legend();
    println!();
    Ok(())
}

fn run_bench(cfg: &Config, runs: usize, seed: u64, map_path: Option<&Path>) -> Result<(), NavError> {
    let map = resolve_map(cfg, map_path, seed)?;
    let free = map.free_cells();
    if free.is_empty() {
        return Err(NavError::InvalidMap("map has no free cells".to_string()));
    }
    info!(
        rows = map.rows(),
        cols = map.cols(),
        free = free.len(),
        runs,
        seed,
        "starting benchmark"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut planner = PathPlanner::with_config(map, cfg.planner.clone());
    let mut records: Vec<BenchRecord> = Algorithm::ALL.iter().map(|&a| BenchRecord::new(a)).collect();

    for _ in 0..runs {
        let (Some(&start), Some(&goal)) = (free.choose(&mut rng), free.choose(&mut rng)) else {
            break;
        };
        for record in records.iter_mut() {
            let t0 = Instant::now();
            let plan = planner.plan(record.algorithm, start, goal)?;
            record.record(&plan, t0.elapsed());
        }
    }

    println!();
    println!("  {} problems, seed {}", runs.to_string().bold(), seed);
    report::print_bench(&records);
    println!();
    Ok(())
}

fn run_init_config(cfg: &Config, path: Option<&Path>, force: bool) -> Result<(), NavError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config::config_path);
    if path.exists() && !force {
        return Err(NavError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    config::save_to(cfg, &path).map_err(NavError::Config)?;
    println!(
        "  {} Config saved to {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Load `map_path` if given, otherwise generate the configured random map.
fn resolve_map(cfg: &Config, map_path: Option<&Path>, seed: u64) -> Result<OccupancyMap, NavError> {
    match map_path {
        Some(path) => {
            info!(path = %path.display(), "loading map");
            load_map(path)
        }
        None => {
            info!(rows = cfg.map.rows, cols = cfg.map.cols, seed, "generating random map");
            OccupancyMap::random(cfg.map.rows, cfg.map.cols, &cfg.map.params, seed)
        }
    }
}

/// The planner assumes both endpoints are on free cells; check that here.
fn check_endpoints(map: &OccupancyMap, start: GridPos, goal: GridPos) -> Result<(), NavError> {
    for (label, pos) in [("start", start), ("goal", goal)] {
        if !map.contains(pos) {
            return Err(NavError::OutOfBounds {
                pos,
                rows: map.rows(),
                cols: map.cols(),
            });
        }
        if !map.is_traversable(pos) {
            return Err(NavError::InvalidMap(format!("{label} {pos} is an obstacle")));
        }
    }
    Ok(())
}
