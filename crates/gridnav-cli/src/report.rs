//! Result summaries for `compare` and `bench`.

use std::time::Duration;

use colored::Colorize;
use gridnav_types::{Algorithm, Plan};

/// Mean and (population) standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// Summarise `samples`; `None` when empty.
pub fn summarize(samples: &[f64]) -> Option<Summary> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some(Summary {
        mean,
        std_dev: var.sqrt(),
        count: samples.len(),
    })
}

/// Collected measurements of one algorithm over a benchmark.
#[derive(Debug, Clone)]
pub struct BenchRecord {
    pub algorithm: Algorithm,
    /// Wall time per problem, in milliseconds.
    pub times_ms: Vec<f64>,
    /// Path cost of every solved problem.
    pub costs: Vec<f64>,
    pub unreachable: usize,
}

impl BenchRecord {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            times_ms: Vec::new(),
            costs: Vec::new(),
            unreachable: 0,
        }
    }

    pub fn record(&mut self, plan: &Plan, elapsed: Duration) {
        self.times_ms.push(elapsed.as_secs_f64() * 1e3);
        if plan.is_found() {
            self.costs.push(plan.cost);
        } else {
            self.unreachable += 1;
        }
    }
}

pub fn format_cost(cost: f64) -> String {
    if cost.is_finite() {
        format!("{cost:.3}")
    } else {
        "inf".to_string()
    }
}

/// Algorithm label for tables; algorithms without an optimality guarantee
/// carry a trailing `*`.
pub fn algorithm_label(algorithm: Algorithm) -> String {
    if algorithm.is_cost_optimal() {
        algorithm.to_string()
    } else {
        format!("{algorithm}*")
    }
}

/// One row of the `compare` table.
pub fn print_compare_row(plan: &Plan, elapsed: Duration) {
    let status = if plan.is_found() {
        "found".green()
    } else {
        "unreachable".yellow()
    };
    println!(
        "  {:<10} {:<12} {:>10} {:>8} {:>10} {:>10.3}",
        algorithm_label(plan.algorithm).bold(),
        status,
        format_cost(plan.cost),
        plan.path.len(),
        plan.expanded,
        elapsed.as_secs_f64() * 1e3,
    );
}

pub fn print_compare_header() {
    println!(
        "  {:<10} {:<12} {:>10} {:>8} {:>10} {:>10}",
        "algorithm".dimmed(),
        "status".dimmed(),
        "cost".dimmed(),
        "cells".dimmed(),
        "expanded".dimmed(),
        "time (ms)".dimmed(),
    );
}

pub fn print_legend() {
    println!("  {}", "* cost not guaranteed minimal".dimmed());
}

pub fn print_bench(records: &[BenchRecord]) {
    println!(
        "  {:<10} {:>22} {:>22} {:>8} {:>12}",
        "algorithm".dimmed(),
        "time ms (mean ± std)".dimmed(),
        "cost (mean ± std)".dimmed(),
        "solved".dimmed(),
        "unreachable".dimmed(),
    );
    for r in records {
        let time = summarize(&r.times_ms)
            .map(|s| format!("{:.3} ± {:.3}", s.mean, s.std_dev))
            .unwrap_or_else(|| "-".to_string());
        let cost_summary = summarize(&r.costs);
        let cost = cost_summary
            .map(|s| format!("{:.3} ± {:.3}", s.mean, s.std_dev))
            .unwrap_or_else(|| "-".to_string());
        let solved = cost_summary.map_or(0, |s| s.count);
        println!(
            "  {:<10} {:>22} {:>22} {:>8} {:>12}",
            algorithm_label(r.algorithm).bold(),
            time,
            cost,
            solved,
            r.unreachable,
        );
    }
    print_legend();
}
