//! Search strategies over a weighted grid.
//!
//! Every strategy keeps its scores and predecessors in a [`SearchTrace`]
//! owned by the run, so the grid is only read while searching. [`search`]
//! copies the trace onto the grid's cell annotations afterwards;
//! [`search_in`] leaves the grid untouched and can be called from several
//! threads on the same grid.

pub mod a_star;
mod best_first;
pub mod bfs;
pub mod common;
pub mod hill_climbing;
pub mod uniform_cost;

pub use a_star::AStar;
pub use bfs::BreadthFirst;
pub use common::{
    manhattan, reconstruct_path, terrain_cost, SearchAlgorithm, SearchOutcome, SearchResult,
    SearchTrace,
};
pub use hill_climbing::{HillClimbing, DEFAULT_MAX_PATH_LEN, DEFAULT_MAX_RESTARTS};
pub use uniform_cost::UniformCost;

use crate::error::{Error, Result};
use crate::grid::Grid;
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Knobs that only the randomized strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Seed for hill climbing; drawn from entropy when `None`.
    pub seed: Option<u64>,
    pub max_restarts: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            seed: None,
            max_restarts: DEFAULT_MAX_RESTARTS,
        }
    }
}

impl SearchOptions {
    pub fn seeded(seed: u64) -> Self {
        SearchOptions {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    UniformCost,
    AStar,
    HillClimbing,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::UniformCost,
        Strategy::AStar,
        Strategy::HillClimbing,
    ];

    pub fn build(self, options: &SearchOptions) -> Box<dyn SearchAlgorithm> {
        match self {
            Strategy::Bfs => Box::new(BreadthFirst::new()),
            Strategy::UniformCost => Box::new(UniformCost::new()),
            Strategy::AStar => Box::new(AStar::new()),
            Strategy::HillClimbing => {
                let climber = match options.seed {
                    Some(seed) => HillClimbing::seeded(seed),
                    None => HillClimbing::from_entropy(),
                };
                Box::new(climber.with_max_restarts(options.max_restarts))
            }
        }
    }

    /// True for the strategies guaranteed to return a cheapest path.
    pub fn is_optimal(self) -> bool {
        matches!(self, Strategy::UniformCost | Strategy::AStar)
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" | "BFS" => Ok(Strategy::Bfs),
            "uniformCost" | "uniform_cost" | "uniform-cost" | "ucs" => Ok(Strategy::UniformCost),
            "aStar" | "a_star" | "a-star" | "astar" => Ok(Strategy::AStar),
            "hillClimbing" | "hill_climbing" | "hill-climbing" => Ok(Strategy::HillClimbing),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Bfs => "bfs",
            Strategy::UniformCost => "uniformCost",
            Strategy::AStar => "aStar",
            Strategy::HillClimbing => "hillClimbing",
        };
        f.write_str(name)
    }
}

/// Runs `strategy` on a read-only grid and returns the result with its trace.
pub fn search_in(
    strategy: Strategy,
    grid: &Grid,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    strategy.build(options).search(grid)
}

/// Runs `strategy` and writes the run's annotations onto the grid.
///
/// Call [`Grid::reset_annotations`] between runs on the same grid, otherwise
/// the annotations of both runs end up mixed on the cells.
pub fn search(strategy: Strategy, grid: &mut Grid) -> Result<SearchResult> {
    search_with(strategy, grid, &SearchOptions::default())
}

/// Like [`search`], with a fixed seed for the hill-climbing random moves.
pub fn search_seeded(strategy: Strategy, grid: &mut Grid, seed: u64) -> Result<SearchResult> {
    search_with(strategy, grid, &SearchOptions::seeded(seed))
}

pub fn search_with(
    strategy: Strategy,
    grid: &mut Grid,
    options: &SearchOptions,
) -> Result<SearchResult> {
    if grid.has_annotations() {
        warn!(
            "Running {} on a grid that still carries annotations from an earlier run",
            strategy
        );
    }
    let outcome = search_in(strategy, grid, options)?;
    grid.annotate(&outcome);
    Ok(outcome.result)
}
