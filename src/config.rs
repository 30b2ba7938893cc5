use crate::algorithms::{SearchOptions, Strategy, DEFAULT_MAX_RESTARTS};
use crate::error::Result;
use crate::grid::Grid;
use crate::maps;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Preset map: small, medium, large or dynamic
    #[arg(long, default_value = "small")]
    pub map: String,

    /// Text map file, overrides --map
    #[arg(long)]
    pub map_file: Option<PathBuf>,

    /// bfs, uniformCost, aStar, hillClimbing or all
    #[arg(long, default_value = "all")]
    pub algorithm: String,

    /// Seed for the large map and for hill climbing
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_MAX_RESTARTS)]
    pub restarts: usize,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 100)]
    pub num_maps: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    /// Strategies selected by `--algorithm`, in run order.
    pub fn strategies(&self) -> Result<Vec<Strategy>> {
        if self.algorithm == "all" {
            return Ok(Strategy::ALL.to_vec());
        }
        Ok(vec![self.algorithm.parse()?])
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            seed: self.seed,
            max_restarts: self.restarts,
        }
    }

    pub fn load_grid(&self) -> Result<Grid> {
        match &self.map_file {
            Some(path) => std::fs::read_to_string(path)?.parse(),
            None => maps::preset(&self.map, self.seed),
        }
    }
}
