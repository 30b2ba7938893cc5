use crate::algorithms::best_first::best_first;
use crate::algorithms::common::{SearchAlgorithm, SearchOutcome};
use crate::error::Result;
use crate::grid::Grid;

/// Uniform-cost search (Dijkstra). Finds the path with the lowest total
/// terrain cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformCost;

impl UniformCost {
    pub fn new() -> Self {
        UniformCost
    }
}

impl SearchAlgorithm for UniformCost {
    fn name(&self) -> &'static str {
        "Uniform Cost Search"
    }

    fn search(&mut self, grid: &Grid) -> Result<SearchOutcome> {
        grid.validate()?;
        Ok(best_first(grid, self.name(), None))
    }
}
