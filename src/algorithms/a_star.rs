use crate::algorithms::best_first::best_first;
use crate::algorithms::common::{manhattan, SearchAlgorithm, SearchOutcome};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Implements the A* pathfinding algorithm with a Manhattan distance heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    /// Creates a new instance of the A* algorithm provider.
    pub fn new() -> Self {
        AStar
    }
}

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    /// Finds the cheapest path from the grid's start to its goal.
    ///
    /// The open set is ordered by accumulated cost plus the Manhattan
    /// distance to the goal. Every step costs at least 1, so the heuristic
    /// never overestimates and the first time the goal is popped its cost
    /// is optimal.
    fn search(&mut self, grid: &Grid) -> Result<SearchOutcome> {
        grid.validate()?;
        let goal = grid.goal();
        let heuristic = move |p: Position| manhattan(p, goal);
        Ok(best_first(grid, self.name(), Some(&heuristic)))
    }
}
