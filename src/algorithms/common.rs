use crate::error::Result;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Record handed back to the caller after one strategy run.
///
/// Only built through [`SearchResult::found`] and [`SearchResult::not_found`],
/// so `success == !path.is_empty()` and a failed run always has an infinite
/// `path_cost`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Start to goal inclusive, empty when no path was found.
    pub path: Vec<Position>,
    pub nodes_explored: usize,
    pub path_cost: f64,
    pub execution_time: Duration,
    pub algorithm: &'static str,
    pub success: bool,
}

impl SearchResult {
    pub fn found(
        algorithm: &'static str,
        path: Vec<Position>,
        path_cost: u32,
        nodes_explored: usize,
        execution_time: Duration,
    ) -> Self {
        if path.is_empty() {
            return Self::not_found(algorithm, nodes_explored, execution_time);
        }
        SearchResult {
            path,
            nodes_explored,
            path_cost: f64::from(path_cost),
            execution_time,
            algorithm,
            success: true,
        }
    }

    pub fn not_found(
        algorithm: &'static str,
        nodes_explored: usize,
        execution_time: Duration,
    ) -> Self {
        SearchResult {
            path: Vec::new(),
            nodes_explored,
            path_cost: f64::INFINITY,
            execution_time,
            algorithm,
            success: false,
        }
    }

    /// Number of moves along the path, 0 for a failed search.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Per-run search state, keyed by coordinate and owned by a single run.
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub g_scores: FxHashMap<Position, u32>,
    pub f_scores: FxHashMap<Position, u32>,
    pub predecessors: FxHashMap<Position, Position>,
    /// Cells in the order they were expanded.
    pub explored: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub trace: SearchTrace,
}

pub trait SearchAlgorithm {
    /// Label reported in [`SearchResult::algorithm`].
    fn name(&self) -> &'static str;

    /// Searches from the grid's start to its goal.
    ///
    /// Fails only when the start or goal is out of bounds or on an obstacle;
    /// an unreachable goal is reported through the result.
    fn search(&mut self, grid: &Grid) -> Result<SearchOutcome>;
}

/// Manhattan distance. Admissible and consistent on a 4-connected grid whose
/// step costs are all at least 1.
pub fn manhattan(a: Position, b: Position) -> u32 {
    (a.x.abs_diff(b.x) + a.y.abs_diff(b.y)) as u32
}

/// Walks the predecessor chain back from `goal` and returns it start first.
///
/// Returns an empty path if the chain does not end at `start`, which is the
/// case when `goal` was never reached.
pub fn reconstruct_path(
    predecessors: &FxHashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&previous) = predecessors.get(&current) {
        path.push(previous);
        current = previous;
    }

    if current != start {
        return Vec::new();
    }
    path.reverse();
    path
}

/// Sum of the terrain costs of every cell of `path` after the first one.
/// `None` if the path crosses an obstacle or leaves the grid.
pub fn terrain_cost(grid: &Grid, path: &[Position]) -> Option<u32> {
    path.iter().skip(1).map(|&p| grid.cost(p)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Terrain;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(1, 5);
        let b = Position::new(4, 2);
        assert_eq!(manhattan(a, b), 6);
        assert_eq!(manhattan(b, a), 6);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn reconstruct_walks_back_to_start() {
        let mut predecessors = FxHashMap::default();
        predecessors.insert(Position::new(1, 0), Position::new(0, 0));
        predecessors.insert(Position::new(2, 0), Position::new(1, 0));

        let path = reconstruct_path(&predecessors, Position::new(0, 0), Position::new(2, 0));
        assert_eq!(
            path,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn reconstruct_is_empty_for_unvisited_goal() {
        let mut predecessors = FxHashMap::default();
        predecessors.insert(Position::new(1, 0), Position::new(0, 0));

        let path = reconstruct_path(&predecessors, Position::new(0, 0), Position::new(5, 5));
        assert!(path.is_empty());
    }

    #[test]
    fn reconstruct_start_equals_goal() {
        let predecessors = FxHashMap::default();
        let p = Position::new(3, 3);
        assert_eq!(reconstruct_path(&predecessors, p, p), vec![p]);
    }

    #[test]
    fn failed_result_has_infinite_cost() {
        let result = SearchResult::not_found("BFS", 7, Duration::ZERO);
        assert!(!result.success);
        assert!(result.path.is_empty());
        assert!(result.path_cost.is_infinite());

        let empty = SearchResult::found("BFS", Vec::new(), 4, 7, Duration::ZERO);
        assert!(!empty.success);
        assert!(empty.path_cost.is_infinite());
    }

    #[test]
    fn terrain_cost_skips_start_cell() {
        let mut grid = Grid::new(3, 1);
        grid.set_terrain(Position::new(0, 0), Terrain::Water);
        grid.set_terrain(Position::new(1, 0), Terrain::Road);
        let path = [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
        assert_eq!(terrain_cost(&grid, &path), Some(3));

        grid.set_terrain(Position::new(2, 0), Terrain::Obstacle);
        assert_eq!(terrain_cost(&grid, &path), None);
    }
}
