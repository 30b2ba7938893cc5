use crate::algorithms::common::{
    manhattan, terrain_cost, SearchAlgorithm, SearchOutcome, SearchResult, SearchTrace,
};
use crate::error::Result;
use crate::grid::{Grid, Position};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::time::Instant;

pub const DEFAULT_MAX_RESTARTS: usize = 5;
pub const DEFAULT_MAX_PATH_LEN: usize = 1000;

/// Greedy descent on the Manhattan distance to the goal, with random moves
/// to leave plateaus and local minima, restarted a fixed number of times.
///
/// Neither complete nor optimal: it can miss an existing path and usually
/// returns a more expensive one than uniform-cost search or A*.
pub struct HillClimbing<R: Rng = StdRng> {
    rng: R,
    max_restarts: usize,
    max_path_len: usize,
}

/// Result of a single climb.
struct Attempt {
    path: Vec<Position>,
    cost: Option<u32>,
    nodes_explored: usize,
}

impl HillClimbing<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HillClimbing<R> {
    pub fn new(rng: R) -> Self {
        HillClimbing {
            rng,
            max_restarts: DEFAULT_MAX_RESTARTS,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }

    pub fn with_max_restarts(mut self, max_restarts: usize) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Longest path, in cells, an attempt may build before it is abandoned.
    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    fn climb(&mut self, grid: &Grid, touched: &mut FxHashSet<Position>) -> Attempt {
        let goal = grid.goal();
        let mut current = grid.start();
        let mut path = vec![current];
        let mut visited = FxHashSet::default();
        let mut nodes_explored = 0;
        touched.insert(current);

        let failed = |nodes_explored| Attempt {
            path: Vec::new(),
            cost: None,
            nodes_explored,
        };

        while current != goal {
            visited.insert(current);

            let candidates: Vec<Position> = grid
                .neighbors(&current)
                .into_iter()
                .filter(|n| grid.is_traversable(*n) && !visited.contains(n))
                .collect();

            let Some(&best) = candidates.iter().min_by_key(|n| manhattan(**n, goal)) else {
                trace!("Hill climbing stuck at {:?}", current);
                return failed(nodes_explored);
            };

            let next = if manhattan(best, goal) >= manhattan(current, goal) {
                candidates[self.rng.gen_range(0..candidates.len())]
            } else {
                best
            };

            current = next;
            path.push(current);
            touched.insert(current);
            nodes_explored += 1;

            if current != goal && path.len() > self.max_path_len {
                trace!("Hill climbing gave up after {} cells", path.len());
                return failed(nodes_explored);
            }
        }

        let cost = terrain_cost(grid, &path);
        Attempt {
            path,
            cost,
            nodes_explored,
        }
    }
}

impl<R: Rng> SearchAlgorithm for HillClimbing<R> {
    fn name(&self) -> &'static str {
        "Hill Climbing"
    }

    fn search(&mut self, grid: &Grid) -> Result<SearchOutcome> {
        grid.validate()?;
        let started = Instant::now();

        let mut touched = FxHashSet::default();
        let mut best: Option<(Vec<Position>, u32)> = None;
        let mut nodes_explored = 0;

        for restart in 0..self.max_restarts {
            let attempt = self.climb(grid, &mut touched);
            nodes_explored += attempt.nodes_explored;

            let Some(cost) = attempt.cost else {
                debug!("Hill climbing attempt {} failed", restart + 1);
                continue;
            };
            debug!("Hill climbing attempt {} reached goal with cost {}", restart + 1, cost);
            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((attempt.path, cost));
            }
        }

        let mut search_trace = SearchTrace::default();
        let mut explored: Vec<Position> = touched.into_iter().collect();
        explored.sort();
        search_trace.explored = explored;

        let result = match best {
            Some((path, cost)) => {
                let mut g = 0;
                search_trace.g_scores.insert(path[0], 0);
                for pair in path.windows(2) {
                    g += grid.cost(pair[1]).unwrap_or(0);
                    search_trace.predecessors.insert(pair[1], pair[0]);
                    search_trace.g_scores.insert(pair[1], g);
                }
                SearchResult::found(self.name(), path, cost, nodes_explored, started.elapsed())
            }
            None => SearchResult::not_found(self.name(), nodes_explored, started.elapsed()),
        };

        Ok(SearchOutcome {
            result,
            trace: search_trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_straight_down_an_open_slope() {
        let grid = Grid::new(5, 1);
        let outcome = HillClimbing::seeded(7).search(&grid).unwrap();
        assert!(outcome.result.success);
        assert_eq!(outcome.result.path.len(), 5);
        assert_eq!(outcome.result.path_cost, 8.0);
        // Five attempts, four moves each.
        assert_eq!(outcome.result.nodes_explored, 20);
    }

    #[test]
    fn start_equals_goal_explores_nothing() {
        let mut grid = Grid::new(4, 4);
        grid.set_goal(Position::new(0, 0));
        let outcome = HillClimbing::seeded(1).search(&grid).unwrap();
        assert!(outcome.result.success);
        assert_eq!(outcome.result.path, vec![Position::new(0, 0)]);
        assert_eq!(outcome.result.path_cost, 0.0);
        assert_eq!(outcome.result.nodes_explored, 0);
    }

    #[test]
    fn dead_end_fails_every_attempt() {
        let grid: Grid = "S.#G".parse().unwrap();
        let outcome = HillClimbing::seeded(3).search(&grid).unwrap();
        assert!(!outcome.result.success);
        assert!(outcome.result.path.is_empty());
        assert!(outcome.result.path_cost.is_infinite());
        assert_eq!(outcome.result.nodes_explored, 5);
    }

    #[test]
    fn step_cap_abandons_long_walks() {
        let grid = Grid::new(6, 1);
        let outcome = HillClimbing::seeded(3)
            .with_max_path_len(3)
            .search(&grid)
            .unwrap();
        assert!(!outcome.result.success);
    }

    #[test]
    fn same_seed_same_result() {
        let grid: Grid = "\
            S.....
            .####.
            .#..#.
            .#G.#.
            .##.#.
            ......"
            .parse()
            .unwrap();
        let a = HillClimbing::seeded(42).search(&grid).unwrap().result;
        let b = HillClimbing::seeded(42).search(&grid).unwrap().result;
        assert_eq!(a.path, b.path);
        assert_eq!(a.nodes_explored, b.nodes_explored);
        assert_eq!(a.success, b.success);
    }

    #[test]
    fn zero_restarts_reports_failure() {
        let grid = Grid::new(3, 3);
        let outcome = HillClimbing::seeded(0)
            .with_max_restarts(0)
            .search(&grid)
            .unwrap();
        assert!(!outcome.result.success);
        assert_eq!(outcome.result.nodes_explored, 0);
    }
}
