use crate::algorithms::common::{
    reconstruct_path, SearchAlgorithm, SearchOutcome, SearchResult, SearchTrace,
};
use crate::error::Result;
use crate::grid::Grid;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::time::Instant;

/// Breadth-first search. Every traversable step counts as 1, so the path has
/// the fewest moves but not necessarily the lowest terrain cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn search(&mut self, grid: &Grid) -> Result<SearchOutcome> {
        grid.validate()?;
        let started = Instant::now();
        let (start, goal) = (grid.start(), grid.goal());

        let mut search_trace = SearchTrace::default();
        let mut queue = VecDeque::from([start]);
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut nodes_explored = 0;

        while let Some(current) = queue.pop_front() {
            nodes_explored += 1;
            search_trace.explored.push(current);
            trace!("BFS expanding {:?}", current);

            if current == goal {
                let path = reconstruct_path(&search_trace.predecessors, start, goal);
                let steps = path.len().saturating_sub(1) as u32;
                debug!(
                    "BFS reached goal in {} steps after exploring {} nodes",
                    steps, nodes_explored
                );
                let result = SearchResult::found(
                    self.name(),
                    path,
                    steps,
                    nodes_explored,
                    started.elapsed(),
                );
                return Ok(SearchOutcome {
                    result,
                    trace: search_trace,
                });
            }

            for neighbor in grid.neighbors(&current) {
                if !grid.is_traversable(neighbor) || !visited.insert(neighbor) {
                    continue;
                }
                search_trace.predecessors.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }

        debug!("BFS exhausted frontier after {} nodes", nodes_explored);
        Ok(SearchOutcome {
            result: SearchResult::not_found(self.name(), nodes_explored, started.elapsed()),
            trace: search_trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn counts_steps_not_terrain() {
        let grid: Grid = "SwwG".parse().unwrap();
        let outcome = BreadthFirst::new().search(&grid).unwrap();
        assert!(outcome.result.success);
        assert_eq!(outcome.result.path_cost, 3.0);
        assert_eq!(outcome.result.path.len(), 4);
    }

    #[test]
    fn takes_the_shortest_detour() {
        let grid: Grid = "\
            S#.
            .#.
            ..G"
        .parse()
        .unwrap();
        let outcome = BreadthFirst::new().search(&grid).unwrap();
        assert_eq!(
            outcome.result.path,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
        assert_eq!(outcome.result.path_cost, 4.0);
    }

    #[test]
    fn explores_whole_component_when_goal_is_walled_off() {
        let grid: Grid = "\
            S..#.
            ...#G"
            .parse()
            .unwrap();
        let outcome = BreadthFirst::new().search(&grid).unwrap();
        assert!(!outcome.result.success);
        assert_eq!(outcome.result.nodes_explored, 6);
        assert!(outcome.result.path_cost.is_infinite());
    }

    #[test]
    fn never_enqueues_obstacles() {
        let grid: Grid = "S#\n.G".parse().unwrap();
        let outcome = BreadthFirst::new().search(&grid).unwrap();
        assert!(!outcome.trace.explored.contains(&Position::new(1, 0)));
        assert!(!outcome.trace.predecessors.contains_key(&Position::new(1, 0)));
    }
}
