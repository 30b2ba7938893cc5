use crate::algorithms::{search_with, terrain_cost, SearchOptions, SearchResult, Strategy};
use crate::error::Result;
use crate::grid::{Grid, Position};
use log::{info, warn};
use pathfinding::prelude::{bfs, dijkstra};

/// Outcome of one strategy inside a comparison session.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub strategy: Strategy,
    pub result: SearchResult,
    /// Terrain cost of the returned path, which for BFS differs from the
    /// step count it reports as `path_cost`.
    pub terrain_cost: Option<u32>,
    /// Whether the result agrees with the reference solver. `None` for
    /// strategies that make no optimality promise.
    pub matches_reference: Option<bool>,
}

/// Cheapest terrain cost from start to goal, computed independently with
/// the `pathfinding` crate.
pub fn reference_cost(grid: &Grid) -> Option<u32> {
    let goal = grid.goal();
    dijkstra(
        &grid.start(),
        |p| {
            grid.neighbors(p)
                .into_iter()
                .filter_map(|n| grid.cost(n).map(|cost| (n, cost)))
                .collect::<Vec<_>>()
        },
        |p| *p == goal,
    )
    .map(|(_, cost)| cost)
}

/// Fewest moves from start to goal, ignoring terrain cost.
pub fn reference_steps(grid: &Grid) -> Option<usize> {
    let goal = grid.goal();
    bfs(
        &grid.start(),
        |p| {
            grid.neighbors(p)
                .into_iter()
                .filter(|n| grid.is_traversable(*n))
                .collect::<Vec<Position>>()
        },
        |p| *p == goal,
    )
    .map(|path| path.len() - 1)
}

/// Runs strategies one after another on the same grid, resetting the cell
/// annotations before each run.
pub struct Simulation {
    grid: Grid,
    options: SearchOptions,
    reference_cost: Option<u32>,
    reference_steps: Option<usize>,
}

impl Simulation {
    pub fn new(grid: Grid, options: SearchOptions) -> Result<Self> {
        grid.validate()?;
        let reference_cost = reference_cost(&grid);
        let reference_steps = reference_steps(&grid);

        match reference_cost {
            Some(cost) => info!(
                "Reference optimum: cost {} from {:?} to {:?}",
                cost,
                grid.start(),
                grid.goal()
            ),
            None => info!("Goal {:?} is unreachable from {:?}", grid.goal(), grid.start()),
        }

        Ok(Simulation {
            grid,
            options,
            reference_cost,
            reference_steps,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn reference_cost(&self) -> Option<u32> {
        self.reference_cost
    }

    pub fn reference_steps(&self) -> Option<usize> {
        self.reference_steps
    }

    /// Resets the grid and runs `strategy`. The grid keeps the annotations
    /// of this run until the next one.
    pub fn run(&mut self, strategy: Strategy) -> Result<AlgorithmResult> {
        self.grid.reset_annotations();
        let result = search_with(strategy, &mut self.grid, &self.options)?;
        let terrain_cost = terrain_cost(&self.grid, &result.path).filter(|_| result.success);

        let matches_reference = match strategy {
            Strategy::Bfs => Some(result.success.then(|| result.steps()) == self.reference_steps),
            Strategy::UniformCost | Strategy::AStar => Some(
                result.success.then(|| result.path_cost) == self.reference_cost.map(f64::from),
            ),
            Strategy::HillClimbing => None,
        };
        if matches_reference == Some(false) {
            warn!(
                "{} disagrees with the reference solver (cost {}, reference {:?})",
                result.algorithm, result.path_cost, self.reference_cost
            );
        }

        Ok(AlgorithmResult {
            strategy,
            result,
            terrain_cost,
            matches_reference,
        })
    }

    pub fn run_all(&mut self, strategies: &[Strategy]) -> Result<Vec<AlgorithmResult>> {
        strategies.iter().map(|&s| self.run(s)).collect()
    }

    /// Print comparison results in a table followed by a short analysis
    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();

        println!(
            "{:<20} {:<8} {:<10} {:<12} {:<8} {:<15} {:<12}",
            "Algorithm", "Success", "Cost", "Terrain", "Steps", "Nodes Explored", "Time"
        );
        println!("{}", "-".repeat(90));

        for entry in results {
            let result = &entry.result;
            let success_str = if result.success { "✓" } else { "✗" };
            let cost_str = if result.success {
                format!("{:.2}", result.path_cost)
            } else {
                "N/A".to_string()
            };
            let terrain_str = match entry.terrain_cost {
                Some(cost) => cost.to_string(),
                None => "N/A".to_string(),
            };
            let check = match entry.matches_reference {
                Some(false) => " ⚠ differs from reference",
                _ => "",
            };

            println!(
                "{:<20} {:<8} {:<10} {:<12} {:<8} {:<15} {:<12}{}",
                result.algorithm,
                success_str,
                cost_str,
                terrain_str,
                result.steps(),
                result.nodes_explored,
                format!("{:.2?}", result.execution_time),
                check
            );
        }

        println!();

        let successful: Vec<_> = results.iter().filter(|r| r.result.success).collect();
        if successful.is_empty() {
            println!("No algorithm reached the goal.");
            return;
        }

        println!("=== PERFORMANCE ANALYSIS ===");

        if let Some(best) = successful
            .iter()
            .filter_map(|r| r.terrain_cost.map(|cost| (cost, r)))
            .min_by_key(|(cost, _)| *cost)
        {
            println!("Best path cost: {} ({})", best.0, best.1.result.algorithm);
        }
        if let Some(fewest) = results.iter().min_by_key(|r| r.result.nodes_explored) {
            println!(
                "Fewest nodes explored: {} ({})",
                fewest.result.nodes_explored, fewest.result.algorithm
            );
        }
        if let Some(fastest) = results.iter().min_by_key(|r| r.result.execution_time) {
            println!(
                "Fastest execution: {:.2?} ({})",
                fastest.result.execution_time, fastest.result.algorithm
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Terrain;

    fn corridor() -> Grid {
        "\
        S.....
        .####.
        .wwww.
        .....G"
            .parse()
            .unwrap()
    }

    #[test]
    fn reference_solvers_agree_with_hand_count() {
        let grid = corridor();
        assert_eq!(reference_steps(&grid), Some(8));
        assert_eq!(reference_cost(&grid), Some(16));
    }

    #[test]
    fn run_all_checks_against_reference() {
        let mut simulation = Simulation::new(corridor(), SearchOptions::seeded(9)).unwrap();
        let results = simulation.run_all(&Strategy::ALL).unwrap();

        assert_eq!(results.len(), 4);
        for entry in &results[..3] {
            assert_eq!(entry.matches_reference, Some(true), "{}", entry.strategy);
        }
        assert_eq!(results[3].matches_reference, None);
        assert_eq!(results[1].terrain_cost, Some(16));
    }

    #[test]
    fn grid_only_shows_the_latest_run() {
        let mut simulation = Simulation::new(corridor(), SearchOptions::seeded(9)).unwrap();
        simulation.run(Strategy::Bfs).unwrap();
        let result = simulation.run(Strategy::AStar).unwrap().result;

        let on_path = simulation
            .grid()
            .cells()
            .iter()
            .filter(|c| c.annotation.on_path)
            .count();
        assert_eq!(on_path, result.path.len());
    }

    #[test]
    fn unreachable_goal_matches_reference() {
        let mut grid = corridor();
        grid.set_terrain(Position::new(4, 3), Terrain::Obstacle);
        grid.set_terrain(Position::new(5, 2), Terrain::Obstacle);
        let mut simulation = Simulation::new(grid, SearchOptions::seeded(1)).unwrap();
        assert_eq!(simulation.reference_cost(), None);

        let results = simulation.run_all(&Strategy::ALL).unwrap();
        assert!(results.iter().all(|r| !r.result.success));
        assert!(results[..3].iter().all(|r| r.matches_reference == Some(true)));
    }
}
