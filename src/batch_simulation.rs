use crate::algorithms::{SearchOptions, Strategy};
use crate::config::Config;
use crate::error::Result;
use crate::maps;
use crate::simulation::Simulation;
use crate::statistics::AlgorithmSummary;
use log::debug;
use std::time::{Duration, Instant};

/// Runs the selected strategies over many seeded `large` maps and keeps
/// per-strategy totals in memory.
pub struct BatchSimulation {
    config: Config,
    strategies: Vec<Strategy>,
    summaries: Vec<AlgorithmSummary>,
    base_seed: u64,
    maps_run: usize,
    maps_skipped: usize,
    start_time: Instant,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Result<Self> {
        let strategies = config.strategies()?;
        let summaries = strategies.iter().map(|&s| AlgorithmSummary::new(s)).collect();
        let base_seed = config.seed.unwrap_or_else(rand::random);

        Ok(BatchSimulation {
            config,
            strategies,
            summaries,
            base_seed,
            maps_run: 0,
            maps_skipped: 0,
            start_time: Instant::now(),
        })
    }

    pub fn summaries(&self) -> &[AlgorithmSummary] {
        &self.summaries
    }

    pub fn maps_run(&self) -> usize {
        self.maps_run
    }

    pub fn maps_skipped(&self) -> usize {
        self.maps_skipped
    }

    pub fn run(&mut self) -> Result<()> {
        if !self.config.quiet {
            println!("=== BATCH SIMULATION STARTED ===");
            println!("Maps: {}", self.config.num_maps);
            println!("Base seed: {} (for reproducibility)", self.base_seed);
            println!("Hill climbing restarts: {}", self.config.restarts);
            println!();
        }

        self.start_time = Instant::now();
        let mut last_progress_report = Instant::now();
        let progress_interval = Duration::from_secs(10);

        for i in 0..self.config.num_maps {
            let seed = self.base_seed.wrapping_add(i as u64);
            let grid = maps::large(Some(seed));
            let options = SearchOptions {
                seed: Some(seed),
                max_restarts: self.config.restarts,
            };
            let mut simulation = Simulation::new(grid, options)?;

            // Maps whose goal is walled off say nothing about path quality.
            if simulation.reference_cost().is_none() {
                debug!("Skipping map {} (seed {}): goal unreachable", i, seed);
                self.maps_skipped += 1;
                continue;
            }

            for (strategy, summary) in self.strategies.iter().zip(self.summaries.iter_mut()) {
                let entry = simulation.run(*strategy)?;
                let reference = match strategy {
                    Strategy::Bfs => None,
                    _ => simulation.reference_cost(),
                };
                summary.record(&entry.result, reference);
            }
            self.maps_run += 1;

            if last_progress_report.elapsed() > progress_interval {
                let progress = (i + 1) as f64 / self.config.num_maps as f64 * 100.0;
                println!(
                    "Progress: {:.1}% ({}/{}) - Elapsed: {:.1}s",
                    progress,
                    i + 1,
                    self.config.num_maps,
                    self.start_time.elapsed().as_secs_f64()
                );
                last_progress_report = Instant::now();
            }
        }

        Ok(())
    }

    pub fn print_summary(&self) {
        println!("\n=== BATCH SIMULATION SUMMARY ===");
        println!(
            "Maps evaluated: {} (skipped {} with an unreachable goal)",
            self.maps_run, self.maps_skipped
        );
        println!("Total time: {:.2?}", self.start_time.elapsed());
        println!();

        for summary in &self.summaries {
            println!("{}", summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn accumulates_one_run_per_map_and_strategy() {
        let config = Config::parse_from([
            "terrain_search",
            "--batch-mode",
            "--num-maps",
            "6",
            "--seed",
            "17",
            "--quiet",
        ]);
        let mut batch = BatchSimulation::new(config).unwrap();
        batch.run().unwrap();

        assert_eq!(batch.maps_run() + batch.maps_skipped(), 6);
        for summary in batch.summaries() {
            assert_eq!(summary.runs, batch.maps_run());
        }

        let by_strategy = |s: Strategy| {
            batch
                .summaries()
                .iter()
                .find(|summary| summary.strategy == s)
                .unwrap()
        };
        assert_eq!(by_strategy(Strategy::AStar).suboptimal, 0);
        assert_eq!(by_strategy(Strategy::UniformCost).suboptimal, 0);
        assert_eq!(
            by_strategy(Strategy::AStar).successes,
            by_strategy(Strategy::Bfs).successes
        );
    }
}
