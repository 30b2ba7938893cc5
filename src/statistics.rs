use crate::algorithms::{SearchResult, Strategy};
use std::fmt;
use std::time::Duration;

/// Running totals of one strategy over many maps.
#[derive(Debug, Clone)]
pub struct AlgorithmSummary {
    pub strategy: Strategy,
    pub runs: usize,
    pub successes: usize,
    /// Runs whose cost disagreed with the reference optimum.
    pub suboptimal: usize,
    pub total_cost: f64,
    pub total_nodes_explored: usize,
    pub total_time: Duration,
}

impl AlgorithmSummary {
    pub fn new(strategy: Strategy) -> Self {
        AlgorithmSummary {
            strategy,
            runs: 0,
            successes: 0,
            suboptimal: 0,
            total_cost: 0.0,
            total_nodes_explored: 0,
            total_time: Duration::ZERO,
        }
    }

    /// Adds one run. Cost only counts towards the mean of successful runs.
    pub fn record(&mut self, result: &SearchResult, reference_cost: Option<u32>) {
        self.runs += 1;
        self.total_nodes_explored += result.nodes_explored;
        self.total_time += result.execution_time;

        if result.success {
            self.successes += 1;
            self.total_cost += result.path_cost;
            if let Some(reference) = reference_cost {
                if result.path_cost > f64::from(reference) {
                    self.suboptimal += 1;
                }
            }
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.runs > 0 {
            self.successes as f64 / self.runs as f64
        } else {
            0.0
        }
    }

    pub fn average_cost(&self) -> Option<f64> {
        (self.successes > 0).then(|| self.total_cost / self.successes as f64)
    }

    pub fn average_nodes_explored(&self) -> f64 {
        if self.runs > 0 {
            self.total_nodes_explored as f64 / self.runs as f64
        } else {
            0.0
        }
    }

    pub fn average_time(&self) -> Duration {
        if self.runs > 0 {
            self.total_time / self.runs as u32
        } else {
            Duration::ZERO
        }
    }
}

impl fmt::Display for AlgorithmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Statistics:", self.strategy)?;
        writeln!(f, "Runs: {}", self.runs)?;
        writeln!(
            f,
            "Success rate: {:.1}% ({}/{})",
            self.success_rate() * 100.0,
            self.successes,
            self.runs
        )?;
        match self.average_cost() {
            Some(cost) => writeln!(f, "Average path cost: {:.2}", cost)?,
            None => writeln!(f, "Average path cost: N/A")?,
        }
        writeln!(f, "Average nodes explored: {:.1}", self.average_nodes_explored())?;
        writeln!(f, "Average execution time: {:.2?}", self.average_time())?;

        if self.suboptimal > 0 {
            writeln!(
                f,
                "⚠ {} successful runs were costlier than the reference optimum",
                self.suboptimal
            )?;
        }
        Ok(())
    }
}
