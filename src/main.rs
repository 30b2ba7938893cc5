use clap::Parser;

use terrain_search::batch_simulation::BatchSimulation;
use terrain_search::config::Config;
use terrain_search::error::Result;
use terrain_search::simulation::Simulation;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    if config.batch_mode {
        let mut batch_sim = BatchSimulation::new(config.clone())?;
        batch_sim.run()?;
        if !config.quiet {
            batch_sim.print_summary();
        }
        return Ok(());
    }

    let strategies = config.strategies()?;
    let grid = config.load_grid()?;

    if !config.quiet {
        println!("Starting grid search...");
        match &config.map_file {
            Some(path) => println!("Map file: {}", path.display()),
            None => println!("Map: {}", config.map),
        }
        println!("Grid size: {}x{}", grid.width(), grid.height());
        println!("Start: {:?}, Goal: {:?}", grid.start(), grid.goal());
        if !grid.dynamic_obstacles().is_empty() {
            println!(
                "Dynamic obstacles: {} (not considered by the search)",
                grid.dynamic_obstacles().len()
            );
        }
        println!();
    }

    let mut simulation = Simulation::new(grid, config.search_options())?;
    let mut results = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        let entry = simulation.run(strategy)?;
        if !config.no_visualization && !config.quiet {
            println!("=== {} ===", entry.result.algorithm);
            println!("{}", simulation.grid());
        }
        results.push(entry);
    }

    Simulation::print_comparison_results(&results);
    Ok(())
}
