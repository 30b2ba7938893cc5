//! Preset maps used by the command line and the batch runner.

use crate::error::{Error, Result};
use crate::grid::{DynamicObstacle, Grid, Position, Terrain, Waypoint};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

pub const PRESET_NAMES: [&str; 4] = ["small", "medium", "large", "dynamic"];

/// Fraction of cells the large map tries to turn into obstacles.
const LARGE_OBSTACLE_DENSITY: f64 = 0.15;

/// Looks a preset up by name. `seed` only affects the `large` map.
pub fn preset(name: &str, seed: Option<u64>) -> Result<Grid> {
    match name {
        "small" => Ok(small()),
        "medium" => Ok(medium()),
        "large" => Ok(large(seed)),
        "dynamic" => Ok(dynamic()),
        other => Err(Error::UnknownMap(other.to_string())),
    }
}

fn paint(grid: &mut Grid, cells: &[(usize, usize)], terrain: Terrain) {
    for &(x, y) in cells {
        grid.set_terrain(Position::new(x, y), terrain);
    }
}

/// Paints the rectangle `xs` x `ys`, leaving non-empty cells alone.
fn paint_empty(grid: &mut Grid, xs: Range<usize>, ys: Range<usize>, terrain: Terrain) {
    for x in xs {
        for y in ys.clone() {
            let pos = Position::new(x, y);
            if grid.terrain(pos) == Some(Terrain::Empty) {
                grid.set_terrain(pos, terrain);
            }
        }
    }
}

fn roads(grid: &mut Grid, rows: &[usize], columns: &[usize]) {
    for &y in rows {
        for x in 0..grid.width() {
            grid.set_terrain(Position::new(x, y), Terrain::Road);
        }
    }
    for &x in columns {
        for y in 0..grid.height() {
            grid.set_terrain(Position::new(x, y), Terrain::Road);
        }
    }
}

/// 10x10 open field with three short walls and a grass band.
pub fn small() -> Grid {
    let mut grid = Grid::new(10, 10);
    paint(
        &mut grid,
        &[(2, 2), (3, 2), (4, 2), (6, 4), (6, 5), (6, 6), (2, 7), (3, 7)],
        Terrain::Obstacle,
    );
    paint_empty(&mut grid, 0..3, 4..6, Terrain::Grass);
    grid.set_start(Position::new(1, 1));
    grid.set_goal(Position::new(8, 8));
    grid
}

/// 15x15 road network with obstacle blocks, a lake and a meadow.
pub fn medium() -> Grid {
    let mut grid = Grid::new(15, 15);
    roads(&mut grid, &[3, 7, 11], &[4, 10]);
    paint(
        &mut grid,
        &[
            (2, 1),
            (2, 2),
            (5, 5),
            (5, 6),
            (6, 5),
            (6, 6),
            (8, 1),
            (8, 2),
            (9, 1),
            (9, 2),
            (12, 8),
            (12, 9),
            (13, 8),
            (13, 9),
        ],
        Terrain::Obstacle,
    );
    paint_empty(&mut grid, 1..4, 8..11, Terrain::Water);
    paint_empty(&mut grid, 11..14, 4..7, Terrain::Grass);
    grid.set_start(Position::new(1, 1));
    grid.set_goal(Position::new(13, 13));
    grid
}

/// 20x20 random terrain crossed by a road grid and scattered obstacles.
/// The same seed always gives the same map.
pub fn large(seed: Option<u64>) -> Grid {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (width, height) = (20, 20);
    let start = Position::new(1, 1);
    let goal = Position::new(18, 18);
    let mut grid = Grid::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let roll: f64 = rng.gen();
            let terrain = if roll < 0.6 {
                Terrain::Empty
            } else if roll < 0.75 {
                Terrain::Grass
            } else if roll < 0.85 {
                Terrain::Water
            } else {
                Terrain::Road
            };
            grid.set_terrain(Position::new(x, y), terrain);
        }
    }

    roads(&mut grid, &[5, 10, 15], &[5, 10, 15]);

    let num_obstacles = (width as f64 * height as f64 * LARGE_OBSTACLE_DENSITY) as usize;
    for _ in 0..num_obstacles {
        let pos = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if pos != start && pos != goal {
            grid.set_terrain(pos, Terrain::Obstacle);
        }
    }

    debug!("Generated large map (seed {:?})", seed);
    grid.set_start(start);
    grid.set_goal(goal);
    grid
}

/// The medium map with two vehicles patrolling its roads.
pub fn dynamic() -> Grid {
    let mut grid = medium();
    grid.add_dynamic_obstacle(patrol("vehicle1", 2, &[(4, 1), (4, 3), (4, 7), (4, 11), (4, 13)]));
    grid.add_dynamic_obstacle(patrol("vehicle2", 3, &[(1, 7), (4, 7), (7, 7), (10, 7), (13, 7)]));
    grid
}

/// Builds an out-and-back schedule over `stops`, one stop every `interval`
/// time units.
fn patrol(id: &str, interval: u32, stops: &[(usize, usize)]) -> DynamicObstacle {
    let route = stops.iter().chain(stops.iter().rev().skip(1));
    let schedule: Vec<Waypoint> = route
        .zip(0u32..)
        .map(|(&(x, y), i)| Waypoint {
            position: Position::new(x, y),
            time: i * interval,
        })
        .collect();
    let (x, y) = stops[0];

    DynamicObstacle {
        id: id.to_string(),
        position: Position::new(x, y),
        schedule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for name in PRESET_NAMES {
            let grid = preset(name, Some(11)).unwrap();
            assert!(grid.validate().is_ok(), "{} has invalid endpoints", name);
        }
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(preset("huge", None), Err(Error::UnknownMap(_))));
    }

    #[test]
    fn large_map_is_reproducible() {
        let a = large(Some(5));
        let b = large(Some(5));
        let terrain = |g: &Grid| g.cells().iter().map(|c| c.terrain).collect::<Vec<_>>();
        assert_eq!(terrain(&a), terrain(&b));
    }

    #[test]
    fn medium_roads_cross_the_map() {
        let grid = medium();
        assert_eq!(grid.terrain(Position::new(0, 3)), Some(Terrain::Road));
        assert_eq!(grid.terrain(Position::new(4, 14)), Some(Terrain::Road));
        assert_eq!(grid.terrain(Position::new(2, 9)), Some(Terrain::Water));
        assert_eq!(grid.terrain(Position::new(12, 5)), Some(Terrain::Grass));
    }

    #[test]
    fn dynamic_schedules_go_out_and_back() {
        let grid = dynamic();
        let vehicles = grid.dynamic_obstacles();
        assert_eq!(vehicles.len(), 2);

        let first = &vehicles[0];
        assert_eq!(first.id, "vehicle1");
        assert_eq!(first.schedule.len(), 9);
        assert_eq!(first.schedule[4].position, Position::new(4, 13));
        assert_eq!(first.schedule[8].position, Position::new(4, 1));
        assert_eq!(first.schedule[8].time, 16);
        assert_eq!(vehicles[1].schedule[8].time, 24);
    }
}
