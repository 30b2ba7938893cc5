//! Breadth-first, uniform-cost, A* and hill-climbing search over a weighted
//! 2D terrain grid.
//!
//! ```
//! use terrain_search::{search, Grid, Strategy};
//!
//! let mut grid: Grid = "S..\n.#.\n..G".parse().unwrap();
//! let result = search(Strategy::AStar, &mut grid).unwrap();
//! assert!(result.success);
//! assert_eq!(result.path_cost, 8.0);
//!
//! grid.reset_annotations();
//! ```

pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod maps;
pub mod simulation;
pub mod statistics;

pub use algorithms::{
    search, search_in, search_seeded, search_with, SearchOptions, SearchOutcome, SearchResult,
    Strategy,
};
pub use error::{Error, Result};
pub use grid::{reset_annotations, Cell, DynamicObstacle, Grid, Position, Terrain, Waypoint};
