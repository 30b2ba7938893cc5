//! Error types for terrain_search

use crate::grid::Position;
use thiserror::Error;

/// Which designated endpoint of a grid failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// terrain_search error type
///
/// An unreachable goal is not an error: it comes back as a normal
/// [`SearchResult`](crate::algorithms::SearchResult) with `success == false`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{endpoint} {position:?} is outside the {width}x{height} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        position: Position,
        width: usize,
        height: usize,
    },

    #[error("{endpoint} {position:?} is on an obstacle")]
    BlockedEndpoint {
        endpoint: Endpoint,
        position: Position,
    },

    #[error("Unknown strategy: {0} (expected bfs, uniformCost, aStar or hillClimbing)")]
    UnknownStrategy(String),

    #[error("Unknown map: {0} (expected small, medium, large or dynamic)")]
    UnknownMap(String),

    #[error("Map parse error at line {line}, column {column}: {message}")]
    MapParse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the precondition failures raised by grid validation.
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. } | Error::BlockedEndpoint { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
