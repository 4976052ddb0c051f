//! Error type of the maze library

use std::error::Error;
use std::fmt;

/// Things that can go wrong when building or querying a maze.
///
/// "No path" is not an error: path searches return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Malformed input from the caller.
    InvalidArgument(String),

    /// Retry ceiling was reached before a solvable maze was generated.
    GenerationExhausted {
        /// Number of rejected candidates.
        attempts: usize,
    },

    /// Character in an emoji maze that is not part of the alphabet.
    UnexpectedSymbol { symbol: char, row: usize, col: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidArgument(reason) => write!(f, "Invalid argument: {}", reason),
            MazeError::GenerationExhausted { attempts } => write!(
                f,
                "No solvable maze found in {} attempts, try a lower obstacle density",
                attempts
            ),
            MazeError::UnexpectedSymbol { symbol, row, col } => write!(
                f,
                "Unexpected character `{}` at row={}, col={}",
                symbol, row, col
            ),
        }
    }
}

impl Error for MazeError {}
