//! Error types shared by the board and the search.

use thiserror::Error;

/// Why a validated move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Row or column is outside the board
    OutOfRange,
    /// Target cell already holds a disc
    Occupied,
    /// No direction outflanks an opposing run
    NoCaptureLine,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::OutOfRange => write!(f, "row or column out of range"),
            IllegalReason::Occupied => write!(f, "position is not empty"),
            IllegalReason::NoCaptureLine => write!(f, "no disc would be flipped"),
        }
    }
}

/// Errors raised by [`Board`](crate::board::Board) and
/// [`SearchEngine`](crate::search::SearchEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReversiError {
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },

    #[error("illegal move: {0}")]
    IllegalMove(IllegalReason),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no legal move for the side to move")]
    NoLegalMove,
}
