//! Static positional evaluation.
//!
//! The score of a position is the sum of the weights of the cells owned by
//! one side minus the weights of the cells owned by the other. The weights
//! are an injected [`WeightMatrix`] so alternative heuristics can be swapped
//! in without touching the board or the search.

use crate::board::{Board, Cell};
use crate::constants::{DEFAULT_WEIGHTS, N};

/// Per-cell weights, read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix([[i32; N]; N]);

impl Default for WeightMatrix {
    /// Corner and edge heavy matrix from [`DEFAULT_WEIGHTS`].
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS)
    }
}

impl WeightMatrix {
    pub fn new(weights: [[i32; N]; N]) -> Self {
        Self(weights)
    }

    /// Every cell worth 1: the score becomes the disc difference.
    pub fn uniform() -> Self {
        Self([[1; N]; N])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.0[row][col]
    }

    /// Upper bound on the magnitude of any score this matrix can produce.
    pub fn magnitude(&self) -> i32 {
        self.0.iter().flatten().map(|w| w.abs()).sum()
    }
}

/// Weighted disc-difference evaluator.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    weights: WeightMatrix,
}

impl Evaluator {
    pub fn new(weights: WeightMatrix) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Score `board` for `perspective`. Empty cells contribute nothing.
    pub fn score(&self, board: &Board, perspective: Cell) -> i32 {
        let mut score = 0;
        for (row, line) in board.grid().iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if !cell.is_color() {
                    continue;
                }
                if cell == perspective {
                    score += self.weights.get(row, col);
                } else {
                    score -= self.weights.get(row, col);
                }
            }
        }
        score
    }
}
