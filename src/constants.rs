//! Board geometry, direction offsets and engine defaults.
//!
//! The board is a fixed 8x8 grid addressed by `(row, col)`, row 0 at the top
//! and column 0 on the left.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of cells on the board.
pub const N_SQUARED: usize = N * N;

/// Offsets `(d_row, d_col)` to the 8 neighbouring cells.
/// Order: N, NE, E, SE, S, SW, W, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default number of plies explored before falling back to static evaluation.
pub const DEFAULT_DEPTH: u32 = 4;

/// Positional weights used by the default evaluator.
///
/// Corners can never be flipped back and edge discs can only be flipped along
/// the same edge, so both are worth far more than interior cells.
pub const DEFAULT_WEIGHTS: [[i32; N]; N] = [
    [16, 4, 4, 4, 4, 4, 4, 16],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [4, 1, 1, 1, 1, 1, 1, 4],
    [16, 4, 4, 4, 4, 4, 4, 16],
];

// =============================================================================
// Display Characters
// =============================================================================

/// Black disc.
pub const DISC_BLACK: char = 'X';

/// White disc.
pub const DISC_WHITE: char = 'O';

/// Empty cell.
pub const EMPTY: char = '.';

/// Empty cell where the side to move may play.
pub const PLAYABLE: char = '*';
