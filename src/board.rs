//! Reversi board state, move legality and disc flipping.
//!
//! A [`Board`] is a plain value: cloning it yields a fully independent game
//! state, which is what the search relies on when it explores a branch.
//!
//! Coordinates are `(row, col)` with row 0 at the top. The text notation used
//! by [`parse_coord`] and `Move`'s `Display` is column letter plus row number,
//! so `(2, 3)` is `d3`.

use std::fmt;

use crate::constants::{
    DIRECTIONS, DISC_BLACK, DISC_WHITE, EMPTY, N, N_SQUARED, PLAYABLE,
};
use crate::error::{IllegalReason, ReversiError};

/// Content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// The other color.
    ///
    /// # Errors
    /// `InvalidState` when called on `Empty`.
    pub fn opposite(self) -> Result<Cell, ReversiError> {
        match self {
            Cell::Black => Ok(Cell::White),
            Cell::White => Ok(Cell::Black),
            Cell::Empty => Err(ReversiError::InvalidState(
                "empty cell has no opposite color".to_string(),
            )),
        }
    }

    /// True for `Black` and `White`.
    #[inline]
    pub fn is_color(self) -> bool {
        self != Cell::Empty
    }

    fn to_char(self) -> char {
        match self {
            Cell::Black => DISC_BLACK,
            Cell::White => DISC_WHITE,
            Cell::Empty => EMPTY,
        }
    }

    fn from_char(c: char) -> Option<Cell> {
        match c {
            DISC_BLACK => Some(Cell::Black),
            DISC_WHITE => Some(Cell::White),
            EMPTY => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::Black => "black",
            Cell::White => "white",
            Cell::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// A placement target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row >= N || self.col >= N {
            return write!(f, "({}, {})", self.row, self.col);
        }
        let col = char::from(b'a' + self.col as u8);
        write!(f, "{col}{}", self.row + 1)
    }
}

/// Parse a coordinate such as `d3` (column `a`-`h`, row `1`-`8`).
///
/// # Errors
/// `IllegalMove(OutOfRange)` for anything that is not a square on the board.
pub fn parse_coord(s: &str) -> Result<Move, ReversiError> {
    let bad = ReversiError::IllegalMove(IllegalReason::OutOfRange);
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(bad);
    }

    let col_char = bytes[0].to_ascii_lowercase();
    let row_char = bytes[1];
    if !(b'a'..b'a' + N as u8).contains(&col_char) || !(b'1'..b'1' + N as u8).contains(&row_char)
    {
        return Err(bad);
    }

    Ok(Move::new((row_char - b'1') as usize, (col_char - b'a') as usize))
}

/// Who won a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    Black,
    White,
    Draw,
}

/// Game status, recomputed from the board on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Finished(Winner),
}

impl GameOutcome {
    pub fn is_finished(self) -> bool {
        matches!(self, GameOutcome::Finished(_))
    }
}

/// A Reversi position: grid, disc counts and the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; N]; N],
    black: u32,
    white: u32,
    to_move: Cell,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position: four center discs split diagonally,
    /// Black to move.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; N]; N];
        for row in N / 2 - 1..=N / 2 {
            for col in N / 2 - 1..=N / 2 {
                cells[row][col] = if (row + col) % 2 == 0 {
                    Cell::White
                } else {
                    Cell::Black
                };
            }
        }
        Self {
            cells,
            black: 2,
            white: 2,
            to_move: Cell::Black,
        }
    }

    /// Build a board from 8 rows of `X` (black), `O` (white) and `.` (empty).
    ///
    /// Disc counts are derived from the grid. Intended for test fixtures and
    /// analysis; a live game always starts from [`Board::new`].
    ///
    /// # Errors
    /// `InvalidState` on a wrong shape, an unknown character, or an empty
    /// `to_move`.
    pub fn from_rows(rows: &[&str], to_move: Cell) -> Result<Self, ReversiError> {
        if !to_move.is_color() {
            return Err(ReversiError::InvalidState(
                "side to move must be black or white".to_string(),
            ));
        }
        if rows.len() != N {
            return Err(ReversiError::InvalidState(format!(
                "expected {N} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self {
            cells: [[Cell::Empty; N]; N],
            black: 0,
            white: 0,
            to_move,
        };
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != N {
                return Err(ReversiError::InvalidState(format!(
                    "row {row} has {} cells, expected {N}",
                    chars.len()
                )));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| {
                    ReversiError::InvalidState(format!("unknown cell character {ch:?}"))
                })?;
                match cell {
                    Cell::Black => board.black += 1,
                    Cell::White => board.white += 1,
                    Cell::Empty => {}
                }
                board.cells[row][col] = cell;
            }
        }
        Ok(board)
    }

    /// Cell content at `(row, col)`.
    ///
    /// # Errors
    /// `OutOfRange` if either index is outside the board.
    pub fn position(&self, row: usize, col: usize) -> Result<Cell, ReversiError> {
        if row >= N || col >= N {
            return Err(ReversiError::OutOfRange { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// The whole grid, row-major.
    pub fn grid(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// `(black, white)` disc counts.
    pub fn counts(&self) -> (u32, u32) {
        (self.black, self.white)
    }

    /// Total number of discs on the board.
    pub fn total(&self) -> u32 {
        self.black + self.white
    }

    /// The color whose turn it is.
    pub fn current_player(&self) -> Cell {
        self.to_move
    }

    /// The color not on move.
    pub fn opponent(&self) -> Result<Cell, ReversiError> {
        self.to_move.opposite()
    }

    #[inline]
    fn on_board(row: isize, col: isize) -> bool {
        (0..N as isize).contains(&row) && (0..N as isize).contains(&col)
    }

    /// Length of the outflanking run starting next to `(row, col)` in
    /// direction `(dr, dc)`, or 0 if the ray has no valid outflanking line.
    fn trace(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        mover: Cell,
        other: Cell,
    ) -> usize {
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut run = 0;
        while Self::on_board(r, c) {
            let cell = self.cells[r as usize][c as usize];
            if cell == other {
                run += 1;
            } else if cell == mover {
                return run;
            } else {
                return 0;
            }
            r += dr;
            c += dc;
        }
        0
    }

    /// Would placing `mover` at `(row, col)` flip at least one `other` disc?
    pub fn is_legal(&self, row: usize, col: usize, mover: Cell, other: Cell) -> bool {
        if row >= N || col >= N || self.cells[row][col] != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.trace(row, col, dir, mover, other) > 0)
    }

    /// Reason a placement by `mover` at `(row, col)` is illegal, if any.
    fn check_move(
        &self,
        row: usize,
        col: usize,
        mover: Cell,
        other: Cell,
    ) -> Result<(), IllegalReason> {
        if row >= N || col >= N {
            return Err(IllegalReason::OutOfRange);
        }
        if self.cells[row][col] != Cell::Empty {
            return Err(IllegalReason::Occupied);
        }
        if !self.is_legal(row, col, mover, other) {
            return Err(IllegalReason::NoCaptureLine);
        }
        Ok(())
    }

    /// Does `side` have any legal placement? Always false for `Empty`.
    pub fn has_any_legal_move(&self, side: Cell) -> bool {
        let Ok(other) = side.opposite() else {
            return false;
        };
        (0..N).any(|row| (0..N).any(|col| self.is_legal(row, col, side, other)))
    }

    /// All legal placements for `side`, in row-major order.
    pub fn legal_moves(&self, side: Cell) -> Vec<Move> {
        let Ok(other) = side.opposite() else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for row in 0..N {
            for col in 0..N {
                if self.is_legal(row, col, side, other) {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    /// Availability map: `true` where `side` may play.
    pub fn legal_move_map(&self, side: Cell) -> [[bool; N]; N] {
        let mut map = [[false; N]; N];
        for mv in self.legal_moves(side) {
            map[mv.row][mv.col] = true;
        }
        map
    }

    /// Place the current player's disc at `(row, col)`, flip every outflanked
    /// run and advance the turn.
    ///
    /// The turn passes to the opponent if they have a legal reply; otherwise
    /// the same side moves again. Returns the number of discs flipped.
    ///
    /// With `validate == false` the caller guarantees the move came from
    /// [`Board::legal_moves`]; an illegal target then leaves the board in an
    /// unspecified state.
    ///
    /// # Errors
    /// - `IllegalMove` if `validate` is set and the move is not legal
    /// - `InvalidState` if the board's bookkeeping is corrupted
    pub fn apply_move(
        &mut self,
        row: usize,
        col: usize,
        validate: bool,
    ) -> Result<u32, ReversiError> {
        let mover = self.to_move;
        let other = mover.opposite()?;

        if validate {
            self.check_move(row, col, mover, other)
                .map_err(ReversiError::IllegalMove)?;
        } else {
            debug_assert!(
                self.is_legal(row, col, mover, other),
                "unchecked move {} is illegal",
                Move::new(row, col)
            );
        }

        self.cells[row][col] = mover;
        let mut flipped = 0u32;
        for dir in DIRECTIONS {
            let run = self.trace(row, col, dir, mover, other);
            let (mut r, mut c) = (row as isize, col as isize);
            for _ in 0..run {
                r += dir.0;
                c += dir.1;
                self.cells[r as usize][c as usize] = mover;
            }
            flipped += run as u32;
        }

        let (own, theirs) = match mover {
            Cell::Black => (&mut self.black, &mut self.white),
            _ => (&mut self.white, &mut self.black),
        };
        *own += flipped + 1;
        *theirs = theirs
            .checked_sub(flipped)
            .ok_or_else(|| ReversiError::InvalidState("negative disc count".to_string()))?;

        // Pass rule: the mover keeps the turn when the opponent is stuck.
        if self.has_any_legal_move(other) {
            self.to_move = other;
        }
        Ok(flipped)
    }

    /// `Finished` once the board is full or neither side can move.
    pub fn outcome(&self) -> GameOutcome {
        let finished = self.total() as usize == N_SQUARED
            || (!self.has_any_legal_move(Cell::Black) && !self.has_any_legal_move(Cell::White));
        if !finished {
            return GameOutcome::Ongoing;
        }

        let winner = match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        GameOutcome::Finished(winner)
    }

    /// Text rendering of the grid, optionally marking the current player's
    /// legal squares with `*`.
    pub fn render(&self, show_legal: bool) -> String {
        let legal = if show_legal {
            self.legal_move_map(self.to_move)
        } else {
            [[false; N]; N]
        };

        let mut out = String::from(" ");
        for col in 0..N {
            out.push(' ');
            out.push((b'a' + col as u8) as char);
        }
        out.push('\n');
        for (row, line) in self.cells.iter().enumerate() {
            out.push_str(&(row + 1).to_string());
            for (col, cell) in line.iter().enumerate() {
                out.push(' ');
                out.push(if legal[row][col] {
                    PLAYABLE
                } else {
                    cell.to_char()
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
