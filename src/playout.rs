//! Random playouts.
//!
//! A playout plays uniformly random legal moves until the game ends. The
//! engine uses it as a sparring partner in self-play, and the tests use it to
//! reach many different positions with a reproducible seed.

use fastrand::Rng;

use crate::board::{Board, GameOutcome, Move, Winner};
use crate::error::ReversiError;

/// Pick a uniformly random legal move for the side to move.
///
/// Returns `None` once the game is finished.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<Move> {
    let moves = board.legal_moves(board.current_player());
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves on `board` until the game ends and return the winner.
///
/// The pass rule is handled by [`Board::apply_move`], so a side without a
/// move is simply never asked to play.
pub fn play_out(board: &mut Board, rng: &mut Rng) -> Result<Winner, ReversiError> {
    loop {
        if let GameOutcome::Finished(winner) = board.outcome() {
            return Ok(winner);
        }
        let mv = random_move(board, rng).ok_or_else(|| {
            ReversiError::InvalidState(format!(
                "{} to move in an unfinished game without a legal move",
                board.current_player()
            ))
        })?;
        board.apply_move(mv.row, mv.col, false)?;
    }
}

/// Play a complete random game from the starting position.
pub fn random_game(rng: &mut Rng) -> Result<Board, ReversiError> {
    let mut board = Board::new();
    play_out(&mut board, rng)?;
    Ok(board)
}
