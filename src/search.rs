//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search works on board snapshots only: every candidate move is applied
//! to its own clone of the parent board, so no branch can observe another
//! branch's changes. Leaves are scored by the [`Evaluator`]; decided games are
//! scored with a sentinel larger than any heuristic value so a forced win or
//! loss always dominates.
//!
//! Candidates are ordered greedily by the heuristic score of the position
//! they lead to, highest first for the searching side at every node, which
//! tightens the pruning window early. Ordering never changes the backed-up value, and
//! among equal values the first candidate in that order is kept.

use tracing::{debug, trace, warn};

use crate::board::{Board, Cell, GameOutcome, Move, Winner};
use crate::error::ReversiError;
use crate::evaluate::Evaluator;

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Move chosen for the side to move at the root
    pub mv: Move,
    /// Backed-up score from the searching side's perspective
    pub score: i32,
    /// Number of nodes visited
    pub nodes: u64,
}

/// Alpha-beta searcher parameterised by a static evaluator.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    evaluator: Evaluator,
    win_score: i32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(Evaluator::default())
    }
}

impl SearchEngine {
    /// Create an engine. The terminal score is sized from the evaluator's
    /// weights so that it exceeds every reachable heuristic score.
    pub fn new(evaluator: Evaluator) -> Self {
        let win_score = evaluator.weights().magnitude() + 1;
        Self {
            evaluator,
            win_score,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Score reported for a won game (negated for a lost one).
    pub fn win_score(&self) -> i32 {
        self.win_score
    }

    /// Score of a finished game for `perspective`.
    pub fn terminal_score(&self, winner: Winner, perspective: Cell) -> i32 {
        match (winner, perspective) {
            (Winner::Draw, _) => 0,
            (Winner::Black, Cell::Black) | (Winner::White, Cell::White) => self.win_score,
            _ => -self.win_score,
        }
    }

    /// Pick a move for the side to move on `board`, searching `depth_limit`
    /// plies and maximising for `perspective`.
    ///
    /// A `depth_limit` of 0 is treated as 1.
    ///
    /// # Errors
    /// - `NoLegalMove` if the game is over or the side to move cannot play
    /// - `InvalidState` if an interior node has no move although the game is
    ///   not finished
    pub fn choose_move(
        &self,
        board: &Board,
        perspective: Cell,
        depth_limit: u32,
    ) -> Result<SearchResult, ReversiError> {
        if board.outcome().is_finished() || !board.has_any_legal_move(board.current_player()) {
            warn!(side = %board.current_player(), "search requested without a legal move");
            return Err(ReversiError::NoLegalMove);
        }

        let mut search = Search {
            engine: self,
            perspective,
            depth_limit: depth_limit.max(1),
            nodes: 0,
        };
        let (score, best) = search.alphabeta(board, 0, i32::MIN, i32::MAX)?;
        let mv = best.ok_or(ReversiError::NoLegalMove)?;

        debug!(
            best = %mv,
            score,
            nodes = search.nodes,
            depth = search.depth_limit,
            "search finished"
        );
        Ok(SearchResult {
            mv,
            score,
            nodes: search.nodes,
        })
    }
}

/// State of one `choose_move` call.
struct Search<'a> {
    engine: &'a SearchEngine,
    perspective: Cell,
    depth_limit: u32,
    nodes: u64,
}

/// A candidate move, the board it produces and its ordering key.
struct Child {
    key: i32,
    mv: Move,
    board: Board,
}

impl Search<'_> {
    /// Backed-up value of `board` at `depth` inside the window
    /// `(alpha, beta)`, plus the move that produced it.
    fn alphabeta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<(i32, Option<Move>), ReversiError> {
        self.nodes += 1;

        if let GameOutcome::Finished(winner) = board.outcome() {
            return Ok((self.engine.terminal_score(winner, self.perspective), None));
        }
        if depth >= self.depth_limit {
            return Ok((self.engine.evaluator.score(board, self.perspective), None));
        }

        let side = board.current_player();
        let maximizing = side == self.perspective;
        let children = self.expand(board, side)?;
        if children.is_empty() {
            return Err(ReversiError::InvalidState(format!(
                "{side} to move without a legal move in an unfinished game"
            )));
        }

        let mut best_move = None;
        if maximizing {
            let mut best = i32::MIN;
            for child in &children {
                let (value, _) = self.alphabeta(&child.board, depth + 1, alpha, beta)?;
                if depth == 0 {
                    trace!(mv = %child.mv, value, "root candidate");
                }
                if value > best {
                    best = value;
                    best_move = Some(child.mv);
                }
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            Ok((best, best_move))
        } else {
            let mut best = i32::MAX;
            for child in &children {
                let (value, _) = self.alphabeta(&child.board, depth + 1, alpha, beta)?;
                if depth == 0 {
                    trace!(mv = %child.mv, value, "root candidate");
                }
                if value < best {
                    best = value;
                    best_move = Some(child.mv);
                }
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            Ok((best, best_move))
        }
    }

    /// Apply every legal move of `side` to a clone of `board` and order the
    /// results by descending heuristic score for the searching side.
    fn expand(&self, board: &Board, side: Cell) -> Result<Vec<Child>, ReversiError> {
        let mut children = board
            .legal_moves(side)
            .into_iter()
            .map(|mv| -> Result<Child, ReversiError> {
                let mut child = board.clone();
                child.apply_move(mv.row, mv.col, false)?;
                Ok(Child {
                    key: self.engine.evaluator.score(&child, self.perspective),
                    mv,
                    board: child,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Stable: equal keys keep row-major order.
        children.sort_by(|a, b| b.key.cmp(&a.key));
        Ok(children)
    }
}
