//! Search tests: greedy behaviour at depth 1, agreement with an unpruned
//! minimax, and determinism.

use fastrand::Rng;

use reversi_rust::board::{Board, Cell, GameOutcome, Move};
use reversi_rust::error::ReversiError;
use reversi_rust::evaluate::{Evaluator, WeightMatrix};
use reversi_rust::playout::random_move;
use reversi_rust::search::SearchEngine;

// =============================================================================
// Helper functions
// =============================================================================

/// Plain minimax without pruning, same terminal and horizon rules as the
/// engine.
fn minimax(engine: &SearchEngine, board: &Board, perspective: Cell, depth: u32, limit: u32) -> i32 {
    if let GameOutcome::Finished(winner) = board.outcome() {
        return engine.terminal_score(winner, perspective);
    }
    if depth >= limit {
        return engine.evaluator().score(board, perspective);
    }

    let side = board.current_player();
    let values = board.legal_moves(side).into_iter().map(|mv| {
        let mut child = board.clone();
        child.apply_move(mv.row, mv.col, true).unwrap();
        minimax(engine, &child, perspective, depth + 1, limit)
    });
    if side == perspective {
        values.max().expect("unfinished game without a move")
    } else {
        values.min().expect("unfinished game without a move")
    }
}

/// Move a plain minimax picks at the root: children sorted by descending
/// heuristic score for `perspective` (stable), first best value kept.
fn minimax_root_move(
    engine: &SearchEngine,
    board: &Board,
    perspective: Cell,
    limit: u32,
) -> Move {
    let side = board.current_player();
    let mut children: Vec<(i32, Move, Board)> = board
        .legal_moves(side)
        .into_iter()
        .map(|mv| {
            let child = child_after(board, mv);
            (engine.evaluator().score(&child, perspective), mv, child)
        })
        .collect();
    children.sort_by(|a, b| b.0.cmp(&a.0));

    let maximizing = side == perspective;
    let mut best: Option<(i32, Move)> = None;
    for (_, mv, child) in &children {
        let value = minimax(engine, child, perspective, 1, limit);
        let better = match best {
            None => true,
            Some((b, _)) if maximizing => value > b,
            Some((b, _)) => value < b,
        };
        if better {
            best = Some((value, *mv));
        }
    }
    best.expect("root without a legal move").1
}

/// Boards reached by `plies` seeded random moves, skipping finished games.
fn random_positions(count: u64, plies: usize) -> Vec<Board> {
    let mut positions = Vec::new();
    for seed in 0..count {
        let mut rng = Rng::with_seed(seed);
        let mut board = Board::new();
        for _ in 0..plies {
            match random_move(&board, &mut rng) {
                Some(mv) => board.apply_move(mv.row, mv.col, false).unwrap(),
                None => break,
            };
        }
        if !board.outcome().is_finished() {
            positions.push(board);
        }
    }
    positions
}

fn child_after(board: &Board, mv: Move) -> Board {
    let mut child = board.clone();
    child.apply_move(mv.row, mv.col, true).unwrap();
    child
}

// =============================================================================
// Depth 1: greedy choice
// =============================================================================

#[test]
fn test_depth_one_is_greedy() {
    let engine = SearchEngine::default();
    let mut checked = 0;

    for board in random_positions(30, 20) {
        let side = board.current_player();
        let children: Vec<(Move, Board)> = board
            .legal_moves(side)
            .into_iter()
            .map(|mv| (mv, child_after(&board, mv)))
            .collect();
        // Decided games score with the sentinel instead of the heuristic.
        if children.iter().any(|(_, c)| c.outcome().is_finished()) {
            continue;
        }

        let mut expected = children[0].0;
        let mut best = i32::MIN;
        for (mv, child) in &children {
            let score = engine.evaluator().score(child, side);
            if score > best {
                best = score;
                expected = *mv;
            }
        }

        let result = engine.choose_move(&board, side, 1).unwrap();
        assert_eq!(result.mv, expected, "board:\n{board}");
        assert_eq!(result.score, best);
        checked += 1;
    }
    assert!(checked > 10, "too few positions checked: {checked}");
}

#[test]
fn test_depth_one_opening_tie_takes_first() {
    // All four opening replies score the same; row-major order wins.
    let engine = SearchEngine::default();
    let result = engine.choose_move(&Board::new(), Cell::Black, 1).unwrap();
    assert_eq!(result.mv, Move::new(2, 3));
    assert_eq!(result.score, 3);
}

// =============================================================================
// Alpha-beta agrees with minimax
// =============================================================================

#[test]
fn test_alphabeta_matches_minimax_from_opening() {
    let engine = SearchEngine::default();
    let board = Board::new();
    for depth in 1..=4 {
        let result = engine.choose_move(&board, Cell::Black, depth).unwrap();
        let expected = minimax(&engine, &board, Cell::Black, 0, depth);
        assert_eq!(result.score, expected, "depth {depth}");

        let child = child_after(&board, result.mv);
        assert_eq!(minimax(&engine, &child, Cell::Black, 1, depth), expected);
    }
}

#[test]
fn test_alphabeta_matches_minimax_midgame() {
    let engine = SearchEngine::default();
    for board in random_positions(12, 24) {
        let side = board.current_player();
        let result = engine.choose_move(&board, side, 3).unwrap();
        let expected = minimax(&engine, &board, side, 0, 3);
        assert_eq!(result.score, expected, "board:\n{board}");

        let child = child_after(&board, result.mv);
        assert_eq!(minimax(&engine, &child, side, 1, 3), expected);
    }
}

#[test]
fn test_alphabeta_matches_minimax_for_other_perspective() {
    // Root is a minimising node when searching for the side not on move.
    let engine = SearchEngine::new(Evaluator::new(WeightMatrix::uniform()));
    for board in random_positions(6, 16) {
        let other = board.opponent().unwrap();
        let result = engine.choose_move(&board, other, 3).unwrap();
        assert_eq!(result.score, minimax(&engine, &board, other, 0, 3));
    }
}

#[test]
fn test_minimising_root_keeps_first_in_descending_order() {
    let engine = SearchEngine::default();
    for board in random_positions(60, 10) {
        let other = board.opponent().unwrap();
        let result = engine.choose_move(&board, other, 2).unwrap();
        assert_eq!(result.score, minimax(&engine, &board, other, 0, 2));
        assert_eq!(
            result.mv,
            minimax_root_move(&engine, &board, other, 2),
            "board:\n{board}"
        );
    }
}

#[test]
fn test_maximising_root_keeps_first_in_descending_order() {
    let engine = SearchEngine::default();
    for board in random_positions(30, 14) {
        let side = board.current_player();
        let result = engine.choose_move(&board, side, 3).unwrap();
        assert_eq!(
            result.mv,
            minimax_root_move(&engine, &board, side, 3),
            "board:\n{board}"
        );
    }
}

#[test]
fn test_alphabeta_matches_minimax_near_end() {
    // Late positions reach finished games inside the horizon.
    let engine = SearchEngine::default();
    for board in random_positions(10, 54) {
        let side = board.current_player();
        let result = engine.choose_move(&board, side, 4).unwrap();
        assert_eq!(result.score, minimax(&engine, &board, side, 0, 4), "board:\n{board}");
    }
}

// =============================================================================
// Engine behaviour
// =============================================================================

#[test]
fn test_search_is_deterministic() {
    let engine = SearchEngine::default();
    for board in random_positions(5, 12) {
        let side = board.current_player();
        let a = engine.choose_move(&board, side, 3).unwrap();
        let b = engine.choose_move(&board, side, 3).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_search_leaves_board_untouched() {
    let engine = SearchEngine::default();
    let board = Board::new();
    let before = board.clone();
    engine.choose_move(&board, Cell::Black, 4).unwrap();
    assert_eq!(board, before);
}

#[test]
fn test_no_legal_move_error() {
    let rows = [
        "X . . . . . . O",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        "O . . . . . . .",
    ];
    let board = Board::from_rows(&rows, Cell::Black).unwrap();
    let engine = SearchEngine::default();
    assert_eq!(
        engine.choose_move(&board, Cell::Black, 3),
        Err(ReversiError::NoLegalMove)
    );
}

#[test]
fn test_prefers_corner() {
    // Same number of flips; the corner capture is worth more.
    let rows = [
        ". O O X . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . O O X . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . X",
    ];
    let board = Board::from_rows(&rows, Cell::Black).unwrap();
    let engine = SearchEngine::default();
    let result = engine.choose_move(&board, Cell::Black, 1).unwrap();
    assert_eq!(result.mv, Move::new(0, 0));
}
