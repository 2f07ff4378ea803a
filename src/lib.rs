//! Reversi-Rust: a Reversi (Othello) rules engine with an alpha-beta player.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, directions and default weights
//! - [`board`] - Board state, legality, flipping and game termination
//! - [`evaluate`] - Static positional evaluation
//! - [`search`] - Depth-limited alpha-beta search
//! - [`playout`] - Random playouts
//! - [`protocol`] - Line-based text protocol
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use reversi_rust::board::{Board, parse_coord};
//! use reversi_rust::search::SearchEngine;
//!
//! let mut board = Board::new();
//! let mv = parse_coord("d3").unwrap();
//! board.apply_move(mv.row, mv.col, true).unwrap();
//!
//! let engine = SearchEngine::default();
//! let side = board.current_player();
//! let reply = engine.choose_move(&board, side, 3).unwrap();
//! println!("Best reply: {}", reply.mv);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod playout;
pub mod protocol;
pub mod search;
