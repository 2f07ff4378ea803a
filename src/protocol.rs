//! Line-based text protocol for driving the engine from another program.
//!
//! The framing follows GTP: each command may carry a numeric id, successful
//! responses start with `=`, failures with `?`, and every response ends with
//! a blank line.
//!
//! ## Supported Commands
//!
//! - `name` / `version` / `protocol_version`
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Reset to the starting position
//! - `play <coord>` - Play a move for the side to move, e.g. `play d3`
//! - `genmove` - Search and play a move for the side to move
//! - `legal_moves` - List the legal moves of the side to move
//! - `showboard` - Print the board, legal squares marked `*`
//! - `score` - Disc counts as `black white`
//! - `outcome` - `ongoing`, `black`, `white` or `draw`
//! - `depth <n>` - Set the search depth
//!
//! ## Example
//!
//! ```ignore
//! use reversi_rust::protocol::TextEngine;
//! let mut engine = TextEngine::new();
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, GameOutcome, Winner, parse_coord};
use crate::constants::DEFAULT_DEPTH;
use crate::search::SearchEngine;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "depth",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "outcome",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "version",
];

/// Protocol engine state.
pub struct TextEngine {
    /// Current game
    board: Board,
    /// Searcher used by `genmove`
    search: SearchEngine,
    /// Search depth in plies
    depth: u32,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Create an engine with the default evaluator and depth.
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u32) -> Self {
        Self {
            board: Board::new(),
            search: SearchEngine::default(),
            depth,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop on stdin/stdout until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.serve(stdin.lock(), &mut stdout)
    }

    /// Run the command loop over arbitrary streams.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(out, "{prefix}{id_str} {message}\n")?;
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = Board::new();
                (true, String::new())
            }

            "depth" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<u32>() {
                    Ok(depth) if depth > 0 => {
                        self.depth = depth;
                        (true, String::new())
                    }
                    _ => (false, format!("invalid depth: {arg}")),
                }
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let mv = match parse_coord(arg) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.board.apply_move(mv.row, mv.col, true) {
                    Ok(flipped) => {
                        info!(%mv, flipped, "move played");
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let side = self.board.current_player();
                let result = match self.search.choose_move(&self.board, side, self.depth) {
                    Ok(result) => result,
                    Err(e) => return (false, e.to_string()),
                };
                debug!(mv = %result.mv, score = result.score, "genmove");
                match self.board.apply_move(result.mv.row, result.mv.col, false) {
                    Ok(_) => (true, result.mv.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "legal_moves" => {
                let moves: Vec<String> = self
                    .board
                    .legal_moves(self.board.current_player())
                    .iter()
                    .map(|mv| mv.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "showboard" => (true, format!("\n{}", self.board.render(true))),

            "score" => {
                let (black, white) = self.board.counts();
                (true, format!("{black} {white}"))
            }

            "outcome" => {
                let text = match self.board.outcome() {
                    GameOutcome::Ongoing => "ongoing",
                    GameOutcome::Finished(Winner::Black) => "black",
                    GameOutcome::Finished(Winner::White) => "white",
                    GameOutcome::Finished(Winner::Draw) => "draw",
                };
                (true, text.to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = TextEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = TextEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_known_command() {
        let mut engine = TextEngine::new();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_reports_reason() {
        let mut engine = TextEngine::new();

        let (success, response) = engine.execute("play", &["d4"]);
        assert!(!success);
        assert!(response.contains("not empty"), "got {response}");

        let (success, response) = engine.execute("play", &["a1"]);
        assert!(!success);
        assert!(response.contains("no disc would be flipped"), "got {response}");

        let (success, response) = engine.execute("play", &["z9"]);
        assert!(!success);
        assert!(response.contains("out of range"), "got {response}");

        let (success, _) = engine.execute("play", &["d3"]);
        assert!(success);
        assert_eq!(engine.board().counts(), (4, 1));
        assert_eq!(engine.board().current_player(), Cell::White);
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut engine = TextEngine::with_depth(2);
        let (success, response) = engine.execute("genmove", &[]);
        assert!(success);
        let mv = parse_coord(&response).unwrap();
        assert!(Board::new().legal_moves(Cell::Black).contains(&mv));
        assert_eq!(engine.board().current_player(), Cell::White);
    }

    #[test]
    fn test_legal_moves_and_clear() {
        let mut engine = TextEngine::new();
        let (_, response) = engine.execute("legal_moves", &[]);
        assert_eq!(response, "d3 c4 f5 e6");

        engine.execute("play", &["d3"]);
        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_serve_framing() {
        let mut engine = TextEngine::new();
        let input = "1 name\n# comment\n\n2 score\nbogus\nquit\nname\n";
        let mut out = Vec::new();
        engine.serve(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "=1 reversi-rust\n\n=2 2 2\n\n? unknown command: bogus\n\n= \n\n"
        );
    }
}
