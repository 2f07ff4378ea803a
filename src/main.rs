//! Reversi-Rust: play Reversi against an alpha-beta engine.
//!
//! ## Usage
//!
//! - `reversi-rust` - Show a demo
//! - `reversi-rust play` - Play against the engine on the terminal
//! - `reversi-rust text` - Start the text protocol server
//! - `reversi-rust selfplay` - Pit the engine against a random player

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use reversi_rust::board::{Board, Cell, GameOutcome, Winner, parse_coord};
use reversi_rust::constants::DEFAULT_DEPTH;
use reversi_rust::error::ReversiError;
use reversi_rust::playout::random_move;
use reversi_rust::protocol::TextEngine;
use reversi_rust::search::SearchEngine;

/// Reversi-Rust: a Reversi engine with alpha-beta search
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search depth in plies
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine, entering moves like `d3`
    Play {
        /// Which color the human plays
        #[arg(long, value_enum, default_value_t = Side::Black)]
        human: Side,
    },
    /// Start the line-based text protocol on stdin/stdout
    Text,
    /// Play the engine against a random player and report the tally
    Selfplay {
        /// Number of games (the engine alternates colors)
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Seed for the random player
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Run a simple demo of the engine
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Side {
    Black,
    White,
    /// Engine plays both sides
    #[value(name = "none")]
    Neither,
}

impl Side {
    fn cell(self) -> Option<Cell> {
        match self {
            Side::Black => Some(Cell::Black),
            Side::White => Some(Cell::White),
            Side::Neither => None,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if cli.depth == 0 {
        bail!("--depth must be at least 1");
    }

    match cli.command {
        Some(Commands::Play { human }) => run_play(human.cell(), cli.depth),
        Some(Commands::Text) => TextEngine::with_depth(cli.depth)
            .run()
            .context("text protocol I/O failed"),
        Some(Commands::Selfplay { games, seed }) => run_selfplay(games, seed, cli.depth),
        Some(Commands::Demo) | None => run_demo(cli.depth),
    }
}

fn winner_text(winner: Winner) -> &'static str {
    match winner {
        Winner::Black => "Black wins",
        Winner::White => "White wins",
        Winner::Draw => "Draw",
    }
}

fn run_play(human: Option<Cell>, depth: u32) -> Result<()> {
    let engine = SearchEngine::default();
    let mut board = Board::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        let side = board.current_player();
        println!("\n{}", board.render(Some(side) == human));
        let (black, white) = board.counts();
        println!("Black {black} - White {white}");

        if let GameOutcome::Finished(winner) = board.outcome() {
            println!("Game over: {}", winner_text(winner));
            return Ok(());
        }

        if Some(side) == human {
            print!("{side} to move> ");
            stdout.flush()?;
            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let line = line.context("failed to read move")?;
            let input = line.trim();
            if input.eq_ignore_ascii_case("quit") {
                return Ok(());
            }

            let applied = parse_coord(input)
                .and_then(|mv| board.apply_move(mv.row, mv.col, true).map(|_| mv));
            match applied {
                Ok(mv) => info!(%side, %mv, "human move"),
                Err(ReversiError::IllegalMove(reason)) => {
                    println!("Illegal move: {reason}");
                    continue;
                }
                Err(e) => return Err(e).context("human move failed"),
            }
        } else {
            let result = engine
                .choose_move(&board, side, depth)
                .context("engine failed to find a move")?;
            board.apply_move(result.mv.row, result.mv.col, false)?;
            println!("Engine ({side}) plays {} (score {})", result.mv, result.score);
        }

        if board.current_player() == side && !board.outcome().is_finished() {
            let other = side.opposite()?;
            println!("{other} has no legal move and passes");
        }
    }
}

fn run_selfplay(games: u32, seed: u64, depth: u32) -> Result<()> {
    let engine = SearchEngine::default();
    let mut rng = fastrand::Rng::with_seed(seed);
    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);

    for game in 0..games {
        let engine_side = if game % 2 == 0 { Cell::Black } else { Cell::White };
        let mut board = Board::new();

        let winner = loop {
            if let GameOutcome::Finished(winner) = board.outcome() {
                break winner;
            }
            let side = board.current_player();
            let mv = if side == engine_side {
                engine.choose_move(&board, side, depth)?.mv
            } else {
                random_move(&board, &mut rng).context("random player has no move")?
            };
            board.apply_move(mv.row, mv.col, false)?;
        };

        let (black, white) = board.counts();
        match (winner, engine_side) {
            (Winner::Draw, _) => draws += 1,
            (Winner::Black, Cell::Black) | (Winner::White, Cell::White) => wins += 1,
            _ => losses += 1,
        }
        info!(game, engine = %engine_side, black, white, "game finished");
        println!(
            "Game {}: engine {engine_side}, {} ({black}-{white})",
            game + 1,
            winner_text(winner)
        );
    }

    println!("Engine: {wins} won, {losses} lost, {draws} drawn");
    Ok(())
}

fn run_demo(depth: u32) -> Result<()> {
    println!("Reversi-Rust: Reversi engine with alpha-beta search\n");

    let board = Board::new();
    println!("{}", board.render(true));

    let side = board.current_player();
    let moves: Vec<String> = board
        .legal_moves(side)
        .iter()
        .map(|mv| mv.to_string())
        .collect();
    println!("Legal moves for {side}: {}", moves.join(" "));

    let engine = SearchEngine::default();
    let result = engine.choose_move(&board, side, depth)?;
    println!(
        "Engine choice at depth {depth}: {} (score {}, {} nodes)",
        result.mv, result.score, result.nodes
    );
    Ok(())
}
