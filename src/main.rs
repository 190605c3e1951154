//! Command-line driver: search or perft a position.
//!
//! ```text
//! chess_core [--fen "<fen>"] [--depth N] [--perft]
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see
//! per-iteration search output.

use std::process::ExitCode;

use log::{error, info};

use chess_core::chess_errors::ChessResult;
use chess_core::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_core::game_state::chess_types::GameState;
use chess_core::move_generation::perft::perft_divide;
use chess_core::search::board_scoring::PieceSquareScorer;
use chess_core::search::iterative_deepening::{iterative_deepening_search, SearchConfig};
use chess_core::utils::long_algebraic::move_to_long_algebraic;

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    arg_value(flag)
        .and_then(|value| value.parse::<u8>().ok())
        .map_or(default, |v| v.max(1))
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|arg| arg == flag)
}

fn run() -> ChessResult<()> {
    let fen = arg_value("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let mut game = GameState::from_fen(&fen)?;
    let config = SearchConfig::with_depth(parse_arg_u8("--depth", SearchConfig::default().max_depth));

    if has_flag("--perft") {
        let divide = perft_divide(&mut game, config.max_depth);
        for (mv, nodes) in &divide {
            println!("{}: {nodes}", move_to_long_algebraic(*mv));
        }
        let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
        println!("total: {total}");
        return Ok(());
    }

    if let Some(result) = game.result() {
        println!("game over: {result:?}");
        return Ok(());
    }

    let result = iterative_deepening_search(&mut game, &PieceSquareScorer, &config);
    info!(
        "depth {} nodes {} in {} ms, tt {:?}",
        result.reached_depth, result.nodes, result.elapsed_ms, result.tt_stats
    );
    match result.best_move {
        Some(mv) => println!("bestmove {} score {}", move_to_long_algebraic(mv), result.best_score),
        None => println!("bestmove (none) score {}", result.best_score),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
