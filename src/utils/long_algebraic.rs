//! Long algebraic move text (`e2e4`, `e7e8q`, castling as `e1g1`).

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_position, position_to_algebraic};

pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = position_to_algebraic(mv.from);
    out.push_str(&position_to_algebraic(mv.to));
    if let Some(piece) = mv.promotion() {
        out.push(promotion_to_char(piece));
    }
    out
}

/// Resolve move text against the legal moves of `game_state`. A promotion
/// without a suffix is rejected rather than guessed.
pub fn find_legal_move(game_state: &GameState, long_algebraic: &str) -> ChessResult<Move> {
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
    }

    let from = algebraic_to_position(&long_algebraic[0..2])?;
    let to = algebraic_to_position(&long_algebraic[2..4])?;
    let promotion = match long_algebraic[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch)?),
        None => None,
    };

    game_state
        .legal_moves_for_square(from)
        .into_iter()
        .find(|mv| mv.to == to && mv.promotion() == promotion)
        .ok_or_else(|| ChessErrors::IllegalMove(long_algebraic.to_owned()))
}

fn promotion_to_char(piece: PieceKind) -> char {
    match piece {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(ChessErrors::InvalidAlgebraicChar(ch)),
    }
}
