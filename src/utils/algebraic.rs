//! Coordinate conversions between `Position` and algebraic squares (`e4`).

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Position;

/// Parse a square such as `"e4"`. Rank 8 is row 0.
#[inline]
pub fn algebraic_to_position(square: &str) -> ChessResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraicChar(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicChar(rank as char));
    }

    Ok(Position::new(b'8' - rank, file - b'a'))
}

#[inline]
pub fn position_to_algebraic(pos: Position) -> String {
    let file_char = char::from(b'a' + pos.col);
    let rank_char = char::from(b'8' - pos.row);
    format!("{file_char}{rank_char}")
}
