//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position, the clock limits
//! used by draw detection, and the fixed castling geometry.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

/// Occurrences of one position that draw by repetition.
pub const REPETITION_DRAW_COUNT: u32 = 3;

pub const KING_START_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

pub const KINGSIDE_KING_TO_COL: u8 = 6;
pub const KINGSIDE_ROOK_TO_COL: u8 = 5;
pub const QUEENSIDE_KING_TO_COL: u8 = 2;
pub const QUEENSIDE_ROOK_TO_COL: u8 = 3;

/// Rook columns `(from, to)` for a castling move landing the king on `king_to_col`.
#[inline]
pub const fn castling_rook_cols(king_to_col: u8) -> (u8, u8) {
    if king_to_col == KINGSIDE_KING_TO_COL {
        (KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TO_COL)
    } else {
        (QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TO_COL)
    }
}
