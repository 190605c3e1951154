use crate::game_state::chess_types::*;

/// Undo token pushed by `make_move` and consumed once by `undo_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,

    pub halfmove_clock_before: u16,
    pub halfmove_clock_after: u16,
    pub fullmove_number_before: u16,
    pub fullmove_number_after: u16,

    pub hash_before: u64,
    pub hash_after: u64,

    pub castling_before: CastlingRights,
    pub castling_after: CastlingRights,
    pub en_passant_file_before: Option<u8>,
    pub en_passant_file_after: Option<u8>,

    /// Whether the move left the opponent in check.
    pub gives_check: bool,

    /// Cached result of the position the move was played from. Always `None`
    /// for moves accepted by `GameState::make_move`.
    pub result_before: Option<GameResult>,
}
