//! Moves obeying piece movement rules, ignoring own-king safety.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveGenerator;
use crate::move_generation::pseudo_moves_king::generate_king_moves;
use crate::move_generation::pseudo_moves_knight::generate_knight_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_sliders::{generate_sliding_moves, slider_directions};

#[derive(Debug, Default, Clone, Copy)]
pub struct PseudoLegalMoveGenerator;

impl PseudoLegalMoveGenerator {
    /// Moves for every piece of `side`, scanning rows then columns.
    pub fn generate_for_side(
        board: &Board,
        side: Color,
        castling_rights: CastlingRights,
        en_passant_file: Option<u8>,
    ) -> Vec<Move> {
        let mut out = Vec::with_capacity(48);
        for (from, piece) in board.pieces() {
            if piece.color == side {
                Self::generate_for_piece(board, from, piece, castling_rights, en_passant_file, &mut out);
            }
        }
        out
    }

    pub fn generate_for_piece(
        board: &Board,
        from: Position,
        piece: Piece,
        castling_rights: CastlingRights,
        en_passant_file: Option<u8>,
        out: &mut Vec<Move>,
    ) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, from, piece.color, en_passant_file, out),
            PieceKind::Knight => generate_knight_moves(board, from, piece.color, out),
            PieceKind::King => generate_king_moves(board, from, piece.color, castling_rights, out),
            kind => {
                if let Some(dirs) = slider_directions(kind) {
                    generate_sliding_moves(board, from, piece.color, dirs, out);
                }
            }
        }
    }
}

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<Move> {
        Self::generate_for_side(
            game_state.board(),
            game_state.side_to_move(),
            game_state.castling_rights(),
            game_state.en_passant_file(),
        )
    }

    /// Empty when the square is empty or holds an opponent piece.
    fn generate_moves_for_square(&self, game_state: &GameState, from: Position) -> Vec<Move> {
        let mut out = Vec::new();
        let Some(piece) = game_state.board().get(from) else {
            return out;
        };
        if piece.color != game_state.side_to_move() {
            return out;
        }
        Self::generate_for_piece(
            game_state.board(),
            from,
            piece,
            game_state.castling_rights(),
            game_state.en_passant_file(),
            &mut out,
        );
        out
    }
}
