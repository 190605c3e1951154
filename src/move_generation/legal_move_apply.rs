//! Board-only move application shared by the legality probe and `GameState`.
//!
//! These helpers touch piece placement and nothing else; clocks, rights and
//! hashing belong to the game state.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::castling_rook_cols;
use crate::game_state::chess_types::*;

/// Relocate the pieces for `mv` and return whatever was captured.
///
/// Panics if the origin square is empty or a castling rook is missing; both
/// mean the move did not come from this position's generator.
pub fn apply_move_to_board(board: &mut Board, mv: Move) -> Option<Piece> {
    let Some(moved) = board.take(mv.from) else {
        panic!("no piece on {:?} for move {:?}", mv.from, mv);
    };

    let captured = match mv.kind {
        MoveKind::EnPassant => board.take(Position::new(mv.from.row, mv.to.col)),
        _ => board.get(mv.to),
    };

    let landed = match mv.promotion() {
        Some(kind) => Piece::new(kind, moved.color),
        None => moved,
    };
    board.set(mv.to, Some(landed));

    if mv.kind == MoveKind::Castling {
        let (rook_from, rook_to) = castling_rook_cols(mv.to.col);
        let row = mv.from.row;
        let rook = board.take(Position::new(row, rook_from));
        assert!(
            rook == Some(Piece::new(PieceKind::Rook, moved.color)),
            "castling {:?} without a rook on column {rook_from}",
            mv
        );
        board.set(Position::new(row, rook_to), rook);
    }

    captured
}

/// Exact inverse of `apply_move_to_board`.
pub fn revert_move_on_board(board: &mut Board, mv: Move, moved: Piece, captured: Option<Piece>) {
    board.set(mv.from, Some(moved));

    match mv.kind {
        MoveKind::EnPassant => {
            board.set(mv.to, None);
            board.set(Position::new(mv.from.row, mv.to.col), captured);
        }
        MoveKind::Castling => {
            board.set(mv.to, None);
            let (rook_from, rook_to) = castling_rook_cols(mv.to.col);
            let row = mv.from.row;
            let rook = board.take(Position::new(row, rook_to));
            board.set(Position::new(row, rook_from), rook);
        }
        _ => board.set(mv.to, captured),
    }
}
