//! Pseudo-legal moves filtered by own-king safety.
//!
//! Each candidate is played on a scratch copy of the board, the mover's king
//! is tested, and the copy is restored before the next candidate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_to_board, revert_move_on_board};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::move_generation::pseudo_legal_move_generator::PseudoLegalMoveGenerator;

#[derive(Debug, Default, Clone, Copy)]
pub struct LegalMoveGenerator;

impl LegalMoveGenerator {
    pub fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let candidates = PseudoLegalMoveGenerator.generate_moves(game_state);
        retain_legal(game_state.board(), game_state.side_to_move(), candidates)
    }

    pub fn generate_legal_moves_for_square(&self, game_state: &GameState, from: Position) -> Vec<Move> {
        let candidates = PseudoLegalMoveGenerator.generate_moves_for_square(game_state, from);
        retain_legal(game_state.board(), game_state.side_to_move(), candidates)
    }

    /// Stops at the first legal move instead of building the full list.
    pub fn has_any_legal_move(&self, game_state: &GameState) -> bool {
        let side = game_state.side_to_move();
        let mut scratch = *game_state.board();
        PseudoLegalMoveGenerator
            .generate_moves(game_state)
            .into_iter()
            .any(|mv| leaves_king_safe(&mut scratch, side, mv))
    }
}

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<Move> {
        self.generate_legal_moves(game_state)
    }

    fn generate_moves_for_square(&self, game_state: &GameState, from: Position) -> Vec<Move> {
        self.generate_legal_moves_for_square(game_state, from)
    }
}

fn retain_legal(board: &Board, side: Color, mut candidates: Vec<Move>) -> Vec<Move> {
    let mut scratch = *board;
    candidates.retain(|mv| leaves_king_safe(&mut scratch, side, *mv));
    candidates
}

/// Play `mv` on `scratch`, test the king, then put everything back.
fn leaves_king_safe(scratch: &mut Board, side: Color, mv: Move) -> bool {
    let Some(moved) = scratch.get(mv.from) else {
        return false;
    };
    let captured = apply_move_to_board(scratch, mv);
    let safe = !is_king_in_check(scratch, side);
    revert_move_on_board(scratch, mv, moved, captured);
    safe
}
