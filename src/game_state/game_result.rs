//! Terminal-state classification.
//!
//! Checks run in a fixed order: repetition, fifty-move rule, insufficient
//! material, then mate/stalemate via the legal-move generator.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEndReason {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    /// `None` for every draw.
    pub winner: Option<Color>,
    pub reason: GameEndReason,
}

impl GameResult {
    #[inline]
    pub const fn win(winner: Color) -> Self {
        Self {
            winner: Some(winner),
            reason: GameEndReason::Checkmate,
        }
    }

    #[inline]
    pub const fn draw(reason: GameEndReason) -> Self {
        Self {
            winner: None,
            reason,
        }
    }

    #[inline]
    pub const fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

pub struct GameResultEvaluator;

impl GameResultEvaluator {
    pub fn evaluate(game_state: &GameState) -> Option<GameResult> {
        let hash = game_state.zobrist_key();
        if game_state.position_count(hash) >= REPETITION_DRAW_COUNT {
            return Some(GameResult::draw(GameEndReason::ThreefoldRepetition));
        }

        if game_state.halfmove_clock() >= FIFTY_MOVE_HALFMOVE_LIMIT {
            return Some(GameResult::draw(GameEndReason::FiftyMoveRule));
        }

        if is_insufficient_material(game_state.board()) {
            return Some(GameResult::draw(GameEndReason::InsufficientMaterial));
        }

        if LegalMoveGenerator.has_any_legal_move(game_state) {
            return None;
        }

        let side = game_state.side_to_move();
        if is_king_in_check(game_state.board(), side) {
            Some(GameResult::win(side.opposite()))
        } else {
            Some(GameResult::draw(GameEndReason::Stalemate))
        }
    }
}

/// Bare kings, a lone extra minor piece, or two bishops on one shade.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut count = 0usize;
    let mut minors = 0usize;
    let mut bishop_shades = [0usize; 2];

    for (pos, piece) in board.pieces() {
        count += 1;
        if count > 4 {
            return false;
        }
        if piece.kind.is_minor() {
            minors += 1;
        }
        if piece.kind == PieceKind::Bishop {
            bishop_shades[pos.shade() as usize] += 1;
        }
    }

    match count {
        2 => true,
        3 => minors == 1,
        4 => bishop_shades[0] == 2 || bishop_shades[1] == 2,
        _ => false,
    }
}
