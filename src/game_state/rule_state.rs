//! Castling rights and en-passant file derived from applied moves.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleState {
    pub castling_rights: CastlingRights,
    pub en_passant_file: Option<u8>,
}

impl RuleState {
    pub const fn new(castling_rights: CastlingRights, en_passant_file: Option<u8>) -> Self {
        Self {
            castling_rights,
            en_passant_file,
        }
    }

    /// Strip rights invalidated by `mv`. Rights are never restored here.
    pub fn update_castling_rights(&mut self, moved: Piece, mv: Move, captured: Option<Piece>) {
        match moved.kind {
            PieceKind::King => self.castling_rights.remove(CastlingRights::both(moved.color)),
            PieceKind::Rook => {
                if let Some(flag) = home_rook_flag(moved.color, mv.from) {
                    self.castling_rights.remove(flag);
                }
            }
            _ => {}
        }

        if let Some(victim) = captured {
            if victim.kind == PieceKind::Rook {
                if let Some(flag) = home_rook_flag(victim.color, mv.to) {
                    self.castling_rights.remove(flag);
                }
            }
        }
    }

    /// Set only immediately after a two-square pawn advance.
    pub fn update_en_passant_file(&mut self, moved: Piece, mv: Move) {
        self.en_passant_file = if moved.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2
        {
            Some(mv.from.col)
        } else {
            None
        };
    }
}

/// Castling flag guarded by a rook of `color` standing on `square`.
fn home_rook_flag(color: Color, square: Position) -> Option<CastlingRights> {
    if square.row != color.home_row() {
        return None;
    }
    match square.col {
        KINGSIDE_ROOK_COL => Some(CastlingRights::kingside(color)),
        QUEENSIDE_ROOK_COL => Some(CastlingRights::queenside(color)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(
            Position::new(from.0, from.1),
            Position::new(to.0, to.1),
            MoveKind::Quiet,
        )
    }

    #[test]
    fn king_move_strips_both_rights() {
        let mut rules = RuleState::new(CastlingRights::ALL, None);
        let king = Piece::new(PieceKind::King, Color::White);
        rules.update_castling_rights(king, quiet((7, 4), (7, 5)), None);
        assert_eq!(rules.castling_rights, CastlingRights::both(Color::Black));
    }

    #[test]
    fn rook_move_from_home_strips_one_right() {
        let mut rules = RuleState::new(CastlingRights::ALL, None);
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        rules.update_castling_rights(rook, quiet((0, 0), (3, 0)), None);
        assert!(!rules.castling_rights.contains(CastlingRights::BLACK_QUEENSIDE));
        assert!(rules.castling_rights.contains(CastlingRights::BLACK_KINGSIDE));
    }

    #[test]
    fn rook_move_off_home_rank_keeps_rights() {
        let mut rules = RuleState::new(CastlingRights::ALL, None);
        let rook = Piece::new(PieceKind::Rook, Color::White);
        rules.update_castling_rights(rook, quiet((4, 7), (4, 3)), None);
        assert_eq!(rules.castling_rights, CastlingRights::ALL);
    }

    #[test]
    fn capturing_home_rook_strips_victim_right() {
        let mut rules = RuleState::new(CastlingRights::ALL, None);
        let bishop = Piece::new(PieceKind::Bishop, Color::Black);
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let mv = Move::new(Position::new(1, 6), Position::new(7, 0), MoveKind::Capture);
        rules.update_castling_rights(bishop, mv, Some(rook));
        assert!(!rules.castling_rights.contains(CastlingRights::WHITE_QUEENSIDE));
    }

    #[test]
    fn en_passant_file_lives_one_ply() {
        let mut rules = RuleState::default();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        rules.update_en_passant_file(pawn, quiet((6, 4), (4, 4)));
        assert_eq!(rules.en_passant_file, Some(4));
        let knight = Piece::new(PieceKind::Knight, Color::Black);
        rules.update_en_passant_file(knight, quiet((0, 1), (2, 2)));
        assert_eq!(rules.en_passant_file, None);
    }
}
