//! Ray walkers for bishops, rooks and queens.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS, QUEEN_DIRECTIONS,
};

/// Direction set for a sliding piece kind, or `None` for leapers and pawns.
pub fn slider_directions(kind: PieceKind) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::Bishop => Some(&DIAGONAL_DIRECTIONS),
        PieceKind::Rook => Some(&ORTHOGONAL_DIRECTIONS),
        PieceKind::Queen => Some(&QUEEN_DIRECTIONS),
        _ => None,
    }
}

/// Walk each ray until the edge, an own piece, or the first enemy (captured).
pub fn generate_sliding_moves(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for (d_row, d_col) in directions {
        let mut current = from.offset(*d_row, *d_col);
        while let Some(to) = current {
            match board.get(to) {
                None => out.push(Move::new(from, to, MoveKind::Quiet)),
                Some(piece) => {
                    if piece.color != color {
                        out.push(Move::new(from, to, MoveKind::Capture));
                    }
                    break;
                }
            }
            current = to.offset(*d_row, *d_col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(board: &Board, from: Position, kind: PieceKind) -> usize {
        let mut out = Vec::new();
        let dirs = slider_directions(kind).expect("slider kind");
        generate_sliding_moves(board, from, Color::White, dirs, &mut out);
        out.len()
    }

    #[test]
    fn open_board_mobility() {
        let board = Board::new_empty();
        assert_eq!(count(&board, Position::new(4, 3), PieceKind::Rook), 14);
        assert_eq!(count(&board, Position::new(4, 3), PieceKind::Bishop), 13);
        assert_eq!(count(&board, Position::new(4, 3), PieceKind::Queen), 27);
    }

    #[test]
    fn start_position_sliders_are_boxed_in() {
        let board = Board::standard();
        assert_eq!(count(&board, Position::new(7, 0), PieceKind::Rook), 0);
        assert_eq!(count(&board, Position::new(7, 3), PieceKind::Queen), 0);
    }

    #[test]
    fn ray_stops_on_capture() {
        let mut board = Board::new_empty();
        board.set(Position::new(4, 0), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        let mut out = Vec::new();
        generate_sliding_moves(&board, Position::new(7, 0), Color::White, &[(-1, 0)], &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].kind, MoveKind::Capture);
    }

    #[test]
    fn leapers_have_no_rays() {
        assert!(slider_directions(PieceKind::Knight).is_none());
        assert!(slider_directions(PieceKind::King).is_none());
    }
}
