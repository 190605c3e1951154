//! Square-attack detection for check tests and castling paths.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL_DIRECTIONS,
};

/// `false` when `color` has no king on the board.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Position, attacker: Color) -> bool {
    attacked_by_pawn(board, square, attacker)
        || attacked_by_leaper(board, square, attacker, PieceKind::Knight, &KNIGHT_JUMPS)
        || attacked_by_slider(board, square, attacker, PieceKind::Rook, &ORTHOGONAL_DIRECTIONS)
        || attacked_by_slider(board, square, attacker, PieceKind::Bishop, &DIAGONAL_DIRECTIONS)
        || attacked_by_leaper(board, square, attacker, PieceKind::King, &KING_STEPS)
}

fn attacked_by_pawn(board: &Board, square: Position, attacker: Color) -> bool {
    // An attacking pawn sits one step behind the target from its own view.
    let row = square.row as i8 - attacker.pawn_direction();
    [-1i8, 1].iter().any(|d_col| {
        board.get_at(row, square.col as i8 + d_col) == Some(Piece::new(PieceKind::Pawn, attacker))
    })
}

fn attacked_by_leaper(
    board: &Board,
    square: Position,
    attacker: Color,
    kind: PieceKind,
    offsets: &[(i8, i8)],
) -> bool {
    let wanted = Some(Piece::new(kind, attacker));
    offsets.iter().any(|(d_row, d_col)| {
        board.get_at(square.row as i8 + d_row, square.col as i8 + d_col) == wanted
    })
}

/// Ray scan stopping at the first blocker; `kind` or a queen attacks.
fn attacked_by_slider(
    board: &Board,
    square: Position,
    attacker: Color,
    kind: PieceKind,
    directions: &[(i8, i8)],
) -> bool {
    for (d_row, d_col) in directions {
        let mut current = square.offset(*d_row, *d_col);
        while let Some(pos) = current {
            if let Some(piece) = board.get(pos) {
                if piece.color == attacker && (piece.kind == kind || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
                break;
            }
            current = pos.offset(*d_row, *d_col);
        }
    }
    false
}
