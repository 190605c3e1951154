use crate::game_state::board::Board;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::KING_STEPS;

/// Single steps plus castling. Castling is emitted only when the right is
/// held, the rook stands on its home square, the squares between are empty
/// and the king's start, transit and destination squares are not attacked.
pub fn generate_king_moves(
    board: &Board,
    from: Position,
    color: Color,
    castling_rights: CastlingRights,
    out: &mut Vec<Move>,
) {
    for (d_row, d_col) in KING_STEPS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match board.get(to) {
            None => out.push(Move::new(from, to, MoveKind::Quiet)),
            Some(piece) if piece.color != color => {
                out.push(Move::new(from, to, MoveKind::Capture));
            }
            Some(_) => {}
        }
    }

    let row = color.home_row();
    if from != Position::new(row, KING_START_COL) {
        return;
    }

    if castling_rights.contains(CastlingRights::kingside(color))
        && can_castle(board, color, KINGSIDE_ROOK_COL, &[5, 6], &[4, 5, 6])
    {
        out.push(Move::new(
            from,
            Position::new(row, KINGSIDE_KING_TO_COL),
            MoveKind::Castling,
        ));
    }

    if castling_rights.contains(CastlingRights::queenside(color))
        && can_castle(board, color, QUEENSIDE_ROOK_COL, &[1, 2, 3], &[4, 3, 2])
    {
        out.push(Move::new(
            from,
            Position::new(row, QUEENSIDE_KING_TO_COL),
            MoveKind::Castling,
        ));
    }
}

fn can_castle(
    board: &Board,
    color: Color,
    rook_col: u8,
    empty_cols: &[u8],
    safe_cols: &[u8],
) -> bool {
    let row = color.home_row();
    let attacker = color.opposite();
    board.get(Position::new(row, rook_col)) == Some(Piece::new(PieceKind::Rook, color))
        && empty_cols
            .iter()
            .all(|col| board.is_empty(Position::new(row, *col)))
        && safe_cols
            .iter()
            .all(|col| !is_square_attacked(board, Position::new(row, *col), attacker))
}
