use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Pushes, double pushes, diagonal captures, promotions (Q, R, B, N) and en passant.
pub fn generate_pawn_moves(
    board: &Board,
    from: Position,
    color: Color,
    en_passant_file: Option<u8>,
    out: &mut Vec<Move>,
) {
    let dir = color.pawn_direction();
    let start_row = color.home_row() as i8 + dir;
    let promotion_row = color.opposite().home_row();

    if let Some(one_step) = from.offset(dir, 0) {
        if board.is_empty(one_step) {
            push_pawn_move(from, one_step, false, promotion_row, out);

            if from.row as i8 == start_row {
                if let Some(two_step) = one_step.offset(dir, 0) {
                    if board.is_empty(two_step) {
                        out.push(Move::new(from, two_step, MoveKind::Quiet));
                    }
                }
            }
        }
    }

    for d_col in [-1i8, 1] {
        let Some(target) = from.offset(dir, d_col) else {
            continue;
        };
        if let Some(victim) = board.get(target) {
            if victim.color != color {
                push_pawn_move(from, target, true, promotion_row, out);
            }
        }
    }

    if let Some(ep_file) = en_passant_file {
        // Only a pawn that has reached its fifth rank can capture en passant.
        let fifth_row = color.opposite().home_row() as i8 - 3 * dir;
        if from.row as i8 == fifth_row && from.col.abs_diff(ep_file) == 1 {
            let bypassed = Position::new(from.row, ep_file);
            let target = Position::new((from.row as i8 + dir) as u8, ep_file);
            if board.get(bypassed) == Some(Piece::new(PieceKind::Pawn, color.opposite()))
                && board.is_empty(target)
            {
                out.push(Move::new(from, target, MoveKind::EnPassant));
            }
        }
    }
}

fn push_pawn_move(from: Position, to: Position, capture: bool, promotion_row: u8, out: &mut Vec<Move>) {
    if to.row == promotion_row {
        for piece in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, MoveKind::Promotion { piece, capture }));
        }
    } else if capture {
        out.push(Move::new(from, to, MoveKind::Capture));
    } else {
        out.push(Move::new(from, to, MoveKind::Quiet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_for(board: &Board, from: Position, color: Color, ep: Option<u8>) -> Vec<Move> {
        let mut out = Vec::new();
        generate_pawn_moves(board, from, color, ep, &mut out);
        out
    }

    #[test]
    fn start_row_pawn_has_single_and_double_push() {
        let board = Board::standard();
        let moves = moves_for(&board, Position::new(6, 4), Color::White, None);
        assert_eq!(
            moves,
            vec![
                Move::new(Position::new(6, 4), Position::new(5, 4), MoveKind::Quiet),
                Move::new(Position::new(6, 4), Position::new(4, 4), MoveKind::Quiet),
            ]
        );

        let black = moves_for(&board, Position::new(1, 2), Color::Black, None);
        assert_eq!(black.len(), 2);
        assert_eq!(black[1].to, Position::new(3, 2));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = Board::new_empty();
        board.set(Position::new(6, 0), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(Position::new(5, 0), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert!(moves_for(&board, Position::new(6, 0), Color::White, None).is_empty());
    }

    #[test]
    fn promotion_emits_four_pieces_in_order() {
        let mut board = Board::new_empty();
        board.set(Position::new(6, 3), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(Position::new(7, 4), Some(Piece::new(PieceKind::Rook, Color::White)));
        let moves = moves_for(&board, Position::new(6, 3), Color::Black, None);
        let promotions: Vec<_> = moves.iter().filter_map(|m| m.promotion()).collect();
        assert_eq!(moves.len(), 8);
        assert_eq!(&promotions[..4], &PieceKind::PROMOTIONS);
        assert!(moves[4..].iter().all(|m| m.is_capture() && m.to == Position::new(7, 4)));
    }

    #[test]
    fn en_passant_requires_fifth_rank_and_adjacent_file() {
        let mut board = Board::new_empty();
        board.set(Position::new(3, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(Position::new(3, 3), Some(Piece::new(PieceKind::Pawn, Color::Black)));

        let moves = moves_for(&board, Position::new(3, 4), Color::White, Some(3));
        assert!(moves.contains(&Move::new(
            Position::new(3, 4),
            Position::new(2, 3),
            MoveKind::EnPassant
        )));

        let far = moves_for(&board, Position::new(3, 4), Color::White, Some(1));
        assert!(far.iter().all(|m| m.kind != MoveKind::EnPassant));
    }
}
