use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::KNIGHT_JUMPS;

pub fn generate_knight_moves(board: &Board, from: Position, color: Color, out: &mut Vec<Move>) {
    for (d_row, d_col) in KNIGHT_JUMPS {
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
}
