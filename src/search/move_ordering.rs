//! Scored move list consumed best-first.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::search::board_scoring::piece_value;
use crate::search::search_heuristics::SearchTables;

pub const TT_MOVE_SCORE: i32 = i32::MAX;
pub const CAPTURE_BASE: i32 = 10_000;
pub const KILLER_SCORE_PRIMARY: i32 = 5_000;
pub const KILLER_SCORE_SECONDARY: i32 = 4_000;

/// Hands out moves by descending score. Each `next` selects the highest
/// remaining entry; equal scores come out in generation order.
#[derive(Debug, Clone)]
pub struct MovePicker {
    scored: Vec<(Move, i32)>,
    index: usize,
}

impl MovePicker {
    pub fn new(
        moves: Vec<Move>,
        board: &Board,
        depth: u8,
        tt_move: Option<Move>,
        tables: &SearchTables,
    ) -> Self {
        let killers = tables.killers.get(depth);
        let scored = moves
            .into_iter()
            .map(|mv| {
                let score = score_move(mv, board, tt_move, killers, tables);
                (mv, score)
            })
            .collect();
        Self { scored, index: 0 }
    }
}

impl Iterator for MovePicker {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.index >= self.scored.len() {
            return None;
        }
        let mut best = self.index;
        for i in self.index + 1..self.scored.len() {
            if self.scored[i].1 > self.scored[best].1 {
                best = i;
            }
        }
        // Shift rather than swap so ties stay in generation order.
        self.scored[self.index..=best].rotate_right(1);
        let mv = self.scored[self.index].0;
        self.index += 1;
        Some(mv)
    }
}

fn score_move(
    mv: Move,
    board: &Board,
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    tables: &SearchTables,
) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }

    if let Some(victim) = mv.capture_square().and_then(|sq| board.get(sq)) {
        let attacker = board.get(mv.from).map_or(0, |p| piece_value(p.kind));
        return CAPTURE_BASE + piece_value(victim.kind) * 10 - attacker;
    }

    if killers[0] == Some(mv) {
        KILLER_SCORE_PRIMARY
    } else if killers[1] == Some(mv) {
        KILLER_SCORE_SECONDARY
    } else {
        tables.history.get(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::{find_legal_move, move_to_long_algebraic};

    fn picked(game: &GameState, depth: u8, tt: Option<Move>, tables: &SearchTables) -> Vec<String> {
        MovePicker::new(game.legal_moves(), game.board(), depth, tt, tables)
            .map(move_to_long_algebraic)
            .collect()
    }

    #[test]
    fn captures_ordered_by_victim_then_attacker() {
        // Pawn takes queen scores above knight takes queen.
        let game = GameState::from_fen("4k3/8/2p5/4q3/3P4/5N2/8/4K3 w - - 0 1").expect("FEN should parse");
        let tables = SearchTables::new(4);
        let order = picked(&game, 2, None, &tables);
        assert_eq!(&order[..2], &["d4e5", "f3e5"]);
    }

    #[test]
    fn tt_move_comes_first_then_killers() {
        let game = GameState::new_game();
        let mut tables = SearchTables::new(4);
        let killer = find_legal_move(&game, "b1c3").expect("legal");
        tables.killers.record(3, killer);
        let tt = find_legal_move(&game, "h2h3").expect("legal");

        let order = picked(&game, 3, Some(tt), &tables);
        assert_eq!(order[0], "h2h3");
        assert_eq!(order[1], "b1c3");
        assert_eq!(order.len(), 20);
    }

    #[test]
    fn history_breaks_quiet_ties_and_order_is_stable() {
        let game = GameState::new_game();
        let mut tables = SearchTables::new(4);
        let favoured = find_legal_move(&game, "g2g4").expect("legal");
        tables.history.record(favoured, 2);

        let order = picked(&game, 1, None, &tables);
        assert_eq!(order[0], "g2g4");

        let generated: Vec<String> = game
            .legal_moves()
            .into_iter()
            .filter(|m| *m != favoured)
            .map(move_to_long_algebraic)
            .collect();
        assert_eq!(&order[1..], &generated[..]);
        assert_eq!(order, picked(&game, 1, None, &tables));
    }
}
