//! Per-search quiet-move ordering tables.
//!
//! Both tables are owned by one search call and reset at the start of every
//! iterative-deepening iteration.

use crate::game_state::chess_types::Move;

/// Two killer slots per remaining depth.
#[derive(Debug, Clone)]
pub struct KillerMoves {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerMoves {
    /// Holds depths `0..=max_depth`.
    pub fn new(max_depth: u8) -> Self {
        Self {
            slots: vec![[None; 2]; max_depth as usize + 1],
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }

    /// Push `mv` into the first slot, shifting the old first slot down.
    /// Recording the current first slot again is a no-op.
    pub fn record(&mut self, depth: u8, mv: Move) {
        let Some(slot) = self.slots.get_mut(depth as usize) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    #[inline]
    pub fn get(&self, depth: u8) -> [Option<Move>; 2] {
        self.slots.get(depth as usize).copied().unwrap_or([None; 2])
    }
}

/// Cutoff credit per (from, to) square pair.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: Box<[[i32; 64]; 64]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self {
            scores: Box::new([[0; 64]; 64]),
        }
    }
}

impl HistoryTable {
    pub fn clear(&mut self) {
        for row in self.scores.iter_mut() {
            row.fill(0);
        }
    }

    /// Adds `depth²`.
    pub fn record(&mut self, mv: Move, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.scores[mv.from.index()][mv.to.index()];
        *entry = entry.saturating_add(bonus);
    }

    #[inline]
    pub fn get(&self, mv: Move) -> i32 {
        self.scores[mv.from.index()][mv.to.index()]
    }
}

#[derive(Debug, Clone)]
pub struct SearchTables {
    pub killers: KillerMoves,
    pub history: HistoryTable,
}

impl SearchTables {
    pub fn new(max_depth: u8) -> Self {
        Self {
            killers: KillerMoves::new(max_depth),
            history: HistoryTable::default(),
        }
    }

    pub fn reset(&mut self) {
        self.killers.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{MoveKind, Position};

    fn mv(from_col: u8, to_col: u8) -> Move {
        Move::new(Position::new(7, from_col), Position::new(5, to_col), MoveKind::Quiet)
    }

    #[test]
    fn killer_slots_shift_and_skip_duplicates() {
        let mut killers = KillerMoves::new(3);
        killers.record(2, mv(1, 2));
        killers.record(2, mv(1, 2));
        assert_eq!(killers.get(2), [Some(mv(1, 2)), None]);
        killers.record(2, mv(6, 5));
        assert_eq!(killers.get(2), [Some(mv(6, 5)), Some(mv(1, 2))]);
        assert_eq!(killers.get(1), [None, None]);
    }

    #[test]
    fn out_of_range_depth_is_ignored() {
        let mut killers = KillerMoves::new(2);
        killers.record(7, mv(1, 2));
        assert_eq!(killers.get(7), [None, None]);
    }

    #[test]
    fn history_accumulates_depth_squared() {
        let mut history = HistoryTable::default();
        history.record(mv(1, 2), 3);
        history.record(mv(1, 2), 2);
        assert_eq!(history.get(mv(1, 2)), 13);
        assert_eq!(history.get(mv(6, 5)), 0);
        history.clear();
        assert_eq!(history.get(mv(1, 2)), 0);
    }

    #[test]
    fn reset_clears_both_tables() {
        let mut tables = SearchTables::new(4);
        tables.killers.record(4, mv(1, 2));
        tables.history.record(mv(1, 2), 4);
        tables.reset();
        assert_eq!(tables.killers.get(4), [None, None]);
        assert_eq!(tables.history.get(mv(1, 2)), 0);
    }
}
