//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! The tree is walked with `make_move` / `undo_move` on the caller's state
//! while its simulation flag is raised. The transposition table persists
//! across iterations; killer and history tables are reset before each one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;

use crate::game_state::chess_types::*;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::move_ordering::MovePicker;
use crate::search::search_heuristics::SearchTables;
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};

pub const MATE_SCORE: i32 = 1_000_000;
pub const SCORE_INFINITY: i32 = 10_000_000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Treated as 1 when zero, so a position with legal moves always yields one.
    pub max_depth: u8,
    pub tt_size_mb: usize,
    /// Polled before each iteration after the first.
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            tt_size_mb: 16,
            stop_flag: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub tt_stats: TTStats,
}

/// Best move and score for the side to move, searched to `depth` plies with
/// the default evaluator and a fresh transposition table.
pub fn search(game_state: &mut GameState, depth: u8) -> (Option<Move>, i32) {
    let result =
        iterative_deepening_search(game_state, &PieceSquareScorer, &SearchConfig::with_depth(depth));
    (result.best_move, result.best_score)
}

pub fn iterative_deepening_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult {
    let mut tt = TranspositionTable::new_with_mb(config.tt_size_mb);
    iterative_deepening_search_with_tt(game_state, scorer, config, &mut tt)
}

/// Same as `iterative_deepening_search` but reuses a caller-owned table.
pub fn iterative_deepening_search_with_tt<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: &SearchConfig,
    tt: &mut TranspositionTable,
) -> SearchResult {
    let started = Instant::now();
    let previous_simulation = game_state.set_simulation(true);

    let mut result = SearchResult {
        best_score: static_or_terminal_score(game_state, scorer, 0),
        ..SearchResult::default()
    };

    let max_depth = config.max_depth.max(1);
    let mut tables = SearchTables::new(max_depth);
    let mut nodes = 0u64;

    for depth in 1..=max_depth {
        if depth > 1 && stop_requested(config) {
            debug!("search stopped before depth {depth}");
            break;
        }

        tables.reset();
        let mut ctx = SearchContext {
            scorer,
            tt: &mut *tt,
            tables: &mut tables,
            nodes: 0,
        };
        let (best_move, best_score) = ctx.search_root(game_state, depth);
        nodes += ctx.nodes;

        result.best_move = best_move;
        result.best_score = best_score;
        result.reached_depth = depth;
        debug!(
            "depth {depth} score {best_score} nodes {} best {best_move:?}",
            ctx.nodes
        );

        if best_move.is_none() {
            break;
        }
    }

    game_state.set_simulation(previous_simulation);

    result.nodes = nodes;
    result.elapsed_ms = started.elapsed().as_millis() as u64;
    result.tt_stats = tt.stats();
    result
}

fn stop_requested(config: &SearchConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Mated side to move scores `-(MATE_SCORE + depth)`, so shallower mates
/// (more remaining depth) are preferred. Draws score zero.
#[inline]
fn terminal_score(result: GameResult, depth: u8) -> i32 {
    if result.is_draw() {
        0
    } else {
        -(MATE_SCORE + i32::from(depth))
    }
}

fn static_or_terminal_score<S: BoardScorer>(game_state: &GameState, scorer: &S, depth: u8) -> i32 {
    match game_state.result() {
        Some(result) => terminal_score(result, depth),
        None => scorer.score(game_state),
    }
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    tt: &'a mut TranspositionTable,
    tables: &'a mut SearchTables,
    nodes: u64,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    /// The table only orders moves here; a root probe never returns early.
    fn search_root(&mut self, game_state: &mut GameState, depth: u8) -> (Option<Move>, i32) {
        self.nodes += 1;
        if let Some(result) = game_state.result() {
            return (None, terminal_score(result, depth));
        }

        let hash = game_state.zobrist_key();
        let tt_move = self.tt.probe(hash).and_then(|entry| entry.best_move);
        let picker = MovePicker::new(
            game_state.legal_moves(),
            game_state.board(),
            depth,
            tt_move,
            self.tables,
        );

        let mut alpha = -SCORE_INFINITY;
        let beta = SCORE_INFINITY;
        let mut best_move = None;

        for mv in picker {
            game_state.make_move_unchecked(mv);
            let score = -self.negamax(game_state, depth - 1, -beta, -alpha);
            game_state.undo_move();

            if best_move.is_none() || score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        if best_move.is_none() {
            // Only reachable for a hand-built state whose result was never evaluated.
            return (None, self.scorer.score(game_state));
        }
        self.tt.store(TTEntry {
            key: hash,
            depth,
            score: alpha,
            bound: Bound::Exact,
            best_move,
        });
        (best_move, alpha)
    }

    fn negamax(&mut self, game_state: &mut GameState, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(result) = game_state.result() {
            return terminal_score(result, depth);
        }
        if depth == 0 {
            return self.scorer.score(game_state);
        }

        let hash = game_state.zobrist_key();
        let alpha_original = alpha;
        let mut tt_move = None;

        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let picker = MovePicker::new(
            game_state.legal_moves(),
            game_state.board(),
            depth,
            tt_move,
            self.tables,
        );
        let mut best_move = None;

        for mv in picker {
            game_state.make_move_unchecked(mv);
            let score = -self.negamax(game_state, depth - 1, -beta, -alpha);
            game_state.undo_move();

            if score >= beta {
                if !mv.is_capture() {
                    self.tables.killers.record(depth, mv);
                    self.tables.history.record(mv, depth);
                }
                self.tt.store(TTEntry {
                    key: hash,
                    depth,
                    score: beta,
                    bound: Bound::Lower,
                    best_move: Some(mv),
                });
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        let bound = if alpha <= alpha_original {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt.store(TTEntry {
            key: hash,
            depth,
            score: alpha,
            bound,
            best_move,
        });
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn assert_mate_score(score: i32, depth: u8) {
        assert!(
            (MATE_SCORE..=MATE_SCORE + i32::from(depth)).contains(&score),
            "expected a mate score, got {score}"
        );
    }

    #[test]
    fn finds_queen_mate_in_one() {
        let mut state = game("7k/8/5KQ1/8/8/8/8/8 w - - 0 1");
        let (best, score) = search(&mut state, 3);
        assert_eq!(best.map(move_to_long_algebraic).as_deref(), Some("g6g7"));
        assert_mate_score(score, 3);
    }

    #[test]
    fn finds_back_rank_mate_for_black() {
        let mut state = game("6k1/5ppp/8/r7/8/8/5PPP/6K1 b - - 0 1");
        let (best, score) = search(&mut state, 3);
        assert_eq!(best.map(move_to_long_algebraic).as_deref(), Some("a5a1"));
        assert_mate_score(score, 3);
    }

    #[test]
    #[ignore = "slow in debug builds"]
    fn finds_fried_liver_mate_in_three() {
        // Bxd5+ Qxd5 Qxd5+ Be6 Qxe6# is forced.
        let mut state = game("r1bq1bkr/ppp3pp/2n5/3np3/2B5/5Q2/PPPP1PPP/RNB1K2R w - - 0 1");
        let (best, score) = search(&mut state, 5);
        let best = best.expect("a move should be found");
        assert!(state.legal_moves().contains(&best));
        assert_mate_score(score, 5);
    }

    #[test]
    fn best_move_is_legal_and_state_is_restored() {
        let mut state = GameState::new_game();
        let hash = state.zobrist_key();
        let (best, _) = search(&mut state, 3);
        let best = best.expect("start position has moves");
        assert!(state.legal_moves().contains(&best));
        assert_eq!(state.zobrist_key(), hash);
        assert!(state.history().is_empty());
        assert!(!state.is_simulation());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn search_is_deterministic() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let first = iterative_deepening_search(&mut game(fen), &PieceSquareScorer, &SearchConfig::with_depth(3));
        let second = iterative_deepening_search(&mut game(fen), &PieceSquareScorer, &SearchConfig::with_depth(3));
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.best_score, second.best_score);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.reached_depth, 3);
    }

    #[test]
    fn terminal_roots_return_no_move() {
        let mut mated = game("7k/5KQ1/8/8/8/8/8/8 b - - 0 1");
        assert_eq!(search(&mut mated, 2), (None, -(MATE_SCORE + 1)));

        let mut stalemated = game("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1");
        assert_eq!(search(&mut stalemated, 2), (None, 0));
    }

    #[test]
    fn takes_hanging_queen() {
        let mut state = game("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let result = iterative_deepening_search(&mut state, &MaterialScorer, &SearchConfig::with_depth(2));
        assert_eq!(result.best_move.map(move_to_long_algebraic).as_deref(), Some("d1d5"));
        assert!(result.best_score > 0);
    }

    #[test]
    fn raised_stop_flag_ends_after_first_iteration() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = SearchConfig {
            max_depth: 4,
            stop_flag: Some(Arc::clone(&flag)),
            ..SearchConfig::default()
        };
        let result = iterative_deepening_search(&mut GameState::new_game(), &PieceSquareScorer, &config);
        assert_eq!(result.reached_depth, 1);
        assert!(result.best_move.is_some());
    }

    /// Full-width negamax with no pruning, tables or ordering.
    fn minimax(game: &mut GameState, depth: u8) -> i32 {
        if let Some(result) = game.result() {
            return terminal_score(result, depth);
        }
        if depth == 0 {
            return PieceSquareScorer.score(game);
        }
        let mut best = -SCORE_INFINITY;
        for mv in game.legal_moves() {
            game.make_move_unchecked(mv);
            best = best.max(-minimax(game, depth - 1));
            game.undo_move();
        }
        best
    }

    const AGREEMENT_CASES: [(&str, u8); 5] = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("6k1/5ppp/8/r7/8/8/5PPP/6K1 b - - 0 1", 3),
        ("r1bq1bkr/ppp3pp/2n5/3np3/2B5/5Q2/PPPP1PPP/RNB1K2R w - - 0 1", 2),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
    ];

    #[test]
    fn pruned_search_agrees_with_full_width_minimax() {
        for (fen, max_depth) in AGREEMENT_CASES {
            for depth in 1..=max_depth {
                let mut state = game(fen);
                state.set_simulation(true);
                let expected = minimax(&mut state, depth);
                state.set_simulation(false);

                let (best, score) = search(&mut state, depth);
                assert_eq!(score, expected, "score mismatch at depth {depth} for {fen}");
                let best = best.expect("position has legal moves");
                assert!(state.legal_moves().contains(&best));
            }
        }
    }

    #[test]
    fn warm_table_search_keeps_exact_score() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "6k1/5ppp/8/r7/8/8/5PPP/6K1 b - - 0 1",
        ] {
            let mut state = game(fen);
            state.set_simulation(true);
            let expected = minimax(&mut state, 3);
            state.set_simulation(false);

            let config = SearchConfig::with_depth(3);
            let mut tt = TranspositionTable::new_with_mb(4);
            let cold = iterative_deepening_search_with_tt(&mut state, &PieceSquareScorer, &config, &mut tt);
            let hits_after_cold = tt.stats().hits;
            let warm = iterative_deepening_search_with_tt(&mut state, &PieceSquareScorer, &config, &mut tt);

            assert_eq!(cold.best_score, expected, "cold search for {fen}");
            assert_eq!(warm.best_score, expected, "warm search for {fen}");
            assert!(tt.stats().hits > hits_after_cold);
        }
    }

    #[test]
    fn quiet_cutoffs_record_killers() {
        let mut state = GameState::new_game();
        state.set_simulation(true);
        let mut tt = TranspositionTable::with_entries(1 << 16);
        let mut tables = SearchTables::new(3);
        let mut ctx = SearchContext {
            scorer: &PieceSquareScorer,
            tt: &mut tt,
            tables: &mut tables,
            nodes: 0,
        };
        let (best, _) = ctx.search_root(&mut state, 3);
        assert!(best.is_some());
        assert!((1..=2).any(|depth| tables.killers.get(depth)[0].is_some()));
    }

    #[test]
    fn zero_depth_still_returns_a_move() {
        let mut state = GameState::new_game();
        let (best, _) = search(&mut state, 0);
        assert!(best.is_some());
        let result =
            iterative_deepening_search(&mut state, &PieceSquareScorer, &SearchConfig::with_depth(0));
        assert_eq!(result.reached_depth, 1);
    }

    #[test]
    fn shared_table_collects_stats() {
        let mut tt = TranspositionTable::with_entries(1 << 12);
        let mut state = GameState::new_game();
        let result = iterative_deepening_search_with_tt(
            &mut state,
            &PieceSquareScorer,
            &SearchConfig::with_depth(2),
            &mut tt,
        );
        assert!(result.tt_stats.stores > 0);
        assert!(result.nodes > 20);
        assert!(!tt.is_empty());
    }
}
