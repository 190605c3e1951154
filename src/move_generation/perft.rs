//! Move-path enumeration for validating generation and make/undo.
//!
//! All walks run with the simulation flag raised and restore it on return.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of legal move paths of length `depth`.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    with_simulation(game_state, |game| count_nodes(game, depth))
}

/// Leaf counts broken down by move kind, check and mate.
pub fn perft_counts(game_state: &mut GameState, depth: u8) -> PerftCounts {
    with_simulation(game_state, |game| {
        let mut counts = PerftCounts::default();
        if depth == 0 {
            counts.nodes = 1;
        } else {
            collect_counts(game, depth, &mut counts);
        }
        counts
    })
}

/// Like `perft`, but asserts at every node that the incremental hash equals
/// a from-scratch recomputation and that each undo restores the prior
/// hash, position counts, rights and clocks.
pub fn perft_checked(game_state: &mut GameState, depth: u8) -> u64 {
    with_simulation(game_state, |game| count_nodes_checked(game, depth))
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    with_simulation(game_state, |game| {
        game.legal_moves()
            .into_iter()
            .map(|mv| {
                game.make_move_unchecked(mv);
                let nodes = count_nodes(game, depth - 1);
                game.undo_move();
                (mv, nodes)
            })
            .collect()
    })
}

fn with_simulation<T>(game_state: &mut GameState, walk: impl FnOnce(&mut GameState) -> T) -> T {
    let previous = game_state.set_simulation(true);
    let out = walk(game_state);
    game_state.set_simulation(previous);
    out
}

fn count_nodes(game: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        game.make_move_unchecked(mv);
        nodes += count_nodes(game, depth - 1);
        game.undo_move();
    }
    nodes
}

fn collect_counts(game: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    for mv in game.legal_moves() {
        game.make_move_unchecked(mv);
        if depth == 1 {
            counts.merge(leaf_counts(game, mv));
        } else {
            collect_counts(game, depth - 1, counts);
        }
        game.undo_move();
    }
}

fn leaf_counts(game: &GameState, mv: Move) -> PerftCounts {
    let mut leaf = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    if mv.is_capture() {
        leaf.captures = 1;
    }
    match mv.kind {
        MoveKind::EnPassant => leaf.en_passant = 1,
        MoveKind::Castling => leaf.castles = 1,
        MoveKind::Promotion { .. } => leaf.promotions = 1,
        _ => {}
    }
    if game.is_in_check() {
        leaf.checks = 1;
        if matches!(
            game.result(),
            Some(GameResult {
                reason: GameEndReason::Checkmate,
                ..
            })
        ) {
            leaf.checkmates = 1;
        }
    }
    leaf
}

fn count_nodes_checked(game: &mut GameState, depth: u8) -> u64 {
    assert_eq!(
        game.zobrist_key(),
        game.recomputed_zobrist_key(),
        "incremental hash drifted from recomputation"
    );
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in game.legal_moves() {
        let hash = game.zobrist_key();
        let counts = game.hasher().position_counts().clone();
        let rights = game.castling_rights();
        let ep = game.en_passant_file();
        let clocks = (game.halfmove_clock(), game.fullmove_number());
        let board = *game.board();

        game.make_move_unchecked(mv);
        nodes += count_nodes_checked(game, depth - 1);
        game.undo_move();

        assert_eq!(game.zobrist_key(), hash, "undo of {mv:?} did not restore hash");
        assert_eq!(game.hasher().position_counts(), &counts, "undo of {mv:?} left stale counts");
        assert_eq!(game.castling_rights(), rights);
        assert_eq!(game.en_passant_file(), ep);
        assert_eq!((game.halfmove_clock(), game.fullmove_number()), clocks);
        assert_eq!(*game.board(), board);
    }
    nodes
}
