//! Reversible game state.
//!
//! `GameState` owns the board, rule state, incremental hash and move history.
//! `make_move` / `undo_move` are the only mutation paths once a position has
//! been loaded; every applied move pushes one `MoveRecord` that the matching
//! undo consumes.

use log::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_result::GameResultEvaluator;
use crate::game_state::rule_state::RuleState;
use crate::move_generation::legal_move_apply::{apply_move_to_board, revert_move_on_board};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::zobrist::{compute_zobrist_key, HashUpdate, ZobristHasher};
use crate::utils::fen_parser::parse_fen;

/// Notification queued for a host while the state is not simulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MoveMade(MoveRecord),
    MoveUndone(MoveRecord),
    GameEnded(GameResult),
}

/// Everything a position loader supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSetup {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_file: Option<u8>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl PositionSetup {
    pub fn standard() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    rules: RuleState,

    halfmove_clock: u16,
    fullmove_number: u16,

    hasher: ZobristHasher,
    history: Vec<MoveRecord>,
    result: Option<GameResult>,

    simulation: bool,
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        Self::from_setup(PositionSetup::standard())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Load an arbitrary position. The hash is computed from scratch and the
    /// terminal result evaluated immediately.
    pub fn from_setup(setup: PositionSetup) -> Self {
        let mut state = Self {
            board: setup.board,
            side_to_move: setup.side_to_move,
            rules: RuleState::new(setup.castling_rights, setup.en_passant_file),
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
            hasher: ZobristHasher::default(),
            history: Vec::new(),
            result: None,
            simulation: false,
            events: Vec::new(),
        };
        state.recompute_hash();
        state
    }

    /// Rebuild the hash from the current fields, restart repetition counts
    /// at `{hash: 1}` and re-evaluate the result. Move history is dropped
    /// since its records no longer describe a path to this position.
    pub fn recompute_hash(&mut self) {
        self.history.clear();
        self.hasher.reset(self.recomputed_zobrist_key());
        self.result = GameResultEvaluator::evaluate(self);
    }

    // --- Accessors ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.rules.castling_rights
    }

    #[inline]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.rules.en_passant_file
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.hasher.current()
    }

    /// Hash computed from scratch; equals `zobrist_key` whenever state is consistent.
    pub fn recomputed_zobrist_key(&self) -> u64 {
        compute_zobrist_key(
            &self.board,
            self.side_to_move,
            self.rules.castling_rights,
            self.rules.en_passant_file,
        )
    }

    #[inline]
    pub fn position_count(&self, hash: u64) -> u32 {
        self.hasher.position_count(hash)
    }

    #[inline]
    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }

    // --- Move generation ---

    pub fn legal_moves(&self) -> Vec<Move> {
        LegalMoveGenerator.generate_legal_moves(self)
    }

    pub fn legal_moves_for_square(&self, from: Position) -> Vec<Move> {
        LegalMoveGenerator.generate_legal_moves_for_square(self, from)
    }

    // --- Simulation & notifications ---

    #[inline]
    pub fn is_simulation(&self) -> bool {
        self.simulation
    }

    /// Returns the previous flag value.
    pub fn set_simulation(&mut self, simulation: bool) -> bool {
        std::mem::replace(&mut self.simulation, simulation)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Mutation ---

    /// Apply `mv` if it is legal and the game is not over. Returns `false`
    /// and leaves the state untouched otherwise.
    pub fn make_move(&mut self, mv: Move) -> bool {
        if self.result.is_some() {
            trace!("rejected {mv:?}: game already over");
            return false;
        }
        if !self.legal_moves_for_square(mv.from).contains(&mv) {
            trace!("rejected illegal {mv:?}");
            return false;
        }
        self.make_move_unchecked(mv);
        true
    }

    /// Apply a move already known to be legal here. Used by search and perft.
    pub(crate) fn make_move_unchecked(&mut self, mv: Move) {
        let Some(moved_piece) = self.board.get(mv.from) else {
            panic!("make_move_unchecked: empty origin square in {mv:?}");
        };
        debug_assert_eq!(moved_piece.color, self.side_to_move);

        let hash_before = self.hasher.current();
        let rules_before = self.rules;
        let halfmove_clock_before = self.halfmove_clock;
        let fullmove_number_before = self.fullmove_number;
        let result_before = self.result;

        let captured_piece = apply_move_to_board(&mut self.board, mv);

        self.rules.update_castling_rights(moved_piece, mv, captured_piece);
        self.rules.update_en_passant_file(moved_piece, mv);

        if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opposite();

        self.hasher.apply_move(&HashUpdate {
            mv,
            moved_piece,
            captured_piece,
            castling_before: rules_before.castling_rights,
            castling_after: self.rules.castling_rights,
            en_passant_before: rules_before.en_passant_file,
            en_passant_after: self.rules.en_passant_file,
        });

        let record = MoveRecord {
            mv,
            moved_piece,
            captured_piece,
            halfmove_clock_before,
            halfmove_clock_after: self.halfmove_clock,
            fullmove_number_before,
            fullmove_number_after: self.fullmove_number,
            hash_before,
            hash_after: self.hasher.current(),
            castling_before: rules_before.castling_rights,
            castling_after: self.rules.castling_rights,
            en_passant_file_before: rules_before.en_passant_file,
            en_passant_file_after: self.rules.en_passant_file,
            gives_check: self.is_in_check(),
            result_before,
        };
        self.history.push(record);

        self.result = GameResultEvaluator::evaluate(self);

        if !self.simulation {
            debug!("move {:?} -> {:?}", mv.from, mv.to);
            self.events.push(GameEvent::MoveMade(record));
            if let Some(result) = self.result {
                debug!("game over: {result:?}");
                self.events.push(GameEvent::GameEnded(result));
            }
        }
    }

    /// Reverse the most recent move. `None` (and no change) on empty history.
    pub fn undo_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;

        self.hasher.undo_move(record.hash_before);
        self.side_to_move = self.side_to_move.opposite();
        revert_move_on_board(
            &mut self.board,
            record.mv,
            record.moved_piece,
            record.captured_piece,
        );
        self.rules = RuleState::new(record.castling_before, record.en_passant_file_before);
        self.halfmove_clock = record.halfmove_clock_before;
        self.fullmove_number = record.fullmove_number_before;
        self.result = record.result_before;

        if !self.simulation {
            debug!("undo {:?} -> {:?}", record.mv.from, record.mv.to);
            self.events.push(GameEvent::MoveUndone(record));
        }
        Some(record)
    }
}
