//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_rules::castling_rook_cols;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.next_u64();
            }
        }
    }

    let side_to_move = rng.next_u64();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Return the Zobrist key for a piece standing on `square`.
#[inline]
pub fn piece_square_key(piece: Piece, square: Position) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square.index()]
}

/// XOR of one key per available castling flag.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    let keys = &tables().castling;
    CastlingRights::FLAGS
        .iter()
        .zip(keys)
        .filter(|(flag, _)| rights.contains(**flag))
        .fold(0u64, |acc, (_, key)| acc ^ key)
}

/// Return the Zobrist key contribution for an en-passant file.
#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Return the side-to-move toggle key (xor in when Black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_file: Option<u8>,
) -> u64 {
    let mut key = board
        .pieces()
        .fold(0u64, |acc, (pos, piece)| acc ^ piece_square_key(piece, pos));

    key ^= castling_key(castling_rights);

    if let Some(file) = en_passant_file {
        key ^= en_passant_file_key(file);
    }

    if side_to_move == Color::Black {
        key ^= side_to_move_key();
    }

    key
}

/// Everything the incremental update needs to know about one applied move.
#[derive(Debug, Clone, Copy)]
pub struct HashUpdate {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub castling_before: CastlingRights,
    pub castling_after: CastlingRights,
    pub en_passant_before: Option<u8>,
    pub en_passant_after: Option<u8>,
}

/// Incremental position key plus occurrence counts for repetition detection.
#[derive(Debug, Clone, Default)]
pub struct ZobristHasher {
    current: u64,
    position_counts: HashMap<u64, u32>,
}

impl ZobristHasher {
    /// Start tracking from `hash`, counted once.
    pub fn new(hash: u64) -> Self {
        let mut hasher = Self::default();
        hasher.reset(hash);
        hasher
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[inline]
    pub fn position_count(&self, hash: u64) -> u32 {
        self.position_counts.get(&hash).copied().unwrap_or(0)
    }

    #[inline]
    pub fn position_counts(&self) -> &HashMap<u64, u32> {
        &self.position_counts
    }

    /// Forget all history and restart from `hash`.
    pub fn reset(&mut self, hash: u64) {
        self.current = hash;
        self.position_counts.clear();
        self.position_counts.insert(hash, 1);
    }

    /// XOR out stale components, XOR in new ones, then count the new position.
    pub fn apply_move(&mut self, update: &HashUpdate) {
        let HashUpdate {
            mv,
            moved_piece,
            captured_piece,
            ..
        } = *update;

        let mut key = self.current;
        key ^= piece_square_key(moved_piece, mv.from);

        if let (Some(victim), Some(square)) = (captured_piece, mv.capture_square()) {
            key ^= piece_square_key(victim, square);
        }

        let landed = match mv.promotion() {
            Some(kind) => Piece::new(kind, moved_piece.color),
            None => moved_piece,
        };
        key ^= piece_square_key(landed, mv.to);

        if mv.kind == MoveKind::Castling {
            let rook = Piece::new(PieceKind::Rook, moved_piece.color);
            let (rook_from, rook_to) = castling_rook_cols(mv.to.col);
            key ^= piece_square_key(rook, Position::new(mv.from.row, rook_from));
            key ^= piece_square_key(rook, Position::new(mv.from.row, rook_to));
        }

        if let Some(file) = update.en_passant_before {
            key ^= en_passant_file_key(file);
        }
        if let Some(file) = update.en_passant_after {
            key ^= en_passant_file_key(file);
        }

        key ^= castling_key(update.castling_before);
        key ^= castling_key(update.castling_after);

        key ^= side_to_move_key();

        self.current = key;
        *self.position_counts.entry(key).or_insert(0) += 1;
    }

    /// Uncount the current position and restore the stored prior key.
    ///
    /// The current position must have been counted by `apply_move`.
    pub fn undo_move(&mut self, hash_before: u64) {
        let current = self.current;
        match self.position_counts.get_mut(&current) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.position_counts.remove(&current);
                }
            }
            None => debug_assert!(false, "undo of uncounted position {current:#018x}"),
        }
        self.current = hash_before;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::find_legal_move;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key(), b.zobrist_key());
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(w.zobrist_key() ^ b.zobrist_key(), side_to_move_key());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key(), without_rights.zobrist_key());
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_eq!(no_ep.zobrist_key() ^ ep.zobrist_key(), en_passant_file_key(4));
    }

    #[test]
    fn castling_key_is_xor_of_individual_flags() {
        let all = castling_key(CastlingRights::ALL);
        let split = CastlingRights::FLAGS
            .iter()
            .fold(0u64, |acc, flag| acc ^ castling_key(*flag));
        assert_eq!(all, split);
        assert_eq!(castling_key(CastlingRights::NONE), 0);
    }

    #[test]
    fn incremental_matches_recompute_for_special_moves() {
        let cases = [
            ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"),
            ("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8"),
            ("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"),
            ("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q"),
            ("r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1", "a1a8"),
        ];
        for (fen, lan) in cases {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let mv = find_legal_move(&game, lan).expect("move should be legal");
            assert!(game.make_move(mv));
            assert_eq!(
                game.zobrist_key(),
                game.recomputed_zobrist_key(),
                "incremental hash drifted after {lan} in {fen}"
            );
        }
    }

    #[test]
    fn undo_prunes_position_counts() {
        let mut hasher = ZobristHasher::new(7);
        let update = HashUpdate {
            mv: Move::new(Position::new(6, 4), Position::new(5, 4), MoveKind::Quiet),
            moved_piece: Piece::new(PieceKind::Pawn, Color::White),
            captured_piece: None,
            castling_before: CastlingRights::NONE,
            castling_after: CastlingRights::NONE,
            en_passant_before: None,
            en_passant_after: None,
        };
        hasher.apply_move(&update);
        let after = hasher.current();
        assert_eq!(hasher.position_count(after), 1);
        hasher.undo_move(7);
        assert_eq!(hasher.current(), 7);
        assert_eq!(hasher.position_count(after), 0);
        assert_eq!(hasher.position_counts().len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "uncounted position")]
    fn undo_without_matching_apply_panics() {
        let mut hasher = ZobristHasher::new(7);
        hasher.undo_move(3);
        hasher.undo_move(1);
    }
}
