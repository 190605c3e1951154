//! Value types shared by every layer of the engine.
//!
//! Coordinates are zero-based `(row, col)` pairs where row 0 is Black's back
//! rank (rank 8) and row 7 is White's back rank (rank 1).

pub use crate::game_state::game_result::{GameEndReason, GameResult};
pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::MoveRecord;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row of this side's back rank.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion targets in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Build a position; both coordinates must be in `0..8`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// Build a position from signed coordinates, or `None` when off the board.
    #[inline]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        }
    }

    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Square index `row * 8 + col` in `0..64`.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Square shade; equal values share a color.
    #[inline]
    pub const fn shade(self) -> u8 {
        (self.row + self.col) % 2
    }
}

/// Move kind tag. A promotion records whether it also captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
    EnPassant,
    Castling,
    Promotion { piece: PieceKind, capture: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::Promotion { capture: true, .. }
        )
    }

    /// Square of the piece removed by this move, if any.
    #[inline]
    pub const fn capture_square(&self) -> Option<Position> {
        match self.kind {
            MoveKind::EnPassant => Some(Position::new(self.from.row, self.to.col)),
            MoveKind::Capture | MoveKind::Promotion { capture: true, .. } => Some(self.to),
            _ => None,
        }
    }
}

/// Four independent castling flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(1 << 0);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(1 << 1);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(1 << 2);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(1 << 3);
    pub const ALL: CastlingRights = CastlingRights(0x0F);

    /// Individual flags, in Zobrist key order.
    pub const FLAGS: [CastlingRights; 4] = [
        Self::WHITE_KINGSIDE,
        Self::WHITE_QUEENSIDE,
        Self::BLACK_KINGSIDE,
        Self::BLACK_QUEENSIDE,
    ];

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, flag: CastlingRights) -> bool {
        self.0 & flag.0 == flag.0
    }

    #[inline]
    pub fn insert(&mut self, flag: CastlingRights) {
        self.0 |= flag.0;
    }

    #[inline]
    pub fn remove(&mut self, flag: CastlingRights) {
        self.0 &= !flag.0;
    }

    #[inline]
    pub const fn kingside(color: Color) -> CastlingRights {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    #[inline]
    pub const fn queenside(color: Color) -> CastlingRights {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Both flags belonging to `color`.
    #[inline]
    pub const fn both(color: Color) -> CastlingRights {
        CastlingRights(Self::kingside(color).0 | Self::queenside(color).0)
    }
}
