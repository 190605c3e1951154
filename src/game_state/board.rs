//! 8x8 mailbox storage.
//!
//! The board knows nothing about chess rules. Out-of-range reads return
//! "empty" and out-of-range writes are ignored.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    // Cached king squares, indexed by `Color::index`.
    kings: [Option<Position>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [[None; 8]; 8],
            kings: [None; 2],
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Board set up in the standard starting layout.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::default();
        for col in 0..8u8 {
            board.set(Position::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Position::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            let kind = BACK_RANK[col as usize];
            board.set(Position::new(7, col), Some(Piece::new(kind, Color::White)));
            board.set(Position::new(0, col), Some(Piece::new(kind, Color::Black)));
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.get_at(pos.row as i8, pos.col as i8)
    }

    /// Signed-coordinate read; off-board squares read as empty.
    #[inline]
    pub fn get_at(&self, row: i8, col: i8) -> Option<Piece> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        self.squares[row as usize][col as usize]
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Write a cell, keeping the king cache in step.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.row > 7 || pos.col > 7 {
            return;
        }
        let cell = &mut self.squares[pos.row as usize][pos.col as usize];
        if let Some(old) = *cell {
            if old.kind == PieceKind::King && self.kings[old.color.index()] == Some(pos) {
                self.kings[old.color.index()] = None;
            }
        }
        *cell = piece;
        if let Some(new) = piece {
            if new.kind == PieceKind::King {
                self.kings[new.color.index()] = Some(pos);
            }
        }
    }

    /// Remove and return the occupant of `pos`.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.get(pos);
        self.set(pos, None);
        piece
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Position> {
        self.kings[color.index()]
    }

    /// All occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get(pos).map(|piece| (pos, piece))
            })
        })
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}
