//! Errors used throughout the chess engine.
//!
//! `ChessErrors` covers the recoverable failure modes: malformed position
//! text and unparsable or illegal coordinate moves supplied by a caller.
//! Illegal moves passed to `GameState::make_move` are not errors; that call
//! reports a plain `false` and leaves the state untouched. Broken internal
//! invariants are programming defects and panic instead of surfacing here.

use std::error::Error;
use std::fmt;

pub type ChessResult<T> = Result<T, ChessErrors>;

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A required FEN field was absent.
    ///
    /// Payload: the field name.
    MissingFenField(&'static str),

    /// The FEN had more than six whitespace-separated fields.
    TrailingFenFields,

    /// Placement field did not describe eight ranks of eight files.
    ///
    /// Payload: a description of the defect.
    InvalidFenBoard(String),

    /// Found an unexpected character in the placement field.
    InvalidFenPiece(char),

    /// Side-to-move field was neither `w` nor `b`.
    InvalidSideToMove(String),

    /// Castling field contained something other than `KQkq` or `-`.
    InvalidCastlingRights(String),

    /// A clock field was not a non-negative integer.
    ///
    /// Payload: the offending token.
    InvalidClock(String),

    /// A single character used during algebraic parsing was invalid.
    InvalidAlgebraicChar(char),

    /// A coordinate string did not have the expected `e4` / `e2e4` shape.
    InvalidAlgebraicString(String),

    /// The move is well formed but not legal in the current position.
    ///
    /// Payload: the move text as supplied.
    IllegalMove(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::MissingFenField(field) => write!(f, "missing {field} in FEN"),
            ChessErrors::TrailingFenFields => write!(f, "FEN has extra trailing fields"),
            ChessErrors::InvalidFenBoard(msg) => write!(f, "invalid FEN board layout: {msg}"),
            ChessErrors::InvalidFenPiece(ch) => {
                write!(f, "invalid piece character '{ch}' in FEN board layout")
            }
            ChessErrors::InvalidSideToMove(token) => write!(f, "invalid side to move: {token}"),
            ChessErrors::InvalidCastlingRights(token) => {
                write!(f, "invalid castling rights: {token}")
            }
            ChessErrors::InvalidClock(token) => write!(f, "invalid clock value: {token}"),
            ChessErrors::InvalidAlgebraicChar(ch) => {
                write!(f, "invalid algebraic character '{ch}'")
            }
            ChessErrors::InvalidAlgebraicString(text) => {
                write!(f, "invalid algebraic string: {text}")
            }
            ChessErrors::IllegalMove(text) => write!(f, "illegal move: {text}"),
        }
    }
}

impl Error for ChessErrors {}
