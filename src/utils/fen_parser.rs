//! FEN-to-GameState parser.
//!
//! Fills a `PositionSetup` from the six FEN fields and hands it to
//! `GameState::from_setup`, which computes the hash from scratch. The two
//! clock fields may be omitted and default to `0 1`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::PositionSetup;
use crate::utils::algebraic::algebraic_to_position;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    parse_fen_setup(fen).map(GameState::from_setup)
}

pub fn parse_fen_setup(fen: &str) -> ChessResult<PositionSetup> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(ChessErrors::MissingFenField("board layout"))?;
    let side_part = parts.next().ok_or(ChessErrors::MissingFenField("side to move"))?;
    let castling_part = parts.next().ok_or(ChessErrors::MissingFenField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(ChessErrors::MissingFenField("en-passant square"))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(ChessErrors::TrailingFenFields);
    }

    Ok(PositionSetup {
        board: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_file: parse_en_passant_file(en_passant_part)?,
        halfmove_clock: parse_clock(halfmove_part, 0)?,
        fullmove_number: parse_clock(fullmove_part, 1)?,
    })
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenBoard(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = Board::new_empty();
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenBoard(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                if col as u32 + empty_count > 8 {
                    return Err(ChessErrors::InvalidFenBoard(format!(
                        "rank {} has too many files",
                        8 - row
                    )));
                }
                col += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFenPiece(ch))?;
            if col >= 8 {
                return Err(ChessErrors::InvalidFenBoard(format!(
                    "rank {} has too many files",
                    8 - row
                )));
            }
            board.set(Position::new(row as u8, col), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFenBoard(format!(
                "rank {} does not sum to 8 files",
                8 - row
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(ChessErrors::InvalidCastlingRights(castling_part.to_owned())),
        };
        rights.insert(flag);
    }

    Ok(rights)
}

/// Only the file of the target square is kept.
fn parse_en_passant_file(en_passant_part: &str) -> ChessResult<Option<u8>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Ok(Some(algebraic_to_position(en_passant_part)?.col))
}

fn parse_clock(part: Option<&str>, default: u16) -> ChessResult<u16> {
    match part {
        None => Ok(default),
        Some(token) => token
            .parse::<u16>()
            .map_err(|_| ChessErrors::InvalidClock(token.to_owned())),
    }
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}
