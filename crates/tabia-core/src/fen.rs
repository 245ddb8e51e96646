//! FEN (Forsyth-Edwards Notation) field splitting and validation.
//!
//! This module parses a FEN string into validated raw fields. Turning the
//! fields into a full position requires board context (Shredder castling
//! letters resolve against the king's square), which is the board crate's
//! job.

use crate::{Color, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    PiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling field: {0}")]
    Castling(String),

    #[error("invalid en passant square: {0}")]
    EnPassant(String),

    #[error("invalid halfmove clock: {0}")]
    HalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    FullmoveNumber(String),
}

/// Validated FEN fields.
///
/// The piece placement is stored expanded: eight rank strings of exactly
/// eight characters each, where `'1'` marks an empty square. Digits 2..8
/// have been expanded to runs of `'1'`s and the non-standard `'0'` empty
/// marker is tolerated and normalized away during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Expanded rank strings, rank 8 first (as written in the FEN).
    pub ranks: [String; 8],
    /// The side to move.
    pub active_color: Color,
    /// Raw castling field ("-", legacy "KQkq" letters, or Shredder
    /// home-rank file letters; uppercase = White).
    pub castling: String,
    /// En passant target square, already range-checked to a3..h6.
    pub en_passant: Option<Square>,
    /// Halfmove clock (50-move rule counter). Defaults to 0 when absent.
    pub halfmove_clock: u32,
    /// Fullmove number. Defaults to 1 when absent.
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string of 4 to 6 whitespace-separated fields.
    ///
    /// A missing halfmove clock defaults to 0 and a missing fullmove
    /// number to 1.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::FieldCount(parts.len()));
        }

        let ranks = Self::expand_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" | "W" => Color::White,
            "b" | "B" => Color::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::HalfmoveClock(s.to_string()))?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::FullmoveNumber(s.to_string()))?,
            None => 1,
        };

        Ok(FenFields {
            ranks,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Expands the piece placement field into eight 8-character rank
    /// strings with `'1'` for each empty square.
    fn expand_placement(placement: &str) -> Result<[String; 8], FenError> {
        let rank_strs: Vec<&str> = placement.split('/').collect();
        if rank_strs.len() != 8 {
            return Err(FenError::PiecePlacement(format!(
                "expected 8 ranks, got {}",
                rank_strs.len()
            )));
        }

        let mut ranks: [String; 8] = Default::default();
        for (i, rank_str) in rank_strs.iter().enumerate() {
            let mut expanded = String::with_capacity(8);
            for c in rank_str.chars() {
                match c {
                    // '0' is a tolerated non-standard empty marker.
                    '0' | '1' => expanded.push('1'),
                    '2'..='8' => {
                        for _ in 0..c.to_digit(10).unwrap() {
                            expanded.push('1');
                        }
                    }
                    'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => {
                        expanded.push(c)
                    }
                    other => {
                        return Err(FenError::PiecePlacement(format!(
                            "invalid character '{}' in rank {}",
                            other,
                            8 - i
                        )))
                    }
                }
            }
            if expanded.len() != 8 {
                return Err(FenError::PiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    expanded.len()
                )));
            }
            ranks[i] = expanded;
        }

        Ok(ranks)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        if castling.is_empty() || castling.len() > 4 {
            return Err(FenError::Castling(castling.to_string()));
        }
        for c in castling.chars() {
            // Legacy letters or Shredder-FEN home-rank file letters.
            if !matches!(c, 'K' | 'Q' | 'k' | 'q' | 'A'..='H' | 'a'..='h') {
                return Err(FenError::Castling(format!("invalid character '{}'", c)));
            }
        }
        Ok(())
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        let sq =
            Square::from_algebraic(field).ok_or_else(|| FenError::EnPassant(field.to_string()))?;
        // Only rank 3 or rank 6 can be an en passant target.
        if !matches!(sq.rank(), Rank::R3 | Rank::R6) {
            return Err(FenError::EnPassant(field.to_string()));
        }
        Ok(Some(sq))
    }
}
