//! Pieces and their textual forms.
//!
//! A [`Piece`] is only a shape; pairing it with a [`Color`] gives a
//! [`ColoredPiece`], which is what FEN letters and Unicode glyphs encode.

use crate::Color;
use std::fmt;

/// The six piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// Every piece shape, pawn first.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// The four shapes a pawn may promote to.
    pub const PROMOTABLE: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

    /// Lowercase FEN letters, indexed by piece.
    const LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

    /// Table index of this shape (0-5, pawn first).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The FEN letter for this shape: `pnbrqk`, uppercased for White.
    pub const fn to_fen_char(self, color: Color) -> char {
        let letter = Self::LETTERS[self.index()];
        match color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    /// Reads a FEN letter; its case names the color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let piece = match c {
            'P' | 'p' => Piece::Pawn,
            'N' | 'n' => Piece::Knight,
            'B' | 'b' => Piece::Bishop,
            'R' | 'r' => Piece::Rook,
            'Q' | 'q' => Piece::Queen,
            'K' | 'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((piece, color))
    }

    /// The uppercase SAN letter. SAN leaves pawns unlettered; `'P'` is
    /// still returned so every shape has a spelling.
    #[inline]
    pub const fn to_san_char(self) -> char {
        Self::LETTERS[self.index()].to_ascii_uppercase()
    }

    /// Reads an uppercase SAN piece letter. Lowercase input is not a
    /// piece letter in SAN (it would be a file) and is rejected.
    pub const fn from_san_char(c: char) -> Option<Piece> {
        if !c.is_ascii_uppercase() {
            return None;
        }
        match Self::from_fen_char(c) {
            Some((piece, _)) => Some(piece),
            None => None,
        }
    }

    /// Bishops, rooks, and queens slide along blockable lines; the rest
    /// step or leap.
    #[inline]
    pub const fn is_slider(self) -> bool {
        !matches!(self, Piece::Pawn | Piece::Knight | Piece::King)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 6] = ["Pawn", "Knight", "Bishop", "Rook", "Queen", "King"];
        write!(f, "{}", NAMES[self.index()])
    }
}

/// A piece shape together with its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        ColoredPiece { piece, color }
    }

    /// Reads a FEN letter (uppercase = White).
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match Piece::from_fen_char(c) {
            Some((piece, color)) => Some(ColoredPiece { piece, color }),
            None => None,
        }
    }

    /// The FEN letter (uppercase for White).
    #[inline]
    pub const fn to_fen_char(self) -> char {
        self.piece.to_fen_char(self.color)
    }

    /// The Unicode chess glyph: solid for White, outlined for Black.
    pub const fn to_unicode_char(self) -> char {
        const SOLID: [char; 6] = ['♟', '♞', '♝', '♜', '♛', '♚'];
        const OUTLINED: [char; 6] = ['♙', '♘', '♗', '♖', '♕', '♔'];
        match self.color {
            Color::White => SOLID[self.piece.index()],
            Color::Black => OUTLINED[self.piece.index()],
        }
    }
}

impl fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
