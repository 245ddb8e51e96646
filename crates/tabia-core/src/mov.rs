//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// The kind of a move.
///
/// Castling is encoded as the king-square/rook-square pair (Chess960
/// convention), so a single kind covers both sides. Promotions come in
/// quiet and capturing flavours for each target piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Not a move; the kind of [`Move::NULL`].
    None = 0,
    /// Quiet move (including pawn pushes).
    Normal = 1,
    /// Capture of the piece on the target square.
    Capture = 2,
    /// Castling; the move's target square is the rook's square.
    Castle = 3,
    /// En passant capture.
    EnPassant = 4,
    PromoteKnight = 5,
    PromoteBishop = 6,
    PromoteRook = 7,
    PromoteQueen = 8,
    PromoteCaptureKnight = 9,
    PromoteCaptureBishop = 10,
    PromoteCaptureRook = 11,
    PromoteCaptureQueen = 12,
}

impl MoveKind {
    /// Decodes a 4-bit value. Unassigned values decode to `None`, so the
    /// decode is total over arbitrary words.
    #[inline]
    pub const fn from_bits(bits: u8) -> MoveKind {
        match bits {
            1 => MoveKind::Normal,
            2 => MoveKind::Capture,
            3 => MoveKind::Castle,
            4 => MoveKind::EnPassant,
            5 => MoveKind::PromoteKnight,
            6 => MoveKind::PromoteBishop,
            7 => MoveKind::PromoteRook,
            8 => MoveKind::PromoteQueen,
            9 => MoveKind::PromoteCaptureKnight,
            10 => MoveKind::PromoteCaptureBishop,
            11 => MoveKind::PromoteCaptureRook,
            12 => MoveKind::PromoteCaptureQueen,
            _ => MoveKind::None,
        }
    }

    /// The promotion kind for a piece, quiet or capturing.
    #[inline]
    pub const fn promotion(piece: Piece, capture: bool) -> MoveKind {
        match (piece, capture) {
            (Piece::Knight, false) => MoveKind::PromoteKnight,
            (Piece::Bishop, false) => MoveKind::PromoteBishop,
            (Piece::Rook, false) => MoveKind::PromoteRook,
            (Piece::Queen, false) => MoveKind::PromoteQueen,
            (Piece::Knight, true) => MoveKind::PromoteCaptureKnight,
            (Piece::Bishop, true) => MoveKind::PromoteCaptureBishop,
            (Piece::Rook, true) => MoveKind::PromoteCaptureRook,
            (Piece::Queen, true) => MoveKind::PromoteCaptureQueen,
            _ => MoveKind::None,
        }
    }

    /// Returns the promotion piece if this is a promotion kind.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveKind::PromoteKnight | MoveKind::PromoteCaptureKnight => Some(Piece::Knight),
            MoveKind::PromoteBishop | MoveKind::PromoteCaptureBishop => Some(Piece::Bishop),
            MoveKind::PromoteRook | MoveKind::PromoteCaptureRook => Some(Piece::Rook),
            MoveKind::PromoteQueen | MoveKind::PromoteCaptureQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this is any promotion kind.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this kind captures a piece (including en passant).
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture
                | MoveKind::EnPassant
                | MoveKind::PromoteCaptureKnight
                | MoveKind::PromoteCaptureBishop
                | MoveKind::PromoteCaptureRook
                | MoveKind::PromoteCaptureQueen
        )
    }
}

/// A chess move.
///
/// Encoded compactly: 6 bits source, 6 bits target, 4 bits kind = 16 bits.
/// Move equality is bit equality. Any `u16` round-trips through
/// [`Move::from_raw`]/[`Move::raw`]; whether a word names a playable move in
/// a given position is decided by the position's pseudo-legality predicate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// The null move: kind `None`, both squares a1.
    pub const NULL: Move = Move(0);

    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 6) | ((kind as u16) << 12);
        Move(encoded)
    }

    /// Creates a quiet move.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Capture)
    }

    /// Reinterprets a raw 16-bit word as a move.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Move(raw)
    }

    /// Returns the raw 16-bit encoding.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the target square. For castling this is the rook's square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_bits((self.0 >> 12) as u8)
    }

    /// Returns true if this is the null move sentinel.
    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self.kind(), MoveKind::None)
    }

    /// Returns true if this move captures (including en passant).
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.kind().is_capture()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castle)
    }

    /// Returns true if this is a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.kind().is_promotion()
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        self.kind().promotion_piece()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self, self.kind())
    }
}

// Raw coordinate rendering; position-aware UCI emission (castling
// translation) lives in the board crate.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.to_san_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_encoding() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::normal(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
        assert_eq!(m.kind(), MoveKind::Normal);
    }

    #[test]
    fn move_raw_roundtrip() {
        for raw in [0u16, 1, 0xFFFF, 0xABCD, 0x1234] {
            assert_eq!(Move::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn kind_decode_is_total() {
        for bits in 0..=15u8 {
            let kind = MoveKind::from_bits(bits);
            if bits == 0 || bits > 12 {
                assert_eq!(kind, MoveKind::None);
            } else {
                assert_eq!(kind as u8, bits);
            }
        }
    }

    #[test]
    fn promotion_kinds() {
        assert_eq!(
            MoveKind::promotion(Piece::Queen, false),
            MoveKind::PromoteQueen
        );
        assert_eq!(
            MoveKind::promotion(Piece::Knight, true),
            MoveKind::PromoteCaptureKnight
        );
        assert_eq!(
            MoveKind::PromoteCaptureRook.promotion_piece(),
            Some(Piece::Rook)
        );
        assert!(MoveKind::PromoteBishop.is_promotion());
        assert!(!MoveKind::Capture.is_promotion());
        assert!(MoveKind::PromoteCaptureQueen.is_capture());
        assert!(!MoveKind::PromoteQueen.is_capture());
        assert!(MoveKind::EnPassant.is_capture());
        assert!(!MoveKind::Castle.is_capture());
    }

    #[test]
    fn null_move() {
        assert!(Move::NULL.is_null());
        assert_eq!(Move::NULL.raw(), 0);
        assert_eq!(format!("{}", Move::NULL), "0000");
    }

    #[test]
    fn move_display() {
        let e7 = Square::new(File::E, Rank::R7);
        let e8 = Square::new(File::E, Rank::R8);
        let m = Move::new(e7, e8, MoveKind::PromoteQueen);
        assert_eq!(format!("{}", m), "e7e8q");

        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(format!("{}", Move::normal(e2, e4)), "e2e4");
    }

    #[test]
    fn move_equality_is_bitwise() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_ne!(Move::normal(e2, e4), Move::capture(e2, e4));
        assert_eq!(Move::normal(e2, e4), Move::normal(e2, e4));
    }
}
