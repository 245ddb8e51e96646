//! Castling geometry.
//!
//! Castling targets are the classical c/g (king) and d/f (rook) squares on
//! the home rank. The source squares are not fixed: in Chess960 the king
//! and the castling rook may start anywhere on the home rank, so the
//! block-sensitive and check-sensitive square sets are computed from the
//! actual source squares.

use crate::Bitboard;
use tabia_core::{Color, File, Rank, Square};

/// The two castling sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queenside = 0,
    Kingside = 1,
}

impl CastlingSide {
    /// Both sides, queenside first.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Queenside, CastlingSide::Kingside];

    /// Returns the index (0 for queenside, 1 for kingside).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Classifies a rook relative to its king: a rook on a lower file
    /// castles queenside.
    #[inline]
    pub const fn from_rook_and_king(rook: Square, king: Square) -> CastlingSide {
        if (rook.index() % 8) < (king.index() % 8) {
            CastlingSide::Queenside
        } else {
            CastlingSide::Kingside
        }
    }

    /// The king's destination square (c- or g-file on the home rank).
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastlingSide::Queenside => File::C,
            CastlingSide::Kingside => File::G,
        };
        Square::new(
            file,
            match Rank::from_index(color.back_rank()) {
                Some(r) => r,
                None => unreachable!(),
            },
        )
    }

    /// The rook's destination square (d- or f-file on the home rank).
    #[inline]
    pub const fn rook_target(self, color: Color) -> Square {
        let file = match self {
            CastlingSide::Queenside => File::D,
            CastlingSide::Kingside => File::F,
        };
        Square::new(
            file,
            match Rank::from_index(color.back_rank()) {
                Some(r) => r,
                None => unreachable!(),
            },
        )
    }
}

/// All squares from `a` to `b` inclusive, on one rank.
fn span(a: Square, b: Square) -> Bitboard {
    debug_assert_eq!(a.rank(), b.rank());
    let (lo, hi) = if a.index() <= b.index() {
        (a.index(), b.index())
    } else {
        (b.index(), a.index())
    };
    let mut mask = Bitboard::EMPTY;
    for i in lo..=hi {
        // SAFETY: between two valid squares on one rank
        mask.set(unsafe { Square::from_index_unchecked(i) });
    }
    mask
}

/// The squares that must be empty for the castling to be playable: the
/// king's and the rook's paths to their targets, not counting the king and
/// rook themselves. With arbitrary Chess960 sources the two paths may
/// overlap or even be empty.
pub fn blocker_mask(color: Color, side: CastlingSide, king_from: Square, rook_from: Square) -> Bitboard {
    let king_path = span(king_from, side.king_target(color));
    let rook_path = span(rook_from, side.rook_target(color));
    (king_path | rook_path) & !(Bitboard::from_square(king_from) | Bitboard::from_square(rook_from))
}

/// The squares that must not be attacked: every square the king stands on
/// during the castling, from its source to its target inclusive.
pub fn check_mask(color: Color, side: CastlingSide, king_from: Square) -> Bitboard {
    span(king_from, side.king_target(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn targets() {
        assert_eq!(CastlingSide::Kingside.king_target(Color::White), sq("g1"));
        assert_eq!(CastlingSide::Kingside.rook_target(Color::White), sq("f1"));
        assert_eq!(CastlingSide::Queenside.king_target(Color::White), sq("c1"));
        assert_eq!(CastlingSide::Queenside.rook_target(Color::White), sq("d1"));
        assert_eq!(CastlingSide::Kingside.king_target(Color::Black), sq("g8"));
        assert_eq!(CastlingSide::Queenside.rook_target(Color::Black), sq("d8"));
    }

    #[test]
    fn side_from_rook_and_king() {
        assert_eq!(
            CastlingSide::from_rook_and_king(sq("a1"), sq("e1")),
            CastlingSide::Queenside
        );
        assert_eq!(
            CastlingSide::from_rook_and_king(sq("h1"), sq("e1")),
            CastlingSide::Kingside
        );
        // Chess960: rook on b8, king on c8.
        assert_eq!(
            CastlingSide::from_rook_and_king(sq("b8"), sq("c8")),
            CastlingSide::Queenside
        );
    }

    #[test]
    fn classical_blockers() {
        let mask = blocker_mask(Color::White, CastlingSide::Kingside, sq("e1"), sq("h1"));
        assert!(mask.contains(sq("f1")));
        assert!(mask.contains(sq("g1")));
        assert_eq!(mask.count(), 2);

        let mask = blocker_mask(Color::White, CastlingSide::Queenside, sq("e1"), sq("a1"));
        assert!(mask.contains(sq("b1")));
        assert!(mask.contains(sq("c1")));
        assert!(mask.contains(sq("d1")));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn classical_check_squares() {
        let mask = check_mask(Color::White, CastlingSide::Kingside, sq("e1"));
        assert!(mask.contains(sq("e1")));
        assert!(mask.contains(sq("f1")));
        assert!(mask.contains(sq("g1")));
        assert_eq!(mask.count(), 3);

        let mask = check_mask(Color::Black, CastlingSide::Queenside, sq("e8"));
        assert!(mask.contains(sq("e8")));
        assert!(mask.contains(sq("d8")));
        assert!(mask.contains(sq("c8")));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn chess960_overlapping_paths() {
        // King already on c1 with its rook on b1: the king does not move,
        // only the rook steps to d1.
        let mask = blocker_mask(Color::White, CastlingSide::Queenside, sq("c1"), sq("b1"));
        assert!(mask.contains(sq("d1")));
        assert!(!mask.contains(sq("b1")));
        assert!(!mask.contains(sq("c1")));
        assert_eq!(mask.count(), 1);

        // Check squares reduce to the king's own square.
        let mask = check_mask(Color::White, CastlingSide::Queenside, sq("c1"));
        assert_eq!(mask.count(), 1);
        assert!(mask.contains(sq("c1")));
    }

    #[test]
    fn chess960_king_far_from_target() {
        // King on b1 castling "kingside" to g1 with rook on c1.
        let mask = blocker_mask(Color::White, CastlingSide::Kingside, sq("b1"), sq("c1"));
        for s in ["d1", "e1", "f1", "g1"] {
            assert!(mask.contains(sq(s)), "missing {}", s);
        }
        assert!(!mask.contains(sq("b1")));
        assert!(!mask.contains(sq("c1")));
    }
}
