//! Board square representation.

use crate::Color;
use std::fmt;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation ('a'-'h').
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Returns the file mirrored left-to-right (a<->h, b<->g, ...).
    #[inline]
    pub const fn mirrored(self) -> File {
        match File::from_index(7 - self.index()) {
            Some(f) => f,
            None => unreachable!(),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation ('1'-'8').
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Returns the rank as seen from the given color's side of the board.
    ///
    /// For White this is the identity; for Black rank 1 becomes rank 8.
    #[inline]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => match Rank::from_index(7 - self.index()) {
                Some(r) => r,
                None => unreachable!(),
            },
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed in little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// The absence of a square ("no square") is expressed as `Option<Square>`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % 8) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / 8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns a bitboard word with only this square set.
    #[inline]
    pub const fn bitboard(self) -> u64 {
        1u64 << self.0
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    /// The square one step toward the opponent's side, from `color`'s
    /// point of view. `None` when stepping off the board.
    #[inline]
    pub const fn up(self, color: Color) -> Option<Square> {
        match color {
            Color::White => {
                if self.0 < 56 {
                    Some(Square(self.0 + 8))
                } else {
                    None
                }
            }
            Color::Black => {
                if self.0 >= 8 {
                    Some(Square(self.0 - 8))
                } else {
                    None
                }
            }
        }
    }

    /// The square one step toward `color`'s own side.
    #[inline]
    pub const fn down(self, color: Color) -> Option<Square> {
        self.up(color.opposite())
    }

    /// The square one file toward the a-file, on the same rank.
    #[inline]
    pub const fn left(self) -> Option<Square> {
        if self.0 % 8 == 0 {
            None
        } else {
            Some(Square(self.0 - 1))
        }
    }

    /// The square one file toward the h-file, on the same rank.
    #[inline]
    pub const fn right(self) -> Option<Square> {
        if self.0 % 8 == 7 {
            None
        } else {
            Some(Square(self.0 + 1))
        }
    }

    /// Mirrors the square top-to-bottom (a1 <-> a8).
    #[inline]
    pub const fn mirror_vertical(self) -> Square {
        Square(self.0 ^ 56)
    }

    /// Mirrors the square left-to-right (a1 <-> h1).
    #[inline]
    pub const fn mirror_horizontal(self) -> Square {
        Square(self.0 ^ 7)
    }

    /// Returns true if this square is on the a-file.
    #[inline]
    pub const fn is_left_edge(self) -> bool {
        self.0 % 8 == 0
    }

    /// Returns true if this square is on the h-file.
    #[inline]
    pub const fn is_right_edge(self) -> bool {
        self.0 % 8 == 7
    }

    /// Returns true if this square lies on any edge of the board.
    #[inline]
    pub const fn is_edge(self) -> bool {
        self.is_left_edge() || self.is_right_edge() || self.0 < 8 || self.0 >= 56
    }

    /// Chebyshev (king-move) distance to another square.
    #[inline]
    pub const fn chebyshev_distance(self, other: Square) -> u8 {
        let df = (self.file().index() as i8 - other.file().index() as i8).unsigned_abs();
        let dr = (self.rank().index() as i8 - other.rank().index() as i8).unsigned_abs();
        if df > dr {
            df
        } else {
            dr
        }
    }

    /// Manhattan (taxicab) distance to another square.
    #[inline]
    pub const fn manhattan_distance(self, other: Square) -> u8 {
        let df = (self.file().index() as i8 - other.file().index() as i8).unsigned_abs();
        let dr = (self.rank().index() as i8 - other.rank().index() as i8).unsigned_abs();
        df + dr
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_steps() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.up(Color::White), Square::from_algebraic("e5"));
        assert_eq!(e4.up(Color::Black), Square::from_algebraic("e3"));
        assert_eq!(e4.down(Color::White), Square::from_algebraic("e3"));
        assert_eq!(e4.left(), Square::from_algebraic("d4"));
        assert_eq!(e4.right(), Square::from_algebraic("f4"));

        assert_eq!(Square::H8.up(Color::White), None);
        assert_eq!(Square::A1.up(Color::Black), None);
        assert_eq!(Square::A1.left(), None);
        assert_eq!(Square::H1.right(), None);
    }

    #[test]
    fn square_mirrors() {
        assert_eq!(Square::A1.mirror_vertical(), Square::A8);
        assert_eq!(Square::A1.mirror_horizontal(), Square::H1);
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.mirror_vertical(), Square::from_algebraic("e5").unwrap());
        assert_eq!(
            e4.mirror_horizontal(),
            Square::from_algebraic("d4").unwrap()
        );
        for sq in Square::all() {
            assert_eq!(sq.mirror_vertical().mirror_vertical(), sq);
            assert_eq!(sq.mirror_horizontal().mirror_horizontal(), sq);
        }
    }

    #[test]
    fn square_edges() {
        assert!(Square::A1.is_left_edge());
        assert!(Square::H8.is_right_edge());
        assert!(Square::E1.is_edge());
        assert!(!Square::from_algebraic("e4").unwrap().is_edge());
    }

    #[test]
    fn square_distances() {
        let a1 = Square::A1;
        let h8 = Square::H8;
        assert_eq!(a1.chebyshev_distance(h8), 7);
        assert_eq!(a1.manhattan_distance(h8), 14);
        assert_eq!(a1.chebyshev_distance(a1), 0);

        let e4 = Square::from_algebraic("e4").unwrap();
        let d6 = Square::from_algebraic("d6").unwrap();
        assert_eq!(e4.chebyshev_distance(d6), 2);
        assert_eq!(e4.manhattan_distance(d6), 3);
    }

    #[test]
    fn rank_relative() {
        assert_eq!(Rank::R1.relative_to(Color::White), Rank::R1);
        assert_eq!(Rank::R1.relative_to(Color::Black), Rank::R8);
        assert_eq!(Rank::R3.relative_to(Color::Black), Rank::R6);
    }

    #[test]
    fn file_mirrored() {
        assert_eq!(File::A.mirrored(), File::H);
        assert_eq!(File::D.mirrored(), File::E);
    }
}
