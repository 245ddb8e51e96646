//! Zobrist hashing for position identification.
//!
//! A position's key is the XOR of random numbers associated with:
//! - each piece on each square (12 x 64 values),
//! - the side to move (both keys flip on every side swap),
//! - the en passant file,
//! - each castling rook source square.
//!
//! The pawn key XORs only the pawn entries, so positions with identical
//! pawn structure share it. Keys are maintained incrementally by the
//! position's move-making and must always match a recomputation.

use tabia_core::{Color, Piece, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for pieces: [piece][color][square].
    pieces: [[[u64; 64]; 2]; 6],
    /// Keys for the side to move; both are XORed on every swap.
    side_to_move: [u64; 2],
    /// Keys for the en passant target, by file.
    en_passant: [u64; 8],
    /// Keys for castling rook sources, by square. An absent rook source
    /// contributes nothing.
    rook_source: [u64; 64],
}

impl ZobristKeys {
    /// Initializes all keys with a xorshift64 PRNG at compile time.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64; // Golden ratio seed
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut side_to_move = [0u64; 2];
        let mut en_passant = [0u64; 8];
        let mut rook_source = [0u64; 64];

        let mut piece = 0;
        while piece < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[piece][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            piece += 1;
        }

        let mut i = 0;
        while i < 2 {
            state = next_random(state);
            side_to_move[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 64 {
            state = next_random(state);
            rook_source[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            en_passant,
            rook_source,
        }
    }

    /// Returns the key for a piece on a square.
    #[inline]
    pub const fn piece(&self, piece: Piece, color: Color, square: Square) -> u64 {
        self.pieces[piece.index()][color.index()][square.index() as usize]
    }

    /// Returns the key for the given side to move.
    #[inline]
    pub const fn side(&self, color: Color) -> u64 {
        self.side_to_move[color.index()]
    }

    /// The value to XOR into a key when the side to move flips.
    #[inline]
    pub const fn side_flip(&self) -> u64 {
        self.side_to_move[0] ^ self.side_to_move[1]
    }

    /// Returns the key for an en passant target square, keyed by its file.
    #[inline]
    pub const fn en_passant(&self, square: Square) -> u64 {
        self.en_passant[(square.index() % 8) as usize]
    }

    /// Returns the key for a castling rook source square.
    #[inline]
    pub const fn rook_source(&self, square: Square) -> u64 {
        self.rook_source[square.index() as usize]
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
