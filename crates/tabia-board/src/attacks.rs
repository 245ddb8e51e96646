//! Attack table generation and lookup for all piece types.
//!
//! Leaper attacks (knight, king, pawn) are computed at compile time.
//! Sliding attacks use the Kindergarten scheme: per square, four 64-entry
//! tables (rank, file, diagonal, anti-diagonal) indexed by a 6-bit hash of
//! the occupancy of the relevant line. The tables are built once at first
//! use and shared for the lifetime of the process.

use crate::Bitboard;
use std::sync::OnceLock;
use tabia_core::{Color, Piece, Square};

/// Precomputed knight attack table.
const KNIGHT_ATTACKS: [Bitboard; 64] = compute_leaper_attacks(&[
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
]);

/// Precomputed king attack table.
const KING_ATTACKS: [Bitboard; 64] = compute_leaper_attacks(&[
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
]);

/// Precomputed pawn capture tables, indexed [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    compute_leaper_attacks(&[(1, 1), (1, -1)]),
    compute_leaper_attacks(&[(-1, 1), (-1, -1)]),
];

/// Precomputed pawn single-push target tables, indexed [color][square].
const PAWN_PUSHES: [[Bitboard; 64]; 2] = [
    compute_leaper_attacks(&[(1, 0)]),
    compute_leaper_attacks(&[(-1, 0)]),
];

/// Computes a 64-entry leaper table from (rank, file) deltas at compile
/// time.
const fn compute_leaper_attacks(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0i8;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;
        let mut bb = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (dr, df) = deltas[i];
            let r = rank + dr;
            let f = file + df;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bb |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        attacks[sq as usize] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns pawn capture targets from the given square for the given color.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Returns the pawn single-push target square (as a mask) for the given
/// color. Empty on the last rank.
#[inline]
pub fn pawn_push(color: Color, sq: Square) -> Bitboard {
    PAWN_PUSHES[color.index()][sq.index() as usize]
}

/// The a1-h8 diagonal, used to hash file occupancies onto a single byte.
const MAIN_DIAGONAL: u64 = 0x8040_2010_0804_0201;

/// Kindergarten lookup tables: per square, 64 attack sets per line, plus
/// the diagonal masks feeding the hash.
struct SlidingTables {
    rank: Vec<Bitboard>,
    file: Vec<Bitboard>,
    diagonal: Vec<Bitboard>,
    anti_diagonal: Vec<Bitboard>,
    diagonal_masks: [Bitboard; 64],
    anti_diagonal_masks: [Bitboard; 64],
}

static SLIDING: OnceLock<SlidingTables> = OnceLock::new();

#[inline]
fn sliding() -> &'static SlidingTables {
    SLIDING.get_or_init(SlidingTables::build)
}

/// Hash of the occupancy of `sq`'s rank: shift down to the rank's first
/// inner file, keep 6 bits.
#[inline]
fn rank_index(occ: u64, sq: Square) -> usize {
    ((occ >> (sq.rank().index() * 8 + 1)) & 0x3F) as usize
}

/// Hash of the occupancy of `sq`'s file: align onto the a-file, multiply by
/// the main diagonal to rotate the file onto a byte, keep 6 bits.
#[inline]
fn file_index(occ: u64, sq: Square) -> usize {
    let file_occ = (occ >> sq.file().index()) & Bitboard::FILE_A.0;
    ((file_occ.wrapping_mul(MAIN_DIAGONAL) >> 57) & 0x3F) as usize
}

/// Hash of the occupancy of a (anti-)diagonal: mask the line, multiply by
/// the a-file to collapse it onto a byte by file, keep 6 bits.
#[inline]
fn line_index(occ: u64, mask: Bitboard) -> usize {
    (((occ & mask.0).wrapping_mul(Bitboard::FILE_A.0) >> 57) & 0x3F) as usize
}

/// Returns rook attacks from the given square with the given occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = sliding();
    let base = sq.index() as usize * 64;
    t.rank[base + rank_index(occupied.0, sq)] | t.file[base + file_index(occupied.0, sq)]
}

/// Returns bishop attacks from the given square with the given occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = sliding();
    let base = sq.index() as usize * 64;
    t.diagonal[base + line_index(occupied.0, t.diagonal_masks[sq.index() as usize])]
        | t.anti_diagonal[base + line_index(occupied.0, t.anti_diagonal_masks[sq.index() as usize])]
}

/// Returns queen attacks: the union of rook and bishop attacks.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Dispatches to the attack function for a non-pawn piece.
///
/// Pawn attacks are color-dependent and accessed through
/// [`pawn_attacks`]; passing [`Piece::Pawn`] here is a contract violation.
#[inline]
pub fn attacks_for(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    match piece {
        Piece::Knight => knight_attacks(sq),
        Piece::Bishop => bishop_attacks(sq, occupied),
        Piece::Rook => rook_attacks(sq, occupied),
        Piece::Queen => queen_attacks(sq, occupied),
        Piece::King => king_attacks(sq),
        Piece::Pawn => unreachable!("pawn attacks are color-dependent"),
    }
}

impl SlidingTables {
    fn build() -> Self {
        let mut tables = SlidingTables {
            rank: vec![Bitboard::EMPTY; 64 * 64],
            file: vec![Bitboard::EMPTY; 64 * 64],
            diagonal: vec![Bitboard::EMPTY; 64 * 64],
            anti_diagonal: vec![Bitboard::EMPTY; 64 * 64],
            diagonal_masks: [Bitboard::EMPTY; 64],
            anti_diagonal_masks: [Bitboard::EMPTY; 64],
        };

        let edges_ew = Bitboard::FILE_A | Bitboard::FILE_H;
        let edges_ns = Bitboard::RANK_1 | Bitboard::RANK_8;

        for sq in Square::all() {
            let i = sq.index() as usize;
            tables.diagonal_masks[i] = line_mask(sq, &[(1, 1), (-1, -1)]);
            tables.anti_diagonal_masks[i] = line_mask(sq, &[(1, -1), (-1, 1)]);

            let rank_inner = Bitboard::rank_of(sq) & !edges_ew;
            let file_inner = Bitboard::file_of(sq) & !edges_ns;
            let diag_inner = tables.diagonal_masks[i] & !edges_ew;
            let anti_inner = tables.anti_diagonal_masks[i] & !edges_ew;

            fill_line(&mut tables.rank[i * 64..], rank_inner, sq, &[(0, 1), (0, -1)], |occ| {
                rank_index(occ, sq)
            });
            fill_line(&mut tables.file[i * 64..], file_inner, sq, &[(1, 0), (-1, 0)], |occ| {
                file_index(occ, sq)
            });
            let diag_mask = tables.diagonal_masks[i];
            fill_line(
                &mut tables.diagonal[i * 64..],
                diag_inner,
                sq,
                &[(1, 1), (-1, -1)],
                |occ| line_index(occ, diag_mask),
            );
            let anti_mask = tables.anti_diagonal_masks[i];
            fill_line(
                &mut tables.anti_diagonal[i * 64..],
                anti_inner,
                sq,
                &[(1, -1), (-1, 1)],
                |occ| line_index(occ, anti_mask),
            );
        }

        tables
    }
}

/// All squares on the line through `sq` along the given directions,
/// including `sq` itself.
fn line_mask(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let mut mask = Bitboard::from_square(sq);
    for &(dr, df) in deltas {
        mask |= ray(sq, dr, df, Bitboard::EMPTY);
    }
    mask
}

/// Walks a ray from `sq`, stopping at (and including) the first blocker.
fn ray(sq: Square, dr: i8, df: i8, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let mut r = sq.rank().index() as i8 + dr;
    let mut f = sq.file().index() as i8 + df;
    while (0..8).contains(&r) && (0..8).contains(&f) {
        // SAFETY: r and f are both in 0..8
        let s = unsafe { Square::from_index_unchecked((r * 8 + f) as u8) };
        attacks.set(s);
        if occupied.contains(s) {
            break;
        }
        r += dr;
        f += df;
    }
    attacks
}

/// Enumerates all subsets of the line's hashed squares (Carry-Rippler) and
/// stores the ray-walked attack set of each under its hash index. Build and
/// lookup share the hash, so the exact bit order inside the index is
/// irrelevant.
fn fill_line(
    table: &mut [Bitboard],
    inner: Bitboard,
    sq: Square,
    deltas: &[(i8, i8)],
    index_of: impl Fn(u64) -> usize,
) {
    let mut subset = 0u64;
    loop {
        let occupied = Bitboard::new(subset);
        let mut attacks = Bitboard::EMPTY;
        for &(dr, df) in deltas {
            attacks |= ray(sq, dr, df, occupied);
        }
        table[index_of(subset)] = attacks;

        subset = subset.wrapping_sub(inner.0) & inner.0;
        if subset == 0 {
            break;
        }
    }
}

/// The squares a pawn of `color` on `sq` must traverse (and flank) to
/// promote: the forward span of its own file plus the two adjacent files,
/// excluding everything at or behind the pawn.
pub fn passed_pawn_mask(color: Color, sq: Square) -> Bitboard {
    let file = Bitboard::file_of(sq);
    let span = file | file.east() | file.west();
    let rank = sq.rank().index();
    let ahead = match color {
        Color::White => {
            if rank >= 7 {
                Bitboard::EMPTY
            } else {
                Bitboard::new(!0u64 << ((rank + 1) * 8))
            }
        }
        Color::Black => {
            if rank == 0 {
                Bitboard::EMPTY
            } else {
                Bitboard::new(!0u64 >> ((8 - rank) * 8))
            }
        }
    };
    span & ahead
}

/// The 3x3 neighbourhood of a square: king moves plus the square itself.
pub fn ring_3x3(sq: Square) -> Bitboard {
    king_attacks(sq) | Bitboard::from_square(sq)
}

/// The 5x5 neighbourhood of a square: the union of [`ring_3x3`] over the
/// squares of `ring_3x3(sq)`.
pub fn ring_5x5(sq: Square) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for s in ring_3x3(sq) {
        mask |= ring_3x3(s);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabia_core::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    /// Slow ray-walking reference for cross-checking the tables.
    fn slow_attacks(piece: Piece, from: Square, occupied: Bitboard) -> Bitboard {
        let deltas: &[(i8, i8)] = match piece {
            Piece::Rook => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            Piece::Bishop => &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Piece::Queen => &[
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
            ],
            _ => panic!("slider expected"),
        };
        let mut attacks = Bitboard::EMPTY;
        for &(dr, df) in deltas {
            attacks |= ray(from, dr, df, occupied);
        }
        attacks
    }

    #[test]
    fn knight_attack_counts() {
        assert_eq!(knight_attacks(sq("d4")).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(knight_attacks(sq("a4")).count(), 4);
    }

    #[test]
    fn king_attack_counts() {
        assert_eq!(king_attacks(sq("d4")).count(), 8);
        assert_eq!(king_attacks(Square::A1).count(), 3);
        assert_eq!(king_attacks(sq("a4")).count(), 5);
    }

    #[test]
    fn pawn_attack_shapes() {
        let attacks = pawn_attacks(Color::White, sq("d4"));
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(sq("c5")));
        assert!(attacks.contains(sq("e5")));

        let attacks = pawn_attacks(Color::Black, sq("d4"));
        assert!(attacks.contains(sq("c3")));
        assert!(attacks.contains(sq("e3")));

        assert_eq!(pawn_attacks(Color::White, sq("a4")).count(), 1);
        assert_eq!(pawn_attacks(Color::White, sq("d8")).count(), 0);
    }

    #[test]
    fn pawn_push_targets() {
        assert_eq!(pawn_push(Color::White, sq("e2")), Bitboard::from_square(sq("e3")));
        assert_eq!(pawn_push(Color::Black, sq("e7")), Bitboard::from_square(sq("e6")));
        assert!(pawn_push(Color::White, sq("e8")).is_empty());
    }

    #[test]
    fn rook_on_empty_board() {
        let attacks = rook_attacks(sq("d4"), Bitboard::EMPTY);
        assert_eq!(attacks.count(), 14);
        assert!(attacks.contains(sq("d8")));
        assert!(attacks.contains(sq("a4")));
        assert!(!attacks.contains(sq("e5")));
    }

    #[test]
    fn rook_blocked() {
        let occ = Bitboard::from_square(sq("d6")) | Bitboard::from_square(sq("f4"));
        let attacks = rook_attacks(sq("d4"), occ);
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("d7")));
        assert!(attacks.contains(sq("f4")));
        assert!(!attacks.contains(sq("g4")));
        assert!(attacks.contains(sq("d1")));
        assert!(attacks.contains(sq("a4")));
    }

    #[test]
    fn bishop_blocked() {
        let occ = Bitboard::from_square(sq("f6"));
        let attacks = bishop_attacks(sq("d4"), occ);
        assert!(attacks.contains(sq("f6")));
        assert!(!attacks.contains(sq("g7")));
        assert!(attacks.contains(sq("a1")));
        assert!(attacks.contains(sq("a7")));
        assert!(attacks.contains(sq("g1")));
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let occ = Bitboard::new(0x0042_0010_0800_4200);
        for s in Square::all() {
            assert_eq!(
                queen_attacks(s, occ),
                rook_attacks(s, occ) | bishop_attacks(s, occ)
            );
        }
    }

    #[test]
    fn sliders_match_slow_reference() {
        // Deterministic pseudo-random occupancies.
        let mut state = 0x1234_5678_9ABC_DEF0u64;
        for _ in 0..200 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let occ = Bitboard::new(state & (state >> 1));
            for s in [sq("a1"), sq("d4"), sq("h8"), sq("e1"), sq("b7"), sq("h4")] {
                assert_eq!(rook_attacks(s, occ), slow_attacks(Piece::Rook, s, occ));
                assert_eq!(bishop_attacks(s, occ), slow_attacks(Piece::Bishop, s, occ));
            }
        }
    }

    #[test]
    fn dispatcher_agrees_with_direct_lookups() {
        let occ = Bitboard::new(0x00FF_0000_0000_FF00);
        let s = sq("d4");
        assert_eq!(attacks_for(Piece::Knight, s, occ), knight_attacks(s));
        assert_eq!(attacks_for(Piece::King, s, occ), king_attacks(s));
        assert_eq!(attacks_for(Piece::Rook, s, occ), rook_attacks(s, occ));
        assert_eq!(attacks_for(Piece::Bishop, s, occ), bishop_attacks(s, occ));
        assert_eq!(attacks_for(Piece::Queen, s, occ), queen_attacks(s, occ));
    }

    #[test]
    fn passed_pawn_mask_shape() {
        let mask = passed_pawn_mask(Color::White, sq("d4"));
        assert!(mask.contains(sq("c5")));
        assert!(mask.contains(sq("d5")));
        assert!(mask.contains(sq("e8")));
        assert!(!mask.contains(sq("d4")));
        assert!(!mask.contains(sq("c4")));
        assert!(!mask.contains(sq("d3")));
        assert_eq!(mask.count(), 12);

        let mask = passed_pawn_mask(Color::Black, sq("d4"));
        assert!(mask.contains(sq("c3")));
        assert!(mask.contains(sq("e1")));
        assert!(!mask.contains(sq("d5")));
        assert_eq!(mask.count(), 9);
    }

    #[test]
    fn passed_pawn_mask_edges() {
        let mask = passed_pawn_mask(Color::White, sq("a2"));
        assert!(mask.contains(sq("a3")));
        assert!(mask.contains(sq("b3")));
        assert!(!mask.contains(sq("c3")));
        assert!(passed_pawn_mask(Color::White, sq("a8")).is_empty());
        assert!(passed_pawn_mask(Color::Black, sq("h1")).is_empty());
    }

    #[test]
    fn rings() {
        assert_eq!(ring_3x3(sq("d4")).count(), 9);
        assert_eq!(ring_3x3(Square::A1).count(), 4);
        assert_eq!(ring_5x5(sq("d4")).count(), 25);
        assert_eq!(ring_5x5(Square::A1).count(), 9);
        assert_eq!(ring_5x5(sq("a4")).count(), 15);
        assert!(ring_3x3(sq("d4")).contains(sq("d4")));
    }

    #[test]
    fn diagonal_masks_cover_their_lines() {
        let e4 = Square::new(File::E, Rank::R4);
        let t_diag = bishop_attacks(e4, Bitboard::EMPTY);
        assert_eq!(t_diag.count(), 13);
    }
}
