//! Move generation.
//!
//! Generators produce pseudo-legal moves into a caller-sized buffer; the
//! legality filter replays each candidate and drops the ones that leave
//! the own king in check. No emission order is guaranteed.

use crate::castling::{blocker_mask, check_mask, CastlingSide};
use crate::{attacks, Position};
use tabia_core::{Move, MoveKind, Piece, Rank};

/// A move buffer of fixed capacity, filled by the generators.
///
/// Generation never touches the heap: the buffer lives wherever the
/// caller puts it, and once the capacity (chosen for the most crowded
/// Chess960 positions) is reached, further pushes are swallowed rather
/// than grown into.
#[derive(Clone)]
pub struct MoveList {
    entries: [Move; Self::CAPACITY],
    len: usize,
}

impl MoveList {
    /// Buffer size; above the pseudo-legal move count of any reachable
    /// position.
    pub const CAPACITY: usize = 320;

    /// An empty buffer.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            entries: [Move::NULL; Self::CAPACITY],
            len: 0,
        }
    }

    /// Appends a move; a full buffer swallows it silently.
    #[inline]
    pub fn push(&mut self, m: Move) {
        if self.len == Self::CAPACITY {
            return;
        }
        self.entries[self.len] = m;
        self.len += 1;
    }

    /// How many moves the buffer holds.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when no moves have been pushed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The pushed moves, in push order.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.entries[..self.len]
    }

    /// True if the buffer holds this exact move word.
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all pseudo-legal moves for the side to move.
pub fn generate_pseudo_legal(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    generate_pawn_captures(position, &mut moves);
    generate_pawn_quiets(position, &mut moves);
    generate_piece_captures(position, &mut moves);
    generate_piece_quiets(position, &mut moves);
    generate_castling(position, &mut moves);
    moves
}

/// Generates all legal moves: every pseudo-legal candidate is replayed,
/// and those leaving the own king in check are dropped.
pub fn legal_moves(position: &Position) -> MoveList {
    let us = position.side_to_move();
    let mut legal = MoveList::new();
    for m in &generate_pseudo_legal(position) {
        if !position.do_move(*m).in_check(us) {
            legal.push(*m);
        }
    }
    legal
}

/// Test oracle: scans all 65536 move words through the pseudo-legality
/// predicate. Must agree with the piece-wise generators.
pub fn generate_pseudo_legal_exhaustive(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for raw in 0..=u16::MAX {
        let m = Move::from_raw(raw);
        if position.is_pseudo_legal(m) {
            moves.push(m);
        }
    }
    moves
}

fn push_pawn_capture(moves: &mut MoveList, from: tabia_core::Square, to: tabia_core::Square, last_rank: Rank) {
    if to.rank() == last_rank {
        for piece in Piece::PROMOTABLE {
            moves.push(Move::new(from, to, MoveKind::promotion(piece, true)));
        }
    } else {
        moves.push(Move::capture(from, to));
    }
}

/// Pawn captures, including capturing promotions and en passant.
fn generate_pawn_captures(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let them = us.opposite();
    let enemy = position.color_bb(them);
    let last_rank = Rank::R8.relative_to(us);

    for from in position.pieces_of(Piece::Pawn, us) {
        let attack_mask = attacks::pawn_attacks(us, from);
        for to in attack_mask & enemy {
            push_pawn_capture(moves, from, to, last_rank);
        }
        if let Some(ep) = position.en_passant() {
            if attack_mask.contains(ep) {
                moves.push(Move::new(from, ep, MoveKind::EnPassant));
            }
        }
    }
}

/// Pawn pushes: single, double from the first-push rank, and quiet
/// promotions.
fn generate_pawn_quiets(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let empty = !position.occupied();
    let last_rank = Rank::R8.relative_to(us);
    let double_rank = Rank::R2.relative_to(us);

    for from in position.pieces_of(Piece::Pawn, us) {
        let Some(single) = (attacks::pawn_push(us, from) & empty).first() else {
            continue;
        };
        if single.rank() == last_rank {
            for piece in Piece::PROMOTABLE {
                moves.push(Move::new(from, single, MoveKind::promotion(piece, false)));
            }
        } else {
            moves.push(Move::normal(from, single));
            if from.rank() == double_rank {
                if let Some(double) = (attacks::pawn_push(us, single) & empty).first() {
                    moves.push(Move::normal(from, double));
                }
            }
        }
    }
}

/// Captures for knights, bishops, rooks, queens, and the king.
fn generate_piece_captures(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let enemy = position.color_bb(us.opposite());
    let occupied = position.occupied();

    for piece in [
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        for from in position.pieces_of(piece, us) {
            for to in attacks::attacks_for(piece, from, occupied) & enemy {
                moves.push(Move::capture(from, to));
            }
        }
    }
}

/// Quiet moves for knights, bishops, rooks, queens, and the king.
fn generate_piece_quiets(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let occupied = position.occupied();
    let free = !occupied;

    for piece in [
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        for from in position.pieces_of(piece, us) {
            for to in attacks::attacks_for(piece, from, occupied) & free {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

/// Castling moves: for each side with a surviving rook source, the
/// block-sensitive squares must be empty and the check-sensitive squares
/// unattacked. Encoded as king-square to rook-square.
fn generate_castling(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move();
    let Some(king) = position.king_square(us) else {
        return;
    };
    let occupied = position.occupied();

    for side in CastlingSide::ALL {
        let Some(rook) = position.rook_source(us, side) else {
            continue;
        };
        if (occupied & blocker_mask(us, side, king, rook)).is_not_empty() {
            continue;
        }
        let safe = check_mask(us, side, king)
            .into_iter()
            .all(|sq| !position.is_attacked(us, sq));
        if safe {
            moves.push(Move::new(king, rook, MoveKind::Castle));
        }
    }
}
