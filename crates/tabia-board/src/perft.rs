//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::movegen::{generate_pseudo_legal_exhaustive, legal_moves};
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
///
/// Non-positive depths count the position itself: `perft(p, 0)` and
/// `perft(p, -1)` are both 1.
pub fn perft(position: &Position, depth: i32) -> u64 {
    if depth <= 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let next = position.do_move(*m);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Perft with divide: the node count under each root move. Useful for
/// narrowing down which move has an incorrect subtree.
pub fn perft_divide(position: &Position, depth: i32) -> Vec<(String, u64)> {
    let moves = legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let next = position.do_move(*m);
        results.push((m.to_string(), perft(&next, depth - 1)));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Perft over the exhaustive 16-bit scan generator instead of the
/// piece-wise generators. Both paths must produce identical counts.
pub fn perft_exhaustive(position: &Position, depth: i32) -> u64 {
    if depth <= 0 {
        return 1;
    }

    let us = position.side_to_move();
    let mut nodes = 0u64;
    for m in &generate_pseudo_legal_exhaustive(position) {
        let next = position.do_move(*m);
        if next.in_check(us) {
            continue;
        }
        if depth == 1 {
            nodes += 1;
        } else {
            nodes += perft_exhaustive(&next, depth - 1);
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_and_negative_are_one() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 0), 1);
        assert_eq!(perft(&position, -1), 1);
        assert_eq!(perft_exhaustive(&position, 0), 1);
        assert_eq!(perft_exhaustive(&position, -1), 1);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let position = Position::startpos();
        let results = perft_divide(&position, 2);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&position, 2));
    }
}
