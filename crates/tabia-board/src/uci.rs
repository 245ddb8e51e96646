//! UCI long algebraic move notation.
//!
//! Four or five characters: source square, target square, optional
//! promotion letter. Castling needs the position for context: classical
//! castling reads and writes the king's c/g target square, Chess960
//! castling uses the raw king-square/rook-square encoding.

use crate::castling::CastlingSide;
use crate::san::SanError;
use crate::Position;
use tabia_core::{Move, Piece, Square};

/// Emits a move in UCI long algebraic notation.
pub fn move_to_uci(position: &Position, m: Move) -> String {
    if m.is_castle() && !position.is_chess960() {
        let side = CastlingSide::from_rook_and_king(m.to(), m.from());
        let target = side.king_target(position.side_to_move());
        return format!("{}{}", m.from(), target);
    }
    m.to_string()
}

/// Parses a UCI long algebraic move against the position's legal moves.
pub fn uci_to_move(position: &Position, s: &str) -> Result<Move, SanError> {
    let s = s.trim();
    if !(4..=5).contains(&s.len()) || !s.is_ascii() {
        return Err(SanError::IllegalMove(s.to_string()));
    }
    let from = Square::from_algebraic(&s[0..2])
        .ok_or_else(|| SanError::IllegalMove(s.to_string()))?;
    let to =
        Square::from_algebraic(&s[2..4]).ok_or_else(|| SanError::IllegalMove(s.to_string()))?;
    let promotion = match s.as_bytes().get(4) {
        None => None,
        Some(c) => Some(match c.to_ascii_lowercase() {
            b'q' => Piece::Queen,
            b'r' => Piece::Rook,
            b'b' => Piece::Bishop,
            b'n' => Piece::Knight,
            _ => return Err(SanError::IllegalMove(s.to_string())),
        }),
    };

    let us = position.side_to_move();
    let chess960 = position.is_chess960();
    for m in position.legal_moves().as_slice() {
        if m.from() != from || m.promotion_piece() != promotion {
            continue;
        }
        let target_matches = if m.is_castle() {
            let side = CastlingSide::from_rook_and_king(m.to(), m.from());
            m.to() == to || (!chess960 && side.king_target(us) == to)
        } else {
            m.to() == to
        };
        if target_matches {
            return Ok(*m);
        }
    }
    Err(SanError::IllegalMove(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabia_core::MoveKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parse_simple_moves() {
        let pos = Position::startpos();
        let m = uci_to_move(&pos, "e2e4").unwrap();
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));

        let m = uci_to_move(&pos, "g1f3").unwrap();
        assert_eq!(m.from(), sq("g1"));
    }

    #[test]
    fn parse_rejects_illegal() {
        let pos = Position::startpos();
        assert!(uci_to_move(&pos, "e2e5").is_err());
        assert!(uci_to_move(&pos, "e7e5").is_err());
        assert!(uci_to_move(&pos, "e2").is_err());
        assert!(uci_to_move(&pos, "e2e4x").is_err());
        assert!(uci_to_move(&pos, "xyzw").is_err());
    }

    #[test]
    fn promotion_roundtrip() {
        let pos = Position::from_fen("8/P7/8/8/8/8/8/k3K3 w - - 0 1").unwrap();
        let m = uci_to_move(&pos, "a7a8q").unwrap();
        assert_eq!(m.promotion_piece(), Some(Piece::Queen));
        assert_eq!(move_to_uci(&pos, m), "a7a8q");

        let m = uci_to_move(&pos, "a7a8n").unwrap();
        assert_eq!(m.promotion_piece(), Some(Piece::Knight));
        // Without a promotion letter, the promotion moves must not match.
        assert!(uci_to_move(&pos, "a7a8").is_err());
    }

    #[test]
    fn classical_castling_uses_king_target() {
        let pos =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let m = uci_to_move(&pos, "e1g1").unwrap();
        assert_eq!(m.kind(), MoveKind::Castle);
        assert_eq!(m.to(), Square::H1);
        assert_eq!(move_to_uci(&pos, m), "e1g1");

        let m = uci_to_move(&pos, "e1c1").unwrap();
        assert_eq!(m.kind(), MoveKind::Castle);
        assert_eq!(move_to_uci(&pos, m), "e1c1");

        // The raw king-to-rook encoding is accepted on input as well.
        let m = uci_to_move(&pos, "e1h1").unwrap();
        assert_eq!(m.kind(), MoveKind::Castle);
    }

    #[test]
    fn chess960_castling_uses_rook_square() {
        let pos =
            Position::from_fen("1rk3r1/pppppppp/8/8/8/8/PPPPPPPP/1RK3R1 w GBgb - 0 1").unwrap();
        let m = uci_to_move(&pos, "c1b1").unwrap();
        assert_eq!(m.kind(), MoveKind::Castle);
        assert_eq!(move_to_uci(&pos, m), "c1b1");
    }

    #[test]
    fn uci_roundtrip_for_all_legal_moves() {
        for fen in [
            tabia_core::FenFields::STARTPOS,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            for m in pos.legal_moves().as_slice() {
                let text = move_to_uci(&pos, *m);
                let parsed = uci_to_move(&pos, &text).unwrap();
                assert_eq!(*m, parsed, "roundtrip failed for {} in {}", text, fen);
            }
        }
    }
}
