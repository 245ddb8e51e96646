//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Nh4g6".
//! The null move renders as "Z0"; parsing also accepts "--" and "0000".
//! Parsing matches a tolerant pattern against the position's legal moves
//! and falls back to UCI long algebraic notation.

use crate::castling::CastlingSide;
use crate::movegen::legal_moves;
use crate::{uci, Position};
use std::fmt;
use tabia_core::{File, Move, Piece, Rank, Square};

/// Error type for move notation parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// The input is empty.
    Empty,
    /// No legal move matches the notation.
    IllegalMove(String),
    /// More than one legal move matches the disambiguation pattern.
    AmbiguousMove(String),
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "empty move notation"),
            SanError::IllegalMove(s) => write!(f, "illegal move notation: {}", s),
            SanError::AmbiguousMove(s) => write!(f, "ambiguous move notation: {}", s),
        }
    }
}

impl std::error::Error for SanError {}

/// The suffix a SAN rendering carries, derived from the position after the
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SanSuffix {
    None,
    Check,
    Mate,
    Draw,
}

pub(crate) fn suffix_after(after: &Position) -> SanSuffix {
    let check = after.in_check(after.side_to_move());
    let no_moves = legal_moves(after).is_empty();
    if no_moves && check {
        SanSuffix::Mate
    } else if no_moves || after.halfmove_clock() > 100 {
        SanSuffix::Draw
    } else if check {
        SanSuffix::Check
    } else {
        SanSuffix::None
    }
}

/// Converts a move to SAN given the position it is played in.
///
/// The move must be legal. Mate is marked with `#`, a drawing move
/// (stalemate, or a halfmove clock beyond 100 after the move) with a
/// trailing ` 1/2-1/2`, and any other check with `+`.
pub fn move_to_san(position: &Position, m: Move) -> String {
    if m.is_null() {
        return "Z0".to_string();
    }
    let mut san = san_body(position, m);
    match suffix_after(&position.do_move(m)) {
        SanSuffix::Mate => san.push('#'),
        SanSuffix::Draw => san.push_str(" 1/2-1/2"),
        SanSuffix::Check => san.push('+'),
        SanSuffix::None => {}
    }
    san
}

/// The SAN of a move without its check/mate/draw suffix.
pub(crate) fn san_body(position: &Position, m: Move) -> String {
    if m.is_castle() {
        return match CastlingSide::from_rook_and_king(m.to(), m.from()) {
            CastlingSide::Kingside => "O-O".to_string(),
            CastlingSide::Queenside => "O-O-O".to_string(),
        };
    }

    let from = m.from();
    let piece = position
        .piece_at(from)
        .expect("SAN of a move with no piece on its source square")
        .piece;
    let mut san = String::new();

    if piece != Piece::Pawn {
        san.push(piece.to_san_char());
        san.push_str(&disambiguation(position, m, piece));
    }

    if m.is_capture() {
        // Pawn captures always name the source file.
        if piece == Piece::Pawn {
            san.push(from.file().to_char());
        }
        san.push('x');
    }

    san.push_str(&m.to().to_algebraic());

    if let Some(promo) = m.promotion_piece() {
        san.push('=');
        san.push(promo.to_san_char());
    }

    san
}

/// Minimal disambiguation: nothing, then the file letter, then the rank
/// digit, then both; the first variant unique among legal moves of the
/// same piece to the same target wins.
fn disambiguation(position: &Position, m: Move, piece: Piece) -> String {
    let from = m.from();
    let to = m.to();
    let moves = legal_moves(position);
    let candidates: Vec<Move> = moves
        .as_slice()
        .iter()
        .copied()
        .filter(|other| {
            other.to() == to
                && !other.is_castle()
                && position
                    .piece_at(other.from())
                    .is_some_and(|cp| cp.piece == piece)
        })
        .collect();

    if candidates.len() <= 1 {
        return String::new();
    }

    let same_file = candidates
        .iter()
        .filter(|other| other.from().file() == from.file())
        .count();
    if same_file == 1 {
        return from.file().to_char().to_string();
    }

    let same_rank = candidates
        .iter()
        .filter(|other| other.from().rank() == from.rank())
        .count();
    if same_rank == 1 {
        return from.rank().to_char().to_string();
    }

    format!("{}{}", from.file().to_char(), from.rank().to_char())
}

/// Parses a move in SAN (or, as a fallback, UCI long algebraic notation)
/// against the given position.
///
/// `"Z0"`, `"--"`, and `"0000"` yield the null move. A SAN pattern
/// matching more than one legal move is an error; matching none falls
/// through to the UCI parser.
pub fn san_to_move(position: &Position, s: &str) -> Result<Move, SanError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SanError::Empty);
    }
    if matches!(s, "Z0" | "--" | "0000") {
        return Ok(Move::NULL);
    }
    // Our own emission appends the draw marker after a drawing move.
    let s = s.strip_suffix(" 1/2-1/2").unwrap_or(s).trim_end();

    if let Some(pattern) = SanPattern::parse(s) {
        let mut matching: Option<Move> = None;
        for m in legal_moves(position).as_slice() {
            if pattern.matches(position, *m) {
                if matching.is_some() {
                    return Err(SanError::AmbiguousMove(s.to_string()));
                }
                matching = Some(*m);
            }
        }
        if let Some(m) = matching {
            return Ok(m);
        }
    }

    uci::uci_to_move(position, s).map_err(|_| SanError::IllegalMove(s.to_string()))
}

/// A tolerant SAN pattern: whitespace and check marks are stripped, and
/// disambiguators constrain the source square.
#[derive(Debug)]
struct SanPattern {
    castle: Option<CastlingSide>,
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    target: Option<Square>,
    promotion: Option<Piece>,
    capture: bool,
}

impl SanPattern {
    fn parse(s: &str) -> Option<SanPattern> {
        let s = s.trim().trim_end_matches(['+', '#']);

        let castle = match s {
            "O-O" | "0-0" => Some(CastlingSide::Kingside),
            "O-O-O" | "0-0-0" => Some(CastlingSide::Queenside),
            _ => None,
        };
        if let Some(side) = castle {
            return Some(SanPattern {
                castle: Some(side),
                piece: Piece::King,
                from_file: None,
                from_rank: None,
                target: None,
                promotion: None,
                capture: false,
            });
        }

        let mut chars: Vec<char> = s.chars().collect();
        if chars.is_empty() {
            return None;
        }

        // Optional leading piece letter, else a pawn move.
        let piece = match Piece::from_san_char(chars[0]) {
            Some(p) => {
                chars.remove(0);
                p
            }
            None => Piece::Pawn,
        };

        // Optional promotion suffix "=P".
        let mut promotion = None;
        if chars.len() >= 2 && chars[chars.len() - 2] == '=' {
            promotion = Some(Piece::from_san_char(chars[chars.len() - 1])?);
            chars.truncate(chars.len() - 2);
        }

        // Optional capture mark anywhere before the target.
        let capture = chars.contains(&'x');
        chars.retain(|c| *c != 'x');

        if chars.len() < 2 || chars.len() > 4 {
            return None;
        }

        let rank_char = chars.pop()?;
        let file_char = chars.pop()?;
        let target = Square::new(File::from_char(file_char)?, Rank::from_char(rank_char)?);
        // The file character of a square is lowercase; "Bxc6" style only.
        if !file_char.is_ascii_lowercase() {
            return None;
        }

        // Whatever precedes the target constrains the source square.
        let mut from_file = None;
        let mut from_rank = None;
        for c in chars {
            if let Some(f) = File::from_index((c as u8).wrapping_sub(b'a')) {
                if from_file.is_some() {
                    return None;
                }
                from_file = Some(f);
            } else if let Some(r) = Rank::from_char(c) {
                if from_rank.is_some() {
                    return None;
                }
                from_rank = Some(r);
            } else {
                return None;
            }
        }

        Some(SanPattern {
            castle: None,
            piece,
            from_file,
            from_rank,
            target: Some(target),
            promotion,
            capture,
        })
    }

    fn matches(&self, position: &Position, m: Move) -> bool {
        if let Some(side) = self.castle {
            return m.is_castle()
                && CastlingSide::from_rook_and_king(m.to(), m.from()) == side;
        }
        if m.is_castle() {
            return false;
        }
        let Some(cp) = position.piece_at(m.from()) else {
            return false;
        };
        if cp.piece != self.piece {
            return false;
        }
        if self.target != Some(m.to()) {
            return false;
        }
        if let Some(file) = self.from_file {
            if m.from().file() != file {
                return false;
            }
        }
        if let Some(rank) = self.from_rank {
            if m.from().rank() != rank {
                return false;
            }
        }
        // A promotion must be spelled out; a spelled-out promotion must
        // match the move's piece.
        if self.promotion != m.promotion_piece() {
            return false;
        }
        if self.capture && !m.is_capture() {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabia_core::MoveKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn san_pawn_push() {
        let p = Position::startpos();
        assert_eq!(move_to_san(&p, Move::normal(sq("e2"), sq("e4"))), "e4");
    }

    #[test]
    fn san_knight_move() {
        let p = Position::startpos();
        assert_eq!(move_to_san(&p, Move::normal(sq("g1"), sq("f3"))), "Nf3");
    }

    #[test]
    fn san_pawn_capture_names_the_file() {
        let p = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        assert_eq!(
            move_to_san(&p, Move::capture(sq("e4"), sq("d5"))),
            "exd5"
        );
    }

    #[test]
    fn san_en_passant_names_the_file() {
        let p = pos("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3");
        assert_eq!(
            move_to_san(&p, Move::new(sq("f5"), sq("e6"), MoveKind::EnPassant)),
            "fxe6"
        );
    }

    #[test]
    fn san_castling() {
        let p = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_eq!(
            move_to_san(&p, Move::new(Square::E1, Square::H1, MoveKind::Castle)),
            "O-O"
        );
        assert_eq!(
            move_to_san(&p, Move::new(Square::E1, Square::A1, MoveKind::Castle)),
            "O-O-O"
        );
    }

    #[test]
    fn san_promotion() {
        let p = pos("8/P7/8/8/8/8/8/k3K3 w - - 0 1");
        assert_eq!(
            move_to_san(&p, Move::new(sq("a7"), sq("a8"), MoveKind::PromoteQueen)),
            "a8=Q+"
        );
        assert_eq!(
            move_to_san(&p, Move::new(sq("a7"), sq("a8"), MoveKind::PromoteKnight)),
            "a8=N"
        );
    }

    #[test]
    fn san_check_and_mate_suffixes() {
        let p = pos("4k3/8/8/8/8/8/3R4/4K3 w - - 0 1");
        assert_eq!(move_to_san(&p, Move::normal(sq("d2"), sq("d8"))), "Rd8+");

        let mate = pos("6k1/5ppp/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(move_to_san(&mate, Move::normal(sq("a1"), sq("a8"))), "Ra8#");
    }

    #[test]
    fn san_stalemating_move_carries_draw_suffix() {
        // Qf7 stalemates the bare king in the corner.
        let p = pos("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
        let m = Move::normal(sq("f1"), sq("f7"));
        let after = p.do_move(m);
        assert!(after.is_stalemate());
        assert_eq!(move_to_san(&p, m), "Qf7 1/2-1/2");
    }

    #[test]
    fn san_clock_trigger_carries_draw_suffix() {
        let p = pos("8/8/8/8/8/3k4/8/3K3R w - - 100 70");
        let m = Move::normal(sq("h1"), sq("h2"));
        assert_eq!(move_to_san(&p, m), "Rh2 1/2-1/2");
    }

    #[test]
    fn disambiguation_scenarios() {
        // A tangle of rooks and knights covering every disambiguation
        // shape: file only, rank only, and both.
        let p = pos("N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1");
        assert_eq!(move_to_san(&p, Move::normal(sq("c3"), sq("c2"))), "Rcc2");
        assert_eq!(move_to_san(&p, Move::normal(sq("b2"), sq("c2"))), "Rbc2");
        assert_eq!(move_to_san(&p, Move::normal(sq("a4"), sq("b6"))), "N4b6");
        assert_eq!(move_to_san(&p, Move::normal(sq("h8"), sq("g6"))), "N8g6");
        assert_eq!(move_to_san(&p, Move::normal(sq("h4"), sq("g6"))), "Nh4g6");
    }

    #[test]
    fn null_move_renders_and_parses() {
        let p = Position::startpos();
        assert_eq!(move_to_san(&p, Move::NULL), "Z0");
        assert_eq!(san_to_move(&p, "Z0").unwrap(), Move::NULL);
        assert_eq!(san_to_move(&p, "--").unwrap(), Move::NULL);
        assert_eq!(san_to_move(&p, "0000").unwrap(), Move::NULL);
    }

    #[test]
    fn parse_simple_san() {
        let p = Position::startpos();
        let m = san_to_move(&p, "e4").unwrap();
        assert_eq!(m.to(), sq("e4"));
        let m = san_to_move(&p, "Nf3").unwrap();
        assert_eq!(m.from(), sq("g1"));
    }

    #[test]
    fn parse_tolerates_suffixes_and_whitespace() {
        let p = pos("4k3/8/8/8/8/8/3R4/4K3 w - - 0 1");
        let m = san_to_move(&p, " Rd8+ ").unwrap();
        assert_eq!(m.to(), sq("d8"));
    }

    #[test]
    fn parse_castling_variants() {
        let p = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        for text in ["O-O", "0-0", "O-O+"] {
            let m = san_to_move(&p, text).unwrap();
            assert_eq!(m.kind(), MoveKind::Castle);
            assert_eq!(m.to(), Square::H1);
        }
        let m = san_to_move(&p, "O-O-O").unwrap();
        assert_eq!(m.to(), Square::A1);
    }

    #[test]
    fn parse_promotion_requires_spelling() {
        let p = pos("8/P7/8/8/8/8/8/k3K3 w - - 0 1");
        let m = san_to_move(&p, "a8=R").unwrap();
        assert_eq!(m.promotion_piece(), Some(Piece::Rook));
        // Bare "a8" matches no move (four promotions disagree), so it
        // falls through to UCI and fails there too.
        assert!(san_to_move(&p, "a8").is_err());
    }

    #[test]
    fn parse_ambiguity_is_an_error() {
        let p = pos("N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1");
        assert!(matches!(
            san_to_move(&p, "Nb6"),
            Err(SanError::AmbiguousMove(_))
        ));
        // Disambiguated forms parse.
        assert_eq!(san_to_move(&p, "N4b6").unwrap(), Move::normal(sq("a4"), sq("b6")));
        assert_eq!(
            san_to_move(&p, "Nh4g6").unwrap(),
            Move::normal(sq("h4"), sq("g6"))
        );
    }

    #[test]
    fn parse_falls_back_to_uci() {
        let p = Position::startpos();
        let m = san_to_move(&p, "e2e4").unwrap();
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        let m = san_to_move(&p, "g1f3").unwrap();
        assert_eq!(m.from(), sq("g1"));
    }

    #[test]
    fn parse_rejects_nonsense() {
        let p = Position::startpos();
        assert!(san_to_move(&p, "").is_err());
        assert!(san_to_move(&p, "Ke4").is_err());
        assert!(san_to_move(&p, "xyzzy").is_err());
        assert!(san_to_move(&p, "Qh5").is_err());
    }

    #[test]
    fn san_roundtrip_for_legal_moves() {
        for fen in [
            tabia_core::FenFields::STARTPOS,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ] {
            let p = Position::from_fen(fen).unwrap();
            for m in p.legal_moves().as_slice() {
                let san = move_to_san(&p, *m);
                let parsed = san_to_move(&p, &san)
                    .unwrap_or_else(|e| panic!("{} failed to parse in {}: {}", san, fen, e));
                assert_eq!(*m, parsed, "roundtrip failed for {} in {}", san, fen);
            }
        }
    }
}
