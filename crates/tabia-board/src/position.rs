//! Chess position representation.
//!
//! A [`Position`] is a plain value: [`Position::do_move`] returns a new
//! position and nothing is mutated after observation, so positions can be
//! freely shared across threads. Castling rights are stored as the rook
//! source squares, which covers Chess960 without special cases. The
//! Zobrist and pawn keys are maintained incrementally through every
//! mutation and checked against a full recomputation in debug builds.

use crate::castling::{blocker_mask, check_mask, CastlingSide};
use crate::movegen::{self, MoveList};
use crate::zobrist::ZOBRIST;
use crate::{attacks, Bitboard};
use std::fmt;
use tabia_core::{Color, ColoredPiece, FenError, FenFields, File, Move, MoveKind, Piece, Rank, Square};

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Bitboards per piece type, union over both colors.
    pieces: [Bitboard; 6],
    /// Bitboards per color.
    colors: [Bitboard; 2],
    /// En passant capture target, if a capture is actually possible.
    en_passant: Option<Square>,
    /// Castling rook source squares, indexed [color][side].
    rook_sources: [[Option<Square>; 2]; 2],
    /// The side to move.
    side_to_move: Color,
    /// Halfmoves played since the start of the game.
    halfmoves_played: u32,
    /// Halfmove clock for the 50-move rule.
    halfmove_clock: u32,
    zobrist_key: u64,
    pawn_key: u64,
}

impl Position {
    /// Creates a position with an empty board.
    pub fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            en_passant: None,
            rook_sources: [[None; 2]; 2],
            side_to_move: Color::White,
            halfmoves_played: 0,
            halfmove_clock: 0,
            zobrist_key: 0,
            pawn_key: 0,
        }
    }

    /// Creates the classical starting position.
    pub fn startpos() -> Self {
        match Self::from_fen(FenFields::STARTPOS) {
            Ok(position) => position,
            Err(_) => unreachable!("the starting position FEN is valid"),
        }
    }

    /// Parses a position from a FEN string (4 to 6 fields; Shredder-FEN
    /// castling letters are understood).
    ///
    /// A warning is logged when a side does not have exactly one king;
    /// such positions are still returned so that fragments and test
    /// diagrams can be worked with.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields = FenFields::parse(fen)?;
        let mut position = Position::empty();

        for (rank_idx, rank_str) in fields.ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            for (file, c) in rank_str.chars().enumerate() {
                if c == '1' {
                    continue;
                }
                let Some(cp) = ColoredPiece::from_fen_char(c) else {
                    // FenFields only lets piece letters and '1' through.
                    continue;
                };
                // SAFETY: rank and file are both < 8
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file as u8) };
                position.pieces[cp.piece.index()].set(sq);
                position.colors[cp.color.index()].set(sq);
            }
        }

        position.side_to_move = fields.active_color;
        position.en_passant = fields.en_passant;
        position.parse_castling_field(&fields.castling)?;

        position.halfmove_clock = fields.halfmove_clock;
        position.halfmoves_played = fields.fullmove_number.saturating_sub(1) * 2
            + (fields.active_color == Color::Black) as u32;

        for color in Color::ALL {
            let kings = position.pieces_of(Piece::King, color).count();
            if kings != 1 {
                tracing::warn!(%color, kings, "position does not have exactly one {} king", color);
            }
        }

        position.rebuild_keys();
        Ok(position)
    }

    /// Resolves the FEN castling field against the board. Legacy letters
    /// pick the outermost rook on that side of the king; Shredder letters
    /// name the rook's file directly.
    fn parse_castling_field(&mut self, castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        for c in castling.chars() {
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let Some(king) = self.king_square(color) else {
                return Err(FenError::Castling(format!(
                    "castling right '{}' without a {} king",
                    c, color
                )));
            };
            let home = Rank::ALL[color.back_rank() as usize];
            let rooks = self.pieces_of(Piece::Rook, color) & Bitboard::RANKS[home.index() as usize];

            let rook = match c.to_ascii_lowercase() {
                // Outermost rook on the kingside of the king.
                'k' => rooks
                    .into_iter()
                    .filter(|sq| sq.file() > king.file())
                    .last(),
                // Outermost rook on the queenside of the king.
                'q' => rooks.into_iter().find(|sq| sq.file() < king.file()),
                file_char => {
                    let file = File::from_char(file_char).ok_or_else(|| {
                        FenError::Castling(format!("invalid character '{}'", c))
                    })?;
                    let sq = Square::new(file, home);
                    rooks.contains(sq).then_some(sq)
                }
            };

            let Some(rook) = rook else {
                return Err(FenError::Castling(format!(
                    "no rook for castling right '{}'",
                    c
                )));
            };
            let side = CastlingSide::from_rook_and_king(rook, king);
            self.rook_sources[color.index()][side.index()] = Some(rook);
        }
        Ok(())
    }

    /// Emits the position as a FEN string. En passant is only shown when a
    /// legal en passant capture exists (the parse side stores the square
    /// unconditionally; this asymmetry is deliberate).
    pub fn fen(&self) -> String {
        self.fen_with_options(false)
    }

    /// Emits the position as a FEN string; `always_show_en_passant` keeps
    /// the stored en passant square even without a legal capture.
    pub fn fen_with_options(&self, always_show_en_passant: bool) -> String {
        let mut fen = String::new();

        for rank in Rank::ALL.iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                let sq = Square::new(file, *rank);
                if let Some(cp) = self.piece_at(sq) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(cp.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if *rank != Rank::R1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&self.castling_field());

        fen.push(' ');
        let show_ep = match self.en_passant {
            Some(_) if always_show_en_passant => true,
            Some(_) => self.has_legal_en_passant(),
            None => false,
        };
        match self.en_passant {
            Some(sq) if show_ep => fen.push_str(&sq.to_algebraic()),
            _ => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number().to_string());

        fen
    }

    /// The castling field: classical `KQkq` letters, or Shredder file
    /// letters as soon as the position is Chess960.
    fn castling_field(&self) -> String {
        let mut field = String::new();
        let shredder = self.is_chess960();
        for color in Color::ALL {
            for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
                let Some(rook) = self.rook_source(color, side) else {
                    continue;
                };
                let c = if shredder {
                    rook.file().to_char()
                } else {
                    match side {
                        CastlingSide::Kingside => 'k',
                        CastlingSide::Queenside => 'q',
                    }
                };
                field.push(match color {
                    Color::White => c.to_ascii_uppercase(),
                    Color::Black => c,
                });
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }

    /// Returns true if a legal en passant capture exists right now.
    fn has_legal_en_passant(&self) -> bool {
        let Some(ep) = self.en_passant else {
            return false;
        };
        let us = self.side_to_move;
        let candidates =
            attacks::pawn_attacks(us.opposite(), ep) & self.pieces_of(Piece::Pawn, us);
        candidates
            .into_iter()
            .any(|from| self.is_legal(Move::new(from, ep, MoveKind::EnPassant)))
    }

    // --- accessors ---

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The en passant capture target, if stored.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The castling rook source square for a color and side.
    #[inline]
    pub fn rook_source(&self, color: Color, side: CastlingSide) -> Option<Square> {
        self.rook_sources[color.index()][side.index()]
    }

    /// Halfmoves played since the start of the game.
    #[inline]
    pub fn halfmoves_played(&self) -> u32 {
        self.halfmoves_played
    }

    /// The halfmove clock for the 50-move rule.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The fullmove number, derived from the halfmove count.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.halfmoves_played / 2 + 1
    }

    /// The position's Zobrist key.
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    /// The pawn-structure key: XOR of the pawn entries only.
    #[inline]
    pub fn pawn_key(&self) -> u64 {
        self.pawn_key
    }

    /// All squares occupied by a piece type (both colors).
    #[inline]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// All squares occupied by a color.
    #[inline]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// The squares occupied by a (piece, color) pair.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// The piece on a square, if any (linear over the piece bitboards).
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        let bb = Bitboard::from_square(sq);
        let color = if (self.colors[Color::White.index()] & bb).is_not_empty() {
            Color::White
        } else if (self.colors[Color::Black.index()] & bb).is_not_empty() {
            Color::Black
        } else {
            return None;
        };
        Piece::ALL
            .into_iter()
            .find(|piece| (self.pieces[piece.index()] & bb).is_not_empty())
            .map(|piece| ColoredPiece::new(piece, color))
    }

    /// The king square of a color, if a king is on the board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).first()
    }

    // --- attacks ---

    /// The squares attacked by a piece of `color` standing on `sq`, with
    /// the current occupancy.
    pub fn attacks_from(&self, piece: Piece, color: Color, sq: Square) -> Bitboard {
        match piece {
            Piece::Pawn => attacks::pawn_attacks(color, sq),
            _ => attacks::attacks_for(piece, sq, self.occupied()),
        }
    }

    /// All pieces of `by` that attack `target`, found by the backward-ray
    /// test: ask which squares could reach `target` moving as each shape,
    /// and intersect with that shape's pieces.
    pub fn attackers(&self, by: Color, target: Square) -> Bitboard {
        let occupied = self.occupied();
        let mut result =
            attacks::pawn_attacks(by.opposite(), target) & self.pieces_of(Piece::Pawn, by);
        result |= attacks::knight_attacks(target) & self.pieces_of(Piece::Knight, by);
        result |= attacks::king_attacks(target) & self.pieces_of(Piece::King, by);
        let diagonal = self.pieces_of(Piece::Bishop, by) | self.pieces_of(Piece::Queen, by);
        result |= attacks::bishop_attacks(target, occupied) & diagonal;
        let orthogonal = self.pieces_of(Piece::Rook, by) | self.pieces_of(Piece::Queen, by);
        result |= attacks::rook_attacks(target, occupied) & orthogonal;
        result
    }

    /// Returns true if `target` is attacked by the opponent of `us`.
    #[inline]
    pub fn is_attacked(&self, us: Color, target: Square) -> bool {
        self.attackers(us.opposite(), target).is_not_empty()
    }

    /// Returns true if `color`'s king is in check.
    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_attacked(color, king),
            None => false,
        }
    }

    // --- move making ---

    /// Makes a move, returning the new position.
    ///
    /// The move must be pseudo-legal; this is asserted, not surfaced as an
    /// error, because callers filter through [`Position::is_pseudo_legal`]
    /// or [`Position::legal_moves`] first.
    pub fn do_move(&self, m: Move) -> Position {
        debug_assert!(self.is_pseudo_legal(m), "do_move on non-candidate move {m}");

        let mut next = self.clone();
        let us = self.side_to_move;
        let them = us.opposite();
        let from = m.from();
        let to = m.to();
        let kind = m.kind();
        let piece = self
            .piece_at(from)
            .expect("pseudo-legal move has a piece on its source square")
            .piece;

        // En passant: the old target expires, a new one appears only after
        // a double push that an enemy pawn could actually capture.
        if let Some(ep) = next.en_passant.take() {
            next.zobrist_key ^= ZOBRIST.en_passant(ep);
        }
        if piece == Piece::Pawn
            && (from.index() as i8 - to.index() as i8).unsigned_abs() == 16
        {
            if let Some(ep) = from.up(us) {
                let capturers =
                    attacks::pawn_attacks(us, ep) & self.pieces_of(Piece::Pawn, them);
                if capturers.is_not_empty() {
                    next.en_passant = Some(ep);
                    next.zobrist_key ^= ZOBRIST.en_passant(ep);
                }
            }
        }

        // Castling rights: a king move drops both of its rook sources; any
        // move from an own rook source or onto an enemy rook source drops
        // that one.
        if piece == Piece::King {
            next.clear_rook_source(us, CastlingSide::Queenside);
            next.clear_rook_source(us, CastlingSide::Kingside);
        }
        for side in CastlingSide::ALL {
            if next.rook_source(us, side) == Some(from) {
                next.clear_rook_source(us, side);
            }
            if next.rook_source(them, side) == Some(to) {
                next.clear_rook_source(them, side);
            }
        }

        match kind {
            MoveKind::EnPassant => {
                if let Some(captured) = to.down(us) {
                    next.remove_piece(Piece::Pawn, them, captured);
                }
                next.remove_piece(Piece::Pawn, us, from);
                next.add_piece(Piece::Pawn, us, to);
            }
            MoveKind::Castle => {
                // Removals first: with Chess960 sources the king and rook
                // may land on each other's squares.
                let side = CastlingSide::from_rook_and_king(to, from);
                next.remove_piece(Piece::King, us, from);
                next.remove_piece(Piece::Rook, us, to);
                next.add_piece(Piece::King, us, side.king_target(us));
                next.add_piece(Piece::Rook, us, side.rook_target(us));
            }
            _ => {
                if kind.is_capture() {
                    let captured = self
                        .piece_at(to)
                        .expect("capture move has a piece on its target square")
                        .piece;
                    next.remove_piece(captured, them, to);
                }
                next.remove_piece(piece, us, from);
                next.add_piece(kind.promotion_piece().unwrap_or(piece), us, to);
            }
        }

        next.halfmoves_played += 1;
        if piece == Piece::Pawn || kind.is_capture() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock += 1;
        }

        next.side_to_move = them;
        next.zobrist_key ^= ZOBRIST.side_flip();

        debug_assert!(next.keys_are_consistent());
        next
    }

    /// Makes a null move: clears en passant, flips the side to move, and
    /// advances the clocks.
    pub fn do_null_move(&self) -> Position {
        let mut next = self.clone();
        if let Some(ep) = next.en_passant.take() {
            next.zobrist_key ^= ZOBRIST.en_passant(ep);
        }
        next.halfmoves_played += 1;
        next.halfmove_clock += 1;
        next.side_to_move = next.side_to_move.opposite();
        next.zobrist_key ^= ZOBRIST.side_flip();
        debug_assert!(next.keys_are_consistent());
        next
    }

    /// Makes a move, routing [`Move::NULL`] to the null-move path. Used by
    /// notation replay, where `--` may appear.
    pub fn do_move_or_null(&self, m: Move) -> Position {
        if m.is_null() {
            self.do_null_move()
        } else {
            self.do_move(m)
        }
    }

    fn add_piece(&mut self, piece: Piece, color: Color, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.colors[color.index()].set(sq);
        let key = ZOBRIST.piece(piece, color, sq);
        self.zobrist_key ^= key;
        if piece == Piece::Pawn {
            self.pawn_key ^= key;
        }
    }

    fn remove_piece(&mut self, piece: Piece, color: Color, sq: Square) {
        self.pieces[piece.index()].clear(sq);
        self.colors[color.index()].clear(sq);
        let key = ZOBRIST.piece(piece, color, sq);
        self.zobrist_key ^= key;
        if piece == Piece::Pawn {
            self.pawn_key ^= key;
        }
    }

    fn clear_rook_source(&mut self, color: Color, side: CastlingSide) {
        if let Some(sq) = self.rook_sources[color.index()][side.index()].take() {
            self.zobrist_key ^= ZOBRIST.rook_source(sq);
        }
    }

    // --- pseudo-legality and legality ---

    /// Decides whether an arbitrary 16-bit word names a rule-permissible
    /// candidate move, except possibly leaving the own king in check. This
    /// is the contract between raw words and [`Position::do_move`]: it is
    /// total, and any move it accepts is safe to make.
    pub fn is_pseudo_legal(&self, m: Move) -> bool {
        let kind = m.kind();
        if kind == MoveKind::None {
            return false;
        }
        let from = m.from();
        let to = m.to();
        let us = self.side_to_move;
        let them = us.opposite();

        let Some(cp) = self.piece_at(from) else {
            return false;
        };
        if cp.color != us {
            return false;
        }
        let piece = cp.piece;

        if kind == MoveKind::Castle {
            if piece != Piece::King || from.rank().index() != us.back_rank() {
                return false;
            }
            let side = CastlingSide::from_rook_and_king(to, from);
            if self.rook_source(us, side) != Some(to) {
                return false;
            }
            let blockers = blocker_mask(us, side, from, to);
            if (self.occupied() & blockers).is_not_empty() {
                return false;
            }
            return check_mask(us, side, from)
                .into_iter()
                .all(|sq| !self.is_attacked(us, sq));
        }

        // Never onto an own piece.
        if self.colors[us.index()].contains(to) {
            return false;
        }
        let target_is_enemy = self.colors[them.index()].contains(to);

        match kind {
            MoveKind::EnPassant => {
                if piece != Piece::Pawn || self.en_passant != Some(to) {
                    return false;
                }
            }
            k if k.is_capture() => {
                if !target_is_enemy {
                    return false;
                }
            }
            _ => {
                if target_is_enemy {
                    return false;
                }
            }
        }

        if piece == Piece::Pawn {
            // Promotions exactly on the last rank.
            let on_last_rank = to.rank() == Rank::R8.relative_to(us);
            if kind.is_promotion() != on_last_rank {
                return false;
            }
            if kind.is_capture() {
                return attacks::pawn_attacks(us, from).contains(to);
            }
            // Quiet push: single, or double from the first-push rank over
            // an empty intermediate square.
            match from.up(us) {
                Some(single) if single == to => true,
                Some(single) => {
                    if self.occupied().contains(single) {
                        return false;
                    }
                    single.up(us) == Some(to) && from.rank() == Rank::R2.relative_to(us)
                }
                None => false,
            }
        } else {
            if kind.is_promotion() || kind == MoveKind::EnPassant {
                return false;
            }
            attacks::attacks_for(piece, from, self.occupied()).contains(to)
        }
    }

    /// Returns true if the move is fully legal: pseudo-legal and not
    /// leaving the own king in check.
    pub fn is_legal(&self, m: Move) -> bool {
        self.is_pseudo_legal(m) && !self.do_move(m).in_check(self.side_to_move)
    }

    /// Generates all legal moves.
    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Generates all pseudo-legal moves.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        movegen::generate_pseudo_legal(self)
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    // --- transforms ---

    /// Mirrors the position top-to-bottom, swapping the colors: every
    /// bitboard is flipped, the rook sources trade colors, the side to
    /// move flips, and the halfmove count shifts by one to keep its parity
    /// in step with the side to move. An involution.
    pub fn mirror_vertical(&self) -> Position {
        let mut p = self.clone();
        for i in 0..6 {
            p.pieces[i] = self.pieces[i].mirror_vertical();
        }
        p.colors[Color::White.index()] =
            self.colors[Color::Black.index()].mirror_vertical();
        p.colors[Color::Black.index()] =
            self.colors[Color::White.index()].mirror_vertical();
        p.en_passant = self.en_passant.map(Square::mirror_vertical);
        for side in CastlingSide::ALL {
            p.rook_sources[Color::White.index()][side.index()] = self.rook_sources
                [Color::Black.index()][side.index()]
            .map(Square::mirror_vertical);
            p.rook_sources[Color::Black.index()][side.index()] = self.rook_sources
                [Color::White.index()][side.index()]
            .map(Square::mirror_vertical);
        }
        p.side_to_move = self.side_to_move.opposite();
        p.halfmoves_played = match self.side_to_move {
            Color::White => self.halfmoves_played + 1,
            Color::Black => self.halfmoves_played.saturating_sub(1),
        };
        p.rebuild_keys();
        p
    }

    /// Mirrors the position left-to-right: every bitboard is flipped and
    /// the queenside/kingside rook sources trade places per color.
    /// Castling rights semantics are preserved. An involution.
    pub fn mirror_horizontal(&self) -> Position {
        let mut p = self.clone();
        for i in 0..6 {
            p.pieces[i] = self.pieces[i].mirror_horizontal();
        }
        for color in Color::ALL {
            p.colors[color.index()] = self.colors[color.index()].mirror_horizontal();
            p.rook_sources[color.index()][CastlingSide::Queenside.index()] = self.rook_sources
                [color.index()][CastlingSide::Kingside.index()]
            .map(Square::mirror_horizontal);
            p.rook_sources[color.index()][CastlingSide::Kingside.index()] = self.rook_sources
                [color.index()][CastlingSide::Queenside.index()]
            .map(Square::mirror_horizontal);
        }
        p.en_passant = self.en_passant.map(Square::mirror_horizontal);
        p.rebuild_keys();
        p
    }

    // --- keys ---

    /// Recomputes the Zobrist and pawn keys from the current fields.
    pub fn calculate_keys(&self) -> (u64, u64) {
        let mut zobrist = 0u64;
        let mut pawn = 0u64;
        for piece in Piece::ALL {
            for color in Color::ALL {
                for sq in self.pieces_of(piece, color) {
                    let key = ZOBRIST.piece(piece, color, sq);
                    zobrist ^= key;
                    if piece == Piece::Pawn {
                        pawn ^= key;
                    }
                }
            }
        }
        zobrist ^= ZOBRIST.side(self.side_to_move);
        if let Some(ep) = self.en_passant {
            zobrist ^= ZOBRIST.en_passant(ep);
        }
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if let Some(sq) = self.rook_source(color, side) {
                    zobrist ^= ZOBRIST.rook_source(sq);
                }
            }
        }
        (zobrist, pawn)
    }

    /// Returns true if the incrementally maintained keys match a full
    /// recomputation.
    pub fn keys_are_consistent(&self) -> bool {
        (self.zobrist_key, self.pawn_key) == self.calculate_keys()
    }

    fn rebuild_keys(&mut self) {
        let (zobrist, pawn) = self.calculate_keys();
        self.zobrist_key = zobrist;
        self.pawn_key = pawn;
    }

    // --- classification ---

    /// Returns true if the position requires Shredder-FEN castling
    /// letters: a king off the e-file while holding rights, or a castling
    /// rook off its classical corner file.
    pub fn is_chess960(&self) -> bool {
        for color in Color::ALL {
            let has_rights = CastlingSide::ALL
                .iter()
                .any(|side| self.rook_source(color, *side).is_some());
            if has_rights {
                if let Some(king) = self.king_square(color) {
                    if king.file() != File::E {
                        return true;
                    }
                }
            }
            if let Some(rook) = self.rook_source(color, CastlingSide::Queenside) {
                if rook.file() != File::A {
                    return true;
                }
            }
            if let Some(rook) = self.rook_source(color, CastlingSide::Kingside) {
                if rook.file() != File::H {
                    return true;
                }
            }
        }
        false
    }

    /// Repetition equality: piece and color bitboards, rook sources, side
    /// to move, and en passant target. The clocks are ignored.
    pub fn is_repetition_of(&self, other: &Position) -> bool {
        self.pieces == other.pieces
            && self.colors == other.colors
            && self.rook_sources == other.rook_sources
            && self.side_to_move == other.side_to_move
            && self.en_passant == other.en_passant
    }

    /// Renders the board as an 8-line diagram, optionally with Unicode
    /// glyphs (solid for White).
    pub fn render(&self, unicode: bool) -> String {
        let mut out = String::new();
        for rank in Rank::ALL.iter().rev() {
            out.push(rank.to_char());
            for file in File::ALL {
                out.push(' ');
                match self.piece_at(Square::new(file, *rank)) {
                    Some(cp) if unicode => out.push(cp.to_unicode_char()),
                    Some(cp) => out.push(cp.to_fen_char()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
