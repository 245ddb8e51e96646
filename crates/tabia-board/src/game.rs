//! Game records: headers, move list, running positions, and the
//! draw/termination rules that need game history.

use crate::movegen::legal_moves;
use crate::san::{san_to_move, SanError};
use crate::Position;
use std::fmt;
use std::str::FromStr;
use tabia_core::{Color, FenError, FenFields, Move};

/// The outcome of a game, as written in PGN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// The game is unfinished or the outcome unknown; written `*`.
    Ongoing,
}

impl GameResult {
    /// The PGN result token.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Ongoing => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-0" => Ok(GameResult::WhiteWins),
            "0-1" => Ok(GameResult::BlackWins),
            "1/2-1/2" => Ok(GameResult::Draw),
            "*" => Ok(GameResult::Ongoing),
            _ => Err(()),
        }
    }
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    IllegalMove(String),
    /// The move text could not be resolved to a legal move.
    Notation(SanError),
    /// A history query used an index outside the position list.
    IndexOutOfRange { index: isize, len: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove(s) => write!(f, "illegal move: {}", s),
            GameError::Notation(e) => write!(f, "{}", e),
            GameError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for {} positions", index, len)
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<SanError> for GameError {
    fn from(e: SanError) -> Self {
        GameError::Notation(e)
    }
}

/// The Seven-Tag Roster every game starts with.
const SEVEN_TAG_ROSTER: [(&str, &str); 7] = [
    ("Event", "?"),
    ("Site", "?"),
    ("Date", "????.??.??"),
    ("Round", "?"),
    ("White", "?"),
    ("Black", "?"),
    ("Result", "*"),
];

/// A chess game: headers, a starting position, the move list, and the
/// result.
///
/// The full sequence of positions is kept, so repetition queries compare
/// positions field by field rather than trusting hashes. Headers preserve
/// insertion order.
#[derive(Debug, Clone)]
pub struct Game {
    headers: Vec<(String, String)>,
    positions: Vec<Position>,
    moves: Vec<Move>,
    result: GameResult,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the classical starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position. A non-classical
    /// start adds the `SetUp` and `FEN` headers.
    pub fn from_position(position: Position) -> Self {
        let mut game = Game {
            headers: SEVEN_TAG_ROSTER
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            positions: vec![position],
            moves: Vec::new(),
            result: GameResult::Ongoing,
        };
        let start_fen = game.positions[0].fen();
        if start_fen != FenFields::STARTPOS {
            game.set_header("SetUp", "1");
            game.set_header("FEN", &start_fen);
        }
        game.update_result();
        game
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// The headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Looks up a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header, updating it in place or appending it.
    pub fn set_header(&mut self, key: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((key.to_string(), value.to_string())),
        }
    }

    /// The position the game started from.
    pub fn start_position(&self) -> &Position {
        &self.positions[0]
    }

    /// The position after all moves.
    pub fn current_position(&self) -> &Position {
        self.positions
            .last()
            .expect("a game always holds its starting position")
    }

    /// The running sequence of positions: the start position followed by
    /// the position after each move.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The moves played.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The number of half-moves played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// The game result. `Ongoing` until a terminating move is added or a
    /// result is set explicitly (e.g. from a PGN result token).
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Overrides the result. The `Result` header is left untouched; the
    /// game's own result is authoritative.
    pub fn set_result(&mut self, result: GameResult) {
        self.result = result;
    }

    /// Appends a move. The move must be legal; [`Move::NULL`] is accepted
    /// and played as a null move. After appending, an `Ongoing` result is
    /// re-evaluated: checkmate, stalemate, fivefold repetition, and the
    /// 75-move rule set it.
    pub fn add_move(&mut self, m: Move) -> Result<(), GameError> {
        let current = self.current_position();
        let next = if m.is_null() {
            current.do_null_move()
        } else {
            if !current.is_legal(m) {
                return Err(GameError::IllegalMove(m.to_string()));
            }
            current.do_move(m)
        };
        self.positions.push(next);
        self.moves.push(m);
        self.update_result();
        Ok(())
    }

    /// Parses SAN or UCI move text against the current position and
    /// appends the move.
    pub fn add_move_text(&mut self, text: &str) -> Result<(), GameError> {
        let m = san_to_move(self.current_position(), text)?;
        self.add_move(m)
    }

    fn update_result(&mut self) {
        if self.result != GameResult::Ongoing {
            return;
        }
        let current = self.current_position();
        if legal_moves(current).is_empty() {
            if current.in_check(current.side_to_move()) {
                // The side to move is mated; the winner is the other side.
                self.result = match current.side_to_move() {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                };
            } else {
                self.result = GameResult::Draw;
            }
            return;
        }
        let mandatory_draw = self.fivefold_repetition(-1).unwrap_or(false)
            || self.seventy_five_move_rule(-1).unwrap_or(false);
        if mandatory_draw {
            self.result = GameResult::Draw;
        }
    }

    /// Normalizes an index into the position list. Negative indices count
    /// from the end, Python style.
    fn resolve_index(&self, index: isize) -> Result<usize, GameError> {
        let len = self.positions.len();
        let resolved = if index < 0 {
            len as isize + index
        } else {
            index
        };
        if (0..len as isize).contains(&resolved) {
            Ok(resolved as usize)
        } else {
            Err(GameError::IndexOutOfRange { index, len })
        }
    }

    /// How many positions in `positions[0..=index]` are repetition-equal
    /// to `positions[index]` (that one included). Repetition equality
    /// ignores the clocks.
    pub fn repetition_count(&self, index: isize) -> Result<usize, GameError> {
        let target = self.resolve_index(index)?;
        let reference = &self.positions[target];
        Ok(self.positions[..=target]
            .iter()
            .filter(|p| p.is_repetition_of(reference))
            .count())
    }

    /// Threefold repetition at the given position: claimable.
    pub fn has_repetition(&self, index: isize) -> Result<bool, GameError> {
        Ok(self.repetition_count(index)? >= 3)
    }

    /// Fivefold repetition at the given position: a mandatory draw.
    pub fn fivefold_repetition(&self, index: isize) -> Result<bool, GameError> {
        Ok(self.repetition_count(index)? >= 5)
    }

    /// The 50-move rule at the given position: claimable.
    pub fn fifty_move_rule(&self, index: isize) -> Result<bool, GameError> {
        let target = self.resolve_index(index)?;
        Ok(self.positions[target].halfmove_clock() >= 100)
    }

    /// The 75-move rule at the given position: a mandatory draw.
    pub fn seventy_five_move_rule(&self, index: isize) -> Result<bool, GameError> {
        let target = self.resolve_index(index)?;
        Ok(self.positions[target].halfmove_clock() >= 150)
    }
}
