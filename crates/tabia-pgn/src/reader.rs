//! PGN stream tokenizer and multi-game parser.

use std::io::BufRead;
use tabia_board::{Game, GameResult};
use thiserror::Error;

/// Errors from strict single-game parsing.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("I/O error reading PGN: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tag pair at line {line}: {text}")]
    Header { line: usize, text: String },

    #[error("invalid movetext in game at lines {start}-{end}: {message}")]
    Movetext {
        start: usize,
        end: usize,
        message: String,
    },
}

/// A forward-reading PGN parser over any buffered reader.
///
/// The cursor only ever needs a one-line put-back, held in a pending
/// buffer, so the underlying reader does not have to be seekable.
pub struct PgnReader<R: BufRead> {
    reader: R,
    pending: Option<String>,
    line_no: usize,
    suppress_warnings: bool,
}

impl<R: BufRead> PgnReader<R> {
    /// Creates a reader over a PGN stream.
    pub fn new(reader: R) -> Self {
        PgnReader {
            reader,
            pending: None,
            line_no: 0,
            suppress_warnings: false,
        }
    }

    /// Disables the per-game diagnostics emitted by the iterator when a
    /// game fails to parse.
    pub fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.suppress_warnings = suppress;
        self
    }

    fn read_line(&mut self) -> Result<Option<String>, PgnError> {
        if let Some(line) = self.pending.take() {
            self.line_no += 1;
            return Ok(Some(line));
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn put_back(&mut self, line: String) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(line);
        self.line_no -= 1;
    }

    /// Parses the next game, surfacing any error. `Ok(None)` at the end
    /// of the stream.
    pub fn try_next_game(&mut self) -> Result<Option<Game>, PgnError> {
        // Skip blank space between games.
        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => {
                    self.put_back(line);
                    break;
                }
            }
        }
        let start_line = self.line_no + 1;

        // Header section: tag-pair lines up to a blank line or movetext.
        let mut headers: Vec<(String, String)> = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            if line.starts_with('[') {
                let (key, value) = parse_tag_pair(&line).ok_or_else(|| PgnError::Header {
                    line: self.line_no,
                    text: line.clone(),
                })?;
                headers.push((key, value));
            } else {
                self.put_back(line);
                break;
            }
        }

        let mut game = match headers.iter().find(|(k, _)| k == "FEN") {
            Some((_, fen)) => Game::from_fen(fen).map_err(|e| PgnError::Movetext {
                start: start_line,
                end: self.line_no,
                message: e.to_string(),
            })?,
            // `SetUp` is informational; the FEN header decides the start.
            None => Game::new(),
        };
        for (key, value) in &headers {
            game.set_header(key, value);
        }

        // Movetext: consume tokens until a result token outside comments,
        // or the next game's tag section.
        let mut brace_depth = 0usize;
        let mut paren_depth = 0usize;
        let mut saw_result = false;
        let mut saw_movetext = false;

        'games: while let Some(line) = self.read_line()? {
            if brace_depth == 0 && paren_depth == 0 && line.starts_with('[') {
                self.put_back(line);
                break;
            }
            saw_movetext |= !line.trim().is_empty();
            let cleaned = strip_comments(&line, &mut brace_depth, &mut paren_depth);
            for token in cleaned.split_whitespace() {
                if let Ok(result) = token.parse::<GameResult>() {
                    game.set_result(result);
                    saw_result = true;
                    break 'games;
                }
                let Some(token) = normalize_token(token) else {
                    continue;
                };
                game.add_move_text(token).map_err(|e| PgnError::Movetext {
                    start: start_line,
                    end: self.line_no,
                    message: format!("{}: {}", token, e),
                })?;
            }
        }

        if headers.is_empty() && game.moves().is_empty() && !saw_result && !saw_movetext {
            return Ok(None);
        }
        Ok(Some(game))
    }

    /// Skips forward to the next probable game start after a failed game.
    fn recover(&mut self) {
        loop {
            match self.read_line() {
                Ok(Some(line)) if line.starts_with('[') => {
                    self.put_back(line);
                    return;
                }
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => return,
            }
        }
    }
}

impl<R: BufRead> Iterator for PgnReader<R> {
    type Item = Game;

    /// Yields games one at a time, isolating failures: a failing game is
    /// reported (unless suppressed) and skipped.
    fn next(&mut self) -> Option<Game> {
        loop {
            match self.try_next_game() {
                Ok(game) => return game,
                Err(error) => {
                    if !self.suppress_warnings {
                        tracing::warn!(%error, "skipping unparsable game");
                    }
                    self.recover();
                }
            }
        }
    }
}

/// Parses every game in a PGN string, skipping games that fail to parse.
pub fn parse_games(pgn: &str) -> Vec<Game> {
    PgnReader::new(pgn.as_bytes()).collect()
}

/// Splits a `[Key "Value"]` line into its key and value.
fn parse_tag_pair(line: &str) -> Option<(String, String)> {
    let content = line.trim_end().strip_prefix('[')?.strip_suffix(']')?;
    let (key, rest) = content.split_once(char::is_whitespace)?;
    if key.is_empty() {
        return None;
    }
    let rest = rest.trim();
    let value = rest.strip_prefix('"')?.strip_suffix('"')?;
    Some((key.to_string(), value.to_string()))
}

/// Removes brace, parenthesis, and `;` comments from a line, keeping the
/// comment depths across lines. Braces and parentheses nest
/// independently; parenthesised variations are skipped entirely.
fn strip_comments(line: &str, brace_depth: &mut usize, paren_depth: &mut usize) -> String {
    let mut cleaned = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '{' => *brace_depth += 1,
            '}' => *brace_depth = brace_depth.saturating_sub(1),
            '(' if *brace_depth == 0 => *paren_depth += 1,
            ')' if *brace_depth == 0 => *paren_depth = paren_depth.saturating_sub(1),
            ';' if *brace_depth == 0 && *paren_depth == 0 => break,
            _ if *brace_depth == 0 && *paren_depth == 0 => cleaned.push(c),
            _ => {}
        }
    }
    cleaned
}

/// Normalizes a movetext token: drops NAGs and bare move numbers, strips
/// attached move numbers and trailing annotation punctuation. Returns
/// `None` when nothing playable remains.
fn normalize_token(token: &str) -> Option<&str> {
    // Numeric annotation glyphs.
    if token.starts_with('$') {
        return None;
    }
    // Null-move tokens and zero-style castling survive untouched; the
    // move-number strip below would eat their leading digits.
    if matches!(token, "--" | "Z0" | "0000") {
        return Some(token);
    }
    if token.starts_with("0-0") {
        return Some(token.trim_end_matches(['!', '?', '+', '#']));
    }
    // Move numbers, either standalone ("12.", "12...") or attached to
    // the move ("12.e4").
    let token = token.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    // Annotation punctuation is re-derivable from the position.
    let token = token.trim_end_matches(['!', '?', '+', '#']);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
