//! Canonical PGN emission.

use std::io::{self, Write};
use tabia_board::{move_to_san, Game};
use tabia_core::Color;

/// The Seven-Tag Roster in its canonical emission order.
const ROSTER_ORDER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// Half-moves per movetext line.
const MOVES_PER_LINE: usize = 16;

/// Writes a single game: the Seven-Tag Roster in canonical order, the
/// remaining headers in insertion order, a blank line, the numbered SAN
/// movetext, and the result token. A blank line closes the game.
pub fn write_game<W: Write>(writer: &mut W, game: &Game) -> io::Result<()> {
    for key in ROSTER_ORDER {
        writeln!(writer, "[{} \"{}\"]", key, game.header(key).unwrap_or("?"))?;
    }
    for (key, value) in game.headers() {
        if !ROSTER_ORDER.contains(&key.as_str()) {
            writeln!(writer, "[{} \"{}\"]", key, value)?;
        }
    }
    writeln!(writer)?;
    writeln!(writer, "{}", movetext(game))?;
    writeln!(writer)?;
    Ok(())
}

/// Renders a single game to a string.
pub fn game_to_string(game: &Game) -> String {
    let mut buffer = Vec::new();
    write_game(&mut buffer, game).expect("writing PGN to a Vec cannot fail");
    String::from_utf8(buffer).expect("PGN output is valid UTF-8")
}

/// Renders a sequence of games, separated by blank lines.
pub fn games_to_string(games: &[Game]) -> String {
    games.iter().map(game_to_string).collect()
}

/// The numbered SAN movetext with the closing result token. White moves
/// are prefixed `N. `; a game starting with Black to move opens with
/// `N... `. A line break is inserted every sixteen half-moves.
fn movetext(game: &Game) -> String {
    let mut text = String::new();
    let positions = game.positions();

    for (i, m) in game.moves().iter().enumerate() {
        if i > 0 {
            text.push(if i % MOVES_PER_LINE == 0 { '\n' } else { ' ' });
        }
        let before = &positions[i];
        if before.side_to_move() == Color::White {
            text.push_str(&before.fullmove_number().to_string());
            text.push_str(". ");
        } else if i == 0 {
            text.push_str(&before.fullmove_number().to_string());
            text.push_str("... ");
        }
        let san = move_to_san(before, *m);
        // The drawing-move marker stays out of movetext; the result token
        // carries the draw.
        text.push_str(san.strip_suffix(" 1/2-1/2").unwrap_or(&san));
    }

    if !game.moves().is_empty() {
        text.push(' ');
    }
    text.push_str(game.result().as_str());
    text
}
