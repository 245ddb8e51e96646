//! Ground-truth round-trip: a reference PGN plus the FEN after every
//! half-move. Parsing, re-emitting, and re-parsing the PGN must walk
//! through exactly these positions.

use tabia_board::{Game, Position};
use tabia_pgn::{games_to_string, parse_games};

const REFERENCE_PGN: &str = r#"[Event "Casual Game"]
[Site "Rome"]
[Date "1620.??.??"]
[Round "?"]
[White "Greco, Gioachino"]
[Black "NN"]
[Result "1-0"]

1. e4 {the king's pawn} e5 2. Bc4 Nc6 3. Qh5 ; eyeing f7
Nf6?? 4. Qxf7# 1-0
"#;

/// The starting position and the position after each half-move, as FEN.
const REFERENCE_EPD: &str = "\
rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1
rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2
rnbqkbnr/pppp1ppp/8/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2
r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3
r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3
r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4
r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4
";

fn positions_match_epd(game: &Game, epd: &str) {
    let expected: Vec<&str> = epd.lines().filter(|l| !l.trim().is_empty()).collect();
    let positions = game.positions();
    assert_eq!(positions.len(), expected.len(), "position count mismatch");
    for (i, (position, fen)) in positions.iter().zip(&expected).enumerate() {
        assert_eq!(&position.fen(), fen, "position {} diverges", i);
        let reparsed = Position::from_fen(fen).unwrap();
        assert!(
            position.is_repetition_of(&reparsed),
            "position {} does not reconstruct from its FEN",
            i
        );
    }
}

#[test]
fn reference_game_walks_the_epd_positions() {
    let games = parse_games(REFERENCE_PGN);
    assert_eq!(games.len(), 1);
    positions_match_epd(&games[0], REFERENCE_EPD);
}

#[test]
fn reemitted_pgn_walks_the_same_positions() {
    let games = parse_games(REFERENCE_PGN);
    let reemitted = games_to_string(&games);
    let reparsed = parse_games(&reemitted);
    assert_eq!(reparsed.len(), 1);
    positions_match_epd(&reparsed[0], REFERENCE_EPD);

    // The move lists and results agree as well.
    assert_eq!(games[0].moves(), reparsed[0].moves());
    assert_eq!(games[0].result(), reparsed[0].result());
}

#[test]
fn emission_is_stable() {
    let first = games_to_string(&parse_games(REFERENCE_PGN));
    let second = games_to_string(&parse_games(&first));
    assert_eq!(first, second);
}
