//! Parsing of engine `info` lines.

use serde::Serialize;

/// A search score: centipawns or distance to mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Score {
    /// Centipawns from the engine's point of view.
    Cp(i32),
    /// Mate in N moves; negative means getting mated.
    Mate(i32),
}

/// Search information reported by the engine while thinking.
///
/// Every field is optional; unknown tokens are skipped and malformed
/// numeric values leave their field unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Selective search depth.
    pub seldepth: Option<u32>,
    /// Time spent searching, in milliseconds.
    pub time_ms: Option<u64>,
    /// Nodes searched.
    pub nodes: Option<u64>,
    /// Nodes per second.
    pub nps: Option<u64>,
    /// Score of the line being reported.
    pub score: Option<Score>,
    /// The line's rank in a MultiPV search.
    pub multipv: Option<u32>,
    /// Principal variation in UCI move notation.
    pub pv: Vec<String>,
    /// The move currently being searched.
    pub currmove: Option<String>,
    /// Rank of the current move at the root.
    pub currmovenumber: Option<u32>,
    /// Transposition table fill, per mille.
    pub hashfull: Option<u32>,
    /// Tablebase hits.
    pub tbhits: Option<u64>,
    /// Shredder-style tablebase hits.
    pub sbhits: Option<u64>,
    /// CPU load, per mille.
    pub cpuload: Option<u32>,
    /// Refutation line: a move and its refutation.
    pub refutation: Vec<String>,
    /// The line currently being calculated.
    pub currline: Vec<String>,
    /// Free-text payload; consumes the rest of the line.
    pub string: Option<String>,
}

impl SearchInfo {
    /// Parses an `info` line. Returns `None` for any other line.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix("info")?;

        let mut info = SearchInfo::default();
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let mut i = 0;

        while i < tokens.len() {
            match tokens[i] {
                "depth" => {
                    info.depth = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "seldepth" => {
                    info.seldepth = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "time" => {
                    info.time_ms = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "nodes" => {
                    info.nodes = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "nps" => {
                    info.nps = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "score" => {
                    match tokens.get(i + 1) {
                        Some(&"cp") => {
                            if let Some(cp) = tokens.get(i + 2).and_then(|t| t.parse().ok()) {
                                info.score = Some(Score::Cp(cp));
                            }
                            i += 3;
                        }
                        Some(&"mate") => {
                            if let Some(mate) = tokens.get(i + 2).and_then(|t| t.parse().ok()) {
                                info.score = Some(Score::Mate(mate));
                            }
                            i += 3;
                        }
                        // "lowerbound"/"upperbound" and anything else.
                        _ => i += 2,
                    }
                }
                "multipv" => {
                    info.multipv = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "pv" => {
                    i += 1;
                    while i < tokens.len() && !is_info_keyword(tokens[i]) {
                        info.pv.push(tokens[i].to_string());
                        i += 1;
                    }
                }
                "currmove" => {
                    info.currmove = tokens.get(i + 1).map(|t| t.to_string());
                    i += 2;
                }
                "currmovenumber" => {
                    info.currmovenumber = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "hashfull" => {
                    info.hashfull = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "tbhits" => {
                    info.tbhits = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "sbhits" => {
                    info.sbhits = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "cpuload" => {
                    info.cpuload = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "refutation" => {
                    i += 1;
                    while i < tokens.len() && !is_info_keyword(tokens[i]) {
                        info.refutation.push(tokens[i].to_string());
                        i += 1;
                    }
                }
                "currline" => {
                    i += 1;
                    // An optional leading CPU number, then moves.
                    while i < tokens.len() && !is_info_keyword(tokens[i]) {
                        info.currline.push(tokens[i].to_string());
                        i += 1;
                    }
                }
                "string" => {
                    info.string = Some(tokens[i + 1..].join(" "));
                    break;
                }
                // Unknown tokens are skipped silently.
                _ => i += 1,
            }
        }

        Some(info)
    }
}

fn is_info_keyword(token: &str) -> bool {
    matches!(
        token,
        "depth"
            | "seldepth"
            | "time"
            | "nodes"
            | "nps"
            | "score"
            | "multipv"
            | "pv"
            | "currmove"
            | "currmovenumber"
            | "hashfull"
            | "tbhits"
            | "sbhits"
            | "cpuload"
            | "refutation"
            | "currline"
            | "string"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_line() {
        let info = SearchInfo::parse(
            "info depth 12 seldepth 20 multipv 1 score cp 30 nodes 125000 nps 500000 \
             hashfull 42 tbhits 3 time 250 pv e2e4 e7e5 g1f3",
        )
        .unwrap();
        assert_eq!(info.depth, Some(12));
        assert_eq!(info.seldepth, Some(20));
        assert_eq!(info.multipv, Some(1));
        assert_eq!(info.score, Some(Score::Cp(30)));
        assert_eq!(info.nodes, Some(125_000));
        assert_eq!(info.nps, Some(500_000));
        assert_eq!(info.hashfull, Some(42));
        assert_eq!(info.tbhits, Some(3));
        assert_eq!(info.time_ms, Some(250));
        assert_eq!(info.pv, vec!["e2e4", "e7e5", "g1f3"]);
    }

    #[test]
    fn parse_mate_score() {
        let info = SearchInfo::parse("info depth 20 score mate -3 pv e2e4").unwrap();
        assert_eq!(info.score, Some(Score::Mate(-3)));
    }

    #[test]
    fn pv_stops_at_keywords() {
        let info = SearchInfo::parse("info pv e2e4 e7e5 hashfull 10").unwrap();
        assert_eq!(info.pv, vec!["e2e4", "e7e5"]);
        assert_eq!(info.hashfull, Some(10));
    }

    #[test]
    fn string_consumes_the_rest() {
        let info =
            SearchInfo::parse("info string NNUE evaluation using nn-abc.nnue depth 3").unwrap();
        assert_eq!(
            info.string.as_deref(),
            Some("NNUE evaluation using nn-abc.nnue depth 3")
        );
        // Everything after "string" is payload, not tokens.
        assert_eq!(info.depth, None);
    }

    #[test]
    fn currmove_and_friends() {
        let info =
            SearchInfo::parse("info currmove e2e4 currmovenumber 1 cpuload 875 sbhits 2").unwrap();
        assert_eq!(info.currmove.as_deref(), Some("e2e4"));
        assert_eq!(info.currmovenumber, Some(1));
        assert_eq!(info.cpuload, Some(875));
        assert_eq!(info.sbhits, Some(2));
    }

    #[test]
    fn refutation_and_currline() {
        let info = SearchInfo::parse("info refutation d1h5 g6h5 currline 1 e2e4 e7e5").unwrap();
        assert_eq!(info.refutation, vec!["d1h5", "g6h5"]);
        assert_eq!(info.currline, vec!["1", "e2e4", "e7e5"]);
    }

    #[test]
    fn unknown_tokens_are_skipped() {
        let info = SearchInfo::parse("info wdl 520 430 50 depth 8").unwrap();
        assert_eq!(info.depth, Some(8));
    }

    #[test]
    fn malformed_numerics_are_ignored() {
        let info = SearchInfo::parse("info depth banana nodes 100").unwrap();
        assert_eq!(info.depth, None);
        assert_eq!(info.nodes, Some(100));
    }

    #[test]
    fn non_info_lines_are_rejected() {
        assert!(SearchInfo::parse("bestmove e2e4").is_none());
        assert!(SearchInfo::parse("uciok").is_none());
    }

    #[test]
    fn score_bounds_are_tolerated() {
        let info = SearchInfo::parse("info depth 5 score cp 33 lowerbound nodes 10").unwrap();
        assert_eq!(info.score, Some(Score::Cp(33)));
        assert_eq!(info.nodes, Some(10));
    }

    #[test]
    fn serializes_to_json() {
        let info = SearchInfo {
            depth: Some(10),
            score: Some(Score::Cp(25)),
            nodes: Some(50_000),
            pv: vec!["e2e4".to_string()],
            ..SearchInfo::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"depth\":10"));
        assert!(json.contains("\"nodes\":50000"));
        assert!(json.contains("e2e4"));
    }
}
