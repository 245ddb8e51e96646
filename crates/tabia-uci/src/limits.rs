//! Search limits for the `go` command.

use std::fmt;

/// Limits for a search request, rendered into a `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Search exactly this long, in milliseconds.
    pub movetime: Option<u64>,
    /// Search to this depth in plies.
    pub depth: Option<u32>,
    /// Search this many nodes.
    pub nodes: Option<u64>,
    /// White's remaining time in milliseconds.
    pub wtime: Option<u64>,
    /// Black's remaining time in milliseconds.
    pub btime: Option<u64>,
    /// White's increment per move in milliseconds.
    pub winc: Option<u64>,
    /// Black's increment per move in milliseconds.
    pub binc: Option<u64>,
    /// Moves to the next time control.
    pub movestogo: Option<u32>,
    /// Search until told to stop.
    pub infinite: bool,
}

impl SearchLimits {
    /// Limits for a fixed-time search.
    pub fn move_time(milliseconds: u64) -> Self {
        SearchLimits {
            movetime: Some(milliseconds),
            ..SearchLimits::default()
        }
    }

    /// Limits for a fixed-depth search.
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..SearchLimits::default()
        }
    }

    /// Limits for a clock game.
    pub fn clock(wtime: u64, btime: u64, winc: u64, binc: u64) -> Self {
        SearchLimits {
            wtime: Some(wtime),
            btime: Some(btime),
            winc: Some(winc),
            binc: Some(binc),
            ..SearchLimits::default()
        }
    }
}

impl fmt::Display for SearchLimits {
    /// Renders the full `go` command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "go")?;
        if let Some(ms) = self.movetime {
            write!(f, " movetime {}", ms)?;
        }
        if let Some(depth) = self.depth {
            write!(f, " depth {}", depth)?;
        }
        if let Some(nodes) = self.nodes {
            write!(f, " nodes {}", nodes)?;
        }
        if let Some(ms) = self.wtime {
            write!(f, " wtime {}", ms)?;
        }
        if let Some(ms) = self.btime {
            write!(f, " btime {}", ms)?;
        }
        if let Some(ms) = self.winc {
            write!(f, " winc {}", ms)?;
        }
        if let Some(ms) = self.binc {
            write!(f, " binc {}", ms)?;
        }
        if let Some(moves) = self.movestogo {
            write!(f, " movestogo {}", moves)?;
        }
        if self.infinite {
            write!(f, " infinite")?;
        }
        Ok(())
    }
}
