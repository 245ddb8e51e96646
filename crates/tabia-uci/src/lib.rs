//! UCI (Universal Chess Interface) engine driver.
//!
//! This crate talks to an external UCI engine subprocess: it owns the
//! process and its stdio pipes, performs the protocol handshake, and
//! parses the engine's `option` and `info` lines.
//!
//! # Example
//!
//! ```no_run
//! use tabia_uci::{SearchLimits, UciEngine};
//!
//! let mut engine = UciEngine::spawn("/usr/bin/stockfish")?;
//! engine.init()?;
//! engine.new_game()?;
//! engine.set_position(None, &["e2e4".into(), "e7e5".into()])?;
//! let result = engine.go(&SearchLimits::move_time(1000))?;
//! println!("best move: {}", result.best_move);
//! engine.quit()?;
//! # Ok::<(), tabia_uci::UciError>(())
//! ```

mod engine;
mod info;
mod limits;
mod option;

pub use engine::{SearchResult, UciEngine};
pub use info::{Score, SearchInfo};
pub use limits::SearchLimits;
pub use option::{EngineOption, OptionValue};

use thiserror::Error;

/// Errors from engine communication.
#[derive(Error, Debug)]
pub enum UciError {
    /// Spawning the engine or talking over its pipes failed.
    #[error("engine process error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine closed its side of the pipe mid-conversation.
    #[error("engine terminated unexpectedly")]
    EngineTerminated,

    /// The engine sent a response the protocol does not allow here.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}
