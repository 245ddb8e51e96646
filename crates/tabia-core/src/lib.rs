//! Core types for chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`], [`ColoredPiece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`MoveKind`] for packed move representation
//! - [`FenFields`] for FEN field splitting and validation

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields};
pub use mov::{Move, MoveKind};
pub use piece::{ColoredPiece, Piece};
pub use square::{File, Rank, Square};
