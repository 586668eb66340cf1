//! `reversi-board` is the board collaborator of the Reversi search engine.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Reversi boards.
//!    These are fast, but may result in inconsistent state if their contracts are not manually checked.
//!  - [`Board`] implements the core game logic in the same fast, unchecked way as [`bitboard`],
//!    always seen from the perspective of the player to move.
//!  - [`Game`] is a high-level, safe interface to all of the game logic: it knows whose
//!    turn it is, rejects illegal plays and passes, and records the move history.

pub mod bitboard;
pub mod test_utils;

mod board;
mod game;
mod square;
mod utils;

pub use board::*;
pub use game::*;
pub use square::*;

/// The number of spaces on one edge of a Reversi board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on a Reversi board.
pub const NUM_SPACES: usize = 64;
