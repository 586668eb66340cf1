//! `reversi-search` chooses moves for Reversi by adversarial tree search.
//!
//! The building blocks are:
//!
//!  - [`evaluate`], the static evaluator: material for unfinished games, the full
//!    board area for decided ones.
//!  - [`minimax`] and [`alphabeta`], fixed-depth searches over any [`Position`].
//!    Both consult a [`SearchContext`], which may carry a [`TranspositionCache`],
//!    an [`OpeningBook`] and a deadline for the root loop.
//!  - [`Searcher`], which bundles those choices into a [`SearchConfig`] and keeps
//!    its cache and book between moves.
//!
//! Game drivers only need the [`Strategy`] trait.

pub mod alphabeta;
pub mod book;
pub mod cache;
pub mod evaluate;
pub mod minimax;

mod context;
mod position;
mod scored_move;
mod search;
mod strategy;

pub use book::{BookError, OpeningBook, Symmetry};
pub use cache::TranspositionCache;
pub use context::*;
pub use position::*;
pub use scored_move::*;
pub use search::*;
pub use strategy::*;
