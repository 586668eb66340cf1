//! Utilities used for testing and benchmarking.

pub mod perft;
pub use perft::{perft_counts, run_checked_perft, run_perft, PerftCounts};
