//! Leaf counting ("perft") below the starting position, for validating move generation.
//! Reference counts: http://www.aartbik.com/MISC/reversi.html
//!
//! A pass counts as a ply, and a line ends early once both players have passed.

use crate::board::Board;
use crate::{Game, IllegalMoveError};

/// Totals collected while walking every line of play to a fixed depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftCounts {
    /// Lines that reached the depth limit or ended the game.
    pub leaves: u64,
    /// Forced passes along the way.
    pub passes: u64,
    /// Lines that ended the game before the depth limit.
    pub finished: u64,
}

/// Count the leaves `depth` plies below the starting position.
pub fn run_perft(depth: u64) -> u64 {
    perft_counts(depth).leaves
}

/// Walk every line `depth` plies below the starting position on the raw [`Board`].
pub fn perft_counts(depth: u64) -> PerftCounts {
    let mut counts = PerftCounts::default();
    walk_board(Board::new(), depth, false, &mut counts);
    counts
}

fn walk_board(board: Board, depth: u64, passed: bool, counts: &mut PerftCounts) {
    if depth == 0 {
        counts.leaves += 1;
        return;
    }

    let squares = board.get_moves();
    if squares.is_empty() {
        if passed {
            counts.leaves += 1;
            counts.finished += 1;
            return;
        }

        counts.passes += 1;
        return walk_board(board.pass(), depth - 1, true, counts);
    }

    for square in squares {
        walk_board(board.make_move(square), depth - 1, false, counts);
    }
}

/// The same walk through the checked [`Game`] layer. Every action it takes is legal,
/// so an error here means the two layers disagree.
pub fn run_checked_perft(depth: u64) -> Result<u64, IllegalMoveError> {
    leaves_below(&Game::default(), depth, false)
}

fn leaves_below(game: &Game, depth: u64, passed: bool) -> Result<u64, IllegalMoveError> {
    if depth == 0 {
        return Ok(1);
    }

    let squares = game.get_moves();
    if squares.is_empty() {
        if passed {
            return Ok(1);
        }
        return leaves_below(&game.pass()?, depth - 1, true);
    }

    squares.fold(Ok(0), |total, square| {
        Ok(total? + leaves_below(&game.play(square)?, depth - 1, false)?)
    })
}
