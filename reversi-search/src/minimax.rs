//! Exhaustive fixed-depth minimax.
//!
//! Every legal square is searched to the full depth. With a cache in the
//! context, positions reached by different move orders are searched once.

use crate::{evaluate, Position, ScoredMove, SearchContext, SearchError};
use reversi_board::Player;

/// The best square for `player` on `board`, searching `depth` plies.
///
/// Ties go to the first square in iteration order.
pub fn best_move<P: Position>(
    ctx: &mut SearchContext<'_>,
    player: Player,
    board: &P,
    depth: u32,
) -> Result<ScoredMove, SearchError> {
    ctx.visit();

    if board.is_complete() {
        return Ok(ScoredMove::terminal(evaluate::score(player, board), player));
    }
    if depth == 0 {
        return evaluate::horizon(player, board);
    }

    let squares = board.possible_squares();
    if squares.is_empty() {
        let passed = board.pass()?;
        let score = match ctx.cached_score(&passed, depth - 1) {
            Some(score) => score,
            None => {
                let book_hits = ctx.book_hits();
                let score =
                    best_move(ctx, player.opponent(), &passed, depth - 1)?.score_for(player);
                ctx.store(&passed, depth - 1, score, book_hits);
                score
            }
        };
        return Ok(ScoredMove::pass(score, player));
    }

    let mut max_score = i32::MIN;
    let mut max_square = None;

    for square in squares {
        if ctx.should_stop(depth, max_square.is_some()) {
            break;
        }

        let next = board.play(square)?;
        let expected = match ctx.known_score(&next, player, depth - 1) {
            Some(score) => score,
            None => {
                let book_hits = ctx.book_hits();
                let score = best_move(ctx, player.opponent(), &next, depth - 1)?.score_for(player);
                ctx.store(&next, depth - 1, score, book_hits);
                score
            }
        };

        if max_square.is_none() || expected > max_score {
            max_score = expected;
            max_square = Some(square);
        }
    }

    let square = max_square.ok_or(SearchError::NoBestSquare { depth })?;
    Ok(ScoredMove::played(max_score, player, square))
}
