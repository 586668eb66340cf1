//! Fail-soft alpha-beta search.
//!
//! [`best_move`] and [`worst_move`] recurse into each other and share one
//! window `(alpha, beta)` expressed from `roles.you`'s point of view. Results
//! agree with [`crate::minimax`] on both score and square; pruning only skips
//! squares that could not change the answer.
//!
//! A value is exact only when it lands strictly inside the window it was
//! searched with, so only those are written to the cache.

use crate::{evaluate, Position, ScoredMove, SearchContext, SearchError};
use reversi_board::Player;

/// The lower end of an open window.
pub const MIN_SCORE: i32 = -i32::MAX;
/// The upper end of an open window.
pub const MAX_SCORE: i32 = i32::MAX;

/// The two sides of a search: the player it chooses for, and the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roles {
    pub you: Player,
    pub opponent: Player,
}

impl Roles {
    pub fn for_player(you: Player) -> Self {
        Self {
            you,
            opponent: you.opponent(),
        }
    }
}

/// The best square for `roles.you` on `board`, which must be `you`'s turn.
pub fn best_move<P: Position>(
    ctx: &mut SearchContext<'_>,
    roles: Roles,
    board: &P,
    depth: u32,
    mut alpha: i32,
    beta: i32,
) -> Result<ScoredMove, SearchError> {
    let you = roles.you;
    ctx.visit();

    if board.is_complete() {
        return Ok(ScoredMove::terminal(evaluate::score(you, board), you));
    }
    if depth == 0 {
        return evaluate::horizon(you, board);
    }

    let squares = board.possible_squares();
    if squares.is_empty() {
        let passed = board.pass()?;
        let reply = worst_move(ctx, roles, &passed, depth - 1, alpha, beta)?;
        return Ok(reply.relabel_pass(you));
    }

    let mut max_score = MIN_SCORE;
    let mut max_square = None;

    for square in squares {
        if ctx.should_stop(depth, max_square.is_some()) {
            break;
        }

        let next = board.play(square)?;
        let expected = match ctx.known_score(&next, you, depth - 1) {
            Some(score) => score,
            None => {
                let book_hits = ctx.book_hits();
                let score = worst_move(ctx, roles, &next, depth - 1, alpha, beta)?.score_for(you);
                if alpha < score && score < beta {
                    ctx.store(&next, depth - 1, score, book_hits);
                }
                score
            }
        };

        if max_square.is_none() || expected > max_score {
            max_score = expected;
            max_square = Some(square);
        }

        // The opponent already has a line that holds us below this.
        if max_score >= beta {
            break;
        }
        alpha = alpha.max(max_score);
    }

    let square = max_square.ok_or(SearchError::NoBestSquare { depth })?;
    Ok(ScoredMove::played(max_score, you, square))
}

/// The best reply for `roles.opponent` on `board`, which must be the opponent's turn.
/// The window stays expressed for `roles.you`.
pub fn worst_move<P: Position>(
    ctx: &mut SearchContext<'_>,
    roles: Roles,
    board: &P,
    depth: u32,
    alpha: i32,
    mut beta: i32,
) -> Result<ScoredMove, SearchError> {
    let opponent = roles.opponent;
    ctx.visit();

    if board.is_complete() {
        return Ok(ScoredMove::terminal(evaluate::score(opponent, board), opponent));
    }
    if depth == 0 {
        return evaluate::horizon(opponent, board);
    }

    let squares = board.possible_squares();
    if squares.is_empty() {
        let passed = board.pass()?;
        let reply = best_move(ctx, roles, &passed, depth - 1, alpha, beta)?;
        return Ok(reply.relabel_pass(opponent));
    }

    let mut max_score = MIN_SCORE;
    let mut max_square = None;

    for square in squares {
        if ctx.should_stop(depth, max_square.is_some()) {
            break;
        }

        let next = board.play(square)?;
        let expected = match ctx.known_score(&next, opponent, depth - 1) {
            Some(score) => score,
            None => {
                let book_hits = ctx.book_hits();
                let score =
                    best_move(ctx, roles, &next, depth - 1, alpha, beta)?.score_for(opponent);
                if alpha < -score && -score < beta {
                    ctx.store(&next, depth - 1, score, book_hits);
                }
                score
            }
        };

        if max_square.is_none() || expected > max_score {
            max_score = expected;
            max_square = Some(square);
        }

        // We already have a line at least this good elsewhere.
        if -max_score <= alpha {
            break;
        }
        beta = beta.min(-max_score);
    }

    let square = max_square.ok_or(SearchError::NoBestSquare { depth })?;
    Ok(ScoredMove::played(max_score, opponent, square))
}
