//! Move selection as seen by a game driver.

use crate::{evaluate, Position, SearchError, Searcher};
use reversi_board::Action;

/// Anything that can pick an action for the player to move.
pub trait Strategy<P: Position> {
    /// Pick an action for `board.current_player()`. Returns [`Action::Pass`] when
    /// there is no legal square, including when the game is over.
    fn choose_square(&mut self, board: &P) -> Result<Action, SearchError>;
}

impl<P: Position> Strategy<P> for Searcher {
    fn choose_square(&mut self, board: &P) -> Result<Action, SearchError> {
        Ok(self.search(board)?.action())
    }
}

/// Take whichever square leaves the most material after it, without looking further ahead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Greedy;

impl<P: Position> Strategy<P> for Greedy {
    fn choose_square(&mut self, board: &P) -> Result<Action, SearchError> {
        let player = board.current_player();
        let mut best = None;

        for square in board.possible_squares() {
            let score = evaluate::score(player, &board.play(square)?);
            match best {
                Some((max_score, _)) if max_score >= score => (),
                _ => best = Some((score, square)),
            }
        }

        Ok(best.map_or(Action::Pass, |(_, square)| Action::Play(square)))
    }
}
