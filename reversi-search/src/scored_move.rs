//! The value a search assigns to a position, and how it got there.

use reversi_board::{Action, Player, Square};
use std::fmt;

/// What the scored player does at the scored node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Play this square.
    Play(Square),
    /// No legal square: hand the turn over.
    Pass,
    /// The game is over.
    Final,
}

/// A score tagged with the player it is expressed for.
///
/// Scores are zero-sum: reading one from the other player's side flips the sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    score: i32,
    player: Player,
    outcome: Outcome,
}

impl ScoredMove {
    /// `player` should play `square`, expecting `score`.
    pub fn played(score: i32, player: Player, square: Square) -> Self {
        Self {
            score,
            player,
            outcome: Outcome::Play(square),
        }
    }

    /// `player` must pass, expecting `score`.
    pub fn pass(score: i32, player: Player) -> Self {
        Self {
            score,
            player,
            outcome: Outcome::Pass,
        }
    }

    /// The game is over and is worth `score` to `player`.
    pub fn terminal(score: i32, player: Player) -> Self {
        Self {
            score,
            player,
            outcome: Outcome::Final,
        }
    }

    /// The score from `player`'s perspective.
    #[inline]
    pub fn score_for(&self, player: Player) -> i32 {
        if player == self.player {
            self.score
        } else {
            -self.score
        }
    }

    /// Re-express a child's result as a pass node owned by `player`.
    pub fn relabel_pass(self, player: Player) -> Self {
        Self::pass(self.score_for(player), player)
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The square to play, if any.
    pub fn square(&self) -> Option<Square> {
        match self.outcome {
            Outcome::Play(square) => Some(square),
            Outcome::Pass | Outcome::Final => None,
        }
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.outcome == Outcome::Final
    }

    /// The game action this result recommends. A finished game has nothing left to do but pass.
    pub fn action(&self) -> Action {
        self.square().map_or(Action::Pass, Action::Play)
    }
}

impl fmt::Display for ScoredMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Play(square) => write!(f, "{}", square)?,
            Outcome::Pass => f.write_str("PASS")?,
            Outcome::Final => f.write_str("END")?,
        }
        write!(f, " ({:+} for {})", self.score, self.player)
    }
}
