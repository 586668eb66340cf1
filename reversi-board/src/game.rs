//! Implements game-level Reversi logic.
//!
//! For correctness, this higher-level interface is preferred, but for
//! performance you may use [`Board`] for raw bitboard access.

use crate::bitboard::Bitboard;
use crate::board::{Board, ParseBoardError};
use crate::{Square, SquareList};
use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl Player {
    /// Gets the other player.
    #[inline]
    pub fn opponent(self) -> Self {
        !self
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display(fmt = "player must be \"Black\" or \"White\"")]
pub struct ParsePlayerError;

impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Black" | "black" | "X" => Ok(Player::Black),
            "White" | "white" | "O" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// A placement made by a player, as recorded in the game history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{} {}", player, square)]
pub struct Move {
    pub square: Square,
    pub player: Player,
}

impl Move {
    pub fn new(square: Square, player: Player) -> Self {
        Self { square, player }
    }
}

/// An action in a game: pass or play a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Play(Square),
    Pass,
}

impl From<Square> for Action {
    fn from(square: Square) -> Self {
        Self::Play(square)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play(square) => square.fmt(f),
            Action::Pass => f.write_str("PASS"),
        }
    }
}

/// Who owns each square, by color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareOwners {
    pub black: Bitboard,
    pub white: Bitboard,
}

impl SquareOwners {
    /// The owner of `square`, if it is occupied.
    pub fn owner(self, square: Square) -> Option<Player> {
        let mask: Bitboard = square.into();
        if !(self.black & mask).is_empty() {
            Some(Player::Black)
        } else if !(self.white & mask).is_empty() {
            Some(Player::White)
        } else {
            None
        }
    }

    /// The number of squares `player` owns.
    pub fn count(self, player: Player) -> u8 {
        match player {
            Player::Black => self.black.count_occupied(),
            Player::White => self.white.count_occupied(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum IllegalMoveError {
    #[display(fmt = "{} cannot play {}", player, square)]
    IllegalSquare { square: Square, player: Player },
    #[display(fmt = "{} cannot pass while a legal move exists", player)]
    PassWithLegalMoves { player: Player },
}

/// The complete state of a game: the board, whose turn it is, and how we got here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Game {
    pub board: Board,
    pub active_player: Player,
    history: Vec<Move>,
}

impl Default for Game {
    /// Gets the starting position, with Black to move.
    fn default() -> Self {
        Self::new(Board::new(), Player::Black)
    }
}

impl Game {
    /// Construct a game with no history from a board seen by `active_player`.
    pub fn new(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            history: Vec::new(),
        }
    }

    /// Construct a game from a 64-cell layout where `X` is Black and `O` is White.
    pub fn from_layout(layout: &str, active_player: Player) -> Result<Self, ParseBoardError> {
        let board: Board = layout.parse()?;
        let board = match active_player {
            Player::Black => board,
            Player::White => board.pass(),
        };
        Ok(Self::new(board, active_player))
    }

    /// Get the legal squares for the active player.
    #[inline]
    pub fn get_moves(&self) -> SquareList {
        self.board.get_moves()
    }

    /// Play `square` for the active player.
    pub fn play(&self, square: Square) -> Result<Self, IllegalMoveError> {
        if !self.get_moves().contains(square) {
            return Err(IllegalMoveError::IllegalSquare {
                square,
                player: self.active_player,
            });
        }

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(Move::new(square, self.active_player));

        Ok(Self {
            board: self.board.make_move(square),
            active_player: !self.active_player,
            history,
        })
    }

    /// Pass the turn. Only allowed when the active player has no legal square.
    pub fn pass(&self) -> Result<Self, IllegalMoveError> {
        if !self.get_moves().is_empty() {
            return Err(IllegalMoveError::PassWithLegalMoves {
                player: self.active_player,
            });
        }

        Ok(Self {
            board: self.board.pass(),
            active_player: !self.active_player,
            history: self.history.clone(),
        })
    }

    /// Make an action as the active player.
    pub fn apply_move(&self, action: Action) -> Result<Self, IllegalMoveError> {
        match action {
            Action::Play(square) => self.play(square),
            Action::Pass => self.pass(),
        }
    }

    /// Whether neither player can move.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.board.is_finished()
    }

    /// The winner of a finished game, or None for a draw or an unfinished game.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_finished() {
            return None;
        }

        let score = self.board.score_absolute_difference();
        if score > 0 {
            Some(self.active_player)
        } else if score < 0 {
            Some(!self.active_player)
        } else {
            None
        }
    }

    /// Square ownership by color.
    pub fn owners(&self) -> SquareOwners {
        match self.active_player {
            Player::Black => SquareOwners {
                black: self.board.active_bitboard,
                white: self.board.opponent_bitboard,
            },
            Player::White => SquareOwners {
                black: self.board.opponent_bitboard,
                white: self.board.active_bitboard,
            },
        }
    }

    /// The number of pieces `player` has on the board.
    #[inline]
    pub fn piece_count(&self, player: Player) -> u8 {
        self.owners().count(player)
    }

    /// Every placement made so far, in order. Passes are not recorded.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owners = self.owners();
        let cells = owners
            .black
            .cells()
            .zip(owners.white.cells())
            .map(|cell| match cell {
                (true, _) => 'X',
                (_, true) => 'O',
                _ => '.',
            });

        crate::utils::format_grid(cells, f)?;
        write!(f, "\n{} to move", self.active_player)
    }
}
