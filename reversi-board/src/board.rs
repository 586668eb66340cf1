//! A fast, perspective-relative implementation of Reversi board dynamics.
//!
//! A [`Board`] only knows "the player to move" and "the other player"; use
//! [`crate::Game`] for colors, legality checks and move history.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::{Square, SquareList, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// A pair of bitboards storing the pieces of the active player and their opponent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    pub active_bitboard: Bitboard,
    pub opponent_bitboard: Bitboard,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The starting position from Black's perspective.
    pub const fn new() -> Self {
        Self {
            active_bitboard: BLACK_START,
            opponent_bitboard: WHITE_START,
        }
    }

    /// Hand the turn to the opponent without placing a piece.
    #[inline]
    pub fn pass(self) -> Self {
        Self {
            active_bitboard: self.opponent_bitboard,
            opponent_bitboard: self.active_bitboard,
        }
    }

    /// Get the legal moves for the active player.
    #[inline]
    pub fn get_moves(self) -> SquareList {
        bitboard::get_move_mask(self.active_bitboard, self.opponent_bitboard).into()
    }

    /// Make a move for the active player, returning the board from the opponent's perspective.
    /// Does not check that `square` is legal.
    #[inline]
    pub fn make_move(self, square: Square) -> Self {
        let (active, opponent) =
            bitboard::apply_move(self.active_bitboard, self.opponent_bitboard, square.into());

        Self {
            active_bitboard: opponent,
            opponent_bitboard: active,
        }
    }

    /// Score a board as: # my pieces - # opponent pieces.
    #[inline]
    pub fn score_absolute_difference(self) -> i8 {
        bitboard::score_absolute_difference(self.active_bitboard, self.opponent_bitboard)
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied_mask(self) -> Bitboard {
        self.active_bitboard | self.opponent_bitboard
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty_mask(self) -> Bitboard {
        !self.occupied_mask()
    }

    /// Count the empty spaces left on the board.
    #[inline]
    pub fn count_empties(self) -> u8 {
        self.occupied_mask().count_empty()
    }

    /// Whether neither player can move.
    #[inline]
    pub fn is_finished(self) -> bool {
        self.get_moves().is_empty() && self.pass().get_moves().is_empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .active_bitboard
            .cells()
            .zip(self.opponent_bitboard.cells())
            .map(|cell| match cell {
                (false, false) => '.',
                (true, false) => '#',
                (false, true) => 'O',
                (true, true) => '!',
            });

        crate::utils::format_grid(cells, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    #[display(fmt = "unknown board character {:?}", symbol)]
    UnknownSymbol { symbol: char },
    #[display(fmt = "expected {} board cells, found {}", expected, found)]
    WrongCellCount { expected: usize, found: usize },
}

/// Parse 64 row-major cells: `X` for the active player, `O` for the opponent, `-` or `.` for empty.
/// Whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut active: u64 = 0;
        let mut opponent: u64 = 0;
        let mut cells = 0;

        for symbol in s.chars().filter(|c| !c.is_whitespace()) {
            active <<= 1;
            opponent <<= 1;

            match symbol {
                'X' | 'x' => active |= 1,
                'O' | 'o' => opponent |= 1,
                '-' | '.' => (),
                symbol => return Err(ParseBoardError::UnknownSymbol { symbol }),
            }
            cells += 1;
        }

        if cells != NUM_SPACES {
            return Err(ParseBoardError::WrongCellCount {
                expected: NUM_SPACES,
                found: cells,
            });
        }

        Ok(Self {
            active_bitboard: active.into(),
            opponent_bitboard: opponent.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn pass_swaps_perspective() {
        let board = Board::new();
        assert_eq!(board.pass().active_bitboard, WHITE_START);
        assert_eq!(board.pass().pass(), board);
    }

    #[test]
    fn start_has_four_moves() {
        let moves = Board::new().get_moves();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves.to_string(), "[E6, F5, C4, D3]");
    }

    #[test]
    fn make_move_swaps_perspective() {
        let c4 = Square::from_str("C4").unwrap();
        let board = Board::new().make_move(c4);
        assert_eq!(board.active_bitboard.count_occupied(), 1);
        assert_eq!(board.opponent_bitboard.count_occupied(), 4);
        assert_eq!(board.score_absolute_difference(), -3);
        assert_eq!(board.count_empties(), 59);
    }

    #[test]
    fn parse_start() {
        let layout = "
            --------
            --------
            --------
            ---OX---
            ---XO---
            --------
            --------
            --------";
        assert_eq!(Board::from_str(layout), Ok(Board::new()));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Board::from_str("--?"),
            Err(ParseBoardError::UnknownSymbol { symbol: '?' })
        );
        assert_eq!(
            Board::from_str("----"),
            Err(ParseBoardError::WrongCellCount {
                expected: 64,
                found: 4
            })
        );
    }

    #[test]
    fn finished_when_nobody_moves() {
        assert!(!Board::new().is_finished());
        let full: Board = "X".repeat(64).parse().unwrap();
        assert!(full.is_finished());
    }
}
