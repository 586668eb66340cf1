//! Code for working with [`Square`]s on the Reversi board.

use crate::bitboard::Bitboard;
use crate::utils::COLUMN_NAMES;
use crate::EDGE_LENGTH;
use derive_more::{Display, Error, From, Into};
use std::fmt::{self, Formatter, Write};

/// A square on the board, identified by its (row, column) coordinates.
/// Stored as a one-hot [`Bitboard`]; equality and hashing follow the coordinates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Square(Bitboard);

/// An ordered set of squares, which can be iterated to retrieve them.
/// Iteration always starts from the lowest bit index (the bottom-right of the board),
/// so a given set is always visited in the same order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, From, Into)]
pub struct SquareList(Bitboard);

impl Square {
    /// Convert from a one-hot [`Bitboard`].
    #[inline]
    pub fn from_onehot(bitboard: Bitboard) -> Option<Self> {
        if bitboard.count_occupied() == 1 {
            Some(Self(bitboard))
        } else {
            None
        }
    }

    /// Convert from a bit index: 0 for the bottom right, 63 for the top left.
    /// The index must be on the board.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < 64, "square index {} is off the board", index);
        Self(Bitboard::from(1u64 << (index & 63)))
    }

    /// Convert into a bit index: 0 for the bottom right, 63 for the top left.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.trailing_zeros() as u8
    }

    /// Convert from 0-indexed row and column coordinates.
    /// Returns None if the coordinates are off the board.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= EDGE_LENGTH || col >= EDGE_LENGTH {
            return None;
        }

        let index = (EDGE_LENGTH - 1 - col) + (EDGE_LENGTH - 1 - row) * EDGE_LENGTH;
        Some(Self::from_index(index as u8))
    }

    /// Get the 0-indexed (row, column) coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        let row = EDGE_LENGTH - 1 - index / EDGE_LENGTH;
        let col = EDGE_LENGTH - 1 - index % EDGE_LENGTH;
        (row, col)
    }

    #[inline]
    pub fn row(self) -> usize {
        self.to_coords().0
    }

    #[inline]
    pub fn col(self) -> usize {
        self.to_coords().1
    }
}

/// Convert this [`Square`] into string notation ("C4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let col_str = COLUMN_NAMES.chars().nth(col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        write!(f, "{}", row + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display(fmt = "invalid square notation")]
pub struct ParseSquareError;

/// Build a [`Square`] from a 1-indexed string notation ("C4", "c4").
impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col_str = chars.next().ok_or(ParseSquareError)?.to_ascii_uppercase();
        let col = COLUMN_NAMES.find(col_str).ok_or(ParseSquareError)?;
        let row = chars
            .next()
            .ok_or(ParseSquareError)?
            .to_digit(10)
            .ok_or(ParseSquareError)? as usize;

        if row == 0 || chars.next().is_some() {
            return Err(ParseSquareError);
        }

        Self::from_coords(row - 1, col).ok_or(ParseSquareError)
    }
}

impl SquareList {
    /// Returns whether `square` is in this list.
    #[inline]
    pub fn contains(self, square: Square) -> bool {
        let square_bitboard: Bitboard = square.into();
        !(square_bitboard & self.0).is_empty()
    }

    /// Returns whether there are no squares left in this list.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

impl Iterator for SquareList {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let next_square: Bitboard = (1u64 << bitboard.trailing_zeros()).into();
        self.0 ^= next_square;

        Some(Square(next_square))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareList {}

impl fmt::Display for SquareList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|square| square.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn square_from_index() {
        assert_eq!(Square::from_index(0), Square(Bitboard::from(1)));
        assert_eq!(Square::from_index(63), Square(Bitboard::from(1 << 63)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the board")]
    fn square_from_index_off_the_board() {
        Square::from_index(64);
    }

    #[test]
    fn square_to_index() {
        assert_eq!(Square(Bitboard::from(1)).to_index(), 0);
        assert_eq!(Square(Bitboard::from(1 << 63)).to_index(), 63);
    }

    #[test]
    fn square_from_coords() {
        assert_eq!(
            Square::from_coords(0, 0),
            Some(Square(Bitboard::from(1 << 63)))
        );
        assert_eq!(Square::from_coords(7, 7), Some(Square(Bitboard::from(1))));
        assert_eq!(Square::from_coords(0, 8), None);
        assert_eq!(Square::from_coords(8, 0), None);
    }

    #[test]
    fn square_to_coords() {
        assert_eq!(Square(Bitboard::from(1 << 63)).to_coords(), (0, 0));
        assert_eq!(Square(Bitboard::from(1)).to_coords(), (7, 7));
        let c4 = Square::from_coords(3, 2).unwrap();
        assert_eq!((c4.row(), c4.col()), (3, 2));
    }

    #[test]
    fn square_from_onehot() {
        assert!(Square::from_onehot(Bitboard::from(1 << 5)).is_some());
        assert!(Square::from_onehot(Bitboard::from(0b11)).is_none());
        assert!(Square::from_onehot(Bitboard::default()).is_none());
    }

    #[test]
    fn square_from_str_success() {
        assert_eq!(Square::from_str("A1"), Ok(Square(Bitboard::from(1 << 63))));
        assert_eq!(Square::from_str("h8"), Ok(Square(Bitboard::from(1))));
        assert_eq!(Square::from_str("D7"), Ok(Square::from_coords(6, 3).unwrap()));
    }

    #[test]
    fn square_from_str_fail() {
        assert_eq!(Square::from_str(""), Err(ParseSquareError));
        assert_eq!(Square::from_str("A12"), Err(ParseSquareError));
        assert_eq!(Square::from_str("AA"), Err(ParseSquareError));
        assert_eq!(Square::from_str("A9"), Err(ParseSquareError));
        assert_eq!(Square::from_str("A0"), Err(ParseSquareError));
        assert_eq!(Square::from_str("I5"), Err(ParseSquareError));
    }

    #[test]
    fn square_to_str() {
        assert_eq!(Square(Bitboard::from(1)).to_string(), "H8");
        assert_eq!(Square(Bitboard::from(1 << 63)).to_string(), "A1");
        assert_eq!(Square::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Square::from_str("F6").unwrap().to_string(), "F6");
    }

    #[test]
    fn square_list_order() {
        let list = SquareList::from(Bitboard::from((1 << 40) | (1 << 3) | (1 << 17)));
        let indices: Vec<u8> = list.map(Square::to_index).collect();
        assert_eq!(indices, vec![3, 17, 40]);
        assert_eq!(list.len(), 3);
        assert!(list.contains(Square::from_index(17)));
        assert!(!list.contains(Square::from_index(18)));
    }
}
