//! An opening book: expected scores for well-known move sequences.
//!
//! Sequences are written in the usual game-record notation, two characters per
//! move: a column letter and a row digit. Uppercase columns are Black's moves and
//! lowercase columns are White's, so `"C4c3"` is Black C4 followed by White C3.

use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use itertools::Itertools;
use reversi_board::{Move, Player, Square, EDGE_LENGTH};
use std::collections::HashMap;
use tracing::debug;

/// Published lines of the C4c3 opening family, as
/// (base sequence, candidate next moves, expected score after each candidate).
const STANDARD_LINES: &[(&str, &str, &[i32])] = &[
    ("C4c3", "C2D3E6F5", &[-11, 0, -6, -7]),
    ("C4c3D3", "c5e3", &[0, 0]),
    (
        "C4c3D3c5",
        "B2B3B4B5B6C6D6E6F6",
        &[-16, -4, 0, -4, -4, -4, 0, -5, -4],
    ),
    ("C4c3D3c5B4", "a3a5b3d2e3f3", &[-5, -8, -4, 0, -3, -5]),
    ("C4c3D3c5B4d2", "C2C6D6E1E2E6", &[0, -4, 0, -5, -4, -7]),
    (
        "C4c3D3c5B4d2D6",
        "a4a5b3b5b6c6c7d7e3f3f4f5",
        &[-10, -9, 0, -4, -5, -3, -9, -12, -4, -5, -4, -5],
    ),
    ("C4c3D3c5B4e3", "C2C6D2D6E2F4", &[0, 0, 0, 0, 3, 0]),
    ("C4c3D3c5B4d2E2", "a3a4a5b3e3f2f3f4", &[-4, -10, -5, 4, -3, -8, -9, -8]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum BookError {
    #[display(
        fmt = "move list should have an even number of characters, found {}",
        length
    )]
    OddLength { length: usize },
    #[display(fmt = "column for Black should be between A and H, found {:?}", column)]
    BlackColumnOutOfRange { column: char },
    #[display(fmt = "column for White should be between a and h, found {:?}", column)]
    WhiteColumnOutOfRange { column: char },
    #[display(fmt = "row should be between 1 and 8, found {:?}", row)]
    RowOutOfRange { row: char },
    #[display(
        fmt = "should have the same number of next moves and scores, found {} and {}",
        moves,
        scores
    )]
    LengthMismatch { moves: usize, scores: usize },
}

/// Parse a move sequence such as `"C4c3D3"`.
pub fn parse_moves(notation: &str) -> Result<Vec<Move>, BookError> {
    let length = notation.chars().count();
    if length % 2 != 0 {
        return Err(BookError::OddLength { length });
    }

    notation
        .chars()
        .tuples()
        .map(|(column, row)| parse_move(column, row))
        .collect()
}

fn parse_move(column: char, row: char) -> Result<Move, BookError> {
    let (player, col) = if column.is_uppercase() {
        match column {
            'A'..='H' => (Player::Black, column as usize - 'A' as usize),
            _ => return Err(BookError::BlackColumnOutOfRange { column }),
        }
    } else {
        match column {
            'a'..='h' => (Player::White, column as usize - 'a' as usize),
            _ => return Err(BookError::WhiteColumnOutOfRange { column }),
        }
    };

    let row_index = match row {
        '1'..='8' => row as usize - '1' as usize,
        _ => return Err(BookError::RowOutOfRange { row }),
    };

    let square = Square::from_coords(row_index, col).ok_or(BookError::RowOutOfRange { row })?;
    Ok(Move::new(square, player))
}

/// A board symmetry that maps the starting position onto itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Reflect across the A1-H8 diagonal: (row, col) -> (col, row).
    Transpose,
    /// Reflect across the H1-A8 diagonal: (row, col) -> (7 - col, 7 - row).
    AntiTranspose,
    /// Rotate by 180 degrees: (row, col) -> (7 - row, 7 - col).
    HalfTurn,
}

impl Symmetry {
    /// Every non-identity symmetry of the starting position.
    pub const ALL: [Symmetry; 3] = [
        Symmetry::Transpose,
        Symmetry::AntiTranspose,
        Symmetry::HalfTurn,
    ];

    /// Map a square to its image under this symmetry.
    pub fn apply(self, square: Square) -> Square {
        let (row, col) = square.to_coords();
        let last = EDGE_LENGTH - 1;

        // Bit index of the image square: (7 - col') + (7 - row') * 8.
        let index = match self {
            Symmetry::Transpose => (last - row) + (last - col) * EDGE_LENGTH,
            Symmetry::AntiTranspose => row + col * EDGE_LENGTH,
            Symmetry::HalfTurn => col + row * EDGE_LENGTH,
        };
        Square::from_index(index as u8)
    }

    /// Map a whole sequence, keeping who played each move.
    pub fn apply_all(self, moves: &[Move]) -> Vec<Move> {
        moves
            .iter()
            .map(|m| Move::new(self.apply(m.square), m.player))
            .collect()
    }
}

fn symmetric_variants(moves: &[Move]) -> ArrayVec<[Vec<Move>; 3]> {
    Symmetry::ALL
        .iter()
        .map(|symmetry| symmetry.apply_all(moves))
        .collect()
}

/// Expected scores for move sequences, closed under the starting position's symmetries.
///
/// A stored score is expressed for the player who made the last move in its sequence.
#[derive(Clone, Debug, Default)]
pub struct OpeningBook {
    expected_scores: HashMap<Vec<Move>, i32>,
}

impl OpeningBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The published C4c3 opening lines.
    pub fn standard() -> Result<Self, BookError> {
        let mut book = Self::new();
        for (base, nexts, scores) in STANDARD_LINES.iter() {
            book.insert_variations_notation(base, nexts, scores)?;
        }

        debug!(entries = book.len(), "loaded standard opening book");
        Ok(book)
    }

    /// The number of stored sequences, symmetric variants included.
    #[inline]
    pub fn len(&self) -> usize {
        self.expected_scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.expected_scores.is_empty()
    }

    pub fn contains(&self, moves: &[Move]) -> bool {
        self.expected_scores.contains_key(moves)
    }

    /// The expected score of `moves` for `player`, if the sequence is in the book.
    pub fn score(&self, moves: &[Move], player: Player) -> Option<i32> {
        let score = *self.expected_scores.get(moves)?;
        let last_mover = moves.last()?.player;
        Some(if last_mover == player { score } else { -score })
    }

    /// Store `moves` and each of its symmetric variants with `score`.
    /// An empty sequence has no last mover and is ignored.
    pub fn insert(&mut self, moves: Vec<Move>, score: i32) {
        if moves.is_empty() {
            return;
        }

        for variant in symmetric_variants(&moves) {
            self.expected_scores.insert(variant, score);
        }
        self.expected_scores.insert(moves, score);
    }

    pub fn insert_notation(&mut self, notation: &str, score: i32) -> Result<(), BookError> {
        let moves = parse_moves(notation)?;
        self.insert(moves, score);
        Ok(())
    }

    /// Store `base` followed by each of `nexts`, with the matching entry of `scores`.
    pub fn insert_variations(
        &mut self,
        base: &[Move],
        nexts: &[Move],
        scores: &[i32],
    ) -> Result<(), BookError> {
        if nexts.len() != scores.len() {
            return Err(BookError::LengthMismatch {
                moves: nexts.len(),
                scores: scores.len(),
            });
        }

        for (&next, &score) in nexts.iter().zip(scores) {
            let mut moves = Vec::with_capacity(base.len() + 1);
            moves.extend_from_slice(base);
            moves.push(next);
            self.insert(moves, score);
        }
        Ok(())
    }

    pub fn insert_variations_notation(
        &mut self,
        base: &str,
        nexts: &str,
        scores: &[i32],
    ) -> Result<(), BookError> {
        let base = parse_moves(base)?;
        let nexts = parse_moves(nexts)?;
        self.insert_variations(&base, &nexts, scores)
    }
}
