//! Raw board arithmetic on one u64 per color.
//!
//! Nothing here checks its inputs: overlapping colors or a move onto an
//! occupied square give garbage back. Bit 63 is A1 (upper-left) and bits run
//! row-major from there, so bit 0 is H8.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// One bit per square. A newtype so masks can't be mixed up with counts.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Black's pieces at the start: E4 and D5.
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// White's pieces at the start: D4 and E5.
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

// Masks clearing the leftmost (A) and rightmost (H) columns.
const NOT_A_FILE: u64 = 0x7f7f7f7f7f7f7f7f;
const NOT_H_FILE: u64 = 0xfefefefefefefefe;
const FULL_MASK: u64 = 0xffffffffffffffff;

/// Shift amount (positive shifts toward the MSB) and the mask clipping the
/// wraparound column, for each of the eight directions.
const DIRECTIONS: [(i32, u64); 8] = [
    (1, NOT_H_FILE),  // W
    (-1, NOT_A_FILE), // E
    (8, FULL_MASK),   // N
    (-8, FULL_MASK),  // S
    (9, NOT_H_FILE),  // NW
    (-9, NOT_A_FILE), // SE
    (7, NOT_A_FILE),  // NE
    (-7, NOT_H_FILE), // SW
];

#[inline]
fn shift(bits: u64, (amount, mask): (i32, u64)) -> u64 {
    if amount > 0 {
        (bits << amount) & mask
    } else {
        (bits >> -amount) & mask
    }
}

impl Bitboard {
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every square's bit, A1 first, in row-major order.
    pub fn cells(self) -> impl Iterator<Item = bool> {
        (0..NUM_SPACES).rev().map(move |index| (self.0 >> index) & 1 == 1)
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let cells = self.cells().map(|bit| if bit { '#' } else { '.' });
        utils::format_grid(cells, f)
    }
}

/// `active`'s piece count minus `opponent`'s.
#[inline]
pub fn score_absolute_difference(active: Bitboard, opponent: Bitboard) -> i8 {
    active.count_occupied() as i8 - opponent.count_occupied() as i8
}

/// Every empty square where `active` would capture at least one of `opponent`'s pieces.
#[inline]
pub fn get_move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(active.0 | opponent.0);
    let mut moves = 0;

    for &direction in DIRECTIONS.iter() {
        // Smear our pieces across runs of opponent pieces; at most six fit between two ends.
        let mut run = shift(active.0, direction) & opponent.0;
        for _ in 0..5 {
            run |= shift(run, direction) & opponent.0;
        }

        // A move is one step past the end of a run, onto an empty space.
        moves |= shift(run, direction) & empties;
    }

    Bitboard(moves)
}

/// Place `active`'s piece on the one-hot `placement` and flip everything it captures.
/// Returns the new (active, opponent) pair.
#[inline]
pub fn apply_move(
    active: Bitboard,
    opponent: Bitboard,
    placement: Bitboard,
) -> (Bitboard, Bitboard) {
    let mut flip_mask = 0;

    for &direction in DIRECTIONS.iter() {
        // Walk away from the new piece while we see opponent pieces.
        let mut captured = 0;
        let mut cursor = shift(placement.0, direction);
        while cursor & opponent.0 != 0 {
            captured |= cursor;
            cursor = shift(cursor, direction);
        }

        // The run is only flipped if it is capped by one of our pieces.
        if cursor & active.0 != 0 {
            flip_mask |= captured;
        }
    }

    (
        Bitboard((active.0 ^ flip_mask) | placement.0),
        Bitboard(opponent.0 ^ flip_mask),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_moves() {
        // D3, C4, F5, E6 for Black.
        let expected = (1u64 << 44) | (1u64 << 37) | (1u64 << 26) | (1u64 << 19);
        assert_eq!(
            get_move_mask(BLACK_START, WHITE_START),
            Bitboard::from(expected)
        );
    }

    #[test]
    fn moves_do_not_wrap_columns() {
        // Black on H1, White on A2: shifting west from H1 must not reach A2.
        let black = Bitboard::from(1u64 << 56);
        let white = Bitboard::from(1u64 << 55);
        assert!(get_move_mask(black, white).is_empty());
    }

    #[test]
    fn apply_move_flips_captured_run() {
        // Black plays C4 from the start, flipping D4.
        let (black, white) = apply_move(BLACK_START, WHITE_START, Bitboard::from(1u64 << 37));
        assert_eq!(black.count_occupied(), 4);
        assert_eq!(white.count_occupied(), 1);
        assert!(!(black & Bitboard::from(1u64 << 36)).is_empty());
    }

    #[test]
    fn apply_move_ignores_uncapped_run() {
        // White run on B1..C1 with nothing of ours past it.
        let black = Bitboard::from(1u64 << 55); // A2
        let white = Bitboard::from((1u64 << 62) | (1u64 << 61)); // B1, C1
        let (new_black, new_white) = apply_move(black, white, Bitboard::from(1u64 << 63));
        assert_eq!(new_white, white);
        assert_eq!(new_black.count_occupied(), 2);
    }

    #[test]
    fn scores() {
        assert_eq!(score_absolute_difference(BLACK_START, WHITE_START), 0);
        let black = BLACK_START | Bitboard::from(1u64);
        assert_eq!(score_absolute_difference(black, WHITE_START), 1);
        assert_eq!(score_absolute_difference(WHITE_START, black), -1);
    }

    #[test]
    fn cells_start_at_a1() {
        let bits: Vec<bool> = Bitboard::from(1u64 << 63).cells().collect();
        assert_eq!(bits.len(), NUM_SPACES);
        assert!(bits[0]);
        assert!(bits[1..].iter().all(|&bit| !bit));
    }
}
