//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};
use std::iter::Iterator;

/// Column letters, in board order.
pub const COLUMN_NAMES: &str = "ABCDEFGH";

/// Format 64 cell characters, given in row-major order, into a labelled grid.
/// `cells` must yield exactly 64 items.
pub fn format_grid<T: Iterator<Item = char>>(mut cells: T, f: &mut Formatter) -> fmt::Result {
    write!(f, "  ")?;
    for column in COLUMN_NAMES.chars() {
        write!(f, " {}", column)?;
    }

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {}", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, " {}", cells.next().ok_or(fmt::Error)?)?;
        }
    }

    match cells.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
