// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a grid address cannot be interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The row designator was empty.
    EmptyRow,
    /// The row designator contains a character outside the active row scheme.
    InvalidRowCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character within the row designator.
        at: usize,
    },
    /// The row designator encodes an index that does not fit in `u32`.
    RowOutOfRange,
    /// Columns are 1-based; column `0` does not exist.
    ZeroColumn,
    /// A pin number did not split into a row designator and a column number.
    Malformed,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRow => f.write_str("empty row designator"),
            Self::InvalidRowCharacter { ch, at } => {
                write!(f, "invalid row character {ch:?} at offset {at}")
            }
            Self::RowOutOfRange => f.write_str("row designator is out of range"),
            Self::ZeroColumn => f.write_str("column numbers start at 1"),
            Self::Malformed => f.write_str("malformed grid address"),
        }
    }
}

impl core::error::Error for GridError {}
