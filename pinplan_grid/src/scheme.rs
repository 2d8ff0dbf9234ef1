// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use crate::GridError;

const ALPHABETIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
// JEDEC ball-grid naming skips letters that are easily confused with digits.
const JEDEC: &[u8] = b"ABCDEFGHJKLMNPRTUVWY";

/// Row-letter scheme used to name package rows.
///
/// Both schemes are *bijective* base-N numerals: there is no zero digit, so
/// every non-empty letter sequence maps to exactly one index and back.
///
/// | Scheme | Digits | Sequence |
/// |---|---|---|
/// | [`RowScheme::Alphabetic`] | `A`..`Z` | `A`=0 … `Z`=25, `AA`=26, `AB`=27 … `AZ`=51, `BA`=52 … |
/// | [`RowScheme::Jedec`] | `A`..`Y` without `I O Q S X Z` | `A`=0 … `Y`=19, `AA`=20 … |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowScheme {
    /// All 26 uppercase letters.
    #[default]
    Alphabetic,
    /// The 20-letter JEDEC alphabet used by many BGA vendors.
    Jedec,
}

impl RowScheme {
    fn digits(self) -> &'static [u8] {
        match self {
            Self::Alphabetic => ALPHABETIC,
            Self::Jedec => JEDEC,
        }
    }

    fn digit_value(self, ch: u8) -> Option<u64> {
        self.digits()
            .iter()
            .position(|&d| d == ch)
            .map(|p| p as u64 + 1)
    }

    /// Converts a row designator to its zero-based index.
    ///
    /// Only uppercase letters of the scheme are accepted; anything else is a
    /// [`GridError`], never a silent fallback to row `0`.
    pub fn row_to_index(self, row: &str) -> Result<u32, GridError> {
        if row.is_empty() {
            return Err(GridError::EmptyRow);
        }
        let base = self.digits().len() as u64;
        let mut value: u64 = 0;
        for (at, ch) in row.char_indices() {
            let digit = u8::try_from(ch)
                .ok()
                .and_then(|b| self.digit_value(b))
                .ok_or(GridError::InvalidRowCharacter { ch, at })?;
            value = value
                .checked_mul(base)
                .and_then(|v| v.checked_add(digit))
                .ok_or(GridError::RowOutOfRange)?;
        }
        u32::try_from(value - 1).map_err(|_| GridError::RowOutOfRange)
    }

    /// Converts a zero-based index back to its row designator.
    ///
    /// This is the exact inverse of [`RowScheme::row_to_index`].
    #[must_use]
    pub fn index_to_row(self, index: u32) -> String {
        let digits = self.digits();
        let base = digits.len() as u64;
        let mut n = u64::from(index) + 1;
        let mut out = Vec::new();
        while n > 0 {
            n -= 1;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "the remainder is below the digit count"
            )]
            out.push(digits[(n % base) as usize]);
            n /= base;
        }
        out.reverse();
        out.into_iter().map(char::from).collect()
    }
}
