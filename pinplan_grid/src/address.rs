// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;

use kurbo::{Point, Vec2};

use crate::{GridError, RowScheme};

/// Positions are quantized to this many steps per logical unit so repeated
/// derivation never accumulates floating error.
const POSITION_STEPS: f64 = 1000.0;

/// A `(row, column)` cell address in a package grid.
///
/// Rows are letter designators interpreted by a [`RowScheme`]; columns are
/// 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAddress {
    /// Row designator, e.g. `"C"` or `"AB"`.
    pub row: String,
    /// 1-based column number.
    pub col: u32,
}

impl GridAddress {
    /// Creates an address from its parts without validation.
    #[must_use]
    pub fn new(row: impl Into<String>, col: u32) -> Self {
        Self {
            row: row.into(),
            col,
        }
    }

    /// Splits a pin number such as `"AB12"` into its row and column.
    ///
    /// The row part is validated against `scheme`.
    pub fn parse(pin_number: &str, scheme: RowScheme) -> Result<Self, GridError> {
        let split = pin_number
            .find(|c: char| c.is_ascii_digit())
            .ok_or(GridError::Malformed)?;
        let (row, col) = pin_number.split_at(split);
        scheme.row_to_index(row)?;
        let col: u32 = col.parse().map_err(|_| GridError::Malformed)?;
        if col == 0 {
            return Err(GridError::ZeroColumn);
        }
        Ok(Self::new(row.to_string(), col))
    }

    /// Returns the zero-based `(row_index, col)` cell for this address.
    pub fn cell(&self, scheme: RowScheme) -> Result<(u32, u32), GridError> {
        if self.col == 0 {
            return Err(GridError::ZeroColumn);
        }
        Ok((scheme.row_to_index(&self.row)?, self.col))
    }

    /// Logical position of this address; see [`grid_to_position`].
    pub fn position(&self, scheme: RowScheme, tile_spacing: f64) -> Result<Point, GridError> {
        grid_to_position(scheme, &self.row, self.col, tile_spacing)
    }
}

impl fmt::Display for GridAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

/// Maps a grid address to its logical position in package space.
///
/// `x = (col - 1) * tile_spacing`, `y = row_index * tile_spacing`, quantized
/// to a thousandth of a logical unit.
pub fn grid_to_position(
    scheme: RowScheme,
    row: &str,
    col: u32,
    tile_spacing: f64,
) -> Result<Point, GridError> {
    if col == 0 {
        return Err(GridError::ZeroColumn);
    }
    let row_index = scheme.row_to_index(row)?;
    let raw = Vec2::new(
        f64::from(col - 1) * tile_spacing,
        f64::from(row_index) * tile_spacing,
    );
    Ok(((raw * POSITION_STEPS).round() / POSITION_STEPS).to_point())
}

/// Snaps a logical position to the nearest grid cell.
///
/// Returns the zero-based row index and 1-based column, or `None` when the
/// position lies outside the positive quadrant or `tile_spacing` is not a
/// positive finite number.
#[must_use]
pub fn position_to_cell(pos: Point, tile_spacing: f64) -> Option<(u32, u32)> {
    if !(tile_spacing.is_finite() && tile_spacing > 0.0) || !pos.is_finite() {
        return None;
    }
    let snapped = (pos.to_vec2() / tile_spacing).round();
    let limit = f64::from(u32::MAX);
    if snapped.x < 0.0 || snapped.y < 0.0 || snapped.x >= limit || snapped.y > limit {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range checked against u32::MAX above"
    )]
    let cell = (snapped.y as u32, snapped.x as u32 + 1);
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_row_c_column_5() {
        let pos = grid_to_position(RowScheme::Alphabetic, "C", 5, 88.0).unwrap();
        assert_eq!(pos, Point::new(352.0, 176.0));
    }

    #[test]
    fn first_cell_is_origin() {
        let pos = grid_to_position(RowScheme::Alphabetic, "A", 1, 1.27).unwrap();
        assert_eq!(pos, Point::ZERO);
    }

    #[test]
    fn fractional_spacing_is_quantized() {
        let pos = grid_to_position(RowScheme::Alphabetic, "D", 4, 0.1).unwrap();
        assert_eq!(pos, Point::new(0.3, 0.3));
    }

    #[test]
    fn invalid_rows_fail_instead_of_defaulting() {
        assert!(grid_to_position(RowScheme::Alphabetic, "", 1, 1.0).is_err());
        assert!(grid_to_position(RowScheme::Alphabetic, "a", 1, 1.0).is_err());
        assert_eq!(
            grid_to_position(RowScheme::Alphabetic, "A", 0, 1.0),
            Err(GridError::ZeroColumn)
        );
    }

    #[test]
    fn parse_splits_pin_numbers() {
        let addr = GridAddress::parse("AB12", RowScheme::Alphabetic).unwrap();
        assert_eq!(addr, GridAddress::new("AB", 12));
        assert_eq!(addr.to_string(), "AB12");
        assert_eq!(addr.cell(RowScheme::Alphabetic), Ok((27, 12)));

        assert_eq!(
            GridAddress::parse("12", RowScheme::Alphabetic),
            Err(GridError::EmptyRow)
        );
        assert_eq!(
            GridAddress::parse("AB", RowScheme::Alphabetic),
            Err(GridError::Malformed)
        );
        assert_eq!(
            GridAddress::parse("A0", RowScheme::Alphabetic),
            Err(GridError::ZeroColumn)
        );
        assert_eq!(
            GridAddress::parse("A1X", RowScheme::Alphabetic),
            Err(GridError::Malformed)
        );
    }

    #[test]
    fn position_to_cell_inverts_grid_to_position() {
        let pos = grid_to_position(RowScheme::Alphabetic, "C", 5, 88.0).unwrap();
        assert_eq!(position_to_cell(pos, 88.0), Some((2, 5)));
        // Within half a tile still snaps to the same cell.
        assert_eq!(
            position_to_cell(Point::new(352.0 + 40.0, 176.0 - 40.0), 88.0),
            Some((2, 5))
        );
        assert_eq!(position_to_cell(Point::new(-60.0, 0.0), 88.0), None);
        assert_eq!(position_to_cell(Point::new(0.0, 0.0), 0.0), None);
    }
}
