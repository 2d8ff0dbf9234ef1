// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Grid: package grid addressing.
//!
//! Ball-grid packages name their pins by a row designator (one or more
//! letters) and a 1-based column number, e.g. `A1`, `C5` or `AB12`. This crate
//! provides:
//! - [`RowScheme`]: exact bijections between row letter sequences and
//!   zero-based row indices.
//! - [`GridAddress`]: a parsed `(row, column)` pair.
//! - [`grid_to_position`]: the canonical logical position of a grid cell in
//!   package space, given a fixed tile spacing.
//!
//! Malformed addresses are reported as [`GridError`] rather than silently
//! mapping to row zero.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pinplan_grid::{RowScheme, grid_to_position};
//!
//! let scheme = RowScheme::Alphabetic;
//! assert_eq!(scheme.row_to_index("C"), Ok(2));
//! assert_eq!(scheme.index_to_row(26), "AA");
//!
//! let pos = grid_to_position(scheme, "C", 5, 88.0).unwrap();
//! assert_eq!(pos, Point::new(352.0, 176.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod address;
mod error;
mod scheme;

pub use address::{GridAddress, grid_to_position, position_to_cell};
pub use error::GridError;
pub use scheme::RowScheme;
