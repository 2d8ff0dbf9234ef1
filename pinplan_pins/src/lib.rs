// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Pins: the package pin model and its lookup structures.
//!
//! - [`Pin`]: one physical pin with grid address, classification, signal
//!   assignment and optional differential-pair link.
//! - [`Package`]: a loaded pin collection together with everything derived
//!   from it (logical positions, content bounds and a [`PinIndex`]). A package
//!   is only ever rebuilt wholesale, never patched.
//! - [`PinIndex`]: O(1) lookups by id, pin number, signal, function name,
//!   bank, category and grid cell.
//! - [`DiffPairResolver`] / [`NamingResolver`]: differential partner lookup.
//!
//! ## Minimal example
//!
//! ```rust
//! use pinplan_grid::GridAddress;
//! use pinplan_pins::{Package, PackageGeometry, Pin, PinId};
//!
//! let pins = vec![
//!     Pin::new("u1", "A1", GridAddress::new("A", 1)).with_bank("34"),
//!     Pin::new("u2", "A2", GridAddress::new("A", 2)).with_bank("34").with_signal("led0"),
//! ];
//! let package = Package::new(PackageGeometry::default(), pins);
//!
//! assert_eq!(package.find_by_bank(Some("34")).count(), 2);
//! let led = package.find_by_signal_name("led0").next().unwrap();
//! assert_eq!(led.id, PinId::from("u2"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diff_pair;
mod index;
mod package;
mod pin;

pub use diff_pair::{DiffPairResolver, NamingResolver, split_polarity};
pub use index::{BankKey, PinIndex, PinSlot};
pub use package::{Package, PackageGeometry, PackageId, PinIssue};
pub use pin::{Direction, DiffPairLink, Pin, PinCategory, PinComment, PinId, Polarity};
