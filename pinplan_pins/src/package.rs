// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A loaded package: pins, derived positions and lookup indices.

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::{Point, Rect};
use pinplan_grid::{GridError, RowScheme};

use crate::{Pin, PinCategory, PinId, PinIndex, PinSlot};

static NEXT_PACKAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one [`Package`] build.
///
/// Every call to [`Package::new`] (and every edit, which rebuilds) produces a
/// fresh id, so caches keyed on it are invalidated by any reload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageId(u64);

impl PackageId {
    fn next() -> Self {
        Self(NEXT_PACKAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Physical description of a package.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageGeometry {
    /// Device name, e.g. `"xc7a35t"`.
    pub device: String,
    /// Package type, e.g. `"csg324"`.
    pub package_type: String,
    /// Row-letter scheme used by pin numbers.
    pub scheme: RowScheme,
    /// Distance between neighbouring pin centers in logical units.
    pub tile_spacing: f64,
}

impl Default for PackageGeometry {
    fn default() -> Self {
        Self {
            device: String::new(),
            package_type: String::new(),
            scheme: RowScheme::Alphabetic,
            tile_spacing: 88.0,
        }
    }
}

/// A pin that could not be fully placed when the package was built.
#[derive(Clone, Debug, PartialEq)]
pub enum PinIssue {
    /// The grid address is invalid; the pin has no position and is never drawn.
    InvalidGridAddress {
        /// Offending pin.
        slot: PinSlot,
        /// Why the address was rejected.
        error: GridError,
    },
    /// Another pin already uses this id; lookups by id resolve to the first.
    DuplicateId {
        /// Offending pin.
        slot: PinSlot,
    },
    /// Another pin already occupies this grid cell.
    DuplicateCell {
        /// Offending pin.
        slot: PinSlot,
    },
}

/// A fully loaded package.
///
/// Pins, their logical positions and the [`PinIndex`] are built together and
/// only ever replaced together: there is no way to edit a pin in place. Use
/// [`Package::edited`] to produce a rebuilt package.
#[derive(Clone, Debug)]
pub struct Package {
    id: PackageId,
    geometry: PackageGeometry,
    pins: Vec<Pin>,
    positions: Vec<Option<Point>>,
    index: PinIndex,
    bounds: Option<Rect>,
    issues: Vec<PinIssue>,
}

impl Package {
    /// Builds a package from its pins.
    ///
    /// Positions are derived from each pin's grid address. Pins with an invalid
    /// address are kept (they still appear in lists) but have no position; they
    /// are reported in [`Package::issues`].
    #[must_use]
    pub fn new(geometry: PackageGeometry, pins: Vec<Pin>) -> Self {
        let id = PackageId::next();
        let index = PinIndex::build(&pins, geometry.scheme).with_source(id);
        let mut issues = Vec::new();
        let mut bounds: Option<Rect> = None;
        let positions = pins
            .iter()
            .enumerate()
            .map(|(i, pin)| {
                let slot = PinSlot::from_index(i);
                if index.find_by_id(&pin.id) != Some(slot) {
                    issues.push(PinIssue::DuplicateId { slot });
                }
                match pin.grid.position(geometry.scheme, geometry.tile_spacing) {
                    Ok(pos) => {
                        if let Ok((row, col)) = pin.grid.cell(geometry.scheme)
                            && index.find_by_cell(row, col) != Some(slot)
                        {
                            issues.push(PinIssue::DuplicateCell { slot });
                        }
                        bounds = Some(match bounds {
                            Some(b) => b.union_pt(pos),
                            None => Rect::from_points(pos, pos),
                        });
                        Some(pos)
                    }
                    Err(error) => {
                        issues.push(PinIssue::InvalidGridAddress { slot, error });
                        None
                    }
                }
            })
            .collect();

        Self {
            id,
            geometry,
            pins,
            positions,
            index,
            bounds,
            issues,
        }
    }

    /// Builds an empty package.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(PackageGeometry::default(), Vec::new())
    }

    /// Applies `edit` to a copy of the pins and rebuilds everything derived.
    #[must_use]
    pub fn edited(&self, edit: impl FnOnce(&mut Vec<Pin>)) -> Self {
        let mut pins = self.pins.clone();
        edit(&mut pins);
        Self::new(self.geometry.clone(), pins)
    }

    /// Identity of this build.
    #[must_use]
    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Package geometry.
    #[must_use]
    pub fn geometry(&self) -> &PackageGeometry {
        &self.geometry
    }

    /// All pins in load order.
    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Number of pins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the package has no pins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Lookup tables for this package.
    #[must_use]
    pub fn index(&self) -> &PinIndex {
        self.index.check_source(self.id);
        &self.index
    }

    /// Pins that could not be fully placed.
    #[must_use]
    pub fn issues(&self) -> &[PinIssue] {
        &self.issues
    }

    /// Bounding box of all placed pin centers, in logical units.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// The pin at `slot`.
    #[must_use]
    pub fn pin(&self, slot: PinSlot) -> Option<&Pin> {
        self.pins.get(slot.index())
    }

    /// Logical position of the pin at `slot`; `None` if it has no valid address.
    #[must_use]
    pub fn position(&self, slot: PinSlot) -> Option<Point> {
        self.positions.get(slot.index()).copied().flatten()
    }

    /// Iterates all slots in load order.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = PinSlot> + '_ {
        (0..self.pins.len()).map(PinSlot::from_index)
    }

    /// Iterates `(slot, pin)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (PinSlot, &Pin)> + '_ {
        self.pins
            .iter()
            .enumerate()
            .map(|(i, p)| (PinSlot::from_index(i), p))
    }

    /// Iterates placed pins as `(slot, position)` in load order.
    pub fn placed(&self) -> impl Iterator<Item = (PinSlot, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (PinSlot::from_index(i), p)))
    }

    /// Slot of the pin with `id`.
    #[must_use]
    pub fn slot_of(&self, id: &PinId) -> Option<PinSlot> {
        self.index().find_by_id(id)
    }

    /// Returns `true` if a pin with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &PinId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Looks up a pin by id.
    #[must_use]
    pub fn find_by_id(&self, id: &PinId) -> Option<&Pin> {
        self.slot_of(id).and_then(|s| self.pin(s))
    }

    /// Looks up a pin by physical pin number.
    #[must_use]
    pub fn find_by_pin_number(&self, number: &str) -> Option<&Pin> {
        self.index()
            .find_by_pin_number(number)
            .and_then(|s| self.pin(s))
    }

    /// Pins carrying `signal`.
    pub fn find_by_signal_name<'a>(&'a self, signal: &str) -> impl Iterator<Item = &'a Pin> + 'a {
        self.resolve(self.index().find_by_signal_name(signal))
    }

    /// Pins in `bank` (`None` for unassigned).
    pub fn find_by_bank<'a>(&'a self, bank: Option<&str>) -> impl Iterator<Item = &'a Pin> + 'a {
        self.resolve(self.index().find_by_bank(bank))
    }

    /// Pins in `category`.
    pub fn find_by_category(&self, category: PinCategory) -> impl Iterator<Item = &Pin> + '_ {
        self.resolve(self.index().find_by_category(category))
    }

    fn resolve<'a>(&'a self, slots: &'a [PinSlot]) -> impl Iterator<Item = &'a Pin> + 'a {
        slots.iter().filter_map(|&s| self.pin(s))
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::empty()
    }
}
