// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup tables over a pin collection.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{Equivalent, HashMap};
use smallvec::SmallVec;

use pinplan_grid::RowScheme;

use crate::{PackageId, Pin, PinCategory, PinId};

/// Position of a pin within its package's pin list.
///
/// Slots are only meaningful for the [`Package`](crate::Package) (or pin
/// slice) they were produced from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinSlot(u32);

impl PinSlot {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "packages are far below u32::MAX pins"
    )]
    pub(crate) fn from_index(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Returns the slot as an index into the pin list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bank grouping key; `None` is the unassigned bucket.
pub type BankKey = Option<String>;

/// Borrowed form of [`BankKey`]; hashes identically to it.
#[derive(Hash)]
struct BankQuery<'a>(Option<&'a str>);

impl Equivalent<BankKey> for BankQuery<'_> {
    fn equivalent(&self, key: &BankKey) -> bool {
        self.0 == key.as_deref()
    }
}

/// O(1) lookup structures over a pin collection.
///
/// A `PinIndex` has no mutation methods. Any change to the pins means building
/// a new index; [`Package`](crate::Package) does this atomically together with
/// the pin list it describes.
///
/// Within every one-to-many bucket, slots are kept in ascending order, and
/// [`PinIndex::bank_order`] lists banks in order of first appearance, so
/// iteration over the index is deterministic.
#[derive(Clone, Debug, Default)]
pub struct PinIndex {
    source: Option<PackageId>,
    len: usize,
    by_id: HashMap<PinId, PinSlot>,
    by_number: HashMap<String, PinSlot>,
    by_signal: HashMap<String, SmallVec<[PinSlot; 1]>>,
    by_function: HashMap<String, PinSlot>,
    by_bank: HashMap<BankKey, Vec<PinSlot>>,
    bank_order: Vec<BankKey>,
    by_category: HashMap<PinCategory, Vec<PinSlot>>,
    by_cell: HashMap<(u32, u32), PinSlot>,
}

impl PinIndex {
    /// Builds an index over `pins`.
    ///
    /// When ids, pin numbers or grid cells collide, the first pin wins the
    /// one-to-one lookups. Pins whose row designator is invalid under `scheme`
    /// are left out of the cell table.
    #[must_use]
    pub fn build(pins: &[Pin], scheme: RowScheme) -> Self {
        let mut index = Self {
            len: pins.len(),
            ..Self::default()
        };
        index.by_id.reserve(pins.len());
        index.by_number.reserve(pins.len());
        index.by_cell.reserve(pins.len());

        for (i, pin) in pins.iter().enumerate() {
            let slot = PinSlot::from_index(i);
            index.by_id.entry(pin.id.clone()).or_insert(slot);
            index
                .by_number
                .entry(pin.pin_number.clone())
                .or_insert(slot);
            if pin.is_assigned() {
                index
                    .by_signal
                    .entry(String::from(pin.signal()))
                    .or_default()
                    .push(slot);
            }
            if !pin.function.is_empty() {
                index.by_function.entry(pin.function.clone()).or_insert(slot);
            }
            if !index.by_bank.contains_key(&pin.bank) {
                index.bank_order.push(pin.bank.clone());
            }
            index.by_bank.entry(pin.bank.clone()).or_default().push(slot);
            index.by_category.entry(pin.category).or_default().push(slot);
            if let Ok(cell) = pin.grid.cell(scheme) {
                index.by_cell.entry(cell).or_insert(slot);
            }
        }
        index
    }

    pub(crate) fn with_source(mut self, source: PackageId) -> Self {
        self.source = Some(source);
        self
    }

    /// The package this index was built for, if it was built by one.
    #[must_use]
    pub fn source(&self) -> Option<PackageId> {
        self.source
    }

    /// Debug check that this index describes `package`.
    ///
    /// Indices are rebuilt together with their pins, so a mismatch is a logic
    /// error in the caller.
    pub fn check_source(&self, package: PackageId) {
        debug_assert!(
            self.source.is_none_or(|s| s == package),
            "stale PinIndex: built for {:?}, queried for {package:?}",
            self.source
        );
    }

    /// Number of pins indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no pins were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Looks up a pin by id.
    #[must_use]
    pub fn find_by_id(&self, id: &PinId) -> Option<PinSlot> {
        self.by_id.get(id).copied()
    }

    /// Looks up a pin by its physical pin number.
    #[must_use]
    pub fn find_by_pin_number(&self, number: &str) -> Option<PinSlot> {
        self.by_number.get(number).copied()
    }

    /// All pins carrying `signal`. Usually one, but duplicates are tolerated.
    #[must_use]
    pub fn find_by_signal_name(&self, signal: &str) -> &[PinSlot] {
        self.by_signal.get(signal).map_or(&[], |s| s.as_slice())
    }

    /// Looks up a pin by vendor function name.
    #[must_use]
    pub fn find_by_function(&self, function: &str) -> Option<PinSlot> {
        self.by_function.get(function).copied()
    }

    /// All pins in `bank` (`None` for unassigned).
    #[must_use]
    pub fn find_by_bank(&self, bank: Option<&str>) -> &[PinSlot] {
        let found = self.by_bank.get(&BankQuery(bank));
        found.map_or(&[], Vec::as_slice)
    }

    /// All pins in `category`.
    #[must_use]
    pub fn find_by_category(&self, category: PinCategory) -> &[PinSlot] {
        self.by_category.get(&category).map_or(&[], Vec::as_slice)
    }

    /// The pin occupying a zero-based `(row_index, col)` cell.
    #[must_use]
    pub fn find_by_cell(&self, row_index: u32, col: u32) -> Option<PinSlot> {
        self.by_cell.get(&(row_index, col)).copied()
    }

    /// Banks in order of first appearance, each with its slots.
    pub fn banks(&self) -> impl Iterator<Item = (&BankKey, &[PinSlot])> + '_ {
        self.bank_order
            .iter()
            .map(|k| (k, self.by_bank.get(k).map_or(&[][..], Vec::as_slice)))
    }

    /// Banks in order of first appearance.
    #[must_use]
    pub fn bank_order(&self) -> &[BankKey] {
        &self.bank_order
    }

    /// Number of distinct banks, counting the unassigned bucket.
    #[must_use]
    pub fn bank_count(&self) -> usize {
        self.bank_order.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pinplan_grid::GridAddress;

    use super::*;

    fn pins() -> Vec<Pin> {
        vec![
            Pin::new("a1", "A1", GridAddress::new("A", 1))
                .with_bank("34")
                .with_signal("led0"),
            Pin::new("a2", "A2", GridAddress::new("A", 2)).with_category(PinCategory::Ground),
            Pin::new("b1", "B1", GridAddress::new("B", 1))
                .with_bank("35")
                .with_signal("led0"),
            Pin::new("b2", "B2", GridAddress::new("B", 2))
                .with_bank("34")
                .with_function("IO_L1P_T0_34"),
        ]
    }

    #[test]
    fn one_to_one_lookups() {
        let index = PinIndex::build(&pins(), RowScheme::Alphabetic);
        assert_eq!(index.len(), 4);
        assert_eq!(index.find_by_id(&PinId::from("b1")).map(PinSlot::index), Some(2));
        assert_eq!(index.find_by_pin_number("A2").map(PinSlot::index), Some(1));
        assert_eq!(index.find_by_function("IO_L1P_T0_34").map(PinSlot::index), Some(3));
        assert_eq!(index.find_by_cell(1, 2).map(PinSlot::index), Some(3));
        assert_eq!(index.find_by_id(&PinId::from("zz")), None);
    }

    #[test]
    fn one_to_many_lookups_keep_slot_order() {
        let index = PinIndex::build(&pins(), RowScheme::Alphabetic);
        let slots = |s: &[PinSlot]| s.iter().map(|s| s.index()).collect::<Vec<_>>();

        assert_eq!(slots(index.find_by_signal_name("led0")), vec![0, 2]);
        assert_eq!(slots(index.find_by_bank(Some("34"))), vec![0, 3]);
        assert_eq!(slots(index.find_by_bank(None)), vec![1]);
        assert_eq!(slots(index.find_by_category(PinCategory::Io)), vec![0, 2, 3]);
        assert!(index.find_by_signal_name("").is_empty());
        assert!(index.find_by_bank(Some("99")).is_empty());
    }

    #[test]
    fn banks_iterate_in_first_appearance_order() {
        let index = PinIndex::build(&pins(), RowScheme::Alphabetic);
        let order: Vec<Option<&str>> = index.bank_order().iter().map(|b| b.as_deref()).collect();
        assert_eq!(order, vec![Some("34"), None, Some("35")]);
        assert_eq!(index.bank_count(), 3);
    }

    #[test]
    fn duplicates_keep_first_pin() {
        let mut list = pins();
        list.push(Pin::new("a1", "Z9", GridAddress::new("A", 1)));
        let index = PinIndex::build(&list, RowScheme::Alphabetic);
        assert_eq!(index.find_by_id(&PinId::from("a1")).map(PinSlot::index), Some(0));
        assert_eq!(index.find_by_cell(0, 1).map(PinSlot::index), Some(0));
        assert_eq!(index.find_by_pin_number("Z9").map(PinSlot::index), Some(4));
    }
}
