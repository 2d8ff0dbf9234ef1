// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use hashbrown::HashSet;
use pinplan_pins::PinSlot;

/// Picks up to `target` items spread evenly over `items`.
///
/// Item `i` of the sample is `items[i * len / target]`, so the effective step
/// is at least one and the sample always starts at the first item. The result
/// depends only on the order of `items`.
pub fn stride_sample<T: Copy>(items: &[T], target: usize) -> impl Iterator<Item = T> + '_ {
    let len = items.len();
    let take = target.min(len);
    (0..take).map(move |i| items[i * len / take])
}

/// Ordered, de-duplicated slot list.
#[derive(Debug, Default)]
pub(crate) struct Picked {
    seen: HashSet<PinSlot>,
    order: Vec<PinSlot>,
}

impl Picked {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(cap),
            order: Vec::with_capacity(cap),
        }
    }

    /// Appends `slot` unless already present.
    pub(crate) fn push(&mut self, slot: PinSlot) -> bool {
        let fresh = self.seen.insert(slot);
        if fresh {
            self.order.push(slot);
        }
        fresh
    }

    pub(crate) fn contains(&self, slot: PinSlot) -> bool {
        self.seen.contains(&slot)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn into_vec(self) -> Vec<PinSlot> {
        self.order
    }
}
