// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What to draw for one frame, already in screen space.

use kurbo::{Affine, Point, Rect};
use pinplan_cull::{CullStrategy, DetailFlags, LodTier};
use pinplan_pins::{BankKey, PinId, PinSlot, Polarity};

/// How a pin relates to the differential pairs of the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PairRole {
    /// Not a differential leg.
    #[default]
    None,
    /// A differential leg whose partner is not selected.
    Leg(Polarity),
    /// A differential leg whose partner is selected.
    PartnerOfSelected(Polarity),
}

/// One pin to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct PinVisual {
    /// Slot in the loaded package.
    pub slot: PinSlot,
    /// Pin id.
    pub id: PinId,
    /// Pin center in canvas pixels.
    pub screen: Point,
    /// Whether the pin is selected.
    pub selected: bool,
    /// Differential highlight.
    pub pair: PairRole,
}

/// A line joining the two legs of a differential pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    /// Positive (or first) leg.
    pub from: PinSlot,
    /// Negative (or second) leg.
    pub to: PinSlot,
    /// Screen position of `from`.
    pub from_screen: Point,
    /// Screen position of `to`.
    pub to_screen: Point,
}

/// Outline of an I/O bank.
#[derive(Clone, Debug, PartialEq)]
pub struct BankOutline {
    /// Bank name; `None` for unassigned pins.
    pub bank: BankKey,
    /// Screen-space bounding box of the bank's pin centers.
    pub screen: Rect,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Zoom tier the frame was culled at.
    pub tier: LodTier,
    /// Decorations to draw.
    pub flags: DetailFlags,
    /// How the pins were picked.
    pub strategy: CullStrategy,
    /// World to screen transform in effect.
    pub transform: Affine,
    /// Pin radius in screen pixels.
    pub pin_radius: f64,
    /// Pins to draw, selected first.
    pub pins: Vec<PinVisual>,
    /// Pair connectors to draw.
    pub connectors: Vec<Connector>,
    /// Bank outlines, when [`DetailFlags::BANK_BOUNDARIES`] is set.
    pub banks: Vec<BankOutline>,
    /// Selected ids that do not exist in the loaded package.
    pub orphaned_selection: usize,
}

impl FramePlan {
    pub(crate) fn empty(tier: LodTier) -> Self {
        Self {
            tier,
            flags: DetailFlags::empty(),
            strategy: CullStrategy::Nothing,
            transform: Affine::IDENTITY,
            pin_radius: 0.0,
            pins: Vec::new(),
            connectors: Vec::new(),
            banks: Vec::new(),
            orphaned_selection: 0,
        }
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty() && self.banks.is_empty()
    }

    /// The visual for `id`, if drawn this frame.
    #[must_use]
    pub fn find(&self, id: &PinId) -> Option<&PinVisual> {
        self.pins.iter().find(|p| &p.id == id)
    }
}
