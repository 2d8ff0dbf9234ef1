// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame selection of the pins to draw.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use pinplan_grid::position_to_cell;
use pinplan_pins::{Package, PinId, PinSlot};
use pinplan_view2d::Viewport2D;

use crate::sample::{Picked, stride_sample};
use crate::{LodPolicy, LodTier};

/// Tunables for [`CullEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CullConfig {
    /// Screen-space margin around the viewport in the close-up band.
    pub detail_margin_px: u32,
    /// Screen-space margin around the viewport for the mid-zoom focus area.
    pub focus_margin_px: u32,
    /// Share of each bank kept in the overview band, in percent.
    pub bank_sample_percent: u32,
    /// How many out-of-focus pins the mid-zoom band samples for context.
    pub peripheral_sample_target: usize,
    /// Floor of the per-bank budget in the close band.
    pub min_pins_per_bank: usize,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            detail_margin_px: 100,
            focus_margin_px: 300,
            bank_sample_percent: 85,
            peripheral_sample_target: 200,
            min_pins_per_bank: 10,
        }
    }
}

/// How a [`CullResult`] was produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CullStrategy {
    /// The view has no area; nothing is drawn.
    Nothing,
    /// Every placed pin.
    All,
    /// A fixed share of every bank, stride sampled.
    BankSample {
        /// Share kept per bank, in percent.
        percent: u32,
    },
    /// Everything near the viewport plus a sparse sample of the rest.
    FocusPlusPeriphery {
        /// Logical rectangle drawn in full.
        focus: Rect,
    },
    /// A capped, stride-sampled share of every bank.
    BankCapped {
        /// Pins allowed per bank, before selected pins are added.
        per_bank: usize,
    },
    /// Only pins inside the (margin-expanded) viewport.
    Window {
        /// Logical rectangle drawn.
        window: Rect,
    },
}

/// Output of one culling pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CullResult {
    /// Pins to draw. Selected pins come first, in selection order, followed by
    /// the strategy's picks in a stable order. No slot appears twice.
    pub slots: Vec<PinSlot>,
    /// Tier the pass ran at.
    pub tier: LodTier,
    /// How `slots` was produced.
    pub strategy: CullStrategy,
    /// Selected pins included in `slots`.
    pub selected: usize,
    /// Selected ids not present in the package.
    pub orphaned_selection: usize,
    /// Selected pins that exist but have no valid grid position.
    pub unplaced_selection: usize,
}

impl CullResult {
    fn nothing(tier: LodTier) -> Self {
        Self {
            slots: Vec::new(),
            tier,
            strategy: CullStrategy::Nothing,
            selected: 0,
            orphaned_selection: 0,
            unplaced_selection: 0,
        }
    }

    /// Number of pins to draw.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Chooses which pins to draw for a viewport and zoom tier.
///
/// | Tier | Strategy |
/// |---|---|
/// | `UltraLow` | every placed pin |
/// | `Low` | [`CullConfig::bank_sample_percent`] of each bank |
/// | `Medium` | all pins in the viewport plus [`CullConfig::focus_margin_px`], and [`CullConfig::peripheral_sample_target`] others |
/// | `High` | `max(min_pins_per_bank, high_pin_budget / bank_count)` per bank |
/// | `UltraHigh` | pins in the viewport plus [`CullConfig::detail_margin_px`] |
///
/// In every tier all selected pins that have a position are included, exactly
/// once, ahead of everything else. The output depends only on the package, the
/// viewport state, the tier and the selection contents.
#[derive(Clone, Debug, Default)]
pub struct CullEngine {
    policy: LodPolicy,
    config: CullConfig,
}

impl CullEngine {
    /// Creates an engine with default policy and tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given policy and tunables.
    #[must_use]
    pub fn with_config(policy: LodPolicy, config: CullConfig) -> Self {
        Self { policy, config }
    }

    /// The level-of-detail policy.
    #[must_use]
    pub fn policy(&self) -> &LodPolicy {
        &self.policy
    }

    /// The culling tunables.
    #[must_use]
    pub fn config(&self) -> &CullConfig {
        &self.config
    }

    /// Tier for the viewport's current scale.
    #[must_use]
    pub fn tier_for(&self, viewport: &Viewport2D) -> LodTier {
        self.policy.tier(viewport.zoom())
    }

    /// Runs one culling pass.
    ///
    /// Selected ids that do not resolve in `package` are counted and skipped.
    pub fn cull(
        &self,
        package: &Package,
        viewport: &Viewport2D,
        tier: LodTier,
        selection: &[PinId],
    ) -> CullResult {
        if viewport.is_degenerate() {
            return CullResult::nothing(tier);
        }

        let mut picked = Picked::with_capacity(match tier {
            LodTier::UltraLow | LodTier::Low => package.len(),
            _ => selection.len() + 256,
        });
        let mut orphaned_selection = 0;
        let mut unplaced_selection = 0;
        for id in selection {
            match package.slot_of(id) {
                None => orphaned_selection += 1,
                Some(slot) if package.position(slot).is_none() => unplaced_selection += 1,
                Some(slot) => {
                    picked.push(slot);
                }
            }
        }
        let selected = picked.len();

        let px = viewport.world_units_per_pixel();
        let visible = viewport.visible_world_rect();
        let strategy = match tier {
            LodTier::UltraLow => {
                for (slot, _) in package.placed() {
                    picked.push(slot);
                }
                CullStrategy::All
            }
            LodTier::Low => {
                let percent = self.config.bank_sample_percent.min(100);
                for (_, slots) in package.index().banks() {
                    let placed = placed_in(package, slots);
                    let keep = (placed.len() * percent as usize).div_ceil(100);
                    let already = placed.iter().filter(|s| picked.contains(**s)).count();
                    sample_rest(&mut picked, &placed, keep.saturating_sub(already));
                }
                CullStrategy::BankSample { percent }
            }
            LodTier::Medium => {
                let margin = f64::from(self.config.focus_margin_px) * px;
                let focus = visible.inflate(margin, margin);
                let mut periphery = Vec::new();
                for (slot, pos) in package.placed() {
                    if contains(focus, pos) {
                        picked.push(slot);
                    } else {
                        periphery.push(slot);
                    }
                }
                sample_rest(
                    &mut picked,
                    &periphery,
                    self.config.peripheral_sample_target,
                );
                CullStrategy::FocusPlusPeriphery { focus }
            }
            LodTier::High => {
                let budget = self.policy.high_pin_budget;
                let per_bank = (budget / package.index().bank_count().max(1))
                    .max(self.config.min_pins_per_bank);
                for (_, slots) in package.index().banks() {
                    let placed = placed_in(package, slots);
                    let already = placed.iter().filter(|s| picked.contains(**s)).count();
                    sample_rest(&mut picked, &placed, per_bank.saturating_sub(already));
                }
                CullStrategy::BankCapped { per_bank }
            }
            LodTier::UltraHigh => {
                let margin = f64::from(self.config.detail_margin_px) * px;
                let window = visible.inflate(margin, margin);
                push_window(&mut picked, package, window);
                CullStrategy::Window { window }
            }
        };

        CullResult {
            slots: picked.into_vec(),
            tier,
            strategy,
            selected,
            orphaned_selection,
            unplaced_selection,
        }
    }
}

fn placed_in(package: &Package, slots: &[PinSlot]) -> Vec<PinSlot> {
    slots
        .iter()
        .copied()
        .filter(|&s| package.position(s).is_some())
        .collect()
}

/// Stride samples `target` of the not-yet-picked `candidates`.
fn sample_rest(picked: &mut Picked, candidates: &[PinSlot], target: usize) {
    let rest: Vec<PinSlot> = candidates
        .iter()
        .copied()
        .filter(|&s| !picked.contains(s))
        .collect();
    for slot in stride_sample(&rest, target) {
        picked.push(slot);
    }
}

/// Closed-interval containment, so pins exactly on the window edge count.
fn contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Pushes every placed pin inside `window`.
///
/// Small windows walk the grid cells they cover through the cell index; large
/// ones scan the pin list. Both visit pins in a fixed order.
fn push_window(picked: &mut Picked, package: &Package, window: Rect) {
    let spacing = package.geometry().tile_spacing;
    if window.x1 >= 0.0 && window.y1 >= 0.0 {
        let lo = Point::new(window.x0.max(0.0), window.y0.max(0.0));
        let hi = Point::new(window.x1, window.y1);
        if let (Some((r0, c0)), Some((r1, c1))) =
            (position_to_cell(lo, spacing), position_to_cell(hi, spacing))
        {
            let cells = (u64::from(r1 - r0) + 1) * (u64::from(c1 - c0) + 1);
            if cells <= u64::try_from(package.len()).unwrap_or(u64::MAX) {
                let index = package.index();
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if let Some(slot) = index.find_by_cell(row, col)
                            && package.position(slot).is_some_and(|p| contains(window, p))
                        {
                            picked.push(slot);
                        }
                    }
                }
                return;
            }
        }
    }
    for (slot, pos) in package.placed() {
        if contains(window, pos) {
            picked.push(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use kurbo::Rect;
    use pinplan_grid::{GridAddress, RowScheme};
    use pinplan_pins::{Package, PackageGeometry, Pin, PinId};
    use pinplan_view2d::Viewport2D;

    use super::*;

    fn package(rows: u32, cols: u32) -> Package {
        let scheme = RowScheme::Alphabetic;
        let mut pins = Vec::new();
        for r in 0..rows {
            for c in 1..=cols {
                let row = scheme.index_to_row(r);
                let id = format!("{row}{c}");
                pins.push(
                    Pin::new(id.clone(), id, GridAddress::new(row, c))
                        .with_bank(format!("{}", r / 4)),
                );
            }
        }
        Package::new(
            PackageGeometry {
                tile_spacing: 10.0,
                ..PackageGeometry::default()
            },
            pins,
        )
    }

    fn viewport(package: &Package, scale: f64) -> Viewport2D {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        vp.set_world_bounds(package.content_bounds());
        vp.set_zoom(scale);
        vp
    }

    #[test]
    fn degenerate_viewport_draws_nothing() {
        let pkg = package(4, 4);
        let vp = Viewport2D::new(Rect::ZERO);
        let out = CullEngine::new().cull(&pkg, &vp, LodTier::UltraLow, &[PinId::from("A1")]);
        assert!(out.is_empty());
        assert_eq!(out.strategy, CullStrategy::Nothing);
    }

    #[test]
    fn orphaned_and_unplaced_selection_are_counted() {
        let pkg = package(2, 2).edited(|pins| {
            pins.push(Pin::new("bad", "??", GridAddress::new("a", 1)));
        });
        let vp = viewport(&pkg, 1.0);
        let selection = [PinId::from("gone"), PinId::from("bad"), PinId::from("B2")];
        let out = CullEngine::new().cull(&pkg, &vp, LodTier::UltraHigh, &selection);
        assert_eq!(out.orphaned_selection, 1);
        assert_eq!(out.unplaced_selection, 1);
        assert_eq!(out.selected, 1);
        assert_eq!(out.slots[0], pkg.slot_of(&PinId::from("B2")).unwrap());
    }

    #[test]
    fn bank_sample_keeps_share_of_each_bank() {
        let pkg = package(8, 10);
        let vp = viewport(&pkg, 0.3);
        let out = CullEngine::new().cull(&pkg, &vp, LodTier::Low, &[]);
        // Two banks of 40 pins, 85% of each rounded up.
        assert_eq!(out.len(), 2 * 34);
    }

    #[test]
    fn bank_cap_reserves_room_for_selection() {
        let pkg = package(8, 10);
        let vp = viewport(&pkg, 1.5);
        let engine = CullEngine::with_config(
            LodPolicy {
                high_pin_budget: 20,
                ..LodPolicy::default()
            },
            CullConfig::default(),
        );
        let selection = [PinId::from("A1"), PinId::from("A2"), PinId::from("A3")];
        let out = engine.cull(&pkg, &vp, LodTier::High, &selection);
        assert_eq!(out.strategy, CullStrategy::BankCapped { per_bank: 10 });
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn detailed_tiers_report_their_margin_rects() {
        let pkg = package(30, 30);
        let vp = viewport(&pkg, 4.0);
        let engine = CullEngine::new();
        let visible = vp.visible_world_rect();
        let px = vp.world_units_per_pixel();

        let out = engine.cull(&pkg, &vp, LodTier::UltraHigh, &[]);
        let margin = 100.0 * px;
        assert_eq!(
            out.strategy,
            CullStrategy::Window {
                window: visible.inflate(margin, margin)
            }
        );

        let out = engine.cull(&pkg, &vp, LodTier::Medium, &[]);
        let margin = 300.0 * px;
        assert_eq!(
            out.strategy,
            CullStrategy::FocusPlusPeriphery {
                focus: visible.inflate(margin, margin)
            }
        );
        assert_ne!(out.strategy, CullStrategy::All);
    }

    #[test]
    fn window_walk_matches_linear_scan() {
        let pkg = package(30, 30);
        let mut vp = viewport(&pkg, 4.0);
        vp.set_pan(kurbo::Vec2::new(300.0, 200.0));
        let out = CullEngine::new().cull(&pkg, &vp, LodTier::UltraHigh, &[]);
        let CullStrategy::Window { window } = out.strategy else {
            panic!("expected a window strategy");
        };
        let mut walked = out.slots.clone();
        walked.sort_unstable();
        let scanned: Vec<_> = pkg
            .placed()
            .filter(|(_, p)| contains(window, *p))
            .map(|(s, _)| s)
            .collect();
        assert!(!scanned.is_empty());
        assert!(scanned.len() < pkg.len());
        assert_eq!(walked, scanned);
    }
}
