// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Vec2};
use pinplan_cull::{CullEngine, LodDetails, LodTier};
use pinplan_event_state::{
    CanvasEvent, CanvasIntent, GestureState, Intents, Modifiers, PointerTarget,
};
use pinplan_grid::position_to_cell;
use pinplan_pins::{
    BankKey, DiffPairResolver, NamingResolver, Package, PackageId, PinId, PinIssue, PinSlot, Polarity,
};
use pinplan_selection::{Selection, SelectionSink};
use pinplan_view2d::{ViewState, Viewport2D};

use crate::config::CanvasConfig;
use crate::frame::{BankOutline, Connector, FramePlan, PairRole, PinVisual};
use crate::render::{PinRenderer, replay};

/// Inputs a [`FramePlan`] depends on, besides the selected ids.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameKey {
    package: PackageId,
    view: ViewState,
    view_rect: Rect,
}

/// The pin canvas: one package, one viewport, one gesture machine.
///
/// The canvas owns the view (pan, zoom, orientation) and mutates it in response
/// to input. It never owns the selection: input handlers return
/// [`CanvasIntent`]s and the host applies [`CanvasIntent::Select`] to its own
/// store, for example with [`apply_selection_intents`]. Frame building reads
/// the selection back.
///
/// `R` resolves differential partners for highlighting and connectors.
#[derive(Debug)]
pub struct PinCanvas<R = NamingResolver> {
    config: CanvasConfig,
    package: Package,
    viewport: Viewport2D,
    gestures: GestureState<PinId>,
    engine: CullEngine,
    resolver: R,
    ordering: Vec<PinId>,
    custom_ordering: bool,
    fit_pending: bool,
    bank_bounds: Vec<(BankKey, Rect)>,
    plan_key: Option<FrameKey>,
    plan_selection: Vec<PinId>,
    plan: FramePlan,
    frames_built: u64,
}

impl PinCanvas {
    /// Creates an empty canvas of the given size with default tunables.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self::with_config(view_rect, CanvasConfig::default())
    }

    /// Creates an empty canvas with the given tunables.
    #[must_use]
    pub fn with_config(view_rect: Rect, config: CanvasConfig) -> Self {
        Self::with_resolver(view_rect, config, NamingResolver)
    }
}

impl<R: DiffPairResolver> PinCanvas<R> {
    /// Creates an empty canvas using `resolver` for differential pairs.
    #[must_use]
    pub fn with_resolver(view_rect: Rect, config: CanvasConfig, resolver: R) -> Self {
        Self {
            config,
            package: Package::empty(),
            viewport: Viewport2D::with_config(view_rect, config.viewport),
            gestures: GestureState::with_config(config.gesture),
            engine: CullEngine::with_config(config.lod, config.cull),
            resolver,
            ordering: Vec::new(),
            custom_ordering: false,
            fit_pending: false,
            bank_bounds: Vec::new(),
            plan_key: None,
            plan_selection: Vec::new(),
            plan: FramePlan::empty(LodTier::UltraLow),
            frames_built: 0,
        }
    }

    /// The active tunables.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The loaded package.
    #[must_use]
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// The differential pair resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Replaces the package and fits it into view.
    ///
    /// Any press in progress is abandoned. The range anchor survives only if
    /// its pin still exists. Pins with an invalid grid address stay listed but
    /// are never drawn or hit. Call [`Self::prune_selection`] afterwards so the
    /// host selection drops ids the new package does not have.
    pub fn load_package(&mut self, package: Package) {
        #[cfg(feature = "tracing")]
        for issue in package.issues() {
            if let PinIssue::InvalidGridAddress { slot, error } = issue
                && let Some(pin) = package.pin(*slot)
            {
                tracing::warn!(
                    pin = %pin.id,
                    pin_number = %pin.pin_number,
                    %error,
                    "pin excluded from the canvas: invalid grid address"
                );
            }
        }

        let anchor = self
            .gestures
            .anchor()
            .filter(|id| package.contains(id))
            .cloned();
        self.gestures.reset();
        self.gestures.set_anchor(anchor);

        self.bank_bounds = bank_bounds(&package);
        if !self.custom_ordering {
            self.ordering = package.pins().iter().map(|p| p.id.clone()).collect();
        }
        self.viewport.set_world_bounds(package.content_bounds());
        self.fit_pending = self.viewport.is_degenerate();
        self.viewport.fit_world();
        self.package = package;
        self.plan_key = None;
    }

    /// Drops every selected id the loaded package does not contain.
    pub fn prune_selection(&self, selection: &mut Selection<PinId>) {
        selection.retain(|id| self.package.contains(id));
    }

    /// Number of pins with an unusable grid address in the loaded package.
    #[must_use]
    pub fn invalid_pin_count(&self) -> usize {
        self.package
            .issues()
            .iter()
            .filter(|i| matches!(i, PinIssue::InvalidGridAddress { .. }))
            .count()
    }

    /// Resizes the canvas. The pan is re-clamped; the zoom is kept.
    ///
    /// A package loaded while the canvas had no area is fitted on the first
    /// resize that gives it one.
    pub fn resize(&mut self, view_rect: Rect) {
        self.viewport.set_view_rect(view_rect);
        if self.fit_pending && !self.viewport.is_degenerate() {
            self.fit_pending = false;
            self.viewport.fit_world();
        }
    }

    /// Sets the order Shift-click ranges walk, usually the host's table order.
    ///
    /// It stays in effect across package reloads until
    /// [`Self::clear_pin_ordering`].
    pub fn set_pin_ordering(&mut self, ordering: Vec<PinId>) {
        self.ordering = ordering;
        self.custom_ordering = true;
    }

    /// Goes back to package order for Shift-click ranges.
    pub fn clear_pin_ordering(&mut self) {
        self.custom_ordering = false;
        self.ordering = self.package.pins().iter().map(|p| p.id.clone()).collect();
    }

    /// The order Shift-click ranges walk.
    #[must_use]
    pub fn pin_ordering(&self) -> &[PinId] {
        &self.ordering
    }

    /// The pin under a canvas point, if any.
    ///
    /// The point is mapped to the nearest grid cell and accepted when it lies
    /// within [`CanvasConfig::pin_radius`] tile spacings of that pin's center.
    #[must_use]
    pub fn hit_test(&self, pos: Point) -> Option<PinSlot> {
        if self.viewport.is_degenerate() || !pos.is_finite() {
            return None;
        }
        let world = self.viewport.view_to_world_point(pos);
        let spacing = self.package.geometry().tile_spacing;
        let (row, col) = position_to_cell(world, spacing)?;
        let slot = self.package.index().find_by_cell(row, col)?;
        let center = self.package.position(slot)?;
        let radius = spacing * self.config.pin_radius;
        (world.distance_squared(center) <= radius * radius).then_some(slot)
    }

    /// Id of the pin under a canvas point.
    #[must_use]
    pub fn pin_at(&self, pos: Point) -> Option<PinId> {
        let slot = self.hit_test(pos)?;
        self.package.pin(slot).map(|p| p.id.clone())
    }

    fn target_at(&self, pos: Point) -> PointerTarget<PinId> {
        self.pin_at(pos).map_or(PointerTarget::Stage, PointerTarget::Pin)
    }

    /// A button was pressed at `pos`.
    pub fn pointer_down(&mut self, pos: Point, time_ms: u64, modifiers: Modifiers) -> Intents<PinId> {
        let target = self.target_at(pos);
        self.handle_event(CanvasEvent::Down {
            pos,
            time_ms,
            target,
            modifiers,
        })
    }

    /// The pointer moved to `pos`.
    pub fn pointer_move(&mut self, pos: Point, time_ms: u64) -> Intents<PinId> {
        self.handle_event(CanvasEvent::Move { pos, time_ms })
    }

    /// The button was released at `pos`.
    pub fn pointer_up(&mut self, pos: Point, time_ms: u64) -> Intents<PinId> {
        self.handle_event(CanvasEvent::Up { pos, time_ms })
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) -> Intents<PinId> {
        self.handle_event(CanvasEvent::Leave)
    }

    /// The host recognized a double click at `pos`.
    pub fn double_click(&mut self, pos: Point) -> Intents<PinId> {
        let target = self.target_at(pos);
        self.handle_event(CanvasEvent::DoubleClick { target })
    }

    /// A wheel or trackpad scroll at `pos`.
    pub fn wheel(&mut self, pos: Point, delta: Vec2, modifiers: Modifiers) -> Intents<PinId> {
        self.handle_event(CanvasEvent::Wheel {
            pos,
            delta,
            modifiers,
        })
    }

    /// A key press while the canvas has focus.
    pub fn key(&mut self, key: char, modifiers: Modifiers) -> Intents<PinId> {
        self.handle_event(CanvasEvent::Key { key, modifiers })
    }

    /// Runs an event through the gesture machine and applies the view intents.
    ///
    /// Pan, zoom and reset intents have already taken effect on the viewport
    /// when this returns; they are still included in the result so the host can
    /// request a redraw. Selection intents are the host's to apply.
    pub fn handle_event(&mut self, event: CanvasEvent<PinId>) -> Intents<PinId> {
        let intents = self.gestures.handle(event, &self.ordering);
        for intent in &intents {
            #[cfg(feature = "tracing")]
            tracing::trace!(?intent, "canvas intent");
            match intent {
                CanvasIntent::PanDelta(delta) => self.viewport.pan_by_view(*delta),
                CanvasIntent::Zoom { anchor, factor } => {
                    self.viewport.zoom_about_view_point(*anchor, *factor);
                }
                CanvasIntent::ResetView => self.reset_view(),
                _ => {}
            }
        }
        intents
    }

    /// Returns to zero pan and scale `1.0`, centered on the package.
    ///
    /// Rotation and mirroring are kept.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Fits the whole package into view, as on load.
    pub fn fit_to_package(&mut self) {
        self.viewport.fit_world();
    }

    /// Returns `true` while a press has turned into a pan.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.gestures.is_panning()
    }

    /// The pin Shift-click ranges start from.
    #[must_use]
    pub fn range_anchor(&self) -> Option<&PinId> {
        self.gestures.anchor()
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport2D {
        &self.viewport
    }

    /// Mutable access to the viewport, for rotation, mirroring and fitting.
    pub fn viewport_mut(&mut self) -> &mut Viewport2D {
        &mut self.viewport
    }

    /// Snapshot of the view for saving.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.viewport.state()
    }

    /// Restores a saved view snapshot.
    pub fn restore_view(&mut self, state: ViewState) {
        self.viewport.restore(state);
    }

    /// Tier the current zoom maps to.
    #[must_use]
    pub fn tier(&self) -> LodTier {
        self.engine.tier_for(&self.viewport)
    }

    /// Detail decisions for the current zoom.
    #[must_use]
    pub fn lod(&self) -> LodDetails {
        self.engine
            .policy()
            .details(self.viewport.zoom(), self.package.len())
    }

    /// How many frame plans have been computed (cache misses).
    #[must_use]
    pub fn frames_built(&self) -> u64 {
        self.frames_built
    }

    /// The plan for the current view and `selection`.
    ///
    /// Plans are cached: the same package, view, canvas size and selected ids
    /// return the previous plan without culling again. Selected ids are
    /// compared by value rather than by revision, since revisions are only
    /// meaningful within one store.
    pub fn frame(&mut self, selection: &Selection<PinId>) -> &FramePlan {
        let key = FrameKey {
            package: self.package.id(),
            view: self.viewport.state(),
            view_rect: self.viewport.view_rect(),
        };
        if self.plan_key != Some(key) || self.plan_selection.as_slice() != selection.items() {
            self.plan = self.build_frame(selection);
            self.plan_key = Some(key);
            self.plan_selection.clear();
            self.plan_selection.extend_from_slice(selection.items());
            self.frames_built += 1;
        }
        &self.plan
    }

    /// Builds the current frame and replays it into `renderer`.
    pub fn render<T: PinRenderer + ?Sized>(&mut self, selection: &Selection<PinId>, renderer: &mut T) {
        self.frame(selection);
        let package = &self.package;
        replay(&self.plan, |v| package.pin(v.slot), renderer);
    }

    fn build_frame(&self, selection: &Selection<PinId>) -> FramePlan {
        let details = self.lod();
        if self.viewport.is_degenerate() {
            #[cfg(feature = "tracing")]
            tracing::debug!(view = ?self.viewport.view_rect(), "degenerate viewport, nothing to draw");
            return FramePlan::empty(details.tier);
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "cull_pass",
            tier = %details.tier,
            pins = self.package.len(),
            selected = selection.len(),
        )
        .entered();

        let culled = self
            .engine
            .cull(&self.package, &self.viewport, details.tier, selection.items());

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                strategy = ?culled.strategy,
                drawn = culled.len(),
                selected = culled.selected,
                unplaced = culled.unplaced_selection,
                "culled"
            );
            if culled.orphaned_selection > 0 {
                tracing::debug!(
                    orphaned = culled.orphaned_selection,
                    "selection refers to pins not in the package"
                );
            }
        }

        let selected: HashSet<&PinId> = selection.iter().collect();
        let flags = details.flags;
        let want_pairs = flags.should_render_differential_connectors() || !selection.is_empty();

        let mut pins = Vec::with_capacity(culled.len());
        let mut drawn: HashMap<PinSlot, Point> = HashMap::with_capacity(culled.len());
        let mut partners: Vec<(PinSlot, PinSlot, bool)> = Vec::new();
        for &slot in &culled.slots {
            let (Some(pin), Some(world)) = (self.package.pin(slot), self.package.position(slot))
            else {
                continue;
            };
            let screen = self.viewport.world_to_view_point(world);
            let is_selected = selected.contains(&pin.id);
            let mut pair = PairRole::None;
            if want_pairs && let Some(polarity) = self.resolver.polarity_of(pin, &self.package) {
                pair = PairRole::Leg(polarity);
                if let Some(partner) = self.resolver.find_partner(pin, &self.package)
                    && let Some(partner_slot) = self.package.slot_of(&partner.id)
                {
                    let partner_selected = selected.contains(&partner.id);
                    if partner_selected {
                        pair = PairRole::PartnerOfSelected(polarity);
                    }
                    partners.push((slot, partner_slot, is_selected || partner_selected));
                }
            }
            drawn.insert(slot, screen);
            pins.push(PinVisual {
                slot,
                id: pin.id.clone(),
                screen,
                selected: is_selected,
                pair,
            });
        }

        let connectors = if flags.should_render_differential_connectors() {
            self.connectors(&partners, &drawn)
        } else {
            Vec::new()
        };

        let banks = if flags.should_render_bank_boundaries() {
            self.bank_bounds
                .iter()
                .map(|(bank, rect)| BankOutline {
                    bank: bank.clone(),
                    screen: self.viewport.world_to_view_rect(*rect),
                })
                .collect()
        } else {
            Vec::new()
        };

        FramePlan {
            tier: culled.tier,
            flags,
            strategy: culled.strategy,
            transform: self.viewport.transform(),
            pin_radius: self.package.geometry().tile_spacing
                * self.config.pin_radius
                * self.viewport.zoom(),
            pins,
            connectors,
            banks,
            orphaned_selection: culled.orphaned_selection,
        }
    }

    /// Connector segments between resolved pairs.
    ///
    /// A pair is joined when both legs are drawn, or when either leg is
    /// selected and the other one lands inside the canvas. Each pair appears
    /// once, positive leg first.
    fn connectors(
        &self,
        partners: &[(PinSlot, PinSlot, bool)],
        drawn: &HashMap<PinSlot, Point>,
    ) -> Vec<Connector> {
        let view = self.viewport.view_rect();
        let mut seen: HashSet<(PinSlot, PinSlot)> = HashSet::new();
        let mut out = Vec::new();
        for &(a, b, any_selected) in partners {
            let key = if a <= b { (a, b) } else { (b, a) };
            if seen.contains(&key) {
                continue;
            }
            let Some(&a_screen) = drawn.get(&a) else {
                continue;
            };
            let b_screen = match drawn.get(&b) {
                Some(&p) => p,
                None if any_selected => {
                    let Some(world) = self.package.position(b) else {
                        continue;
                    };
                    let p = self.viewport.world_to_view_point(world);
                    if !contains_closed(view, p) {
                        continue;
                    }
                    p
                }
                None => continue,
            };
            seen.insert(key);
            let a_negative = self
                .package
                .pin(a)
                .and_then(|p| self.resolver.polarity_of(p, &self.package))
                == Some(Polarity::Negative);
            out.push(if a_negative {
                Connector {
                    from: b,
                    to: a,
                    from_screen: b_screen,
                    to_screen: a_screen,
                }
            } else {
                Connector {
                    from: a,
                    to: b,
                    from_screen: a_screen,
                    to_screen: b_screen,
                }
            });
        }
        out
    }
}

/// Applies every [`CanvasIntent::Select`] in `intents` to `sink`.
pub fn apply_selection_intents<S: SelectionSink<PinId> + ?Sized>(intents: &Intents<PinId>, sink: &mut S) {
    for intent in intents {
        if let CanvasIntent::Select(select) = intent {
            sink.apply(select.clone());
        }
    }
}

fn contains_closed(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// World-space bounding box of each bank's placed pins, in bank order.
fn bank_bounds(package: &Package) -> Vec<(BankKey, Rect)> {
    package
        .index()
        .banks()
        .filter_map(|(bank, slots)| {
            let mut points = slots.iter().filter_map(|&s| package.position(s));
            let first = points.next()?;
            let rect = points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p));
            Some((bank.clone(), rect))
        })
        .collect()
}
