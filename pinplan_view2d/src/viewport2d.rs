// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::modes::{ClampMode, FitMode, Rotation};
use crate::{ViewState, ViewportConfig};

/// 2D viewport over the logical package plane.
///
/// `Viewport2D` tracks a rectangular region in device/view space and a
/// transform mapping logical (world) coordinates into it:
///
/// ```text
/// view = view_center + pan + zoom * mirror(rotate(world - pivot))
/// ```
///
/// Rotation and mirroring happen in unscaled logical space about the pivot,
/// so pan and zoom behave the same in every orientation. The pivot is the
/// center of the world bounds (or the origin when none are set); at zero pan
/// the pivot sits at the center of the view rect.
///
/// It can be used to:
/// - Convert points and rectangles between world and view coordinates.
/// - Pan and zoom around a chosen anchor point.
/// - Fit the entire world bounds (or a sub‑rect) into the view.
///
/// Non-finite inputs are ignored rather than stored, so a transient zero-sized
/// or NaN-producing layout never corrupts the pan/zoom state.
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_rect: Rect,
    world_bounds: Option<Rect>,
    pivot: Point,
    zoom: f64,
    pan: Vec2,
    rotation: Rotation,
    mirrored: bool,
    min_zoom: f64,
    max_zoom: f64,
    overscroll: f64,
    fit_padding: f64,
    clamp_mode: ClampMode,
    fit_mode: FitMode,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl Viewport2D {
    /// Creates a new viewport covering `view_rect` with the default
    /// [`ViewportConfig`].
    ///
    /// - Initial zoom is `1.0`, pan is zero, orientation is unrotated.
    /// - Zoom is clamped to `[0.1, 5.0]`.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self::with_config(view_rect, ViewportConfig::default())
    }

    /// Creates a new viewport covering `view_rect` with the given tunables.
    #[must_use]
    pub fn with_config(view_rect: Rect, config: ViewportConfig) -> Self {
        let mut vp = Self {
            view_rect: if view_rect.is_finite() {
                view_rect
            } else {
                Rect::ZERO
            },
            world_bounds: None,
            pivot: Point::ZERO,
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotation: Rotation::Deg0,
            mirrored: false,
            min_zoom: 0.1,
            max_zoom: 5.0,
            overscroll: 0.5,
            fit_padding: 0.0,
            clamp_mode: ClampMode::default(),
            fit_mode: FitMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        vp.set_zoom_limits(config.min_scale, config.max_scale);
        vp.set_overscroll(config.overscroll);
        if config.fit_padding.is_finite() && config.fit_padding >= 0.0 {
            vp.fit_padding = config.fit_padding;
        }
        vp.zoom = 1.0_f64.clamp(vp.min_zoom, vp.max_zoom);
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device coordinates.
    ///
    /// This does not change zoom or pan. Non-finite rects are ignored; empty or
    /// negative ones are stored and make the viewport
    /// [degenerate](Self::is_degenerate).
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect || !rect.is_finite() {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Returns `true` when the view rect has no area, e.g. before layout has
    /// settled. Callers should render nothing in that state.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.view_rect.width() > 0.0 && self.view_rect.height() > 0.0)
    }

    /// Sets optional world bounds used for clamping, fitting and as the
    /// rotation pivot.
    pub fn set_world_bounds(&mut self, bounds: Option<Rect>) {
        if self.world_bounds == bounds || bounds.is_some_and(|b| !b.is_finite()) {
            return;
        }
        self.world_bounds = bounds.map(|b| b.abs());
        self.pivot = self.world_bounds.map_or(Point::ZERO, |b| b.center());
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Returns the current world bounds, if any.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Rect> {
        self.world_bounds
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the `(min, max)` zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range. Non-finite or non-positive
    /// limits are ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        if !(min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && max_zoom > 0.0) {
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the clamp mode for panning relative to world bounds.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp_to_bounds();
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the overscroll margin as a fraction of the view size.
    pub fn set_overscroll(&mut self, fraction: f64) {
        if fraction.is_finite() && fraction >= 0.0 {
            self.overscroll = fraction;
            self.clamp_to_bounds();
        }
    }

    /// Sets how fitted content should be positioned inside the view rect.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Returns the current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Sets the zoom factor, saturating at the zoom limits. Non-finite or
    /// non-positive values are ignored.
    ///
    /// The content center stays where it is on screen, at the view center
    /// offset by the pan. Use [`Self::zoom_about_view_point`] to hold another
    /// point fixed.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !(zoom.is_finite() && zoom > 0.0) {
            return;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Returns the current pan offset in view pixels.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Sets the pan offset, applying [`Self::clamp_pan`].
    pub fn set_pan(&mut self, pan: Vec2) {
        if !pan.is_finite() {
            return;
        }
        let clamped = self.clamp_pan(pan);
        if clamped == self.pan {
            return;
        }
        self.pan = clamped;
        self.rebuild_transforms();
    }

    /// Pans the view by a delta in view/device space.
    ///
    /// This adjusts the pan offset and then applies clamping relative to world
    /// bounds if configured.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        self.set_pan(self.pan + delta);
    }

    /// Returns the current orientation.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Sets the orientation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.rebuild_transforms();
            self.clamp_to_bounds();
        }
    }

    /// Rotates a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.set_rotation(self.rotation.clockwise());
    }

    /// Rotates a quarter turn counter-clockwise.
    pub fn rotate_counter_clockwise(&mut self) {
        self.set_rotation(self.rotation.counter_clockwise());
    }

    /// Returns to the unrotated orientation.
    pub fn reset_rotation(&mut self) {
        self.set_rotation(Rotation::Deg0);
    }

    /// Returns `true` when viewing the package from the bottom.
    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Switches between top and bottom view.
    pub fn set_mirrored(&mut self, mirrored: bool) {
        if self.mirrored != mirrored {
            self.mirrored = mirrored;
            self.rebuild_transforms();
            self.clamp_to_bounds();
        }
    }

    /// Toggles between top and bottom view.
    pub fn toggle_mirror(&mut self) {
        self.set_mirrored(!self.mirrored);
    }

    /// Returns to the top view.
    pub fn reset_mirror(&mut self) {
        self.set_mirrored(false);
    }

    /// Resets pan to zero and zoom to `1.0` (saturated at the zoom limits).
    ///
    /// Rotation and mirroring are preserved; see [`Self::reset_rotation`] and
    /// [`Self::reset_mirror`].
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.rebuild_transforms();
    }

    /// Zooms around a given anchor point in view/device coordinates.
    ///
    /// The world point under `anchor_view` stays under it. Pan is not clamped
    /// here, so the anchor invariant holds even near the content edges.
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0 && anchor_view.is_finite()) {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let old_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let new_anchor_view = self.world_to_view_point(old_world);
        self.pan += anchor_view - new_anchor_view;
        self.rebuild_transforms();
    }

    /// Fits the entire world bounds into the view, preserving aspect ratio.
    ///
    /// If no world bounds are set, this is a no‑op.
    pub fn fit_world(&mut self) {
        if let Some(bounds) = self.world_bounds {
            self.fit_rect(bounds);
        }
    }

    /// Fits the given world‑space rectangle into the view in the current
    /// orientation, preserving aspect ratio.
    ///
    /// Degenerate rect sides do not constrain the zoom; if neither side does,
    /// the zoom is kept and the rect is only positioned.
    pub fn fit_rect(&mut self, rect: Rect) {
        if !rect.is_finite() || self.is_degenerate() {
            return;
        }
        let oriented = transform_bbox(self.orientation(), rect.abs());
        let pad = 1.0 + 2.0 * self.fit_padding;
        let axis_zoom = |view: f64, world: f64| {
            if world > 0.0 {
                view / (world * pad)
            } else {
                f64::INFINITY
            }
        };
        let view_size = self.view_rect.size();
        let target = axis_zoom(view_size.width, oriented.width())
            .min(axis_zoom(view_size.height, oriented.height()));
        if target.is_finite() {
            self.zoom = target.clamp(self.min_zoom, self.max_zoom);
        }

        // Place the fitted content with zero pan first, then move it where the
        // fit mode wants it.
        self.pan = Vec2::ZERO;
        self.rebuild_transforms();
        let placed = self.world_to_view_rect(rect);
        self.pan = match self.fit_mode {
            FitMode::Center => self.view_rect.center() - placed.center(),
            FitMode::AlignMin => self.view_rect.origin() - placed.origin(),
        };

        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Centers the view on the given world‑space point.
    pub fn center_on(&mut self, world_pt: Point) {
        if !world_pt.is_finite() {
            return;
        }
        let view_center = self.view_rect.center();
        let world_in_view = self.world_to_view_point(world_pt);
        let delta = view_center - world_in_view;
        self.pan_by_view(delta);
    }

    /// Returns the visible world‑space rectangle.
    ///
    /// Under rotation this is the axis-aligned bounding box of the view
    /// corners, which for quarter turns is exact.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// The full world → view transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.world_to_view
    }

    /// Converts a world‑space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view/device‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a view-space displacement (e.g. a drag delta) into a world
    /// displacement, honoring rotation and mirroring.
    #[must_use]
    pub fn view_to_world_delta(&self, delta: Vec2) -> Vec2 {
        self.view_to_world * delta.to_point() - self.view_to_world * Point::ZERO
    }

    /// Converts a world‑space rectangle into view/device coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        transform_bbox(self.world_to_view, rect)
    }

    /// Converts a view/device‑space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        transform_bbox(self.view_to_world, rect)
    }

    /// Returns the current world‑units‑per‑pixel ratio.
    ///
    /// This is `1.0 / zoom` and is what converts a margin expressed in screen
    /// pixels into logical units.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Snapshot of the user-controlled values.
    #[must_use]
    pub fn state(&self) -> ViewState {
        ViewState {
            pan_x: self.pan.x,
            pan_y: self.pan.y,
            scale: self.zoom,
            rotation: self.rotation,
            mirrored: self.mirrored,
        }
    }

    /// Restores a snapshot taken with [`Self::state`].
    ///
    /// The scale saturates at the zoom limits. A non-finite pan or scale leaves
    /// the corresponding current value untouched. Pan is restored as-is,
    /// without clamping.
    pub fn restore(&mut self, state: ViewState) {
        let pan = Vec2::new(state.pan_x, state.pan_y);
        if pan.is_finite() {
            self.pan = pan;
        }
        if state.scale.is_finite() && state.scale > 0.0 {
            self.zoom = state.scale.clamp(self.min_zoom, self.max_zoom);
        }
        self.rotation = state.rotation;
        self.mirrored = state.mirrored;
        self.rebuild_transforms();
    }

    /// Restricts a candidate pan so the content stays reachable.
    ///
    /// Returns `candidate` unchanged when clamping is disabled, no world bounds
    /// are set, or the viewport is degenerate. See [`ClampMode::Overscroll`]
    /// for the rule applied per axis.
    #[must_use]
    pub fn clamp_pan(&self, candidate: Vec2) -> Vec2 {
        if !candidate.is_finite() {
            return self.pan;
        }
        if self.clamp_mode == ClampMode::None || self.is_degenerate() {
            return candidate;
        }
        let Some(bounds) = self.world_bounds else {
            return candidate;
        };
        // Pan is a pure translation applied last, so the content rect at any
        // pan is the rect at zero pan shifted by that pan.
        let at_zero = self.world_to_view_rect(bounds) - self.pan;
        let view = self.view_rect;
        Vec2::new(
            clamp_axis(candidate.x, at_zero.x0, at_zero.x1, view.x0, view.x1, self.overscroll),
            clamp_axis(candidate.y, at_zero.y0, at_zero.y1, view.y0, view.y1, self.overscroll),
        )
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> Viewport2DDebugInfo {
        Viewport2DDebugInfo {
            view_rect: self.view_rect,
            world_bounds: self.world_bounds,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            rotation: self.rotation,
            mirrored: self.mirrored,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            clamp_mode: self.clamp_mode,
            fit_mode: self.fit_mode,
        }
    }

    fn orientation(&self) -> Affine {
        if self.mirrored {
            Affine::FLIP_X * self.rotation.affine()
        } else {
            self.rotation.affine()
        }
    }

    fn rebuild_transforms(&mut self) {
        let anchor = self.view_rect.center().to_vec2() + self.pan;
        // World → view: move the pivot to the origin, orient, scale, then
        // translate to the view center plus pan.
        self.world_to_view = Affine::translate(anchor)
            * Affine::scale(self.zoom)
            * self.orientation()
            * Affine::translate(-self.pivot.to_vec2());
        self.view_to_world = self.world_to_view.inverse();
    }

    fn clamp_to_bounds(&mut self) {
        let clamped = self.clamp_pan(self.pan);
        if clamped != self.pan {
            self.pan = clamped;
            self.rebuild_transforms();
        }
    }
}

/// Clamps one axis of the pan offset.
///
/// `content_*` is the content extent at zero pan, `view_*` the view extent.
fn clamp_axis(
    pan: f64,
    content_min: f64,
    content_max: f64,
    view_min: f64,
    view_max: f64,
    overscroll: f64,
) -> f64 {
    let content = content_max - content_min;
    let view = view_max - view_min;
    let margin = overscroll * view;
    // Bounds on where the content's minimum edge may land; `lo <= hi` holds in
    // both branches.
    let (lo, hi) = if content <= view {
        let slack = margin.min(content * 0.5);
        (view_min - slack, view_max - content + slack)
    } else {
        (view_max - content - margin, view_min + margin)
    };
    (content_min + pan).max(lo).min(hi) - content_min
}

fn transform_bbox(affine: Affine, rect: Rect) -> Rect {
    // Transform the four corners and take their bounding box. This is exact for
    // the quarter-turn orientations used here.
    let p0 = affine * rect.origin();
    let p1 = affine * Point::new(rect.max_x(), rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.max_y());
    let p3 = affine * Point::new(rect.max_x(), rect.max_y());
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Debug snapshot of a [`Viewport2D`] state.
#[derive(Clone, Copy, Debug)]
pub struct Viewport2DDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// Optional world bounds for clamping and fitting.
    pub world_bounds: Option<Rect>,
    /// World‑space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in view coordinates.
    pub pan: Vec2,
    /// Current orientation.
    pub rotation: Rotation,
    /// Bottom view flag.
    pub mirrored: bool,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Clamp mode for panning relative to bounds.
    pub clamp_mode: ClampMode,
    /// Fit mode used by [`Viewport2D::fit_world`] / [`Viewport2D::fit_rect`].
    pub fit_mode: FitMode,
}
