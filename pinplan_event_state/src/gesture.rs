// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas gesture machine: turns [`CanvasEvent`]s into [`CanvasIntent`]s.
//!
//! A press does not commit to anything until it is released or moves. It is
//! promoted to a pan drag once it travels farther than
//! [`GestureConfig::drag_distance`] pixels or lasts longer than
//! [`GestureConfig::drag_time_ms`]. A press released before either threshold is
//! a click:
//!
//! | Press on | Modifiers | Intents |
//! |---|---|---|
//! | pin | none | `PinClicked`, `Select(Replace)` |
//! | pin | Ctrl/Cmd | `PinClicked`, `Select(Toggle)` |
//! | pin | Shift, with anchor | `PinClicked`, `Select(Range)` |
//! | pin | Shift, no anchor | `PinClicked`, `Select(Replace)` |
//! | stage | any | `StageClicked`, `Select(Clear)` |
//!
//! Plain and Ctrl/Cmd clicks move the range anchor to the clicked pin;
//! Shift-clicks leave it where it is.
//!
//! ```
//! use kurbo::Point;
//! use pinplan_event_state::{CanvasEvent, CanvasIntent, GestureState, Modifiers, PointerTarget};
//!
//! let order = ["a", "b"];
//! let mut gestures = GestureState::new();
//! gestures.handle(
//!     CanvasEvent::Down {
//!         pos: Point::new(10.0, 10.0),
//!         time_ms: 0,
//!         target: PointerTarget::Pin("a"),
//!         modifiers: Modifiers::empty(),
//!     },
//!     &order,
//! );
//! let intents = gestures.handle(CanvasEvent::Up { pos: Point::new(11.0, 10.0), time_ms: 90 }, &order);
//! assert!(matches!(intents[0], CanvasIntent::PinClicked { pin: "a", .. }));
//! assert_eq!(gestures.anchor(), Some(&"a"));
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use pinplan_selection::SelectionIntent;
use smallvec::SmallVec;

use crate::drag::DragState;
use crate::event::{CanvasEvent, CanvasIntent, Modifiers, PointerTarget};

/// Intents produced by one event. Almost always zero to two.
pub type Intents<K> = SmallVec<[CanvasIntent<K>; 2]>;

/// Thresholds and steps for pointer and keyboard handling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// A press held longer than this is a drag, not a click.
    pub drag_time_ms: u64,
    /// A press moved farther than this (in pixels) is a drag, not a click.
    pub drag_distance: f64,
    /// Scale multiplier per wheel notch with Ctrl/Cmd held.
    pub wheel_zoom_step: f64,
    /// Multiplier from wheel delta to pan pixels.
    pub wheel_pan_scale: f64,
    /// Key that resets the view. Matched case-insensitively.
    pub reset_key: char,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_time_ms: 200,
            drag_distance: 8.0,
            wheel_zoom_step: 1.1,
            wheel_pan_scale: 1.0,
            reset_key: 'r',
        }
    }
}

#[derive(Clone, Debug)]
enum Phase<K> {
    Idle,
    Pressed {
        target: PointerTarget<K>,
        modifiers: Modifiers,
    },
    Panning,
}

/// Pointer gesture machine for the pin canvas.
///
/// `K` is the pin key (normally `PinId`). The machine remembers the last pin
/// selected by a plain or Ctrl/Cmd click as the range anchor.
#[derive(Clone, Debug)]
pub struct GestureState<K> {
    config: GestureConfig,
    phase: Phase<K>,
    drag: DragState,
    anchor: Option<K>,
}

impl<K> Default for GestureState<K> {
    fn default() -> Self {
        Self::with_config(GestureConfig::default())
    }
}

impl<K> GestureState<K> {
    /// Creates a machine with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a machine with the given thresholds.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            drag: DragState::default(),
            anchor: None,
        }
    }

    /// The active thresholds.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the thresholds. An in-flight press keeps going under the new
    /// ones.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// The pin Shift-click ranges extend from.
    #[must_use]
    pub fn anchor(&self) -> Option<&K> {
        self.anchor.as_ref()
    }

    /// Overrides the range anchor.
    pub fn set_anchor(&mut self, anchor: Option<K>) {
        self.anchor = anchor;
    }

    /// Returns `true` while a press has been promoted to a pan.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.phase, Phase::Panning)
    }

    /// Returns `true` between a press and its release (or cancellation).
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Abandons any press in progress and forgets the anchor. Used when the
    /// pin collection is replaced.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.drag.end();
        self.anchor = None;
    }
}

impl<K: Clone + PartialEq> GestureState<K> {
    /// Feeds one event through the machine.
    ///
    /// `ordering` is the current pin ordering used to resolve Shift-click
    /// ranges; it is only consulted for that.
    pub fn handle(&mut self, event: CanvasEvent<K>, ordering: &[K]) -> Intents<K> {
        let mut out = Intents::new();
        match event {
            CanvasEvent::Down {
                pos,
                time_ms,
                target,
                modifiers,
            } => {
                // A press without a matching release (e.g. released outside the
                // window) is simply superseded.
                self.drag.start(pos, time_ms);
                self.phase = Phase::Pressed { target, modifiers };
            }
            CanvasEvent::Move { pos, time_ms } => self.on_move(pos, time_ms, &mut out),
            CanvasEvent::Up { pos, time_ms } => self.on_up(pos, time_ms, ordering, &mut out),
            CanvasEvent::Leave => {
                self.phase = Phase::Idle;
                self.drag.end();
            }
            CanvasEvent::DoubleClick { target } => {
                if let PointerTarget::Pin(pin) = target {
                    out.push(CanvasIntent::PinDoubleClicked(pin));
                }
            }
            CanvasEvent::Wheel {
                pos,
                delta,
                modifiers,
            } => self.on_wheel(pos, delta, modifiers, &mut out),
            CanvasEvent::Key { key, modifiers } => {
                let plain = !modifiers.intersects(Modifiers::CTRL | Modifiers::META | Modifiers::ALT);
                if plain && key.eq_ignore_ascii_case(&self.config.reset_key) {
                    out.push(CanvasIntent::ResetView);
                }
            }
        }
        out
    }

    fn on_move(&mut self, pos: Point, time_ms: u64, out: &mut Intents<K>) {
        match self.phase {
            Phase::Idle => {}
            Phase::Pressed { .. } => {
                if self.crossed_threshold(pos, time_ms) {
                    self.phase = Phase::Panning;
                    // Catch up with the movement made before promotion.
                    if let Some(delta) = self.drag.total_offset(pos) {
                        push_pan(out, delta);
                    }
                    self.drag.last_pos = Some(pos);
                }
            }
            Phase::Panning => {
                if let Some(delta) = self.drag.update(pos) {
                    push_pan(out, delta);
                }
            }
        }
    }

    fn on_up(&mut self, pos: Point, time_ms: u64, ordering: &[K], out: &mut Intents<K>) {
        let phase = core::mem::replace(&mut self.phase, Phase::Idle);
        let crossed = self.crossed_threshold(pos, time_ms);
        self.drag.end();
        let Phase::Pressed { target, modifiers } = phase else {
            return;
        };
        if crossed {
            // A long press or an unreported move: neither click nor pan.
            return;
        }
        match target {
            PointerTarget::Stage => {
                out.push(CanvasIntent::StageClicked);
                out.push(CanvasIntent::Select(SelectionIntent::Clear));
            }
            PointerTarget::Pin(pin) => {
                let select = self.resolve_click(pin.clone(), modifiers, ordering);
                out.push(CanvasIntent::PinClicked { pin, modifiers });
                out.push(CanvasIntent::Select(select));
            }
        }
    }

    fn on_wheel(&self, pos: Point, delta: Vec2, modifiers: Modifiers, out: &mut Intents<K>) {
        if !delta.is_finite() {
            return;
        }
        if modifiers.is_command() {
            let step = self.config.wheel_zoom_step;
            let factor = if delta.y < 0.0 {
                step
            } else if delta.y > 0.0 {
                1.0 / step
            } else {
                return;
            };
            out.push(CanvasIntent::Zoom {
                anchor: pos,
                factor,
            });
            return;
        }
        let scroll = if modifiers.contains(Modifiers::SHIFT) {
            // Shift turns vertical wheel motion into horizontal panning.
            let dx = if delta.x == 0.0 { delta.y } else { delta.x };
            Vec2::new(dx, 0.0)
        } else {
            delta
        };
        push_pan(out, -scroll * self.config.wheel_pan_scale);
    }

    fn resolve_click(&mut self, pin: K, modifiers: Modifiers, ordering: &[K]) -> SelectionIntent<K> {
        if modifiers.contains(Modifiers::SHIFT)
            && let Some(anchor) = self.anchor.clone()
            && let Some(members) = range_members(ordering, &anchor, &pin)
        {
            return SelectionIntent::Range {
                anchor,
                target: pin,
                members,
            };
        }
        self.anchor = Some(pin.clone());
        if modifiers.is_command() {
            SelectionIntent::Toggle(pin)
        } else {
            SelectionIntent::Replace(pin)
        }
    }

    fn crossed_threshold(&self, pos: Point, time_ms: u64) -> bool {
        self.drag.exceeds(
            pos,
            time_ms,
            self.config.drag_distance,
            self.config.drag_time_ms,
        )
    }
}

fn push_pan<K>(out: &mut Intents<K>, delta: Vec2) {
    if delta != Vec2::ZERO {
        out.push(CanvasIntent::PanDelta(delta));
    }
}

/// Keys from `a` to `b` inclusive in `ordering`, whichever comes first.
///
/// Returns `None` if either key is missing.
pub fn range_members<K: Clone + PartialEq>(ordering: &[K], a: &K, b: &K) -> Option<Vec<K>> {
    let ia = ordering.iter().position(|k| k == a)?;
    let ib = ordering.iter().position(|k| k == b)?;
    let (lo, hi) = if ia <= ib { (ia, ib) } else { (ib, ia) };
    Some(ordering[lo..=hi].to_vec())
}
