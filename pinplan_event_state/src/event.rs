// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input as the canvas forwards it, and the intents derived from it.

use kurbo::{Point, Vec2};
use pinplan_selection::SelectionIntent;

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Command on macOS, the Windows key elsewhere.
        const META  = 0b0000_0100;
        /// Alt / Option.
        const ALT   = 0b0000_1000;
    }
}

impl Modifiers {
    /// Ctrl or Cmd: toggle membership, zoom with the wheel.
    #[must_use]
    pub fn is_command(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// What a pointer press landed on, as resolved by the canvas hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget<K> {
    /// A pin.
    Pin(K),
    /// Empty canvas background.
    Stage,
}

/// Input forwarded from the host.
///
/// Positions are in canvas (screen) pixels. Times are monotonic milliseconds
/// from any origin.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent<K> {
    /// A button was pressed.
    Down {
        /// Pointer position.
        pos: Point,
        /// Event time.
        time_ms: u64,
        /// Hit test result at `pos`.
        target: PointerTarget<K>,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// The pointer moved.
    Move {
        /// Pointer position.
        pos: Point,
        /// Event time.
        time_ms: u64,
    },
    /// The button was released.
    Up {
        /// Pointer position.
        pos: Point,
        /// Event time.
        time_ms: u64,
    },
    /// The pointer left the canvas.
    Leave,
    /// The host recognized a double click.
    DoubleClick {
        /// Hit test result at the click position.
        target: PointerTarget<K>,
    },
    /// A scroll wheel or trackpad scroll.
    Wheel {
        /// Pointer position.
        pos: Point,
        /// Scroll amount in pixels; positive `y` scrolls down.
        delta: Vec2,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// A key was pressed while the canvas had focus.
    Key {
        /// The character produced.
        key: char,
        /// Held modifiers.
        modifiers: Modifiers,
    },
}

/// High-level outcome of an input event.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasIntent<K> {
    /// A pin received a click (not a drag).
    PinClicked {
        /// The pin.
        pin: K,
        /// Modifiers held at press time.
        modifiers: Modifiers,
    },
    /// A pin was double-clicked.
    PinDoubleClicked(K),
    /// The empty stage received a click.
    StageClicked,
    /// A selection change for the store to apply.
    Select(SelectionIntent<K>),
    /// Move the view by this many pixels.
    PanDelta(Vec2),
    /// Zoom by `factor` keeping the content under `anchor` fixed.
    Zoom {
        /// Anchor in canvas pixels.
        anchor: Point,
        /// Multiplicative scale change.
        factor: f64,
    },
    /// Return to the default pan and scale.
    ResetView,
}
