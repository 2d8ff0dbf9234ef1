// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Event State: pointer and keyboard handling for the pin canvas.
//!
//! - [`drag`]: press position/time bookkeeping and incremental deltas.
//! - [`GestureState`]: the click-versus-drag state machine. It consumes
//!   [`CanvasEvent`]s whose targets the canvas has already hit tested, and
//!   produces [`CanvasIntent`]s: pin clicks, selection intents, pan deltas,
//!   wheel zoom and view reset.
//!
//! The machine never touches the selection or the viewport itself. Selection
//! changes come out as [`pinplan_selection::SelectionIntent`]s for the store to
//! apply, and view changes as pan/zoom intents for the viewport owner.
//!
//! ## Click versus drag
//!
//! ```
//! use kurbo::Point;
//! use pinplan_event_state::{CanvasEvent, CanvasIntent, GestureState, Modifiers, PointerTarget};
//!
//! let mut gestures = GestureState::<u32>::new();
//! let order = [1, 2, 3];
//!
//! gestures.handle(
//!     CanvasEvent::Down {
//!         pos: Point::new(0.0, 0.0),
//!         time_ms: 0,
//!         target: PointerTarget::Pin(2),
//!         modifiers: Modifiers::empty(),
//!     },
//!     &order,
//! );
//! // Moving 20px promotes the press to a pan and reports the full movement.
//! let pan = gestures.handle(CanvasEvent::Move { pos: Point::new(20.0, 0.0), time_ms: 30 }, &order);
//! assert!(matches!(pan[0], CanvasIntent::PanDelta(d) if d.x == 20.0));
//! // Releasing after a pan selects nothing.
//! let up = gestures.handle(CanvasEvent::Up { pos: Point::new(20.0, 0.0), time_ms: 60 }, &order);
//! assert!(up.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;
mod event;
mod gesture;

pub use event::{CanvasEvent, CanvasIntent, Modifiers, PointerTarget};
pub use gesture::{GestureConfig, GestureState, Intents, range_members};
