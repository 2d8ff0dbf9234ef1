// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Canvas: a headless package pin canvas.
//!
//! [`PinCanvas`] ties the Pinplan crates together for one canvas widget:
//!
//! - input goes through the gesture machine from `pinplan_event_state`; view
//!   intents (pan, zoom, reset) are applied to the `pinplan_view2d` viewport
//!   immediately, selection intents are handed back to the host,
//! - [`PinCanvas::hit_test`] maps a canvas point to a pin through the inverse
//!   view transform and the package's grid-cell index,
//! - [`PinCanvas::frame`] culls the package with `pinplan_cull` and returns a
//!   cached [`FramePlan`] of screen-space pins, differential connectors and
//!   bank outlines,
//! - [`PinRenderer`] is the drawing backend a host implements.
//!
//! Nothing here draws or owns the selection.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pinplan_canvas::{PinCanvas, apply_selection_intents};
//! use pinplan_event_state::Modifiers;
//! use pinplan_grid::GridAddress;
//! use pinplan_pins::{Package, PackageGeometry, Pin, PinId};
//! use pinplan_selection::Selection;
//!
//! let pins = (1..=4)
//!     .map(|c| Pin::new(format!("A{c}"), format!("A{c}"), GridAddress::new("A", c)))
//!     .collect();
//! let mut canvas = PinCanvas::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! canvas.load_package(Package::new(PackageGeometry::default(), pins));
//!
//! // Click the first pin.
//! let a1 = canvas.viewport().world_to_view_point(Point::ZERO);
//! let mut selection = Selection::new();
//! canvas.pointer_down(a1, 0, Modifiers::empty());
//! let intents = canvas.pointer_up(a1, 50);
//! apply_selection_intents(&intents, &mut selection);
//! assert_eq!(selection.items(), &[PinId::from("A1")]);
//!
//! let plan = canvas.frame(&selection);
//! assert_eq!(plan.pins.len(), 4);
//! assert!(plan.pins[0].selected);
//! ```
//!
//! ## Features
//!
//! - `tracing`: log package issues, culling passes and intents with `tracing`.
//! - `serde`: (de)serialize [`CanvasConfig`].

mod canvas;
mod config;
mod frame;
mod render;

pub use canvas::{PinCanvas, apply_selection_intents};
pub use config::CanvasConfig;
pub use frame::{BankOutline, Connector, FramePlan, PairRole, PinVisual};
pub use render::PinRenderer;
