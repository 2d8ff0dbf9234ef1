// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan View2D: the pan/zoom/rotate/mirror transform of the package canvas.
//!
//! This crate maps between the logical package plane (as produced by
//! `pinplan_grid`) and screen pixels:
//!
//! ```text
//! screen = canvas_center + pan + scale * mirror(rotate(logical - pivot))
//! ```
//!
//! - [`Viewport2D`]: the transform plus its operations (pan, zoom about a
//!   point, fit, quarter-turn rotation, bottom view, reset).
//! - [`ViewState`]: the persisted snapshot `{pan_x, pan_y, scale, rotation,
//!   mirrored}`.
//! - [`ViewportConfig`]: scale limits, overscroll and fit padding.
//!
//! It does not know about pins, gestures or rendering; pointer handling lives in
//! `pinplan_event_state` and culling in `pinplan_cull`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pinplan_view2d::Viewport2D;
//!
//! let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! vp.set_world_bounds(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
//! vp.fit_world();
//!
//! let cursor = Point::new(200.0, 150.0);
//! let under_cursor = vp.view_to_world_point(cursor);
//! vp.zoom_about_view_point(cursor, 1.1);
//! let after = vp.view_to_world_point(cursor);
//! assert!((after - under_cursor).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod state;
mod viewport2d;

pub use modes::{ClampMode, FitMode, Rotation};
pub use state::{ViewState, ViewportConfig};
pub use viewport2d::{Viewport2D, Viewport2DDebugInfo};
