// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Cull: level-of-detail policy and per-frame pin culling.
//!
//! - [`LodPolicy`] maps the viewport scale to a [`LodTier`] through fixed
//!   breakpoints (`0.2`, `0.5`, `1.0`, `2.0` by default) and derives the
//!   [`DetailFlags`] and [`PinBudget`] for it. Every flag is monotonic in scale.
//! - [`CullEngine`] picks the pins to draw this frame with a strategy tied to
//!   the tier, from "everything" at overview zoom to "only the viewport" when
//!   close up. Selected pins are always included, exactly once.
//!
//! Both are pure: given the same package, viewport state, tier and selection
//! they produce the same output, so callers can cache and discard results
//! freely.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use pinplan_cull::{CullEngine, CullStrategy, LodTier};
//! use pinplan_grid::GridAddress;
//! use pinplan_pins::{Package, PackageGeometry, Pin, PinId};
//! use pinplan_view2d::Viewport2D;
//!
//! let pins = (1..=20)
//!     .map(|c| Pin::new(format!("A{c}"), format!("A{c}"), GridAddress::new("A", c)))
//!     .collect();
//! let package = Package::new(PackageGeometry::default(), pins);
//!
//! let mut viewport = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! viewport.set_world_bounds(package.content_bounds());
//! viewport.set_zoom(0.15);
//!
//! let engine = CullEngine::new();
//! let tier = engine.tier_for(&viewport);
//! assert_eq!(tier, LodTier::UltraLow);
//! let result = engine.cull(&package, &viewport, tier, &[PinId::from("A3")]);
//! assert_eq!(result.strategy, CullStrategy::All);
//! assert_eq!(result.len(), 20);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod lod;
mod sample;

pub use engine::{CullConfig, CullEngine, CullResult, CullStrategy};
pub use lod::{DetailFlags, LodDetails, LodPolicy, LodTier, PinBudget};
pub use sample::stride_sample;
