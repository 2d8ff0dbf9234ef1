// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pinplan_cull::{CullConfig, LodPolicy};
use pinplan_event_state::GestureConfig;
use pinplan_view2d::ViewportConfig;

/// All tunables of a [`PinCanvas`](crate::PinCanvas).
///
/// Every field has a working default; with the `serde` feature the struct
/// deserializes from partial input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Scale limits, overscroll and fit padding.
    pub viewport: ViewportConfig,
    /// Click/drag thresholds, wheel steps and the reset key.
    pub gesture: GestureConfig,
    /// Zoom tier breakpoints and budgets.
    pub lod: LodPolicy,
    /// Culling margins and sample sizes.
    pub cull: CullConfig,
    /// Pin hit radius as a fraction of the tile spacing.
    pub pin_radius: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            gesture: GestureConfig::default(),
            lod: LodPolicy::default(),
            cull: CullConfig::default(),
            pin_radius: 0.4,
        }
    }
}

impl CanvasConfig {
    /// Sets the viewport tunables.
    #[must_use]
    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the gesture tunables.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Sets the level-of-detail policy.
    #[must_use]
    pub fn with_lod(mut self, lod: LodPolicy) -> Self {
        self.lod = lod;
        self
    }

    /// Sets the culling tunables.
    #[must_use]
    pub fn with_cull(mut self, cull: CullConfig) -> Self {
        self.cull = cull;
        self
    }

    /// Sets the pin hit radius, as a fraction of the tile spacing.
    ///
    /// Non-finite or negative values are ignored.
    #[must_use]
    pub fn with_pin_radius(mut self, pin_radius: f64) -> Self {
        if pin_radius.is_finite() && pin_radius >= 0.0 {
            self.pin_radius = pin_radius;
        }
        self
    }
}
