// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Rotation;

/// Snapshot of the user-controlled viewport values.
///
/// This is what a project file persists and what caches compare. Restoring a
/// snapshot goes through [`crate::Viewport2D::restore`], which applies the same
/// scale clamping and non-finite guards as interactive changes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    /// Horizontal pan offset in screen pixels.
    pub pan_x: f64,
    /// Vertical pan offset in screen pixels.
    pub pan_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Package orientation.
    pub rotation: Rotation,
    /// `true` when viewing the package from the bottom.
    pub mirrored: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
            rotation: Rotation::Deg0,
            mirrored: false,
        }
    }
}

/// Tunables for a [`crate::Viewport2D`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Overscroll margin as a fraction of the view size.
    pub overscroll: f64,
    /// Empty border left around fitted content, as a fraction of its size.
    pub fit_padding: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            overscroll: 0.5,
            fit_padding: 0.05,
        }
    }
}
