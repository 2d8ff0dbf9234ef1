// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Affine;

/// Clamp behavior for panning relative to optional world bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClampMode {
    /// Do not apply any clamping; the view may move freely.
    None,
    /// Keep the content reachable, allowing an overscroll margin.
    ///
    /// Content smaller than the view may be dragged until half of it leaves
    /// the view (or the configured margin, whichever is less). Content larger
    /// than the view may be dragged until the configured margin of empty space
    /// shows beyond its edge. The margin is a fraction of the view size; see
    /// [`crate::ViewportConfig::overscroll`].
    #[default]
    Overscroll,
}

/// How fitted content should be positioned inside the view.
///
/// Consulted by [`crate::Viewport2D::fit_world`] and
/// [`crate::Viewport2D::fit_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Center the fitted content within the view rect.
    #[default]
    Center,
    /// Align the on-screen minimum corner of the fitted content with the view
    /// rect origin.
    AlignMin,
}

/// Quarter-turn orientation of the package view.
///
/// Positive angles rotate clockwise on a y-down screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// A quarter turn clockwise.
    Deg90,
    /// A half turn.
    Deg180,
    /// Three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// Parses an angle in degrees. Any multiple of 90 (including negative
    /// ones) is accepted; other angles yield `None`.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(match degrees.rem_euclid(360) {
            0 => Self::Deg0,
            90 => Self::Deg90,
            180 => Self::Deg180,
            _ => Self::Deg270,
        })
    }

    /// The angle in degrees, in `0..360`.
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The next orientation clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// The next orientation counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg270,
            Self::Deg90 => Self::Deg0,
            Self::Deg180 => Self::Deg90,
            Self::Deg270 => Self::Deg180,
        }
    }

    /// Exact rotation matrix about the origin.
    ///
    /// Built from integer coefficients rather than `sin`/`cos` so quarter turns
    /// introduce no rounding.
    #[must_use]
    pub const fn affine(self) -> Affine {
        match self {
            Self::Deg0 => Affine::IDENTITY,
            Self::Deg90 => Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]),
            Self::Deg180 => Affine::new([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]),
            Self::Deg270 => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0]),
        }
    }
}
