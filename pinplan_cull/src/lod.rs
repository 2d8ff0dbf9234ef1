// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level of detail: which classes of decoration to draw at a given scale.

use core::fmt;

bitflags::bitflags! {
    /// Decoration classes the renderer may draw.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DetailFlags: u8 {
        /// Pin number labels ("A1", "AB12").
        const PIN_LABELS      = 0b0000_0001;
        /// Assigned signal names. Wider than pin labels, so they need more zoom.
        const SIGNAL_LABELS   = 0b0000_0010;
        /// Lines joining the two legs of a differential pair.
        const DIFF_CONNECTORS = 0b0000_0100;
        /// Outlines around I/O banks.
        const BANK_BOUNDARIES = 0b0000_1000;
    }
}

impl DetailFlags {
    /// Draw pin number labels.
    #[must_use]
    pub fn should_render_pin_labels(self) -> bool {
        self.contains(Self::PIN_LABELS)
    }

    /// Draw signal name labels.
    #[must_use]
    pub fn should_render_signal_labels(self) -> bool {
        self.contains(Self::SIGNAL_LABELS)
    }

    /// Draw differential-pair connectors.
    #[must_use]
    pub fn should_render_differential_connectors(self) -> bool {
        self.contains(Self::DIFF_CONNECTORS)
    }

    /// Draw bank outlines.
    #[must_use]
    pub fn should_render_bank_boundaries(self) -> bool {
        self.contains(Self::BANK_BOUNDARIES)
    }
}

/// Zoom band, from whole-package overview to close-up.
///
/// Tiers are ordered: a higher tier never shows less than a lower one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LodTier {
    /// Whole-package overview: every pin, no decoration.
    UltraLow,
    /// Overview: bank outlines only.
    Low,
    /// Mid zoom: pin labels and pair connectors.
    Medium,
    /// Close: signal labels too.
    High,
    /// Closest: everything, windowed to the viewport.
    UltraHigh,
}

impl LodTier {
    /// All tiers from lowest to highest.
    pub const ALL: [Self; 5] = [
        Self::UltraLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::UltraHigh,
    ];

    /// Decorations drawn at this tier.
    #[must_use]
    pub fn flags(self) -> DetailFlags {
        let mut flags = DetailFlags::empty();
        if self >= Self::Low {
            flags |= DetailFlags::BANK_BOUNDARIES;
        }
        if self >= Self::Medium {
            flags |= DetailFlags::PIN_LABELS | DetailFlags::DIFF_CONNECTORS;
        }
        if self >= Self::High {
            flags |= DetailFlags::SIGNAL_LABELS;
        }
        flags
    }

    /// The next tier down, saturating at [`LodTier::UltraLow`].
    #[must_use]
    pub fn lower(self) -> Self {
        match self {
            Self::UltraLow | Self::Low => Self::UltraLow,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
            Self::UltraHigh => Self::High,
        }
    }
}

impl fmt::Display for LodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UltraLow => "ultra-low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::UltraHigh => "ultra-high",
        })
    }
}

/// Upper bound on how many pins a tier draws, not counting selected pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinBudget {
    /// No fixed cap.
    Unbounded,
    /// At most this many.
    Limited(usize),
}

impl PinBudget {
    /// The cap, if any.
    #[must_use]
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Limited(n) => Some(n),
        }
    }
}

/// Everything the renderer needs to know about the current zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LodDetails {
    /// Tier driving the culling strategy.
    pub tier: LodTier,
    /// Decorations to draw; may be a tier lower than `tier` on dense packages.
    pub flags: DetailFlags,
    /// Cap on drawn pins.
    pub max_pins: PinBudget,
}

/// Maps a scale to a [`LodTier`] through fixed breakpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LodPolicy {
    /// Scales at which [`LodTier::Low`], [`LodTier::Medium`], [`LodTier::High`]
    /// and [`LodTier::UltraHigh`] begin.
    pub breakpoints: [f64; 4],
    /// Packages with at least this many pins draw decorations one tier lower
    /// than their scale suggests.
    pub dense_pin_count: usize,
    /// Pin budget of [`LodTier::High`], split across banks.
    pub high_pin_budget: usize,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            breakpoints: [0.2, 0.5, 1.0, 2.0],
            dense_pin_count: 5_000,
            high_pin_budget: 2_000,
        }
    }
}

impl LodPolicy {
    /// Tier for `scale`.
    ///
    /// Counting crossed breakpoints keeps the mapping monotonic even if the
    /// breakpoints are configured out of order. Non-finite or non-positive
    /// scales map to [`LodTier::UltraLow`].
    #[must_use]
    pub fn tier(&self, scale: f64) -> LodTier {
        if !(scale.is_finite() && scale > 0.0) {
            return LodTier::UltraLow;
        }
        let crossed = self.breakpoints.iter().filter(|&&b| scale >= b).count();
        LodTier::ALL[crossed]
    }

    /// Tier used for decorations, demoted once for dense packages.
    #[must_use]
    pub fn detail_tier(&self, scale: f64, pin_count: usize) -> LodTier {
        let tier = self.tier(scale);
        if pin_count >= self.dense_pin_count {
            tier.lower()
        } else {
            tier
        }
    }

    /// Pin cap for `tier`.
    #[must_use]
    pub fn budget(&self, tier: LodTier) -> PinBudget {
        match tier {
            LodTier::High => PinBudget::Limited(self.high_pin_budget),
            _ => PinBudget::Unbounded,
        }
    }

    /// Tier, decorations and budget for `scale` on a package of `pin_count`
    /// pins.
    #[must_use]
    pub fn details(&self, scale: f64, pin_count: usize) -> LodDetails {
        let tier = self.tier(scale);
        LodDetails {
            tier,
            flags: self.detail_tier(scale, pin_count).flags(),
            max_pins: self.budget(tier),
        }
    }
}
