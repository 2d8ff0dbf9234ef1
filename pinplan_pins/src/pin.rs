// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pin data model.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use pinplan_grid::GridAddress;

/// Stable unique identifier of a pin.
///
/// Distinct from the human-facing pin number (`"A1"`): ids are what selection
/// sets and intents carry. Cloning is cheap.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinId(Arc<str>);

impl PinId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PinId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PinId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Functional category of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinCategory {
    /// General-purpose user I/O.
    #[default]
    Io,
    /// Supply rail.
    Power,
    /// Ground return.
    Ground,
    /// Configuration / JTAG / mode pins.
    Config,
    /// Dedicated or clock-capable input.
    Clock,
    /// Multi-gigabit transceiver lane or reference clock.
    Transceiver,
    /// Analog, temperature-sense and other special-function pins.
    Special,
    /// Reserved by the vendor.
    Reserved,
    /// Not connected internally.
    NoConnect,
}

/// Electrical direction of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Input only.
    Input,
    /// Output only.
    Output,
    /// Input or output.
    Bidirectional,
    /// Passive (power, ground, analog references).
    Passive,
    /// Not yet decided.
    #[default]
    Unspecified,
}

/// Leg polarity of a differential pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// The true / `P` leg.
    Positive,
    /// The complement / `N` leg.
    Negative,
}

impl Polarity {
    /// Returns the other leg's polarity.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// Explicit link from one differential leg to its partner.
///
/// This is a hint, not ownership: the partner is expected to link back with the
/// opposite polarity, and resolvers re-validate it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffPairLink {
    /// Id of the partner leg.
    pub partner: PinId,
    /// Polarity of *this* leg.
    pub polarity: Polarity,
}

/// Free-text annotation attached to a pin by peripheral panels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinComment {
    /// Comment body.
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Author name.
    pub author: String,
}

/// One physical package pin.
///
/// The logical position is not stored here: it is derived from
/// [`Pin::grid`] by the owning [`Package`](crate::Package), so the two can
/// never drift apart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pin {
    /// Stable unique id.
    pub id: PinId,
    /// Human-facing pin number, e.g. `"A1"`.
    pub pin_number: String,
    /// Grid cell of the pin.
    pub grid: GridAddress,
    /// Vendor pin function name, e.g. `"IO_L1P_T0_34"`.
    pub function: String,
    /// Functional category.
    pub category: PinCategory,
    /// I/O bank; `None` is the unassigned bucket.
    pub bank: Option<String>,
    /// I/O standard voltage, e.g. `"1.8V"`.
    pub voltage: String,
    /// Electrical direction.
    pub direction: Direction,
    /// Explicit differential-pair link, if known.
    pub diff_pair: Option<DiffPairLink>,
    /// Optional annotation.
    pub comment: Option<PinComment>,
    signal: String,
}

impl Pin {
    /// Creates an unassigned I/O pin at `grid`.
    #[must_use]
    pub fn new(id: impl Into<PinId>, pin_number: impl Into<String>, grid: GridAddress) -> Self {
        Self {
            id: id.into(),
            pin_number: pin_number.into(),
            grid,
            function: String::new(),
            category: PinCategory::default(),
            bank: None,
            voltage: String::new(),
            direction: Direction::default(),
            diff_pair: None,
            comment: None,
            signal: String::new(),
        }
    }

    /// Sets the vendor function name.
    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: PinCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the bank.
    #[must_use]
    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    /// Sets the direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the assigned signal name.
    #[must_use]
    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.set_signal(signal);
        self
    }

    /// Links this pin to a differential partner.
    #[must_use]
    pub fn with_diff_pair(mut self, partner: impl Into<PinId>, polarity: Polarity) -> Self {
        self.diff_pair = Some(DiffPairLink {
            partner: partner.into(),
            polarity,
        });
        self
    }

    /// The assigned signal name; empty when unassigned.
    #[must_use]
    pub fn signal(&self) -> &str {
        &self.signal
    }

    /// Assigns a signal. Leading and trailing whitespace is dropped, so a
    /// blank name unassigns the pin.
    pub fn set_signal(&mut self, signal: impl Into<String>) {
        let signal = signal.into();
        let trimmed = signal.trim();
        self.signal = if trimmed.len() == signal.len() {
            signal
        } else {
            String::from(trimmed)
        };
    }

    /// Clears the signal assignment.
    pub fn clear_signal(&mut self) {
        self.signal.clear();
    }

    /// Whether a signal is assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.signal.is_empty()
    }
}
