// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag bookkeeping: where and when a press started, and incremental deltas.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use pinplan_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0), 1_000);
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.elapsed_ms(1_150), Some(150));
//! assert_eq!(drag.total_offset(Point::new(20.0, 20.0)), Some(Vec2::new(10.0, 0.0)));
//! ```

use kurbo::{Point, Vec2};

/// Tracks one press-and-move sequence.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    /// Where the press started.
    pub start_pos: Option<Point>,
    /// When the press started, in milliseconds on the caller's clock.
    pub start_ms: u64,
    /// Last position seen by [`DragState::update`].
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Begins tracking at `pos`, replacing any previous sequence.
    pub fn start(&mut self, pos: Point, time_ms: u64) {
        self.start_pos = Some(pos);
        self.start_ms = time_ms;
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the movement since the previous update.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset from the start position to `pos`.
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| pos - start)
    }

    /// Milliseconds since the press started. Clocks that run backwards count as
    /// zero elapsed time.
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.start_pos.map(|_| now_ms.saturating_sub(self.start_ms))
    }

    /// Returns `true` if the press has moved farther than `distance` from its
    /// start, or has lasted longer than `time_ms`.
    pub fn exceeds(&self, pos: Point, now_ms: u64, distance: f64, time_ms: u64) -> bool {
        let far = self
            .total_offset(pos)
            .is_some_and(|d| d.hypot2() > distance * distance);
        let long = self.elapsed_ms(now_ms).is_some_and(|t| t > time_ms);
        far || long
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a sequence is being tracked.
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}
