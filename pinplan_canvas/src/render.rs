// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pinplan_cull::DetailFlags;
use pinplan_pins::Pin;

use crate::frame::{BankOutline, Connector, FramePlan, PinVisual};

/// Drawing backend for a [`FramePlan`].
///
/// Calls arrive in back-to-front order: bank outlines, connectors, then pins.
/// Implementations decide colors and shapes; `flags` says which labels the
/// current zoom allows.
pub trait PinRenderer {
    /// Called once before anything else in a frame.
    fn begin_frame(&mut self, plan: &FramePlan) {
        let _ = plan;
    }

    /// Draws one bank outline.
    fn draw_bank(&mut self, outline: &BankOutline) {
        let _ = outline;
    }

    /// Draws one pair connector.
    fn draw_connector(&mut self, connector: &Connector) {
        let _ = connector;
    }

    /// Draws one pin.
    fn draw_pin(&mut self, pin: &Pin, visual: &PinVisual, radius: f64, flags: DetailFlags);

    /// Called once after all drawing in a frame.
    fn end_frame(&mut self) {}
}

/// Replays `plan` into `renderer`, resolving pins through `lookup`.
pub(crate) fn replay<'a, R: PinRenderer + ?Sized>(
    plan: &FramePlan,
    lookup: impl Fn(&PinVisual) -> Option<&'a Pin>,
    renderer: &mut R,
) {
    renderer.begin_frame(plan);
    for outline in &plan.banks {
        renderer.draw_bank(outline);
    }
    for connector in &plan.connectors {
        renderer.draw_connector(connector);
    }
    for visual in &plan.pins {
        if let Some(pin) = lookup(visual) {
            renderer.draw_pin(pin, visual, plan.pin_radius, plan.flags);
        }
    }
    renderer.end_frame();
}
