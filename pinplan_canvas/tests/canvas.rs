// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end canvas behavior: load, input, hit testing and frame plans.

use kurbo::{Point, Rect, Vec2};
use pinplan_canvas::{
    BankOutline, Connector, FramePlan, PairRole, PinCanvas, PinRenderer, PinVisual,
    apply_selection_intents,
};
use pinplan_cull::{DetailFlags, LodTier};
use pinplan_event_state::{CanvasIntent, Modifiers};
use pinplan_grid::{GridAddress, RowScheme};
use pinplan_pins::{Package, PackageGeometry, Pin, PinId, Polarity};
use pinplan_selection::Selection;
use pinplan_view2d::Rotation;
use proptest::prelude::*;

const VIEW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// A 20x20 package. Rows A..J are bank 34, the rest bank 35. `A1`/`A20` form
/// a differential pair.
fn package() -> Package {
    let scheme = RowScheme::Alphabetic;
    let mut pins = Vec::with_capacity(400);
    for r in 0..20_u32 {
        let row = scheme.index_to_row(r);
        let bank = if r < 10 { "34" } else { "35" };
        for c in 1..=20_u32 {
            let id = format!("{row}{c}");
            let mut pin = Pin::new(id.clone(), id, GridAddress::new(row.clone(), c)).with_bank(bank);
            if r == 0 && c == 1 {
                pin = pin.with_function("IO_L1P_T0_34");
            } else if r == 0 && c == 20 {
                pin = pin.with_function("IO_L1N_T0_34");
            }
            pins.push(pin);
        }
    }
    Package::new(PackageGeometry::default(), pins)
}

fn loaded() -> PinCanvas {
    let mut canvas = PinCanvas::new(VIEW);
    canvas.load_package(package());
    canvas
}

fn screen_of(canvas: &PinCanvas, id: &str) -> Point {
    let package = canvas.package();
    let slot = package.slot_of(&PinId::from(id)).unwrap();
    canvas
        .viewport()
        .world_to_view_point(package.position(slot).unwrap())
}

fn click(
    canvas: &mut PinCanvas,
    selection: &mut Selection<PinId>,
    id: &str,
    modifiers: Modifiers,
) {
    let pos = screen_of(canvas, id);
    assert!(canvas.pointer_down(pos, 1_000, modifiers).is_empty());
    let intents = canvas.pointer_up(pos + Vec2::new(1.0, 1.0), 1_080);
    apply_selection_intents(&intents, selection);
}

fn ids(selection: &Selection<PinId>) -> Vec<&str> {
    selection.iter().map(PinId::as_str).collect()
}

fn assert_near(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-6, "{a:?} != {b:?}");
}

#[test]
fn loading_fits_the_package_into_view() {
    let canvas = loaded();
    let bounds = canvas.package().content_bounds().unwrap();
    let on_screen = canvas.viewport().world_to_view_rect(bounds);
    assert!(VIEW.contains(on_screen.origin()), "content starts off screen");
    assert!(on_screen.x1 <= VIEW.x1 && on_screen.y1 <= VIEW.y1, "content ends off screen");
    assert_near(on_screen.center(), VIEW.center());
    assert_eq!(canvas.tier(), LodTier::Low);
}

#[test]
fn clicks_resolve_pins_by_screen_position() {
    let mut canvas = loaded();
    let mut selection = Selection::new();

    click(&mut canvas, &mut selection, "B3", Modifiers::empty());
    assert_eq!(ids(&selection), ["B3"]);

    click(&mut canvas, &mut selection, "C4", Modifiers::CTRL);
    assert_eq!(ids(&selection), ["B3", "C4"]);

    click(&mut canvas, &mut selection, "B3", Modifiers::META);
    assert_eq!(ids(&selection), ["C4"]);
    assert_eq!(canvas.range_anchor(), Some(&PinId::from("B3")));
}

#[test]
fn shift_click_selects_the_run_in_pin_order() {
    let mut canvas = loaded();
    let mut selection = Selection::new();
    click(&mut canvas, &mut selection, "A2", Modifiers::empty());
    click(&mut canvas, &mut selection, "A5", Modifiers::SHIFT);
    assert_eq!(ids(&selection), ["A2", "A3", "A4", "A5"]);
    assert_eq!(selection.primary(), Some(&PinId::from("A5")));

    // A host-provided order wins over package order.
    canvas.set_pin_ordering(["D1", "A2", "T20"].map(PinId::from).to_vec());
    click(&mut canvas, &mut selection, "A2", Modifiers::empty());
    click(&mut canvas, &mut selection, "T20", Modifiers::SHIFT);
    assert_eq!(ids(&selection), ["A2", "T20"]);
}

#[test]
fn clicking_between_pins_hits_the_stage() {
    let mut canvas = loaded();
    let between = canvas
        .viewport()
        .world_to_view_point(Point::new(44.0, 44.0));
    assert_eq!(canvas.hit_test(between), None);

    let mut selection = Selection::new();
    click(&mut canvas, &mut selection, "B2", Modifiers::empty());
    canvas.pointer_down(between, 2_000, Modifiers::empty());
    let intents = canvas.pointer_up(between, 2_050);
    assert!(intents.contains(&CanvasIntent::StageClicked));
    apply_selection_intents(&intents, &mut selection);
    assert!(selection.is_empty());
}

#[test]
fn dragging_pans_without_clicking() {
    let mut canvas = loaded();
    let before = canvas.viewport().pan();
    let start = Point::new(5.0, 5.0);

    assert!(canvas.pointer_down(start, 0, Modifiers::empty()).is_empty());
    let intents = canvas.pointer_move(start + Vec2::new(40.0, 0.0), 16);
    assert_eq!(intents.as_slice(), &[CanvasIntent::PanDelta(Vec2::new(40.0, 0.0))]);
    assert!(canvas.is_panning());
    let after = canvas.viewport().pan();
    assert!((after.x - before.x - 40.0).abs() < 1e-9);

    let intents = canvas.pointer_up(start + Vec2::new(40.0, 0.0), 40);
    assert!(intents.is_empty());
    assert!(!canvas.is_panning());
}

#[test]
fn leaving_the_canvas_ends_a_drag() {
    let mut canvas = loaded();
    let start = Point::new(5.0, 5.0);
    canvas.pointer_down(start, 0, Modifiers::empty());
    canvas.pointer_move(start + Vec2::new(30.0, 0.0), 10);
    canvas.pointer_leave();
    assert!(!canvas.is_panning());
    let pan = canvas.viewport().pan();
    assert!(canvas.pointer_move(start + Vec2::new(90.0, 0.0), 20).is_empty());
    assert_eq!(canvas.viewport().pan(), pan);
}

#[test]
fn command_wheel_zooms_about_the_cursor() {
    let mut canvas = loaded();
    let cursor = Point::new(230.0, 170.0);
    let world = canvas.viewport().view_to_world_point(cursor);
    let zoom = canvas.viewport().zoom();

    canvas.wheel(cursor, Vec2::new(0.0, -120.0), Modifiers::CTRL);
    assert!((canvas.viewport().zoom() - zoom * 1.1).abs() < 1e-12);
    assert_near(canvas.viewport().world_to_view_point(world), cursor);

    canvas.wheel(cursor, Vec2::new(0.0, 120.0), Modifiers::META);
    assert!((canvas.viewport().zoom() - zoom).abs() < 1e-12);
}

#[test]
fn plain_wheel_pans() {
    let mut canvas = loaded();
    let before = canvas.viewport().pan();
    canvas.wheel(Point::new(400.0, 300.0), Vec2::new(0.0, 30.0), Modifiers::empty());
    let moved = canvas.viewport().pan() - before;
    assert!((moved.y + 30.0).abs() < 1e-9);
    assert!(moved.x.abs() < 1e-9);
}

#[test]
fn reset_key_returns_to_unit_scale_and_keeps_orientation() {
    let mut canvas = loaded();
    canvas.viewport_mut().rotate_clockwise();
    canvas.wheel(Point::new(100.0, 100.0), Vec2::new(0.0, -1.0), Modifiers::CTRL);
    canvas.wheel(Point::new(100.0, 100.0), Vec2::new(0.0, 50.0), Modifiers::empty());

    // Shortcuts with Ctrl belong to the host.
    assert!(canvas.key('r', Modifiers::CTRL).is_empty());

    let intents = canvas.key('R', Modifiers::SHIFT);
    assert_eq!(intents.as_slice(), &[CanvasIntent::ResetView]);
    let state = canvas.view_state();
    assert_eq!((state.pan_x, state.pan_y, state.scale), (0.0, 0.0, 1.0));
    assert_eq!(state.rotation, Rotation::Deg90);

    // The package center sits in the middle of the canvas.
    let bounds = canvas.package().content_bounds().unwrap();
    assert_near(canvas.viewport().world_to_view_point(bounds.center()), VIEW.center());

    let fitted = {
        let mut fresh = loaded();
        fresh.viewport_mut().rotate_clockwise();
        fresh.fit_to_package();
        fresh.view_state()
    };
    canvas.fit_to_package();
    assert!((canvas.view_state().scale - fitted.scale).abs() < 1e-12);
}

#[test]
fn double_click_reports_the_pin() {
    let mut canvas = loaded();
    let pos = screen_of(&canvas, "E7");
    let intents = canvas.double_click(pos);
    assert_eq!(
        intents.as_slice(),
        &[CanvasIntent::PinDoubleClicked(PinId::from("E7"))]
    );
}

#[test]
fn frame_plans_are_cached_until_inputs_change() {
    let mut canvas = loaded();
    let mut selection = Selection::new();

    let first = canvas.frame(&selection).clone();
    assert_eq!(canvas.frame(&selection), &first);
    assert_eq!(canvas.frames_built(), 1);

    canvas.wheel(Point::new(400.0, 300.0), Vec2::new(0.0, 10.0), Modifiers::empty());
    canvas.frame(&selection);
    assert_eq!(canvas.frames_built(), 2);

    selection.select_only(PinId::from("C3"));
    let plan = canvas.frame(&selection);
    assert_eq!(plan.pins[0].id, PinId::from("C3"));
    assert!(plan.pins[0].selected);
    assert_eq!(canvas.frames_built(), 3);

    canvas.resize(Rect::new(0.0, 0.0, 1024.0, 768.0));
    canvas.frame(&selection);
    assert_eq!(canvas.frames_built(), 4);

    canvas.load_package(package());
    canvas.frame(&selection);
    assert_eq!(canvas.frames_built(), 5);
}

#[test]
fn separate_stores_at_the_same_revision_get_their_own_plans() {
    let mut canvas = loaded();
    let a1 = canvas
        .package()
        .position(canvas.package().slot_of(&PinId::from("A1")).unwrap())
        .unwrap();
    canvas.viewport_mut().set_zoom(4.0);
    canvas.viewport_mut().center_on(a1);
    assert_eq!(canvas.tier(), LodTier::UltraHigh);

    let mut first = Selection::new();
    first.select_only(PinId::from("A1"));
    assert!(canvas.frame(&first).find(&PinId::from("T20")).is_none());

    // A fresh store with one change lands on the same revision.
    let mut second = Selection::new();
    second.select_only(PinId::from("T20"));
    assert_eq!(first.revision(), second.revision());
    let plan = canvas.frame(&second);
    let far = plan.find(&PinId::from("T20")).unwrap();
    assert!(far.selected);
    assert!(!plan.find(&PinId::from("A1")).is_some_and(|v| v.selected));
    assert_eq!(canvas.frames_built(), 2);

    // Equal contents reuse the plan regardless of which store holds them.
    let mut copy = Selection::new();
    copy.select_only(PinId::from("T20"));
    canvas.frame(&copy);
    assert_eq!(canvas.frames_built(), 2);
}

#[test]
fn overview_draws_bank_outlines_but_no_connectors() {
    let mut canvas = loaded();
    let selection = Selection::new();
    let plan = canvas.frame(&selection);
    assert_eq!(plan.tier, LodTier::Low);
    assert!(plan.flags.contains(DetailFlags::BANK_BOUNDARIES));
    assert!(plan.connectors.is_empty());
    let banks: Vec<_> = plan
        .banks
        .iter()
        .map(|b| b.bank.as_deref().unwrap())
        .collect();
    assert_eq!(banks, ["34", "35"]);
    assert!(plan.banks[0].screen.y1 < plan.banks[1].screen.y0);
}

#[test]
fn connectors_never_dangle_to_undrawn_pins() {
    let mut canvas = loaded();
    let package = canvas.package().clone();
    let a1 = package.slot_of(&PinId::from("A1")).unwrap();
    let a20 = package.slot_of(&PinId::from("A20")).unwrap();
    let a20_pos = package.position(a20).unwrap();

    canvas.viewport_mut().set_zoom(2.5);
    canvas.viewport_mut().center_on(a20_pos);
    assert_eq!(canvas.tier(), LodTier::UltraHigh);

    // Only the negative leg is near the viewport.
    let mut selection = Selection::new();
    let plan = canvas.frame(&selection);
    assert!(plan.find(&PinId::from("A1")).is_none());
    let a20_visual = plan.find(&PinId::from("A20")).unwrap();
    assert_eq!(a20_visual.pair, PairRole::Leg(Polarity::Negative));
    assert!(plan.connectors.is_empty());

    // Selecting the far leg draws it, so the pair may be joined.
    selection.select_only(PinId::from("A1"));
    let plan = canvas.frame(&selection);
    assert_eq!(plan.connectors.len(), 1);
    let Connector { from, to, .. } = plan.connectors[0];
    assert_eq!((from, to), (a1, a20));
    assert_eq!(
        plan.find(&PinId::from("A20")).unwrap().pair,
        PairRole::PartnerOfSelected(Polarity::Negative)
    );

    // Far from both legs: the selected leg is drawn alone.
    canvas.viewport_mut().center_on(Point::new(880.0, 1_672.0));
    let plan = canvas.frame(&selection);
    assert!(plan.find(&PinId::from("A1")).is_some());
    assert!(plan.find(&PinId::from("A20")).is_none());
    assert!(plan.connectors.is_empty());
}

#[test]
fn reload_prunes_selection_and_anchor() {
    let mut canvas = loaded();
    let mut selection = Selection::new();
    click(&mut canvas, &mut selection, "B2", Modifiers::empty());
    click(&mut canvas, &mut selection, "C3", Modifiers::CTRL);
    assert_eq!(canvas.range_anchor(), Some(&PinId::from("C3")));

    let edited = canvas
        .package()
        .edited(|pins| pins.retain(|p| p.id.as_str() != "C3"));
    canvas.load_package(edited);
    canvas.prune_selection(&mut selection);
    assert_eq!(ids(&selection), ["B2"]);
    assert_eq!(canvas.range_anchor(), None);

    // Shift without an anchor is a plain click.
    click(&mut canvas, &mut selection, "D4", Modifiers::SHIFT);
    assert_eq!(ids(&selection), ["D4"]);

    let kept = canvas.package().edited(|pins| pins.truncate(200));
    canvas.load_package(kept);
    assert_eq!(canvas.range_anchor(), Some(&PinId::from("D4")));
}

#[test]
fn stale_selection_is_counted_not_drawn() {
    let mut canvas = loaded();
    let mut selection = Selection::new();
    selection.replace_with(["gone-1", "B2", "gone-2"].map(PinId::from));
    let plan = canvas.frame(&selection);
    assert_eq!(plan.orphaned_selection, 2);
    assert_eq!(plan.pins.iter().filter(|p| p.selected).count(), 1);
}

#[test]
fn invalid_addresses_are_listed_but_never_drawn() {
    let bad = package().edited(|pins| {
        pins.push(Pin::new("bad", "", GridAddress::new("", 3)));
    });
    let mut canvas = PinCanvas::new(VIEW);
    canvas.load_package(bad);
    assert_eq!(canvas.invalid_pin_count(), 1);
    assert!(canvas.package().contains(&PinId::from("bad")));

    let mut selection = Selection::new();
    selection.select_only(PinId::from("bad"));
    canvas.viewport_mut().set_zoom(0.15);
    let plan = canvas.frame(&selection);
    assert_eq!(plan.pins.len(), 400);
    assert!(plan.find(&PinId::from("bad")).is_none());
}

#[test]
fn zero_sized_canvas_draws_nothing_until_resized() {
    let mut canvas = PinCanvas::new(Rect::ZERO);
    canvas.load_package(package());
    let selection = Selection::new();
    assert!(canvas.frame(&selection).is_empty());
    assert_eq!(canvas.hit_test(Point::ZERO), None);

    canvas.resize(VIEW);
    let bounds = canvas.package().content_bounds().unwrap();
    assert_near(
        canvas.viewport().world_to_view_rect(bounds).center(),
        VIEW.center(),
    );
    assert!(!canvas.frame(&selection).is_empty());
}

#[derive(Debug, PartialEq)]
enum Call {
    Begin(LodTier),
    Bank(Option<String>),
    Connector,
    Pin(String, bool),
    End,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl PinRenderer for Recorder {
    fn begin_frame(&mut self, plan: &FramePlan) {
        self.calls.push(Call::Begin(plan.tier));
    }

    fn draw_bank(&mut self, outline: &BankOutline) {
        self.calls.push(Call::Bank(outline.bank.clone()));
    }

    fn draw_connector(&mut self, _connector: &Connector) {
        self.calls.push(Call::Connector);
    }

    fn draw_pin(&mut self, pin: &Pin, visual: &PinVisual, radius: f64, _flags: DetailFlags) {
        assert!(radius > 0.0, "pins need a visible radius");
        self.calls
            .push(Call::Pin(pin.pin_number.clone(), visual.selected));
    }

    fn end_frame(&mut self) {
        self.calls.push(Call::End);
    }
}

#[test]
fn renderer_receives_layers_back_to_front() {
    let mut canvas = loaded();
    let a1 = canvas
        .package()
        .position(canvas.package().slot_of(&PinId::from("A1")).unwrap())
        .unwrap();
    canvas.viewport_mut().set_zoom(0.7);
    canvas.viewport_mut().center_on(a1);
    let mut selection = Selection::new();
    selection.select_only(PinId::from("A20"));

    let mut recorder = Recorder::default();
    canvas.render(&selection, &mut recorder);
    let calls = recorder.calls;

    assert_eq!(calls.first(), Some(&Call::Begin(LodTier::Medium)));
    assert_eq!(calls.last(), Some(&Call::End));
    let first_connector = calls.iter().position(|c| *c == Call::Connector).unwrap();
    let first_pin = calls
        .iter()
        .position(|c| matches!(c, Call::Pin(..)))
        .unwrap();
    let last_bank = calls
        .iter()
        .rposition(|c| matches!(c, Call::Bank(_)))
        .unwrap();
    assert!(last_bank < first_connector && first_connector < first_pin);
    assert_eq!(calls[first_pin], Call::Pin("A20".into(), true));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_pin_center_hits_its_own_pin(
        index in 0_usize..400,
        zoom in 0.1_f64..5.0,
        quarter in 0_i32..4,
        mirrored in any::<bool>(),
    ) {
        let mut canvas = loaded();
        let view = canvas.viewport_mut();
        view.set_rotation(Rotation::from_degrees(quarter * 90).unwrap());
        view.set_mirrored(mirrored);
        view.set_zoom(zoom);

        let package = canvas.package();
        let pin = &package.pins()[index];
        let slot = package.slot_of(&pin.id).unwrap();
        let screen = canvas
            .viewport()
            .world_to_view_point(package.position(slot).unwrap());
        prop_assert_eq!(canvas.hit_test(screen), Some(slot));
    }
}
