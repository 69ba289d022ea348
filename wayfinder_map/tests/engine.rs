// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `wayfinder_map` engine.
//!
//! These drive a [`MapEngine`] through raw input, the way a UI adapter
//! would, and check the callbacks it fires and the frames it produces.

use kurbo::{Point, Rect, Size};
use wayfinder_map::{
    CardKind, CardSide, ConfigError, GestureInput, GestureMode, GestureOutcome, InteractivePoint,
    LabelSide, MapConfig, MapEngine, MapListener, MapMode, PointerButton, ResetMode, Selection,
};

const SURFACE: Size = Size::new(1000.0, 500.0);

#[derive(Debug, Default)]
struct Recorder {
    points: Vec<String>,
    clusters: Vec<Vec<String>>,
    clicks: Vec<Point>,
    hovers: Vec<Option<String>>,
}

impl MapListener for Recorder {
    fn on_point_selected(&mut self, id: &str) {
        self.points.push(id.to_owned());
    }

    fn on_cluster_selected(&mut self, ids: &[String]) {
        self.clusters.push(ids.to_vec());
    }

    fn on_map_clicked(&mut self, coordinate: Point) {
        self.clicks.push(coordinate);
    }

    fn on_hover_changed(&mut self, id: Option<&str>) {
        self.hovers.push(id.map(str::to_owned));
    }
}

/// Map and surface share a size, so screen and map coordinates coincide at
/// the reset view.
fn config() -> MapConfig {
    MapConfig {
        map_size: Size::new(1000.0, 500.0),
        reset_mode: ResetMode::Fixed,
        ..MapConfig::default()
    }
}

fn engine(mode: MapMode) -> MapEngine {
    MapEngine::new(config(), mode, SURFACE).expect("valid config")
}

fn pt(id: &str, x: f64, y: f64) -> InteractivePoint {
    InteractivePoint::new(id, Point::new(x, y))
}

fn down(x: f64, y: f64, time_ms: u64) -> GestureInput {
    GestureInput::PointerDown {
        position: Point::new(x, y),
        button: PointerButton::Primary,
        precision: false,
        time_ms,
    }
}

fn drag(x: f64, y: f64, time_ms: u64) -> GestureInput {
    GestureInput::PointerMove {
        position: Point::new(x, y),
        pressed: true,
        time_ms,
    }
}

fn up(x: f64, y: f64, time_ms: u64) -> GestureInput {
    GestureInput::PointerUp {
        position: Point::new(x, y),
        time_ms,
    }
}

fn tap(map: &mut MapEngine, rec: &mut Recorder, x: f64, y: f64, time_ms: u64) -> GestureOutcome {
    map.handle_input(down(x, y, time_ms), rec);
    map.handle_input(up(x, y, time_ms + 80), rec)
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn invalid_config_is_rejected() {
    let bad = MapConfig {
        min_zoom: 0.0,
        ..config()
    };
    let err = MapEngine::<()>::new(bad, MapMode::Display, SURFACE).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidZoom {
            what: "minimum",
            value: 0.0
        }
    );
}

#[test]
fn tap_selects_point_and_opens_card() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0), pt("b", 600.0, 300.0)]);
    let mut rec = Recorder::default();

    let outcome = tap(&mut map, &mut rec, 102.0, 101.0, 0);
    assert!(matches!(outcome, GestureOutcome::Tap(_)), "{outcome:?}");
    assert_eq!(rec.points, ["a"]);
    assert!(rec.clicks.is_empty());
    assert_eq!(map.selection(), Some(&Selection::Point("a".into())));

    let card = map.frame().card.expect("card is open");
    assert_eq!(card.id, "a");
    assert_eq!(card.kind, CardKind::Point);
    assert_eq!(card.placement.side, CardSide::Right);
    assert_eq!(card.placement.rect, Rect::new(116.0, 20.0, 396.0, 180.0));

    // The card is an overlay: presses on it do not reach the map.
    assert_eq!(
        map.handle_input(down(200.0, 100.0, 1_000), &mut rec),
        GestureOutcome::Ignored
    );
}

#[test]
fn tap_on_cluster_reports_members() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([
        pt("c1", 500.0, 250.0),
        pt("far", 100.0, 400.0),
        pt("c2", 510.0, 255.0),
    ]);
    let mut rec = Recorder::default();

    tap(&mut map, &mut rec, 505.0, 252.0, 0);
    assert_eq!(rec.clusters, [vec!["c1".to_owned(), "c2".to_owned()]]);
    assert!(rec.points.is_empty());
    assert_eq!(map.selection().map(Selection::id), Some("c1+c2"));

    let card = map.card().expect("card is open");
    assert_eq!(card.kind, CardKind::Cluster);
    assert!(close(card.anchor, Point::new(505.0, 252.5)));
}

#[test]
fn empty_tap_reports_map_coordinate_only_in_interactive_mode() {
    let mut rec = Recorder::default();

    let mut interactive = engine(MapMode::Interactive);
    interactive.set_points([pt("a", 100.0, 100.0)]);
    tap(&mut interactive, &mut rec, 800.0, 100.0, 0);
    assert_eq!(rec.clicks.len(), 1);
    assert!(close(rec.clicks[0], Point::new(800.0, 100.0)));

    let mut display = engine(MapMode::Display);
    display.set_points([pt("a", 100.0, 100.0)]);
    tap(&mut display, &mut rec, 800.0, 100.0, 0);
    assert_eq!(rec.clicks.len(), 1, "display mode reported a click");
    assert!(rec.points.is_empty());
}

#[test]
fn gestures_dismiss_the_card_and_never_select() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0), pt("b", 600.0, 300.0)]);
    let mut rec = Recorder::default();

    tap(&mut map, &mut rec, 100.0, 100.0, 0);
    assert!(map.selection().is_some());

    map.handle_input(down(800.0, 400.0, 1_000), &mut rec);
    let outcome = map.handle_input(drag(850.0, 400.0, 1_016), &mut rec);
    assert_eq!(
        outcome,
        GestureOutcome::FrameRequested {
            tap_possible: false
        }
    );
    assert!(map.selection().is_none());
    assert!(map.frame().card.is_none());
    map.handle_input(up(850.0, 400.0, 1_050), &mut rec);

    // A drag starting on a pin moves the map instead of selecting it.
    map.handle_input(down(650.0, 300.0, 3_000), &mut rec);
    map.handle_input(drag(675.0, 300.0, 3_016), &mut rec);
    let outcome = map.handle_input(up(675.0, 300.0, 3_100), &mut rec);
    assert_eq!(outcome, GestureOutcome::ViewChanged);
    assert_eq!(rec.points, ["a"]);
}

#[test]
fn host_overlays_swallow_presses() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0)]);
    let mut rec = Recorder::default();

    map.register_overlay(Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(
        map.handle_input(down(100.0, 100.0, 0), &mut rec),
        GestureOutcome::Ignored
    );
    assert!(rec.points.is_empty());

    map.clear_overlays();
    tap(&mut map, &mut rec, 100.0, 100.0, 1_000);
    assert_eq!(rec.points, ["a"]);
}

#[test]
fn hover_reports_each_change_once() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0)]);
    let mut rec = Recorder::default();

    map.pointer_hover(Point::new(100.0, 100.0), &mut rec);
    map.pointer_hover(Point::new(104.0, 98.0), &mut rec);
    assert_eq!(map.hovered(), Some("a"));
    map.pointer_hover(Point::new(400.0, 400.0), &mut rec);
    map.pointer_hover(Point::new(100.0, 100.0), &mut rec);
    map.pointer_left(&mut rec);

    assert_eq!(
        rec.hovers,
        [Some("a".to_owned()), None, Some("a".to_owned()), None]
    );
}

#[test]
fn detail_mode_focuses_the_highlight_once() {
    let highlight = Point::new(800.0, 400.0);
    let mut map = engine(MapMode::Detail { highlight });
    let mut rec = Recorder::default();
    assert!((map.viewport().zoom_level() - 4.0).abs() < 1e-9);

    let frame = map.frame();
    let marker = frame.highlight.expect("detail mode shows a highlight");
    assert_eq!(marker.map, highlight);
    assert!(Rect::from_origin_size(Point::ZERO, SURFACE).contains(marker.screen));

    // User zoom sticks; new points do not refocus.
    map.handle_input(
        GestureInput::Wheel {
            position: marker.screen,
            delta_y: 1.0,
        },
        &mut rec,
    );
    let zoomed = map.viewport().zoom_level();
    assert!((zoomed - 4.0 / 1.1).abs() < 1e-9);
    map.set_points([pt("a", 790.0, 390.0)]);
    assert!((map.viewport().zoom_level() - zoomed).abs() < 1e-12);

    // An explicit reset goes back to the highlight.
    assert!(map.reset_view());
    assert!((map.viewport().zoom_level() - 4.0).abs() < 1e-9);

    map.set_mode(MapMode::Interactive);
    assert!(map.frame().highlight.is_none());
}

#[test]
fn display_mode_refits_when_points_change() {
    let fit = MapConfig {
        reset_mode: ResetMode::Fit,
        ..config()
    };
    let mut map = MapEngine::new(fit, MapMode::Display, SURFACE).expect("valid config");

    map.set_points([pt("a", 100.0, 100.0), pt("b", 300.0, 200.0)]);
    assert!(close(map.viewport().view_box().center(), Point::new(200.0, 150.0)));

    map.set_points([pt("c", 700.0, 300.0), pt("d", 900.0, 400.0)]);
    assert!(close(map.viewport().view_box().center(), Point::new(800.0, 350.0)));

    let mut interactive = MapEngine::new(fit, MapMode::Interactive, SURFACE).expect("valid config");
    let before = interactive.viewport().view_box();
    interactive.set_points([pt("a", 100.0, 100.0), pt("b", 300.0, 200.0)]);
    assert_eq!(interactive.viewport().view_box(), before);
}

#[test]
fn points_without_coordinates_are_skipped() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([
        pt("a", 100.0, 100.0),
        InteractivePoint::new("ghost", None::<Point>),
        pt("nan", f64::NAN, 10.0),
    ]);
    let frame = map.frame();
    assert_eq!(frame.pins.len(), 1);
    assert_eq!(frame.pins[0].id, "a");
    assert_eq!(frame.labels.len(), 1);
    assert!(map.point("ghost").is_some());
}

#[test]
fn stale_selection_is_dropped_with_its_points() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0), pt("b", 600.0, 300.0)]);
    let mut rec = Recorder::default();
    tap(&mut map, &mut rec, 100.0, 100.0, 0);
    assert!(map.selection().is_some());

    map.set_points([pt("b", 600.0, 300.0)]);
    assert!(map.selection().is_none());
    assert!(map.card().is_none());
    assert_eq!(map.revision(), 2);
}

#[test]
fn teardown_cancels_pending_frames() {
    let mut map = engine(MapMode::Interactive);
    let mut rec = Recorder::default();
    map.handle_input(down(500.0, 250.0, 0), &mut rec);
    map.handle_input(drag(560.0, 250.0, 16), &mut rec);
    assert!(map.frame_pending());

    map.teardown();
    assert!(!map.frame_pending());
    assert!(!map.on_animation_frame());
    assert_eq!(map.gesture_mode(), GestureMode::Idle);
}

#[test]
fn coalesced_drag_applies_on_animation_frame() {
    let mut map = engine(MapMode::Interactive);
    let mut rec = Recorder::default();
    map.handle_input(down(500.0, 250.0, 0), &mut rec);
    map.handle_input(drag(520.0, 250.0, 8), &mut rec);
    map.handle_input(drag(560.0, 230.0, 16), &mut rec);
    let before = map.viewport().view_box();

    assert!(map.on_animation_frame());
    let after = map.viewport().view_box();
    assert!((after.x - (before.x - 60.0)).abs() < 1e-9);
    assert!((after.y - (before.y + 20.0)).abs() < 1e-9);
    assert!(!map.on_animation_frame(), "second frame had nothing to apply");
}

#[test]
fn surface_changes_move_pins_and_respect_letterboxing() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 100.0, 100.0)]);

    map.set_surface_size(Size::new(500.0, 250.0));
    assert!(close(map.pins()[0].screen, Point::new(50.0, 50.0)));

    // Square surface: the map is letterboxed by 250px above and below.
    map.set_surface_size(Size::new(1000.0, 1000.0));
    assert!(close(map.pins()[0].screen, Point::new(100.0, 350.0)));
    let mut rec = Recorder::default();
    tap(&mut map, &mut rec, 100.0, 350.0, 0);
    assert_eq!(rec.points, ["a"]);
}

#[test]
fn labels_follow_pins_and_never_overlap() {
    let mut map = engine(MapMode::Interactive);
    let points: Vec<InteractivePoint> = (0..10_u8)
        .flat_map(|i| {
            (0..5_u8).map(move |j| {
                pt(
                    &format!("p{i}-{j}"),
                    50.0 + 100.0 * f64::from(i),
                    50.0 + 100.0 * f64::from(j),
                )
            })
        })
        .collect();
    map.set_points(points);
    let frame = map.frame();

    assert_eq!(frame.pins.len(), 50);
    assert_eq!(frame.labels.len(), frame.pins.len());
    for (pin, label) in frame.pins.iter().zip(&frame.labels) {
        assert_eq!(pin.id, label.id);
    }
    let rects: Vec<Rect> = frame.labels.iter().filter_map(|l| l.rect).collect();
    assert!(!rects.is_empty());
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(
                !wayfinder_label::overlaps(*a, *b),
                "labels {a:?} and {b:?} overlap"
            );
        }
        for pin in &frame.pins {
            assert!(
                !wayfinder_label::overlaps(*a, pin.hit_box),
                "label {a:?} covers pin {}",
                pin.id
            );
        }
        let surface = Rect::from_origin_size(Point::ZERO, SURFACE);
        assert_eq!(surface.union(*a), surface, "label {a:?} leaves the surface");
    }
}

#[test]
fn labels_avoid_pins_beyond_the_surface_edge() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 985.0, 250.0), pt("b", 1060.0, 250.0)]);
    let frame = map.frame();

    let b = frame.pins.iter().find(|p| p.id == "b").expect("pin b");
    assert!(!b.visible);
    let a = frame.labels.iter().find(|l| l.id == "a").expect("label a");
    assert_eq!(a.side, Some(LabelSide::Left));
    let rect = a.rect.expect("label a is shown");
    assert!(!wayfinder_label::overlaps(rect, b.hit_box));
    assert!(rect.x1 <= SURFACE.width);

    let hidden = frame.labels.iter().find(|l| l.id == "b").expect("label b");
    assert!(!hidden.visible);
}

#[test]
fn refit_drops_a_cluster_selection_that_split() {
    let fit = MapConfig {
        reset_mode: ResetMode::Fit,
        min_zoom: 0.25,
        ..config()
    };
    let mut map = MapEngine::new(fit, MapMode::Display, SURFACE).expect("valid config");
    let mut rec = Recorder::default();

    // The far point zooms the fit out enough to merge c1 and c2.
    map.set_points([
        pt("c1", 500.0, 250.0),
        pt("c2", 550.0, 250.0),
        pt("far", 1700.0, 250.0),
    ]);
    assert!(map.viewport().zoom_level() < 0.64);
    let pin = map
        .pins()
        .iter()
        .find(|p| p.id == "c1+c2")
        .expect("merged pin")
        .screen;
    tap(&mut map, &mut rec, pin.x, pin.y, 0);
    assert_eq!(map.selection().map(Selection::id), Some("c1+c2"));

    // Without it the fit returns to zoom 1 and the cluster splits.
    map.set_points([pt("c1", 500.0, 250.0), pt("c2", 550.0, 250.0)]);
    assert!((map.viewport().zoom_level() - 1.0).abs() < 1e-9);
    assert!(map.selection().is_none());
    assert!(map.card().is_none());
}

#[test]
fn double_tap_zooms_and_closes_the_card() {
    let mut map = engine(MapMode::Interactive);
    map.set_points([pt("a", 500.0, 250.0)]);
    let mut rec = Recorder::default();

    tap(&mut map, &mut rec, 500.0, 250.0, 0);
    assert!(map.selection().is_some());
    let outcome = tap(&mut map, &mut rec, 500.0, 250.0, 150);
    assert_eq!(outcome, GestureOutcome::DoubleTap { level: 2.0 });
    assert!(map.selection().is_none());
    assert_eq!(rec.points, ["a"]);
}

#[cfg(feature = "serde")]
#[test]
fn frames_serialize() {
    let mut map = engine(MapMode::Detail {
        highlight: Point::new(500.0, 250.0),
    });
    map.set_points([pt("a", 480.0, 240.0), pt("b", 520.0, 260.0)]);
    let frame = map.frame();
    let json = serde_json::to_string(&frame).expect("frame serializes");
    let back: wayfinder_map::Frame = serde_json::from_str(&json).expect("frame deserializes");
    assert_eq!(back, frame);
}
