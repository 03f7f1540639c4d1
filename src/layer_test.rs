#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::gesture::GestureKind;
use crate::hit::HitPart;
use crate::projection::WebMercator;
use crate::quad::Anchor;

const EPSILON: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square_points() -> Vec<Point> {
    vec![pt(0.0, 100.0), pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]
}

fn layer() -> TransformLayer {
    TransformLayer::new(&square_points(), TransformOptions::default()).unwrap()
}

fn placements(actions: &[Action]) -> Vec<&Placement> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Placement(p) => Some(p),
            Action::Gesture(_) => None,
        })
        .collect()
}

fn gestures(actions: &[Action]) -> Vec<&GestureEvent> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Gesture(ev) => Some(ev),
            Action::Placement(_) => None,
        })
        .collect()
}

// =============================================================
// Construction and corners
// =============================================================

#[test]
fn new_rejects_bad_corner_count() {
    let err = TransformLayer::new(&[pt(0.0, 0.0), pt(1.0, 1.0)], TransformOptions::default()).unwrap_err();
    assert!(matches!(err, TransformError::InvalidGeometry(_)));
}

#[test]
fn new_rejects_invalid_options() {
    let opts = TransformOptions { handle_radius: -1.0, ..TransformOptions::default() };
    assert!(matches!(TransformLayer::new(&square_points(), opts), Err(TransformError::ConfigParse(_))));
}

#[test]
fn three_corners_complete_the_parallelogram() {
    let layer = TransformLayer::new(&square_points()[..3], TransformOptions::default()).unwrap();
    assert_eq!(layer.quad().bottom_right(), pt(100.0, 100.0));
}

#[test]
fn layers_get_distinct_ids() {
    assert_ne!(layer().id(), layer().id());
}

#[test]
fn set_corners_returns_placement() {
    let mut layer = layer();
    let placement = layer.set_corners(&[pt(10.0, 60.0), pt(10.0, 10.0), pt(60.0, 10.0), pt(60.0, 60.0)]).unwrap();
    assert_eq!(placement.layer, layer.id());
    assert_eq!(placement.bounds.min, pt(10.0, 10.0));
    assert_eq!(placement.bounds.size, pt(50.0, 50.0));
    assert!(placement.affine.is_none());
}

#[test]
fn invalid_corners_leave_layer_unchanged() {
    let mut layer = layer();
    let before = *layer.quad();
    let err = layer.set_corners(&[pt(f64::NAN, 0.0), pt(0.0, 0.0), pt(1.0, 0.0)]).unwrap_err();
    assert!(matches!(err, TransformError::InvalidGeometry(_)));
    assert_eq!(*layer.quad(), before);
}

// =============================================================
// Bitmap and transform
// =============================================================

#[test]
fn unrotated_square_half_scale() {
    let mut layer = layer();
    let actions = layer.set_bitmap_size(Size::new(200.0, 200.0));
    assert_eq!(placements(&actions).len(), 1);
    let params = layer.current_transform().unwrap();
    assert!((params.scale_x - 0.5).abs() < EPSILON);
    assert!((params.scale_y - 0.5).abs() < EPSILON);
    assert_eq!(params.skew_x, 0.0);
    assert_eq!(params.skew_y, 0.0);
    assert_eq!(params.translate, pt(0.0, 0.0));
}

#[test]
fn placement_carries_css_once_bitmap_known() {
    let mut layer = layer();
    assert!(layer.placement().css.is_none());
    layer.set_bitmap_size(Size::new(100.0, 100.0));
    assert_eq!(layer.placement().css.as_deref(), Some("translate(0px, 0px) skew(0rad, 0rad) scale(1, 1)"));
}

#[test]
fn zero_bitmap_size_suppresses_transform() {
    let mut layer = layer();
    layer.set_bitmap_size(Size::new(200.0, 200.0));
    let actions = layer.set_bitmap_size(Size::new(0.0, 0.0));
    assert!(actions.is_empty());
    assert!(layer.bitmap_size().is_none());
    assert!(layer.current_transform().is_none());
}

#[test]
fn degenerate_quad_has_zero_scale() {
    let mut layer = TransformLayer::new(&[pt(5.0, 5.0); 4], TransformOptions::default()).unwrap();
    layer.set_bitmap_size(Size::new(100.0, 100.0));
    let params = layer.current_transform().unwrap();
    assert_eq!(params.scale_x, 0.0);
    assert_eq!(params.scale_y, 0.0);
}

#[test]
fn fit_to_image_widens_on_load() {
    let opts = TransformOptions { fit_to_image: true, ..TransformOptions::default() };
    let mut layer = TransformLayer::new(&square_points(), opts).unwrap();
    layer.set_bitmap_size(Size::new(200.0, 100.0));
    assert!((layer.quad().width() - 200.0).abs() < EPSILON);
    assert!((layer.quad().height() - 100.0).abs() < EPSILON);
    assert_eq!(layer.quad().top_left(), pt(0.0, 0.0));
    let params = layer.current_transform().unwrap();
    assert!((params.scale_x - 1.0).abs() < EPSILON);
    assert!((params.scale_y - 1.0).abs() < EPSILON);
}

#[test]
fn fit_is_off_by_default() {
    let mut layer = layer();
    layer.set_bitmap_size(Size::new(200.0, 100.0));
    assert_eq!(layer.quad().width(), 100.0);
}

#[test]
fn fit_reruns_when_corners_change() {
    let opts = TransformOptions { fit_to_image: true, ..TransformOptions::default() };
    let mut layer = TransformLayer::new(&square_points(), opts).unwrap();
    layer.set_bitmap_size(Size::new(200.0, 100.0));
    layer.set_corners(&square_points()).unwrap();
    assert!((layer.quad().width() - 200.0).abs() < EPSILON);
}

#[test]
fn enabling_fit_applies_it() {
    let mut layer = layer();
    layer.set_bitmap_size(Size::new(200.0, 100.0));
    let opts = TransformOptions { fit_to_image: true, ..TransformOptions::default() };
    let actions = layer.set_options(opts).unwrap();
    assert_eq!(placements(&actions).len(), 1);
    assert!((layer.quad().width() - 200.0).abs() < EPSILON);
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn drag_body_translates() {
    let mut layer = layer();
    let down = layer.apply_gesture(PointerEvent::down(pt(50.0, 50.0), None));
    assert_eq!(gestures(&down)[0].name(), "dragstart");

    let moved = layer.apply_gesture(PointerEvent::moved(pt(60.0, 45.0)));
    let placement = placements(&moved)[0];
    assert_eq!(placement.quad, Quad::from_points(&square_points()).unwrap().translate(10.0, -5.0));
    assert_eq!(placement.bounds.min, pt(10.0, -5.0));
    assert_eq!(gestures(&moved)[0].name(), "drag");

    let up = layer.apply_gesture(PointerEvent::up(pt(60.0, 45.0)));
    let end = gestures(&up)[0];
    assert_eq!(end.name(), "dragend");
    assert_eq!(end.quad.top_left(), pt(10.0, -5.0));
    assert!(!layer.is_dragging());
}

#[test]
fn scale_top_right_handle_by_hit_test() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(100.0, 0.0), None));
    assert_eq!(layer.gestures.session().and_then(|s| s.anchor), Some(Anchor::TopRight));
    layer.apply_gesture(PointerEvent::moved(pt(120.0, 0.0)));
    let q = layer.quad();
    assert_eq!(q.top_right(), pt(120.0, 0.0));
    assert_eq!(q.bottom_right(), pt(120.0, 100.0));
    assert_eq!(q.top_left(), pt(0.0, 0.0));
    assert_eq!(q.bottom_left(), pt(0.0, 100.0));
}

#[test]
fn rotate_handle_turns_layer() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(50.0, -20.0), None));
    assert_eq!(layer.gestures.session().map(|s| s.kind), Some(GestureKind::Rotate));
    layer.apply_gesture(PointerEvent::moved(pt(120.0, 50.0)));
    assert!((layer.orientation() - FRAC_PI_2).abs() < EPSILON);
}

#[test]
fn explicit_target_skips_hit_test() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(500.0, 500.0), Some(HitPart::Body)));
    assert!(layer.is_dragging());
}

#[test]
fn down_outside_quad_does_nothing() {
    let mut layer = layer();
    assert!(layer.apply_gesture(PointerEvent::down(pt(500.0, 500.0), None)).is_empty());
    assert!(!layer.is_dragging());
}

#[test]
fn disabled_move_ignores_body() {
    let opts = TransformOptions { movable: false, ..TransformOptions::default() };
    let mut layer = TransformLayer::new(&square_points(), opts).unwrap();
    assert!(layer.apply_gesture(PointerEvent::down(pt(50.0, 50.0), None)).is_empty());
    assert!(layer.apply_gesture(PointerEvent::moved(pt(70.0, 70.0))).is_empty());
    assert_eq!(layer.quad().top_left(), pt(0.0, 0.0));
}

#[test]
fn zero_delta_move_emits_nothing() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(50.0, 50.0), None));
    assert!(layer.apply_gesture(PointerEvent::moved(pt(50.0, 50.0))).is_empty());
}

#[test]
fn cancel_restores_start_quad() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(50.0, 50.0), None));
    layer.apply_gesture(PointerEvent::moved(pt(90.0, 90.0)));
    let actions = layer.cancel_gesture();
    assert_eq!(placements(&actions)[0].quad.top_left(), pt(0.0, 0.0));
    assert_eq!(gestures(&actions)[0].name(), "dragend");
    assert!(!layer.is_dragging());
    assert!(layer.cancel_gesture().is_empty());
}

#[test]
fn set_options_cancels_active_session() {
    let mut layer = layer();
    layer.apply_gesture(PointerEvent::down(pt(50.0, 50.0), None));
    layer.apply_gesture(PointerEvent::moved(pt(90.0, 90.0)));
    let opts = TransformOptions { rotatable: false, ..TransformOptions::default() };
    layer.set_options(opts).unwrap();
    assert!(!layer.is_dragging());
    assert_eq!(layer.quad().top_left(), pt(0.0, 0.0));
    assert!(layer.handles().rotate.is_none());
}

#[test]
fn gesture_updates_transform() {
    let mut layer = layer();
    layer.set_bitmap_size(Size::new(100.0, 100.0));
    layer.apply_gesture(PointerEvent::down(pt(100.0, 50.0), None));
    let actions = layer.apply_gesture(PointerEvent::moved(pt(200.0, 50.0)));
    let params = placements(&actions)[0].affine.unwrap();
    assert!((params.scale_x - 2.0).abs() < EPSILON);
    assert!((params.scale_y - 1.0).abs() < EPSILON);
}

// =============================================================
// Programmatic transforms
// =============================================================

#[test]
fn rotate_quarter_turn() {
    let mut layer = layer();
    layer.rotate(FRAC_PI_2);
    assert!((layer.orientation() - FRAC_PI_2).abs() < EPSILON);
    assert!((layer.center().x - 50.0).abs() < EPSILON);
    assert!((layer.center().y - 50.0).abs() < EPSILON);
}

#[test]
fn move_to_recenters() {
    let mut layer = layer();
    let placement = layer.move_to(pt(200.0, 300.0));
    assert_eq!(layer.center(), pt(200.0, 300.0));
    assert_eq!(placement.bounds.min, pt(150.0, 250.0));
}

// =============================================================
// Geographic glue
// =============================================================

#[test]
fn geo_bounds_round_trip() {
    let proj = WebMercator::with_origin(10.0, pt(130_000.0, 87_000.0));
    let bounds = GeoBounds { south_west: GeoPoint::new(51.49, -0.13), north_east: GeoPoint::new(51.51, -0.10) };
    let layer = TransformLayer::from_geo_bounds(&proj, bounds, TransformOptions::default()).unwrap();
    let back = layer.geo_bounds(&proj);
    assert!((back.south_west.lat - 51.49).abs() < 1e-9);
    assert!((back.south_west.lng + 0.13).abs() < 1e-9);
    assert!((back.north_east.lat - 51.51).abs() < 1e-9);
    assert!((back.north_east.lng + 0.10).abs() < 1e-9);
}

#[test]
fn geo_corners_follow_corner_order() {
    let proj = WebMercator::new(8.0);
    let corners = [
        GeoPoint::new(10.0, 20.0),
        GeoPoint::new(11.0, 20.0),
        GeoPoint::new(11.0, 21.0),
        GeoPoint::new(10.0, 21.0),
    ];
    let mut layer = TransformLayer::from_geo(&proj, &corners, TransformOptions::default()).unwrap();
    for (got, want) in layer.geo_corners(&proj).iter().zip(corners.iter()) {
        assert!((got.lat - want.lat).abs() < 1e-9);
        assert!((got.lng - want.lng).abs() < 1e-9);
    }
    assert!(layer.quad().bottom_left().y > layer.quad().top_left().y);

    layer.set_geo_corners(&proj, &corners[..3]).unwrap();
    let derived = layer.geo_corners(&proj)[3];
    assert!((derived.lng - 21.0).abs() < 1e-9);
}
