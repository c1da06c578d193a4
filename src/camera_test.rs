#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn limits() -> ZoomLimits {
    ZoomLimits::default()
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_surface / surface_to_screen ---

#[test]
fn screen_to_surface_identity() {
    let cam = Camera::default();
    let s = cam.screen_to_surface(Point::new(50.0, 75.0));
    assert!(point_approx_eq(s, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_surface_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let s = cam.screen_to_surface(Point::new(40.0, 80.0));
    assert!(point_approx_eq(s, Point::new(10.0, 20.0)));
}

#[test]
fn screen_to_surface_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    // (20-20)/2 = 0, (10-10)/2 = 0
    let s = cam.screen_to_surface(Point::new(20.0, 10.0));
    assert!(point_approx_eq(s, Point::new(0.0, 0.0)));
}

#[test]
fn surface_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let s = cam.surface_to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(s, Point::new(35.0, 25.0)));
}

#[test]
fn round_trip_fractional_zoom() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let p = Point::new(333.3, -999.9);
    let back = cam.screen_to_surface(cam.surface_to_screen(p));
    assert!(point_approx_eq(p, back));
}

// --- pan_by ---

#[test]
fn pan_by_accumulates_raw_pixels() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 3.0 };
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.5, 1.0);
    assert_eq!(cam.pan_x, 12.5);
    assert_eq!(cam.pan_y, -4.0);
    assert_eq!(cam.zoom, 3.0);
}

#[test]
fn pan_is_not_clamped() {
    let mut cam = Camera::default();
    cam.pan_by(-1.0e6, 1.0e6);
    assert_eq!(cam.pan_x, -1.0e6);
    assert_eq!(cam.pan_y, 1.0e6);
}

// --- ZoomDirection ---

#[test]
fn wheel_up_zooms_in() {
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 0.0, dy: -100.0 }), Some(ZoomDirection::In));
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 0.0, dy: 3.0 }), Some(ZoomDirection::Out));
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 5.0, dy: 0.0 }), None);
}

// --- zoom_at ---

#[test]
fn zoom_in_at_pan_origin_keeps_offset() {
    let mut cam = Camera::default();
    let changed = cam.zoom_at(Point::new(0.0, 0.0), ZoomDirection::In, limits());
    assert!(changed);
    assert!(approx_eq(cam.zoom, 1.1));
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
}

#[test]
fn zoom_out_divides_by_step() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), ZoomDirection::Out, limits());
    assert!(approx_eq(cam.zoom, 1.0 / 1.1));
}

#[test]
fn zoom_follows_anchor_formula() {
    let mut cam = Camera { pan_x: 30.0, pan_y: -10.0, zoom: 2.0 };
    cam.zoom_at(Point::new(200.0, 100.0), ZoomDirection::In, limits());
    let ratio = 2.2 / 2.0;
    assert!(approx_eq(cam.pan_x, 200.0 - (200.0 - 30.0) * ratio));
    assert!(approx_eq(cam.pan_y, 100.0 - (100.0 + 10.0) * ratio));
}

#[test]
fn zoom_keeps_point_under_anchor() {
    let anchors = [Point::new(0.0, 0.0), Point::new(123.0, 45.0), Point::new(-50.0, 800.0)];
    for anchor in anchors {
        let mut cam = Camera { pan_x: 17.0, pan_y: -3.0, zoom: 1.3 };
        for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
            let before = cam.screen_to_surface(anchor);
            cam.zoom_at(anchor, direction, limits());
            let after = cam.screen_to_surface(anchor);
            assert!((before.x - after.x).abs() < 1e-9);
            assert!((before.y - after.y).abs() < 1e-9);
        }
    }
}

#[test]
fn zoom_clamps_to_max() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom_at(Point::new(10.0, 10.0), ZoomDirection::In, limits());
    }
    assert_eq!(cam.zoom, ZOOM_MAX);
}

#[test]
fn zoom_clamps_to_min() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom_at(Point::new(10.0, 10.0), ZoomDirection::Out, limits());
    }
    assert_eq!(cam.zoom, ZOOM_MIN);
}

#[test]
fn zoom_at_limit_reports_no_change() {
    let mut cam = Camera { pan_x: 4.0, pan_y: 4.0, zoom: ZOOM_MAX };
    assert!(!cam.zoom_at(Point::new(50.0, 50.0), ZoomDirection::In, limits()));
    assert_eq!(cam.pan_x, 4.0);
    assert_eq!(cam.pan_y, 4.0);
}

#[test]
fn zoom_to_clamps_and_anchors() {
    let mut cam = Camera::default();
    assert!(cam.zoom_to(Point::new(100.0, 0.0), 50.0, limits()));
    assert_eq!(cam.zoom, ZOOM_MAX);
    assert!(approx_eq(cam.pan_x, 100.0 - 100.0 * ZOOM_MAX));
}

#[test]
fn zoom_with_inverted_limits_is_noop() {
    let mut cam = Camera::default();
    let inverted = ZoomLimits { min: 5.0, max: 0.2, step: 1.1 };
    assert!(!inverted.is_valid());
    assert!(!cam.zoom_at(Point::new(10.0, 10.0), ZoomDirection::In, inverted));
    assert_eq!(cam, Camera::default());
}

#[test]
fn zoom_to_nan_is_noop() {
    let mut cam = Camera::default();
    assert!(!cam.zoom_to(Point::new(10.0, 10.0), f64::NAN, limits()));
    assert_eq!(cam, Camera::default());
}

// --- css_transform ---

#[test]
fn css_transform_formats_pan_then_scale() {
    let cam = Camera { pan_x: 12.5, pan_y: -4.0, zoom: 2.0 };
    assert_eq!(cam.css_transform(), "translate(12.5px, -4px) scale(2)");
}

// --- reset ---

#[test]
fn reset_restores_identity() {
    let mut cam = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 2.5 };
    cam.reset();
    assert_eq!(cam, Camera::default());
}
