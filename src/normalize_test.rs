#![allow(clippy::float_cmp)]

use super::*;

const TOLERANCE: f64 = 1e-6;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn surface(w: f64, h: f64) -> SurfaceSize {
    SurfaceSize::new(w, h)
}

// =============================================================
// SurfaceSize
// =============================================================

#[test]
fn surface_validity() {
    assert!(surface(400.0, 250.0).is_valid());
    assert!(!surface(0.0, 250.0).is_valid());
    assert!(!surface(400.0, 0.0).is_valid());
    assert!(!surface(-1.0, 10.0).is_valid());
    assert!(!surface(f64::NAN, 10.0).is_valid());
    assert!(!surface(f64::INFINITY, 10.0).is_valid());
}

#[test]
fn surface_validate_reports_dimensions() {
    let err = surface(0.0, 250.0).validate().unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidSurface { width, height } if width == 0.0 && height == 250.0));
}

// =============================================================
// to_normalized
// =============================================================

#[test]
fn to_normalized_at_identity_camera() {
    let p = to_normalized(Point::new(100.0, 100.0), &Camera::default(), surface(400.0, 250.0)).unwrap();
    assert!(close(p.x, 0.25));
    assert!(close(p.y, 0.4));
}

#[test]
fn to_normalized_removes_zoom_and_pan() {
    let cam = Camera { pan_x: 50.0, pan_y: 20.0, zoom: 2.0 };
    // (250-50)/2 = 100 -> 100/400; (120-20)/2 = 50 -> 50/250
    let p = to_normalized(Point::new(250.0, 120.0), &cam, surface(400.0, 250.0)).unwrap();
    assert!(close(p.x, 0.25));
    assert!(close(p.y, 0.2));
}

#[test]
fn to_normalized_clamps_outside_points() {
    let p = to_normalized(Point::new(-30.0, 900.0), &Camera::default(), surface(400.0, 250.0)).unwrap();
    assert_eq!(p, StrokePoint::new(0.0, 1.0));
}

#[test]
fn to_normalized_rejects_zero_surface() {
    let r = to_normalized(Point::new(1.0, 1.0), &Camera::default(), surface(0.0, 0.0));
    assert!(matches!(r, Err(NormalizeError::InvalidSurface { .. })));
}

// =============================================================
// to_surface_pixels
// =============================================================

#[test]
fn to_surface_pixels_scales_by_surface() {
    let px = to_surface_pixels(StrokePoint::new(0.5, 0.25), surface(800.0, 500.0));
    assert_eq!(px, Point::new(400.0, 125.0));
}

#[test]
fn round_trip_is_independent_of_zoom() {
    let size = surface(640.0, 400.0);
    let logical = [Point::new(0.0, 0.0), Point::new(320.0, 200.0), Point::new(639.5, 12.25), Point::new(1.0, 399.0)];
    let zooms = [0.2, 0.5, 1.0, 1.1, 2.75, 5.0];
    let pans = [(0.0, 0.0), (-120.0, 33.0), (411.0, -7.5)];

    for l in logical {
        for zoom in zooms {
            for (pan_x, pan_y) in pans {
                let cam = Camera { pan_x, pan_y, zoom };
                let screen = cam.surface_to_screen(l);
                let back = to_surface_pixels(to_normalized(screen, &cam, size).unwrap(), size);
                assert!(close(back.x, l.x), "x {} vs {} at zoom {zoom}", back.x, l.x);
                assert!(close(back.y, l.y), "y {} vs {} at zoom {zoom}", back.y, l.y);
            }
        }
    }
}

#[test]
fn same_point_maps_proportionally_on_any_surface() {
    let p = StrokePoint::new(0.3, 0.6);
    let a = to_surface_pixels(p, surface(400.0, 250.0));
    let b = to_surface_pixels(p, surface(160.0, 100.0));
    assert!(close(a.x / 400.0, b.x / 160.0));
    assert!(close(a.y / 250.0, b.y / 100.0));
}

// =============================================================
// length_to_normalized
// =============================================================

#[test]
fn length_uses_surface_width() {
    assert!(close(length_to_normalized(20.0, surface(400.0, 1000.0)).unwrap(), 0.05));
}

#[test]
fn length_rejects_invalid_surface() {
    assert!(length_to_normalized(20.0, surface(0.0, 10.0)).is_err());
}
