#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn black() -> HexColor {
    HexColor::parse("#000000").unwrap()
}

fn make_stroke(x: f64, y: f64) -> Stroke {
    Stroke::new(black(), 5.0, false, StrokePoint::new(x, y))
}

// =============================================================
// StrokePoint
// =============================================================

#[test]
fn point_clamped_limits_to_unit_square() {
    assert_eq!(StrokePoint::new(-0.5, 1.5).clamped(), StrokePoint::new(0.0, 1.0));
    assert_eq!(StrokePoint::new(0.3, 0.7).clamped(), StrokePoint::new(0.3, 0.7));
}

#[test]
fn point_clamped_handles_non_finite() {
    let p = StrokePoint::new(f64::NAN, f64::INFINITY).clamped();
    assert_eq!(p, StrokePoint::new(0.0, 1.0));
}

#[test]
fn point_distance_is_euclidean() {
    let d = StrokePoint::new(0.0, 0.0).distance(StrokePoint::new(0.3, 0.4));
    assert!((d - 0.5).abs() < 1e-12);
}

// =============================================================
// Stroke serde
// =============================================================

#[test]
fn stroke_serializes_camel_case() {
    let s = Stroke::new(HexColor::parse("#EF4444").unwrap(), 7.0, true, StrokePoint::new(0.25, 0.4));
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(
        v,
        json!({
            "color": "#EF4444",
            "strokeWidth": 7.0,
            "isHighlighter": true,
            "points": [{ "x": 0.25, "y": 0.4 }],
        })
    );
}

#[test]
fn stroke_deserialize_tolerates_missing_points() {
    let s: Stroke = serde_json::from_value(json!({ "color": "#000", "strokeWidth": 3.0 })).unwrap();
    assert!(s.is_empty());
    assert!(!s.is_highlighter);
}

#[test]
fn stroke_deserialize_keeps_out_of_range_points() {
    let s: Stroke = serde_json::from_value(json!({
        "color": "#000",
        "points": [{ "x": 1.7, "y": -0.2 }],
    }))
    .unwrap();
    assert_eq!(s.points[0], StrokePoint::new(1.7, -0.2));
    assert_eq!(s.stroke_width, PEN_WIDTH_DEFAULT);
}

#[test]
fn stroke_deserialize_rejects_sentinel_color() {
    let r: Result<Stroke, _> = serde_json::from_value(json!({ "color": "eraser", "points": [] }));
    assert!(r.is_err());
}

// =============================================================
// Page
// =============================================================

#[test]
fn page_blank_constructor() {
    let p = Page::blank("1");
    assert_eq!(p.id, "1");
    assert_eq!(p.kind, PageKind::Blank);
    assert!(p.strokes.is_empty());
    assert!(!p.has_image());
}

#[test]
fn page_image_constructor() {
    let p = Page::image("2", "data:image/png;base64,AAAA");
    assert_eq!(p.kind, PageKind::Image);
    assert!(p.has_image());
}

#[test]
fn page_serde_shape() {
    let mut p = Page::image("7", "https://example.test/a.png");
    p.strokes.push(make_stroke(0.1, 0.2));
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["kind"], "image");
    assert_eq!(v["imageSource"], "https://example.test/a.png");
    assert_eq!(v["strokes"][0]["points"][0]["x"], 0.1);

    let back: Page = serde_json::from_value(v).unwrap();
    assert_eq!(back, p);
}

#[test]
fn page_blank_omits_image_source() {
    let v = serde_json::to_value(Page::blank("1")).unwrap();
    assert!(v.get("imageSource").is_none());
}

// =============================================================
// StrokeStore
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = StrokeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn store_begin_appends_on_top() {
    let mut store = StrokeStore::new();
    let a = store.begin(make_stroke(0.1, 0.1));
    let b = store.begin(make_stroke(0.2, 0.2));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(store.strokes()[1].points[0], StrokePoint::new(0.2, 0.2));
}

#[test]
fn store_extend_through_handle() {
    let mut store = StrokeStore::new();
    let h = store.begin(make_stroke(0.1, 0.1));
    assert!(store.extend(h, StrokePoint::new(0.2, 0.3)));
    assert_eq!(store.get(0).unwrap().points.len(), 2);
}

#[test]
fn store_extend_stale_handle_is_noop() {
    let mut store = StrokeStore::new();
    let h = store.begin(make_stroke(0.1, 0.1));
    store.clear();
    assert!(!store.extend(h, StrokePoint::new(0.2, 0.3)));
    assert!(store.is_empty());
}

#[test]
fn store_load_replaces() {
    let mut store = StrokeStore::new();
    store.begin(make_stroke(0.1, 0.1));
    store.load(vec![make_stroke(0.5, 0.5), make_stroke(0.6, 0.6)]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.strokes()[0].points[0], StrokePoint::new(0.5, 0.5));
}

#[test]
fn store_retain_reports_removed() {
    let mut store = StrokeStore::new();
    store.load(vec![make_stroke(0.1, 0.1), make_stroke(0.9, 0.9), make_stroke(0.2, 0.2)]);
    let removed = store.retain(|s| s.points[0].x < 0.5);
    assert_eq!(removed, 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn store_clear_reports_removed() {
    let mut store = StrokeStore::new();
    store.load(vec![make_stroke(0.1, 0.1), make_stroke(0.2, 0.2)]);
    assert_eq!(store.clear(), 2);
    assert!(store.is_empty());
}

#[test]
fn store_snapshot_is_independent_copy() {
    let mut store = StrokeStore::new();
    store.load(vec![make_stroke(0.1, 0.1)]);
    let snap = store.snapshot();
    store.clear();
    assert_eq!(snap.len(), 1);
    assert!(store.is_empty());
}
