mod common;

use std::path::Path;
use std::sync::Arc;

use approx::assert_abs_diff_eq;

use loupe_core::config::ViewerConfig;
use loupe_core::error::LoupeError;
use loupe_core::geometry::DisplaySize;
use loupe_core::navigation::PanDirection;
use loupe_core::render::NullRenderer;
use loupe_core::session::{Layout, ViewerSession};
use loupe_core::viewport::ZoomDirection;

use common::{assert_pan_in_bounds, SizedLoader};

fn images() -> SizedLoader {
    SizedLoader::new(&[
        ("a.jpg", 2000, 1000),
        ("b.jpg", 2000, 1000),
        ("c.jpg", 1000, 500),
        ("tall.jpg", 600, 3000),
    ])
}

fn session_with(loader: Arc<SizedLoader>, config: ViewerConfig) -> ViewerSession {
    ViewerSession::new(config, loader, Arc::new(NullRenderer)).unwrap()
}

fn session() -> ViewerSession {
    session_with(Arc::new(images()), ViewerConfig::default())
}

fn primary_params(s: &ViewerSession) -> loupe_core::viewport::ViewportParams {
    s.primary_viewport().unwrap().export_params().unwrap()
}

fn secondary_params(s: &ViewerSession) -> loupe_core::viewport::ViewportParams {
    s.secondary_viewport().unwrap().export_params().unwrap()
}

#[test]
fn test_set_primary_fits_to_display() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();

    let vp = s.primary_viewport().unwrap();
    assert_eq!(vp.display(), Some(DisplaySize::new(800, 600)));
    assert_abs_diff_eq!(vp.linear_zoom().unwrap(), 0.4, epsilon = 1e-12);
}

#[test]
fn test_operations_need_primary() {
    let mut s = session();
    assert!(matches!(
        s.zoom(ZoomDirection::In, None),
        Err(LoupeError::NoImage("primary"))
    ));
    assert!(matches!(s.pan(1.0, 1.0), Err(LoupeError::NoImage("primary"))));
    // Resizing without an image only records the size.
    s.resize(DisplaySize::new(1024, 768)).unwrap();
    assert_eq!(s.display(), DisplaySize::new(1024, 768));
}

#[test]
fn test_missing_image_leaves_session_unchanged() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();

    let err = s.set_primary(Path::new("nope.jpg")).unwrap_err();
    assert!(matches!(err, LoupeError::NotFound(_)));
    assert_eq!(s.primary(), Some(Path::new("a.jpg")));

    assert!(s.set_secondary(Path::new("nope.jpg")).is_err());
    assert_eq!(s.secondary(), None);
}

#[test]
fn test_single_layout_does_not_follow() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_secondary(Path::new("b.jpg")).unwrap();
    let before = secondary_params(&s);

    s.zoom(ZoomDirection::In, None).unwrap();
    assert_eq!(secondary_params(&s), before);
    assert_ne!(primary_params(&s), before);
}

#[test]
fn test_double_layout_follows_primary() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_secondary(Path::new("b.jpg")).unwrap();
    s.set_layout(Layout::Double).unwrap();

    s.zoom(ZoomDirection::In, Some((100.0, 100.0))).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    s.pan(120.0, -30.0).unwrap();
    assert_eq!(primary_params(&s), secondary_params(&s));

    s.pan_direction(PanDirection::Down).unwrap();
    assert_eq!(primary_params(&s), secondary_params(&s));
}

#[test]
fn test_double_layout_with_smaller_secondary_stays_in_bounds() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_secondary(Path::new("c.jpg")).unwrap();
    s.set_layout(Layout::Double).unwrap();

    for _ in 0..4 {
        s.zoom(ZoomDirection::In, None).unwrap();
    }
    s.pan(5000.0, 5000.0).unwrap();

    let p = primary_params(&s);
    let q = secondary_params(&s);
    assert_eq!(p.zoom_level, q.zoom_level);
    assert_pan_in_bounds(s.secondary_viewport().unwrap());
}

#[test]
fn test_entering_double_layout_mirrors_primary() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.toggle_layout().unwrap();

    assert_eq!(s.layout(), Layout::Double);
    assert_eq!(s.secondary(), Some(Path::new("a.jpg")));
    s.zoom(ZoomDirection::In, None).unwrap();

    s.toggle_layout().unwrap();
    assert_eq!(s.layout(), Layout::Single);
}

#[test]
fn test_pan_direction_uses_configured_step() {
    let config = ViewerConfig {
        pan_step: 50.0,
        ..Default::default()
    };
    let mut s = session_with(Arc::new(images()), config);
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();

    let (x0, y0) = s.primary_viewport().unwrap().pan_offset();
    s.pan_direction(PanDirection::Right).unwrap();
    s.pan_direction(PanDirection::Up).unwrap();
    let (x1, y1) = s.primary_viewport().unwrap().pan_offset();
    assert_abs_diff_eq!(x1 - x0, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y1 - y0, -50.0, epsilon = 1e-9);
}

#[test]
fn test_drag_pans_against_pointer_motion() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    let (x0, y0) = s.primary_viewport().unwrap().pan_offset();

    // Not dragging yet: ignored.
    s.drag_to(0.0, 0.0).unwrap();
    assert_eq!(s.primary_viewport().unwrap().pan_offset(), (x0, y0));

    s.begin_drag(300.0, 300.0);
    s.drag_to(280.0, 310.0).unwrap();
    s.end_drag();
    let (x1, y1) = s.primary_viewport().unwrap().pan_offset();
    assert_abs_diff_eq!(x1 - x0, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y1 - y0, -10.0, epsilon = 1e-9);
}

#[test]
fn test_resize_refits_and_syncs() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_secondary(Path::new("b.jpg")).unwrap();
    s.set_layout(Layout::Double).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();

    s.resize(DisplaySize::new(1000, 1000)).unwrap();
    let p = primary_params(&s);
    assert_eq!(p.display(), DisplaySize::new(1000, 1000));
    assert_eq!((p.pan_x, p.pan_y), (0.0, 0.0));
    assert_eq!(secondary_params(&s), p);
}

#[test]
fn test_swap_exchanges_images() {
    let mut s = session();
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_secondary(Path::new("tall.jpg")).unwrap();
    s.set_layout(Layout::Double).unwrap();

    s.swap().unwrap();
    assert_eq!(s.primary(), Some(Path::new("tall.jpg")));
    assert_eq!(s.secondary(), Some(Path::new("a.jpg")));

    s.zoom(ZoomDirection::In, None).unwrap();
    assert_eq!(primary_params(&s).zoom_level, secondary_params(&s).zoom_level);
    assert_pan_in_bounds(s.secondary_viewport().unwrap());
}

#[test]
fn test_revisiting_image_restores_state() {
    let loader = Arc::new(images());
    let mut s = session_with(loader.clone(), ViewerConfig::default());
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.set_primary(Path::new("b.jpg")).unwrap();
    s.set_primary(Path::new("a.jpg")).unwrap();
    assert_eq!(loader.opens(), 2);
    assert_eq!(s.store().len(), 2);
}

#[test]
fn test_evicted_image_is_reloaded() {
    let loader = Arc::new(images());
    let config = ViewerConfig {
        cache_capacity: 2,
        ..Default::default()
    };
    let mut s = session_with(loader.clone(), config);
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        s.set_primary(Path::new(name)).unwrap();
    }
    assert_eq!(s.store().len(), 2);
    assert!(!s.store().contains(Path::new("a.jpg")));

    s.set_primary(Path::new("a.jpg")).unwrap();
    assert_eq!(loader.opens(), 4);
    assert!(s.primary_viewport().unwrap().is_ready());
}

#[test]
fn test_invalid_config_rejected() {
    let config = ViewerConfig {
        cache_capacity: 1,
        ..Default::default()
    };
    let result = ViewerSession::new(config, Arc::new(images()), Arc::new(NullRenderer));
    assert!(matches!(result, Err(LoupeError::Config(_))));
}

#[test]
fn test_cycling_secondaries_keeps_primary_resident() {
    let config = ViewerConfig {
        cache_capacity: 2,
        ..Default::default()
    };
    let mut s = session_with(Arc::new(images()), config);
    s.set_primary(Path::new("a.jpg")).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    s.pan(150.0, 40.0).unwrap();
    let before = primary_params(&s);

    for name in ["b.jpg", "c.jpg", "tall.jpg", "b.jpg", "c.jpg"] {
        s.set_secondary(Path::new(name)).unwrap();
        assert_eq!(s.secondary(), Some(Path::new(name)));
        assert!(s.store().contains(Path::new("a.jpg")));
        assert_eq!(primary_params(&s), before);
        assert_eq!(secondary_params(&s).zoom_level, before.zoom_level);
        assert_pan_in_bounds(s.secondary_viewport().unwrap());
    }
}

#[test]
fn test_stepping_through_many_secondaries_with_default_store() {
    let names: Vec<String> = (0..12).map(|i| format!("s{i}.jpg")).collect();
    let mut entries: Vec<(&str, u32, u32)> =
        names.iter().map(|n| (n.as_str(), 1500, 1000)).collect();
    entries.push(("p.jpg", 2000, 1000));
    let mut s = session_with(Arc::new(SizedLoader::new(&entries)), ViewerConfig::default());

    s.set_primary(Path::new("p.jpg")).unwrap();
    s.zoom(ZoomDirection::In, None).unwrap();
    let before = primary_params(&s);

    for name in &names {
        s.set_secondary(Path::new(name)).unwrap();
    }
    assert_eq!(s.secondary(), Some(Path::new("s11.jpg")));
    assert_eq!(primary_params(&s), before);
    assert_eq!(s.store().len(), 10);
}
