//! End-to-end session scenarios driven through the public API only.

use approx::assert_abs_diff_eq;
use flora_core::{
    CLASS_LABELS, Effect, Event, FrameSource, ModelRegistry, PairingPolicy, Session,
    SessionConfig, TestPatternSource,
};
use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

fn new_session(config: SessionConfig) -> Session<StdRng> {
    Session::new(
        ModelRegistry::builtin(),
        CLASS_LABELS.iter().map(|s| s.to_string()).collect(),
        config,
        StdRng::seed_from_u64(2024),
        Box::new(|| Ok(Box::new(TestPatternSource::default()) as Box<dyn FrameSource>)),
    )
}

#[test]
fn loading_a_missing_path_reports_file_not_found_and_no_rows() {
    let mut s = new_session(SessionConfig::default());
    let err = s
        .apply(Event::LoadImage("no/such/flower.png".into()))
        .unwrap_err();
    assert_eq!(err.kind(), "FileNotFound");
    assert_eq!(s.rows().len(), 0);
    assert!(s.display().is_none());
}

#[test]
fn loading_a_valid_png_runs_exactly_one_synthesis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dot.png");
    RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]))
        .save(&path)
        .unwrap();

    let mut s = new_session(SessionConfig::default());
    let effects = s.apply(Event::LoadImage(path)).unwrap();

    let updates = effects
        .iter()
        .filter(|e| **e == Effect::ResultsUpdated)
        .count();
    assert_eq!(updates, 1);
    assert!(effects.contains(&Effect::ImageShown));
    assert_eq!(s.rows().len(), 5);

    let sum: f64 = s.rows().iter().map(|r| r.confidence).sum();
    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
}

#[test]
fn paired_rows_cover_every_label_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dot.png");
    RgbaImage::from_pixel(1, 1, image::Rgba([0, 255, 0, 255]))
        .save(&path)
        .unwrap();

    let mut s = new_session(SessionConfig::default());
    s.apply(Event::LoadImage(path)).unwrap();

    let mut labels: Vec<&str> = s.rows().iter().map(|r| r.label.as_str()).collect();
    labels.sort();
    let mut expected: Vec<&str> = CLASS_LABELS.to_vec();
    expected.sort();
    assert_eq!(labels, expected);
}

#[test]
fn independent_rows_stay_sorted_and_draw_from_the_label_set() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dot.png");
    RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 255, 255]))
        .save(&path)
        .unwrap();

    let mut s = new_session(SessionConfig {
        pairing: PairingPolicy::Independent,
        ..Default::default()
    });
    s.apply(Event::LoadImage(path)).unwrap();

    let rows = s.rows();
    assert_eq!(rows.len(), 5);
    for w in rows.windows(2) {
        assert!(w[0].confidence >= w[1].confidence);
    }
    for row in rows {
        assert!(CLASS_LABELS.contains(&row.label.as_str()));
    }
}

#[test]
fn failed_load_after_a_successful_one_clears_everything() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("dot.png");
    RgbaImage::from_pixel(1, 1, image::Rgba([9, 9, 9, 255]))
        .save(&good)
        .unwrap();

    let mut s = new_session(SessionConfig::default());
    s.apply(Event::LoadImage(good)).unwrap();
    assert_eq!(s.rows().len(), 5);

    let err = s
        .apply(Event::LoadImage(dir.path().join("gone.png")))
        .unwrap_err();
    assert_eq!(err.kind(), "FileNotFound");
    assert!(s.rows().is_empty());
    assert!(s.display().is_none());
}

#[test]
fn model_change_with_an_image_displayed_regenerates_results() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dot.png");
    RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]))
        .save(&path)
        .unwrap();

    let mut s = new_session(SessionConfig::default());
    s.apply(Event::LoadImage(path)).unwrap();
    let before: Vec<f64> = s.rows().iter().map(|r| r.confidence).collect();

    let effects = s
        .apply(Event::SelectModel("Vision Transformer".into()))
        .unwrap();
    assert_eq!(effects, vec![Effect::ResultsUpdated]);
    assert_eq!(s.rows().len(), 5);

    let after: Vec<f64> = s.rows().iter().map(|r| r.confidence).collect();
    assert_ne!(before, after, "fresh draws expected on model change");
}

#[test]
fn camera_session_shows_frames_until_toggled_off() {
    let mut s = new_session(SessionConfig::default());

    s.apply(Event::ToggleCamera).unwrap();
    s.apply(Event::FrameTick).unwrap();
    assert!(s.display().is_some());
    assert_eq!(s.rows().len(), 5);

    let effects = s.apply(Event::ToggleCamera).unwrap();
    assert!(effects.contains(&Effect::ImageCleared));
    assert!(s.display().is_none());
    assert!(!s.camera_active());
}
