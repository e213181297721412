use std::sync::mpsc;

use sketchnet::session::{SketchSession, StatusSink};
use sketchnet::{MemStore, RasterImage, SketchError};

/// Collects every status line so tests can assert nothing fails silently.
struct Recorder(mpsc::Sender<String>);

impl StatusSink for Recorder {
    fn status(&self, line: &str) {
        let _ = self.0.send(line.to_string());
    }
}

fn session_with_status() -> (SketchSession, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let session = SketchSession::new("circle", Box::new(MemStore::new()), Box::new(Recorder(tx)))
        .expect("initial label is valid");
    (session, rx)
}

/// 64×64 grayscale raster with a filled disc (circle-ish drawing).
fn circle_raster(radius: i32) -> RasterImage {
    let mut pixels = vec![255u8; 64 * 64];
    for y in 0..64i32 {
        for x in 0..64i32 {
            let (dx, dy) = (x - 32, y - 32);
            if dx * dx + dy * dy <= radius * radius {
                pixels[(y * 64 + x) as usize] = 0;
            }
        }
    }
    RasterImage::gray(64, 64, pixels)
}

/// 64×64 grayscale raster with a filled square.
fn square_raster(half: i32) -> RasterImage {
    let mut pixels = vec![255u8; 64 * 64];
    for y in (32 - half)..(32 + half) {
        for x in (32 - half)..(32 + half) {
            pixels[(y * 64 + x) as usize] = 0;
        }
    }
    RasterImage::gray(64, 64, pixels)
}

#[test]
fn predict_without_a_model_is_model_not_ready() {
    let (mut session, _rx) = session_with_status();
    let err = session.predict_from(&circle_raster(20));
    assert!(matches!(err, Err(SketchError::ModelNotReady)));
}

#[test]
fn removing_the_last_label_is_rejected() {
    let (mut session, _rx) = session_with_status();
    let err = session.remove_label("circle");
    assert!(matches!(err, Err(SketchError::LastLabel)));
    assert_eq!(session.labels().len(), 1);
}

#[test]
fn training_with_too_few_examples_keeps_the_slot_empty() {
    let (mut session, _rx) = session_with_status();
    session.add_label("square").unwrap();
    session.add_example_from(&circle_raster(20)).unwrap();

    let err = session.train(None);
    assert!(matches!(err, Err(SketchError::InsufficientData { have: 1, need: 2 })));
    assert!(!session.has_model());
}

#[test]
fn two_class_scenario_trains_and_predicts() {
    let (mut session, rx) = session_with_status();
    session.add_label("square").unwrap();

    for i in 0..3 {
        session.select_label("circle").unwrap();
        session.add_example_from(&circle_raster(14 + 4 * i)).unwrap();
        session.select_label("square").unwrap();
        session.add_example_from(&square_raster(12 + 4 * i)).unwrap();
    }
    assert_eq!(session.dataset().len(), 6);

    let (progress_tx, progress_rx) = mpsc::channel();
    session.train(Some(progress_tx)).expect("training should complete");

    let stats: Vec<_> = progress_rx.iter().collect();
    assert_eq!(stats.len(), 10, "one progress report per epoch");
    assert!(stats.iter().enumerate().all(|(i, s)| s.epoch == i + 1));
    assert!(stats.iter().all(|s| s.loss.is_finite() && (0.0..=1.0).contains(&s.accuracy)));

    let prediction = session.predict_from(&circle_raster(16)).expect("model is live");
    assert_eq!(prediction.probabilities.len(), 2);
    let sum: f64 = prediction.probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-3, "probabilities sum to {}", sum);

    // Every operation reported something.
    let lines: Vec<_> = rx.try_iter().collect();
    assert!(lines.iter().any(|l| l.contains("training done")));
    assert!(lines.iter().any(|l| l.contains("guessing")));
}

#[test]
fn save_load_round_trip_restores_model_and_labels() {
    let (mut session, _rx) = session_with_status();
    session.add_label("square").unwrap();
    for _ in 0..2 {
        session.select_label("circle").unwrap();
        session.add_example_from(&circle_raster(18)).unwrap();
        session.select_label("square").unwrap();
        session.add_example_from(&square_raster(15)).unwrap();
    }
    session.train(None).expect("training should complete");

    // Saving with no model fails; with a model it succeeds.
    session.save().expect("save should succeed");

    // A prediction before and after the round trip should agree on widths.
    let before = session.predict_from(&square_raster(14)).unwrap();

    let loaded = session.load().expect("load should not error");
    assert!(loaded);
    assert_eq!(session.labels().names(), &["circle".to_string(), "square".to_string()]);

    let after = session.predict_from(&square_raster(14)).unwrap();
    assert_eq!(before.probabilities.len(), after.probabilities.len());
    for (b, a) in before.probabilities.iter().zip(after.probabilities.iter()) {
        assert!((b - a).abs() < 1e-9, "restored weights should reproduce outputs");
    }
}

#[test]
fn save_without_a_model_is_save_failed() {
    let (mut session, _rx) = session_with_status();
    let err = session.save();
    assert!(matches!(err, Err(SketchError::SaveFailed(_))));
}

#[test]
fn load_on_a_fresh_store_is_a_normal_start() {
    let (mut session, _rx) = session_with_status();
    let loaded = session.load().expect("absent state is not an error");
    assert!(!loaded);
    assert!(!session.has_model());
}

#[test]
fn label_changes_after_training_mark_the_model_stale() {
    let (mut session, _rx) = session_with_status();
    session.add_label("square").unwrap();
    session.select_label("circle").unwrap();
    session.add_example_from(&circle_raster(18)).unwrap();
    session.select_label("square").unwrap();
    session.add_example_from(&square_raster(15)).unwrap();
    session.train(None).expect("training should complete");
    assert!(!session.model_is_stale());

    session.add_label("star").unwrap();
    assert!(session.model_is_stale());

    // Predictions still decode against the training-time snapshot.
    let prediction = session.predict_from(&circle_raster(18)).unwrap();
    assert_eq!(prediction.probabilities.len(), 2);
    assert!(prediction.label == "circle" || prediction.label == "square");
}
