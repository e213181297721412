/// End-to-end demo: teach the classifier two drawn shapes and query it.
///
/// Synthetic "drawings" stand in for a canvas — filled circles and squares
/// rendered into grayscale rasters with a little jitter. The session trains
/// for the default 10 epochs at batch size 16 and prints per-epoch progress
/// plus every status line the pipeline emits.
///
/// Run with:
///   cargo run --example two_shapes --release

use std::sync::mpsc;
use std::thread;

use sketchnet::session::{ChannelSink, SketchSession};
use sketchnet::{EpochStats, MemStore, RasterImage};

const CANVAS: u32 = 200;

/// A filled circle of radius `r` centered with a per-sample offset.
fn draw_circle(offset: i32, r: i32) -> RasterImage {
    let c = CANVAS as i32 / 2 + offset;
    let mut pixels = vec![255u8; (CANVAS * CANVAS) as usize];
    for y in 0..CANVAS as i32 {
        for x in 0..CANVAS as i32 {
            let (dx, dy) = (x - c, y - c);
            if dx * dx + dy * dy <= r * r {
                pixels[(y * CANVAS as i32 + x) as usize] = 0;
            }
        }
    }
    RasterImage::gray(CANVAS, CANVAS, pixels)
}

/// A filled axis-aligned square with a per-sample offset.
fn draw_square(offset: i32, half: i32) -> RasterImage {
    let c = CANVAS as i32 / 2 + offset;
    let mut pixels = vec![255u8; (CANVAS * CANVAS) as usize];
    for y in (c - half).max(0)..(c + half).min(CANVAS as i32) {
        for x in (c - half).max(0)..(c + half).min(CANVAS as i32) {
            pixels[(y * CANVAS as i32 + x) as usize] = 0;
        }
    }
    RasterImage::gray(CANVAS, CANVAS, pixels)
}

fn main() {
    let (status_tx, status_rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for line in status_rx {
            println!("[status] {}", line);
        }
    });

    let mut session = SketchSession::new(
        "circle",
        Box::new(MemStore::new()),
        Box::new(ChannelSink::new(status_tx)),
    )
    .expect("initial label is valid");
    session.add_label("square").expect("fresh label");

    for i in 0..4 {
        session.select_label("circle").unwrap();
        session.add_example_from(&draw_circle(i * 5 - 8, 50 + i * 3)).unwrap();
        session.select_label("square").unwrap();
        session.add_example_from(&draw_square(i * 5 - 8, 45 + i * 3)).unwrap();
    }

    let (progress_tx, progress_rx) = mpsc::channel::<EpochStats>();
    let progress = thread::spawn(move || {
        for stats in progress_rx {
            println!(
                "epoch {:>2}/{}  loss {:.4}  accuracy {:.0}%  ({} ms)",
                stats.epoch,
                stats.total_epochs,
                stats.loss,
                stats.accuracy * 100.0,
                stats.elapsed_ms
            );
        }
    });
    session.train(Some(progress_tx)).expect("training succeeds");
    progress.join().unwrap();

    let guess = session.predict_from(&draw_circle(0, 55)).expect("model is live");
    println!("drew a circle, model says: {} {:?}", guess.label, guess.probabilities);

    session.save().expect("save succeeds");
    drop(session);
    printer.join().unwrap();
}
