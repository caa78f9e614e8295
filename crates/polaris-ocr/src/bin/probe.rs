//! Capture a screen region and print the recognized text.
//!
//! cargo run -p polaris-ocr --bin polaris-ocr-probe -- --x 100 --y 100 --width 400 --height 120

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use polaris_ocr::{
    NativeScreen, Screen, capture_selection, default_backend, encode_png, on_ocr_thread,
};
use polaris_types::{Display, ScreenRect};

#[derive(Parser, Debug)]
#[command(about = "Run OCR over a region of the screen")]
struct Args {
    #[arg(long)]
    x: i32,

    #[arg(long)]
    y: i32,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    #[arg(long, default_value = "ja")]
    language: String,

    /// Use the tesseract executable at this path
    #[arg(long)]
    tesseract: Option<String>,

    /// Also write the cropped capture here
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let args = Args::parse();

    let screen = NativeScreen::new(Display::new(0, ScreenRect::new(0, 0, 1920, 1080)));
    for monitor in screen.displays()? {
        let Display {
            id,
            bounds,
            scale_factor,
            is_primary,
            ..
        } = monitor;
        tracing::info!("display {id}: {bounds:?} scale {scale_factor} primary {is_primary}");
    }

    let selection = ScreenRect::new(args.x, args.y, args.width, args.height);
    let start = Instant::now();
    let image = capture_selection(&screen, selection)?;
    let png = encode_png(&image)?;
    tracing::info!(
        "captured {}x{} ({} bytes) in {:?}",
        image.width(),
        image.height(),
        png.len(),
        start.elapsed()
    );

    if let Some(path) = &args.save {
        std::fs::write(path, &png)?;
        tracing::info!("saved capture to {}", path.display());
    }

    let text = on_ocr_thread(|| {
        let backend = default_backend(&args.language, args.tesseract.as_deref())?;
        let start = Instant::now();
        let text = backend.recognize(&png)?;
        tracing::info!("{} finished in {:?}", backend.name(), start.elapsed());
        Ok(text)
    })?;

    println!("{}", text.trim());
    Ok(())
}
