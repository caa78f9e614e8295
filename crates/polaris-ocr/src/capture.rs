use image::{ImageEncoder, RgbaImage};
use polaris_core::geometry::{display_matching, map_to_bitmap};
use polaris_types::{Display, Point, ScreenRect};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no display found")]
    NoDisplay,

    #[error("selection {selection:?} does not cover any pixel of display {display}")]
    EmptyRegion { selection: ScreenRect, display: u32 },

    #[error("screen capture failed: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("failed to encode capture: {0}")]
    Encode(#[from] image::ImageError),
}

/// Display enumeration and capture
pub trait Screen: Send + Sync {
    fn displays(&self) -> anyhow::Result<Vec<Display>>;

    fn cursor_position(&self) -> anyhow::Result<Point>;

    /// Full capture of one display, at the display's native resolution
    fn capture_display(&self, display: &Display) -> anyhow::Result<RgbaImage>;
}

/// Crop a capture of `display` to the logical `selection`
pub fn crop_to_selection(
    image: &RgbaImage,
    selection: ScreenRect,
    display: &Display,
) -> Result<RgbaImage, CaptureError> {
    let rect = map_to_bitmap(selection, display.bounds, image.width(), image.height());
    let display_id = display.id;
    tracing::debug!(
        "selection {:?} on display {} -> bitmap {:?} of {}x{}",
        selection,
        display_id,
        rect,
        image.width(),
        image.height()
    );

    if rect.is_empty() {
        return Err(CaptureError::EmptyRegion {
            selection,
            display: display.id,
        });
    }

    Ok(image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}

/// Capture the display under `selection` and crop to it
pub fn capture_selection(
    screen: &dyn Screen,
    selection: ScreenRect,
) -> Result<RgbaImage, CaptureError> {
    let displays = screen.displays()?;
    let display = display_matching(&displays, &selection).ok_or(CaptureError::NoDisplay)?;

    let image = screen.capture_display(display)?;
    crop_to_selection(&image, selection, display)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use image::Rgba;

    use super::*;

    /// Two displays; the secondary one is captured at 2x
    struct FakeScreen {
        captured: Mutex<Vec<u32>>,
    }

    impl FakeScreen {
        fn new() -> Self {
            Self {
                captured: Mutex::new(Vec::new()),
            }
        }
    }

    impl Screen for FakeScreen {
        fn displays(&self) -> anyhow::Result<Vec<Display>> {
            let mut secondary = Display::new(2, ScreenRect::new(-400, -100, 400, 300));
            secondary.scale_factor = 2.0;
            Ok(vec![
                Display::new(1, ScreenRect::new(0, 0, 640, 480)),
                secondary,
            ])
        }

        fn cursor_position(&self) -> anyhow::Result<Point> {
            Ok(Point::new(10, 10))
        }

        fn capture_display(&self, display: &Display) -> anyhow::Result<RgbaImage> {
            self.captured.lock().unwrap().push(display.id);
            let scale = display.scale_factor as u32;
            let (w, h) = (display.bounds.width * scale, display.bounds.height * scale);
            // Encode the pixel position into the colour so crops can be checked
            Ok(RgbaImage::from_fn(w, h, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, display.id as u8, 255])
            }))
        }
    }

    #[test]
    fn test_capture_selection_on_scaled_secondary() {
        let screen = FakeScreen::new();
        let selection = ScreenRect::new(-300, -50, 50, 25);

        let image = capture_selection(&screen, selection).unwrap();

        assert_eq!(*screen.captured.lock().unwrap(), vec![2]);
        assert_eq!((image.width(), image.height()), (100, 50));
        // Top-left pixel of the crop is bitmap (200, 100)
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 100, 2, 255]));
    }

    #[test]
    fn test_capture_selection_on_primary() {
        let screen = FakeScreen::new();
        let image = capture_selection(&screen, ScreenRect::new(600, 400, 100, 100)).unwrap();

        // Trimmed at the bottom-right corner
        assert_eq!((image.width(), image.height()), (40, 80));
        assert_eq!(image.get_pixel(0, 0), &Rgba([88, 144, 1, 255]));
    }

    #[test]
    fn test_crop_outside_display_is_error() {
        let display = Display::new(1, ScreenRect::new(0, 0, 100, 100));
        let image = RgbaImage::new(100, 100);

        let err = crop_to_selection(&image, ScreenRect::new(200, 200, 10, 10), &display)
            .unwrap_err();
        assert!(matches!(err, CaptureError::EmptyRegion { display: 1, .. }));
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::new(4, 4);
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
