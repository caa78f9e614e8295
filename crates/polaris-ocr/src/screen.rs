use anyhow::{Context, Result};
use image::RgbaImage;
use polaris_types::{Display, Point, ScreenRect};
use xcap::Monitor;

use crate::capture::Screen;

/// xcap reports points on macOS and device pixels everywhere else
const BOUNDS_ARE_PHYSICAL: bool = !cfg!(target_os = "macos");

/// Host screen, enumerated and captured through xcap.
///
/// Monitor rectangles are converted to the logical units the windows are
/// placed in. The captured bitmap stays at native resolution and the crop
/// rescales into it.
pub struct NativeScreen {
    fallback: Display,
}

impl NativeScreen {
    pub fn new(fallback: Display) -> Self {
        Self { fallback }
    }
}

impl Screen for NativeScreen {
    fn displays(&self) -> Result<Vec<Display>> {
        let monitors = Monitor::all().context("Failed to get monitors")?;
        if monitors.is_empty() {
            tracing::warn!("No monitors reported, using the configured display");
            return Ok(vec![self.fallback]);
        }
        Ok(monitors.iter().map(monitor_display).collect())
    }

    fn cursor_position(&self) -> Result<Point> {
        #[cfg(windows)]
        {
            cursor::position()
        }

        #[cfg(not(windows))]
        {
            // No portable pointer query; use the primary monitor
            let displays = self.displays()?;
            let display = displays
                .iter()
                .find(|d| d.is_primary)
                .or(displays.first())
                .copied()
                .unwrap_or(self.fallback);
            Ok(display.bounds.center())
        }
    }

    fn capture_display(&self, display: &Display) -> Result<RgbaImage> {
        let monitor = Monitor::all()
            .context("Failed to get monitors")?
            .into_iter()
            .find(|m| m.id() == display.id)
            .with_context(|| format!("Monitor {} not found", display.id))?;

        let image = monitor.capture_image().context("Failed to capture screen")?;
        if image.width() == 0 || image.height() == 0 {
            anyhow::bail!("Captured empty screenshot, screen recording may not be permitted");
        }
        let (width, height) = (image.width(), image.height());
        RgbaImage::from_raw(width, height, image.into_raw())
            .context("Capture buffer has unexpected size")
    }
}

fn monitor_scale(monitor: &Monitor) -> f32 {
    sanitize_scale(monitor.scale_factor())
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

fn monitor_display(monitor: &Monitor) -> Display {
    let scale = monitor_scale(monitor);
    let raw = ScreenRect::new(monitor.x(), monitor.y(), monitor.width(), monitor.height());
    let bounds = if BOUNDS_ARE_PHYSICAL {
        to_logical(raw, scale)
    } else {
        raw
    };

    Display {
        id: monitor.id(),
        bounds,
        work_area: bounds,
        scale_factor: scale,
        is_primary: monitor.is_primary(),
    }
}

/// Physical monitor rectangle in logical units
fn to_logical(rect: ScreenRect, scale: f32) -> ScreenRect {
    let scale = sanitize_scale(scale);
    let div = |v: f32| (v / scale).round();
    ScreenRect::new(
        div(rect.x as f32) as i32,
        div(rect.y as f32) as i32,
        div(rect.width as f32) as u32,
        div(rect.height as f32) as u32,
    )
}

#[cfg(windows)]
mod cursor {
    use anyhow::{Context, Result};
    use polaris_types::Point;
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;
    use xcap::Monitor;

    pub fn position() -> Result<Point> {
        let mut pt = POINT::default();
        unsafe {
            GetCursorPos(&mut pt).context("Failed to read cursor position")?;
        }

        // GetCursorPos is physical; convert with the scale of the monitor under it
        let scale = Monitor::from_point(pt.x, pt.y)
            .map(|m| super::monitor_scale(&m))
            .unwrap_or(1.0);
        let div = |v: i32| (v as f32 / scale).round() as i32;
        Ok(Point::new(div(pt.x), div(pt.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_logical_divides_by_scale() {
        let rect = to_logical(ScreenRect::new(-2560, 0, 2560, 2048), 2.0);
        assert_eq!(rect, ScreenRect::new(-1280, 0, 1280, 1024));

        let rect = to_logical(ScreenRect::new(1920, 0, 2880, 1620), 1.5);
        assert_eq!(rect, ScreenRect::new(1280, 0, 1920, 1080));
    }

    #[test]
    fn test_invalid_scale_is_identity() {
        let rect = ScreenRect::new(10, 20, 800, 600);
        assert_eq!(to_logical(rect, 0.0), rect);
        assert_eq!(to_logical(rect, f32::NAN), rect);
        assert_eq!(sanitize_scale(-1.0), 1.0);
    }
}
