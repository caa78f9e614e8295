//! Mapping between logical screen coordinates and captured bitmaps.
//!
//! A capture of a display is not necessarily the same size as the display's
//! logical bounds (HiDPI monitors capture at `scale_factor` times the logical
//! size). Selections drawn by the user are in logical coordinates and have to
//! be converted into a crop rectangle inside the bitmap.

use polaris_types::{Display, Point, ScreenRect};

/// Rectangle in bitmap pixel space. Always inside the bitmap it was computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Ratio of bitmap pixels per logical unit on each axis.
///
/// `None` for a zero-sized display.
pub fn scale_factors(display: &ScreenRect, bitmap_width: u32, bitmap_height: u32) -> Option<(f64, f64)> {
    if display.width == 0 || display.height == 0 {
        return None;
    }
    Some((
        bitmap_width as f64 / display.width as f64,
        bitmap_height as f64 / display.height as f64,
    ))
}

/// Map `selection` (logical screen coordinates) to a crop rectangle inside a
/// `bitmap_width` x `bitmap_height` capture of `display`.
///
/// The result is trimmed at the bitmap border; a selection outside the
/// display produces an empty rectangle.
pub fn map_to_bitmap(
    selection: ScreenRect,
    display: ScreenRect,
    bitmap_width: u32,
    bitmap_height: u32,
) -> PixelRect {
    let Some((scale_x, scale_y)) = scale_factors(&display, bitmap_width, bitmap_height) else {
        return PixelRect::default();
    };

    let (x, width) = map_axis(
        selection.x,
        selection.width,
        display.x,
        scale_x,
        bitmap_width,
    );
    let (y, height) = map_axis(
        selection.y,
        selection.height,
        display.y,
        scale_y,
        bitmap_height,
    );

    PixelRect {
        x,
        y,
        width,
        height,
    }
}

fn map_axis(start: i32, len: u32, origin: i32, scale: f64, limit: u32) -> (u32, u32) {
    let offset = start as f64 - origin as f64;
    let pos = (offset * scale).round();
    let extent = (len as f64 * scale).round();

    let limit = limit as f64;
    let near = pos.clamp(0.0, limit);
    let far = (pos + extent).clamp(near, limit);

    (near as u32, (far - near) as u32)
}

/// Rectangle spanned by a drag from `start` to `end`, in any direction
pub fn normalize_drag(start: Point, end: Point) -> ScreenRect {
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    ScreenRect {
        x,
        y,
        width: start.x.abs_diff(end.x),
        height: start.y.abs_diff(end.y),
    }
}

/// Display sharing the largest area with `rect`, or the one closest to its
/// centre when `rect` lies outside every display
pub fn display_matching<'a>(displays: &'a [Display], rect: &ScreenRect) -> Option<&'a Display> {
    let mut best: Option<(&Display, u64)> = None;
    for display in displays {
        let area = display
            .bounds
            .intersection(rect)
            .map(|r| r.area())
            .unwrap_or(0);
        if area > 0 && best.is_none_or(|(_, best_area)| area > best_area) {
            best = Some((display, area));
        }
    }

    match best {
        Some((display, _)) => Some(display),
        None => display_nearest_point(displays, rect.center()),
    }
}

/// Display containing `point`, otherwise the nearest one
pub fn display_nearest_point(displays: &[Display], point: Point) -> Option<&Display> {
    displays
        .iter()
        .find(|d| d.bounds.contains(point))
        .or_else(|| {
            displays
                .iter()
                .min_by_key(|d| d.bounds.distance_squared(point))
        })
}
