//! Where the windows go.
//!
//! Pure functions over display geometry; the UI thread only applies the
//! bounds computed here.

use polaris_config::window::WindowConfig;
use polaris_types::{Display, ScreenRect};

/// Approximate width of one glyph in the bubble, logical px
const BUBBLE_GLYPH_WIDTH: u32 = 14;
const BUBBLE_LINE_HEIGHT: u32 = 20;
/// Vertical padding plus the separator between original and translation
const BUBBLE_CHROME_HEIGHT: u32 = 36;
const BUBBLE_MIN_HEIGHT: u32 = 60;
const BUBBLE_MAX_HEIGHT: u32 = 360;

/// Main panel in the top-right corner of the work area
pub fn panel_bounds(work_area: &ScreenRect, config: &WindowConfig) -> ScreenRect {
    let width = config.panel_width.min(work_area.width);
    let height = config.panel_height.min(work_area.height);

    let x = work_area.right() - width as i64 - config.margin as i64;
    let x = x.max(work_area.x as i64) as i32;
    let y = work_area.y.saturating_add(config.margin as i32);

    ScreenRect::new(x, y, width, height)
}

/// Handle a `resize-window` request: height is clamped to the configured
/// range, a missing width keeps the current one, the origin never moves
pub fn resize_panel(
    current: &ScreenRect,
    width: Option<u32>,
    height: u32,
    config: &WindowConfig,
) -> ScreenRect {
    let width = width.filter(|w| *w > 0).unwrap_or(current.width);
    let height = height.clamp(config.min_height, config.max_height);
    ScreenRect::new(current.x, current.y, width, height)
}

/// Panel height needed to show `content_height` px of content
pub fn fit_content_height(content_height: u32, config: &WindowConfig) -> u32 {
    content_height
        .saturating_add(config.content_padding)
        .min(config.max_height)
}

/// The selection overlay covers the whole display
pub fn overlay_bounds(display: &Display) -> ScreenRect {
    display.bounds
}

/// Estimated bubble height for `text_chars` characters at `width`
pub fn bubble_height(text_chars: usize, width: u32) -> u32 {
    let per_line = (width / BUBBLE_GLYPH_WIDTH).max(1) as usize;
    let lines = text_chars.div_ceil(per_line).max(1) as u32;
    (lines * BUBBLE_LINE_HEIGHT + BUBBLE_CHROME_HEIGHT).clamp(BUBBLE_MIN_HEIGHT, BUBBLE_MAX_HEIGHT)
}

/// Bubble next to an OCR selection: below it when there is room, above it
/// otherwise, and always inside the work area
pub fn bubble_bounds(
    selection: &ScreenRect,
    work_area: &ScreenRect,
    text_chars: usize,
    config: &WindowConfig,
) -> ScreenRect {
    // An inverted range must not panic in clamp
    let min_width = config.bubble_min_width.min(config.bubble_max_width);
    let width = selection
        .width
        .clamp(min_width, config.bubble_max_width)
        .min(work_area.width);
    let height = bubble_height(text_chars, width).min(work_area.height);
    let gap = config.bubble_gap as i64;

    let below = selection.bottom() + gap;
    let above = selection.y as i64 - gap - height as i64;
    let y = if below + height as i64 <= work_area.bottom() {
        below
    } else if above >= work_area.y as i64 {
        above
    } else {
        work_area.bottom() - height as i64
    };

    let x = clamp_span(selection.x as i64, width, work_area.x as i64, work_area.right());
    let y = clamp_span(y, height, work_area.y as i64, work_area.bottom());

    ScreenRect::new(x, y, width, height)
}

/// Clamp the start of a span of `len` so it stays in `[min, max)`
fn clamp_span(start: i64, len: u32, min: i64, max: i64) -> i32 {
    let upper = (max - len as i64).max(min);
    start.clamp(min, upper) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WindowConfig {
        WindowConfig::default()
    }

    #[test]
    fn test_panel_top_right_with_margin() {
        let work_area = ScreenRect::new(0, 0, 1920, 1040);
        let bounds = panel_bounds(&work_area, &config());
        assert_eq!(bounds, ScreenRect::new(1920 - 500 - 20, 20, 500, 650));
    }

    #[test]
    fn test_panel_on_secondary_display() {
        let work_area = ScreenRect::new(-1280, -200, 1280, 984);
        let bounds = panel_bounds(&work_area, &config());
        assert_eq!(bounds, ScreenRect::new(-500 - 20, -180, 500, 650));
    }

    #[test]
    fn test_panel_never_left_of_small_work_area() {
        let work_area = ScreenRect::new(100, 0, 400, 300);
        let bounds = panel_bounds(&work_area, &config());
        assert_eq!(bounds.x, 100);
        assert_eq!(bounds.width, 400);
        assert_eq!(bounds.height, 300);
    }

    #[test]
    fn test_resize_clamps_height_and_keeps_origin() {
        let current = ScreenRect::new(1400, 20, 500, 650);

        assert_eq!(
            resize_panel(&current, None, 120, &config()),
            ScreenRect::new(1400, 20, 500, 400)
        );
        assert_eq!(
            resize_panel(&current, Some(0), 4000, &config()),
            ScreenRect::new(1400, 20, 500, 900)
        );
        assert_eq!(
            resize_panel(&current, Some(520), 700, &config()),
            ScreenRect::new(1400, 20, 520, 700)
        );
    }

    #[test]
    fn test_fit_content_height() {
        assert_eq!(fit_content_height(300, &config()), 350);
        assert_eq!(fit_content_height(880, &config()), 900);
    }

    #[test]
    fn test_bubble_below_selection() {
        let work_area = ScreenRect::new(0, 0, 1920, 1040);
        let selection = ScreenRect::new(300, 200, 320, 40);

        let bounds = bubble_bounds(&selection, &work_area, 10, &config());

        assert_eq!(bounds.x, 300);
        assert_eq!(bounds.y, 248);
        assert_eq!(bounds.width, 320);
    }

    #[test]
    fn test_bubble_flips_above_near_bottom() {
        let work_area = ScreenRect::new(0, 0, 1920, 1040);
        let selection = ScreenRect::new(300, 1000, 100, 30);

        let bounds = bubble_bounds(&selection, &work_area, 10, &config());

        assert_eq!(bounds.width, 240);
        assert_eq!(bounds.y + bounds.height as i32 + 8, 1000);
    }

    #[test]
    fn test_bubble_clamped_into_work_area() {
        let work_area = ScreenRect::new(0, 0, 1920, 1040);
        let selection = ScreenRect::new(1850, 100, 900, 40);

        let bounds = bubble_bounds(&selection, &work_area, 500, &config());

        assert_eq!(bounds.width, 480);
        assert_eq!(bounds.right(), 1920);
        assert!(bounds.bottom() <= 1040);
    }

    #[test]
    fn test_bubble_with_inverted_width_range() {
        let mut config = config();
        config.bubble_min_width = 500;
        config.bubble_max_width = 300;
        let selection = ScreenRect::new(100, 100, 50, 40);
        let work_area = ScreenRect::new(0, 0, 1920, 1040);

        let bounds = bubble_bounds(&selection, &work_area, 10, &config);
        assert_eq!(bounds.width, 300);
    }

    #[test]
    fn test_bubble_height_grows_with_text() {
        let short = bubble_height(5, 280);
        let long = bubble_height(200, 280);
        assert!(long > short);
        assert_eq!(bubble_height(100_000, 280), 360);
        assert_eq!(bubble_height(0, 280), 60);
    }
}
