use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in logical screen coordinates.
///
/// The origin may be negative on multi-monitor setups where a secondary
/// display sits left of or above the primary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.x as i64 + self.width as i64 / 2) as i32,
            y: (self.y as i64 + self.height as i64 / 2) as i32,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (point.x as i64, point.y as i64);
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    pub fn intersection(&self, other: &ScreenRect) -> Option<ScreenRect> {
        let left = (self.x as i64).max(other.x as i64);
        let top = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(ScreenRect {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    pub fn translate(&self, dx: i32, dy: i32) -> ScreenRect {
        ScreenRect {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Squared distance from `point` to the closest point of the rectangle
    pub fn distance_squared(&self, point: Point) -> i64 {
        let (px, py) = (point.x as i64, point.y as i64);
        let dx = if px < self.x as i64 {
            self.x as i64 - px
        } else if px >= self.right() {
            px - self.right() + 1
        } else {
            0
        };
        let dy = if py < self.y as i64 {
            self.y as i64 - py
        } else if py >= self.bottom() {
            py - self.bottom() + 1
        } else {
            0
        };
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = ScreenRect::new(0, 0, 100, 100);
        let b = ScreenRect::new(50, 80, 100, 100);
        assert_eq!(a.intersection(&b), Some(ScreenRect::new(50, 80, 50, 20)));
    }

    #[test]
    fn test_intersection_touching_edges_is_none() {
        let a = ScreenRect::new(0, 0, 100, 100);
        let b = ScreenRect::new(100, 0, 10, 10);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_contains_excludes_far_edge() {
        let r = ScreenRect::new(-1920, 0, 1920, 1080);
        assert!(r.contains(Point::new(-1920, 0)));
        assert!(r.contains(Point::new(-1, 1079)));
        assert!(!r.contains(Point::new(0, 0)));
    }

    #[test]
    fn test_distance_squared() {
        let r = ScreenRect::new(0, 0, 10, 10);
        assert_eq!(r.distance_squared(Point::new(5, 5)), 0);
        assert_eq!(r.distance_squared(Point::new(-3, 5)), 9);
        assert_eq!(r.distance_squared(Point::new(12, 13)), 3 * 3 + 4 * 4);
    }
}
