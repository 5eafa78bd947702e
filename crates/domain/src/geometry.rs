//! Screen coordinates.

use serde::{Deserialize, Serialize};

/// A point in device screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Center point, rounded toward the top-left.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.left + (self.right - self.left) / 2,
            y: self.top + (self.bottom - self.top) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_from_tuple() {
        assert_eq!(Point::from((3, 4)), Point::new(3, 4));
    }

    #[test]
    fn should_compute_center() {
        let rect = Rect {
            left: 0,
            top: 100,
            right: 1080,
            bottom: 301,
        };
        assert_eq!(rect.center(), Point::new(540, 200));
    }
}
