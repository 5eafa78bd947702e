//! Gesture port: coordinate and element-targeted touches.

use appdriver_domain::element::Element;
use appdriver_domain::error::DriverError;
use appdriver_domain::geometry::Point;
use async_trait::async_trait;

/// Touch gestures.
#[async_trait]
pub trait Gestures: Send + Sync {
    /// Tap at screen coordinates.
    async fn tap(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Tap an element previously returned by the backend.
    async fn tap_element(&self, element: &Element) -> Result<(), DriverError>;

    /// Press and hold at screen coordinates.
    async fn long_press(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Swipe from `start` to `end`.
    async fn swipe(&self, start: Point, end: Point) -> Result<(), DriverError>;
}
