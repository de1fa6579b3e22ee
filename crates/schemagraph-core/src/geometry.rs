//! Geometric primitives for graph layout.
//!
//! Layout coordinates follow the screen convention: X increases rightward
//! and Y increases downward. Ranks advance along the X axis and nodes
//! within a rank are spread along the Y axis around a shared centerline
//! at `y = 0`.

use serde::Serialize;

/// A 2D point in layout coordinate space.
///
/// # Examples
///
/// ```
/// # use schemagraph_core::geometry::Point;
/// let p = Point::new(280.0, -60.0);
/// assert_eq!(p.x(), 280.0);
/// assert_eq!(p.y(), -60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}
