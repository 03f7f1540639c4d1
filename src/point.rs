#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point (or vector) in planar pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Length of this point treated as a vector from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Halfway point between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotate this vector about the origin by `angle` radians.
    ///
    /// Uses the standard matrix `(x cos − y sin, x sin + y cos)`; with the
    /// y axis pointing down a positive angle turns clockwise on screen.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate this point about `pivot` by `angle` radians.
    #[must_use]
    pub fn rotated_about(self, pivot: Point, angle: f64) -> Point {
        pivot + (self - pivot).rotated(angle)
    }

    /// Polar angle of this point around `pivot`, as `atan2(dy, dx)`.
    #[must_use]
    pub fn angle_around(self, pivot: Point) -> f64 {
        (self.y - pivot.y).atan2(self.x - pivot.x)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Point `dist_px` pixels beyond `end` on the line from `start` through `end`.
///
/// Returns `end` when the two points coincide.
#[must_use]
pub fn point_on_line(start: Point, end: Point, dist_px: f64) -> Point {
    let len = start.distance_to(end);
    if len == 0.0 {
        return end;
    }
    let ratio = 1.0 + dist_px / len;
    start + (end - start) * ratio
}

/// Intrinsic pixel dimensions of the source bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the size describes a decoded bitmap.
    ///
    /// Zero, negative or non-finite dimensions mean the image has not loaded yet.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }
}
