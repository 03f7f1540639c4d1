//! Affine decomposition: the translate + skew + scale that paints a bitmap
//! onto a quad.
//!
//! The renderer positions an element at [`BoundingBox::min`], sizes it to
//! [`BoundingBox::size`], and applies [`AffineParams`] to the bitmap inside it
//! with the transform origin pinned to the bitmap's top-left corner.
//!
//! Only `topLeft`, `topRight` and `bottomLeft` feed the decomposition, so any
//! parallelogram is reproduced exactly. For a general quad the fourth corner is
//! only approximated: `bottomRight` drives handles and hit-testing but the
//! rendered bitmap lands on `topRight + bottomLeft − topLeft` instead.

#[cfg(test)]
#[path = "affine_test.rs"]
mod affine_test;

use serde::Serialize;

use crate::consts::GEOMETRY_EPSILON;
use crate::point::{Point, Size};
use crate::quad::{Anchor, Quad};

/// Axis-aligned bounds of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: Point,
    pub size: Point,
}

impl BoundingBox {
    /// Min/max over all four corners.
    #[must_use]
    pub fn of(quad: &Quad) -> Self {
        let corners = quad.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Self { min, size: max - min }
    }

    #[must_use]
    pub fn max(&self) -> Point {
        self.min + self.size
    }
}

/// Translate, skew and scale applied to the bitmap inside its bounding box.
///
/// Composed in that order: `translate → skew(skew_y, skew_x) → scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineParams {
    /// Offset of `topLeft` from the bounding box minimum.
    pub translate: Point,
    /// Angle of the top edge from horizontal, in radians.
    pub skew_x: f64,
    /// Angle of the left edge from vertical, in radians.
    pub skew_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl AffineParams {
    /// CSS `transform` value for the bitmap element.
    ///
    /// Note the skew arguments: CSS `skew(ax, ay)` takes the horizontal shear
    /// angle first, which is the left edge's lean (`skew_y`).
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) skew({}rad, {}rad) scale({}, {})",
            self.translate.x, self.translate.y, self.skew_y, self.skew_x, self.scale_x, self.scale_y
        )
    }

    /// The composed transform as a CSS-style matrix `[a, b, c, d, e, f]`.
    ///
    /// Maps a bitmap pixel `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)` in
    /// bounding-box coordinates.
    #[must_use]
    pub fn matrix(&self) -> [f64; 6] {
        let a = self.scale_x;
        let b = self.scale_x * self.skew_x.tan();
        let c = self.scale_y * self.skew_y.tan();
        let d = self.scale_y;
        [a, b, c, d, self.translate.x, self.translate.y]
    }

    /// Map a bitmap pixel into bounding-box coordinates.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.matrix();
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

/// Derive the affine parameters that paint a `bitmap`-sized image onto `quad`.
///
/// Returns `None` while the bitmap size is unresolved. A degenerate quad
/// (coincident corners) yields zero scale rather than NaN.
#[must_use]
pub fn decompose(quad: &Quad, bitmap: Size) -> Option<AffineParams> {
    if !bitmap.is_resolved() {
        return None;
    }
    let bounds = BoundingBox::of(quad);
    let top_left = quad.top_left();
    let vector_x = quad.top_right() - top_left;
    let vector_y = quad.bottom_left() - top_left;

    let skew_x = vector_x.y.atan2(vector_x.x);
    let skew_y = vector_y.x.atan2(vector_y.y);
    let scale_x = vector_x.length() / bitmap.width * skew_x.cos();
    let scale_y = vector_y.length() / bitmap.height * skew_y.cos();

    Some(AffineParams {
        translate: top_left - bounds.min,
        skew_x: finite_or_zero(skew_x),
        skew_y: finite_or_zero(skew_y),
        scale_x: finite_or_zero(scale_x),
        scale_y: finite_or_zero(scale_y),
    })
}

/// Grow one axis of `quad` so its aspect matches the bitmap's.
///
/// Extents are measured in the quad's unrotated frame between the dragged
/// corner and its opposite, which is what the rebuilt rectangle spans. A
/// bitmap wider than those extents widens the quad through the `right`
/// handle; a taller one heightens it through the `top` handle. A sheared quad
/// comes out as a rectangle. Returns `None` when the edge aspect already
/// agrees or either shape is degenerate.
#[must_use]
pub fn fit_to_aspect(quad: &Quad, bitmap: Size) -> Option<Quad> {
    if !bitmap.is_resolved() {
        return None;
    }
    let target = bitmap.aspect();
    let edge_aspect = quad.width() / quad.height();
    if edge_aspect.is_finite() && (target - edge_aspect).abs() <= GEOMETRY_EPSILON * target.max(edge_aspect) {
        return None;
    }

    let local = quad.unrotated();
    let right = local.bottom_right() - local.top_left();
    let top = local.top_right() - local.bottom_left();
    if right.x == 0.0 || right.y == 0.0 || top.x == 0.0 || top.y == 0.0 || !right.is_finite() {
        return None;
    }
    let fitted = if target > right.x.abs() / right.y.abs() {
        let dx = right.x.signum() * right.y.abs() * target - right.x;
        quad.scale_local(Point::new(dx, 0.0), Anchor::Right, false, None)
    } else {
        let dy = top.y.signum() * top.x.abs() / target - top.y;
        quad.scale_local(Point::new(0.0, dy), Anchor::Top, false, None)
    };
    Some(fitted)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
