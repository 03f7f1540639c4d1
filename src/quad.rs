//! Quadrilateral model and the pure geometry operations applied to it.
//!
//! A [`Quad`] stores four independent corners in the fixed order
//! `[bottomLeft, topLeft, topRight, bottomRight]`. Logically it is a rectangle
//! that has been rotated (and possibly sheared) out of its own local frame, so
//! operations that move one corner keep the other three consistent with that
//! rectangle: scaling un-rotates the quad into its local frame, edits the
//! rectangle there, and rotates the result back.
//!
//! Every operation here is a pure function returning a new `Quad`; nothing in
//! this module observes or emits events.

#[cfg(test)]
#[path = "quad_test.rs"]
mod quad_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::TAU;
use crate::error::TransformError;
use crate::point::Point;

/// One of the four stored corners, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl Corner {
    /// All corners in storage order.
    pub const ALL: [Corner; 4] = [Self::BottomLeft, Self::TopLeft, Self::TopRight, Self::BottomRight];

    /// Storage index of this corner.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::BottomLeft => 0,
            Self::TopLeft => 1,
            Self::TopRight => 2,
            Self::BottomRight => 3,
        }
    }

    /// The corner across the diagonal (`i + 2 mod 4`).
    #[must_use]
    pub fn opposite(self) -> Corner {
        match self {
            Self::BottomLeft => Self::TopRight,
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// The neighbour on the same left or right side.
    #[must_use]
    pub fn side_neighbor(self) -> Corner {
        match self {
            Self::BottomLeft => Self::TopLeft,
            Self::TopLeft => Self::BottomLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomRight => Self::TopRight,
        }
    }

    /// The neighbour on the same top or bottom side.
    #[must_use]
    pub fn cap_neighbor(self) -> Corner {
        match self {
            Self::BottomLeft => Self::BottomRight,
            Self::TopLeft => Self::TopRight,
            Self::TopRight => Self::TopLeft,
            Self::BottomRight => Self::BottomLeft,
        }
    }
}

/// A scale handle: one of the four corners or one of the four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
    Left,
    Top,
    Right,
    Bottom,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Self::BottomLeft,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
    ];

    /// The stored corner a drag on this handle edits.
    ///
    /// Edge handles drive one corner of their edge; the rectangle fix-up in
    /// [`Quad::scale_from_anchor`] then carries the other corner of that edge along.
    #[must_use]
    pub fn corner(self) -> Corner {
        match self {
            Self::BottomLeft | Self::Bottom => Corner::BottomLeft,
            Self::TopLeft | Self::Left => Corner::TopLeft,
            Self::TopRight | Self::Top => Corner::TopRight,
            Self::BottomRight | Self::Right => Corner::BottomRight,
        }
    }

    /// Whether this is an edge-midpoint handle.
    #[must_use]
    pub fn is_edge(self) -> bool {
        matches!(self, Self::Left | Self::Top | Self::Right | Self::Bottom)
    }

    /// The two corners bounding an edge handle's edge.
    #[must_use]
    pub fn edge_corners(self) -> Option<(Corner, Corner)> {
        match self {
            Self::Left => Some((Corner::BottomLeft, Corner::TopLeft)),
            Self::Top => Some((Corner::TopLeft, Corner::TopRight)),
            Self::Right => Some((Corner::TopRight, Corner::BottomRight)),
            Self::Bottom => Some((Corner::BottomRight, Corner::BottomLeft)),
            _ => None,
        }
    }

    /// Zero the axis an edge handle cannot move along.
    #[must_use]
    pub fn constrain(self, delta: Point) -> Point {
        match self {
            Self::Left | Self::Right => Point::new(delta.x, 0.0),
            Self::Top | Self::Bottom => Point::new(0.0, delta.y),
            _ => delta,
        }
    }

    /// The camelCase handle name used on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottomLeft",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomRight => "bottomRight",
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }

    /// Look up a handle by its camelCase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Anchor> {
        Self::ALL.into_iter().find(|anchor| anchor.name() == name)
    }
}

/// Fold an angle above one full turn back down by repeated division.
///
/// This is not a modulo: `3π` becomes `1.5`, not `π`. Hosts that persisted
/// angles from earlier releases depend on this exact folding.
/// Non-finite input folds to `0`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut angle = angle;
    while angle > TAU {
        angle /= TAU;
    }
    angle
}

/// Four planar corners ordered `[bottomLeft, topLeft, topRight, bottomRight]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Quad {
    corners: [Point; 4],
}

impl Quad {
    #[must_use]
    pub fn new(bottom_left: Point, top_left: Point, top_right: Point, bottom_right: Point) -> Self {
        Self { corners: [bottom_left, top_left, top_right, bottom_right] }
    }

    /// Build a parallelogram from three corners; `bottomRight = topRight − topLeft + bottomLeft`.
    #[must_use]
    pub fn from_parallelogram(bottom_left: Point, top_left: Point, top_right: Point) -> Self {
        Self::new(bottom_left, top_left, top_right, top_right - top_left + bottom_left)
    }

    /// Build a quad from 4 corners, or 3 corners with the fourth derived.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidGeometry`] for any other corner count
    /// or for a corner with non-finite coordinates.
    pub fn from_points(points: &[Point]) -> Result<Self, TransformError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TransformError::InvalidGeometry(format!(
                "corner {index} has non-finite coordinates"
            )));
        }
        match *points {
            [bl, tl, tr] => Ok(Self::from_parallelogram(bl, tl, tr)),
            [bl, tl, tr, br] => Ok(Self::new(bl, tl, tr, br)),
            _ => Err(TransformError::InvalidGeometry(format!("expected 3 or 4 corners, got {}", points.len()))),
        }
    }

    /// Corners in storage order.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners[corner.index()]
    }

    #[must_use]
    pub fn bottom_left(&self) -> Point {
        self.corner(Corner::BottomLeft)
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.corner(Corner::TopLeft)
    }

    #[must_use]
    pub fn top_right(&self) -> Point {
        self.corner(Corner::TopRight)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.corner(Corner::BottomRight)
    }

    /// Position of a scale handle: the corner itself or the midpoint of its edge.
    #[must_use]
    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        match anchor.edge_corners() {
            Some((a, b)) => self.corner(a).midpoint(self.corner(b)),
            None => self.corner(anchor.corner()),
        }
    }

    /// Midpoint of the `topLeft`/`bottomRight` diagonal.
    #[must_use]
    pub fn center(&self) -> Point {
        self.top_left().midpoint(self.bottom_right())
    }

    /// Signed rotation of the quad away from its unrotated frame, in radians.
    ///
    /// Measured on the left edge while it points up the screen, and on the
    /// right edge otherwise, so the angle stays continuous across ±90°.
    /// Yields values in `(−π/2, 3π/2]`; a degenerate quad yields `0`.
    #[must_use]
    pub fn orientation(&self) -> f64 {
        let d1 = self.top_left() - self.bottom_left();
        let d2 = self.top_right() - self.bottom_right();
        let angle = if d1.y < 0.0 { -(d1.x / d1.y).atan() } else { PI - (d2.x / d2.y).atan() };
        if angle.is_finite() { angle } else { 0.0 }
    }

    /// Length of the top edge.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.top_left().distance_to(self.top_right())
    }

    /// Length of the left edge.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top_left().distance_to(self.bottom_left())
    }

    /// Distance from `corner` to the corner across the diagonal.
    #[must_use]
    pub fn diagonal(&self, corner: Corner) -> f64 {
        self.corner(corner).distance_to(self.corner(corner.opposite()))
    }

    /// Whether opposite edges are parallel and equal within `epsilon`.
    #[must_use]
    pub fn is_parallelogram(&self, epsilon: f64) -> bool {
        let top = self.top_right() - self.top_left();
        let bottom = self.bottom_right() - self.bottom_left();
        (top - bottom).length() <= epsilon
    }

    /// Rotate every corner by `angle` about `pivot` (the center when `None`).
    ///
    /// The angle is first folded with [`normalize_angle`].
    #[must_use]
    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Quad {
        let angle = normalize_angle(angle);
        if angle == 0.0 {
            return *self;
        }
        let pivot = pivot.unwrap_or_else(|| self.center());
        self.map(|p| p.rotated_about(pivot, angle))
    }

    /// Offset every corner by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Quad {
        let delta = Point::new(dx, dy);
        self.map(|p| p + delta)
    }

    /// Translate so the center lands on `center`.
    #[must_use]
    pub fn move_to(&self, center: Point) -> Quad {
        let delta = center - self.center();
        if delta.x == 0.0 && delta.y == 0.0 {
            return *self;
        }
        self.translate(delta.x, delta.y)
    }

    /// Drag the `anchor` handle by a screen-space delta `(dx, dy)`.
    ///
    /// The quad is un-rotated about its center into its local frame, the
    /// handle's corner moves there, the rest of the local rectangle is rebuilt
    /// around the diagonally opposite corner (which never moves), and the
    /// result is rotated back. Edge handles only move along their normal.
    ///
    /// With `ratio_locked`, the moved corner is projected onto the diagonal
    /// from the opposite corner, so both axes scale by the same ratio.
    /// The projection is measured against the current diagonal, so a zero
    /// delta leaves the quad unchanged. `start_diagonal` is the diagonal
    /// recorded when the drag began; when it is zero or non-finite the lock
    /// is disabled and the corner moves freely.
    #[must_use]
    pub fn scale_from_anchor(
        &self,
        dx: f64,
        dy: f64,
        anchor: Anchor,
        ratio_locked: bool,
        start_diagonal: Option<f64>,
    ) -> Quad {
        let angle = self.orientation();
        let delta = Point::new(dx, dy);
        let local_delta = if angle == 0.0 { delta } else { delta.rotated(-angle) };
        self.scale_local(local_delta, anchor, ratio_locked, start_diagonal)
    }

    /// [`Quad::scale_from_anchor`] with the delta already in the local frame.
    pub(crate) fn scale_local(
        &self,
        local_delta: Point,
        anchor: Anchor,
        ratio_locked: bool,
        start_diagonal: Option<f64>,
    ) -> Quad {
        let angle = self.orientation();
        let pivot = self.center();
        let local = self.unrotated();

        let corner = anchor.corner();
        let start = local.corner(corner);
        let opposite = local.corner(corner.opposite());
        let mut moved = start + anchor.constrain(local_delta);

        if ratio_locked {
            let axis = start - opposite;
            let axis_sq = axis.dot(axis);
            let recorded = start_diagonal.unwrap_or_else(|| axis_sq.sqrt());
            if recorded > 0.0 && recorded.is_finite() && axis_sq > 0.0 {
                let ratio = (moved - opposite).dot(axis) / axis_sq;
                moved = opposite + axis * ratio;
            }
        }

        let mut corners = local.corners;
        corners[corner.index()] = moved;
        corners[corner.side_neighbor().index()] = Point::new(moved.x, opposite.y);
        corners[corner.cap_neighbor().index()] = Point::new(opposite.x, moved.y);
        let rebuilt = Quad { corners };

        if angle == 0.0 { rebuilt } else { rebuilt.map(|p| p.rotated_about(pivot, angle)) }
    }

    /// The quad turned back by its orientation about its center.
    pub(crate) fn unrotated(&self) -> Quad {
        let angle = self.orientation();
        if angle == 0.0 {
            return *self;
        }
        let pivot = self.center();
        self.map(|p| p.rotated_about(pivot, -angle))
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Quad {
        Quad { corners: self.corners.map(f) }
    }
}
