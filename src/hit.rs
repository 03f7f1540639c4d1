#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::Serialize;

use crate::config::TransformOptions;
use crate::point::{Point, point_on_line};
use crate::quad::{Anchor, Quad};

/// Which part of the overlay a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ScaleHandle(Anchor),
    RotateHandle,
}

impl HitPart {
    /// Parse a host target name: `body`, `rotate`, or a scale handle name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<HitPart> {
        match name {
            "body" => Some(Self::Body),
            "rotate" | "rotation" => Some(Self::RotateHandle),
            other => Anchor::from_name(other).map(Self::ScaleHandle),
        }
    }
}

/// Screen positions of the interactive handles for the current quad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handles {
    /// Corner and edge-midpoint scale handles; empty when scaling is disabled.
    pub scale: Vec<(Anchor, Point)>,
    /// Rotate handle; `None` when rotation is disabled.
    pub rotate: Option<Point>,
    /// Guide line from the top edge midpoint out to the rotate handle.
    pub rotate_line: Option<(Point, Point)>,
}

/// Lay out the handles for `quad` under the enabled gestures.
///
/// The rotate handle sits `rotate_handle_offset` pixels beyond the top edge
/// midpoint, along the line from the bottom edge midpoint.
#[must_use]
pub fn handles(quad: &Quad, options: &TransformOptions) -> Handles {
    let scale = if options.scalable {
        Anchor::ALL.iter().map(|&anchor| (anchor, quad.anchor_point(anchor))).collect()
    } else {
        Vec::new()
    };
    let (rotate, rotate_line) = if options.rotatable {
        let top = quad.anchor_point(Anchor::Top);
        let bottom = quad.anchor_point(Anchor::Bottom);
        let handle = point_on_line(bottom, top, options.rotate_handle_offset);
        (Some(handle), Some((top, handle)))
    } else {
        (None, None)
    };
    Handles { scale, rotate, rotate_line }
}

/// Test what part of the overlay is under `point`, checking handles first.
///
/// Among overlapping scale handles the nearest wins.
#[must_use]
pub fn hit_test(point: Point, quad: &Quad, options: &TransformOptions) -> Option<HitPart> {
    let layout = handles(quad, options);
    let radius = options.handle_radius;

    if let Some(rotate) = layout.rotate {
        if point.distance_to(rotate) <= radius {
            return Some(HitPart::RotateHandle);
        }
    }

    let nearest = layout
        .scale
        .iter()
        .map(|&(anchor, at)| (anchor, point.distance_to(at)))
        .filter(|&(_, dist)| dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((anchor, _)) = nearest {
        return Some(HitPart::ScaleHandle(anchor));
    }

    if contains(quad, point) {
        return Some(HitPart::Body);
    }
    None
}

/// Whether `point` lies inside the quad's outline (even-odd rule).
#[must_use]
pub fn contains(quad: &Quad, point: Point) -> bool {
    let corners = quad.corners();
    let mut inside = false;
    let mut j = corners.len() - 1;
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
