//! The transformable overlay: one quad, one bitmap, one gesture controller.
//!
//! `TransformLayer` is the piece a host talks to. It accepts corner updates,
//! bitmap sizes and pointer events, and answers with [`Action`]s describing
//! what the host should render or forward. It has no rendering or DOM
//! dependencies so the whole interaction can be driven from tests.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use serde::Serialize;
use uuid::Uuid;

use crate::affine::{self, AffineParams, BoundingBox};
use crate::config::TransformOptions;
use crate::error::TransformError;
use crate::gesture::{GestureController, GestureEvent, GesturePhase, PointerEvent, PointerKind};
use crate::hit::{self, Handles};
use crate::point::{Point, Size};
use crate::projection::{GeoBounds, GeoPoint, Projector};
use crate::quad::Quad;

/// Unique identifier for a layer.
pub type LayerId = Uuid;

/// Where and how to paint the bitmap after a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub layer: LayerId,
    pub quad: Quad,
    pub bounds: BoundingBox,
    /// `None` until the bitmap size is known.
    pub affine: Option<AffineParams>,
    pub css: Option<String>,
}

/// Actions returned to the host for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The bitmap must be repositioned.
    Placement(Placement),
    /// Gesture lifecycle notification for listeners.
    Gesture(GestureEvent),
}

/// A bitmap overlay that can be dragged, scaled and rotated.
#[derive(Debug, Clone)]
pub struct TransformLayer {
    id: LayerId,
    quad: Quad,
    bitmap: Option<Size>,
    options: TransformOptions,
    gestures: GestureController,
}

impl TransformLayer {
    /// Create a layer from 3 or 4 planar corners.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidGeometry`] for a bad corner list and
    /// [`TransformError::ConfigParse`] for out-of-range options.
    pub fn new(points: &[Point], options: TransformOptions) -> Result<Self, TransformError> {
        options.validate()?;
        let quad = Quad::from_points(points)?;
        let id = Uuid::new_v4();
        tracing::debug!(%id, "layer created");
        Ok(Self { id, quad, bitmap: None, options, gestures: GestureController::new() })
    }

    /// Create a layer from geographic corners.
    ///
    /// # Errors
    ///
    /// Same as [`TransformLayer::new`].
    pub fn from_geo(
        projector: &impl Projector,
        corners: &[GeoPoint],
        options: TransformOptions,
    ) -> Result<Self, TransformError> {
        let points: Vec<Point> = corners.iter().map(|&c| projector.project_to_planar(c)).collect();
        Self::new(&points, options)
    }

    /// Create an unrotated layer covering a geographic box.
    ///
    /// # Errors
    ///
    /// Same as [`TransformLayer::new`].
    pub fn from_geo_bounds(
        projector: &impl Projector,
        bounds: GeoBounds,
        options: TransformOptions,
    ) -> Result<Self, TransformError> {
        let sw = bounds.south_west;
        let ne = bounds.north_east;
        let corners = [sw, GeoPoint::new(ne.lat, sw.lng), ne, GeoPoint::new(sw.lat, ne.lng)];
        Self::from_geo(projector, &corners, options)
    }

    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    // --- Data inputs ---

    /// Replace the corners.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidGeometry`] and leaves the layer
    /// unchanged when the corner list is malformed.
    pub fn set_corners(&mut self, points: &[Point]) -> Result<Placement, TransformError> {
        let quad = Quad::from_points(points).inspect_err(|err| {
            tracing::warn!(layer = %self.id, error = %err, "rejected corners");
        })?;
        self.quad = quad;
        self.apply_fit();
        Ok(self.placement())
    }

    /// Replace the corners from geographic coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`TransformLayer::set_corners`].
    pub fn set_geo_corners(
        &mut self,
        projector: &impl Projector,
        corners: &[GeoPoint],
    ) -> Result<Placement, TransformError> {
        let points: Vec<Point> = corners.iter().map(|&c| projector.project_to_planar(c)).collect();
        self.set_corners(&points)
    }

    /// Record the bitmap's natural size.
    ///
    /// A size with a zero or non-finite dimension means the bitmap is not
    /// loaded: any earlier size is forgotten and nothing is emitted.
    pub fn set_bitmap_size(&mut self, size: Size) -> Vec<Action> {
        if !size.is_resolved() {
            tracing::debug!(layer = %self.id, width = size.width, height = size.height, "bitmap size unresolved");
            self.bitmap = None;
            return Vec::new();
        }
        self.bitmap = Some(size);
        self.apply_fit();
        vec![Action::Placement(self.placement())]
    }

    /// Replace the options, cancelling any session in progress first.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ConfigParse`] for out-of-range options; the
    /// layer keeps its previous options.
    pub fn set_options(&mut self, options: TransformOptions) -> Result<Vec<Action>, TransformError> {
        options.validate()?;
        let mut actions = self.cancel_gesture();
        let fit_enabled = options.fit_to_image && !self.options.fit_to_image;
        self.options = options;
        if fit_enabled && self.apply_fit() {
            actions.push(Action::Placement(self.placement()));
        }
        Ok(actions)
    }

    // --- Gestures ---

    /// Feed one pointer event through the gesture controller.
    pub fn apply_gesture(&mut self, event: PointerEvent) -> Vec<Action> {
        match event.kind {
            PointerKind::Down => {
                let target = event.target.or_else(|| hit::hit_test(event.point, &self.quad, &self.options));
                let Some(target) = target else {
                    return Vec::new();
                };
                let started = self.gestures.pointer_down(&self.quad, event.point, target, &self.options);
                started
                    .map(|ev| {
                        tracing::debug!(layer = %self.id, gesture = ev.kind.event_stem(), ?target, "gesture started");
                        Action::Gesture(ev)
                    })
                    .into_iter()
                    .collect()
            }
            PointerKind::Move => {
                let Some(ev) = self.gestures.pointer_move(event.point) else {
                    return Vec::new();
                };
                self.quad = ev.quad;
                vec![Action::Placement(self.placement()), Action::Gesture(ev)]
            }
            PointerKind::Up => self
                .gestures
                .pointer_up(&self.quad)
                .map(|ev| {
                    tracing::debug!(layer = %self.id, gesture = ev.kind.event_stem(), "gesture ended");
                    Action::Gesture(ev)
                })
                .into_iter()
                .collect(),
        }
    }

    /// Abandon the active session and restore the quad it started from.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let Some(kind) = self.gestures.session().map(|s| s.kind) else {
            return Vec::new();
        };
        let Some(start) = self.gestures.cancel() else {
            return Vec::new();
        };
        tracing::debug!(layer = %self.id, gesture = kind.event_stem(), "gesture cancelled");
        self.quad = start;
        vec![
            Action::Placement(self.placement()),
            Action::Gesture(GestureEvent { kind, phase: GesturePhase::End, quad: start }),
        ]
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_active()
    }

    // --- Programmatic transforms ---

    /// Rotate about the quad's center by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> Placement {
        self.quad = self.quad.rotate(angle, None);
        self.placement()
    }

    /// Translate so the quad's center lands on `center`.
    pub fn move_to(&mut self, center: Point) -> Placement {
        self.quad = self.quad.move_to(center);
        self.placement()
    }

    // --- Queries ---

    #[must_use]
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    #[must_use]
    pub fn bitmap_size(&self) -> Option<Size> {
        self.bitmap
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.quad.center()
    }

    #[must_use]
    pub fn orientation(&self) -> f64 {
        self.quad.orientation()
    }

    #[must_use]
    pub fn handles(&self) -> Handles {
        hit::handles(&self.quad, &self.options)
    }

    /// Affine parameters for the current quad, once the bitmap size is known.
    #[must_use]
    pub fn current_transform(&self) -> Option<AffineParams> {
        self.bitmap.and_then(|size| affine::decompose(&self.quad, size))
    }

    #[must_use]
    pub fn current_bounds(&self) -> BoundingBox {
        BoundingBox::of(&self.quad)
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        let affine = self.current_transform();
        Placement {
            layer: self.id,
            quad: self.quad,
            bounds: self.current_bounds(),
            css: affine.map(|a| a.to_css()),
            affine,
        }
    }

    /// Current corners in geographic coordinates, in corner order.
    #[must_use]
    pub fn geo_corners(&self, projector: &impl Projector) -> [GeoPoint; 4] {
        self.quad.corners().map(|p| projector.project_to_geo(p))
    }

    /// Geographic box enclosing the current quad.
    #[must_use]
    pub fn geo_bounds(&self, projector: &impl Projector) -> GeoBounds {
        let bounds = self.current_bounds();
        let max = bounds.max();
        GeoBounds {
            south_west: projector.project_to_geo(Point::new(bounds.min.x, max.y)),
            north_east: projector.project_to_geo(Point::new(max.x, bounds.min.y)),
        }
    }

    /// Run the aspect fit if enabled and the bitmap is known. Returns whether
    /// the quad changed.
    fn apply_fit(&mut self) -> bool {
        if !self.options.fit_to_image {
            return false;
        }
        let Some(size) = self.bitmap else {
            return false;
        };
        match affine::fit_to_aspect(&self.quad, size) {
            Some(fitted) => {
                tracing::debug!(layer = %self.id, aspect = size.aspect(), "fitted quad to bitmap");
                self.quad = fitted;
                true
            }
            None => false,
        }
    }
}
