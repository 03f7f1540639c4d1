//! Geographic ↔ planar projection contract.
//!
//! The layer itself only works in planar pixels. Hosts that anchor the
//! overlay to a map hand it a [`Projector`]; [`WebMercator`] is the usual
//! slippy-map projection.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_MERCATOR_LATITUDE, TILE_SIZE_PX};
use crate::point::Point;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// Converts between geographic coordinates and the host's planar pixel space.
pub trait Projector {
    fn project_to_planar(&self, geo: GeoPoint) -> Point;
    fn project_to_geo(&self, point: Point) -> GeoPoint;
}

/// Spherical Web Mercator at a fixed zoom level.
///
/// `origin` is the world-pixel position of the planar origin, so planar
/// coordinates match the host's layer space rather than the world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    pub zoom: f64,
    pub origin: Point,
}

impl WebMercator {
    #[must_use]
    pub fn new(zoom: f64) -> Self {
        Self { zoom, origin: Point::default() }
    }

    #[must_use]
    pub fn with_origin(zoom: f64, origin: Point) -> Self {
        Self { zoom, origin }
    }

    /// World size in pixels at this zoom.
    #[must_use]
    pub fn world_size(&self) -> f64 {
        TILE_SIZE_PX * self.zoom.exp2()
    }
}

impl Projector for WebMercator {
    fn project_to_planar(&self, geo: GeoPoint) -> Point {
        let size = self.world_size();
        let lat = geo.lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let sin = lat.to_radians().sin();
        let x = (geo.lng + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
        Point::new(x, y) - self.origin
    }

    fn project_to_geo(&self, point: Point) -> GeoPoint {
        let size = self.world_size();
        let world = point + self.origin;
        let lng = world.x / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * world.y / size);
        GeoPoint::new(n.sinh().atan().to_degrees(), lng)
    }
}
