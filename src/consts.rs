//! Shared numeric constants for the overlay transform crate.

// ── Math ────────────────────────────────────────────────────────

/// Full turn in radians. Angles above this are folded by [`crate::quad::normalize_angle`].
pub const TAU: f64 = std::f64::consts::TAU;

/// Tolerance used when comparing aspect ratios and parallelogram corners.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

// ── Handles ─────────────────────────────────────────────────────

/// Screen-space hit slop in pixels for scale and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge midpoint to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 20.0;

// ── Projection ──────────────────────────────────────────────────

/// Edge length of one Web Mercator tile at zoom 0, in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitude limit of the square Web Mercator world, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;
