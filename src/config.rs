//! Layer options parsed from JSON.
//!
//! Field names follow the host-facing option names (`move`, `scale`,
//! `rotate`, `ratioLocked`, `fitToImage`); the older plugin spellings
//! (`draggable`, `scalable`, `rotatable`, `keepRatio`) are accepted as aliases.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::error::TransformError;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Dragging the bitmap body translates the quad.
    #[serde(rename = "move", alias = "draggable")]
    pub movable: bool,
    /// Corner and edge handles scale the quad.
    #[serde(rename = "scale", alias = "scalable")]
    pub scalable: bool,
    /// The rotate handle rotates the quad about its center.
    #[serde(rename = "rotate", alias = "rotatable")]
    pub rotatable: bool,
    /// Corner scaling keeps the diagonal aspect of the quad.
    #[serde(alias = "keepRatio")]
    pub ratio_locked: bool,
    /// Once the bitmap size is known, grow one axis so the quad matches its aspect.
    pub fit_to_image: bool,
    /// Distance in pixels from the top edge midpoint to the rotate handle.
    pub rotate_handle_offset: f64,
    /// Hit slop in pixels around each handle.
    pub handle_radius: f64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            movable: true,
            scalable: true,
            rotatable: true,
            ratio_locked: false,
            fit_to_image: false,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET_PX,
            handle_radius: HANDLE_RADIUS_PX,
        }
    }
}

impl TransformOptions {
    /// Parse options from a JSON object. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ConfigParse`] for malformed JSON, unknown
    /// value types, or negative pixel distances.
    pub fn from_json(raw: &str) -> Result<Self, TransformError> {
        let options: Self = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject pixel distances that cannot place or hit a handle.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ConfigParse`] naming the offending field.
    pub fn validate(&self) -> Result<(), TransformError> {
        if !self.rotate_handle_offset.is_finite() || self.rotate_handle_offset < 0.0 {
            return Err(TransformError::ConfigParse(format!(
                "rotateHandleOffset must be a non-negative number, got {}",
                self.rotate_handle_offset
            )));
        }
        if !self.handle_radius.is_finite() || self.handle_radius < 0.0 {
            return Err(TransformError::ConfigParse(format!(
                "handleRadius must be a non-negative number, got {}",
                self.handle_radius
            )));
        }
        Ok(())
    }
}
