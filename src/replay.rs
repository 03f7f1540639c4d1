//! Scripted pointer replay.
//!
//! A script is a JSON document naming the starting corners, an optional
//! bitmap size and options, and a list of pointer events. Replaying it drives
//! a [`TransformLayer`] exactly as a host would and collects every placement.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::Path;

use serde::Deserialize;

use crate::config::TransformOptions;
use crate::error::TransformError;
use crate::gesture::PointerEvent;
use crate::hit::HitPart;
use crate::layer::{Action, Placement, TransformLayer};
use crate::point::{Point, Size};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read image header: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("event {index}: unknown target `{name}`")]
    UnknownTarget { index: usize, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    #[serde(rename = "type")]
    pub kind: ScriptEventKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// `body`, `rotate`, or a handle name. Omitted means hit-test.
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub corners: Vec<[f64; 2]>,
    #[serde(default)]
    pub bitmap: Option<Size>,
    #[serde(default)]
    pub options: TransformOptions,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Json`] when the text is not a valid script.
    pub fn parse(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Command-line overrides applied on top of the script.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub bitmap: Option<Size>,
    pub ratio_locked: bool,
    pub fit_to_image: bool,
}

/// Read the bitmap size from an image file header.
///
/// # Errors
///
/// Returns [`ReplayError::Image`] when the file cannot be read or decoded.
pub fn bitmap_size_from_image(path: &Path) -> Result<Size, ReplayError> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(Size::new(f64::from(width), f64::from(height)))
}

/// Replay `script` and return every placement in emission order.
///
/// # Errors
///
/// Fails on malformed corners or options, or on an unknown event target.
pub fn run(script: &Script, overrides: Overrides) -> Result<Vec<Placement>, ReplayError> {
    let mut options = script.options;
    options.ratio_locked |= overrides.ratio_locked;
    options.fit_to_image |= overrides.fit_to_image;

    let corners: Vec<Point> = script.corners.iter().copied().map(Point::from).collect();
    let mut layer = TransformLayer::new(&corners, options)?;
    let mut placements = Vec::new();

    if let Some(size) = overrides.bitmap.or(script.bitmap) {
        collect(&mut placements, layer.set_bitmap_size(size));
    }

    for (index, event) in script.events.iter().enumerate() {
        let point = Point::new(event.x, event.y);
        let actions = match event.kind {
            ScriptEventKind::Down => {
                let target = match event.target.as_deref() {
                    Some(name) => Some(
                        HitPart::from_name(name)
                            .ok_or_else(|| ReplayError::UnknownTarget { index, name: name.to_owned() })?,
                    ),
                    None => None,
                };
                layer.apply_gesture(PointerEvent::down(point, target))
            }
            ScriptEventKind::Move => layer.apply_gesture(PointerEvent::moved(point)),
            ScriptEventKind::Up => layer.apply_gesture(PointerEvent::up(point)),
            ScriptEventKind::Cancel => layer.cancel_gesture(),
        };
        collect(&mut placements, actions);
    }

    tracing::debug!(layer = %layer.id(), events = script.events.len(), placements = placements.len(), "replay finished");
    Ok(placements)
}

fn collect(out: &mut Vec<Placement>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::Placement(placement) => out.push(placement),
            Action::Gesture(event) => tracing::debug!(gesture = %event.name(), "gesture event"),
        }
    }
}
