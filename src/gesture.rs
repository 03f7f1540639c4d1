//! Gesture model: pointer events, the session snapshot, and the state machine
//! that turns a pointer stream into quad mutations.
//!
//! A session begins on pointer-down over the body or a handle and ends on
//! pointer-up. Every pointer-move is applied to the quad captured at
//! pointer-down using the total delta from the start pointer, so the result
//! never drifts regardless of how many moves arrive in between.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use serde::{Deserialize, Serialize};

use crate::config::TransformOptions;
use crate::hit::HitPart;
use crate::point::Point;
use crate::quad::{Anchor, Quad, normalize_angle};

/// Which mutation a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Translate the whole quad (dragging the bitmap body).
    Move,
    /// Drag a corner or edge handle.
    Scale,
    /// Turn the quad about its center with the rotate handle.
    Rotate,
}

impl GestureKind {
    /// Event-name stem: `drag`, `scale` or `rotate`.
    #[must_use]
    pub fn event_stem(self) -> &'static str {
        match self {
            Self::Move => "drag",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }
}

/// Position of a notification within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Start,
    Update,
    End,
}

/// Lifecycle notification carrying the quad at that moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub phase: GesturePhase,
    pub quad: Quad,
}

impl GestureEvent {
    /// Host-facing event name, e.g. `dragstart`, `scale`, `rotateend`.
    #[must_use]
    pub fn name(&self) -> String {
        let suffix = match self.phase {
            GesturePhase::Start => "start",
            GesturePhase::Update => "",
            GesturePhase::End => "end",
        };
        format!("{}{suffix}", self.kind.event_stem())
    }
}

/// Pointer event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in planar pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    /// What the host says was pressed. `None` lets the layer hit-test.
    pub target: Option<HitPart>,
}

impl PointerEvent {
    #[must_use]
    pub fn down(point: Point, target: Option<HitPart>) -> Self {
        Self { kind: PointerKind::Down, point, target }
    }

    #[must_use]
    pub fn moved(point: Point) -> Self {
        Self { kind: PointerKind::Move, point, target: None }
    }

    #[must_use]
    pub fn up(point: Point) -> Self {
        Self { kind: PointerKind::Up, point, target: None }
    }
}

/// Snapshot taken at pointer-down; everything a pointer-move needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub kind: GestureKind,
    /// Handle being dragged. Only set for scale sessions.
    pub anchor: Option<Anchor>,
    /// Quad at pointer-down; every move is computed from this.
    pub start_quad: Quad,
    pub start_pointer: Point,
    /// Orientation of `start_quad`.
    pub start_orientation: f64,
    /// Distance from the dragged corner to its diagonal opposite. Scale only.
    pub start_diagonal: Option<f64>,
    /// Center of `start_quad`; the rotation pivot.
    pub pivot: Point,
    /// Ratio lock in effect when the session started.
    pub ratio_locked: bool,
}

impl GestureSession {
    /// Quad for the pointer at `pointer`, or `None` when it has not moved
    /// from the start position or a scale session has no handle.
    #[must_use]
    pub fn quad_at(&self, pointer: Point) -> Option<Quad> {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        match self.kind {
            GestureKind::Move => Some(self.start_quad.translate(dx, dy)),
            GestureKind::Scale => {
                let anchor = self.anchor?;
                Some(self.start_quad.scale_from_anchor(dx, dy, anchor, self.ratio_locked, self.start_diagonal))
            }
            GestureKind::Rotate => {
                let angle = pointer.angle_around(self.pivot) - self.start_pointer.angle_around(self.pivot);
                Some(self.start_quad.rotate(normalize_angle(angle), Some(self.pivot)))
            }
        }
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pointer is held on the body or a handle.
    Dragging(GestureSession),
}

/// Drives one gesture session at a time from a pointer stream.
///
/// The controller never owns the committed quad; the caller passes it in at
/// pointer-down and stores whatever the controller hands back.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Dragging(session) => Some(session),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session().is_some()
    }

    /// Start a session for `target` if its gesture is enabled.
    ///
    /// Ignored while another session is active.
    pub fn pointer_down(
        &mut self,
        quad: &Quad,
        point: Point,
        target: HitPart,
        options: &TransformOptions,
    ) -> Option<GestureEvent> {
        if self.is_active() {
            return None;
        }
        let (kind, anchor) = match target {
            HitPart::Body if options.movable => (GestureKind::Move, None),
            HitPart::ScaleHandle(anchor) if options.scalable => (GestureKind::Scale, Some(anchor)),
            HitPart::RotateHandle if options.rotatable => (GestureKind::Rotate, None),
            _ => return None,
        };
        let start_diagonal = anchor.map(|a| quad.diagonal(a.corner()));
        self.state = GestureState::Dragging(GestureSession {
            kind,
            anchor,
            start_quad: *quad,
            start_pointer: point,
            start_orientation: quad.orientation(),
            start_diagonal,
            pivot: quad.center(),
            ratio_locked: options.ratio_locked,
        });
        Some(GestureEvent { kind, phase: GesturePhase::Start, quad: *quad })
    }

    /// Recompute the quad for a pointer at `point`.
    ///
    /// Returns `None` while idle and for a zero total delta.
    pub fn pointer_move(&mut self, point: Point) -> Option<GestureEvent> {
        let session = self.session()?;
        let quad = session.quad_at(point)?;
        Some(GestureEvent { kind: session.kind, phase: GesturePhase::Update, quad })
    }

    /// End the session. `committed` is the quad the caller last stored.
    pub fn pointer_up(&mut self, committed: &Quad) -> Option<GestureEvent> {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => None,
            GestureState::Dragging(session) => {
                Some(GestureEvent { kind: session.kind, phase: GesturePhase::End, quad: *committed })
            }
        }
    }

    /// Abandon the session, returning the quad it started from.
    pub fn cancel(&mut self) -> Option<Quad> {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => None,
            GestureState::Dragging(session) => Some(session.start_quad),
        }
    }
}
