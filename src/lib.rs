//! Quad-overlay transform engine.
//!
//! Places a bitmap onto an arbitrary quadrilateral and lets the user drag,
//! scale and rotate it through handles. The crate owns the geometry, the
//! gesture state machine and the affine decomposition that maps the bitmap
//! onto the quad; the host only forwards pointer events and paints the
//! resulting [`layer::Placement`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`layer`] | [`layer::TransformLayer`] orchestrator and the [`layer::Action`]s it returns |
//! | [`gesture`] | Pointer events, session snapshots and the gesture state machine |
//! | [`quad`] | Corner/anchor vocabulary and quad rotate/translate/scale |
//! | [`affine`] | Bounding box, affine decomposition and aspect fit |
//! | [`hit`] | Handle layout and hit-testing |
//! | [`point`] | Planar point and size primitives |
//! | [`projection`] | Geographic ↔ planar projection contract |
//! | [`replay`] | Scripted pointer replay behind the CLI |
//! | [`config`] | Layer options |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (handle sizes, tolerances, tile size) |

pub mod affine;
pub mod config;
pub mod consts;
pub mod error;
pub mod gesture;
pub mod hit;
pub mod layer;
pub mod point;
pub mod projection;
pub mod quad;
pub mod replay;
