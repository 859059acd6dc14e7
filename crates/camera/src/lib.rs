//! Orbit camera: arcball rotation plus translation/zoom.
//!
//! # Invariants
//! - The arcball rotation is always rebuilt from the orientation committed at
//!   drag start and the two drag endpoints; it is never integrated frame over frame.
//! - Zoom distance stays within the configured bounds.
//! - Neither type is `Sync`-shared; both are driven from the input context only.

mod arcball;
mod rig;

pub use arcball::{ArcBall, DRAG_EPSILON, quaternion_to_matrix, rotation_between};
pub use rig::{OrbitRig, RigConfig};
