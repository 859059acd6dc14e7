//! Input boundary: raw pointer/gesture events and the delta-slider controls
//! that nudge simulation parameters.
//!
//! # Invariants
//! - Controls never alias the values they edit; they go through an explicit
//!   [`ValueBinding`] over the owning parameter struct.
//! - Every value a control writes is clamped to the control's range.

pub mod delta;
pub mod event;

pub use delta::{DeltaControl, ValueBinding};
pub use event::InputEvent;
