//! Geometry engine: expands seed points into tower meshes in parallel.
//!
//! # Invariants
//! - Each tower reserves its output ranges with a bounded atomic add; no two
//!   towers ever write overlapping slots and no write lands past capacity.
//! - Every published index is smaller than the published vertex count.
//! - A tick that does not finish publishes nothing (both counts stay zero).
//! - Each seed point's angle is only touched by the worker expanding it.

mod arena;
mod engine;
mod error;
mod tower;

pub use arena::{ArenaWriter, OutputArena, Reservation};
pub use engine::{EngineConfig, GeometryEngine, MAX_INDICES, MAX_VERTICES, MeshStats, MeshView};
pub use error::GeometryError;
pub use tower::{integrate_angle, tower_frame};
