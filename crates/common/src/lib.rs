//! Shared data model for the tower engine.
//!
//! # Invariants
//! - `GeometryControl::point_count` always equals the length of the seed array it describes.
//! - `Vertex` and `SceneUniforms` are `#[repr(C)]` and `Pod` so a renderer can upload them verbatim.

mod types;

pub use types::{GeometryControl, SceneUniforms, SeedPoint, Vertex};
