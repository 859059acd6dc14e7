//! Simulation kernel: owns the seed points, control parameters, geometry
//! engine and camera rig, and advances them one tick at a time.
//!
//! # Invariants
//! - The simulation is the only owner of its seed points; nothing else mutates them.
//! - Control parameters are clamped to their documented ranges before they reach the engine.
//! - Seed scattering is deterministic for a given config seed.

mod config;
mod error;
mod frame;
mod light;
mod scatter;
mod simulation;

pub use config::{CURL_RANGE, ControlParams, DIRECTION_RANGE, SHAPE_RANGE, SimulationConfig};
pub use error::SimulationError;
pub use frame::FrameSubmission;
pub use light::RovingLight;
pub use scatter::{SeedStream, scatter_seed_points};
pub use simulation::{ControlId, Simulation};
