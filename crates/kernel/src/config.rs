use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use spire_camera::RigConfig;
use spire_common::GeometryControl;
use spire_geometry::{EngineConfig, MAX_VERTICES};

use crate::error::SimulationError;

/// Range of the desired tower direction, in radians per axis.
pub const DIRECTION_RANGE: (f32, f32) = (-3.0, 3.0);
/// Range of the per-level length and thickness deltas.
pub const SHAPE_RANGE: (f32, f32) = (-0.3, 0.3);
/// Range of the per-level curl angles, in radians.
pub const CURL_RANGE: (f32, f32) = (0.0, 1.0);

/// The externally adjustable scalars that shape every tower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlParams {
    /// Desired (tilt, heading) every tower steers toward.
    pub direction: Vec2,
    /// Segment length change per level.
    pub length: f32,
    /// Radius change per level.
    pub thickness: f32,
    /// Heading added per level.
    pub curl_twist: f32,
    /// Tilt added per level.
    pub curl_tilt: f32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            direction: Vec2::new(1.29, -3.0),
            length: 0.3,
            thickness: -0.3,
            curl_twist: 0.0,
            curl_tilt: 0.02,
        }
    }
}

impl ControlParams {
    /// Copy with every value forced into its documented range.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f32, (lo, hi): (f32, f32)| v.clamp(lo, hi);
        Self {
            direction: Vec2::new(
                clamp(self.direction.x, DIRECTION_RANGE),
                clamp(self.direction.y, DIRECTION_RANGE),
            ),
            length: clamp(self.length, SHAPE_RANGE),
            thickness: clamp(self.thickness, SHAPE_RANGE),
            curl_twist: clamp(self.curl_twist, CURL_RANGE),
            curl_tilt: clamp(self.curl_tilt, CURL_RANGE),
        }
    }

    /// Write the (clamped) parameters into the per-tick fields of `control`.
    pub fn apply_to(&self, control: &mut GeometryControl) {
        let p = self.clamped();
        control.desired_angle = p.direction;
        control.delta_radius = p.thickness;
        control.delta_dist = p.length;
        control.delta_angle = Vec2::new(p.curl_tilt, p.curl_twist);
    }
}

/// Everything needed to build a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub point_count: usize,
    pub side_count: u32,
    pub level_count: u32,
    pub radius: f32,
    pub dist: f32,
    /// Seeds are scattered over `[-extent, extent]` on X and Z.
    pub scatter_extent: f32,
    /// Y coordinate of every tower base.
    pub base_height: f32,
    pub stiffness_min: f32,
    pub stiffness_max: f32,
    /// Seed for the scatter stream.
    pub seed: u64,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Edge length of the square delta-control widgets, in pixels.
    pub widget_size: f32,
    pub params: ControlParams,
    pub engine: EngineConfig,
    pub camera: RigConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            point_count: 500,
            side_count: 8,
            level_count: 8,
            radius: 8.0,
            dist: 3.0,
            scatter_extent: 300.0,
            base_height: -8.0,
            stiffness_min: 0.02,
            stiffness_max: 1.0,
            seed: 42,
            viewport: Vec2::new(1024.0, 768.0),
            widget_size: 100.0,
            params: ControlParams::default(),
            engine: EngineConfig::default(),
            camera: RigConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.as_ref().display(), "loaded simulation config");
        Ok(config)
    }

    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        serde_json::to_writer_pretty(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Reject settings the rest of the kernel cannot work with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.stiffness_min > 0.0 && self.stiffness_min <= self.stiffness_max && self.stiffness_max <= 1.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "stiffness range [{}, {}] must lie inside (0, 1]",
                self.stiffness_min, self.stiffness_max
            )));
        }
        if self.scatter_extent < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "negative scatter extent {}",
                self.scatter_extent
            )));
        }
        if self.point_count > u32::MAX as usize {
            return Err(SimulationError::InvalidConfig(format!(
                "{} seed points exceeds the control block's range",
                self.point_count
            )));
        }
        let per_tower = self.geometry_control().vertices_per_tower();
        if per_tower > MAX_VERTICES {
            return Err(SimulationError::InvalidConfig(format!(
                "{} sides x {} levels needs {per_tower} vertices per tower, more than {MAX_VERTICES}",
                self.side_count, self.level_count
            )));
        }
        let camera = &self.camera;
        if !(camera.zoom_min > 0.0 && camera.zoom_min <= camera.zoom_max) {
            return Err(SimulationError::InvalidConfig(format!(
                "zoom range [{}, {}] must be positive and ordered",
                camera.zoom_min, camera.zoom_max
            )));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(SimulationError::InvalidConfig(format!(
                "clip planes near {} far {} must satisfy 0 < near < far",
                camera.near, camera.far
            )));
        }
        Ok(())
    }

    /// Control block for this config with the shape fields filled from `params`.
    pub fn geometry_control(&self) -> GeometryControl {
        let mut control = GeometryControl {
            side_count: self.side_count,
            level_count: self.level_count,
            point_count: self.point_count as u32,
            radius: self.radius,
            dist: self.dist,
            ..GeometryControl::default()
        };
        self.params.apply_to(&mut control);
        control
    }
}
