use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Per-tower input state. The geometry engine reads the position and
/// rewrites `angle` every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedPoint {
    /// Base of the tower in world space.
    pub position: Vec3,
    /// Current tilt (x) and heading (y) of the tower, in radians.
    pub angle: Vec2,
    /// How quickly `angle` follows the desired angle, in `(0, 1]`.
    pub stiffness: f32,
}

impl SeedPoint {
    pub fn new(position: Vec3, stiffness: f32) -> Self {
        Self {
            position,
            angle: Vec2::ZERO,
            stiffness,
        }
    }
}

impl Default for SeedPoint {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}

/// Global parameters shared read-only by every tower in a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryControl {
    /// Number of vertices around each ring.
    pub side_count: u32,
    /// Number of segments stacked on the base ring.
    pub level_count: u32,
    /// Number of seed points the pass expands.
    pub point_count: u32,
    /// Rotation added at each level (tilt, heading).
    pub delta_angle: Vec2,
    /// Angle every tower is steering toward.
    pub desired_angle: Vec2,
    /// Radius of the base ring.
    pub radius: f32,
    /// Change in radius from one level to the next.
    pub delta_radius: f32,
    /// Spine length of the first segment.
    pub dist: f32,
    /// Change in segment length from one level to the next.
    pub delta_dist: f32,
}

impl GeometryControl {
    /// Rings emitted per tower (base ring plus one per level).
    pub fn rings_per_tower(&self) -> usize {
        (self.level_count as usize).saturating_add(1)
    }

    /// Saturates at `usize::MAX`, which no buffer can hold.
    pub fn vertices_per_tower(&self) -> usize {
        (self.side_count as usize).saturating_mul(self.rings_per_tower())
    }

    /// Two triangles per side face, one band of faces per level. Saturates
    /// like [`vertices_per_tower`](Self::vertices_per_tower).
    pub fn indices_per_tower(&self) -> usize {
        (self.side_count as usize)
            .saturating_mul(self.level_count as usize)
            .saturating_mul(6)
    }
}

impl Default for GeometryControl {
    fn default() -> Self {
        Self {
            side_count: 8,
            level_count: 8,
            point_count: 0,
            delta_angle: Vec2::ZERO,
            desired_angle: Vec2::ZERO,
            radius: 8.0,
            delta_radius: 0.0,
            dist: 3.0,
            delta_dist: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Per-frame constants handed to the renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub mvp: [[f32; 4]; 4],
    pub light: [f32; 3],
    _pad: f32,
}

impl SceneUniforms {
    pub fn new(mvp: Mat4, light: Vec3) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            light: light.to_array(),
            _pad: 0.0,
        }
    }
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Vec3::Y)
    }
}
