use glam::Vec3;

/// Light that circles the scene at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RovingLight {
    angle: f32,
    step: f32,
    orbit_radius: f32,
    height: f32,
}

impl Default for RovingLight {
    fn default() -> Self {
        Self {
            angle: 0.0,
            step: 0.002,
            orbit_radius: 70.0,
            height: 10.0,
        }
    }
}

impl RovingLight {
    pub fn new(step: f32, orbit_radius: f32, height: f32) -> Self {
        Self {
            angle: 0.0,
            step,
            orbit_radius,
            height,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self) {
        self.angle += self.step;
    }

    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(sin * self.orbit_radius, self.height, cos * self.orbit_radius)
    }

    /// Unit vector toward the light, as the shader expects it.
    pub fn direction(&self) -> Vec3 {
        self.position().normalize_or(Vec3::Y)
    }
}
