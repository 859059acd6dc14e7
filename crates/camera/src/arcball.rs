use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Cross products shorter than this are treated as "no rotation".
pub const DRAG_EPSILON: f32 = 1e-5;

/// Virtual-sphere rotation controller.
///
/// A drag maps both endpoints onto a unit hemisphere in front of the
/// viewport; the rotation carrying one onto the other is applied on top of
/// the orientation captured when the drag started.
#[derive(Debug, Clone)]
pub struct ArcBall {
    rotation: Mat3,
    base_rotation: Mat3,
    start_vector: Vec3,
    viewport: Vec2,
    adjust: Vec2,
}

impl ArcBall {
    pub fn new(width: f32, height: f32) -> Self {
        let mut ball = Self {
            rotation: Mat3::IDENTITY,
            base_rotation: Mat3::IDENTITY,
            start_vector: Vec3::Z,
            viewport: Vec2::ZERO,
            adjust: Vec2::ZERO,
        };
        ball.initialize(width, height);
        ball
    }

    /// Set the viewport size and reset the orientation.
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.set_viewport(width, height);
        self.reset();
    }

    /// Change the viewport size, keeping the current orientation.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        // Pixel centers run 0..=size-1; guard single-pixel viewports
        self.adjust = Vec2::new(
            1.0 / ((width - 1.0).max(1.0) * 0.5),
            1.0 / ((height - 1.0).max(1.0) * 0.5),
        );
    }

    pub fn reset(&mut self) {
        self.rotation = Mat3::IDENTITY;
        self.base_rotation = Mat3::IDENTITY;
        self.start_vector = Vec3::Z;
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Viewport-space point that projects to the front pole of the sphere.
    pub fn center(&self) -> Vec2 {
        (self.viewport - Vec2::ONE).max(Vec2::ZERO) * 0.5
    }

    /// Begin a drag. Any drag already in progress is committed as-is.
    pub fn drag_start(&mut self, point: Vec2) {
        self.start_vector = self.project_to_sphere(point);
        self.base_rotation = self.rotation;
    }

    pub fn drag_move(&mut self, point: Vec2) {
        let end_vector = self.project_to_sphere(point);
        self.rotation = match rotation_between(self.start_vector, end_vector) {
            Some(delta) => delta * self.base_rotation,
            None => self.base_rotation,
        };
    }

    /// Map a viewport point onto the unit hemisphere facing the viewer.
    ///
    /// Points outside the inscribed circle land on the sphere's rim (z = 0).
    pub fn project_to_sphere(&self, point: Vec2) -> Vec3 {
        let p = Vec2::new(
            point.x * self.adjust.x - 1.0,
            -(point.y * self.adjust.y - 1.0),
        );
        let length_sq = p.length_squared();
        if length_sq > 1.0 {
            (p / length_sq.sqrt()).extend(0.0)
        } else {
            p.extend((1.0 - length_sq).sqrt())
        }
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Current orientation embedded in a 4x4 transform.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_mat3(self.rotation)
    }
}

impl Default for ArcBall {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Rotation carrying the drag start vector toward the end vector, or `None`
/// when the two coincide (or are exactly opposite).
///
/// Uses the 4-vector `(start × end, start · end)`: for unit inputs this is a
/// unit quaternion whose rotation angle is twice the angle between them.
pub fn rotation_between(start: Vec3, end: Vec3) -> Option<Mat3> {
    let perp = start.cross(end);
    if perp.length() > DRAG_EPSILON {
        Some(quaternion_to_matrix(perp.extend(start.dot(end))))
    } else {
        None
    }
}

/// Rotation matrix for the quaternion `(x, y, z, w)`.
///
/// The input need not be normalized; the `2 / |q|²` factor takes care of it.
/// A zero vector yields the identity.
pub fn quaternion_to_matrix(q: Vec4) -> Mat3 {
    let n = q.length_squared();
    let s = if n > 0.0 { 2.0 / n } else { 0.0 };

    let xs = q.x * s;
    let ys = q.y * s;
    let zs = q.z * s;
    let wx = q.w * xs;
    let wy = q.w * ys;
    let wz = q.w * zs;
    let xx = q.x * xs;
    let xy = q.x * ys;
    let xz = q.x * zs;
    let yy = q.y * ys;
    let yz = q.y * zs;
    let zz = q.z * zs;

    Mat3::from_cols(
        Vec3::new(1.0 - (yy + zz), xy + wz, xz - wy),
        Vec3::new(xy - wz, 1.0 - (xx + zz), yz + wx),
        Vec3::new(xz + wy, yz - wx, 1.0 - (xx + yy)),
    )
}
