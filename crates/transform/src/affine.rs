use glam::{Mat4, Vec3, Vec4};

/// Degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Sine and cosine of an angle in degrees.
///
/// Multiples of 90 degrees return exact values, so quarter-turn rotations
/// carry no rounding noise.
pub fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let quarters = degrees / 90.0;
    if quarters.fract() == 0.0 && quarters.abs() < i32::MAX as f32 {
        match (quarters as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        radians(degrees).sin_cos()
    }
}

pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_diagonal(Vec4::new(x, y, z, 1.0))
}

pub fn scale_vec(s: Vec3) -> Mat4 {
    scale(s.x, s.y, s.z)
}

pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    translate_vec(Vec3::new(x, y, z))
}

pub fn translate_vec(t: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.w_axis = t.extend(1.0);
    m
}

/// Rotation of `angle_degrees` about `axis` (Rodrigues' formula).
///
/// The axis is normalized first; a zero axis is a caller error.
pub fn rotate(angle_degrees: f32, axis: Vec3) -> Mat4 {
    let (s, c) = sin_cos_degrees(angle_degrees);
    let k = 1.0 - c;

    let u = axis.normalize();
    let v = s * u;
    let w = k * u;

    Mat4::from_cols(
        Vec4::new(w.x * u.x + c, w.x * u.y + v.z, w.x * u.z - v.y, 0.0),
        Vec4::new(w.x * u.y - v.z, w.y * u.y + c, w.y * u.z + v.x, 0.0),
        Vec4::new(w.x * u.z + v.y, w.y * u.z - v.x, w.z * u.z + c, 0.0),
        Vec4::W,
    )
}

pub fn rotate_xyz(angle_degrees: f32, x: f32, y: f32, z: f32) -> Mat4 {
    rotate(angle_degrees, Vec3::new(x, y, z))
}
