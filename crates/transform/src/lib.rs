//! Stateless matrix builders shared by the camera and the render boundary.
//!
//! # Conventions
//! - Column vectors, column-major storage (`glam::Mat4`), so `a * b` applies `b` first.
//! - Left-handed view space: the camera looks down +Z.
//! - Projections map depth into `[0, 1]`.
//!
//! Degenerate inputs (`near == far`, a zero axis, `up` parallel to the view
//! direction) produce non-finite matrices; callers must not pass them.

mod affine;
mod projection;

pub use affine::{radians, rotate, rotate_xyz, scale, scale_vec, sin_cos_degrees, translate, translate_vec};
pub use projection::{
    frustum, frustum_fov, frustum_oc, look_at, look_at_arrays, ortho2d, ortho2d_oc, perspective,
    perspective_fov, perspective_fov_size,
};
