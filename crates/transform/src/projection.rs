use glam::{Mat4, Vec3, Vec4};

use crate::affine::radians;

/// Perspective projection from the view-plane extents at the near plane.
pub fn perspective(width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    let z_near = 2.0 * near;
    let z_far = far / (far - near);

    Mat4::from_cols(
        Vec4::new(z_near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, z_near / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z_far, 1.0),
        Vec4::new(0.0, 0.0, -near * z_far, 0.0),
    )
}

/// Perspective projection from a vertical field of view in degrees.
pub fn perspective_fov(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let y_scale = 1.0 / radians(0.5 * fov_y_degrees).tan();
    let x_scale = y_scale / aspect;
    let z_scale = far / (far - near);

    Mat4::from_cols(
        Vec4::new(x_scale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z_scale, 1.0),
        Vec4::new(0.0, 0.0, -near * z_scale, 0.0),
    )
}

pub fn perspective_fov_size(fov_y_degrees: f32, width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    perspective_fov(fov_y_degrees, width / height, near, far)
}

/// View matrix looking from `eye` toward `center`.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (center - eye).normalize();
    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Mat4::from_cols(
        Vec4::new(x_axis.x, y_axis.x, z_axis.x, 0.0),
        Vec4::new(x_axis.y, y_axis.y, z_axis.y, 0.0),
        Vec4::new(x_axis.z, y_axis.z, z_axis.z, 0.0),
        Vec4::new(-x_axis.dot(eye), -y_axis.dot(eye), -z_axis.dot(eye), 1.0),
    )
}

/// [`look_at`] over plain `[x, y, z]` arrays.
pub fn look_at_arrays(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> Mat4 {
    look_at(Vec3::from_array(eye), Vec3::from_array(center), Vec3::from_array(up))
}

/// Orthographic projection centered on the view axis; only the extents of
/// the box matter, not where it sits.
pub fn ortho2d(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let s_length = 1.0 / (right - left);
    let s_height = 1.0 / (top - bottom);
    let s_depth = 1.0 / (far - near);

    Mat4::from_cols(
        Vec4::new(2.0 * s_length, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * s_height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, s_depth, 0.0),
        Vec4::new(0.0, 0.0, -near * s_depth, 1.0),
    )
}

/// Off-center orthographic projection: the box center maps to the NDC origin.
pub fn ortho2d_oc(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let s_length = 1.0 / (right - left);
    let s_height = 1.0 / (top - bottom);
    let s_depth = 1.0 / (far - near);

    Mat4::from_cols(
        Vec4::new(2.0 * s_length, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * s_height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, s_depth, 0.0),
        Vec4::new(
            -s_length * (left + right),
            -s_height * (top + bottom),
            -s_depth * near,
            1.0,
        ),
    )
}

/// Perspective projection from independent horizontal and vertical fields of view.
pub fn frustum_fov(fov_h_degrees: f32, fov_v_degrees: f32, near: f32, far: f32) -> Mat4 {
    let width = 1.0 / radians(0.5 * fov_h_degrees).tan();
    let height = 1.0 / radians(0.5 * fov_v_degrees).tan();
    let s_depth = far / (far - near);

    Mat4::from_cols(
        Vec4::new(width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, s_depth, 1.0),
        Vec4::new(0.0, 0.0, -s_depth * near, 0.0),
    )
}

/// Symmetric perspective frustum sized by its near-plane extents. The window
/// is treated as centered on the view axis; use [`frustum_oc`] for a skewed one.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    perspective(right - left, top - bottom, near, far)
}

/// Off-center perspective frustum.
pub fn frustum_oc(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let s_width = 1.0 / (right - left);
    let s_height = 1.0 / (top - bottom);
    let s_depth = far / (far - near);
    let d_near = 2.0 * near;

    Mat4::from_cols(
        Vec4::new(d_near * s_width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, d_near * s_height, 0.0, 0.0),
        Vec4::new(
            -s_width * (right + left),
            -s_height * (top + bottom),
            s_depth,
            1.0,
        ),
        Vec4::new(0.0, 0.0, -s_depth * near, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        m.project_point3(p)
    }

    #[test]
    fn perspective_fov_matches_glam_lh() {
        let m = perspective_fov(65.0, 16.0 / 9.0, 0.1, 3000.0);
        let expected = Mat4::perspective_lh(radians(65.0), 16.0 / 9.0, 0.1, 3000.0);
        assert!(m.abs_diff_eq(expected, EPS));
        assert!(perspective_fov_size(65.0, 1600.0, 900.0, 0.1, 3000.0).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn perspective_maps_depth_range() {
        let m = perspective(2.0, 2.0, 1.0, 100.0);
        assert!((ndc(m, Vec3::new(0.0, 0.0, 1.0)).z - 0.0).abs() < EPS);
        assert!((ndc(m, Vec3::new(0.0, 0.0, 100.0)).z - 1.0).abs() < EPS);
        // Near-plane corner hits the NDC corner
        let corner = ndc(m, Vec3::new(1.0, 1.0, 1.0));
        assert!((corner.x - 1.0).abs() < EPS && (corner.y - 1.0).abs() < EPS);
    }

    #[test]
    fn look_at_matches_glam_lh() {
        let eye = Vec3::new(3.0, 4.0, -5.0);
        let center = Vec3::new(0.5, 0.0, 1.0);
        let m = look_at(eye, center, Vec3::Y);
        let expected = Mat4::look_at_lh(eye, center, Vec3::Y);
        assert!(m.abs_diff_eq(expected, EPS));
        // Eye lands at the origin, target on +Z
        assert!(m.transform_point3(eye).abs_diff_eq(Vec3::ZERO, EPS));
        let t = m.transform_point3(center);
        assert!(t.x.abs() < EPS && t.y.abs() < EPS && t.z > 0.0);
    }

    #[test]
    fn look_at_arrays_reads_all_eye_components() {
        let a = look_at_arrays([1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(a, b);
    }

    #[test]
    fn ortho_oc_matches_glam_lh() {
        let m = ortho2d_oc(-3.0, 5.0, -1.0, 7.0, 0.5, 50.0);
        let expected = Mat4::orthographic_lh(-3.0, 5.0, -1.0, 7.0, 0.5, 50.0);
        assert!(m.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn ortho_centered_equals_oc_for_symmetric_box() {
        let a = ortho2d(-4.0, 4.0, -2.0, 2.0, 0.0, 10.0);
        let b = ortho2d_oc(-4.0, 4.0, -2.0, 2.0, 0.0, 10.0);
        assert!(a.abs_diff_eq(b, EPS));
        // Asymmetric box: centered variant ignores the offset
        let c = ortho2d(0.0, 8.0, 0.0, 4.0, 0.0, 10.0);
        assert!(c.abs_diff_eq(a, EPS));
        assert!(!ortho2d_oc(0.0, 8.0, 0.0, 4.0, 0.0, 10.0).abs_diff_eq(a, EPS));
    }

    #[test]
    fn ortho_oc_maps_box_to_ndc() {
        let m = ortho2d_oc(0.0, 8.0, 0.0, 4.0, 1.0, 11.0);
        assert!(ndc(m, Vec3::new(0.0, 0.0, 1.0)).abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), EPS));
        assert!(ndc(m, Vec3::new(8.0, 4.0, 11.0)).abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), EPS));
    }

    #[test]
    fn frustum_variants_agree_when_centered() {
        let a = frustum(-2.0, 2.0, -1.0, 1.0, 0.5, 100.0);
        let b = frustum_oc(-2.0, 2.0, -1.0, 1.0, 0.5, 100.0);
        let c = perspective(4.0, 2.0, 0.5, 100.0);
        assert!(a.abs_diff_eq(b, EPS));
        assert!(a.abs_diff_eq(c, EPS));
    }

    #[test]
    fn frustum_oc_maps_window_corners() {
        let m = frustum_oc(0.0, 2.0, -1.0, 3.0, 1.0, 10.0);
        let lo = ndc(m, Vec3::new(0.0, -1.0, 1.0));
        let hi = ndc(m, Vec3::new(2.0, 3.0, 1.0));
        assert!(lo.abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), EPS), "{lo:?}");
        assert!(hi.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), EPS), "{hi:?}");
    }

    #[test]
    fn frustum_fov_square_matches_perspective_fov() {
        let a = frustum_fov(90.0, 90.0, 0.1, 10.0);
        let b = perspective_fov(90.0, 1.0, 0.1, 10.0);
        assert!(a.abs_diff_eq(b, EPS));
    }
}
