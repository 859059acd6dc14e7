use std::f32::consts::TAU;

use glam::{Mat3, Vec2, Vec3};
use spire_common::{GeometryControl, SeedPoint, Vertex};

use crate::arena::ArenaWriter;

/// Move a seed's angle one proportional step toward `desired`.
///
/// With stiffness in `(0, 1]` the remaining error shrinks by a factor of
/// `1 - stiffness` and never changes sign.
pub fn integrate_angle(point: &mut SeedPoint, desired: Vec2) {
    let stiffness = point.stiffness.clamp(f32::EPSILON, 1.0);
    point.angle += (desired - point.angle) * stiffness;
}

/// Orientation for a (tilt, heading) pair: tilt about X, then turn about Y.
pub fn tower_frame(angle: Vec2) -> Mat3 {
    Mat3::from_rotation_y(angle.y) * Mat3::from_rotation_x(angle.x)
}

/// Expand one seed point into its tower.
///
/// Returns whether the tower's triangles were published. A tower that cannot
/// reserve its vertex range writes nothing; one that gets vertices but no
/// index range leaves those vertices unreferenced.
pub(crate) fn expand_tower(
    control: &GeometryControl,
    point: &mut SeedPoint,
    vertices: &ArenaWriter<'_, Vertex>,
    indices: &ArenaWriter<'_, u16>,
) -> bool {
    integrate_angle(point, control.desired_angle);

    let Some(mut ring_slots) = vertices.reserve(control.vertices_per_tower()) else {
        return false;
    };
    write_rings(control, point, &mut ring_slots);

    let Some(mut index_slots) = indices.reserve(control.indices_per_tower()) else {
        return false;
    };
    write_side_walls(
        control.side_count as usize,
        control.level_count as usize,
        ring_slots.start(),
        &mut index_slots,
    );
    true
}

fn write_rings(control: &GeometryControl, point: &SeedPoint, out: &mut [Vertex]) {
    let sides = control.side_count as usize;
    let levels = control.level_count as f32;
    let mut center = point.position;
    let mut dist = control.dist;

    for (level, ring) in out.chunks_exact_mut(sides).enumerate() {
        let level = level as f32;
        let frame = tower_frame(point.angle + control.delta_angle * level);
        let radius = (control.radius + control.delta_radius * level).max(0.0);
        let v = level / levels;

        for (side, vertex) in ring.iter_mut().enumerate() {
            let u = side as f32 / sides as f32;
            let (sin, cos) = (TAU * u).sin_cos();
            let normal = frame * Vec3::new(cos, 0.0, sin);
            *vertex = Vertex::new(center + normal * radius, normal, Vec2::new(u, v));
        }

        center += frame.y_axis * dist;
        dist += control.delta_dist;
    }
}

/// Two triangles per side face between consecutive rings; no end caps.
fn write_side_walls(sides: usize, levels: usize, base_vertex: usize, out: &mut [u16]) {
    let faces = (0..levels).flat_map(|level| (0..sides).map(move |side| (level, side)));

    for (quad, (level, side)) in out.chunks_exact_mut(6).zip(faces) {
        let next = (side + 1) % sides;
        let a0 = base_vertex + level * sides + side;
        let a1 = base_vertex + level * sides + next;
        let b0 = a0 + sides;
        let b1 = a1 + sides;
        // Vertex capacity is capped at 2^16, so every offset fits.
        quad.copy_from_slice(&[a0, b0, a1, a1, b0, b1].map(|i| i as u16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::OutputArena;

    const EPS: f32 = 1e-4;

    fn cylinder_control() -> GeometryControl {
        GeometryControl {
            side_count: 8,
            level_count: 8,
            point_count: 1,
            delta_angle: Vec2::ZERO,
            desired_angle: Vec2::ZERO,
            radius: 8.0,
            delta_radius: 0.0,
            dist: 3.0,
            delta_dist: 0.0,
        }
    }

    fn build(control: &GeometryControl, point: &mut SeedPoint) -> (Vec<Vertex>, Vec<u16>) {
        let mut verts = OutputArena::with_capacity(control.vertices_per_tower());
        let mut idx = OutputArena::with_capacity(control.indices_per_tower());
        let vw = verts.writer();
        let iw = idx.writer();
        assert!(expand_tower(control, point, &vw, &iw));
        vw.commit();
        iw.commit();
        (verts.as_slice().to_vec(), idx.as_slice().to_vec())
    }

    #[test]
    fn angle_converges_without_overshoot() {
        let desired = Vec2::new(1.29, -3.0);
        for stiffness in [0.02_f32, 0.3, 0.77, 1.0] {
            let mut p = SeedPoint::new(Vec3::ZERO, stiffness);
            let mut prev_err = desired - p.angle;
            for _ in 0..200 {
                integrate_angle(&mut p, desired);
                let err = desired - p.angle;
                for axis in 0..2 {
                    assert!(err[axis].abs() <= prev_err[axis].abs() + 1e-6);
                    // Never crosses the target
                    assert!(err[axis] * prev_err[axis] >= -1e-6);
                }
                prev_err = err;
            }
        }
    }

    #[test]
    fn full_stiffness_snaps_to_target() {
        let mut p = SeedPoint::new(Vec3::ZERO, 1.0);
        integrate_angle(&mut p, Vec2::new(0.5, -0.25));
        assert!(p.angle.abs_diff_eq(Vec2::new(0.5, -0.25), 1e-6));
    }

    #[test]
    fn angle_at_target_stays_put() {
        let mut p = SeedPoint::new(Vec3::ZERO, 0.4);
        p.angle = Vec2::new(0.7, 0.1);
        integrate_angle(&mut p, Vec2::new(0.7, 0.1));
        assert_eq!(p.angle, Vec2::new(0.7, 0.1));
    }

    #[test]
    fn upright_frame_is_identity() {
        assert!(tower_frame(Vec2::ZERO).abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn cylinder_rings_are_equidistant_from_axis() {
        let control = cylinder_control();
        let base = Vec3::new(0.0, -8.0, 0.0);
        let mut p = SeedPoint::new(base, 1.0);
        let (verts, idx) = build(&control, &mut p);

        assert_eq!(verts.len(), 72);
        assert_eq!(idx.len(), 8 * 8 * 6);

        for (level, ring) in verts.chunks(8).enumerate() {
            let height = base.y + 3.0 * level as f32;
            for v in ring {
                let pos = v.position();
                let radial = Vec2::new(pos.x - base.x, pos.z - base.z);
                assert!((radial.length() - 8.0).abs() < EPS, "level {level}: {pos:?}");
                assert!((pos.y - height).abs() < EPS);
                assert!((v.normal().length() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn radius_and_spacing_change_per_level() {
        let control = GeometryControl {
            delta_radius: -0.5,
            delta_dist: 1.0,
            ..cylinder_control()
        };
        let mut p = SeedPoint::new(Vec3::ZERO, 1.0);
        let (verts, _) = build(&control, &mut p);

        let ring_y: Vec<f32> = verts.chunks(8).map(|r| r[0].position[1]).collect();
        // Segment lengths 3, 4, 5, ...
        assert!((ring_y[1] - 3.0).abs() < EPS);
        assert!((ring_y[2] - 7.0).abs() < EPS);
        assert!((ring_y[3] - 12.0).abs() < EPS);

        let top = verts[8 * 8].position();
        assert!((Vec2::new(top.x, top.z).length() - 4.0).abs() < EPS);
    }

    #[test]
    fn radius_never_goes_negative() {
        let control = GeometryControl {
            radius: 1.0,
            delta_radius: -1.0,
            ..cylinder_control()
        };
        let mut p = SeedPoint::new(Vec3::ZERO, 1.0);
        let (verts, _) = build(&control, &mut p);
        for v in &verts[8 * 2..] {
            assert!(Vec2::new(v.position[0], v.position[2]).length() < EPS);
        }
    }

    #[test]
    fn tilted_tower_leans_along_its_frame() {
        let control = GeometryControl {
            desired_angle: Vec2::new(std::f32::consts::FRAC_PI_2, 0.0),
            ..cylinder_control()
        };
        let mut p = SeedPoint::new(Vec3::ZERO, 1.0);
        let (verts, _) = build(&control, &mut p);

        // A quarter turn of tilt about X lays the spine along +Z
        let ring1_center: Vec3 = verts[8..16].iter().map(Vertex::position).sum::<Vec3>() / 8.0;
        assert!(ring1_center.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPS), "{ring1_center:?}");
    }

    #[test]
    fn indices_stay_inside_the_tower() {
        let control = cylinder_control();
        let mut p = SeedPoint::new(Vec3::ZERO, 1.0);
        let (verts, idx) = build(&control, &mut p);
        assert!(idx.iter().all(|&i| (i as usize) < verts.len()));

        // Every vertex is used and every triangle spans two adjacent rings
        let mut used = vec![false; verts.len()];
        for tri in idx.chunks(3) {
            let rings: Vec<usize> = tri.iter().map(|&i| i as usize / 8).collect();
            let lo = *rings.iter().min().unwrap();
            let hi = *rings.iter().max().unwrap();
            assert_eq!(hi - lo, 1);
            for &i in tri {
                used[i as usize] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn side_walls_offset_by_base_vertex() {
        let mut out = vec![0u16; 18];
        write_side_walls(3, 1, 100, &mut out);
        assert_eq!(&out[..6], &[100, 103, 101, 101, 103, 104]);
        // Last face wraps around the ring
        assert_eq!(&out[12..], &[102, 105, 100, 100, 105, 103]);
    }
}
