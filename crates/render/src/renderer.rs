use std::fmt::Write as _;

use glam::{Mat4, Vec3};
use spire_common::Vertex;
use spire_kernel::FrameSubmission;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer receives one frame's mesh slices and uniforms and produces
/// output. It never mutates the simulation that produced the frame.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameSubmission<'_>) -> Self::Output;
}

/// Axis-aligned bounds of a vertex slice, or `None` when it is empty.
pub fn mesh_bounds(vertices: &[Vertex]) -> Option<(Vec3, Vec3)> {
    let first = vertices.first()?.position();
    Some(vertices.iter().fold((first, first), |(lo, hi), v| {
        let p = v.position();
        (lo.min(p), hi.max(p))
    }))
}

/// Human-readable frame summary for CLI output, logging and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// How many leading vertices to list individually.
    pub listed_vertices: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { listed_vertices: 4 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameSubmission<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "=== Frame (vertices={}, indices={}, triangles={}) ===",
            frame.vertex_count(),
            frame.index_count(),
            frame.triangle_count()
        );

        let [lx, ly, lz] = frame.uniforms.light;
        let _ = writeln!(out, "Light: ({lx:.3}, {ly:.3}, {lz:.3})");

        let mvp = Mat4::from_cols_array_2d(&frame.uniforms.mvp);
        let origin = mvp.project_point3(Vec3::ZERO);
        let _ = writeln!(
            out,
            "Origin in NDC: ({:.3}, {:.3}, {:.3})",
            origin.x, origin.y, origin.z
        );

        match mesh_bounds(frame.vertices) {
            Some((lo, hi)) => {
                let _ = writeln!(
                    out,
                    "Bounds: ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
                    lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
                );
            }
            None => out.push_str("Bounds: empty\n"),
        }

        for (i, v) in frame.vertices.iter().take(self.listed_vertices).enumerate() {
            let p = v.position();
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.2}, {:.2}, {:.2}) uv=({:.3}, {:.3})",
                p.x, p.y, p.z, v.uv[0], v.uv[1]
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use spire_common::SceneUniforms;

    fn empty_frame() -> FrameSubmission<'static> {
        FrameSubmission {
            vertices: &[],
            indices: &[],
            uniforms: SceneUniforms::default(),
        }
    }

    #[test]
    fn debug_renderer_empty_frame() {
        let output = DebugTextRenderer::new().render(&empty_frame());
        assert!(output.contains("vertices=0"));
        assert!(output.contains("Bounds: empty"));
    }

    #[test]
    fn debug_renderer_lists_vertices() {
        let vertices = [
            Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec2::ZERO),
            Vertex::new(Vec3::new(-1.0, 0.0, 5.0), Vec3::Y, Vec2::new(0.5, 1.0)),
            Vertex::new(Vec3::ZERO, Vec3::Y, Vec2::ZERO),
        ];
        let frame = FrameSubmission {
            vertices: &vertices,
            indices: &[0, 1, 2],
            uniforms: SceneUniforms::default(),
        };
        let mut renderer = DebugTextRenderer { listed_vertices: 2 };
        let output = renderer.render(&frame);

        assert!(output.contains("triangles=1"));
        assert!(output.contains("[1] pos=(-1.00, 0.00, 5.00)"));
        assert!(!output.contains("[2]"));
        assert!(output.contains("Bounds: (-1.0, 0.0, 0.0) .. (1.0, 2.0, 5.0)"));
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let vertices: Vec<Vertex> = (0..10)
            .map(|i| Vertex::new(Vec3::new(i as f32, -(i as f32), 2.0), Vec3::Y, Vec2::ZERO))
            .collect();
        let (lo, hi) = mesh_bounds(&vertices).unwrap();
        assert_eq!(lo, Vec3::new(0.0, -9.0, 2.0));
        assert_eq!(hi, Vec3::new(9.0, 0.0, 2.0));
        assert!(mesh_bounds(&[]).is_none());
    }
}
