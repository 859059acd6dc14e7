use spire_common::{SceneUniforms, Vertex};

/// Everything a renderer needs for one indexed-triangle draw.
#[derive(Debug, Clone, Copy)]
pub struct FrameSubmission<'a> {
    pub vertices: &'a [Vertex],
    /// 16-bit triangle-list indices into `vertices`.
    pub indices: &'a [u16],
    pub uniforms: SceneUniforms,
}

impl FrameSubmission<'_> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there is at least one triangle to draw.
    pub fn is_drawable(&self) -> bool {
        self.indices.len() >= 3
    }
}
