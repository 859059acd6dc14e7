use spire_kernel::FrameSubmission;

use crate::renderer::Renderer;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("index {index} at position {position} addresses past {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },
    #[error("index count {0} is not a whole number of triangles")]
    PartialTriangle(usize),
}

/// What a GPU backend would be asked to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub vertex_count: usize,
    pub index_count: usize,
    /// Set when the frame had nothing to draw and no call should be issued.
    pub skipped: bool,
}

/// Copies each frame into byte buffers laid out exactly as a GPU upload.
///
/// Buffers are reused across frames; a rejected frame leaves the previous
/// upload in place.
#[derive(Debug, Default)]
pub struct BufferUploadRenderer {
    vertex_bytes: Vec<u8>,
    index_bytes: Vec<u8>,
    uniform_bytes: Vec<u8>,
    frames_drawn: u64,
}

impl BufferUploadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        &self.vertex_bytes
    }

    pub fn index_bytes(&self) -> &[u8] {
        &self.index_bytes
    }

    pub fn uniform_bytes(&self) -> &[u8] {
        &self.uniform_bytes
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

fn validate(frame: &FrameSubmission<'_>) -> Result<(), RenderError> {
    if frame.indices.len() % 3 != 0 {
        return Err(RenderError::PartialTriangle(frame.indices.len()));
    }
    let vertex_count = frame.vertices.len();
    match frame
        .indices
        .iter()
        .position(|&i| i as usize >= vertex_count)
    {
        Some(position) => Err(RenderError::IndexOutOfRange {
            position,
            index: frame.indices[position],
            vertex_count,
        }),
        None => Ok(()),
    }
}

impl Renderer for BufferUploadRenderer {
    type Output = Result<DrawCall, RenderError>;

    fn render(&mut self, frame: &FrameSubmission<'_>) -> Self::Output {
        validate(frame)?;

        self.vertex_bytes.clear();
        self.vertex_bytes
            .extend_from_slice(bytemuck::cast_slice(frame.vertices));
        self.index_bytes.clear();
        self.index_bytes
            .extend_from_slice(bytemuck::cast_slice(frame.indices));
        self.uniform_bytes.clear();
        self.uniform_bytes
            .extend_from_slice(bytemuck::bytes_of(&frame.uniforms));

        let skipped = !frame.is_drawable();
        if !skipped {
            self.frames_drawn += 1;
        }
        tracing::trace!(
            vertex_bytes = self.vertex_bytes.len(),
            index_bytes = self.index_bytes.len(),
            skipped,
            "frame uploaded"
        );

        Ok(DrawCall {
            vertex_count: frame.vertex_count(),
            index_count: frame.index_count(),
            skipped,
        })
    }
}
