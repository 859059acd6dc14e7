//! Rendering Adapter: the boundary between a simulation frame and a draw call.
//!
//! # Invariants
//! - A renderer only reads a [`FrameSubmission`]; it never touches simulation state.
//! - Nothing is uploaded unless every index addresses a submitted vertex.
//!
//! The GPU pipeline itself lives outside this workspace. [`BufferUploadRenderer`]
//! produces the exact byte buffers such a pipeline would receive.

mod renderer;
mod upload;

pub use renderer::{DebugTextRenderer, Renderer, mesh_bounds};
pub use spire_kernel::FrameSubmission;
pub use upload::{BufferUploadRenderer, DrawCall, RenderError};
