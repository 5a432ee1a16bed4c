//! GL rendering for the quad field.
//!
//! Renderer variants own their GPU resources (program, buffers, VAO) and are
//! selected once at init by feature level.
//!
//! Convention:
//! - Quad geometry is a unit triangle strip in clip space; the vertex shader
//!   applies the aspect scale and the per-instance offset.
//! - Offsets arrive from `skitter_sim` in clip-space units each frame.

mod common;
mod es2;
mod es3;

pub use es2::Es2Renderer;
pub use es3::Es3Renderer;

use skitter_sim::Field;

/// Renderer contract implemented by both feature levels.
pub trait QuadRenderer {
    /// Uploads the current offsets and draws every instance. The frame has
    /// already been cleared by the backend.
    fn draw(&mut self, gl: &glow::Context, field: &Field);

    /// Releases GPU resources. The backend calls this on teardown while the
    /// context is still current.
    fn destroy(&mut self, gl: &glow::Context);
}
