use anyhow::{Context as _, Result};
use glow::HasContext;

use skitter_sim::Field;

use super::QuadRenderer;
use super::common::{COLOR_BYTE_OFFSET, QUAD, VERTEX_STRIDE};
use crate::shader::link_program;

/// Fallback renderer for ES 2.0 class drivers.
///
/// ES 2.0 has no core instancing, so the quad is drawn once per instance with
/// the offset supplied through a uniform. Attribute locations are queried
/// after linking; GLSL 100 has no layout qualifiers.
pub struct Es2Renderer {
    program: glow::Program,
    scale_loc: glow::UniformLocation,
    offset_loc: glow::UniformLocation,
    pos_attrib: u32,
    color_attrib: u32,
    quad_vbo: glow::Buffer,
}

impl Es2Renderer {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let program = link_program(
            gl,
            include_str!("shaders/quad.es2.vert"),
            include_str!("shaders/quad.es2.frag"),
        )?;

        unsafe {
            let scale_loc = gl
                .get_uniform_location(program, "u_scale")
                .context("u_scale uniform missing from linked program")?;
            let offset_loc = gl
                .get_uniform_location(program, "u_offset")
                .context("u_offset uniform missing from linked program")?;
            let pos_attrib = gl
                .get_attrib_location(program, "a_pos")
                .context("a_pos attribute missing from linked program")?;
            let color_attrib = gl
                .get_attrib_location(program, "a_color")
                .context("a_color attribute missing from linked program")?;

            let quad_vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(quad_vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                program,
                scale_loc,
                offset_loc,
                pos_attrib,
                color_attrib,
                quad_vbo,
            })
        }
    }
}

impl QuadRenderer for Es2Renderer {
    fn draw(&mut self, gl: &glow::Context, field: &Field) {
        if field.is_empty() {
            return;
        }

        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_2_f32(Some(&self.scale_loc), field.scale().x, field.scale().y);

            // No VAO on this path; pointers are rebound every frame.
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.quad_vbo));
            gl.enable_vertex_attrib_array(self.pos_attrib);
            gl.vertex_attrib_pointer_f32(self.pos_attrib, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.enable_vertex_attrib_array(self.color_attrib);
            gl.vertex_attrib_pointer_f32(
                self.color_attrib,
                3,
                glow::UNSIGNED_BYTE,
                true,
                VERTEX_STRIDE,
                COLOR_BYTE_OFFSET,
            );

            for offset in field.offsets() {
                gl.uniform_2_f32(Some(&self.offset_loc), offset.x, offset.y);
                gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
            }

            gl.disable_vertex_attrib_array(self.pos_attrib);
            gl.disable_vertex_attrib_array(self.color_attrib);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_buffer(self.quad_vbo);
        }
    }
}
