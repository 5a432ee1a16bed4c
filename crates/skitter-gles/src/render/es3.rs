use anyhow::{Context as _, Result};
use glow::HasContext;

use skitter_sim::Field;

use super::QuadRenderer;
use super::common::{COLOR_ATTRIB, COLOR_BYTE_OFFSET, OFFSET_ATTRIB, POS_ATTRIB, QUAD, VERTEX_STRIDE};
use crate::shader::link_program;

/// Instanced renderer for ES 3.x class drivers.
///
/// A static VBO holds the quad strip; a dynamic VBO holds one vec2 offset per
/// instance with divisor 1, refreshed each frame. The whole field goes out in
/// a single instanced call.
pub struct Es3Renderer {
    program: glow::Program,
    scale_loc: glow::UniformLocation,
    vao: glow::VertexArray,
    quad_vbo: glow::Buffer,
    offset_vbo: glow::Buffer,
    offset_capacity: usize,
    // Staging copy of the per-instance offsets, reused across frames.
    scratch: Vec<[f32; 2]>,
}

impl Es3Renderer {
    /// Compiles the instanced program and builds the VAO. `instances` sizes
    /// the offset buffer up front; larger fields grow it on demand.
    pub fn new(gl: &glow::Context, instances: usize) -> Result<Self> {
        let program = link_program(
            gl,
            include_str!("shaders/quad.es3.vert"),
            include_str!("shaders/quad.es3.frag"),
        )?;

        unsafe {
            let scale_loc = gl
                .get_uniform_location(program, "u_scale")
                .context("u_scale uniform missing from linked program")?;

            let vao = gl.create_vertex_array().map_err(anyhow::Error::msg)?;
            gl.bind_vertex_array(Some(vao));

            let quad_vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(quad_vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(POS_ATTRIB);
            gl.vertex_attrib_pointer_f32(POS_ATTRIB, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.enable_vertex_attrib_array(COLOR_ATTRIB);
            gl.vertex_attrib_pointer_f32(
                COLOR_ATTRIB,
                3,
                glow::UNSIGNED_BYTE,
                true,
                VERTEX_STRIDE,
                COLOR_BYTE_OFFSET,
            );

            let offset_vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(offset_vbo));
            gl.buffer_data_size(
                glow::ARRAY_BUFFER,
                (instances * std::mem::size_of::<[f32; 2]>()) as i32,
                glow::DYNAMIC_DRAW,
            );
            gl.enable_vertex_attrib_array(OFFSET_ATTRIB);
            gl.vertex_attrib_pointer_f32(OFFSET_ATTRIB, 2, glow::FLOAT, false, 8, 0);
            gl.vertex_attrib_divisor(OFFSET_ATTRIB, 1);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                program,
                scale_loc,
                vao,
                quad_vbo,
                offset_vbo,
                offset_capacity: instances,
                scratch: Vec::with_capacity(instances),
            })
        }
    }
}

impl QuadRenderer for Es3Renderer {
    fn draw(&mut self, gl: &glow::Context, field: &Field) {
        if field.is_empty() {
            return;
        }

        self.scratch.clear();
        self.scratch.extend(field.offsets().iter().map(|o| [o.x, o.y]));

        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_2_f32(Some(&self.scale_loc), field.scale().x, field.scale().y);

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.offset_vbo));
            if self.scratch.len() > self.offset_capacity {
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&self.scratch),
                    glow::DYNAMIC_DRAW,
                );
                self.offset_capacity = self.scratch.len();
            } else {
                gl.buffer_sub_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    0,
                    bytemuck::cast_slice(&self.scratch),
                );
            }

            gl.draw_arrays_instanced(glow::TRIANGLE_STRIP, 0, 4, self.scratch.len() as i32);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.quad_vbo);
            gl.delete_buffer(self.offset_vbo);
        }
    }
}
