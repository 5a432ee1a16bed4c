//! Shader/program compilation.
//!
//! GLSL source goes in, a linked program comes out. Failures carry the
//! driver's info log so the host sees the actual compiler diagnostic, not
//! just "it failed".

use std::fmt;

use glow::HasContext;

/// Pipeline stage a shader source targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// A shader build failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// The driver refused to create a shader or program object.
    Create(String),
    /// A stage failed to compile; carries the driver's compile log.
    Compile { stage: ShaderStage, log: String },
    /// The program failed to link; carries the driver's link log.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create(reason) => write!(f, "could not create GL object: {reason}"),
            Self::Compile { stage, log } => {
                write!(f, "could not compile {stage} shader:\n{log}")
            }
            Self::Link { log } => write!(f, "could not link program:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compiles one stage. The shader object is deleted on failure.
fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    src: &str,
) -> Result<glow::Shader, ShaderError> {
    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
        gl.shader_source(shader, src);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }
}

/// Compiles and links a vertex + fragment pair into a program.
///
/// On success the stage objects are detached and deleted; the program keeps
/// the linked binaries. On any failure every intermediate object created so
/// far is deleted before the error is returned.
pub fn link_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::Program, ShaderError> {
    let vert = compile_stage(gl, ShaderStage::Vertex, vert_src)?;
    let frag = match compile_stage(gl, ShaderStage::Fragment, frag_src) {
        Ok(shader) => shader,
        Err(err) => {
            unsafe { gl.delete_shader(vert) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(reason) => {
                gl.delete_shader(vert);
                gl.delete_shader(frag);
                return Err(ShaderError::Create(reason));
            }
        };

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(program)
        };

        // The program owns the linked binaries; the stage objects are done
        // either way.
        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !linked {
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Driver-dependent paths need a live context; the error surface is
    // checked here.

    #[test]
    fn compile_error_display_carries_the_driver_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: 'vec5' : undeclared identifier".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("vec5"));
    }

    #[test]
    fn link_error_display_carries_the_driver_log() {
        let err = ShaderError::Link {
            log: "varying v_color not written by vertex shader".to_string(),
        };
        assert!(err.to_string().contains("v_color"));
    }
}
