//! Host-facing boundary: init / resize / render.

use anyhow::{Context as _, Result};
use glow::HasContext;

use skitter_sim::{Field, FieldParams};

use crate::level::FeatureLevel;
use crate::render::{Es2Renderer, Es3Renderer, QuadRenderer};

/// Frame clear color (dark slate).
const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.3, 1.0];

/// The backend a host owns: GL context, simulation field, and the
/// feature-level renderer.
///
/// The host creates exactly one `Backend` per surface (re-init is drop and
/// recreate) and drives it from the thread the context is current on:
/// `new` → `resize` on every surface change → `render` once per frame.
pub struct Backend {
    gl: glow::Context,
    level: FeatureLevel,
    renderer: Box<dyn QuadRenderer>,
    field: Field,
}

impl Backend {
    /// Builds a backend with the default field parameters.
    pub fn new(gl: glow::Context) -> Result<Self> {
        Self::with_params(gl, FieldParams::default())
    }

    /// Builds a backend on a context the host has made current.
    ///
    /// Logs the driver identification, detects the feature level, and
    /// compiles the matching program. Drivers below the ES 2.0 floor are
    /// rejected; the host's recourse is a fresh context and another call.
    pub fn with_params(gl: glow::Context, params: FieldParams) -> Result<Self> {
        log_driver_identification(&gl);

        let version = gl.version();
        let level = FeatureLevel::detect(version.is_embedded, version.major, version.minor)
            .with_context(|| {
                format!(
                    "unsupported GL version {}.{} (embedded: {})",
                    version.major, version.minor, version.is_embedded
                )
            })?;
        log::debug!("selected {level} render path");

        let renderer: Box<dyn QuadRenderer> = match level {
            FeatureLevel::Es3 => Box::new(
                Es3Renderer::new(&gl, params.instances)
                    .context("failed to build instanced renderer")?,
            ),
            FeatureLevel::Es2 => {
                Box::new(Es2Renderer::new(&gl).context("failed to build fallback renderer")?)
            }
        };

        Ok(Self {
            gl,
            level,
            renderer,
            field: Field::new(params),
        })
    }

    /// Feature level selected at init.
    pub fn feature_level(&self) -> FeatureLevel {
        self.level
    }

    /// Read access to the simulation state.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Reconfigures for a new surface size and reseeds the scene.
    ///
    /// Zero-sized surfaces are ignored; they occur transiently while the
    /// host rotates or minimizes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.field.reseed(width, height, &mut rand::thread_rng());
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Advances the simulation and draws one frame.
    ///
    /// The first frame after a resize only arms the clock; before the first
    /// resize the field is unseeded and the clear is all that shows.
    pub fn render(&mut self) {
        self.field.advance();

        unsafe {
            let [r, g, b, a] = CLEAR_COLOR;
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.renderer.draw(&self.gl, &self.field);
        drain_gl_errors(&self.gl, "render");
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        // The host keeps the context current until the backend is gone.
        self.renderer.destroy(&self.gl);
    }
}

fn log_driver_identification(gl: &glow::Context) {
    unsafe {
        log::info!("GL version:  {}", gl.get_parameter_string(glow::VERSION));
        log::info!("GL vendor:   {}", gl.get_parameter_string(glow::VENDOR));
        log::info!("GL renderer: {}", gl.get_parameter_string(glow::RENDERER));
    }

    if log::log_enabled!(log::Level::Debug) {
        let extensions = gl.supported_extensions();
        let mut names: Vec<&str> = extensions.iter().map(String::as_str).collect();
        names.sort_unstable();
        log::debug!("GL extensions ({}): {}", names.len(), names.join(" "));
    }
}

/// Drains the GL error queue, logging each pending code. Returns true when
/// at least one error was pending.
pub(crate) fn drain_gl_errors(gl: &glow::Context, after: &str) -> bool {
    let mut any = false;
    unsafe {
        loop {
            let err = gl.get_error();
            if err == glow::NO_ERROR {
                break;
            }
            any = true;
            log::error!("GL error after {after}: {err:#06x}");
        }
    }
    any
}
