/// Simulation parameters for a quad field.
///
/// Keep this structure stable and minimal. Add knobs only when a concrete
/// host needs one.
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Number of simulated quads.
    pub instances: usize,

    /// Side length of the square (centered at the origin) that offsets are
    /// seeded in. The default covers the full bounce range.
    pub spawn_extent: f32,

    /// Velocity components are seeded uniformly in `[-max_speed, +max_speed]`.
    pub max_speed: f32,

    /// Angular velocities are seeded uniformly in
    /// `[-max_rot_speed, +max_rot_speed]`, in radians per second.
    ///
    /// Angles are seeded but not yet integrated; the rotation path consumes
    /// them once the transform buffer returns.
    pub max_rot_speed: f32,

    /// Base on-screen scale. Applied to x directly; y is corrected by the
    /// surface aspect ratio `h / w`.
    pub scale_base: f32,

    /// Velocity-to-displacement damping applied per step.
    pub speed_scale: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            instances: 256,
            spawn_extent: 2.0,
            max_speed: 5.0,
            max_rot_speed: 0.3,
            scale_base: 0.1,
            speed_scale: 0.1,
        }
    }
}
