use rand::Rng;

use crate::clock::FrameClock;
use crate::params::FieldParams;
use crate::vec2::Vec2;

/// Bounce boundary in clip-space units; offsets reflect at `±BOUND` per axis.
pub const BOUND: f32 = 1.0;

/// The instance field: one bouncing quad per instance.
///
/// Two states:
/// - **unseeded** — empty arrays, clock unarmed; the state right after
///   construction and before the first surface size is known
/// - **running** — after `reseed()`
///
/// Reseeding reuses the existing allocations, so repeated surface changes do
/// not grow memory.
#[derive(Debug)]
pub struct Field {
    params: FieldParams,
    offsets: Vec<Vec2>,
    velocities: Vec<Vec2>,
    angles: Vec<f32>,
    angular_velocities: Vec<f32>,
    scale: Vec2,
    clock: FrameClock,
}

impl Field {
    /// Creates an unseeded field.
    pub fn new(params: FieldParams) -> Self {
        Self {
            params,
            offsets: Vec::new(),
            velocities: Vec::new(),
            angles: Vec::new(),
            angular_velocities: Vec::new(),
            scale: Vec2::zero(),
            clock: FrameClock::new(),
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Number of live instances (zero while unseeded).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Per-instance clip-space offsets, in instance order.
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn angular_velocities(&self) -> &[f32] {
        &self.angular_velocities
    }

    /// Aspect-corrected quad scale for the current surface.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Recomputes scene parameters for a `w` × `h` surface and reseeds every
    /// instance.
    ///
    /// Offsets land in the spawn square, velocity components in
    /// `[-max_speed, +max_speed]`, angles in `[0, 2π)`. The frame clock is
    /// reset, so the step after a reseed never moves anything.
    pub fn reseed<R: Rng>(&mut self, w: u32, h: u32, rng: &mut R) {
        let n = self.params.instances;
        let half = self.params.spawn_extent * 0.5;
        let max_speed = self.params.max_speed;
        let max_rot = self.params.max_rot_speed;

        self.offsets.clear();
        self.offsets
            .extend((0..n).map(|_| Vec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half))));

        self.velocities.clear();
        self.velocities.extend(
            (0..n).map(|_| {
                Vec2::new(
                    rng.gen_range(-max_speed..max_speed),
                    rng.gen_range(-max_speed..max_speed),
                )
            }),
        );

        self.angles.clear();
        self.angles
            .extend((0..n).map(|_| rng.gen_range(0.0..std::f32::consts::TAU)));

        self.angular_velocities.clear();
        self.angular_velocities
            .extend((0..n).map(|_| rng.gen_range(-max_rot..max_rot)));

        self.scale = Vec2::new(
            self.params.scale_base,
            self.params.scale_base * h as f32 / w as f32,
        );

        self.clock.reset();
        log::debug!(
            "reseeded {n} instances for {w}x{h} (scale {:.3}x{:.3})",
            self.scale.x,
            self.scale.y
        );
    }

    /// Advances the simulation by one frame using the internal clock.
    ///
    /// The first call after a reseed only arms the clock.
    pub fn advance(&mut self) {
        if let Some(dt) = self.clock.tick() {
            if dt > 0.0 {
                log::trace!("frame dt {:.4}s ({:.1} fps)", dt, 1.0 / dt);
            }
            self.step(dt);
        }
    }

    /// Integrates offsets by `velocity * dt * speed_scale` and reflects any
    /// axis that leaves `±BOUND`, backing out twice the step just taken so
    /// the overshoot is corrected.
    pub fn step(&mut self, dt: f32) {
        let damp = self.params.speed_scale;
        for (offset, vel) in self.offsets.iter_mut().zip(self.velocities.iter_mut()) {
            offset.x += vel.x * dt * damp;
            if offset.x > BOUND || offset.x < -BOUND {
                offset.x -= 2.0 * vel.x * dt * damp;
                vel.x = -vel.x;
            }

            offset.y += vel.y * dt * damp;
            if offset.y > BOUND || offset.y < -BOUND {
                offset.y -= 2.0 * vel.y * dt * damp;
                vel.y = -vel.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(params: FieldParams, w: u32, h: u32) -> Field {
        let mut field = Field::new(params);
        field.reseed(w, h, &mut StdRng::seed_from_u64(7));
        field
    }

    // ── reseed ────────────────────────────────────────────────────────────

    #[test]
    fn reseed_fills_every_array() {
        let field = seeded(FieldParams::default(), 640, 480);
        assert_eq!(field.len(), 256);
        assert_eq!(field.velocities().len(), 256);
        assert_eq!(field.angles().len(), 256);
        assert_eq!(field.angular_velocities().len(), 256);
    }

    #[test]
    fn reseed_respects_parameter_ranges() {
        let field = seeded(FieldParams::default(), 640, 480);
        for o in field.offsets() {
            assert!(o.x.abs() <= 1.0 && o.y.abs() <= 1.0, "offset out of spawn square: {o:?}");
        }
        for v in field.velocities() {
            assert!(v.x.abs() <= 5.0 && v.y.abs() <= 5.0, "velocity out of range: {v:?}");
        }
        for &a in field.angles() {
            assert!((0.0..std::f32::consts::TAU).contains(&a));
        }
        for &w in field.angular_velocities() {
            assert!(w.abs() <= 0.3);
        }
    }

    #[test]
    fn reseed_sets_aspect_corrected_scale() {
        // For aspect ratio R = h/w, scale.y must be scale_base * R exactly.
        let field = seeded(FieldParams::default(), 640, 480);
        assert_eq!(field.scale().x, 0.1);
        assert_eq!(field.scale().y, 0.1 * 480.0 / 640.0);

        let portrait = seeded(FieldParams::default(), 480, 640);
        assert_eq!(portrait.scale().y, 0.1 * 640.0 / 480.0);
    }

    #[test]
    fn reseed_replaces_previous_state_without_growing() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        let before = field.offsets().to_vec();

        field.reseed(800, 600, &mut StdRng::seed_from_u64(8));
        assert_eq!(field.len(), 256);
        assert_ne!(field.offsets(), &before[..]);
        assert_eq!(field.scale().y, 0.1 * 600.0 / 800.0);
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn first_advance_after_reseed_moves_nothing() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        let before = field.offsets().to_vec();
        field.advance();
        assert_eq!(field.offsets(), &before[..]);
    }

    #[test]
    fn later_advances_move_instances() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        field.advance();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let before = field.offsets().to_vec();
        field.advance();
        assert_ne!(field.offsets(), &before[..]);
    }

    #[test]
    fn advance_on_unseeded_field_is_harmless() {
        let mut field = Field::new(FieldParams::default());
        field.advance();
        field.advance();
        assert!(field.is_empty());
    }

    // ── step ──────────────────────────────────────────────────────────────

    #[test]
    fn step_matches_the_integration_rule_per_axis() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        let dt = 0.1;
        let before_o = field.offsets().to_vec();
        let before_v = field.velocities().to_vec();

        field.step(dt);

        for i in 0..field.len() {
            let (o, v) = (field.offsets()[i], field.velocities()[i]);
            for axis in 0..2 {
                let (bo, bv) = if axis == 0 {
                    (before_o[i].x, before_v[i].x)
                } else {
                    (before_o[i].y, before_v[i].y)
                };
                let moved = bo + bv * dt * 0.1;
                let (expected_o, expected_v) = if moved > BOUND || moved < -BOUND {
                    (moved - 2.0 * bv * dt * 0.1, -bv)
                } else {
                    (moved, bv)
                };
                let (got_o, got_v) = if axis == 0 { (o.x, v.x) } else { (o.y, v.y) };
                assert_eq!(got_o, expected_o, "offset axis {axis} of instance {i}");
                assert_eq!(got_v, expected_v, "velocity axis {axis} of instance {i}");
            }
        }
    }

    #[test]
    fn offsets_stay_bounded_over_many_steps() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20_000 {
            field.step(rng.gen_range(0.001..0.1));
            for o in field.offsets() {
                assert!(o.x.abs() <= BOUND + 1e-4 && o.y.abs() <= BOUND + 1e-4, "escaped: {o:?}");
            }
        }
    }

    #[test]
    fn bounce_preserves_speed() {
        let mut field = seeded(FieldParams::default(), 640, 480);
        let speeds: Vec<Vec2> = field.velocities().iter().map(|v| v.abs()).collect();
        for _ in 0..5_000 {
            field.step(1.0 / 60.0);
        }
        let after: Vec<Vec2> = field.velocities().iter().map(|v| v.abs()).collect();
        assert_eq!(speeds, after);
    }

    #[test]
    fn step_on_unseeded_field_is_a_no_op() {
        let mut field = Field::new(FieldParams::default());
        field.step(0.016);
        assert!(field.is_empty());
    }
}
