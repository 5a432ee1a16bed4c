//! Bouncing-quad field simulation.
//!
//! Canonical space is GL clip space:
//! - Origin center, +X right, +Y up
//! - Instances live (and bounce) in the `[-1, 1]` square per axis
//!
//! The GLES backend consumes offsets and the aspect scale each frame; nothing
//! in this crate touches a GL type, so every property is testable headless.

mod clock;
mod field;
mod params;
mod vec2;

pub use clock::FrameClock;
pub use field::{BOUND, Field};
pub use params::FieldParams;
pub use vec2::Vec2;
