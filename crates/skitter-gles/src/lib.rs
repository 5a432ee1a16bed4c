//! GLES backend for the skitter quad field.
//!
//! This crate owns the GL-facing pieces driven by a host that controls the
//! surface and context lifecycle: shader compilation, feature-level
//! selection, and the per-frame render path.

pub mod backend;
pub mod level;
pub mod logging;
pub mod render;
pub mod shader;

pub use backend::Backend;
pub use level::FeatureLevel;
