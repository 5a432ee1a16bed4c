//! Logging utilities.
//!
//! Hosts that already install a logger can ignore this module; everything in
//! the crate goes through the standard `log` facade. For bare hosts (tests,
//! harnesses) this provides a one-call `env_logger` setup.

mod init;

pub use init::{LoggingConfig, init_logging};
