//! terragen version information.
//!
//! The version is stamped into every generated file header, so all subsystems (CLI, emitters, header) read it from
//! this one constant.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The terragen version string (for example, `0.1.0`).
pub const TERRAGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
