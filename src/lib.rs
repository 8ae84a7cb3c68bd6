#![forbid(unsafe_code)]
//! terragen
//!
//! Compiles Terraform provider schemas into typed Rust bindings against the `terra` runtime crate.
//! This crate provides the compiler: frontend (schema model, graph building, disambiguation),
//! backend (lowering to IR and rendering Rust), and the driver and CLI that run it per provider.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The emitted `state_must` accessor panics with a message by contract. That panic lives in
//!   the output, not in the compiler.

pub mod backend;
pub mod cli;
pub mod config;
pub mod driver;
pub mod frontend;
pub mod version;

pub use backend::{CompileError, IrEmitter, compile_entity, compile_provider};
pub use config::{GenerateConfig, ModulePath, ProviderSpec};
pub use driver::{GenerateError, GenerateReport, generate};
pub use frontend::SchemaDocument;
