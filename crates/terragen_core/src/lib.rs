//! Provide shared, pure naming helpers and canonical vocabulary for the terragen compiler.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that decide how schema
//! names become Rust identifiers and which `terra` runtime items generated code refers to.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no compiler-specific types.
//! - Current scope: Rust keyword escaping, case conventions, entity naming, and the runtime item registry.

pub mod lang;
pub mod naming;
