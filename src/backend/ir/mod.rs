//! Intermediate representation for generated bindings.
//!
//! Emitters (`backend::lower`) build this IR from a graph; [`emit::IrEmitter`] renders it. Nothing in the IR knows
//! about schemas, and nothing in the renderer knows about graphs.
//!
//! ## Module Organization
//!
//! - `types` - Rust types (`IrType`)
//! - `decl` - files, structs, fields, impls, methods
//! - `expr` - expressions and statements for method bodies
//! - `emit` - IR → tokens → `syn::File` → `prettyplease`

pub mod decl;
pub mod emit;
pub mod expr;
pub mod types;

pub use decl::{Derive, IrField, IrFile, IrImpl, IrItem, IrMethod, IrStruct, IrUse, Receiver, SerdeArg, Visibility};
pub use emit::{EmitError, IrEmitter};
pub use expr::{Callee, IrExpr, IrStmt, TraversalStep};
pub use types::IrType;
