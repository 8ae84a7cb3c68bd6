//! Vocabulary registries shared by the compiler and its tests.
//!
//! Callers work with **stable IDs** (e.g. [`runtime::RuntimeItemId`]) and look up spellings via registry tables
//! instead of scattering string literals through the emitters.
//!
//! ## Examples
//! ```rust
//! use terragen_core::lang::runtime::{self, RuntimeItemId};
//!
//! assert_eq!(runtime::from_str("StringValue"), Some(RuntimeItemId::StringValue));
//! assert_eq!(runtime::as_str(RuntimeItemId::ListRef), "ListRef");
//! ```

pub mod registry;
pub mod runtime;
pub mod rust_keywords;
