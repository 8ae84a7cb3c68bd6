//! Render IR files to formatted Rust source.
//!
//! This module defines [`IrEmitter`] and wires together the focused submodules that implement IR → Rust rendering.
//!
//! ## Notes
//! - Rendering produces a token stream, parses it into a `syn::File` (the validation step), then formats it with
//!   `prettyplease`. Invalid output is an [`EmitError`], never a silently broken file.
//! - Rendering is pure: it does not read/write files.
//!
//! ## See also
//! - [`program`]: file-level rendering and formatting
//! - [`decls`]: structs, impls, uses, modules
//! - [`expressions`]: method bodies
//! - [`types`]: type tokens and runtime paths

mod decls;
mod errors;
mod expressions;
mod program;
mod types;

pub use errors::EmitError;

use proc_macro2::{Ident, Span};

use terragen_core::lang::rust_keywords;

/// Render IR files into Rust source.
#[derive(Debug, Clone)]
pub struct IrEmitter {
    /// Generator version stamped into every file header.
    version: String,
}

impl Default for IrEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl IrEmitter {
    pub fn new() -> Self {
        Self {
            version: crate::version::TERRAGEN_VERSION.to_string(),
        }
    }

    /// Override the version in the header (tests pin it so output does not change across releases).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Build an identifier from an already-escaped name (`r#type` becomes a raw identifier).
    fn ident(name: &str) -> Result<Ident, EmitError> {
        let (raw, body) = match name.strip_prefix("r#") {
            Some(body) => (true, body),
            None => (false, name),
        };
        let valid = body.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && body != "_"
            && !(raw && rust_keywords::NON_RAW_KEYWORDS.contains(&body));
        if !valid {
            return Err(EmitError::InvalidIdent(name.to_string()));
        }
        if raw {
            Ok(Ident::new_raw(body, Span::call_site()))
        } else {
            Ok(Ident::new(body, Span::call_site()))
        }
    }
}
