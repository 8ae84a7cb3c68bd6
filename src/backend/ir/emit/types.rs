//! Type emission for IR to Rust code generation
//!
//! Handles Rust type tokens and `terra` runtime paths.

use proc_macro2::TokenStream;
use quote::quote;

use terragen_core::lang::runtime::{self, RuntimeItemId};

use super::super::decl::Visibility;
use super::super::types::IrType;
use super::{EmitError, IrEmitter};

impl IrEmitter {
    /// Emit the full path of a runtime item (`terra::de::null_as_default`).
    pub(super) fn emit_runtime_path(&self, id: RuntimeItemId) -> Result<TokenStream, EmitError> {
        let segments = runtime::path_segments(id)
            .into_iter()
            .map(Self::ident)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote! { #(#segments)::* })
    }

    /// Emit a type as Rust tokens.
    pub(super) fn emit_type(&self, ty: &IrType) -> Result<TokenStream, EmitError> {
        Ok(match ty {
            IrType::Unit => quote! { () },
            IrType::Bool => quote! { bool },
            IrType::Float => quote! { f64 },
            IrType::String => quote! { String },
            IrType::Str => quote! { &str },
            IrType::StaticStr => quote! { &'static str },
            IrType::Bytes => quote! { &[u8] },
            IrType::Vec(inner) => {
                let i = self.emit_type(inner)?;
                quote! { Vec<#i> }
            }
            IrType::Map(inner) => {
                let i = self.emit_type(inner)?;
                quote! { std::collections::BTreeMap<String, #i> }
            }
            IrType::Option(inner) => {
                let i = self.emit_type(inner)?;
                quote! { Option<#i> }
            }
            IrType::Result(ok, err) => {
                let o = self.emit_type(ok)?;
                let e = self.emit_type(err)?;
                quote! { Result<#o, #e> }
            }
            IrType::Ref(inner) => {
                let i = self.emit_type(inner)?;
                quote! { &#i }
            }
            IrType::RefMut(inner) => {
                let i = self.emit_type(inner)?;
                quote! { &mut #i }
            }
            IrType::ImplInto(inner) => {
                let i = self.emit_type(inner)?;
                quote! { impl Into<#i> }
            }
            IrType::Named { module, name } => {
                let n = Self::ident(name)?;
                match module {
                    Some(module) => {
                        let m = Self::ident(module)?;
                        quote! { #m::#n }
                    }
                    None => quote! { #n },
                }
            }
            IrType::Runtime(id, args) => {
                let path = self.emit_runtime_path(*id)?;
                if args.is_empty() {
                    path
                } else {
                    let args = args.iter().map(|a| self.emit_type(a)).collect::<Result<Vec<_>, _>>()?;
                    quote! { #path<#(#args),*> }
                }
            }
            IrType::SelfType => quote! { Self },
        })
    }

    /// Emit visibility modifier.
    pub(super) fn emit_visibility(&self, vis: Visibility) -> TokenStream {
        match vis {
            Visibility::Private => quote! {},
            Visibility::Public => quote! { pub },
        }
    }
}
