//! Emit Rust items from IR declarations.
//!
//! Structs (with derives and serde attributes), impl blocks, methods, `use` declarations and `pub mod` items.

use proc_macro2::TokenStream;
use quote::quote;

use terragen_core::lang::runtime::RuntimeItemId;

use super::super::decl::{Derive, IrField, IrImpl, IrItem, IrMethod, IrStruct, IrUse, Receiver, SerdeArg};
use super::{EmitError, IrEmitter};

/// Split docs into attribute strings. An empty entry is kept as a paragraph break.
pub(super) fn doc_lines(docs: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for doc in docs {
        if doc.is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(doc.lines().map(|line| if line.is_empty() { String::new() } else { format!(" {line}") }));
    }
    out
}

impl IrEmitter {
    /// `#[doc = " line"]` per line. The leading space makes `prettyplease` print `/// line`.
    pub(super) fn emit_docs(&self, docs: &[String]) -> TokenStream {
        let lines = doc_lines(docs);
        quote! { #(#[doc = #lines])* }
    }

    fn emit_derives(&self, derives: &[Derive]) -> Result<TokenStream, EmitError> {
        if derives.is_empty() {
            return Ok(quote! {});
        }
        let serde = self.emit_runtime_path(RuntimeItemId::Serde)?;
        let paths: Vec<TokenStream> = derives
            .iter()
            .map(|d| match d {
                Derive::Debug => quote! { Debug },
                Derive::Clone => quote! { Clone },
                Derive::Default => quote! { Default },
                Derive::PartialEq => quote! { PartialEq },
                Derive::Serialize => quote! { #serde::Serialize },
                Derive::Deserialize => quote! { #serde::Deserialize },
            })
            .collect();
        Ok(quote! { #[derive(#(#paths),*)] })
    }

    fn emit_serde(&self, args: &[SerdeArg]) -> TokenStream {
        if args.is_empty() {
            return quote! {};
        }
        let parts = args.iter().map(|arg| match arg {
            SerdeArg::Crate(path) => quote! { crate = #path },
            SerdeArg::Default => quote! { default },
            SerdeArg::Rename(name) => quote! { rename = #name },
            SerdeArg::SkipSerializingIf(path) => quote! { skip_serializing_if = #path },
            SerdeArg::DeserializeWith(path) => quote! { deserialize_with = #path },
        });
        quote! { #[serde(#(#parts),*)] }
    }

    fn emit_field(&self, field: &IrField) -> Result<TokenStream, EmitError> {
        let docs = self.emit_docs(&field.docs);
        let serde = self.emit_serde(&field.serde);
        let vis = self.emit_visibility(field.visibility);
        let name = Self::ident(&field.name)?;
        let ty = self.emit_type(&field.ty)?;
        Ok(quote! {
            #docs
            #serde
            #vis #name: #ty
        })
    }

    pub(super) fn emit_struct(&self, s: &IrStruct) -> Result<TokenStream, EmitError> {
        let docs = self.emit_docs(&s.docs);
        let derives = self.emit_derives(&s.derives)?;
        let serde = self.emit_serde(&s.serde);
        let vis = self.emit_visibility(s.visibility);
        let name = Self::ident(&s.name)?;
        let fields = s
            .fields
            .iter()
            .map(|f| self.emit_field(f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote! {
            #docs
            #derives
            #serde
            #vis struct #name {
                #(#fields),*
            }
        })
    }

    fn emit_method(&self, method: &IrMethod, in_trait: bool) -> Result<TokenStream, EmitError> {
        let docs = self.emit_docs(&method.docs);
        let vis = if in_trait {
            quote! {}
        } else {
            self.emit_visibility(method.visibility)
        };
        let name = Self::ident(&method.name)?;
        let receiver = match method.receiver {
            Receiver::None => None,
            Receiver::Ref => Some(quote! { &self }),
            Receiver::RefMut => Some(quote! { &mut self }),
        };
        let mut params: Vec<TokenStream> = receiver.into_iter().collect();
        for (param, ty) in &method.params {
            let p = Self::ident(param)?;
            let t = self.emit_type(ty)?;
            params.push(quote! { #p: #t });
        }
        let ret = self.emit_type(&method.return_type)?;
        let body = self.emit_body(&method.body)?;
        Ok(quote! {
            #docs
            #vis fn #name(#(#params),*) -> #ret {
                #body
            }
        })
    }

    pub(super) fn emit_impl(&self, imp: &IrImpl) -> Result<TokenStream, EmitError> {
        let target = Self::ident(&imp.target)?;
        let methods = imp
            .methods
            .iter()
            .map(|m| self.emit_method(m, imp.trait_id.is_some()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match imp.trait_id {
            Some(trait_id) => {
                let tr = self.emit_runtime_path(trait_id)?;
                quote! {
                    impl #tr for #target {
                        #(#methods)*
                    }
                }
            }
            None => quote! {
                impl #target {
                    #(#methods)*
                }
            },
        })
    }

    pub(super) fn emit_use(&self, u: &IrUse) -> Result<TokenStream, EmitError> {
        let segments = u.path.iter().map(|s| Self::ident(s)).collect::<Result<Vec<_>, _>>()?;
        Ok(quote! { use #(#segments)::*; })
    }

    pub(super) fn emit_item(&self, item: &IrItem) -> Result<TokenStream, EmitError> {
        match item {
            IrItem::Module(name) => {
                let name = Self::ident(name)?;
                Ok(quote! { pub mod #name; })
            }
            IrItem::Struct(s) => self.emit_struct(s),
            IrItem::Impl(imp) => self.emit_impl(imp),
        }
    }
}
