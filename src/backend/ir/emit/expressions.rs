//! Emit method bodies: statements and expressions.

use proc_macro2::TokenStream;
use quote::quote;

use terragen_core::lang::runtime::RuntimeItemId;

use super::super::expr::{Callee, IrExpr, IrStmt, TraversalStep};
use super::super::types::IrType;
use super::{EmitError, IrEmitter};

impl IrEmitter {
    /// Emit a body; a trailing [`IrStmt::Expr`] becomes the tail expression.
    pub(super) fn emit_body(&self, body: &[IrStmt]) -> Result<TokenStream, EmitError> {
        let mut out = TokenStream::new();
        for (index, stmt) in body.iter().enumerate() {
            let is_last = index + 1 == body.len();
            out.extend(match stmt {
                IrStmt::Assign { target, value } => {
                    let t = self.emit_expr(target)?;
                    let v = self.emit_expr(value)?;
                    quote! { #t = #v; }
                }
                IrStmt::Expr(e) if is_last => self.emit_expr(e)?,
                IrStmt::Expr(e) => {
                    let e = self.emit_expr(e)?;
                    quote! { #e; }
                }
            });
        }
        Ok(out)
    }

    fn emit_args(&self, args: &[IrExpr]) -> Result<Vec<TokenStream>, EmitError> {
        args.iter().map(|a| self.emit_expr(a)).collect()
    }

    pub(super) fn emit_expr(&self, expr: &IrExpr) -> Result<TokenStream, EmitError> {
        Ok(match expr {
            IrExpr::Str(s) => quote! { #s },
            IrExpr::Unit => quote! { () },
            IrExpr::Var(name) => {
                let n = Self::ident(name)?;
                quote! { #n }
            }
            IrExpr::SelfValue => quote! { self },
            IrExpr::Field(base, name) => {
                let b = self.emit_expr(base)?;
                let n = Self::ident(name)?;
                quote! { #b.#n }
            }
            IrExpr::Borrow(inner) => {
                let i = self.emit_expr(inner)?;
                quote! { &#i }
            }
            IrExpr::MethodCall { receiver, method, args } => {
                let r = self.emit_expr(receiver)?;
                let m = Self::ident(method)?;
                let a = self.emit_args(args)?;
                quote! { #r.#m(#(#a),*) }
            }
            IrExpr::Call { callee, args } => {
                let path = match callee {
                    Callee::Runtime(id) => self.emit_runtime_path(*id)?,
                    Callee::RuntimeAssoc(id, function) => {
                        let ty = self.emit_runtime_path(*id)?;
                        let f = Self::ident(function)?;
                        quote! { #ty::#f }
                    }
                };
                let a = self.emit_args(args)?;
                quote! { #path(#(#a),*) }
            }
            IrExpr::FromReference { ty, reference } => {
                let t = self.emit_type(ty)?;
                let tr = self.emit_runtime_path(RuntimeItemId::FromReference)?;
                let r = self.emit_expr(reference)?;
                quote! { <#t as #tr>::from_reference(#r) }
            }
            IrExpr::Traverse { base, step, name } => {
                let b = self.emit_expr(base)?;
                match step {
                    TraversalStep::Attribute => quote! { #b.attribute(#name) },
                    TraversalStep::Block => quote! { #b.block(#name) },
                }
            }
            IrExpr::SelfReference => {
                let tr = self.emit_runtime_path(RuntimeItemId::Referencable)?;
                quote! { #tr::reference(self) }
            }
            IrExpr::StructLit(fields) => {
                let mut inits = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    let n = Self::ident(name)?;
                    if matches!(value, IrExpr::Var(var) if var == name) {
                        inits.push(quote! { #n });
                        continue;
                    }
                    let v = self.emit_expr(value)?;
                    inits.push(quote! { #n: #v });
                }
                quote! { Self { #(#inits),* } }
            }
            IrExpr::Into(inner) => {
                let i = self.emit_expr(inner)?;
                quote! { #i.into() }
            }
            IrExpr::None => quote! { None },
            IrExpr::Some(inner) => {
                let i = self.emit_expr(inner)?;
                quote! { Some(#i) }
            }
            IrExpr::Ok(inner) => {
                let i = self.emit_expr(inner)?;
                quote! { Ok(#i) }
            }
            IrExpr::Try(inner) => {
                let i = self.emit_expr(inner)?;
                quote! { #i? }
            }
            IrExpr::Default(ty) => {
                let t = self.emit_type(ty)?;
                match ty {
                    IrType::Named { .. } => quote! { #t::default() },
                    IrType::Runtime(_, args) if args.is_empty() => quote! { #t::default() },
                    _ => quote! { <#t>::default() },
                }
            }
            IrExpr::UnwrapOrPanic { value, message, args } => {
                let v = self.emit_expr(value)?;
                let a = self.emit_args(args)?;
                quote! { #v.unwrap_or_else(|| panic!(#message #(, #a)*)) }
            }
        })
    }
}
