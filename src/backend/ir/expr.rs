//! IR expressions and statements
//!
//! Only the forms generated method bodies need. Names in the IR are already escaped Rust identifiers.

use terragen_core::lang::runtime::RuntimeItemId;

use super::IrType;

/// Traversal step appended to a base reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStep {
    /// `.attribute("x")`
    Attribute,
    /// `.block("x")`
    Block,
}

/// A callable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// A runtime free function (`terra::configuration`).
    Runtime(RuntimeItemId),
    /// An associated function of a runtime type (`terra::Reference::resource`).
    RuntimeAssoc(RuntimeItemId, String),
}

/// IR expression
#[derive(Debug, Clone, PartialEq)]
pub enum IrExpr {
    /// String literal.
    Str(String),
    /// `()`
    Unit,
    /// A local or parameter.
    Var(String),
    /// `self`
    SelfValue,
    /// `base.name`
    Field(Box<IrExpr>, String),
    /// `&expr`
    Borrow(Box<IrExpr>),
    MethodCall {
        receiver: Box<IrExpr>,
        method: String,
        args: Vec<IrExpr>,
    },
    Call {
        callee: Callee,
        args: Vec<IrExpr>,
    },
    /// `<ty as terra::FromReference>::from_reference(reference)`
    FromReference { ty: IrType, reference: Box<IrExpr> },
    /// `base.attribute("name")` / `base.block("name")`
    Traverse {
        base: Box<IrExpr>,
        step: TraversalStep,
        name: String,
    },
    /// `terra::Referencable::reference(self)`
    SelfReference,
    /// `Self { field: value, .. }` (field names escaped)
    StructLit(Vec<(String, IrExpr)>),
    /// `expr.into()`
    Into(Box<IrExpr>),
    None,
    Some(Box<IrExpr>),
    Ok(Box<IrExpr>),
    /// `expr?`
    Try(Box<IrExpr>),
    /// `<ty>::default()`
    Default(IrType),
    /// `value.unwrap_or_else(|| panic!(message, args..))`
    UnwrapOrPanic {
        value: Box<IrExpr>,
        message: String,
        args: Vec<IrExpr>,
    },
}

impl IrExpr {
    pub fn self_field(name: impl Into<String>) -> Self {
        IrExpr::Field(Box::new(IrExpr::SelfValue), name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        IrExpr::Var(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        IrExpr::Str(value.into())
    }

    pub fn borrow(self) -> Self {
        IrExpr::Borrow(Box::new(self))
    }

    pub fn method(self, method: impl Into<String>, args: Vec<IrExpr>) -> Self {
        IrExpr::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    pub fn call(callee: Callee, args: Vec<IrExpr>) -> Self {
        IrExpr::Call { callee, args }
    }
}

/// IR statement
#[derive(Debug, Clone, PartialEq)]
pub enum IrStmt {
    /// `target = value;`
    Assign { target: IrExpr, value: IrExpr },
    /// An expression; the last one in a body is the tail expression.
    Expr(IrExpr),
}
