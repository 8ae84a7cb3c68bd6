//! IR type definitions
//!
//! These types represent the Rust types that appear in generated bindings. Runtime types are named by
//! [`RuntimeItemId`] so the IR never spells `terra` paths itself.

use terragen_core::lang::runtime::{self, RuntimeItemId};

/// IR type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    // Primitives
    Unit,
    Bool,
    Float,
    String,
    /// `&str`
    Str,
    /// `&'static str`
    StaticStr,
    /// `&[u8]`
    Bytes,

    // Std containers
    Vec(Box<IrType>),
    /// `std::collections::BTreeMap<String, T>`
    Map(Box<IrType>),
    Option(Box<IrType>),
    Result(Box<IrType>, Box<IrType>),

    /// `&T`
    Ref(Box<IrType>),
    /// `&mut T`
    RefMut(Box<IrType>),
    /// `impl Into<T>`
    ImplInto(Box<IrType>),

    /// A generated record, optionally qualified by a sibling module (`instance::EbsBlockDevice`).
    Named { module: Option<String>, name: String },

    /// A `terra` item with generic arguments (`terra::ListValue<terra::StringValue>`).
    Runtime(RuntimeItemId, Vec<IrType>),

    SelfType,
}

impl IrType {
    pub fn runtime(id: RuntimeItemId) -> Self {
        IrType::Runtime(id, Vec::new())
    }

    pub fn runtime_generic(id: RuntimeItemId, arg: IrType) -> Self {
        IrType::Runtime(id, vec![arg])
    }

    pub fn named(name: impl Into<String>) -> Self {
        IrType::Named {
            module: None,
            name: name.into(),
        }
    }

    pub fn named_in(module: Option<&str>, name: impl Into<String>) -> Self {
        IrType::Named {
            module: module.map(str::to_string),
            name: name.into(),
        }
    }

    pub fn vec(inner: IrType) -> Self {
        IrType::Vec(Box::new(inner))
    }

    pub fn map(inner: IrType) -> Self {
        IrType::Map(Box::new(inner))
    }

    pub fn option(inner: IrType) -> Self {
        IrType::Option(Box::new(inner))
    }

    pub fn reference(inner: IrType) -> Self {
        IrType::Ref(Box::new(inner))
    }

    pub fn is_option(&self) -> bool {
        matches!(self, IrType::Option(_))
    }

    /// Get the Rust type name (for docs, diagnostics, and tests).
    pub fn rust_name(&self) -> String {
        match self {
            IrType::Unit => "()".to_string(),
            IrType::Bool => "bool".to_string(),
            IrType::Float => "f64".to_string(),
            IrType::String => "String".to_string(),
            IrType::Str => "&str".to_string(),
            IrType::StaticStr => "&'static str".to_string(),
            IrType::Bytes => "&[u8]".to_string(),
            IrType::Vec(inner) => format!("Vec<{}>", inner.rust_name()),
            IrType::Map(inner) => format!("std::collections::BTreeMap<String, {}>", inner.rust_name()),
            IrType::Option(inner) => format!("Option<{}>", inner.rust_name()),
            IrType::Result(ok, err) => format!("Result<{}, {}>", ok.rust_name(), err.rust_name()),
            IrType::Ref(inner) => format!("&{}", inner.rust_name()),
            IrType::RefMut(inner) => format!("&mut {}", inner.rust_name()),
            IrType::ImplInto(inner) => format!("impl Into<{}>", inner.rust_name()),
            IrType::Named { module: Some(module), name } => format!("{module}::{name}"),
            IrType::Named { module: None, name } => name.clone(),
            IrType::Runtime(id, args) if args.is_empty() => runtime::full_path(*id),
            IrType::Runtime(id, args) => {
                let inner: Vec<_> = args.iter().map(IrType::rust_name).collect();
                format!("{}<{}>", runtime::full_path(*id), inner.join(", "))
            }
            IrType::SelfType => "Self".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_name_nests() {
        let ty = IrType::runtime_generic(
            RuntimeItemId::ListValue,
            IrType::runtime_generic(RuntimeItemId::SetValue, IrType::runtime(RuntimeItemId::StringValue)),
        );
        assert_eq!(ty.rust_name(), "terra::ListValue<terra::SetValue<terra::StringValue>>");
        assert_eq!(
            IrType::option(IrType::named_in(Some("instance"), "Ebs")).rust_name(),
            "Option<instance::Ebs>"
        );
    }
}
