//! Type mapping engine: the three projections of a leaf type.
//!
//! | descriptor  | argument                | state                 | reference            |
//! |-------------|-------------------------|-----------------------|----------------------|
//! | `string`    | `terra::StringValue`    | `String`              | `terra::StringRef`   |
//! | `number`    | `terra::NumberValue`    | `f64`                 | `terra::NumberRef`   |
//! | `bool`      | `terra::BoolValue`      | `bool`                | `terra::BoolRef`     |
//! | `list(T)`   | `terra::ListValue<A>`   | `Vec<S>`              | `terra::ListRef<R>`  |
//! | `set(T)`    | `terra::SetValue<A>`    | `Vec<S>`              | `terra::SetRef<R>`   |
//! | `map(T)`    | `terra::MapValue<A>`    | `BTreeMap<String, S>` | `terra::MapRef<R>`   |
//!
//! Collection projections wrap the element's projection, outermost first. The reference constructor is
//! `<R as terra::FromReference>::from_reference(base)`: each collection reference composes its element's constructor,
//! so the type alone determines the whole chain.
//!
//! Object descriptors never reach this engine; the graph builder promotes them to nodes.

use thiserror::Error;

use terragen_core::lang::runtime::RuntimeItemId;

use super::ir::{IrExpr, IrType};
use crate::frontend::TypeDescriptor;

/// An object type reached the mapping engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("object type `{0}` must be promoted to a node before type mapping")]
pub struct MappingError(pub String);

/// All three projections of one leaf type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projections {
    pub argument: IrType,
    pub state: IrType,
    pub reference: IrType,
}

pub fn project(ty: &TypeDescriptor) -> Result<Projections, MappingError> {
    Ok(Projections {
        argument: argument_type(ty)?,
        state: state_type(ty)?,
        reference: reference_type(ty)?,
    })
}

fn object_error(ty: &TypeDescriptor) -> MappingError {
    MappingError(ty.to_string())
}

/// Field type in an argument record: literal-or-reference values all the way down.
pub fn argument_type(ty: &TypeDescriptor) -> Result<IrType, MappingError> {
    Ok(match ty {
        TypeDescriptor::String => IrType::runtime(RuntimeItemId::StringValue),
        TypeDescriptor::Number => IrType::runtime(RuntimeItemId::NumberValue),
        TypeDescriptor::Bool => IrType::runtime(RuntimeItemId::BoolValue),
        TypeDescriptor::List(elem) => IrType::runtime_generic(RuntimeItemId::ListValue, argument_type(elem)?),
        TypeDescriptor::Set(elem) => IrType::runtime_generic(RuntimeItemId::SetValue, argument_type(elem)?),
        TypeDescriptor::Map(elem) => IrType::runtime_generic(RuntimeItemId::MapValue, argument_type(elem)?),
        TypeDescriptor::Object(_) => return Err(object_error(ty)),
    })
}

/// Field type in a state record: plain decoded data.
pub fn state_type(ty: &TypeDescriptor) -> Result<IrType, MappingError> {
    Ok(match ty {
        TypeDescriptor::String => IrType::String,
        TypeDescriptor::Number => IrType::Float,
        TypeDescriptor::Bool => IrType::Bool,
        TypeDescriptor::List(elem) | TypeDescriptor::Set(elem) => IrType::vec(state_type(elem)?),
        TypeDescriptor::Map(elem) => IrType::map(state_type(elem)?),
        TypeDescriptor::Object(_) => return Err(object_error(ty)),
    })
}

/// Typed reference returned by an attribute accessor.
pub fn reference_type(ty: &TypeDescriptor) -> Result<IrType, MappingError> {
    Ok(match ty {
        TypeDescriptor::String => IrType::runtime(RuntimeItemId::StringRef),
        TypeDescriptor::Number => IrType::runtime(RuntimeItemId::NumberRef),
        TypeDescriptor::Bool => IrType::runtime(RuntimeItemId::BoolRef),
        TypeDescriptor::List(elem) => IrType::runtime_generic(RuntimeItemId::ListRef, reference_type(elem)?),
        TypeDescriptor::Set(elem) => IrType::runtime_generic(RuntimeItemId::SetRef, reference_type(elem)?),
        TypeDescriptor::Map(elem) => IrType::runtime_generic(RuntimeItemId::MapRef, reference_type(elem)?),
        TypeDescriptor::Object(_) => return Err(object_error(ty)),
    })
}

/// Apply the reference constructor of `ty` to `base`.
pub fn reference_constructor(ty: &TypeDescriptor, base: IrExpr) -> Result<IrExpr, MappingError> {
    Ok(IrExpr::FromReference {
        ty: reference_type(ty)?,
        reference: Box::new(base),
    })
}
