//! Runtime support for terragen-generated Terraform bindings.
//!
//! Generated code depends on this crate only. It provides:
//!
//! - [`Reference`]: a symbolic path to another entity's attribute or block (`aws_instance.web.ebs.size`),
//! - typed references ([`StringRef`], [`ListRef`], ...) built through [`FromReference`],
//! - [`Value`]: an argument that holds either a literal or a reference,
//! - the entity contracts ([`Provider`], [`Resource`], [`DataSource`]),
//! - state decoding helpers ([`decode_state`], [`de::null_as_default`]),
//! - [`Document`]: a minimal rendering layer that assembles entities into Terraform JSON syntax.

#![deny(clippy::unwrap_used)]

pub mod de;
pub mod document;
pub mod entity;
pub mod lifecycle;
pub mod prelude;
pub mod reference;
pub mod refs;
pub mod value;

// Generated code derives through `#[serde(crate = "terra::serde")]` so it needs no direct serde dependency.
pub use serde;

pub use document::Document;
pub use entity::{
    Configuration, ConfigurationError, DataSource, Provider, Referencable, Resource, StateError, configuration,
    decode_state,
};
pub use lifecycle::{DependsOn, Lifecycle};
pub use reference::{Reference, Root, Step};
pub use refs::{BoolRef, FromReference, ListRef, MapRef, NumberRef, SetRef, StringRef};
pub use value::{BoolValue, ListValue, MapValue, NumberValue, SetValue, StringValue, Value};
