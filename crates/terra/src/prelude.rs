//! Glob-importable set of the names application code uses most.
//!
//! ```rust
//! use terra::prelude::*;
//!
//! let v: StringValue = "t3.micro".into();
//! assert!(v.as_literal().is_some());
//! ```

pub use crate::document::Document;
pub use crate::entity::{DataSource, Provider, Referencable, Resource};
pub use crate::lifecycle::{DependsOn, Lifecycle};
pub use crate::reference::Reference;
pub use crate::refs::{BoolRef, FromReference, ListRef, MapRef, NumberRef, SetRef, StringRef};
pub use crate::value::{BoolValue, ListValue, MapValue, NumberValue, SetValue, StringValue, Value};
