//! terragen compiler frontend
//!
//! This module turns provider schema documents into the graph the backend emits from:
//! - `schema`: serde model of `terraform providers schema -json`
//! - `types`: the closed type-descriptor model decoded from cty JSON
//! - `graph`: graph builder (attributes, promoted object shapes, nested blocks)
//! - `disambiguate`: unique node names within one graph
//! - `errors`: per-stage error types

pub mod disambiguate;
pub mod errors;
pub mod graph;
pub mod schema;
pub mod types;

pub use disambiguate::disambiguate;
pub use errors::{DisambiguationError, GraphError, SchemaError, TypeError};
pub use graph::{Attribute, Graph, Node, NodeId, build_graph};
pub use schema::SchemaDocument;
pub use types::{NestingMode, TypeDescriptor};
