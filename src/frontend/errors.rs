//! Error types for schema ingestion and graph construction.
//!
//! Every error here is scoped to one entity: the driver attaches the entity name and keeps going with its siblings.

use thiserror::Error;

/// Failure to read a provider schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid provider schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to interpret a cty type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A type outside `bool | string | number | list | set | map | object` (e.g. `dynamic`, `tuple`).
    #[error("unsupported type `{0}`")]
    Unsupported(String),

    /// Not a cty type expression at all.
    #[error("malformed type expression `{0}`")]
    Malformed(String),
}

/// Failure while building the graph of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("attribute `{path}`: {source}")]
    UnsupportedType {
        /// Dotted path from the entity root (`ebs_block_device.tags`).
        path: String,
        source: TypeError,
    },

    #[error("block `{path}`: unsupported nesting mode `{mode}`")]
    UnsupportedNesting { path: String, mode: String },
}

/// Name disambiguation could not make every node name unique.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved name collision: {count} nodes have the path `{name}`")]
pub struct DisambiguationError {
    pub name: String,
    pub count: usize,
}
