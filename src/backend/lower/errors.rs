//! Error types for graph to IR lowering.

use thiserror::Error;

use crate::backend::mapping::MappingError;

/// Error during graph lowering.
///
/// Every variant describes a name or type the bindings cannot express; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// Two nodes map to the same record name in one namespace file.
    #[error("record `{name}` would be generated twice in `{file}`")]
    DuplicateRecordName { file: String, name: String },

    /// Two schema names map to the same field or accessor of one record.
    #[error("`{record}` would have two members named `{member}` (from `{first}` and `{second}`)")]
    DuplicateMember {
        record: String,
        member: String,
        first: String,
        second: String,
    },

    #[error("attribute `{path}`: {source}")]
    Mapping {
        path: String,
        #[source]
        source: MappingError,
    },
}
