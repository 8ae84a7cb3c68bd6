//! Runtime item vocabulary.
//!
//! Generated bindings depend on exactly one crate, `terra`. This registry lists every `terra` item the emitters may
//! name, so the compiler never hard-codes runtime paths and a parity test can check each entry against the real crate.
//!
//! ## Notes
//! - `canonical` is the path relative to the runtime crate root, `::`-separated (e.g. `de::null_as_default`).
//! - Matching is **case-sensitive**.

use super::registry::{ItemKind, LangItemInfo};

/// Name of the runtime crate generated code depends on.
pub const RUNTIME_CRATE: &str = "terra";

/// Stable identifier for a runtime item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeItemId {
    // Argument values (literal or reference)
    StringValue,
    NumberValue,
    BoolValue,
    ListValue,
    SetValue,
    MapValue,

    // Typed references
    Reference,
    StringRef,
    NumberRef,
    BoolRef,
    ListRef,
    SetRef,
    MapRef,
    FromReference,
    Referencable,

    // Entity contracts
    Provider,
    Resource,
    DataSource,
    DependsOn,
    Lifecycle,
    Configuration,
    ConfigurationError,
    StateError,

    // Helpers
    ConfigurationFn,
    DecodeState,
    NullAsDefault,
    Serde,
}

/// Metadata for a runtime item.
pub type RuntimeItemInfo = LangItemInfo<RuntimeItemId>;

/// Registry of all runtime items generated code may reference.
pub const RUNTIME_ITEMS: &[RuntimeItemInfo] = &[
    info(RuntimeItemId::StringValue, "StringValue", ItemKind::Alias, 0, "String literal or reference."),
    info(RuntimeItemId::NumberValue, "NumberValue", ItemKind::Alias, 0, "Number literal or reference."),
    info(RuntimeItemId::BoolValue, "BoolValue", ItemKind::Alias, 0, "Bool literal or reference."),
    info(RuntimeItemId::ListValue, "ListValue", ItemKind::Alias, 1, "List literal or reference."),
    info(RuntimeItemId::SetValue, "SetValue", ItemKind::Alias, 1, "Set literal or reference."),
    info(RuntimeItemId::MapValue, "MapValue", ItemKind::Alias, 1, "String-keyed map literal or reference."),
    info(RuntimeItemId::Reference, "Reference", ItemKind::Struct, 0, "Untyped traversal path."),
    info(RuntimeItemId::StringRef, "StringRef", ItemKind::Struct, 0, "Reference to a string."),
    info(RuntimeItemId::NumberRef, "NumberRef", ItemKind::Struct, 0, "Reference to a number."),
    info(RuntimeItemId::BoolRef, "BoolRef", ItemKind::Struct, 0, "Reference to a bool."),
    info(RuntimeItemId::ListRef, "ListRef", ItemKind::Struct, 1, "Reference to a list of typed references."),
    info(RuntimeItemId::SetRef, "SetRef", ItemKind::Struct, 1, "Reference to a set of typed references."),
    info(RuntimeItemId::MapRef, "MapRef", ItemKind::Struct, 1, "Reference to a map of typed references."),
    info(
        RuntimeItemId::FromReference,
        "FromReference",
        ItemKind::Trait,
        0,
        "Build a typed reference from an untyped one.",
    ),
    info(
        RuntimeItemId::Referencable,
        "Referencable",
        ItemKind::Trait,
        0,
        "Entities that can be the root of a reference.",
    ),
    info(RuntimeItemId::Provider, "Provider", ItemKind::Trait, 0, "Provider configuration contract."),
    info(RuntimeItemId::Resource, "Resource", ItemKind::Trait, 0, "Managed resource contract."),
    info(RuntimeItemId::DataSource, "DataSource", ItemKind::Trait, 0, "Data source contract."),
    info(RuntimeItemId::DependsOn, "DependsOn", ItemKind::Struct, 0, "Explicit dependency list."),
    info(RuntimeItemId::Lifecycle, "Lifecycle", ItemKind::Struct, 0, "Resource lifecycle policy."),
    info(
        RuntimeItemId::Configuration,
        "Configuration",
        ItemKind::Alias,
        0,
        "Rendered configuration body.",
    ),
    info(
        RuntimeItemId::ConfigurationError,
        "ConfigurationError",
        ItemKind::Struct,
        0,
        "Failure to render a configuration body.",
    ),
    info(RuntimeItemId::StateError, "StateError", ItemKind::Struct, 0, "Failure to decode resource state."),
    info(
        RuntimeItemId::ConfigurationFn,
        "configuration",
        ItemKind::Function,
        0,
        "Render an argument record into a configuration body.",
    ),
    info(
        RuntimeItemId::DecodeState,
        "decode_state",
        ItemKind::Function,
        1,
        "Decode a JSON state payload into a state record.",
    ),
    info(
        RuntimeItemId::NullAsDefault,
        "de::null_as_default",
        ItemKind::Function,
        1,
        "Deserialize `null` as the field's default.",
    ),
    info(RuntimeItemId::Serde, "serde", ItemKind::Module, 0, "Re-exported serde crate."),
];

/// Resolve a spelling to a [`RuntimeItemId`].
pub fn from_str(name: &str) -> Option<RuntimeItemId> {
    RUNTIME_ITEMS.iter().find(|i| i.canonical == name).map(|i| i.id)
}

/// Return the canonical path (relative to the runtime crate) for an item.
pub fn as_str(id: RuntimeItemId) -> &'static str {
    info_for(id).canonical
}

/// Return the path segments of an item, runtime crate first.
///
/// ## Examples
/// ```rust
/// use terragen_core::lang::runtime::{self, RuntimeItemId};
///
/// assert_eq!(runtime::path_segments(RuntimeItemId::NullAsDefault), vec!["terra", "de", "null_as_default"]);
/// ```
pub fn path_segments(id: RuntimeItemId) -> Vec<&'static str> {
    std::iter::once(RUNTIME_CRATE).chain(as_str(id).split("::")).collect()
}

/// Return the full `::`-joined path of an item (e.g. `terra::StringValue`).
pub fn full_path(id: RuntimeItemId) -> String {
    path_segments(id).join("::")
}

/// Return the full metadata entry for a runtime item.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: RuntimeItemId) -> &'static RuntimeItemInfo {
    RUNTIME_ITEMS
        .iter()
        .find(|i| i.id == id)
        .expect("runtime item info missing")
}

const fn info(
    id: RuntimeItemId,
    canonical: &'static str,
    kind: ItemKind,
    arity: usize,
    description: &'static str,
) -> RuntimeItemInfo {
    LangItemInfo {
        id,
        canonical,
        kind,
        arity,
        description,
    }
}
