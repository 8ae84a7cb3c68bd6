//! Shareable metadata for `terragen_core::lang` registries.
//!
//! ## Notes
//! - These types are `Copy`-friendly so registries can live in `const` tables.

/// Classify what kind of Rust item a registry entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A concrete struct (possibly generic).
    Struct,
    /// A type alias (possibly generic).
    Alias,
    /// A trait.
    Trait,
    /// A free function.
    Function,
    /// A module (or re-exported crate).
    Module,
}

/// Shared metadata shape for registry items.
///
/// ## Notes
/// - `description` is mandatory to keep docs/tooling consistent.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub kind: ItemKind,
    /// Number of generic type parameters the item takes.
    pub arity: usize,
    pub description: &'static str,
}
