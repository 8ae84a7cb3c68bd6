//! Provider schema documents (`terraform providers schema -json`).
//!
//! Only the fields the compiler interprets are modelled; unknown fields are ignored. Attribute types stay as raw cty
//! JSON here and are interpreted per entity by [`super::types::TypeDescriptor::from_cty`], so one unsupported type
//! fails one entity instead of the whole document.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::errors::SchemaError;

/// The whole document: every provider's schema keyed by its fully-qualified source address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

impl SchemaDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One provider: its configuration block plus every resource and data-source type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub provider: SchemaEntry,
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, SchemaEntry>,
    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, SchemaEntry>,
}

/// A versioned block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaEntry {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub block: Block,
}

/// A (possibly nested) configuration block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub block_types: BTreeMap<String, BlockType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

/// A schema attribute.
///
/// Exactly one of `ty` and `nested_type` is set in well-formed documents. `nested_type` is the protocol 6 form of
/// an object-typed attribute whose fields carry their own flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type", default)]
    pub ty: Option<serde_json::Value>,
    #[serde(default)]
    pub nested_type: Option<NestedType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl Attribute {
    /// Whether a user may set this attribute. Only purely computed attributes are read-only.
    pub fn is_argument(&self) -> bool {
        !(self.computed && !self.optional && !self.required)
    }
}

/// Protocol 6 nested attribute type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedType {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub nesting_mode: String,
    #[serde(default)]
    pub min_items: Option<u64>,
    #[serde(default)]
    pub max_items: Option<u64>,
}

/// A nested block declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockType {
    #[serde(default)]
    pub nesting_mode: String,
    #[serde(default)]
    pub block: Block,
    #[serde(default)]
    pub min_items: u64,
    #[serde(default)]
    pub max_items: u64,
}
