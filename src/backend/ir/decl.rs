//! IR declaration definitions

use terragen_core::lang::runtime::RuntimeItemId;

use super::{IrExpr, IrStmt, IrType};

/// One generated source file.
#[derive(Debug, Clone, Default)]
pub struct IrFile {
    /// Module-level docs (`#![doc = ...]`), one entry per line.
    pub docs: Vec<String>,
    pub uses: Vec<IrUse>,
    pub items: Vec<IrItem>,
}

/// `use a::b::c;` (segments are already escaped identifiers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrUse {
    pub path: Vec<String>,
}

/// Top-level items
#[derive(Debug, Clone)]
pub enum IrItem {
    /// `pub mod name;`
    Module(String),
    Struct(IrStruct),
    Impl(IrImpl),
}

/// Visibility modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// Derivable traits. Serde derives go through the runtime's re-export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derive {
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
}

/// One argument inside `#[serde(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerdeArg {
    /// `crate = "terra::serde"`
    Crate(String),
    /// `default` (container)
    Default,
    Rename(String),
    SkipSerializingIf(String),
    DeserializeWith(String),
}

/// IR struct definition
#[derive(Debug, Clone)]
pub struct IrStruct {
    pub name: String,
    pub docs: Vec<String>,
    pub derives: Vec<Derive>,
    /// Container-level serde arguments.
    pub serde: Vec<SerdeArg>,
    pub fields: Vec<IrField>,
    pub visibility: Visibility,
}

/// Struct field
#[derive(Debug, Clone)]
pub struct IrField {
    /// Escaped Rust identifier.
    pub name: String,
    pub ty: IrType,
    pub docs: Vec<String>,
    pub serde: Vec<SerdeArg>,
    pub visibility: Visibility,
}

impl IrField {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: name.into(),
            ty,
            docs: Vec::new(),
            serde: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_serde(mut self, serde: Vec<SerdeArg>) -> Self {
        self.serde = serde;
        self
    }
}

/// IR impl block definition
#[derive(Debug, Clone)]
pub struct IrImpl {
    /// The record being implemented on (e.g., "Instance")
    pub target: String,
    /// The runtime trait being implemented, if any
    pub trait_id: Option<RuntimeItemId>,
    pub methods: Vec<IrMethod>,
}

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Associated function.
    None,
    Ref,
    RefMut,
}

/// IR method definition
#[derive(Debug, Clone)]
pub struct IrMethod {
    pub name: String,
    pub docs: Vec<String>,
    /// Ignored inside trait impls.
    pub visibility: Visibility,
    pub receiver: Receiver,
    pub params: Vec<(String, IrType)>,
    pub return_type: IrType,
    pub body: Vec<IrStmt>,
}

impl IrMethod {
    /// A `&self` method whose body is a single expression.
    pub fn getter(name: impl Into<String>, return_type: IrType, value: IrExpr) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            visibility: Visibility::Public,
            receiver: Receiver::Ref,
            params: Vec::new(),
            return_type,
            body: vec![IrStmt::Expr(value)],
        }
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }
}
