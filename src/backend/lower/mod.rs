//! Graph to IR lowering.
//!
//! This module turns one entity's disambiguated [`Graph`] into the IR of its generated files:
//!
//! 1. The entity file: the primary record, its inherent and runtime trait impls, and the entity's own argument,
//!    reference, and state records.
//! 2. The auxiliary namespace file (only when the graph has nodes): the record triad of every node.
//!
//! Providers are configuration only, so their shapes lower to argument records alone.
//!
//! # Architecture
//!
//! - `errors` - Error types (`LowerError`)
//! - `records` - argument/reference/state records of one shape
//! - `entity` - primary records and their impls

mod entity;
mod errors;
mod records;

use std::collections::HashSet;

use super::entity::{Entity, EntityKind, EntityNames};
use super::ir::{IrFile, IrItem, IrUse};
use crate::config::ModulePath;
use crate::frontend::Graph;

pub use errors::LowerError;
use records::{Shape, TriadNames};

/// IR of every file one entity produces.
#[derive(Debug, Clone)]
pub struct LoweredEntity {
    pub file: IrFile,
    pub namespace: Option<IrFile>,
}

/// Graph lowering context for one entity.
pub struct GraphLowering<'a> {
    pub(super) entity: &'a Entity<'a>,
    pub(super) names: &'a EntityNames,
    pub(super) graph: &'a Graph,
    /// Module the output directory is mounted at (`crate::terra_gen`).
    pub(super) module_path: &'a ModulePath,
}

impl<'a> GraphLowering<'a> {
    pub fn new(entity: &'a Entity<'a>, names: &'a EntityNames, graph: &'a Graph, module_path: &'a ModulePath) -> Self {
        Self {
            entity,
            names,
            graph,
            module_path,
        }
    }

    fn root_shape(&self) -> Shape<'a> {
        Shape {
            path: &[],
            name: None,
            attributes: &self.graph.attributes,
            children: &self.graph.children,
        }
    }

    fn configuration_only(&self) -> bool {
        self.entity.kind == EntityKind::Provider
    }

    /// Lower the entity file and, when the graph has nodes, its namespace file.
    #[tracing::instrument(skip_all, level = "debug", fields(entity = %self.entity))]
    pub fn lower(&self) -> Result<LoweredEntity, LowerError> {
        let namespace = if self.graph.nodes.is_empty() {
            None
        } else {
            Some(self.lower_namespace()?)
        };
        Ok(LoweredEntity {
            file: self.lower_entity_file()?,
            namespace,
        })
    }

    fn lower_entity_file(&self) -> Result<IrFile, LowerError> {
        let mut uses = Vec::new();
        if !self.graph.nodes.is_empty() {
            let path = self
                .module_path
                .join(&self.names.provider_module)
                .join(&self.names.namespace);
            uses.push(IrUse {
                path: path.segments().to_vec(),
            });
        }

        let shape = self.root_shape();
        let mut items = self.primary_items();
        items.push(IrItem::Struct(self.args_record(
            shape,
            &self.names.args,
            vec![format!("Arguments of {}.", self.entity)],
            false,
        )?));
        if !self.configuration_only() {
            items.extend(self.attributes_record(
                shape,
                &self.names.attributes,
                vec![format!("Typed references to the attributes of {}.", self.entity)],
                false,
            )?);
            items.push(IrItem::Struct(self.state_record(
                shape,
                &self.names.state,
                vec![format!("Decoded state of {}.", self.entity)],
                false,
            )?));
        }

        Ok(IrFile {
            docs: self.file_docs(),
            uses,
            items,
        })
    }

    fn file_docs(&self) -> Vec<String> {
        let provider = self.entity.provider;
        let mut docs = vec![format!(
            "Bindings for the {} of `{}` {}.",
            self.entity, provider.source, provider.version
        )];
        if let Some(description) = &self.entity.block.description {
            docs.push(String::new());
            docs.extend(description.lines().map(|line| line.trim_end().to_string()));
        }
        docs
    }

    fn lower_namespace(&self) -> Result<IrFile, LowerError> {
        let file = self.names.namespace_path();
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for node in &self.graph.nodes {
            let triad = TriadNames::of_node(node);
            let mut records = vec![&triad.args];
            if !self.configuration_only() {
                records.extend([&triad.attributes, &triad.state]);
            }
            for name in records {
                if !seen.insert(name.clone()) {
                    return Err(LowerError::DuplicateRecordName {
                        file,
                        name: name.clone(),
                    });
                }
            }

            let shape = Shape {
                path: &node.ancestors,
                name: Some(&node.name),
                attributes: &node.attributes,
                children: &node.children,
            };
            let dotted = shape_path(node);
            items.push(IrItem::Struct(self.args_record(
                shape,
                &triad.args,
                vec![format!("Arguments of `{dotted}`.")],
                true,
            )?));
            if !self.configuration_only() {
                items.extend(self.attributes_record(
                    shape,
                    &triad.attributes,
                    vec![format!("Typed references into `{dotted}`.")],
                    true,
                )?);
                items.push(IrItem::Struct(self.state_record(
                    shape,
                    &triad.state,
                    vec![format!("Decoded state of `{dotted}`.")],
                    true,
                )?));
            }
        }

        Ok(IrFile {
            docs: vec![format!("Nested shapes of the {}.", self.entity)],
            uses: Vec::new(),
            items,
        })
    }
}

fn shape_path(node: &crate::frontend::Node) -> String {
    let mut parts = node.ancestors.clone();
    parts.push(node.name.clone());
    parts.join(".")
}

/// Lower one entity.
///
/// ## Errors
/// - [`LowerError::DuplicateRecordName`] / [`LowerError::DuplicateMember`] when two schema names collapse onto one
///   Rust name.
/// - [`LowerError::Mapping`] if an object type reaches the mapping engine.
pub fn lower_entity(
    entity: &Entity<'_>,
    names: &EntityNames,
    graph: &Graph,
    module_path: &ModulePath,
) -> Result<LoweredEntity, LowerError> {
    GraphLowering::new(entity, names, graph, module_path).lower()
}

/// A `mod.rs` declaring `modules` in order.
pub fn module_file(docs: Vec<String>, modules: impl IntoIterator<Item = String>) -> IrFile {
    IrFile {
        docs,
        uses: Vec::new(),
        items: modules.into_iter().map(IrItem::Module).collect(),
    }
}
