//! terragen compiler backend
//!
//! This module turns the graph of each entity into formatted Rust source.
//!
//! The pipeline per entity is:
//! 1. Graph from the frontend (built, then disambiguated)
//! 2. `lower` → IR files (entity file plus optional namespace file)
//! 3. `ir::emit` → formatted source
//! 4. `project` → one provider tree per provider, written atomically
//!
//! ## Module Organization
//!
//! - `entity` - entity descriptors and derived names
//! - `mapping` - the three projections of leaf types
//! - `lower` - graph → IR
//! - `ir` - IR definitions and the renderer
//! - `project` - output layout and atomic writes

#![deny(clippy::unwrap_used)]

pub mod entity;
pub mod ir;
pub mod lower;
pub mod mapping;
pub mod project;

use miette::Diagnostic;
use thiserror::Error;

use terragen_core::naming;

use crate::config::{ModulePath, ProviderSpec};
use crate::frontend::schema::ProviderSchema;
use crate::frontend::{DisambiguationError, GraphError, build_graph, disambiguate};

pub use entity::{Entity, EntityKind, EntityNames};
pub use ir::{EmitError, IrEmitter};
pub use lower::LowerError;
pub use project::{GeneratedFile, ProjectError, ProjectWriter, ProviderTree};

/// Failure to compile one entity. Siblings are unaffected.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(
        code(terragen::unsupported_type),
        help("only bool, string, number, list, set, map and object types can be bound")
    )]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(code(terragen::unresolved_name_collision))]
    Disambiguation(#[from] DisambiguationError),

    #[error(transparent)]
    #[diagnostic(code(terragen::name_collision))]
    Lower(#[from] LowerError),

    #[error(transparent)]
    #[diagnostic(code(terragen::render))]
    Emit(#[from] EmitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] ProjectError),
}

/// Rendered files of one entity and the modules they declare.
#[derive(Debug, Clone)]
pub struct CompiledEntity {
    pub files: Vec<GeneratedFile>,
    pub modules: Vec<String>,
}

/// Compile one entity: graph, disambiguation, lowering, rendering.
#[tracing::instrument(skip_all, fields(entity = %entity))]
pub fn compile_entity(
    entity: &Entity<'_>,
    module_path: &ModulePath,
    emitter: &IrEmitter,
) -> Result<CompiledEntity, CompileError> {
    let mut graph = build_graph(entity.block)?;
    disambiguate(&mut graph)?;
    let names = entity.names();
    let lowered = lower::lower_entity(entity, &names, &graph, module_path)?;

    let mut files = vec![GeneratedFile {
        path: names.file_path(),
        contents: emitter.emit_file(&lowered.file)?,
    }];
    let mut modules = vec![names.module.clone()];
    if let Some(namespace) = &lowered.namespace {
        files.push(GeneratedFile {
            path: names.namespace_path(),
            contents: emitter.emit_file(namespace)?,
        });
        modules.push(names.namespace.clone());
    }
    tracing::debug!(nodes = graph.nodes.len(), files = files.len(), "compiled");
    Ok(CompiledEntity { files, modules })
}

/// One entity that failed to compile.
#[derive(Debug)]
pub struct EntityFailure {
    /// Display name (`resource \`aws_instance\``).
    pub entity: String,
    pub error: CompileError,
}

/// Every file of one provider plus the entities that failed.
#[derive(Debug)]
pub struct ProviderOutput {
    /// Escaped module of the provider directory.
    pub module: String,
    pub tree: ProviderTree,
    pub entities: usize,
    pub failures: Vec<EntityFailure>,
}

/// Compile the provider block and every resource and data-source type of one provider.
///
/// Entity failures are collected, not returned: one bad type never hides the rest of the provider.
///
/// ## Errors
/// - [`EmitError`] only if the provider's own `mod.rs` cannot be rendered.
#[tracing::instrument(skip_all, fields(provider = %spec.local_name))]
pub fn compile_provider(
    spec: &ProviderSpec,
    schema: &ProviderSchema,
    module_path: &ModulePath,
    emitter: &IrEmitter,
) -> Result<ProviderOutput, EmitError> {
    let mut entities = vec![Entity::provider(spec, &schema.provider.block)];
    entities.extend(
        schema
            .resource_schemas
            .iter()
            .map(|(type_name, entry)| Entity::resource(spec, type_name, &entry.block)),
    );
    entities.extend(
        schema
            .data_source_schemas
            .iter()
            .map(|(type_name, entry)| Entity::data_source(spec, type_name, &entry.block)),
    );

    let module = naming::module_name(&spec.local_name);
    let mut tree = ProviderTree::new(format!("{}/mod.rs", naming::module_file_stem(&module)));
    let mut failures = Vec::new();
    for entity in &entities {
        let owner = entity.to_string();
        let result = compile_entity(entity, module_path, emitter)
            .and_then(|compiled| Ok(tree.insert(&owner, compiled.files, compiled.modules)?));
        if let Err(error) = result {
            tracing::warn!(entity = %owner, error = %error, "skipping entity");
            failures.push(EntityFailure { entity: owner, error });
        }
    }

    let index = lower::module_file(
        vec![format!(
            "Bindings for the `{}` provider (`{}` {}).",
            spec.local_name, spec.source, spec.version
        )],
        tree.modules(),
    );
    tree.set_index(emitter.emit_file(&index)?);

    Ok(ProviderOutput {
        module,
        tree,
        entities: entities.len(),
        failures,
    })
}

/// The root `mod.rs`, declaring one module per provider.
pub fn root_index(emitter: &IrEmitter, mut modules: Vec<String>) -> Result<GeneratedFile, EmitError> {
    modules.sort_by(|a, b| naming::module_file_stem(a).cmp(naming::module_file_stem(b)));
    let file = lower::module_file(vec!["Generated provider bindings.".to_string()], modules);
    Ok(GeneratedFile {
        path: "mod.rs".to_string(),
        contents: emitter.emit_file(&file)?,
    })
}
