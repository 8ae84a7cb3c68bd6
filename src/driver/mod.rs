//! Generation driver
//!
//! Runs every requested provider concurrently:
//!
//! 1. Prepare the output directory (create, or force-clean).
//! 2. Per provider, on a [`JoinSet`] task: fetch the schema document (bounded by the configured timeout), resolve
//!    the provider's source address in it, then compile and write its files on the blocking pool.
//! 3. Write the root `mod.rs` last, declaring every provider that produced output.
//!
//! A provider failure never aborts its siblings, and an entity failure never aborts its provider. Every failure is
//! reported in the returned [`GenerateReport`].

pub mod errors;
pub mod source;

use std::sync::Arc;

use tokio::task::JoinSet;

use terragen_core::naming;

use crate::backend::{self, IrEmitter, ProjectWriter, ProviderOutput};
use crate::config::{GenerateConfig, ModulePath, ProviderSpec, check_provider_modules};
use crate::frontend::SchemaDocument;
use crate::frontend::schema::ProviderSchema;

pub use errors::{GenerateError, SourceError};
pub use source::{FileSchemaSource, SchemaSource, TerraformCliSource};

/// What one provider produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    pub local_name: String,
    /// Entities attempted (provider block, resources, data sources).
    pub entities: usize,
    /// Files written, including the provider's `mod.rs`.
    pub files: usize,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Providers that produced output, in request order.
    pub providers: Vec<ProviderReport>,
    /// Every provider-level and entity-level failure, in request order.
    pub failures: Vec<GenerateError>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn files_written(&self) -> usize {
        // +1 for the root index
        self.providers.iter().map(|p| p.files).sum::<usize>() + 1
    }
}

/// Find a provider's schema in a document: the source address as given, then its registry-qualified form.
///
/// ## Errors
/// - [`GenerateError::SchemaNotFound`] if neither key is present.
pub fn resolve_provider(document: &mut SchemaDocument, spec: &ProviderSpec) -> Result<ProviderSchema, GenerateError> {
    if let Some(schema) = document.provider_schemas.remove(&spec.source) {
        return Ok(schema);
    }
    let qualified = naming::registry_qualified(&spec.source);
    if let Some(schema) = document.provider_schemas.remove(&qualified) {
        tracing::warn!(
            provider = %spec.local_name,
            source = %spec.source,
            resolved = %qualified,
            "schema found under the registry-qualified address"
        );
        return Ok(schema);
    }
    let available: Vec<&str> = document.provider_schemas.keys().map(String::as_str).collect();
    Err(GenerateError::SchemaNotFound {
        local_name: spec.local_name.clone(),
        source_address: spec.source.clone(),
        available: if available.is_empty() {
            "(none)".to_string()
        } else {
            available.join(", ")
        },
    })
}

/// Result of one provider task.
struct ProviderRun {
    report: Option<ProviderReport>,
    module: Option<String>,
    failures: Vec<GenerateError>,
}

impl ProviderRun {
    fn failed(error: GenerateError) -> Self {
        Self {
            report: None,
            module: None,
            failures: vec![error],
        }
    }
}

/// Generate bindings for every provider in `config`.
///
/// ## Errors
/// Only failures that leave nothing to generate: providers that would share an output module, an output directory
/// that cannot be prepared, or a root `mod.rs` that cannot be rendered or written. Everything else is collected in
/// the report.
#[tracing::instrument(skip_all, fields(out = %config.out_dir.display(), providers = config.providers.len()))]
pub async fn generate<S: SchemaSource>(config: &GenerateConfig, source: Arc<S>) -> Result<GenerateReport, GenerateError> {
    check_provider_modules(&config.providers)?;

    let writer = ProjectWriter::new(&config.out_dir);
    let force = config.force;
    let prepare = writer.clone();
    tokio::task::spawn_blocking(move || prepare.prepare(force))
        .await
        .map_err(|e| GenerateError::Join(e.to_string()))??;

    let emitter = IrEmitter::new();
    let mut tasks = JoinSet::new();
    for (index, spec) in config.providers.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let writer = writer.clone();
        let emitter = emitter.clone();
        let module_path = config.module_path.clone();
        let timeout = config.timeout;
        tasks.spawn(async move {
            let run = run_provider(spec, source.as_ref(), writer, emitter, module_path, timeout).await;
            (index, run)
        });
    }

    let mut runs = Vec::with_capacity(config.providers.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(run) => runs.push(run),
            Err(e) => runs.push((usize::MAX, ProviderRun::failed(GenerateError::Join(e.to_string())))),
        }
    }
    runs.sort_by_key(|(index, _)| *index);

    let mut report = GenerateReport::default();
    let mut modules = Vec::new();
    for (_, run) in runs {
        report.providers.extend(run.report);
        modules.extend(run.module);
        report.failures.extend(run.failures);
    }

    let root = backend::root_index(&emitter, modules)?;
    tokio::task::spawn_blocking(move || writer.write(backend::project::MODULE_INDEX, &root))
        .await
        .map_err(|e| GenerateError::Join(e.to_string()))??;

    tracing::info!(
        providers = report.providers.len(),
        files = report.files_written(),
        failures = report.failures.len(),
        "generation finished"
    );
    Ok(report)
}

#[tracing::instrument(skip_all, fields(provider = %spec.local_name))]
async fn run_provider<S: SchemaSource>(
    spec: ProviderSpec,
    source: &S,
    writer: ProjectWriter,
    emitter: IrEmitter,
    module_path: ModulePath,
    timeout: std::time::Duration,
) -> ProviderRun {
    let fetched = match tokio::time::timeout(timeout, source.fetch(&spec)).await {
        Ok(fetched) => fetched,
        Err(_) => {
            return ProviderRun::failed(GenerateError::Timeout {
                provider: spec.local_name.clone(),
                timeout,
            });
        }
    };
    let mut document = match fetched {
        Ok(document) => document,
        Err(source) => {
            return ProviderRun::failed(GenerateError::Source {
                provider: spec.local_name.clone(),
                source,
            });
        }
    };
    let schema = match resolve_provider(&mut document, &spec) {
        Ok(schema) => schema,
        Err(e) => return ProviderRun::failed(e),
    };
    tracing::info!(
        source = %spec.source,
        version = %spec.version,
        resources = schema.resource_schemas.len(),
        data_sources = schema.data_source_schemas.len(),
        "generating provider"
    );

    let compiled = tokio::task::spawn_blocking(move || {
        let output = backend::compile_provider(&spec, &schema, &module_path, &emitter)?;
        Ok::<_, GenerateError>(write_provider(&spec, output, &writer))
    })
    .await;
    match compiled {
        Ok(Ok(run)) => run,
        Ok(Err(e)) => ProviderRun::failed(e),
        Err(e) => ProviderRun::failed(GenerateError::Join(e.to_string())),
    }
}

fn write_provider(spec: &ProviderSpec, output: ProviderOutput, writer: &ProjectWriter) -> ProviderRun {
    let mut failures: Vec<GenerateError> = output
        .failures
        .into_iter()
        .map(|failure| GenerateError::Compile {
            provider: spec.local_name.clone(),
            entity: failure.entity,
            source: failure.error,
        })
        .collect();

    let mut files = 0;
    for (owner, file) in output.tree.files() {
        match writer.write(owner, file) {
            Ok(_) => files += 1,
            Err(e) => failures.push(e.into()),
        }
    }

    ProviderRun {
        report: Some(ProviderReport {
            local_name: spec.local_name.clone(),
            entities: output.entities,
            files,
        }),
        module: Some(output.module),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(source: &str) -> ProviderSpec {
        format!("p={source}:1.0.0").parse().unwrap()
    }

    fn document(keys: &[&str]) -> SchemaDocument {
        let mut doc = SchemaDocument::default();
        for key in keys {
            doc.provider_schemas.insert(key.to_string(), ProviderSchema::default());
        }
        doc
    }

    #[test]
    fn test_resolve_exact_address() {
        let mut doc = document(&["hashicorp/aws", "registry.terraform.io/hashicorp/aws"]);
        resolve_provider(&mut doc, &spec("hashicorp/aws")).unwrap();
        assert!(doc.provider_schemas.contains_key("registry.terraform.io/hashicorp/aws"));
    }

    #[test]
    fn test_resolve_registry_fallback() {
        let mut doc = document(&["registry.terraform.io/hashicorp/aws"]);
        resolve_provider(&mut doc, &spec("hashicorp/aws")).unwrap();
        assert!(doc.provider_schemas.is_empty());
    }

    #[test]
    fn test_resolve_not_found_lists_available() {
        let mut doc = document(&["registry.terraform.io/hashicorp/google"]);
        let err = resolve_provider(&mut doc, &spec("hashicorp/aws")).unwrap_err();
        match err {
            GenerateError::SchemaNotFound {
                source_address,
                available,
                ..
            } => {
                assert_eq!(source_address, "hashicorp/aws");
                assert_eq!(available, "registry.terraform.io/hashicorp/google");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
