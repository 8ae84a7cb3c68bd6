//! User-facing errors of a generation run.
//!
//! Each variant carries a stable diagnostic code. Per-provider and per-entity failures are collected into the
//! [`super::GenerateReport`]; only failures that leave nothing to generate end the run.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::backend::{CompileError, EmitError, ProjectError};
use crate::config::ConfigError;
use crate::frontend::SchemaError;

/// Failure to obtain one provider's schema document.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("failed to read schema file `{}`", .path.display())]
    #[diagnostic(code(terragen::source::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(terragen::source::json))]
    Schema(#[from] SchemaError),

    #[error("failed to prepare a terraform working directory")]
    #[diagnostic(code(terragen::source::workdir))]
    Workdir(#[source] io::Error),

    #[error("failed to run `{command}`")]
    #[diagnostic(
        code(terragen::source::spawn),
        help("install terraform, or pass `--schema` with a pre-fetched `terraform providers schema -json` document")
    )]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    #[diagnostic(code(terragen::source::command))]
    Command {
        command: String,
        status: String,
        stderr: String,
    },
}

/// A generation failure.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(code(terragen::config), help("provider specs look like `aws=hashicorp/aws:4.49.0`"))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] ProjectError),

    #[error("provider `{local_name}`: no schema for `{source_address}` in the schema document")]
    #[diagnostic(
        code(terragen::schema_not_found),
        help("the document has schemas for: {available}")
    )]
    SchemaNotFound {
        local_name: String,
        source_address: String,
        available: String,
    },

    #[error("provider `{provider}`: schema acquisition failed")]
    #[diagnostic(code(terragen::source))]
    Source {
        provider: String,
        #[source]
        #[diagnostic_source]
        source: SourceError,
    },

    #[error("provider `{provider}`: schema acquisition timed out after {}s", .timeout.as_secs())]
    #[diagnostic(code(terragen::timeout), help("raise `--timeout`, or pass a pre-fetched `--schema` file"))]
    Timeout { provider: String, timeout: Duration },

    #[error("provider `{provider}`: {entity} was not generated")]
    #[diagnostic(code(terragen::entity))]
    Compile {
        provider: String,
        entity: String,
        #[source]
        #[diagnostic_source]
        source: CompileError,
    },

    #[error(transparent)]
    #[diagnostic(code(terragen::render))]
    Emit(#[from] EmitError),

    #[error("generation task failed: {0}")]
    #[diagnostic(code(terragen::task))]
    Join(String),
}
