//! Schema acquisition.
//!
//! The compiler only needs a parsed [`SchemaDocument`] per provider. Where it comes from is behind [`SchemaSource`]:
//! a pre-fetched JSON file, or the `terraform` binary run in a scratch working directory.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use super::errors::SourceError;
use crate::config::ProviderSpec;
use crate::frontend::SchemaDocument;

/// Anything that can produce the schema document for one provider.
pub trait SchemaSource: Send + Sync + 'static {
    fn fetch(&self, provider: &ProviderSpec) -> impl Future<Output = Result<SchemaDocument, SourceError>> + Send;
}

/// A pre-fetched `terraform providers schema -json` document, shared by every provider of the run.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    async fn fetch(&self, provider: &ProviderSpec) -> Result<SchemaDocument, SourceError> {
        tracing::debug!(provider = %provider.local_name, path = %self.path.display(), "reading schema file");
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(SchemaDocument::from_slice(&bytes)?)
    }
}

/// Runs `terraform init` and `terraform providers schema -json` against a generated `main.tf`.
#[derive(Debug, Clone)]
pub struct TerraformCliSource {
    binary: PathBuf,
}

impl Default for TerraformCliSource {
    fn default() -> Self {
        Self::new("terraform")
    }
}

impl TerraformCliSource {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    async fn run(&self, dir: &std::path::Path, args: &[&str]) -> Result<Vec<u8>, SourceError> {
        let command = format!("{} {}", self.binary.display(), args.join(" "));
        tracing::debug!(%command, "running");
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(dir)
            .env("TF_IN_AUTOMATION", "1")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(SourceError::Command {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

/// The `terraform` block pinning one provider.
pub fn required_providers_config(provider: &ProviderSpec) -> String {
    format!(
        "terraform {{\n  required_providers {{\n    {} = {{\n      source  = \"{}\"\n      version = \"{}\"\n    }}\n  }}\n}}\n",
        provider.local_name, provider.source, provider.version
    )
}

impl SchemaSource for TerraformCliSource {
    async fn fetch(&self, provider: &ProviderSpec) -> Result<SchemaDocument, SourceError> {
        let dir = tempfile::tempdir().map_err(SourceError::Workdir)?;
        tokio::fs::write(dir.path().join("main.tf"), required_providers_config(provider))
            .await
            .map_err(SourceError::Workdir)?;
        self.run(dir.path(), &["init", "-input=false", "-no-color"]).await?;
        let stdout = self.run(dir.path(), &["providers", "schema", "-json"]).await?;
        Ok(SchemaDocument::from_slice(&stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aws() -> ProviderSpec {
        "aws=hashicorp/aws:4.49.0".parse().unwrap()
    }

    #[test]
    fn test_required_providers_config() {
        insta::assert_snapshot!(required_providers_config(&aws()), @r#"
        terraform {
          required_providers {
            aws = {
              source  = "hashicorp/aws"
              version = "4.49.0"
            }
          }
        }
        "#);
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"format_version": "1.0", "provider_schemas": {"hashicorp/aws": {}}}"#).unwrap();
        let doc = FileSchemaSource::new(&path).fetch(&aws()).await.unwrap();
        assert!(doc.provider_schemas.contains_key("hashicorp/aws"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSchemaSource::new(dir.path().join("nope.json")).fetch(&aws()).await.unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[tokio::test]
    async fn test_missing_terraform_binary() {
        let source = TerraformCliSource::new("/nonexistent/terraform-binary");
        let err = source.fetch(&aws()).await.unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }));
    }
}
