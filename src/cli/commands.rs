//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{GenerateConfig, ModulePath, parse_provider_specs};
use crate::driver::{self, FileSchemaSource, GenerateReport, SchemaSource, TerraformCliSource};

use super::{CliError, CliResult, ExitCode, GenerateArgs};

/// Validate the arguments into a [`GenerateConfig`]. Nothing is fetched or written.
pub fn build_config(args: &GenerateArgs) -> CliResult<GenerateConfig> {
    let providers = parse_provider_specs(&args.providers).map_err(|e| CliError::usage(format!("error: {e}")))?;
    let module_path: ModulePath = args
        .module_path
        .parse()
        .map_err(|e| CliError::usage(format!("error: {e}")))?;
    if args.timeout == 0 {
        return Err(CliError::usage("error: --timeout must be at least one second"));
    }
    Ok(GenerateConfig::new(&args.out, providers)
        .with_module_path(module_path)
        .with_force(args.force)
        .with_timeout(Duration::from_secs(args.timeout)))
}

/// `terragen generate`
pub fn generate(args: GenerateArgs) -> CliResult<ExitCode> {
    let config = build_config(&args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("error: failed to start async runtime: {e}")))?;

    let report = match args.schema {
        Some(path) => runtime.block_on(run(&config, FileSchemaSource::new(path))),
        None => runtime.block_on(run(&config, TerraformCliSource::new(args.terraform))),
    }?;

    let success = report.is_success();
    for failure in report.failures {
        eprintln!("{:?}", miette::Report::new(failure));
    }
    for provider in &report.providers {
        eprintln!(
            "{}: {} entities, {} files",
            provider.local_name, provider.entities, provider.files
        );
    }
    Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run<S: SchemaSource>(config: &GenerateConfig, source: S) -> CliResult<GenerateReport> {
    let report = driver::generate(config, Arc::new(source))
        .await
        .map_err(|e| CliError::failure(format!("{:?}", miette::Report::new(e))))?;
    if !report.is_success() {
        tracing::warn!(failures = report.failures.len(), "generation finished with failures");
    }
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(providers: &[&str]) -> GenerateArgs {
        GenerateArgs {
            out: PathBuf::from("gen"),
            module_path: "crate::terra_gen".to_string(),
            force: false,
            providers: providers.iter().map(|p| p.to_string()).collect(),
            schema: None,
            terraform: PathBuf::from("terraform"),
            timeout: 300,
        }
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&args(&["aws=hashicorp/aws:4.49.0"])).unwrap();
        assert_eq!(config.providers[0].local_name, "aws");
        assert_eq!(config.module_path.to_string(), "crate::terra_gen");
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_malformed_spec_is_usage_error() {
        for bad in ["awshashicorp/aws:4.49.0", "aws=hashicorp/aws"] {
            let err = build_config(&args(&[bad])).unwrap_err();
            assert_eq!(err.exit_code, ExitCode::USAGE);
            assert!(err.message.contains(bad));
        }
    }

    #[test]
    fn test_duplicate_local_name_is_usage_error() {
        let err = build_config(&args(&["aws=hashicorp/aws:1.0.0", "aws=hashicorp/aws:2.0.0"])).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::USAGE);
    }

    #[test]
    fn test_invalid_module_path_is_usage_error() {
        let mut bad = args(&["aws=hashicorp/aws:1.0.0"]);
        bad.module_path = "crate::fn".to_string();
        assert_eq!(build_config(&bad).unwrap_err().exit_code, ExitCode::USAGE);
    }
}
