//! End-to-end generation tests: schema document in, Rust files on disk out.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use terragen::config::{ConfigError, GenerateConfig, ProviderSpec, parse_provider_specs};
use terragen::driver::{FileSchemaSource, GenerateError, SchemaSource, SourceError, generate};
use terragen::frontend::SchemaDocument;

const SCHEMA: &str = r#"{
    "format_version": "1.0",
    "provider_schemas": {
        "registry.terraform.io/hashicorp/aws": {
            "provider": {"version": 0, "block": {"attributes": {"region": {"type": "string", "optional": true}}}},
            "resource_schemas": {
                "aws_instance": {"version": 1, "block": {
                    "attributes": {
                        "name": {"type": "string", "required": true, "description": "Instance name."},
                        "id": {"type": "string", "computed": true}
                    },
                    "block_types": {
                        "ebs": {"nesting_mode": "single", "min_items": 0, "max_items": 1, "block": {
                            "attributes": {"size": {"type": "number", "optional": true}}
                        }},
                        "network": {"nesting_mode": "single", "min_items": 1, "max_items": 1, "block": {
                            "attributes": {"subnet_id": {"type": "string", "required": true}}
                        }}
                    }
                }},
                "aws_security_group": {"version": 0, "block": {
                    "block_types": {
                        "ingress": {"nesting_mode": "set", "block": {
                            "attributes": {"port": {"type": "number", "required": true}}
                        }}
                    }
                }},
                "aws_pipeline": {"version": 0, "block": {
                    "block_types": {
                        "a": {"nesting_mode": "single", "block": {"block_types": {
                            "config": {"nesting_mode": "single", "block": {"attributes": {"x": {"type": "string", "optional": true}}}}
                        }}},
                        "a_config": {"nesting_mode": "single", "block": {"attributes": {"z": {"type": "number", "optional": true}}}},
                        "b": {"nesting_mode": "single", "block": {"block_types": {
                            "config": {"nesting_mode": "single", "block": {"attributes": {"y": {"type": "bool", "optional": true}}}}
                        }}}
                    }
                }},
                "aws_lb": {"version": 0, "block": {
                    "block_types": {
                        "rule": {"nesting_mode": "list", "block": {"attributes": {"priority": {"type": "number", "optional": true}}}},
                        "rule_state": {"nesting_mode": "single", "block": {"attributes": {"enabled": {"type": "bool", "optional": true}}}}
                    }
                }},
                "aws_broken": {"version": 0, "block": {"attributes": {"any": {"type": "dynamic", "optional": true}}}}
            },
            "data_source_schemas": {
                "aws_ami": {"version": 0, "block": {"attributes": {
                    "owners": {"type": ["list", "string"], "optional": true},
                    "id": {"type": "string", "computed": true}
                }}}
            }
        },
        "registry.terraform.io/hashicorp/google-beta": {
            "provider": {"version": 0, "block": {"attributes": {"project": {"type": "string", "optional": true}}}},
            "resource_schemas": {
                "google_compute_network": {"version": 0, "block": {"attributes": {"name": {"type": "string", "required": true}}}}
            }
        },
        "hashicorp/random": {
            "provider": {"version": 0, "block": {}},
            "resource_schemas": {
                "random_id": {"version": 0, "block": {"attributes": {"byte_length": {"type": "number", "required": true}}}}
            }
        }
    }
}"#;

struct Fixture {
    _root: tempfile::TempDir,
    schema: std::path::PathBuf,
    out: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let root = tempfile::tempdir().unwrap();
    let schema = root.path().join("schema.json");
    fs::write(&schema, SCHEMA).unwrap();
    let out = root.path().join("gen");
    Fixture {
        _root: root,
        schema,
        out,
    }
}

fn config(out: &Path, specs: &[&str]) -> GenerateConfig {
    GenerateConfig::new(out, parse_provider_specs(specs).unwrap())
}

fn read(out: &Path, path: &str) -> String {
    fs::read_to_string(out.join(path)).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

fn listing(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(next) = stack.pop() {
        for entry in fs::read_dir(&next).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path.strip_prefix(dir).unwrap();
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

#[tokio::test]
async fn test_generates_provider_tree() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();

    assert_eq!(report.providers.len(), 1);
    assert_eq!(report.providers[0].local_name, "aws");
    assert_eq!(report.providers[0].entities, 7);
    assert_eq!(
        listing(&fx.out),
        vec![
            "aws/data_aws_ami.rs",
            "aws/instance.rs",
            "aws/lb.rs",
            "aws/mod.rs",
            "aws/pipeline.rs",
            "aws/provider.rs",
            "aws/resource_aws_instance.rs",
            "aws/resource_aws_lb.rs",
            "aws/resource_aws_pipeline.rs",
            "aws/resource_aws_security_group.rs",
            "aws/security_group.rs",
            "mod.rs",
        ]
    );
    assert_eq!(report.files_written(), listing(&fx.out).len());

    // The unsupported type fails its own entity only.
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        GenerateError::Compile { provider, entity, .. } => {
            assert_eq!(provider, "aws");
            assert_eq!(entity, "resource `aws_broken`");
        }
        other => panic!("unexpected failure {other:?}"),
    }
    assert!(!report.is_success());

    assert_eq!(
        read(&fx.out, "mod.rs"),
        format!(
            "// Code generated by terragen v{}. DO NOT EDIT.\n\n//! Generated provider bindings.\npub mod aws;\n",
            terragen::version::TERRAGEN_VERSION
        )
    );
}

#[tokio::test]
async fn test_required_attribute_is_the_only_required_field() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();

    let instance = read(&fx.out, "aws/resource_aws_instance.rs");
    assert!(instance.contains("    pub name: terra::StringValue,\n"));
    assert!(instance.contains("Instance name."));
    // computed-only attributes are not arguments
    assert!(!instance.contains("pub id: terra::StringValue"));
    assert!(instance.contains("pub fn id(&self) -> terra::StringRef"));
    // a singular block is an optional record of the namespace
    assert!(instance.contains("pub ebs: Option<instance::Ebs>,"));
    assert!(read(&fx.out, "aws/instance.rs").contains("pub size: Option<terra::NumberValue>,"));
}

#[tokio::test]
async fn test_required_single_block_stays_nullable() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();

    let instance = read(&fx.out, "aws/resource_aws_instance.rs");
    let field = instance
        .find("pub network: Option<instance::Network>,")
        .expect("network is an optional record");
    let docs = &instance[instance.find("pub ebs: Option<instance::Ebs>,").unwrap()..field];
    assert!(docs.contains("Required."), "{docs}");
    assert!(docs.contains("Exactly 1 item(s)."), "{docs}");
    assert!(docs.contains("skip_serializing_if = \"Option::is_none\""), "{docs}");
    assert!(instance.contains("pub network: Option<instance::NetworkState>,"));
}

#[tokio::test]
async fn test_set_block_is_a_collection() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();

    let group = read(&fx.out, "aws/resource_aws_security_group.rs");
    assert!(group.contains("pub ingress: Vec<security_group::Ingress>,"));
    assert!(group.contains("pub fn ingress(&self) -> terra::SetRef<security_group::IngressAttributes>"));
    assert!(group.contains("pub ingress: Vec<security_group::IngressState>,"));
}

#[tokio::test]
async fn test_same_named_blocks_get_distinct_records() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();

    let namespace = read(&fx.out, "aws/pipeline.rs");
    assert!(namespace.contains("pub struct AConfig {"));
    assert!(namespace.contains("pub struct BConfig {"));
    assert!(namespace.contains("pub config: Option<AConfig>,"));
    assert!(namespace.contains("pub config: Option<BConfig>,"));
    assert!(!namespace.contains("pub struct Config {"));
    // `a.config` and the top-level `a_config` would both render `AConfig`.
    assert!(namespace.contains("pub struct AConfigBlock {"));
    assert!(namespace.contains("pub struct AConfigBlockState {"));
    assert!(read(&fx.out, "aws/resource_aws_pipeline.rs").contains("pub a_config: Option<pipeline::AConfigBlock>,"));
}

#[tokio::test]
async fn test_record_suffix_collisions_are_generated() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();
    assert!(report.failures.iter().all(|f| !f.to_string().contains("aws_lb")));

    // `rule` owns `RuleState`; `rule_state` moves to `RuleStateBlock`.
    let namespace = read(&fx.out, "aws/lb.rs");
    for record in [
        "Rule",
        "RuleAttributes",
        "RuleState",
        "RuleStateBlock",
        "RuleStateBlockAttributes",
        "RuleStateBlockState",
    ] {
        assert_eq!(namespace.matches(&format!("pub struct {record} {{")).count(), 1, "{record}");
    }
    let lb = read(&fx.out, "aws/resource_aws_lb.rs");
    assert!(lb.contains("pub rule: Vec<lb::Rule>,"));
    assert!(lb.contains("pub rule_state: Option<lb::RuleStateBlock>,"));
    assert!(lb.contains("pub fn rule_state(&self) -> lb::RuleStateBlockAttributes"));
}

#[tokio::test]
async fn test_multiple_providers_and_registry_fallback() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(
        &config(&fx.out, &["random=hashicorp/random:3.4.0", "aws=hashicorp/aws:4.49.0"]),
        source,
    )
    .await
    .unwrap();

    let names: Vec<&str> = report.providers.iter().map(|p| p.local_name.as_str()).collect();
    assert_eq!(names, vec!["random", "aws"]);
    let root = read(&fx.out, "mod.rs");
    assert!(root.ends_with("pub mod aws;\npub mod random;\n"));
    assert!(read(&fx.out, "random/resource_random_id.rs").contains("pub struct Id {"));
}

#[tokio::test]
async fn test_local_name_is_normalized_to_a_module() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(&config(&fx.out, &["google-beta=hashicorp/google-beta:4.0.0"]), source)
        .await
        .unwrap();

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(
        listing(&fx.out),
        vec![
            "google_beta/mod.rs",
            "google_beta/provider.rs",
            "google_beta/resource_google_compute_network.rs",
            "mod.rs",
        ]
    );
    assert!(read(&fx.out, "mod.rs").ends_with("//! Generated provider bindings.\npub mod google_beta;\n"));
    assert!(read(&fx.out, "google_beta/mod.rs").contains("`google-beta` provider"));
}

#[tokio::test]
async fn test_local_names_sharing_a_module_are_rejected() {
    let specs = ["google-beta=hashicorp/google-beta:4.0.0", "google_beta=acme/google_beta:1.0.0"];
    assert!(matches!(
        parse_provider_specs(specs),
        Err(ConfigError::ModuleCollision { ref module, .. }) if module == "google_beta"
    ));

    // A config assembled without `parse_provider_specs` is rejected before anything is written.
    let fx = fixture();
    let providers = specs.iter().map(|spec| spec.parse().unwrap()).collect();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let err = generate(&GenerateConfig::new(&fx.out, providers), source)
        .await
        .unwrap_err();
    match err {
        GenerateError::Config(ConfigError::ModuleCollision { first, second, module }) => {
            assert_eq!((first.as_str(), second.as_str()), ("google-beta", "google_beta"));
            assert_eq!(module, "google_beta");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!fx.out.exists());
}

#[tokio::test]
async fn test_unknown_provider_is_reported_and_siblings_continue() {
    let fx = fixture();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(
        &config(&fx.out, &["gcp=hashicorp/google:4.0.0", "random=hashicorp/random:3.4.0"]),
        source,
    )
    .await
    .unwrap();

    assert_eq!(report.providers.len(), 1);
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        GenerateError::SchemaNotFound {
            local_name,
            source_address,
            available,
        } => {
            assert_eq!(local_name, "gcp");
            assert_eq!(source_address, "hashicorp/google");
            assert!(available.contains("registry.terraform.io/hashicorp/aws"));
        }
        other => panic!("unexpected failure {other:?}"),
    }
    assert!(!fx.out.join("gcp").exists());
    assert!(read(&fx.out, "mod.rs").ends_with("//! Generated provider bindings.\npub mod random;\n"));
}

#[tokio::test]
async fn test_populated_directory_requires_force() {
    let fx = fixture();
    fs::create_dir_all(&fx.out).unwrap();
    fs::write(fx.out.join("stale.rs"), "// stale\n").unwrap();

    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let err = generate(&config(&fx.out, &["random=hashicorp/random:3.4.0"]), Arc::clone(&source))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Output(_)));
    assert!(err.to_string().contains("is not empty"));
    assert!(fx.out.join("stale.rs").exists());

    let report = generate(
        &config(&fx.out, &["random=hashicorp/random:3.4.0"]).with_force(true),
        source,
    )
    .await
    .unwrap();
    assert!(report.is_success());
    assert!(!fx.out.join("stale.rs").exists());
    assert!(fx.out.join("random/mod.rs").exists());
}

#[tokio::test]
async fn test_output_is_byte_identical_across_runs() {
    let fx = fixture();
    let first = fx.out.join("first");
    let second = fx.out.join("second");
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let specs = ["aws=hashicorp/aws:4.49.0", "random=hashicorp/random:3.4.0"];
    generate(&config(&first, &specs), Arc::clone(&source)).await.unwrap();
    generate(&config(&second, &specs), source).await.unwrap();

    let files = listing(&first);
    assert_eq!(files, listing(&second));
    for file in files {
        assert_eq!(read(&first, &file), read(&second, &file), "{file} differs");
    }
}

/// Never answers.
struct StalledSource;

impl SchemaSource for StalledSource {
    async fn fetch(&self, _provider: &ProviderSpec) -> Result<SchemaDocument, SourceError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_schema_fetch_times_out() {
    let fx = fixture();
    let config = config(&fx.out, &["aws=hashicorp/aws:4.49.0"]).with_timeout(Duration::from_millis(20));
    let report = generate(&config, Arc::new(StalledSource)).await.unwrap();

    assert!(report.providers.is_empty());
    assert!(matches!(
        report.failures.as_slice(),
        [GenerateError::Timeout { provider, .. }] if provider == "aws"
    ));
    // The root index is still written, declaring nothing.
    assert!(read(&fx.out, "mod.rs").ends_with("//! Generated provider bindings.\n"));
}

#[tokio::test]
async fn test_invalid_schema_document_is_a_source_failure() {
    let fx = fixture();
    fs::write(&fx.schema, "{not json").unwrap();
    let source = Arc::new(FileSchemaSource::new(&fx.schema));
    let report = generate(&config(&fx.out, &["aws=hashicorp/aws:4.49.0"]), source)
        .await
        .unwrap();
    assert!(matches!(
        report.failures.as_slice(),
        [GenerateError::Source {
            source: SourceError::Schema(_),
            ..
        }]
    ));
}
