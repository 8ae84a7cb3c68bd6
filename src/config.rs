//! Generation configuration
//!
//! Everything a run needs is collected into one immutable [`GenerateConfig`] up front and passed down explicitly.
//! Provider specifications and the output module path are validated here, before any schema is fetched.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use terragen_core::lang::rust_keywords;
use terragen_core::naming;

/// Default Rust module the output directory is mounted at.
pub const DEFAULT_MODULE_PATH: &str = "crate::terra_gen";

/// Default bound on acquiring one provider's schema.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Invalid command-line configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid provider spec `{spec}`: {reason} (expected `<local>=<source>:<version>`)")]
    ProviderSpec { spec: String, reason: &'static str },

    #[error("provider local name `{0}` is given more than once")]
    DuplicateLocalName(String),

    #[error("provider local names `{first}` and `{second}` both generate module `{module}`")]
    ModuleCollision {
        first: String,
        second: String,
        module: String,
    },

    #[error("invalid module path `{path}`: {reason}")]
    ModulePath { path: String, reason: &'static str },
}

/// One requested provider: `aws=hashicorp/aws:4.49.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderSpec {
    pub local_name: String,
    pub source: String,
    pub version: String,
}

impl FromStr for ProviderSpec {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ConfigError::ProviderSpec {
            spec: spec.to_string(),
            reason,
        };
        let (local_name, rest) = spec.split_once('=').ok_or_else(|| invalid("missing `=`"))?;
        let (source, version) = rest.rsplit_once(':').ok_or_else(|| invalid("missing `:<version>`"))?;
        if local_name.is_empty() {
            return Err(invalid("empty local name"));
        }
        if source.is_empty() {
            return Err(invalid("empty source address"));
        }
        if version.is_empty() {
            return Err(invalid("empty version"));
        }
        let valid_local = local_name.starts_with(|c: char| c.is_ascii_alphabetic())
            && local_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_local {
            return Err(invalid("local name must start with a letter and contain only letters, digits, `_` or `-`"));
        }
        Ok(Self {
            local_name: local_name.to_string(),
            source: source.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}:{}", self.local_name, self.source, self.version)
    }
}

/// Parse every provider spec and reject duplicate local names.
///
/// ## Examples
/// ```rust
/// use terragen::config::parse_provider_specs;
///
/// let specs = parse_provider_specs(["aws=hashicorp/aws:4.49.0"]).unwrap();
/// assert_eq!(specs[0].source, "hashicorp/aws");
/// assert!(parse_provider_specs(["aws=hashicorp/aws:1", "aws=hashicorp/aws:2"]).is_err());
/// assert!(parse_provider_specs(["g-b=acme/g-b:1", "g_b=acme/g_b:1"]).is_err());
/// ```
pub fn parse_provider_specs<I, S>(specs: I) -> Result<Vec<ProviderSpec>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for spec in specs {
        let spec: ProviderSpec = spec.as_ref().parse()?;
        if !seen.insert(spec.local_name.clone()) {
            return Err(ConfigError::DuplicateLocalName(spec.local_name));
        }
        out.push(spec);
    }
    check_provider_modules(&out)?;
    Ok(out)
}

/// Reject providers whose local names normalize to the same output module (`google-beta`, `google_beta`).
///
/// ## Errors
/// - [`ConfigError::ModuleCollision`] naming the first pair found, in request order.
pub fn check_provider_modules(providers: &[ProviderSpec]) -> Result<(), ConfigError> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    for spec in providers {
        let module = naming::module_name(&spec.local_name);
        let stem = naming::module_file_stem(&module).to_string();
        if let Some(first) = owners.insert(stem, &spec.local_name) {
            return Err(ConfigError::ModuleCollision {
                first: first.to_string(),
                second: spec.local_name.clone(),
                module,
            });
        }
    }
    Ok(())
}

/// An absolute Rust module path such as `crate::terra_gen`.
///
/// Generated files import each other through this path, so it must start at `crate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Extend with one more segment (no validation; callers pass escaped module names).
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }
}

impl Default for ModulePath {
    fn default() -> Self {
        Self {
            segments: DEFAULT_MODULE_PATH.split("::").map(str::to_string).collect(),
        }
    }
}

impl FromStr for ModulePath {
    type Err = ConfigError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ConfigError::ModulePath {
            path: path.to_string(),
            reason,
        };
        let segments: Vec<String> = path.split("::").map(str::to_string).collect();
        if segments[0] != "crate" {
            return Err(invalid("the path must start with `crate`"));
        }
        for segment in &segments[1..] {
            let ident_like = segment.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !ident_like {
                return Err(invalid("every segment must be a Rust identifier"));
            }
            if rust_keywords::is_keyword(segment) || segment == "_" {
                return Err(invalid("segments after `crate` may not be keywords"));
            }
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// Immutable configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Output directory; mounted at `module_path` in the consuming crate.
    pub out_dir: PathBuf,
    pub module_path: ModulePath,
    /// Clear a non-empty `out_dir` instead of failing.
    pub force: bool,
    pub providers: Vec<ProviderSpec>,
    /// Bound on acquiring one provider's schema.
    pub timeout: Duration,
}

impl GenerateConfig {
    pub fn new(out_dir: impl Into<PathBuf>, providers: Vec<ProviderSpec>) -> Self {
        Self {
            out_dir: out_dir.into(),
            module_path: ModulePath::default(),
            force: false,
            providers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_module_path(mut self, module_path: ModulePath) -> Self {
        self.module_path = module_path;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_spec() {
        let spec: ProviderSpec = "aws=hashicorp/aws:4.49.0".parse().unwrap();
        assert_eq!(
            spec,
            ProviderSpec {
                local_name: "aws".to_string(),
                source: "hashicorp/aws".to_string(),
                version: "4.49.0".to_string(),
            }
        );
        assert_eq!(spec.to_string(), "aws=hashicorp/aws:4.49.0");
    }

    #[test]
    fn test_provider_spec_rejections() {
        for bad in [
            "awshashicorp/aws:4.49.0",
            "aws=hashicorp/aws",
            "=hashicorp/aws:1.0",
            "aws=:1.0",
            "aws=hashicorp/aws:",
            "9aws=hashicorp/aws:1.0",
        ] {
            assert!(bad.parse::<ProviderSpec>().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_version_split_uses_last_colon() {
        let spec: ProviderSpec = "k=registry.example.com:8443/acme/k:~> 1.2".parse().unwrap();
        assert_eq!(spec.source, "registry.example.com:8443/acme/k");
        assert_eq!(spec.version, "~> 1.2");
    }

    #[test]
    fn test_duplicate_local_names() {
        let err = parse_provider_specs(["aws=hashicorp/aws:1.0", "aws=hashicorp/aws:2.0"]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLocalName("aws".to_string()));
    }

    #[test]
    fn test_module_path_validation() {
        assert_eq!(ModulePath::default().to_string(), "crate::terra_gen");
        assert!("crate::infra::generated".parse::<ModulePath>().is_ok());
        assert!("crate".parse::<ModulePath>().is_ok());
        assert!("crate::type".parse::<ModulePath>().is_err());
        assert!("infra::crate".parse::<ModulePath>().is_err());
        assert!("crate::".parse::<ModulePath>().is_err());
        assert!("crate::my-mod".parse::<ModulePath>().is_err());
    }

    #[test]
    fn test_module_path_must_be_crate_rooted() {
        for relative in ["super::super::gen_out", "self::gen_out", "gen_out", "crate::super::x"] {
            let err = relative.parse::<ModulePath>().unwrap_err();
            assert!(matches!(err, ConfigError::ModulePath { .. }), "accepted {relative}");
        }
    }

    #[test]
    fn test_local_names_sharing_a_module_are_rejected() {
        let err = parse_provider_specs(["google-beta=hashicorp/google-beta:1.0.0", "google_beta=acme/google_beta:1.0.0"])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ModuleCollision {
                first: "google-beta".to_string(),
                second: "google_beta".to_string(),
                module: "google_beta".to_string(),
            }
        );
        assert!(parse_provider_specs(["google=hashicorp/google:1", "google-beta=hashicorp/google-beta:1"]).is_ok());
    }
}
