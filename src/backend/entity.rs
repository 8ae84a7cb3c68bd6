//! Entity descriptors: one compilable unit (provider configuration, resource type, or data-source type).
//!
//! An [`Entity`] borrows its provider and schema block from the run and owns nothing else; [`EntityNames`] is every
//! name derived from it, computed once so emitters and the project writer agree.

use std::fmt;

use terragen_core::naming;

use crate::config::ProviderSpec;
use crate::frontend::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Provider,
    Resource,
    DataSource,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Provider => "provider",
            EntityKind::Resource => "resource",
            EntityKind::DataSource => "data source",
        })
    }
}

/// One compilable unit.
#[derive(Debug, Clone, Copy)]
pub struct Entity<'a> {
    pub kind: EntityKind,
    /// Terraform type name (`aws_instance`); the provider's local name for [`EntityKind::Provider`].
    pub type_name: &'a str,
    pub provider: &'a ProviderSpec,
    pub block: &'a schema::Block,
}

impl<'a> Entity<'a> {
    pub fn provider(provider: &'a ProviderSpec, block: &'a schema::Block) -> Self {
        Self {
            kind: EntityKind::Provider,
            type_name: &provider.local_name,
            provider,
            block,
        }
    }

    pub fn resource(provider: &'a ProviderSpec, type_name: &'a str, block: &'a schema::Block) -> Self {
        Self {
            kind: EntityKind::Resource,
            type_name,
            provider,
            block,
        }
    }

    pub fn data_source(provider: &'a ProviderSpec, type_name: &'a str, block: &'a schema::Block) -> Self {
        Self {
            kind: EntityKind::DataSource,
            type_name,
            provider,
            block,
        }
    }

    /// Type name with the provider prefix stripped (`aws_instance` → `instance`).
    pub fn short_name(&self) -> &'a str {
        naming::short_type_name(naming::provider_type(&self.provider.source), self.type_name)
    }

    pub fn names(&self) -> EntityNames {
        EntityNames::derive(self)
    }
}

impl fmt::Display for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.type_name)
    }
}

/// Every generated name of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Primary record (`Instance`, `DataAmi`, `Provider`).
    pub record: String,
    pub args: String,
    pub attributes: String,
    pub state: String,
    /// Escaped module of the provider directory (`aws`).
    pub provider_module: String,
    /// Escaped module of the entity file (`resource_aws_instance`).
    pub module: String,
    /// Escaped module of the auxiliary namespace (`instance`, `data_ami`, `aws_config`).
    pub namespace: String,
}

impl EntityNames {
    fn derive(entity: &Entity<'_>) -> Self {
        let short = entity.short_name();
        let (record, module, namespace) = match entity.kind {
            EntityKind::Provider => (
                "Provider".to_string(),
                "provider".to_string(),
                naming::module_name(&format!("{}_config", entity.provider.local_name)),
            ),
            EntityKind::Resource => (
                naming::record_name(short),
                naming::module_name(&format!("resource_{}", entity.type_name)),
                naming::module_name(short),
            ),
            EntityKind::DataSource => (
                format!("Data{}", naming::to_pascal_case(short)),
                naming::module_name(&format!("data_{}", entity.type_name)),
                naming::module_name(&format!("data_{short}")),
            ),
        };
        Self {
            args: format!("{record}Args"),
            attributes: format!("{record}Attributes"),
            state: format!("{record}State"),
            record,
            provider_module: naming::module_name(&entity.provider.local_name),
            module,
            namespace,
        }
    }

    /// Output path of the entity file, relative to the output directory.
    pub fn file_path(&self) -> String {
        format!("{}/{}.rs", naming::module_file_stem(&self.provider_module), naming::module_file_stem(&self.module))
    }

    /// Output path of the auxiliary namespace file, relative to the output directory.
    pub fn namespace_path(&self) -> String {
        format!(
            "{}/{}.rs",
            naming::module_file_stem(&self.provider_module),
            naming::module_file_stem(&self.namespace)
        )
    }
}
