//! Assemble entities into one Terraform JSON configuration document.
//!
//! ```rust
//! use terra::Document;
//!
//! let doc = Document::new();
//! assert_eq!(doc.to_json(), serde_json::json!({}));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

use crate::entity::{Configuration, ConfigurationError, DataSource, Provider, Resource};

type Blocks = BTreeMap<String, BTreeMap<String, Configuration>>;

/// A `main.tf.json` body under construction.
#[derive(Debug, Clone, Default)]
pub struct Document {
    required_providers: BTreeMap<String, Json>,
    providers: BTreeMap<String, Configuration>,
    resources: Blocks,
    data: Blocks,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider block and its `required_providers` entry.
    pub fn provider(&mut self, provider: &dyn Provider) -> Result<&mut Self, ConfigurationError> {
        let body = provider.configuration()?;
        let local = provider.local_name().to_string();
        self.required_providers.insert(
            local.clone(),
            serde_json::json!({ "source": provider.source(), "version": provider.version() }),
        );
        self.providers.insert(local, body);
        Ok(self)
    }

    /// Add a resource block with its meta-arguments.
    pub fn resource(&mut self, resource: &dyn Resource) -> Result<&mut Self, ConfigurationError> {
        let mut body = resource.configuration()?;
        if let Json::Object(map) = &mut body {
            if !resource.dependencies().is_empty() {
                map.insert("depends_on".to_string(), serde_json::to_value(resource.dependencies())?);
            }
            if let Some(lifecycle) = resource.lifecycle_management() {
                map.insert("lifecycle".to_string(), serde_json::to_value(lifecycle)?);
            }
        }
        self.resources
            .entry(resource.resource_type().to_string())
            .or_default()
            .insert(resource.local_name().to_string(), body);
        Ok(self)
    }

    /// Add a data block.
    pub fn data_source(&mut self, data_source: &dyn DataSource) -> Result<&mut Self, ConfigurationError> {
        let body = data_source.configuration()?;
        self.data
            .entry(data_source.data_source_type().to_string())
            .or_default()
            .insert(data_source.local_name().to_string(), body);
        Ok(self)
    }

    /// Render the document. Empty sections are omitted.
    pub fn to_json(&self) -> Json {
        let mut root = Map::new();
        if !self.required_providers.is_empty() {
            root.insert(
                "terraform".to_string(),
                serde_json::json!({ "required_providers": self.required_providers }),
            );
        }
        if !self.providers.is_empty() {
            root.insert("provider".to_string(), serde_json::json!(self.providers));
        }
        if !self.resources.is_empty() {
            root.insert("resource".to_string(), serde_json::json!(self.resources));
        }
        if !self.data.is_empty() {
            root.insert("data".to_string(), serde_json::json!(self.data));
        }
        Json::Object(root)
    }

    pub fn to_string_pretty(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}
