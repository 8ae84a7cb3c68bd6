//! Entity contracts implemented by generated bindings.
//!
//! The traits are object-safe so a rendering layer can hold heterogeneous entities (`Vec<Box<dyn Resource>>`).

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::lifecycle::{DependsOn, Lifecycle};
use crate::reference::Reference;

/// Rendered configuration body of one entity (Terraform JSON syntax).
pub type Configuration = serde_json::Value;

/// Failure to render an argument record.
#[derive(Debug, Error)]
#[error("failed to render configuration: {0}")]
pub struct ConfigurationError(#[from] serde_json::Error);

/// Failure to decode a state payload.
#[derive(Debug, Error)]
#[error("failed to decode state: {0}")]
pub struct StateError(#[from] serde_json::Error);

/// Render an argument record into a configuration body.
pub fn configuration<A: Serialize + ?Sized>(args: &A) -> Result<Configuration, ConfigurationError> {
    Ok(serde_json::to_value(args)?)
}

/// Decode a JSON state payload (the `values` object of one resource in `terraform show -json`).
pub fn decode_state<S: DeserializeOwned>(payload: &[u8]) -> Result<S, StateError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Entities other entities can point at.
pub trait Referencable {
    /// The reference to this entity itself (`aws_instance.web`).
    fn reference(&self) -> Reference;
}

/// Provider configuration.
pub trait Provider {
    fn local_name(&self) -> &str;
    /// Source address (`hashicorp/aws`).
    fn source(&self) -> &str;
    fn version(&self) -> &str;
    fn configuration(&self) -> Result<Configuration, ConfigurationError>;
}

/// A managed resource.
pub trait Resource: Referencable {
    fn resource_type(&self) -> &'static str;
    fn local_name(&self) -> &str;
    fn configuration(&self) -> Result<Configuration, ConfigurationError>;
    fn dependencies(&self) -> &DependsOn;
    fn lifecycle_management(&self) -> Option<&Lifecycle>;
    /// Replace the decoded state from a JSON payload.
    fn import_state(&mut self, payload: &[u8]) -> Result<(), StateError>;
}

/// A read-only data source.
pub trait DataSource: Referencable {
    fn data_source_type(&self) -> &'static str;
    fn local_name(&self) -> &str;
    fn configuration(&self) -> Result<Configuration, ConfigurationError>;
}
