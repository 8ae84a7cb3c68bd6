//! Meta-arguments shared by every managed resource.

use serde::{Serialize, Serializer};

use crate::entity::Referencable;
use crate::reference::Reference;

/// Explicit dependencies (`depends_on`).
///
/// Serialises as a list of traversal paths (`["aws_vpc.main"]`), not interpolations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependsOn(Vec<Reference>);

impl DependsOn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depend on an entity.
    pub fn on(mut self, entity: &dyn Referencable) -> Self {
        self.0.push(entity.reference());
        self
    }

    pub fn push(&mut self, reference: Reference) {
        self.0.push(reference);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.0.iter()
    }
}

impl FromIterator<Reference> for DependsOn {
    fn from_iter<I: IntoIterator<Item = Reference>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for DependsOn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

fn serialize_paths<S: Serializer>(references: &[Reference], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(references.iter().map(ToString::to_string))
}

/// Resource lifecycle policy (`lifecycle { ... }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lifecycle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_before_destroy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_destroy: Option<bool>,
    /// Attribute names whose drift is ignored.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_changes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_paths")]
    pub replace_triggered_by: Vec<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depends_on_serializes_paths() {
        let deps: DependsOn = [Reference::resource("aws_vpc", "main"), Reference::data_source("aws_ami", "x")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&deps).ok().as_deref(),
            Some(r#"["aws_vpc.main","data.aws_ami.x"]"#)
        );
    }

    #[test]
    fn test_empty_lifecycle_serializes_empty_object() {
        assert_eq!(serde_json::to_string(&Lifecycle::default()).ok().as_deref(), Some("{}"));
    }

    #[test]
    fn test_lifecycle_fields() {
        let lifecycle = Lifecycle {
            prevent_destroy: Some(true),
            replace_triggered_by: vec![Reference::resource("aws_instance", "web").attribute("id")],
            ..Lifecycle::default()
        };
        assert_eq!(
            serde_json::to_string(&lifecycle).ok().as_deref(),
            Some(r#"{"prevent_destroy":true,"replace_triggered_by":["aws_instance.web.id"]}"#)
        );
    }
}
