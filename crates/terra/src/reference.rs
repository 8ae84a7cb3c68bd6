//! Untyped references.
//!
//! A [`Reference`] is a root (a resource or data source address) followed by traversal steps. It renders as a
//! Terraform traversal (`aws_instance.web.ebs[0].size`) and, when used in place of a value, as an interpolation
//! (`${aws_instance.web.ebs[0].size}`).

use std::fmt;

use serde::{Serialize, Serializer};

/// The entity a reference starts from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Root {
    /// A managed resource: `<type>.<name>`.
    Resource { resource_type: String, name: String },
    /// A data source: `data.<type>.<name>`.
    DataSource { data_source_type: String, name: String },
}

/// One traversal step after the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Attribute access (`.name`).
    Attribute(String),
    /// Nested block access (`.name`).
    Block(String),
    /// List element (`[0]`).
    Index(usize),
    /// Map element (`["key"]`).
    Key(String),
    /// Splat (`[*]`).
    Splat,
}

/// Symbolic path to an entity, or to an attribute or block of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    root: Root,
    steps: Vec<Step>,
}

impl Reference {
    /// Reference a managed resource.
    pub fn resource(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: Root::Resource {
                resource_type: resource_type.into(),
                name: name.into(),
            },
            steps: Vec::new(),
        }
    }

    /// Reference a data source.
    pub fn data_source(data_source_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: Root::DataSource {
                data_source_type: data_source_type.into(),
                name: name.into(),
            },
            steps: Vec::new(),
        }
    }

    fn with_step(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    /// Extend with an attribute step.
    pub fn attribute(&self, name: &str) -> Self {
        self.with_step(Step::Attribute(name.to_string()))
    }

    /// Extend with a nested block step.
    pub fn block(&self, name: &str) -> Self {
        self.with_step(Step::Block(name.to_string()))
    }

    /// Extend with a list index step.
    pub fn index(&self, index: usize) -> Self {
        self.with_step(Step::Index(index))
    }

    /// Extend with a map key step.
    pub fn key(&self, key: &str) -> Self {
        self.with_step(Step::Key(key.to_string()))
    }

    /// Extend with a splat step.
    pub fn splat(&self) -> Self {
        self.with_step(Step::Splat)
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Render as an interpolation (`${...}`), the form used where a value is expected.
    pub fn interpolation(&self) -> String {
        format!("${{{self}}}")
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Root::Resource { resource_type, name } => write!(f, "{resource_type}.{name}")?,
            Root::DataSource { data_source_type, name } => write!(f, "data.{data_source_type}.{name}")?,
        }
        for step in &self.steps {
            match step {
                Step::Attribute(name) | Step::Block(name) => write!(f, ".{name}")?,
                Step::Index(index) => write!(f, "[{index}]")?,
                Step::Key(key) => {
                    // HCL string literals share JSON's escapes.
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "[{quoted}]")?
                }
                Step::Splat => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.interpolation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_traversal_renders() {
        let r = Reference::resource("aws_instance", "web")
            .block("ebs_block_device")
            .index(0)
            .attribute("volume_size");
        assert_eq!(r.to_string(), "aws_instance.web.ebs_block_device[0].volume_size");
    }

    #[test]
    fn test_data_source_prefix_and_keys() {
        let r = Reference::data_source("aws_ami", "ubuntu").attribute("tags").key("Name");
        assert_eq!(r.to_string(), r#"data.aws_ami.ubuntu.tags["Name"]"#);
    }

    #[test]
    fn test_keys_use_string_literal_escapes() {
        let r = Reference::resource("aws_instance", "web")
            .attribute("tags")
            .key("line\nbreak \"q\" \u{1} é");
        assert_eq!(r.to_string(), r#"aws_instance.web.tags["line\nbreak \"q\" \u0001 é"]"#);
    }

    #[test]
    fn test_interpolation_wraps_path() {
        let r = Reference::resource("aws_vpc", "main").attribute("id");
        assert_eq!(r.interpolation(), "${aws_vpc.main.id}");
        assert_eq!(serde_json::to_string(&r).ok().as_deref(), Some(r#""${aws_vpc.main.id}""#));
    }

    #[test]
    fn test_steps_do_not_mutate_base() {
        let base = Reference::resource("aws_vpc", "main");
        let _ = base.attribute("id").splat();
        assert!(base.steps().is_empty());
    }
}
