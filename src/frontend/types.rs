//! Type descriptors.
//!
//! The closed set of attribute types the compiler understands, decoded from the cty JSON encoding used in schema
//! documents (`"string"`, `["list", "string"]`, `["object", {"a": "number"}, ["a"]]`).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

use super::errors::TypeError;

/// Collection wrapper between a parent and an embedded object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestingMode {
    Single,
    List,
    Set,
    Map,
}

/// A cty type restricted to what bindings can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Bool,
    String,
    Number,
    List(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>),
    Object(ObjectType),
}

/// Fields of an object type. Fields are mandatory unless listed in `optional`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectType {
    pub fields: BTreeMap<String, TypeDescriptor>,
    pub optional: BTreeSet<String>,
}

impl TypeDescriptor {
    /// Decode a cty JSON type expression.
    ///
    /// ## Errors
    /// - [`TypeError::Unsupported`] for well-formed types outside the closed set (`dynamic`, `tuple`, ...).
    /// - [`TypeError::Malformed`] for anything that is not a cty type expression.
    pub fn from_cty(value: &Value) -> Result<Self, TypeError> {
        match value {
            Value::String(name) => match name.as_str() {
                "bool" => Ok(TypeDescriptor::Bool),
                "string" => Ok(TypeDescriptor::String),
                "number" => Ok(TypeDescriptor::Number),
                other => Err(TypeError::Unsupported(other.to_string())),
            },
            Value::Array(items) => {
                let Some(Value::String(kind)) = items.first() else {
                    return Err(TypeError::Malformed(value.to_string()));
                };
                match (kind.as_str(), &items[1..]) {
                    ("list", [elem]) => Ok(TypeDescriptor::List(Box::new(Self::from_cty(elem)?))),
                    ("set", [elem]) => Ok(TypeDescriptor::Set(Box::new(Self::from_cty(elem)?))),
                    ("map", [elem]) => Ok(TypeDescriptor::Map(Box::new(Self::from_cty(elem)?))),
                    ("object", [Value::Object(fields)]) => Self::object(fields, None),
                    ("object", [Value::Object(fields), Value::Array(optional)]) => {
                        Self::object(fields, Some(optional))
                    }
                    ("list" | "set" | "map" | "object", _) => Err(TypeError::Malformed(value.to_string())),
                    (other, _) => Err(TypeError::Unsupported(other.to_string())),
                }
            }
            _ => Err(TypeError::Malformed(value.to_string())),
        }
    }

    fn object(fields: &serde_json::Map<String, Value>, optional: Option<&Vec<Value>>) -> Result<Self, TypeError> {
        let mut object = ObjectType::default();
        for (name, ty) in fields {
            object.fields.insert(name.clone(), Self::from_cty(ty)?);
        }
        for name in optional.into_iter().flatten() {
            let Value::String(name) = name else {
                return Err(TypeError::Malformed(name.to_string()));
            };
            object.optional.insert(name.clone());
        }
        Ok(TypeDescriptor::Object(object))
    }

    /// Peel List/Set/Map wrappers, outermost first.
    ///
    /// Returns the wrappers crossed and the innermost type.
    pub fn unwrap_collections(&self) -> (Vec<NestingMode>, &TypeDescriptor) {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            current = match current {
                TypeDescriptor::List(elem) => {
                    path.push(NestingMode::List);
                    &**elem
                }
                TypeDescriptor::Set(elem) => {
                    path.push(NestingMode::Set);
                    &**elem
                }
                TypeDescriptor::Map(elem) => {
                    path.push(NestingMode::Map);
                    &**elem
                }
                _ => return (path, current),
            };
        }
    }

    /// The object shape this type embeds, if any.
    pub fn embedded_object(&self) -> Option<(Vec<NestingMode>, &ObjectType)> {
        match self.unwrap_collections() {
            (path, TypeDescriptor::Object(object)) => Some((path, object)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::String => f.write_str("string"),
            TypeDescriptor::Number => f.write_str("number"),
            TypeDescriptor::List(elem) => write!(f, "list({elem})"),
            TypeDescriptor::Set(elem) => write!(f, "set({elem})"),
            TypeDescriptor::Map(elem) => write!(f, "map({elem})"),
            TypeDescriptor::Object(object) => {
                f.write_str("object({")?;
                for (i, (name, ty)) in object.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if object.optional.contains(name) {
                        write!(f, "{name} = optional({ty})")?;
                    } else {
                        write!(f, "{name} = {ty}")?;
                    }
                }
                f.write_str("})")
            }
        }
    }
}
