//! Argument values: a literal or a reference to another entity's output.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::reference::Reference;
use crate::refs::{BoolRef, ListRef, MapRef, NumberRef, SetRef, StringRef};

/// An argument that holds either a literal or a symbolic reference.
///
/// References serialise as interpolations (`"${aws_vpc.main.id}"`), literals as themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Literal(T),
    Reference(Reference),
}

pub type StringValue = Value<String>;
pub type NumberValue = Value<f64>;
pub type BoolValue = Value<bool>;
pub type ListValue<T> = Value<Vec<T>>;
/// Sets keep insertion order on the wire; Terraform discards it.
pub type SetValue<T> = Value<Vec<T>>;
pub type MapValue<T> = Value<BTreeMap<String, T>>;

impl<T> Value<T> {
    pub fn literal(value: impl Into<T>) -> Self {
        Value::Literal(value.into())
    }

    pub fn reference(reference: Reference) -> Self {
        Value::Reference(reference)
    }

    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Value::Literal(v) => Some(v),
            Value::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Literal(_) => None,
            Value::Reference(r) => Some(r),
        }
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Literal(v) => v.serialize(serializer),
            Value::Reference(r) => r.serialize(serializer),
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Literal(value)
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Value::Literal(value.to_string())
    }
}

impl From<i64> for NumberValue {
    fn from(value: i64) -> Self {
        Value::Literal(value as f64)
    }
}

macro_rules! from_ref {
    ($reference:ty => $value:ty) => {
        impl From<$reference> for $value {
            fn from(value: $reference) -> Self {
                Value::Reference(value.reference().clone())
            }
        }

        impl From<&$reference> for $value {
            fn from(value: &$reference) -> Self {
                Value::Reference(value.reference().clone())
            }
        }
    };
    (generic $reference:ident => $value:ident) => {
        impl<R, T> From<$reference<R>> for $value<T> {
            fn from(value: $reference<R>) -> Self {
                Value::Reference(value.reference().clone())
            }
        }

        impl<R, T> From<&$reference<R>> for $value<T> {
            fn from(value: &$reference<R>) -> Self {
                Value::Reference(value.reference().clone())
            }
        }
    };
}

from_ref!(StringRef => StringValue);
from_ref!(NumberRef => NumberValue);
from_ref!(BoolRef => BoolValue);
from_ref!(generic ListRef => ListValue);
from_ref!(generic SetRef => SetValue);
from_ref!(generic MapRef => MapValue);
