//! Typed references.
//!
//! Every typed reference is built from an untyped [`Reference`] through [`FromReference`]. Collection references are
//! generic over their element reference, so a constructor for `list(set(string))` is simply
//! `ListRef::<SetRef<StringRef>>::from_reference`: each wrapper composes the constructor of its element.

use std::fmt;
use std::marker::PhantomData;

use crate::reference::Reference;

/// Build a typed reference from an untyped one.
///
/// Generated attribute records implement this too, so blocks nest inside collection references.
pub trait FromReference: Sized {
    fn from_reference(reference: Reference) -> Self;
}

macro_rules! scalar_ref {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(Reference);

        impl $name {
            /// The underlying untyped reference.
            pub fn reference(&self) -> &Reference {
                &self.0
            }
        }

        impl FromReference for $name {
            fn from_reference(reference: Reference) -> Self {
                Self(reference)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

scalar_ref!(
    /// Reference to a string attribute.
    StringRef
);
scalar_ref!(
    /// Reference to a number attribute.
    NumberRef
);
scalar_ref!(
    /// Reference to a bool attribute.
    BoolRef
);

macro_rules! collection_ref {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<T> {
            reference: Reference,
            elem: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            /// The underlying untyped reference.
            pub fn reference(&self) -> &Reference {
                &self.reference
            }
        }

        impl<T> FromReference for $name<T> {
            fn from_reference(reference: Reference) -> Self {
                Self {
                    reference,
                    elem: PhantomData,
                }
            }
        }

        // No bounds on the phantom parameter.
        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self::from_reference(self.reference.clone())
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.reference).finish()
            }
        }

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.reference == other.reference
            }
        }

        impl<T> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.reference, f)
            }
        }
    };
}

collection_ref!(
    /// Reference to a list whose elements are `T` references.
    ListRef
);
collection_ref!(
    /// Reference to a set whose elements are `T` references.
    ///
    /// Sets are unordered, so elements can only be reached through a splat.
    SetRef
);
collection_ref!(
    /// Reference to a string-keyed map whose values are `T` references.
    MapRef
);

impl<T: FromReference> ListRef<T> {
    /// Reference the element at `index`.
    pub fn index(&self, index: usize) -> T {
        T::from_reference(self.reference.index(index))
    }

    /// Reference every element (`[*]`).
    pub fn splat(&self) -> T {
        T::from_reference(self.reference.splat())
    }
}

impl<T: FromReference> SetRef<T> {
    /// Reference every element (`[*]`).
    pub fn splat(&self) -> T {
        T::from_reference(self.reference.splat())
    }
}

impl<T: FromReference> MapRef<T> {
    /// Reference the value stored under `key`.
    pub fn key(&self, key: &str) -> T {
        T::from_reference(self.reference.key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_collection_constructor_composes() {
        let base = Reference::resource("aws_instance", "web").attribute("groups");
        let groups = ListRef::<SetRef<StringRef>>::from_reference(base);
        let inner = groups.index(2).splat();
        assert_eq!(inner.to_string(), "aws_instance.web.groups[2][*]");
    }

    #[test]
    fn test_map_key_reference() {
        let tags = MapRef::<StringRef>::from_reference(Reference::resource("aws_vpc", "main").attribute("tags"));
        assert_eq!(tags.key("env").to_string(), r#"aws_vpc.main.tags["env"]"#);
    }
}
