use core::any::TypeId;
use core::fmt;

use crate::Reflect;

/// Writes a type's display name into a formatter.
pub type TypeNameFn = fn(f: &mut fmt::Formatter<'_>) -> fmt::Result;

/// Nominal type identity of a value.
///
/// Two shapes name the same type iff their [`TypeId`] and variant agree. The
/// variant lets each enum variant act as its own record type, so
/// `Shape::Circle` never lines up field by field against `Shape::Square`.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Rust type id of the value.
    pub id: TypeId,
    /// Writes the display name.
    pub type_name: TypeNameFn,
    /// Enum variant, if the value is one.
    pub variant: Option<&'static str>,
}

impl Shape {
    /// Shape of `T`.
    #[inline]
    pub fn of<T: Reflect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: T::write_type_name,
            variant: None,
        }
    }

    /// Same type, narrowed to one enum variant.
    #[inline]
    pub fn with_variant(self, variant: &'static str) -> Self {
        Self {
            variant: Some(variant),
            ..self
        }
    }

    /// Display name as an owned string.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.variant == other.variant
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.type_name)(f)?;
        if let Some(variant) = self.variant {
            write!(f, "::{variant}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Coarse shape category of a value, independent of its nominal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The unit value.
    Null,
    /// `true` or `false`.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point number.
    Float,
    /// Complex number.
    Complex,
    /// UTF-8 text.
    Text,
    /// Ordered elements.
    Sequence,
    /// Named fields in declaration order.
    Record,
    /// Key/value pairs.
    Mapping,
    /// Points at exactly one referent.
    Reference,
    /// Holds a value whose concrete type is only known at runtime, or nothing.
    Dynamic,
    /// Function pointer.
    Callable,
    /// Channel endpoint.
    Channel,
    /// Cannot be looked into.
    Opaque,
}

impl Kind {
    /// Kinds whose identity is tracked to stop at cycles.
    pub const fn is_reference_bearing(self) -> bool {
        matches!(
            self,
            Kind::Record | Kind::Sequence | Kind::Mapping | Kind::Reference
        )
    }

    /// Kinds rendered as a single piece of text.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::Null
                | Kind::Bool
                | Kind::Int
                | Kind::Uint
                | Kind::Float
                | Kind::Complex
                | Kind::Text
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "integer",
            Kind::Uint => "unsigned integer",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Text => "text",
            Kind::Sequence => "sequence",
            Kind::Record => "record",
            Kind::Mapping => "mapping",
            Kind::Reference => "reference",
            Kind::Dynamic => "dynamic",
            Kind::Callable => "callable",
            Kind::Channel => "channel",
            Kind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}
