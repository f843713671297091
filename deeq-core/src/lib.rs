#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod impls;
mod macros;
mod peek;
mod shape;
mod visit;

pub use peek::{
    Def, Field, Float, Peek, PeekDynamic, PeekMapping, PeekOpaque, PeekRecord, PeekReference,
    PeekSequence,
};
pub use shape::{Kind, Shape, TypeNameFn};
pub use visit::{ValueId, VisitKey, Visits};

use core::any::Any;
use core::fmt;

/// A value the comparison engine can look inside.
///
/// Implementations describe their nominal type through [`Reflect::shape`] and
/// their structure through [`Reflect::def`]. Most user records only need
/// [`reflect_record!`]; enums, nullable collections and opaque handles write
/// the impl by hand with the `Peek*` view constructors.
pub trait Reflect: Any {
    /// Writes the human-readable type name, e.g. `Vec<i32>`.
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized;

    /// Nominal type identity of this value.
    fn shape(&self) -> Shape;

    /// Kind-tagged structural view of this value.
    fn def(&self) -> Def<'_>;

    /// Text this value describes itself as, if it has one.
    ///
    /// When both sides of an unequal comparison describe themselves, the
    /// diff shows the two descriptions instead of expanding the structure.
    fn describe(&self) -> Option<String> {
        None
    }
}
