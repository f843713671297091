//! Per-type customization consulted by every walk.

use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;

use deeq_core::{Kind, Peek, Reflect};

use crate::{DiffError, Result};

type TransformFn = Box<dyn Fn(Peek<'_>) -> Option<Box<dyn Reflect>> + Send + Sync>;
type EqualFn = Box<dyn Fn(Peek<'_>, Peek<'_>) -> Option<bool> + Send + Sync>;
type FormatFn = Box<dyn Fn(Peek<'_>) -> Option<String> + Send + Sync>;

/// Transforms, custom equality predicates and formatters, keyed by type.
///
/// A `Rules` table is built once and then only read; walks borrow it, so one
/// table can serve any number of comparisons on any number of threads.
///
/// ```
/// use deeq_diff::Rules;
///
/// let rules = Rules::new()
///     .equal(|a: &f64, b: &f64| (a - b).abs() < 1e-9)
///     .format(|d: &std::time::Duration| format!("{}ms", d.as_millis()));
/// assert!(!rules.is_empty());
/// ```
#[derive(Default)]
pub struct Rules {
    transforms: HashMap<TypeId, TransformFn>,
    equals: HashMap<TypeId, EqualFn>,
    formats: HashMap<TypeId, FormatFn>,
}

impl Rules {
    /// A table with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `T`s by what `f` maps them to.
    ///
    /// The transformed value is compared with transforms switched off, so
    /// `f` never sees its own output.
    pub fn transform<T: Reflect, U: Reflect>(
        mut self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Self {
        self.add_transform(f);
        self
    }

    /// Decide equality of `T`s with `f` instead of walking them.
    pub fn equal<T: Reflect>(mut self, f: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        self.add_equal(f);
        self
    }

    /// Show unequal `T`s as the text `f` produces instead of their structure.
    pub fn format<T: Reflect>(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.add_format(f);
        self
    }

    /// In-place form of [`Rules::transform`].
    pub fn add_transform<T: Reflect, U: Reflect>(
        &mut self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) {
        self.transforms.insert(
            TypeId::of::<T>(),
            Box::new(move |v| {
                v.downcast::<T>()
                    .map(|t| Box::new(f(t)) as Box<dyn Reflect>)
            }),
        );
    }

    /// In-place form of [`Rules::equal`].
    pub fn add_equal<T: Reflect>(&mut self, f: impl Fn(&T, &T) -> bool + Send + Sync + 'static) {
        self.equals.insert(
            TypeId::of::<T>(),
            Box::new(move |l, r| Some(f(l.downcast::<T>()?, r.downcast::<T>()?))),
        );
    }

    /// In-place form of [`Rules::format`].
    pub fn add_format<T: Reflect>(&mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) {
        self.formats.insert(
            TypeId::of::<T>(),
            Box::new(move |v| v.downcast::<T>().map(&f)),
        );
    }

    /// Whether no rule of any sort is registered.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty() && self.equals.is_empty() && self.formats.is_empty()
    }

    pub(crate) fn has_transform(&self, v: Peek<'_>) -> bool {
        self.transforms.contains_key(&v.shape().id)
    }

    /// Applies the transform registered for `v`'s type, if any.
    pub(crate) fn apply_transform(&self, v: Peek<'_>) -> Result<Option<Box<dyn Reflect>>> {
        let Some(f) = self.transforms.get(&v.shape().id) else {
            return Ok(None);
        };
        f(v).map(Some).ok_or_else(|| mismatch("transform", v))
    }

    /// Runs the custom equality registered for `left`'s type, if any.
    pub(crate) fn custom_equal(&self, left: Peek<'_>, right: Peek<'_>) -> Result<Option<bool>> {
        let Some(f) = self.equals.get(&left.shape().id) else {
            return Ok(None);
        };
        f(left, right).map(Some).ok_or_else(|| mismatch("equality rule", left))
    }

    /// Text `v` is shown as instead of its structure: the registered
    /// formatter's output, or else the value's own description. Text values
    /// never describe themselves.
    pub(crate) fn display_text(&self, v: Peek<'_>) -> Result<Option<String>> {
        if let Some(f) = self.formats.get(&v.shape().id) {
            return f(v).map(Some).ok_or_else(|| mismatch("formatter", v));
        }
        if v.kind() == Kind::Text {
            return Ok(None);
        }
        Ok(v.describe())
    }
}

fn mismatch(what: &str, v: Peek<'_>) -> DiffError {
    DiffError::invariant(format!(
        "{what} registered for {} received a value of another type",
        v.shape()
    ))
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("transforms", &self.transforms.len())
            .field("equals", &self.equals.len())
            .field("formats", &self.formats.len())
            .finish()
    }
}
