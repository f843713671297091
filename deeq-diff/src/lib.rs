#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod tracing_macros;

mod diff;
mod display;
mod equal;
mod error;
mod mapping;
mod options;
mod print;
mod rules;
mod sequences;
mod tree;

pub use diff::{diff, diff_dyn, equal};
pub use equal::deep_equal;
pub use error::{DiffError, Result};
pub use options::{DEFAULT_DIFF_DEPTH, DEFAULT_EQUAL_DEPTH, DiffOptions, EqualOptions};
pub use print::inline;
pub use rules::Rules;
pub use tree::{DiffNode, Entry, EntryKey, Presence, Repr, Sample};

// Re-export the rendering types callers need to render a tree
pub use deeq_diff_core::{AnsiBackend, ColorBackend, DiffTheme, PlainBackend, RenderOptions, Side};

use deeq_core::{Peek, Reflect};

/// Diffs `left` against `right` and renders the result without colors.
///
/// Returns the empty string when the values are equal.
pub fn diff_text(left: Peek<'_>, right: Peek<'_>, opts: &DiffOptions<'_>) -> Result<String> {
    Ok(diff(left, right, opts)?.render(&RenderOptions::plain()))
}

/// Extension trait for diffing any two reflected values with default options.
pub trait ReflectDiff: Reflect {
    /// Diffs `self` (expected) against `other` (actual).
    fn diff<U: Reflect>(&self, other: &U) -> Result<DiffNode>
    where
        Self: Sized,
    {
        diff(Peek::new(self), Peek::new(other), &DiffOptions::default())
    }
}

impl<T: Reflect> ReflectDiff for T {}
