//! Virtual lines: the flat form a document takes before it is windowed.

use crate::{Fragment, Side};

/// One output line before markers, indentation and windowing are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualLine {
    /// Text of the line.
    pub text: String,
    /// Nesting depth; each level is one indent.
    pub depth: usize,
    /// Side the line belongs to.
    pub side: Side,
    /// Opening or closing line of a block whose body differs. Always shown.
    pub is_context: bool,
}

impl VirtualLine {
    pub(crate) fn new(fragment: &Fragment, depth: usize) -> Self {
        Self {
            text: fragment.text.clone(),
            depth,
            side: fragment.side,
            is_context: false,
        }
    }

    /// Whether the line belongs to only one side.
    pub fn is_diff_line(&self) -> bool {
        self.side.is_diff()
    }
}
