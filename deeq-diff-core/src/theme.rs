//! Color themes for diff rendering.

use owo_colors::Rgb;

/// Colors used by [`AnsiBackend`](crate::AnsiBackend).
///
/// Context lines carry no color so they stay in the terminal's own foreground.
/// The default uses Tokyo Night colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Left-only lines (default: red)
    pub deleted: Rgb,

    /// Right-only lines (default: green)
    pub inserted: Rgb,

    /// Gap markers (default: blue)
    pub comment: Rgb,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::TOKYO_NIGHT
    }
}

impl DiffTheme {
    /// Tokyo Night color theme (default).
    pub const TOKYO_NIGHT: Self = Self {
        deleted: Rgb(247, 118, 142),
        inserted: Rgb(158, 206, 106),
        comment: Rgb(122, 162, 247),
    };
}
