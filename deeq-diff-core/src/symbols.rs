//! Markers printed in the gutter of rendered diffs.

/// Gutter markers for rendered diffs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSymbols {
    /// Marker for left-only lines (default: "-")
    pub deleted: &'static str,

    /// Marker for right-only lines (default: "+")
    pub inserted: &'static str,

    /// Line standing in for a run of hidden lines (default: ":")
    pub gap: &'static str,
}

impl Default for DiffSymbols {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DiffSymbols {
    /// `-`, `+` and `:`.
    pub const STANDARD: Self = Self {
        deleted: "-",
        inserted: "+",
        gap: ":",
    };
}
