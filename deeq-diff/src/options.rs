use std::sync::LazyLock;

use crate::Rules;

static NO_RULES: LazyLock<Rules> = LazyLock::new(Rules::new);

/// Default recursion limit for building a diff tree.
pub const DEFAULT_DIFF_DEPTH: usize = 500;

/// Default recursion limit for equality-only walks.
pub const DEFAULT_EQUAL_DEPTH: usize = 1000;

/// Options for building a diff tree.
#[derive(Debug, Clone, Copy)]
pub struct DiffOptions<'r> {
    /// Per-type customization.
    pub rules: &'r Rules,
    /// Maximum recursion depth (default: 500). Going deeper aborts the
    /// whole comparison.
    pub max_depth: usize,
}

impl<'r> DiffOptions<'r> {
    /// Options using `rules` and the default depth.
    pub fn new(rules: &'r Rules) -> Self {
        Self {
            rules,
            max_depth: DEFAULT_DIFF_DEPTH,
        }
    }

    /// Set the maximum recursion depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DiffOptions<'static> {
    fn default() -> Self {
        Self::new(&NO_RULES)
    }
}

/// Options for equality-only walks.
#[derive(Debug, Clone, Copy)]
pub struct EqualOptions<'r> {
    /// Per-type customization.
    pub rules: &'r Rules,
    /// Maximum recursion depth (default: 1000).
    pub max_depth: usize,
}

impl<'r> EqualOptions<'r> {
    /// Options using `rules` and the default depth.
    pub fn new(rules: &'r Rules) -> Self {
        Self {
            rules,
            max_depth: DEFAULT_EQUAL_DEPTH,
        }
    }

    /// Set the maximum recursion depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EqualOptions<'static> {
    fn default() -> Self {
        Self::new(&NO_RULES)
    }
}
