//! The configurable comparer and how it reports to a test host.

use core::any::Any;
use core::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use deeq_core::{Def, Kind, Peek, Reflect};
use deeq_diff::{
    DEFAULT_DIFF_DEPTH, DEFAULT_EQUAL_DEPTH, DiffOptions, EqualOptions, RenderOptions, Rules,
    deep_equal, diff, inline,
};

/// Where failed checks go. Test frameworks implement this to turn a report
/// into a test failure; the check itself keeps running.
pub trait Reporter {
    /// Records one failure message.
    fn error(&mut self, message: String);
}

impl Reporter for Vec<String> {
    fn error(&mut self, message: String) {
        self.push(message);
    }
}

/// Deep equality with per-type rules.
///
/// ```
/// use deeq_assert::Deeq;
///
/// let mut deeq = Deeq::new().max_depth(64);
/// deeq.add_transform(|s: &String| s.trim().to_owned());
/// let mut errors: Vec<String> = Vec::new();
/// assert!(deeq.equal(&mut errors, &" a ".to_string(), &"a".to_string()));
/// assert!(errors.is_empty());
/// ```
#[derive(Debug)]
pub struct Deeq {
    rules: Rules,
    max_depth: usize,
    diff_depth: usize,
    colors: bool,
}

impl Default for Deeq {
    fn default() -> Self {
        Self::new()
    }
}

impl Deeq {
    /// No rules, an equality depth of 1000 and a diff depth of 500.
    pub fn new() -> Self {
        Self {
            rules: Rules::new(),
            max_depth: DEFAULT_EQUAL_DEPTH,
            diff_depth: DEFAULT_DIFF_DEPTH,
            colors: false,
        }
    }

    /// Compare `T`s by what `f` maps them to. Nothing inside the mapped
    /// value is transformed again.
    pub fn add_transform<T: Reflect, U: Reflect>(
        &mut self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> &mut Self {
        self.rules.add_transform(f);
        self
    }

    /// Decide equality of `T`s with `f`.
    pub fn add_equal<T: Reflect>(
        &mut self,
        f: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.rules.add_equal(f);
        self
    }

    /// Show `T`s in failure reports as the text `f` produces.
    pub fn add_format<T: Reflect>(
        &mut self,
        f: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.rules.add_format(f);
        self
    }

    /// Nesting limit of the equality walk.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Nesting limit of the diff built for failure reports.
    pub fn diff_depth(mut self, diff_depth: usize) -> Self {
        self.diff_depth = diff_depth;
        self
    }

    /// Color diffs in failure reports, unless `NO_COLOR` is set.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// The rules this comparer applies.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Checks that `expected` and `actual` are deeply equal, reporting a
    /// diff to `reporter` when they are not.
    pub fn equal<E: Reflect, A: Reflect>(
        &self,
        reporter: &mut dyn Reporter,
        expected: &E,
        actual: &A,
    ) -> bool {
        let (expected, actual) = (Peek::new(expected), Peek::new(actual));
        guarded(reporter, false, |reporter| match self.compare(expected, actual) {
            Ok(true) => true,
            Ok(false) => {
                reporter.error(self.report(expected, actual));
                false
            }
            Err(message) => {
                reporter.error(message);
                false
            }
        })
    }

    /// Checks that `expected` and `actual` differ.
    pub fn not_equal<E: Reflect, A: Reflect>(
        &self,
        reporter: &mut dyn Reporter,
        expected: &E,
        actual: &A,
    ) -> bool {
        let (expected, actual) = (Peek::new(expected), Peek::new(actual));
        guarded(reporter, false, |reporter| match self.compare(expected, actual) {
            Ok(false) => true,
            Ok(true) => {
                let plain = EqualOptions::default().max_depth(self.max_depth);
                if deep_equal(expected, actual, &plain).unwrap_or(false) {
                    reporter.error("values are structurally equal".to_owned());
                } else {
                    reporter.error(format!(
                        "expected {} != {}\nthe values differ structurally; custom rules made them equal",
                        self.show(expected),
                        self.show(actual)
                    ));
                }
                false
            }
            Err(message) => {
                reporter.error(message);
                false
            }
        })
    }

    /// Deep equality under this comparer's rules, with failures as the
    /// message to report.
    pub(crate) fn compare(&self, expected: Peek<'_>, actual: Peek<'_>) -> Result<bool, String> {
        let opts = EqualOptions::new(&self.rules).max_depth(self.max_depth);
        deep_equal(expected, actual, &opts).map_err(|e| e.to_string())
    }

    /// The failure message for two unequal values.
    pub(crate) fn report(&self, expected: Peek<'_>, actual: Peek<'_>) -> String {
        let simple = format!("expected {}, got {}", self.show(expected), self.show(actual));
        if expected.shape() != actual.shape() || !worth_a_diff(expected, actual) {
            return simple;
        }
        let opts = DiffOptions::new(&self.rules).max_depth(self.diff_depth);
        let tree = match diff(expected, actual, &opts) {
            Ok(tree) => tree,
            Err(e) => return format!("{simple}\nfailed to compute diff: {e}"),
        };
        let text = if self.colors && std::env::var_os("NO_COLOR").is_none() {
            tree.render(&RenderOptions::default())
        } else {
            tree.render(&RenderOptions::plain())
        };
        if text.is_empty() {
            return simple;
        }
        format!("not equal\ndifferences:\n--- expected\n+++ actual\n{text}")
    }

    fn show(&self, v: Peek<'_>) -> String {
        inline(v, &self.rules).unwrap_or_else(|e| format!("<{e}>"))
    }
}

/// Composite values get a diff; short texts and everything else read better
/// on one line.
fn worth_a_diff(expected: Peek<'_>, actual: Peek<'_>) -> bool {
    match expected.kind() {
        Kind::Record | Kind::Mapping | Kind::Sequence | Kind::Reference => true,
        Kind::Text => match (expected.def(), actual.def()) {
            (Def::Text(a), Def::Text(b)) => a.len() >= 10 || b.len() >= 10,
            _ => false,
        },
        _ => false,
    }
}

/// Runs `check`, turning a panic inside it into a reported failure.
fn guarded<R>(
    reporter: &mut dyn Reporter,
    on_panic: R,
    check: impl FnOnce(&mut dyn Reporter) -> R,
) -> R {
    let outcome = catch_unwind(AssertUnwindSafe(|| check(&mut *reporter)));
    match outcome {
        Ok(r) => r,
        Err(payload) => {
            reporter.error(format!("panic in deeq: {}", panic_message(&*payload)));
            on_panic
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
