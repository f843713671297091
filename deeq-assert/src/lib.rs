#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod deeq;
mod same;

pub use deeq::{Deeq, Reporter};
pub use same::{Sameness, check, check_with};

pub use deeq_diff::{DiffError, Rules};

/// Asserts that two values are deeply equal.
///
/// Needs no `PartialEq`: values are compared through
/// [`Reflect`](deeq_core::Reflect). Both sides have the same type, so
/// inference flows between them.
///
/// # Panics
///
/// Panics with a diff of the two values when they differ, and with the
/// cause when they cannot be compared.
///
/// ```
/// use deeq_assert::assert_deeq;
///
/// let x: Option<Vec<u8>> = Some(vec![]);
/// assert_deeq!(x, Some(Vec::new()));
/// ```
#[macro_export]
macro_rules! assert_deeq {
    ($left:expr, $right:expr $(,)?) => {
        match $crate::check(&$left, &$right) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(report) => {
                panic!("assertion `assert_deeq!(left, right)` failed\n\n{report}\n");
            }
            $crate::Sameness::Failed(reason) => {
                panic!("assertion `assert_deeq!(left, right)` failed: {reason}");
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match $crate::check(&$left, &$right) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(report) => {
                panic!(
                    "assertion `assert_deeq!(left, right)` failed: {}\n\n{report}\n",
                    format_args!($($arg)+)
                );
            }
            $crate::Sameness::Failed(reason) => {
                panic!(
                    "assertion `assert_deeq!(left, right)` failed: {}: {reason}",
                    format_args!($($arg)+)
                );
            }
        }
    };
}

/// Asserts that two values are deeply equal under a [`Deeq`]'s rules.
///
/// ```
/// use deeq_assert::{Deeq, assert_deeq_with};
///
/// let mut deeq = Deeq::new();
/// deeq.add_equal(|a: &f64, b: &f64| (a - b).abs() < 1e-6);
/// assert_deeq_with!(1.0000001_f64, 1.0000002_f64, &deeq);
/// ```
#[macro_export]
macro_rules! assert_deeq_with {
    ($left:expr, $right:expr, $deeq:expr $(,)?) => {
        match $crate::check_with($deeq, &$left, &$right) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(report) => {
                panic!("assertion `assert_deeq_with!(left, right, deeq)` failed\n\n{report}\n");
            }
            $crate::Sameness::Failed(reason) => {
                panic!("assertion `assert_deeq_with!(left, right, deeq)` failed: {reason}");
            }
        }
    };
    ($left:expr, $right:expr, $deeq:expr, $($arg:tt)+) => {
        match $crate::check_with($deeq, &$left, &$right) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(report) => {
                panic!(
                    "assertion `assert_deeq_with!(left, right, deeq)` failed: {}\n\n{report}\n",
                    format_args!($($arg)+)
                );
            }
            $crate::Sameness::Failed(reason) => {
                panic!(
                    "assertion `assert_deeq_with!(left, right, deeq)` failed: {}: {reason}",
                    format_args!($($arg)+)
                );
            }
        }
    };
}

/// Asserts that two values differ.
///
/// # Panics
///
/// Panics when the values are deeply equal or cannot be compared.
#[macro_export]
macro_rules! assert_not_deeq {
    ($left:expr, $right:expr $(,)?) => {
        match $crate::check(&$left, &$right) {
            $crate::Sameness::Different(_) => {}
            $crate::Sameness::Same => {
                panic!("assertion `assert_not_deeq!(left, right)` failed: values are structurally equal");
            }
            $crate::Sameness::Failed(reason) => {
                panic!("assertion `assert_not_deeq!(left, right)` failed: {reason}");
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match $crate::check(&$left, &$right) {
            $crate::Sameness::Different(_) => {}
            $crate::Sameness::Same => {
                panic!(
                    "assertion `assert_not_deeq!(left, right)` failed: {}: values are structurally equal",
                    format_args!($($arg)+)
                );
            }
            $crate::Sameness::Failed(reason) => {
                panic!(
                    "assertion `assert_not_deeq!(left, right)` failed: {}: {reason}",
                    format_args!($($arg)+)
                );
            }
        }
    };
}

/// Like [`assert_deeq!`], only in debug builds.
#[macro_export]
macro_rules! debug_assert_deeq {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_deeq!($($arg)*);
        }
    };
}
