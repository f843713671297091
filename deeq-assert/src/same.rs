//! Panic-free sameness checks behind the assertion macros.

use core::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::LazyLock;

use deeq_core::{Peek, Reflect};

use crate::Deeq;
use crate::deeq::panic_message;

static DEFAULT: LazyLock<Deeq> = LazyLock::new(Deeq::new);

/// Outcome of comparing two values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sameness {
    /// The values are deeply equal.
    Same,
    /// The values differ; holds the failure report.
    Different(String),
    /// The comparison itself could not finish.
    Failed(String),
}

/// Compares two values of one type with no custom rules.
///
/// ```
/// use deeq_assert::{Sameness, check};
///
/// assert_eq!(check(&vec![1, 2], &vec![1, 2]), Sameness::Same);
/// assert!(matches!(check(&1, &2), Sameness::Different(_)));
/// ```
pub fn check<T: Reflect>(expected: &T, actual: &T) -> Sameness {
    check_with(&DEFAULT, expected, actual)
}

/// Compares two values of one type under `deeq`'s rules.
pub fn check_with<T: Reflect>(deeq: &Deeq, expected: &T, actual: &T) -> Sameness {
    let (expected, actual) = (Peek::new(expected), Peek::new(actual));
    let outcome = catch_unwind(AssertUnwindSafe(|| match deeq.compare(expected, actual) {
        Ok(true) => Sameness::Same,
        Ok(false) => Sameness::Different(deeq.report(expected, actual)),
        Err(message) => Sameness::Failed(message),
    }));
    outcome.unwrap_or_else(|payload| {
        Sameness::Failed(format!("panic in deeq: {}", panic_message(&*payload)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_overruns_fail_instead_of_differing() {
        let deeq = Deeq::new().max_depth(1);
        let nested = vec![vec![vec![1]]];
        assert_eq!(
            check_with(&deeq, &nested, &nested.clone()),
            Sameness::Failed("maximum depth exceeded: went deeper than 1 levels".into())
        );
    }
}
