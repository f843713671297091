//! Minimum-cost alignment of two ordered lists.
//!
//! Matching two elements costs their diff loss, leaving one out costs 1.
//! The table is dense, so time and memory grow with the product of the
//! two lengths left after the common prefix is stripped.

use crate::{DiffError, DiffNode, Entry, Result};

/// Corner costs above this mean no real path was found.
const UNREACHABLE_COST: f64 = 1_000_000.0;

enum Step {
    Start,
    SkipLeft,
    SkipRight,
    Match(DiffNode),
}

struct Cell {
    cost: f64,
    step: Step,
}

/// Aligns `left` against `right` and returns the entries in display order.
///
/// `diff` compares two elements and `pure` describes a lone one. Matches are
/// only taken through nodes that are comparable piecewise.
pub(crate) fn align<T: Copy>(
    left: &[T],
    right: &[T],
    mut diff: impl FnMut(T, T) -> Result<DiffNode>,
    mut pure: impl FnMut(T) -> Result<DiffNode>,
) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(left.len().max(right.len()));
    let mut k = 0;
    while k < left.len() && k < right.len() {
        if !diff(left[k], right[k])?.is_equal() {
            break;
        }
        entries.push(Entry::both(pure(left[k])?));
        k += 1;
    }

    let (left, right) = (&left[k..], &right[k..]);
    let (n, m) = (left.len(), right.len());
    let mut table: Vec<Vec<Cell>> = (0..=n)
        .map(|_| {
            (0..=m)
                .map(|_| Cell {
                    cost: f64::MAX,
                    step: Step::Start,
                })
                .collect()
        })
        .collect();
    table[0][0].cost = 0.0;

    // Right index outermost: on equal cost a deletion lands before the
    // insertion that replaces it.
    for b in 0..=m {
        for a in 0..=n {
            let here = table[a][b].cost;
            if a < n && here + 1.0 < table[a + 1][b].cost {
                table[a + 1][b] = Cell {
                    cost: here + 1.0,
                    step: Step::SkipLeft,
                };
            }
            if b < m && here + 1.0 < table[a][b + 1].cost {
                table[a][b + 1] = Cell {
                    cost: here + 1.0,
                    step: Step::SkipRight,
                };
            }
            if a < n && b < m {
                let node = diff(left[a], right[b])?;
                let cost = here + node.loss();
                if node.is_comparable() && cost < table[a + 1][b + 1].cost {
                    table[a + 1][b + 1] = Cell {
                        cost,
                        step: Step::Match(node),
                    };
                }
            }
        }
    }

    let cost = table[n][m].cost;
    debug!(prefix = k, rows = n, cols = m, cost, "aligned sequences");
    if cost > UNREACHABLE_COST {
        return Err(DiffError::AlignmentFailed { cost });
    }

    let mut trailing = Vec::with_capacity(n + m);
    let (mut a, mut b) = (n, m);
    while a > 0 || b > 0 {
        match core::mem::replace(&mut table[a][b].step, Step::Start) {
            Step::SkipLeft => {
                a -= 1;
                trailing.push(Entry::left_only(pure(left[a])?));
            }
            Step::SkipRight => {
                b -= 1;
                trailing.push(Entry::right_only(pure(right[b])?));
            }
            Step::Match(node) if a > 0 && b > 0 => {
                a -= 1;
                b -= 1;
                trailing.push(Entry::both(node));
            }
            Step::Match(_) | Step::Start => {
                return Err(DiffError::invariant(format!(
                    "alignment backtrack stalled at ({a}, {b})"
                )));
            }
        }
    }
    trailing.reverse();
    entries.extend(trailing);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use deeq_core::Kind;

    use super::*;
    use crate::{Presence, Repr, Sample};

    use Presence::{Both, LeftOnly, RightOnly};

    fn leaf(v: i32) -> DiffNode {
        DiffNode::Pure {
            sample: Sample {
                kind: Kind::Int,
                type_name: "i32".into(),
                repr: Repr::Scalar(v.to_string()),
            },
            entries: Vec::new(),
        }
    }

    fn run(left: &[i32], right: &[i32]) -> Vec<(Presence, i32)> {
        let diff = |a: i32, b: i32| {
            Ok(if a == b {
                leaf(a)
            } else {
                DiffNode::split(leaf(a), leaf(b))
            })
        };
        let entries = match align(left, right, diff, |v| Ok(leaf(v))) {
            Ok(entries) => entries,
            Err(e) => panic!("{e}"),
        };
        entries
            .into_iter()
            .map(|e| {
                let DiffNode::Pure { sample, .. } = e.value else {
                    panic!("unexpected node {:?}", e.value);
                };
                let Repr::Scalar(text) = sample.repr else {
                    panic!("unexpected repr");
                };
                (e.presence, text.parse().unwrap_or_default())
            })
            .collect()
    }

    #[test]
    fn changed_tail() {
        deeq_testhelpers::setup();
        assert_eq!(
            run(&[1, 2, 3], &[1, 2, 4]),
            [(Both, 1), (Both, 2), (LeftOnly, 3), (RightOnly, 4)]
        );
    }

    #[test]
    fn swapped_pair_keeps_one_match() {
        deeq_testhelpers::setup();
        assert_eq!(
            run(&[1, 2], &[2, 1]),
            [(LeftOnly, 1), (Both, 2), (RightOnly, 1)]
        );
    }

    #[test]
    fn insertions_in_the_middle() {
        deeq_testhelpers::setup();
        assert_eq!(
            run(&[1, 5], &[1, 2, 3, 4, 5]),
            [(Both, 1), (RightOnly, 2), (RightOnly, 3), (RightOnly, 4), (Both, 5)]
        );
        assert_eq!(run(&[1, 2, 3], &[2, 3]), [(LeftOnly, 1), (Both, 2), (Both, 3)]);
    }

    #[test]
    fn empty_sides() {
        deeq_testhelpers::setup();
        assert!(run(&[], &[]).is_empty());
        assert_eq!(run(&[1, 3], &[]), [(LeftOnly, 1), (LeftOnly, 3)]);
        assert_eq!(run(&[], &[1, 2]), [(RightOnly, 1), (RightOnly, 2)]);
    }

    #[test]
    fn child_errors_propagate() {
        let failing = |_: i32, _: i32| Err(DiffError::MaxDepthExceeded { max_depth: 1 });
        let out = align(&[1], &[2], failing, |v| Ok(leaf(v)));
        assert_eq!(out, Err(DiffError::MaxDepthExceeded { max_depth: 1 }));
    }
}
