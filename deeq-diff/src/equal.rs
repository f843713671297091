//! The equality oracle: a structural walk that only answers yes or no.

use deeq_core::{Def, Peek, PeekMapping, VisitKey, Visits};

use crate::{DiffError, EqualOptions, Result, Rules};

/// Whether `left` and `right` are structurally equal under `opts.rules`.
///
/// Custom equality registered for a type replaces the walk for that type;
/// transforms are applied once, and their output is compared with
/// transforms off. Cycles are cut by assuming a pair already being compared
/// is equal.
pub fn deep_equal(left: Peek<'_>, right: Peek<'_>, opts: &EqualOptions<'_>) -> Result<bool> {
    Oracle {
        rules: opts.rules,
        max_depth: opts.max_depth,
        transforms: true,
    }
    .equal(left, right, 0)
}

/// Equality walk state that outlives a single pair.
#[derive(Clone, Copy)]
pub(crate) struct Oracle<'r> {
    pub(crate) rules: &'r Rules,
    pub(crate) max_depth: usize,
    pub(crate) transforms: bool,
}

impl Oracle<'_> {
    /// Compares starting at `depth`, so a walk nested in a diff shares the
    /// diff's depth budget.
    pub(crate) fn equal(&self, left: Peek<'_>, right: Peek<'_>, depth: usize) -> Result<bool> {
        self.eq(left, right, &mut Visits::new(), depth)
    }

    fn eq(&self, l: Peek<'_>, r: Peek<'_>, visits: &mut Visits, depth: usize) -> Result<bool> {
        if depth > self.max_depth {
            return Err(DiffError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        if l.shape() != r.shape() {
            return Ok(false);
        }
        if let Some(equal) = self.rules.custom_equal(l, r)? {
            return Ok(equal);
        }
        if self.transforms && self.rules.has_transform(l) {
            if let (Some(tl), Some(tr)) =
                (self.rules.apply_transform(l)?, self.rules.apply_transform(r)?)
            {
                let inner = Oracle {
                    transforms: false,
                    ..*self
                };
                return inner.eq(Peek::from_dyn(&*tl), Peek::from_dyn(&*tr), visits, depth + 1);
            }
        }
        if l.addr() == r.addr() {
            return Ok(true);
        }

        let (ld, rd) = (l.def(), r.def());
        if ld.kind().is_reference_bearing() && !visits.insert(VisitKey::pair(l, r)) {
            return Ok(true);
        }

        let depth = depth + 1;
        let equal = match (ld, rd) {
            (Def::Null, Def::Null) => true,
            (Def::Bool(a), Def::Bool(b)) => a == b,
            (Def::Int(a), Def::Int(b)) => a == b,
            (Def::Uint(a), Def::Uint(b)) => a == b,
            (Def::Float(a), Def::Float(b)) => a.to_f64() == b.to_f64(),
            (Def::Complex { re: ar, im: ai }, Def::Complex { re: br, im: bi }) => {
                ar.to_f64() == br.to_f64() && ai.to_f64() == bi.to_f64()
            }
            (Def::Text(a), Def::Text(b)) => a == b,
            (Def::Sequence(a), Def::Sequence(b)) => {
                if a.is_nil() != b.is_nil() || a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.items().iter().zip(b.items()) {
                    if !self.eq(*x, *y, visits, depth)? {
                        return Ok(false);
                    }
                }
                true
            }
            (Def::Record(a), Def::Record(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.fields().iter().zip(b.fields()) {
                    if x.name != y.name || !self.eq(x.value, y.value, visits, depth)? {
                        return Ok(false);
                    }
                }
                true
            }
            (Def::Mapping(a), Def::Mapping(b)) => self.mappings_equal(&a, &b, visits, depth)?,
            (Def::Reference(a), Def::Reference(b)) => match (a.target(), b.target()) {
                (None, None) => true,
                (Some(x), Some(y)) => x.addr() == y.addr() || self.eq(x, y, visits, depth)?,
                _ => false,
            },
            (Def::Dynamic(a), Def::Dynamic(b)) => match (a.held(), b.held()) {
                (None, None) => true,
                (Some(x), Some(y)) => self.eq(x, y, visits, depth)?,
                _ => false,
            },
            (Def::Callable(a), Def::Callable(b)) => a.is_nil() && b.is_nil(),
            (Def::Channel(a), Def::Channel(b)) => a.identity() == b.identity(),
            // opaque values only match by identity, checked above
            _ => false,
        };
        Ok(equal)
    }

    /// Every left key must pair with a distinct equal right key whose value
    /// is equal too.
    fn mappings_equal(
        &self,
        a: &PeekMapping<'_>,
        b: &PeekMapping<'_>,
        visits: &mut Visits,
        depth: usize,
    ) -> Result<bool> {
        if a.is_nil() != b.is_nil() || a.len() != b.len() {
            return Ok(false);
        }
        let mut used = vec![false; b.len()];
        for (lk, lv) in a.entries() {
            let Some(j) = self.find_key(*lk, b, &used, depth)? else {
                return Ok(false);
            };
            used[j] = true;
            if !self.eq(*lv, b.entries()[j].1, visits, depth)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Index of the first unused key in `map` equal to `key`.
    ///
    /// Keys are compared on a fresh visit set: a failed probe must not
    /// leave the pair marked as already equal.
    pub(crate) fn find_key(
        &self,
        key: Peek<'_>,
        map: &PeekMapping<'_>,
        used: &[bool],
        depth: usize,
    ) -> Result<Option<usize>> {
        for (j, (rk, _)) in map.entries().iter().enumerate() {
            if used[j] {
                continue;
            }
            if self.eq(key, *rk, &mut Visits::new(), depth)? {
                return Ok(Some(j));
            }
        }
        Ok(None)
    }
}
