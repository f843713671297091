//! Builds a [`DiffNode`] tree from two values.

use deeq_core::{Def, Kind, Peek, PeekMapping, Reflect, VisitKey, Visits};
use deeq_diff_core::Side;

use crate::equal::Oracle;
use crate::mapping::{KeySlot, sorted_entries};
use crate::print::{callable_text, formatted_text, opaque_text, scalar_text};
use crate::sequences::align;
use crate::{DiffError, DiffNode, DiffOptions, Entry, EntryKey, Repr, Result, Sample};

/// Compares `left` (expected) against `right` (actual).
///
/// Fails only on a depth overrun, an opaque value with a differing identity,
/// an alignment failure, or a rule registered for the wrong type.
///
/// ```
/// use deeq_core::Peek;
/// use deeq_diff::{DiffOptions, diff};
///
/// let tree = diff(Peek::new(&vec![1, 2]), Peek::new(&vec![1, 3]), &DiffOptions::default()).unwrap();
/// assert!(!tree.is_equal());
/// ```
pub fn diff(left: Peek<'_>, right: Peek<'_>, opts: &DiffOptions<'_>) -> Result<DiffNode> {
    Differ { opts }.diff(left, right, &Scope::default())
}

/// Like [`diff`], for callers whose inputs may be absent.
pub fn diff_dyn(
    left: Option<&dyn Reflect>,
    right: Option<&dyn Reflect>,
    opts: &DiffOptions<'_>,
) -> Result<DiffNode> {
    match (left, right) {
        (Some(l), Some(r)) => diff(Peek::from_dyn(l), Peek::from_dyn(r), opts),
        (None, Some(_)) => Err(DiffError::InvalidValue { side: Side::Left }),
        (Some(_), None) => Err(DiffError::InvalidValue { side: Side::Right }),
        (None, None) => Err(DiffError::InvalidValue { side: Side::Both }),
    }
}

/// Whether `left` and `right` compare equal, i.e. their diff has no loss.
pub fn equal(left: Peek<'_>, right: Peek<'_>, opts: &DiffOptions<'_>) -> Result<bool> {
    Ok(diff(left, right, opts)?.is_equal())
}

/// Per-path walk state, copied into each descent.
#[derive(Clone)]
struct Scope {
    depth: usize,
    left: Visits,
    right: Visits,
    transforms: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            depth: 0,
            left: Visits::new(),
            right: Visits::new(),
            transforms: true,
        }
    }
}

impl Scope {
    fn deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }
}

struct Differ<'o, 'r> {
    opts: &'o DiffOptions<'r>,
}

impl Differ<'_, '_> {
    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.opts.max_depth {
            return Err(DiffError::MaxDepthExceeded {
                max_depth: self.opts.max_depth,
            });
        }
        Ok(())
    }

    fn oracle(&self, scope: &Scope) -> Oracle<'_> {
        Oracle {
            rules: self.opts.rules,
            max_depth: self.opts.max_depth,
            transforms: scope.transforms,
        }
    }

    fn diff(&self, l: Peek<'_>, r: Peek<'_>, scope: &Scope) -> Result<DiffNode> {
        self.check_depth(scope.depth)?;
        if self.oracle(scope).equal(l, r, scope.depth)? {
            return self.pure(l, &Visits::new(), scope.depth);
        }
        if l.shape() != r.shape() {
            trace!(left = %l.shape(), right = %r.shape(), "type mismatch");
            return Ok(DiffNode::split(
                self.pure(l, &Visits::new(), scope.depth)?,
                self.pure(r, &Visits::new(), scope.depth)?,
            ));
        }

        let node = if scope.transforms && self.opts.rules.has_transform(l) {
            self.diff_transformed(l, r, scope)?
        } else {
            let (ld, rd) = (l.def(), r.def());
            let mut scope = scope.deeper();
            if ld.kind().is_reference_bearing() {
                let (lk, rk) = (VisitKey::single(l), VisitKey::single(r));
                if scope.left.contains(&lk) && scope.right.contains(&rk) {
                    debug!(shape = %l.shape(), "cycle");
                    return Ok(DiffNode::Cycle);
                }
                scope.left.insert(lk);
                scope.right.insert(rk);
            }
            trace!(kind = %ld.kind(), shape = %l.shape(), depth = scope.depth, "diff");
            self.diff_kind(l, r, ld, rd, &scope)?
        };

        self.wrap_format(l, r, node)
    }

    /// Compares what the registered transform maps both sides to, with
    /// transforms off below.
    fn diff_transformed(&self, l: Peek<'_>, r: Peek<'_>, scope: &Scope) -> Result<DiffNode> {
        let (Some(tl), Some(tr)) = (
            self.opts.rules.apply_transform(l)?,
            self.opts.rules.apply_transform(r)?,
        ) else {
            return Err(DiffError::invariant(format!(
                "transform for {} vanished between sides",
                l.shape()
            )));
        };
        trace!(shape = %l.shape(), "diffing transformed values");
        let scope = Scope {
            transforms: false,
            ..scope.deeper()
        };
        self.diff(Peek::from_dyn(&*tl), Peek::from_dyn(&*tr), &scope)
    }

    fn wrap_format(&self, l: Peek<'_>, r: Peek<'_>, node: DiffNode) -> Result<DiffNode> {
        let rules = self.opts.rules;
        let (Some(lt), Some(rt)) = (rules.display_text(l)?, rules.display_text(r)?) else {
            return Ok(node);
        };
        Ok(DiffNode::FormatOverride {
            original: Box::new(node),
            left: formatted_text(&l.shape(), &lt),
            right: formatted_text(&r.shape(), &rt),
        })
    }

    fn diff_kind(
        &self,
        l: Peek<'_>,
        r: Peek<'_>,
        ld: Def<'_>,
        rd: Def<'_>,
        scope: &Scope,
    ) -> Result<DiffNode> {
        match (ld, rd) {
            (Def::Text(a), Def::Text(b)) => self.diff_text(l, r, a, b, scope),
            (Def::Sequence(a), Def::Sequence(b)) => {
                if a.is_nil() || b.is_nil() {
                    return self.split(l, r, scope);
                }
                let entries = align(
                    a.items(),
                    b.items(),
                    |x, y| self.diff(x, y, scope),
                    |v| self.pure(v, &Visits::new(), scope.depth),
                )?;
                Ok(DiffNode::indexed(Sample::of(l, Repr::Composite), entries))
            }
            (Def::Record(a), Def::Record(b)) => {
                if a.len() != b.len() {
                    return Err(DiffError::invariant(format!(
                        "two values of {} reported different field counts",
                        l.shape()
                    )));
                }
                let entries = a
                    .fields()
                    .iter()
                    .zip(b.fields())
                    .map(|(x, y)| {
                        Ok(Entry::both(self.diff(x.value, y.value, scope)?)
                            .with_key(EntryKey::Field(x.name)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(DiffNode::keyed(Sample::of(l, Repr::Composite), entries))
            }
            (Def::Mapping(a), Def::Mapping(b)) => {
                if a.is_nil() || b.is_nil() {
                    return self.split(l, r, scope);
                }
                self.diff_mapping(l, &a, &b, scope)
            }
            (Def::Reference(a), Def::Reference(b)) => match (a.target(), b.target()) {
                (None, None) => Ok(DiffNode::NullMarker {
                    type_name: l.shape().to_string(),
                }),
                (Some(x), Some(y)) if x.addr() == y.addr() => {
                    self.pure(l, &Visits::new(), scope.depth)
                }
                (Some(x), Some(y)) => {
                    let child = self.diff(x, y, scope)?;
                    Ok(DiffNode::keyed(
                        Sample::of(l, Repr::Composite),
                        vec![Entry::both(child)],
                    ))
                }
                _ => self.split(l, r, scope),
            },
            (Def::Dynamic(a), Def::Dynamic(b)) => match (a.held(), b.held()) {
                (None, None) => Ok(DiffNode::NullMarker {
                    type_name: l.shape().to_string(),
                }),
                (Some(x), Some(y)) => self.diff(x, y, scope),
                _ => self.split(l, r, scope),
            },
            (Def::Callable(a), Def::Callable(b)) | (Def::Channel(a), Def::Channel(b))
                if a.is_nil() && b.is_nil() =>
            {
                Ok(DiffNode::NullMarker {
                    type_name: l.shape().to_string(),
                })
            }
            (Def::Opaque, _) | (_, Def::Opaque) => Err(DiffError::UnsupportedKind {
                type_name: l.shape().to_string(),
            }),
            // unequal scalars, callables and channels
            _ => self.split(l, r, scope),
        }
    }

    fn split(&self, l: Peek<'_>, r: Peek<'_>, scope: &Scope) -> Result<DiffNode> {
        Ok(DiffNode::split(
            self.pure(l, &Visits::new(), scope.depth)?,
            self.pure(r, &Visits::new(), scope.depth)?,
        ))
    }

    /// Single-line texts split; multi-line texts align line by line.
    fn diff_text(
        &self,
        l: Peek<'_>,
        r: Peek<'_>,
        a: &str,
        b: &str,
        scope: &Scope,
    ) -> Result<DiffNode> {
        if !a.contains('\n') || !b.contains('\n') {
            return self.split(l, r, scope);
        }
        let type_name = l.shape().to_string();
        let line = |text: &str| DiffNode::Pure {
            sample: Sample {
                kind: Kind::Text,
                type_name: type_name.clone(),
                repr: Repr::Scalar(format!("{text:?}")),
            },
            entries: Vec::new(),
        };
        let left: Vec<&str> = a.split('\n').collect();
        let right: Vec<&str> = b.split('\n').collect();
        let entries = align(
            &left,
            &right,
            |x, y| {
                Ok(if x == y {
                    line(x)
                } else {
                    DiffNode::split(line(x), line(y))
                })
            },
            |v| Ok(line(v)),
        )?;
        Ok(DiffNode::indexed(Sample::of(l, Repr::Composite), entries))
    }

    /// Joins keys across sides with the equality oracle, then lays the
    /// entries out in canonical key order.
    fn diff_mapping(
        &self,
        l: Peek<'_>,
        a: &PeekMapping<'_>,
        b: &PeekMapping<'_>,
        scope: &Scope,
    ) -> Result<DiffNode> {
        let rules = self.opts.rules;
        let oracle = self.oracle(scope);
        let mut used = vec![false; b.len()];
        let mut rows: Vec<(KeySlot, Entry)> = Vec::with_capacity(a.len() + b.len());
        for &(lk, lv) in a.entries() {
            let slot = KeySlot::new(lk, rules)?;
            let entry = match oracle.find_key(lk, b, &used, scope.depth)? {
                Some(j) => {
                    used[j] = true;
                    Entry::both(self.diff(lv, b.entries()[j].1, scope)?)
                }
                None => Entry::left_only(self.pure(lv, &Visits::new(), scope.depth)?),
            };
            rows.push((slot, entry));
        }
        for (j, &(rk, rv)) in b.entries().iter().enumerate() {
            if used[j] {
                continue;
            }
            let slot = KeySlot::new(rk, rules)?;
            rows.push((slot, Entry::right_only(self.pure(rv, &Visits::new(), scope.depth)?)));
        }
        rows.sort_by(|x, y| x.0.compare(&y.0));
        let entries = rows
            .into_iter()
            .map(|(slot, entry)| entry.with_key(EntryKey::Key(slot.label().to_owned())))
            .collect();
        Ok(DiffNode::keyed(Sample::of(l, Repr::Composite), entries))
    }

    /// Describes one value alone, as a tree of pure nodes.
    ///
    /// `visits` only tracks this walk's own path, so shared values reached
    /// twice are printed twice and only true cycles stop.
    fn pure(&self, v: Peek<'_>, visits: &Visits, depth: usize) -> Result<DiffNode> {
        self.check_depth(depth)?;
        let shape = v.shape();
        if let Some(text) = self.opts.rules.display_text(v)? {
            return Ok(DiffNode::Pure {
                sample: Sample::of(v, Repr::Formatted(text)),
                entries: Vec::new(),
            });
        }
        let def = v.def();
        if let Some(text) = scalar_text(&def) {
            return Ok(leaf(v, text));
        }

        let visits = if def.kind().is_reference_bearing() {
            let key = VisitKey::single(v);
            if visits.contains(&key) {
                return Ok(DiffNode::Cycle);
            }
            visits.with(key)
        } else {
            visits.clone()
        };
        let depth = depth + 1;
        let null = || DiffNode::NullMarker {
            type_name: shape.to_string(),
        };

        let entries = match def {
            Def::Sequence(seq) if seq.is_nil() => return Ok(null()),
            Def::Sequence(seq) => seq
                .items()
                .iter()
                .map(|item| Ok(Entry::both(self.pure(*item, &visits, depth)?)))
                .collect::<Result<Vec<_>>>()?,
            Def::Record(rec) => rec
                .fields()
                .iter()
                .map(|f| {
                    Ok(Entry::both(self.pure(f.value, &visits, depth)?)
                        .with_key(EntryKey::Field(f.name)))
                })
                .collect::<Result<Vec<_>>>()?,
            Def::Mapping(map) if map.is_nil() => return Ok(null()),
            Def::Mapping(map) => sorted_entries(map.entries(), self.opts.rules)?
                .into_iter()
                .map(|(slot, _, value)| {
                    Ok(Entry::both(self.pure(value, &visits, depth)?)
                        .with_key(EntryKey::Key(slot.label().to_owned())))
                })
                .collect::<Result<Vec<_>>>()?,
            Def::Reference(reference) => match reference.target() {
                Some(target) => vec![Entry::both(self.pure(target, &visits, depth)?)],
                None => return Ok(null()),
            },
            Def::Dynamic(dynamic) => {
                return match dynamic.held() {
                    Some(held) => self.pure(held, &visits, depth),
                    None => Ok(null()),
                };
            }
            Def::Callable(handle) | Def::Channel(handle) if handle.is_nil() => return Ok(null()),
            Def::Callable(_) => return Ok(leaf(v, callable_text(&shape))),
            Def::Channel(_) => return Ok(leaf(v, shape.to_string())),
            Def::Opaque => return Ok(leaf(v, opaque_text(&shape))),
            Def::Null
            | Def::Bool(_)
            | Def::Int(_)
            | Def::Uint(_)
            | Def::Float(_)
            | Def::Complex { .. }
            | Def::Text(_) => {
                return Err(DiffError::invariant("scalar reached the composite sampler"));
            }
        };
        Ok(DiffNode::Pure {
            sample: Sample::of(v, Repr::Composite),
            entries,
        })
    }
}

fn leaf(v: Peek<'_>, text: String) -> DiffNode {
    DiffNode::Pure {
        sample: Sample::of(v, Repr::Scalar(text)),
        entries: Vec::new(),
    }
}
