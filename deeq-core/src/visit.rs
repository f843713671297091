//! Path-scoped bookkeeping that lets recursive walks stop at cycles.

use core::any::TypeId;
use core::fmt;
use std::collections::HashSet;

use crate::Peek;

/// Identity of one borrowed value: its address together with its type.
///
/// The type is part of the key because a record and its first field share
/// an address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId {
    type_id: TypeId,
    addr: usize,
}

impl ValueId {
    /// Identity of the value behind `peek`.
    pub fn of(peek: Peek<'_>) -> Self {
        Self {
            type_id: peek.shape().id,
            addr: peek.addr(),
        }
    }

    /// Address part of the identity.
    pub fn addr(&self) -> usize {
        self.addr
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:#x}", self.type_id, self.addr)
    }
}

/// What a [`Visits`] set remembers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VisitKey {
    /// One value seen on one side of a walk.
    Single(ValueId),
    /// Two same-typed values compared against each other, in canonical
    /// order so `(a, b)` and `(b, a)` are one key.
    Pair {
        /// Shared type of both values.
        type_id: TypeId,
        /// Lower of the two addresses.
        lo: usize,
        /// Higher of the two addresses.
        hi: usize,
    },
}

impl VisitKey {
    /// Key for a single value.
    pub fn single(peek: Peek<'_>) -> Self {
        VisitKey::Single(ValueId::of(peek))
    }

    /// Canonical key for a compared pair. Uses the left value's type.
    pub fn pair(left: Peek<'_>, right: Peek<'_>) -> Self {
        let (a, b) = (left.addr(), right.addr());
        VisitKey::Pair {
            type_id: left.shape().id,
            lo: a.min(b),
            hi: a.max(b),
        }
    }
}

/// A set of visited identities.
///
/// Walks that must only see their own ancestor chain use [`Visits::with`],
/// which leaves `self` untouched and hands back a marked copy for the
/// descent. Walks that may share marks across siblings insert in place.
#[derive(Clone, Default)]
pub struct Visits {
    seen: HashSet<VisitKey>,
}

impl Visits {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has been marked.
    pub fn contains(&self, key: &VisitKey) -> bool {
        self.seen.contains(key)
    }

    /// Marks `key` in place. Returns `false` if it was already marked.
    pub fn insert(&mut self, key: VisitKey) -> bool {
        self.seen.insert(key)
    }

    /// A copy of this set with `key` marked.
    pub fn with(&self, key: VisitKey) -> Self {
        let mut next = self.clone();
        next.seen.insert(key);
        next
    }

    /// Number of marked keys.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl fmt::Debug for Visits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.seen.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_keys_ignore_order() {
        let (a, b) = (1_i32, 2_i32);
        assert_eq!(
            VisitKey::pair(Peek::new(&a), Peek::new(&b)),
            VisitKey::pair(Peek::new(&b), Peek::new(&a))
        );
    }

    #[repr(C)]
    struct Wrapper {
        inner: u64,
    }

    crate::reflect_record!(Wrapper { inner });

    #[test]
    fn type_disambiguates_shared_addresses() {
        let w = Wrapper { inner: 7 };
        let outer = VisitKey::single(Peek::new(&w));
        let first = VisitKey::single(Peek::new(&w.inner));
        assert_eq!(Peek::new(&w).addr(), Peek::new(&w.inner).addr());
        assert_ne!(outer, first);
    }

    #[test]
    fn with_leaves_the_parent_alone() {
        let v = vec![1_u8];
        let key = VisitKey::single(Peek::new(&v));
        let root = Visits::new();
        let child = root.with(key);
        assert!(child.contains(&key));
        assert!(!root.contains(&key));
        assert_eq!(child.len(), 1);
        assert!(root.is_empty());
    }

    #[test]
    fn insert_reports_repeats() {
        let v = 3_i8;
        let mut visits = Visits::new();
        assert!(visits.insert(VisitKey::single(Peek::new(&v))));
        assert!(!visits.insert(VisitKey::single(Peek::new(&v))));
    }
}
