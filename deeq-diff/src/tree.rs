//! The diff tree and its dissimilarity metric.

use deeq_core::{Kind, Peek};

/// Weight of a changed child in composite loss. Indexed composites scale
/// their mean by it and stay below a split; keyed composites divide by it,
/// so one with no child in common costs more than a split.
const COMPOSITE_CAP: f64 = 0.9;

/// Loss of an empty keyed composite. Nonzero so an empty aggregate that
/// still reached the diff is never mistaken for an equal one.
const EMPTY_KEYED_LOSS: f64 = 0.1;

/// Result of comparing two values, or of describing one value alone.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffNode {
    /// Both sides are equal. Holds one representative plus its children,
    /// all pure as well.
    Pure {
        /// The representative value.
        sample: Sample,
        /// Children of the representative, if it is a composite.
        entries: Vec<Entry>,
    },
    /// The sides cannot be compared piecewise. Renders the whole left
    /// subtree, then the whole right subtree.
    Split {
        /// Left (expected) subtree.
        left: Box<DiffNode>,
        /// Right (actual) subtree.
        right: Box<DiffNode>,
    },
    /// A composite whose children were compared one by one.
    Mixed {
        /// The left value, standing in for both.
        sample: Sample,
        /// Children in display order.
        entries: Vec<Entry>,
        /// Aggregated dissimilarity of the children.
        distance: f64,
    },
    /// The walk came back to a value already on its path.
    Cycle,
    /// An absent value of the named type.
    NullMarker {
        /// Display name of the type.
        type_name: String,
    },
    /// Unequal values shown as one line of text per side instead of their
    /// structure.
    FormatOverride {
        /// The structural diff, used when it turns out equal.
        original: Box<DiffNode>,
        /// Rendered left line, e.g. `Duration("1.5s")`.
        left: String,
        /// Rendered right line.
        right: String,
    },
}

/// What a value is shown as.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Kind of the value.
    pub kind: Kind,
    /// Display name of the value's type.
    pub type_name: String,
    /// How the value itself prints.
    pub repr: Repr,
}

/// How a [`Sample`] prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Repr {
    /// A single token, e.g. `42` or `"text"`.
    Scalar(String),
    /// Text from a formatter or self-description, shown as `Type("text")`.
    Formatted(String),
    /// Printed through the node's entries.
    Composite,
}

impl Sample {
    pub(crate) fn of(peek: Peek<'_>, repr: Repr) -> Self {
        Self {
            kind: peek.kind(),
            type_name: peek.shape().to_string(),
            repr,
        }
    }
}

/// One child slot of a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Field name or map key label, when the composite is keyed.
    pub key: Option<EntryKey>,
    /// The child's diff.
    pub value: DiffNode,
    /// Which sides hold this child.
    pub presence: Presence,
}

/// Label of a keyed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKey {
    /// Record field name.
    Field(&'static str),
    /// Rendered map key.
    Key(String),
}

impl EntryKey {
    /// The label as printed before the value.
    pub fn label(&self) -> &str {
        match self {
            EntryKey::Field(name) => name,
            EntryKey::Key(label) => label,
        }
    }
}

/// Which sides of a comparison hold an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present on both sides; the entry's value is their diff.
    Both,
    /// Only the left side has it.
    LeftOnly,
    /// Only the right side has it.
    RightOnly,
}

impl Entry {
    pub(crate) fn both(value: DiffNode) -> Self {
        Self {
            key: None,
            value,
            presence: Presence::Both,
        }
    }

    pub(crate) fn left_only(value: DiffNode) -> Self {
        Self {
            presence: Presence::LeftOnly,
            ..Self::both(value)
        }
    }

    pub(crate) fn right_only(value: DiffNode) -> Self {
        Self {
            presence: Presence::RightOnly,
            ..Self::both(value)
        }
    }

    pub(crate) fn with_key(mut self, key: EntryKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Whether only one side holds this entry.
    pub fn is_one_sided(&self) -> bool {
        self.presence != Presence::Both
    }
}

impl DiffNode {
    /// Dissimilarity. Zero means equal, a split costs 1, and a keyed
    /// composite with nothing in common costs slightly more.
    pub fn loss(&self) -> f64 {
        match self {
            DiffNode::Pure { .. } | DiffNode::Cycle | DiffNode::NullMarker { .. } => 0.0,
            DiffNode::Split { .. } => 1.0,
            DiffNode::Mixed { distance, .. } => *distance,
            DiffNode::FormatOverride { original, .. } => original.loss(),
        }
    }

    /// Whether the two sides compared equal.
    pub fn is_equal(&self) -> bool {
        self.loss() == 0.0
    }

    /// Whether the aligner may pair two elements through this node. Splits
    /// and format overrides mean the elements are better shown apart.
    pub(crate) fn is_comparable(&self) -> bool {
        matches!(
            self,
            DiffNode::Pure { .. }
                | DiffNode::Mixed { .. }
                | DiffNode::Cycle
                | DiffNode::NullMarker { .. }
        )
    }

    pub(crate) fn split(left: DiffNode, right: DiffNode) -> Self {
        DiffNode::Split {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Composite with named children: records, mappings, references.
    pub(crate) fn keyed(sample: Sample, entries: Vec<Entry>) -> Self {
        let distance = keyed_loss(&entries);
        DiffNode::Mixed {
            sample,
            entries,
            distance,
        }
    }

    /// Composite with positional children: sequences and text lines.
    pub(crate) fn indexed(sample: Sample, entries: Vec<Entry>) -> Self {
        let distance = indexed_loss(&entries);
        DiffNode::Mixed {
            sample,
            entries,
            distance,
        }
    }
}

/// One-sided entries cost 1, shared ones cost their child's loss. The sum is
/// divided by `0.9` per entry, so two disjoint maps cost about 1.11 and the
/// aligner keeps them apart instead of pairing them.
fn keyed_loss(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return EMPTY_KEYED_LOSS;
    }
    let total: f64 = entries
        .iter()
        .map(|e| if e.is_one_sided() { 1.0 } else { e.value.loss() })
        .sum();
    total / (COMPOSITE_CAP * entries.len() as f64)
}

/// A split pair counts as two changed slots, a one-sided element as one.
fn indexed_loss(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return COMPOSITE_CAP;
    }
    let mut slots = 0.0;
    let mut total = 0.0;
    for e in entries {
        match &e.value {
            DiffNode::Split { .. } => {
                slots += 2.0;
                total += 2.0;
            }
            _ if e.is_one_sided() => {
                slots += 1.0;
                total += 1.0;
            }
            other => {
                slots += 1.0;
                total += other.loss();
            }
        }
    }
    COMPOSITE_CAP * total / slots
}
