use core::any::Any;
use core::fmt;

use crate::{Kind, Reflect, Shape};

/// A read-only view into a borrowed value.
///
/// `Peek` never owns what it looks at: it lives as long as the borrow of the
/// caller's data and is cheap to copy. The engine walks values exclusively
/// through it.
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    value: &'mem dyn Reflect,
}

impl<'mem> Peek<'mem> {
    /// View of a concrete value.
    #[inline]
    pub fn new<T: Reflect>(value: &'mem T) -> Self {
        Self { value }
    }

    /// View of a value behind a trait object.
    #[inline]
    pub fn from_dyn(value: &'mem dyn Reflect) -> Self {
        Self { value }
    }

    /// Nominal type of the value.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }

    /// Structural view of the value.
    #[inline]
    pub fn def(&self) -> Def<'mem> {
        self.value.def()
    }

    /// Kind of the value.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.def().kind()
    }

    /// Identity handle of the borrowed value.
    ///
    /// This is the data address of the borrow. It is only ever compared,
    /// never dereferenced.
    #[inline]
    pub fn addr(&self) -> usize {
        self.value as *const dyn Reflect as *const () as usize
    }

    /// The text this value describes itself as, if any.
    #[inline]
    pub fn describe(&self) -> Option<String> {
        self.value.describe()
    }

    /// The underlying trait object.
    #[inline]
    pub fn as_dyn(&self) -> &'mem dyn Reflect {
        self.value
    }

    /// Recovers the concrete value if it is a `T`.
    pub fn downcast<T: Reflect>(&self) -> Option<&'mem T> {
        let any: &'mem dyn Any = self.value;
        any.downcast_ref::<T>()
    }

    /// Follows dynamic wrappers down to the value they hold.
    ///
    /// Returns `None` when a wrapper on the way holds nothing.
    pub fn innermost(self) -> Option<Peek<'mem>> {
        let mut current = self;
        loop {
            match current.def() {
                Def::Dynamic(dynamic) => current = dynamic.held()?,
                _ => return Some(current),
            }
        }
    }
}

impl fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.shape(), self.addr())
    }
}

/// A float, remembering its width so it prints the way it was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
}

impl Float {
    /// Widened value.
    pub fn to_f64(self) -> f64 {
        match self {
            Float::F32(v) => f64::from(v),
            Float::F64(v) => v,
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{v:?}"),
            Float::F64(v) => write!(f, "{v:?}"),
        }
    }
}

/// Kind-tagged structural view of a value.
#[derive(Clone)]
pub enum Def<'mem> {
    /// See [`Kind::Null`].
    Null,
    /// See [`Kind::Bool`].
    Bool(bool),
    /// See [`Kind::Int`].
    Int(i64),
    /// See [`Kind::Uint`].
    Uint(u64),
    /// See [`Kind::Float`].
    Float(Float),
    /// See [`Kind::Complex`].
    Complex {
        /// Real part.
        re: Float,
        /// Imaginary part.
        im: Float,
    },
    /// See [`Kind::Text`].
    Text(&'mem str),
    /// See [`Kind::Sequence`].
    Sequence(PeekSequence<'mem>),
    /// See [`Kind::Record`].
    Record(PeekRecord<'mem>),
    /// See [`Kind::Mapping`].
    Mapping(PeekMapping<'mem>),
    /// See [`Kind::Reference`].
    Reference(PeekReference<'mem>),
    /// See [`Kind::Dynamic`].
    Dynamic(PeekDynamic<'mem>),
    /// See [`Kind::Callable`].
    Callable(PeekOpaque),
    /// See [`Kind::Channel`].
    Channel(PeekOpaque),
    /// See [`Kind::Opaque`].
    Opaque,
}

impl Def<'_> {
    /// Kind tag of this view.
    pub fn kind(&self) -> Kind {
        match self {
            Def::Null => Kind::Null,
            Def::Bool(_) => Kind::Bool,
            Def::Int(_) => Kind::Int,
            Def::Uint(_) => Kind::Uint,
            Def::Float(_) => Kind::Float,
            Def::Complex { .. } => Kind::Complex,
            Def::Text(_) => Kind::Text,
            Def::Sequence(_) => Kind::Sequence,
            Def::Record(_) => Kind::Record,
            Def::Mapping(_) => Kind::Mapping,
            Def::Reference(_) => Kind::Reference,
            Def::Dynamic(_) => Kind::Dynamic,
            Def::Callable(_) => Kind::Callable,
            Def::Channel(_) => Kind::Channel,
            Def::Opaque => Kind::Opaque,
        }
    }
}

/// Elements of a sequence, or nil.
#[derive(Clone, Default)]
pub struct PeekSequence<'mem> {
    items: Option<Vec<Peek<'mem>>>,
}

impl<'mem> PeekSequence<'mem> {
    /// A present sequence with these elements.
    pub fn new(items: Vec<Peek<'mem>>) -> Self {
        Self { items: Some(items) }
    }

    /// A sequence that is absent rather than empty.
    pub fn nil() -> Self {
        Self { items: None }
    }

    /// Whether the sequence is absent.
    pub fn is_nil(&self) -> bool {
        self.items.is_none()
    }

    /// Elements in order; empty when nil.
    pub fn items(&self) -> &[Peek<'mem>] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<'mem> FromIterator<Peek<'mem>> for PeekSequence<'mem> {
    fn from_iter<I: IntoIterator<Item = Peek<'mem>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One named field of a record.
#[derive(Clone, Copy, Debug)]
pub struct Field<'mem> {
    /// Field name as declared.
    pub name: &'static str,
    /// Field value.
    pub value: Peek<'mem>,
}

impl<'mem> Field<'mem> {
    /// Field `name` holding `value`.
    pub fn new<T: Reflect>(name: &'static str, value: &'mem T) -> Self {
        Self {
            name,
            value: Peek::new(value),
        }
    }
}

/// Fields of a record in declaration order.
#[derive(Clone, Default)]
pub struct PeekRecord<'mem> {
    fields: Vec<Field<'mem>>,
}

impl<'mem> PeekRecord<'mem> {
    /// Record with these fields.
    pub fn new(fields: Vec<Field<'mem>>) -> Self {
        Self { fields }
    }

    /// All fields.
    pub fn fields(&self) -> &[Field<'mem>] {
        &self.fields
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<Peek<'mem>> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Key/value pairs of a mapping, or nil. Order is unspecified.
#[derive(Clone, Default)]
pub struct PeekMapping<'mem> {
    entries: Option<Vec<(Peek<'mem>, Peek<'mem>)>>,
}

impl<'mem> PeekMapping<'mem> {
    /// A present mapping with these pairs.
    pub fn new(entries: Vec<(Peek<'mem>, Peek<'mem>)>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    /// A mapping that is absent rather than empty.
    pub fn nil() -> Self {
        Self { entries: None }
    }

    /// Whether the mapping is absent.
    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Pairs; empty when nil.
    pub fn entries(&self) -> &[(Peek<'mem>, Peek<'mem>)] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl<'mem> FromIterator<(Peek<'mem>, Peek<'mem>)> for PeekMapping<'mem> {
    fn from_iter<I: IntoIterator<Item = (Peek<'mem>, Peek<'mem>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A reference to one referent, or nil.
#[derive(Clone, Copy, Default)]
pub struct PeekReference<'mem> {
    target: Option<Peek<'mem>>,
}

impl<'mem> PeekReference<'mem> {
    /// Reference to `target`.
    pub fn new(target: Peek<'mem>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Reference pointing nowhere.
    pub fn nil() -> Self {
        Self { target: None }
    }

    /// The referent.
    pub fn target(&self) -> Option<Peek<'mem>> {
        self.target
    }

    /// Whether the reference points nowhere.
    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }
}

/// A dynamic wrapper and what it currently holds.
#[derive(Clone, Copy, Default)]
pub struct PeekDynamic<'mem> {
    held: Option<Peek<'mem>>,
}

impl<'mem> PeekDynamic<'mem> {
    /// Wrapper holding `held`.
    pub fn new(held: Peek<'mem>) -> Self {
        Self { held: Some(held) }
    }

    /// Wrapper holding nothing.
    pub fn nil() -> Self {
        Self { held: None }
    }

    /// The held value.
    pub fn held(&self) -> Option<Peek<'mem>> {
        self.held
    }

    /// Whether nothing is held.
    pub fn is_nil(&self) -> bool {
        self.held.is_none()
    }
}

/// Identity-only view of callables and channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeekOpaque {
    identity: Option<usize>,
}

impl PeekOpaque {
    /// A present handle with the given identity.
    pub fn new(identity: usize) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// An absent handle.
    pub fn nil() -> Self {
        Self { identity: None }
    }

    /// Identity of the handle, `None` when nil.
    pub fn identity(&self) -> Option<usize> {
        self.identity
    }

    /// Whether the handle is absent.
    pub fn is_nil(&self) -> bool {
        self.identity.is_none()
    }
}
