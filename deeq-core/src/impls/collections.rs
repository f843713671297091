use core::fmt;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::{Def, Peek, PeekMapping, PeekSequence, Reflect, Shape};

impl<T: Reflect> Reflect for Vec<T> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vec<")?;
        T::write_type_name(f)?;
        f.write_str(">")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Sequence(self.iter().map(Peek::new).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        T::write_type_name(f)?;
        write!(f, "; {N}]")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Sequence(self.iter().map(Peek::new).collect())
    }
}

impl<T: Reflect> Reflect for Box<[T]> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Box<[")?;
        T::write_type_name(f)?;
        f.write_str("]>")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Sequence(self.iter().map(Peek::new).collect())
    }
}

impl<T: Reflect> Reflect for &'static [T] {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("&[")?;
        T::write_type_name(f)?;
        f.write_str("]")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Sequence(self.iter().map(Peek::new).collect())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VecDeque<")?;
        T::write_type_name(f)?;
        f.write_str(">")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Sequence(self.iter().map(Peek::new).collect::<PeekSequence<'_>>())
    }
}

pub(super) fn write_map_name<K: Reflect, V: Reflect>(
    f: &mut fmt::Formatter<'_>,
    container: &str,
) -> fmt::Result {
    f.write_str(container)?;
    f.write_str("<")?;
    K::write_type_name(f)?;
    f.write_str(", ")?;
    V::write_type_name(f)?;
    f.write_str(">")
}

impl<K: Reflect, V: Reflect, S: 'static> Reflect for HashMap<K, V, S> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_map_name::<K, V>(f, "HashMap")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Mapping(
            self.iter()
                .map(|(k, v)| (Peek::new(k), Peek::new(v)))
                .collect::<PeekMapping<'_>>(),
        )
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_map_name::<K, V>(f, "BTreeMap")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Mapping(
            self.iter()
                .map(|(k, v)| (Peek::new(k), Peek::new(v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::{Def, Kind, Peek};

    #[test]
    fn sequence_names_compose() {
        let v: Vec<Vec<i32>> = vec![vec![1]];
        assert_eq!(Peek::new(&v).shape().to_string(), "Vec<Vec<i32>>");
        let a = [1_u8, 2, 3];
        assert_eq!(Peek::new(&a).shape().to_string(), "[u8; 3]");
    }

    #[test]
    fn sequence_items_point_into_the_vec() {
        let v = vec![10_i32, 20];
        let Def::Sequence(seq) = Peek::new(&v).def() else {
            panic!("expected a sequence");
        };
        assert!(!seq.is_nil());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.items()[1].addr(), &v[1] as *const i32 as usize);
    }

    #[test]
    fn maps_are_mappings() {
        let mut h = HashMap::new();
        h.insert("a".to_string(), 1_i32);
        assert_eq!(Peek::new(&h).kind(), Kind::Mapping);
        assert_eq!(Peek::new(&h).shape().to_string(), "HashMap<String, i32>");

        let b: BTreeMap<u8, bool> = BTreeMap::new();
        let Def::Mapping(map) = Peek::new(&b).def() else {
            panic!("expected a mapping");
        };
        assert!(map.is_empty());
        assert!(!map.is_nil());
    }
}
