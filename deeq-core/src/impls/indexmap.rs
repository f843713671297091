use core::fmt;

use ::indexmap::IndexMap;

use super::collections::write_map_name;
use crate::{Def, Peek, Reflect, Shape};

impl<K: Reflect, V: Reflect, S: 'static> Reflect for IndexMap<K, V, S> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_map_name::<K, V>(f, "IndexMap")
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
