use core::fmt;

use crate::{Def, Field, PeekRecord, Reflect, Shape, TypeNameFn};

macro_rules! impl_tuple {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("(")?;
                let names: &[TypeNameFn] = &[$($name::write_type_name),+];
                for (i, write) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write(f)?;
                }
                if names.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }

            fn shape(&self) -> Shape {
                Shape::of::<Self>()
            }

            fn def(&self) -> Def<'_> {
                Def::Record(PeekRecord::new(vec![
                    $(Field::new(stringify!($idx), &self.$idx)),+
                ]))
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);
