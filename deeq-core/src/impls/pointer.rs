use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{Def, Peek, PeekReference, Reflect, Shape};

macro_rules! impl_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(concat!(stringify!($ptr), "<"))?;
                    T::write_type_name(f)?;
                    f.write_str(">")
                }

                fn shape(&self) -> Shape {
                    Shape::of::<Self>()
                }

                fn def(&self) -> Def<'_> {
                    Def::Reference(PeekReference::new(Peek::new(&**self)))
                }
            }
        )+
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Reflect> Reflect for &'static T {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("&")?;
        T::write_type_name(f)
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Reference(PeekReference::new(Peek::new(*self)))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{Def, Peek};

    #[test]
    fn shared_pointers_point_at_the_same_referent() {
        let a = Rc::new(5_i32);
        let b = Rc::clone(&a);
        let (Def::Reference(ra), Def::Reference(rb)) = (Peek::new(&a).def(), Peek::new(&b).def())
        else {
            panic!("expected references");
        };
        let (ta, tb) = (ra.target().map(|t| t.addr()), rb.target().map(|t| t.addr()));
        assert_eq!(ta, tb);
        // the handles themselves are distinct
        assert_ne!(Peek::new(&a).addr(), Peek::new(&b).addr());
    }

    #[test]
    fn box_name() {
        let b = Box::new(vec![1_u8]);
        assert_eq!(Peek::new(&b).shape().to_string(), "Box<Vec<u8>>");
    }
}
