use core::cell::OnceCell;
use core::fmt;

use crate::{Def, Peek, PeekDynamic, Reflect, Shape};

impl<T: Reflect> Reflect for Option<T> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Option<")?;
        T::write_type_name(f)?;
        f.write_str(">")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Dynamic(match self {
            Some(held) => PeekDynamic::new(Peek::new(held)),
            None => PeekDynamic::nil(),
        })
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnceCell<")?;
        T::write_type_name(f)?;
        f.write_str(">")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Dynamic(match self.get() {
            Some(held) => PeekDynamic::new(Peek::new(held)),
            None => PeekDynamic::nil(),
        })
    }
}

impl Reflect for Box<dyn Reflect> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Box<dyn Reflect>")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Dynamic(PeekDynamic::new(Peek::from_dyn(&**self)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Kind, Peek, Reflect};

    #[test]
    fn option_is_dynamic() {
        let some = Some(3_u8);
        let none: Option<u8> = None;
        assert_eq!(Peek::new(&some).kind(), Kind::Dynamic);
        assert_eq!(Peek::new(&some).innermost().map(|p| p.kind()), Some(Kind::Uint));
        assert!(Peek::new(&none).innermost().is_none());
    }

    #[test]
    fn boxed_trait_objects_keep_the_concrete_shape() {
        let v: Box<dyn Reflect> = Box::new("hi".to_string());
        let inner = Peek::new(&v).innermost().map(|p| p.shape().to_string());
        assert_eq!(inner.as_deref(), Some("String"));
        assert_eq!(Peek::new(&v).shape().to_string(), "Box<dyn Reflect>");
    }
}
