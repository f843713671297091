use core::fmt;

use crate::{Def, Float, Reflect, Shape};

macro_rules! impl_scalar {
    ($variant:ident, $target:ty: $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($ty))
                }

                fn shape(&self) -> Shape {
                    Shape::of::<Self>()
                }

                #[allow(clippy::unnecessary_cast)]
                fn def(&self) -> Def<'_> {
                    Def::$variant(*self as $target)
                }
            }
        )+
    };
}

impl_scalar!(Int, i64: i8, i16, i32, i64, isize);
impl_scalar!(Uint, u64: u8, u16, u32, u64, usize);

impl Reflect for bool {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bool")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Bool(*self)
    }
}

impl Reflect for f32 {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("f32")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Float(Float::F32(*self))
    }
}

impl Reflect for f64 {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("f64")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Float(Float::F64(*self))
    }
}

impl Reflect for () {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Null
    }
}

#[cfg(test)]
mod tests {
    use crate::{Def, Kind, Peek};

    #[test]
    fn integers_widen() {
        let v = -3_i8;
        assert!(matches!(Peek::new(&v).def(), Def::Int(-3)));
        let v = 7_usize;
        assert!(matches!(Peek::new(&v).def(), Def::Uint(7)));
    }

    #[test]
    fn float_keeps_its_width_for_display() {
        let v = 1.1_f32;
        let Def::Float(float) = Peek::new(&v).def() else {
            panic!("expected a float");
        };
        assert_eq!(float.to_string(), "1.1");
    }

    #[test]
    fn unit_is_null() {
        assert_eq!(Peek::new(&()).kind(), Kind::Null);
        assert_eq!(Peek::new(&()).shape().to_string(), "()");
    }
}
