use core::fmt;

use num_complex::Complex;

use crate::{Def, Float, Reflect, Shape};

impl Reflect for Complex<f32> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Complex<f32>")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Complex {
            re: Float::F32(self.re),
            im: Float::F32(self.im),
        }
    }
}

impl Reflect for Complex<f64> {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Complex<f64>")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    fn def(&self) -> Def<'_> {
        Def::Complex {
            re: Float::F64(self.re),
            im: Float::F64(self.im),
        }
    }
}
