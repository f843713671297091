use core::fmt;
use core::time::Duration;

use crate::{Def, Reflect, Shape};

impl Reflect for Duration {
    fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Duration")
    }

    fn shape(&self) -> Shape {
        Shape::of::<Self>()
    }

    // Saturates past ~584 years of nanoseconds.
    fn def(&self) -> Def<'_> {
        Def::Uint(u64::try_from(self.as_nanos()).unwrap_or(u64::MAX))
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{self:?}"))
    }
}
