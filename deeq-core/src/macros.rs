/// Implements [`Reflect`](crate::Reflect) for a struct by listing its fields.
///
/// Fields are reported in the order given, which should be declaration
/// order. The type's display name is the struct's identifier.
///
/// ```
/// use deeq_core::{Kind, Peek, reflect_record};
/// use std::time::Duration;
///
/// struct Job {
///     name: String,
///     timeout: Duration,
/// }
///
/// reflect_record!(Job { name, timeout });
///
/// let job = Job { name: "build".into(), timeout: Duration::from_secs(3) };
/// assert_eq!(Peek::new(&job).kind(), Kind::Record);
/// ```
///
/// A trailing `describe = <fn(&Self) -> String>` gives the type a textual
/// self-description:
///
/// ```
/// use deeq_core::{Peek, reflect_record};
///
/// struct Version {
///     major: u32,
///     minor: u32,
/// }
///
/// reflect_record!(Version { major, minor }, describe = |v: &Version| format!("v{}.{}", v.major, v.minor));
///
/// let v = Version { major: 1, minor: 4 };
/// assert_eq!(Peek::new(&v).describe().as_deref(), Some("v1.4"));
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::reflect_record!(@impl $ty { $($field),* } {});
    };
    ($ty:ident { $($field:ident),* $(,)? }, describe = $describe:expr) => {
        $crate::reflect_record!(@impl $ty { $($field),* } {
            fn describe(&self) -> ::core::option::Option<::std::string::String> {
                let describe: fn(&$ty) -> ::std::string::String = $describe;
                ::core::option::Option::Some(describe(self))
            }
        });
    };
    (@impl $ty:ident { $($field:ident),* } { $($extra:tt)* }) => {
        impl $crate::Reflect for $ty {
            fn write_type_name(f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(stringify!($ty))
            }

            fn shape(&self) -> $crate::Shape {
                $crate::Shape::of::<Self>()
            }

            fn def(&self) -> $crate::Def<'_> {
                $crate::Def::Record($crate::PeekRecord::new(::std::vec![
                    $($crate::Field::new(stringify!($field), &self.$field)),*
                ]))
            }

            $($extra)*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Def, Kind, Peek};

    struct Empty {}

    reflect_record!(Empty {});

    struct Pair {
        left: i32,
        right: String,
    }

    reflect_record!(Pair { left, right });

    #[test]
    fn fields_in_listed_order() {
        let p = Pair {
            left: 1,
            right: "r".into(),
        };
        let Def::Record(rec) = Peek::new(&p).def() else {
            panic!("expected a record");
        };
        let names: Vec<_> = rec.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["left", "right"]);
        assert_eq!(rec.field("left").map(|f| f.kind()), Some(Kind::Int));
        assert!(rec.field("missing").is_none());
    }

    #[test]
    fn empty_record() {
        let e = Empty {};
        assert_eq!(Peek::new(&e).shape().to_string(), "Empty");
        assert_eq!(Peek::new(&e).kind(), Kind::Record);
    }
}
