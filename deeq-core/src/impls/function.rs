use core::any::TypeId;
use core::fmt;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

use crate::{Def, PeekOpaque, Reflect, Shape, TypeNameFn};

fn write_return<R: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if TypeId::of::<R>() == TypeId::of::<()>() {
        return Ok(());
    }
    f.write_str(" -> ")?;
    R::write_type_name(f)
}

macro_rules! impl_fn_ptr {
    ($($arg:ident),*) => {
        impl<$($arg: Reflect,)* R: Reflect> Reflect for fn($($arg),*) -> R {
            fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("fn(")?;
                let args: &[TypeNameFn] = &[$($arg::write_type_name),*];
                for (i, write) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write(f)?;
                }
                f.write_str(")")?;
                write_return::<R>(f)
            }

            fn shape(&self) -> Shape {
                Shape::of::<Self>()
            }

            fn def(&self) -> Def<'_> {
                Def::Callable(PeekOpaque::new(*self as usize))
            }
        }
    };
}

impl_fn_ptr!();
impl_fn_ptr!(A);
impl_fn_ptr!(A, B);
impl_fn_ptr!(A, B, C);

macro_rules! impl_channel {
    ($($chan:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $chan<T> {
                fn write_type_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(concat!(stringify!($chan), "<"))?;
                    T::write_type_name(f)?;
                    f.write_str(">")
                }

                fn shape(&self) -> Shape {
                    Shape::of::<Self>()
                }

                fn def(&self) -> Def<'_> {
                    Def::Channel(PeekOpaque::new(self as *const Self as usize))
                }
            }
        )+
    };
}

impl_channel!(Sender, SyncSender, Receiver);

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crate::{Def, Kind, Peek};

    fn double(x: i32) -> i32 {
        x * 2
    }

    fn noop() {}

    #[test]
    fn fn_pointer_names() {
        let f: fn(i32) -> i32 = double;
        assert_eq!(Peek::new(&f).shape().to_string(), "fn(i32) -> i32");
        let g: fn() = noop;
        assert_eq!(Peek::new(&g).shape().to_string(), "fn()");
        assert_eq!(Peek::new(&g).kind(), Kind::Callable);
    }

    #[test]
    fn channel_identity_is_the_handle() {
        let (tx, _rx) = mpsc::channel::<bool>();
        let Def::Channel(handle) = Peek::new(&tx).def() else {
            panic!("expected a channel");
        };
        assert_eq!(handle.identity(), Some(&tx as *const _ as usize));
        assert_eq!(Peek::new(&tx).shape().to_string(), "Sender<bool>");
    }
}
