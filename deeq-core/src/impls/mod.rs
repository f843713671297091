//! `Reflect` for std types and the optional third-party ones.

mod collections;
#[cfg(feature = "num-complex")]
mod complex;
mod dynamic;
mod function;
#[cfg(feature = "indexmap")]
mod indexmap;
mod pointer;
mod scalar;
mod text;
mod time;
mod tuple;
