#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod backend;
mod doc;
mod lines;
mod render;
mod symbols;
mod theme;

pub use backend::{AnsiBackend, ColorBackend, PlainBackend, SemanticColor};
pub use doc::{DocNode, Document, Fragment, Side};
pub use indextree::NodeId;
pub use lines::VirtualLine;
pub use render::{RenderOptions, render, render_to_string, visible_lines};
pub use symbols::DiffSymbols;
pub use theme::DiffTheme;
