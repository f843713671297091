//! Color backends for diff rendering.
//!
//! The renderer only knows what a piece of text means (deleted, inserted,
//! unchanged). The backend decides how that looks.

use core::fmt::{self, Write};

use owo_colors::OwoColorize;

use crate::DiffTheme;

/// Semantic color meaning of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    /// Left-only content (typically red)
    Deleted,
    /// Right-only content (typically green)
    Inserted,
    /// Content on both sides
    Unchanged,
    /// Gap markers
    Comment,
}

/// Decides how semantic colors are written.
pub trait ColorBackend {
    /// Write styled text to the output.
    fn write_styled<W: Write>(&self, w: &mut W, text: &str, color: SemanticColor)
    -> fmt::Result;
}

/// No styling, just plain text.
///
/// Use this for tests and non-terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl ColorBackend for PlainBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        _color: SemanticColor,
    ) -> fmt::Result {
        w.write_str(text)
    }
}

/// Emits ANSI escape codes using a [`DiffTheme`].
#[derive(Debug, Clone, Default)]
pub struct AnsiBackend {
    theme: DiffTheme,
}

impl AnsiBackend {
    /// Backend with the given theme.
    pub fn new(theme: DiffTheme) -> Self {
        Self { theme }
    }
}

impl ColorBackend for AnsiBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        color: SemanticColor,
    ) -> fmt::Result {
        let rgb = match color {
            SemanticColor::Deleted => self.theme.deleted,
            SemanticColor::Inserted => self.theme.inserted,
            // context stays readable in the terminal's own color
            SemanticColor::Unchanged => return w.write_str(text),
            SemanticColor::Comment => self.theme.comment,
        };
        write!(w, "{}", text.color(rgb))
    }
}
