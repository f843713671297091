//! Windowed rendering of virtual lines.

use core::fmt::{self, Write};

use crate::{AnsiBackend, ColorBackend, DiffSymbols, PlainBackend, SemanticColor, Side, VirtualLine};

/// Options for rendering lines.
#[derive(Clone, Debug)]
pub struct RenderOptions<B: ColorBackend> {
    /// Symbols to use for diff markers.
    pub symbols: DiffSymbols,
    /// Color backend for styling output.
    pub backend: B,
    /// Indentation string (default: 2 spaces).
    pub indent: &'static str,
    /// Unchanged lines kept visible on each side of a differing line (default: 2).
    pub sight_width: usize,
}

impl Default for RenderOptions<AnsiBackend> {
    fn default() -> Self {
        Self::with_backend(AnsiBackend::default())
    }
}

impl RenderOptions<PlainBackend> {
    /// Create options with plain backend (no colors).
    pub fn plain() -> Self {
        Self::with_backend(PlainBackend)
    }
}

impl<B: ColorBackend> RenderOptions<B> {
    /// Create options with a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            symbols: DiffSymbols::default(),
            backend,
            indent: "  ",
            sight_width: 2,
        }
    }

    /// Set how many unchanged lines stay visible around each difference.
    pub fn sight_width(mut self, sight_width: usize) -> Self {
        self.sight_width = sight_width;
        self
    }
}

/// Which lines survive windowing.
///
/// A line is visible if it is a context line, or if it lies within
/// `sight_width` lines of a differing line.
pub fn visible_lines(lines: &[VirtualLine], sight_width: usize) -> Vec<bool> {
    let mut visible: Vec<bool> = lines.iter().map(|l| l.is_context).collect();
    for (i, line) in lines.iter().enumerate() {
        if !line.is_diff_line() {
            continue;
        }
        let lo = i.saturating_sub(sight_width);
        let hi = (i + sight_width).min(lines.len() - 1);
        visible[lo..=hi].fill(true);
    }
    visible
}

/// Render lines to a writer.
///
/// Writes nothing when no line differs. Hidden runs become a single gap
/// marker line; lines are separated by `\n` with no trailing newline.
pub fn render<W: Write, B: ColorBackend>(
    lines: &[VirtualLine],
    w: &mut W,
    opts: &RenderOptions<B>,
) -> fmt::Result {
    if !lines.iter().any(VirtualLine::is_diff_line) {
        return Ok(());
    }
    let visible = visible_lines(lines, opts.sight_width);
    tracing::trace!(
        total = lines.len(),
        shown = visible.iter().filter(|v| **v).count(),
        "windowed diff lines"
    );

    let mut first = true;
    let mut in_gap = false;
    for (line, shown) in lines.iter().zip(visible) {
        if !shown {
            if !in_gap {
                start_line(w, &mut first)?;
                opts.backend
                    .write_styled(w, opts.symbols.gap, SemanticColor::Comment)?;
                in_gap = true;
            }
            continue;
        }
        in_gap = false;
        start_line(w, &mut first)?;
        write_line(w, line, opts)?;
    }
    Ok(())
}

/// Render lines to a String.
pub fn render_to_string<B: ColorBackend>(lines: &[VirtualLine], opts: &RenderOptions<B>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render(lines, &mut out, opts);
    out
}

fn start_line<W: Write>(w: &mut W, first: &mut bool) -> fmt::Result {
    if !*first {
        w.write_char('\n')?;
    }
    *first = false;
    Ok(())
}

fn write_line<W: Write, B: ColorBackend>(
    w: &mut W,
    line: &VirtualLine,
    opts: &RenderOptions<B>,
) -> fmt::Result {
    let (marker, color) = match line.side {
        Side::Both => (" ", SemanticColor::Unchanged),
        Side::Left => (opts.symbols.deleted, SemanticColor::Deleted),
        Side::Right => (opts.symbols.inserted, SemanticColor::Inserted),
    };
    let mut text = String::with_capacity(line.text.len() + 2 + line.depth * opts.indent.len());
    text.push_str(marker);
    text.push(' ');
    for _ in 0..line.depth {
        text.push_str(opts.indent);
    }
    text.push_str(&line.text);
    opts.backend.write_styled(w, &text, color)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::Document;

    fn numbers(doc: &mut Document, range: core::ops::RangeInclusive<u32>, changed: u32) {
        let items: Vec<_> = range
            .map(|n| {
                let id = doc.inline(format!("{n},"));
                if n == changed {
                    doc.force_side(id, Side::Left);
                }
                id
            })
            .collect();
        let list = doc.block("Vec<u32>{", items, "}");
        doc.push_root(list);
    }

    #[test]
    fn no_differences_render_empty() {
        deeq_testhelpers::setup();
        let mut doc = Document::new();
        numbers(&mut doc, 1..=3, 0);
        assert_eq!(render_to_string(&doc.lines(), &RenderOptions::plain()), "");
    }

    #[test]
    fn distant_lines_collapse_into_gaps() {
        deeq_testhelpers::setup();
        let mut doc = Document::new();
        numbers(&mut doc, 1..=9, 5);
        let text = render_to_string(&doc.lines(), &RenderOptions::plain());
        assert_eq!(
            text,
            indoc! {"
                  Vec<u32>{
                :
                    3,
                    4,
                -   5,
                    6,
                    7,
                :
                  }"}
        );
    }

    #[test]
    fn sight_width_is_configurable() {
        deeq_testhelpers::setup();
        let mut doc = Document::new();
        numbers(&mut doc, 1..=5, 3);
        let text = render_to_string(&doc.lines(), &RenderOptions::plain().sight_width(0));
        assert_eq!(text, "  Vec<u32>{\n:\n-   3,\n:\n  }");
    }

    #[test]
    fn ansi_rendering_keeps_the_text() {
        deeq_testhelpers::setup();
        let mut doc = Document::new();
        numbers(&mut doc, 1..=1, 1);
        let text = render_to_string(&doc.lines(), &RenderOptions::default());
        assert!(text.contains("\x1b["));
        assert!(text.contains("1,"));
    }
}
