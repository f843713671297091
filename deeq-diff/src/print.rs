//! Textual forms of single values.

use core::fmt::Write;

use deeq_core::{Def, Peek, Shape, VisitKey, Visits};

use crate::mapping::sorted_entries;
use crate::{DEFAULT_DIFF_DEPTH, DiffError, Result, Rules};

/// Marker printed where a walk meets a value already on its path.
pub(crate) const CIRCULAR: &str = "<circular reference>";

/// The token a scalar prints as, or `None` for non-scalars.
pub(crate) fn scalar_text(def: &Def<'_>) -> Option<String> {
    let text = match def {
        Def::Null => "()".to_owned(),
        Def::Bool(b) => b.to_string(),
        Def::Int(i) => i.to_string(),
        Def::Uint(u) => u.to_string(),
        Def::Float(f) => f.to_string(),
        Def::Complex { re, im } => {
            if im.to_f64().is_sign_negative() {
                format!("{re}{im}i")
            } else {
                format!("{re}+{im}i")
            }
        }
        Def::Text(s) => format!("{s:?}"),
        _ => return None,
    };
    Some(text)
}

pub(crate) fn formatted_text(shape: &Shape, text: &str) -> String {
    format!("{shape}({text:?})")
}

pub(crate) fn null_text(shape: &Shape) -> String {
    format!("{shape}(nil)")
}

pub(crate) fn callable_text(shape: &Shape) -> String {
    format!("{shape} {{ ... }}")
}

pub(crate) fn opaque_text(shape: &Shape) -> String {
    format!("{shape} {{ .. }}")
}

/// Renders `peek` on a single line, e.g. `Point{x: 1, y: 2}`.
///
/// Formatters and self-descriptions in `rules` take precedence over
/// structure, the same way they do in a diff.
pub fn inline(peek: Peek<'_>, rules: &Rules) -> Result<String> {
    let mut out = String::new();
    InlinePrinter {
        rules,
        max_depth: DEFAULT_DIFF_DEPTH,
    }
    .write(&mut out, peek, &Visits::new(), 0)?;
    Ok(out)
}

struct InlinePrinter<'r> {
    rules: &'r Rules,
    max_depth: usize,
}

impl InlinePrinter<'_> {
    fn write(&self, out: &mut String, v: Peek<'_>, visits: &Visits, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(DiffError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        let shape = v.shape();
        if let Some(text) = self.rules.display_text(v)? {
            out.push_str(&formatted_text(&shape, &text));
            return Ok(());
        }
        let def = v.def();
        if let Some(text) = scalar_text(&def) {
            out.push_str(&text);
            return Ok(());
        }

        let visits = if def.kind().is_reference_bearing() {
            let key = VisitKey::single(v);
            if visits.contains(&key) {
                out.push_str(CIRCULAR);
                return Ok(());
            }
            visits.with(key)
        } else {
            visits.clone()
        };

        match def {
            Def::Sequence(seq) if seq.is_nil() => out.push_str(&null_text(&shape)),
            Def::Sequence(seq) => {
                let _ = write!(out, "{shape}{{");
                for (i, item) in seq.items().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(out, *item, &visits, depth + 1)?;
                }
                out.push('}');
            }
            Def::Record(rec) => {
                let _ = write!(out, "{shape}{{");
                for (i, field) in rec.fields().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}: ", field.name);
                    self.write(out, field.value, &visits, depth + 1)?;
                }
                out.push('}');
            }
            Def::Mapping(map) if map.is_nil() => out.push_str(&null_text(&shape)),
            Def::Mapping(map) => {
                let _ = write!(out, "{shape}{{");
                for (i, (slot, _, value)) in sorted_entries(map.entries(), self.rules)?
                    .into_iter()
                    .enumerate()
                {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}: ", slot.label());
                    self.write(out, value, &visits, depth + 1)?;
                }
                out.push('}');
            }
            Def::Reference(reference) => match reference.target() {
                Some(target) => {
                    out.push('&');
                    self.write(out, target, &visits, depth + 1)?;
                }
                None => out.push_str(&null_text(&shape)),
            },
            Def::Dynamic(dynamic) => match dynamic.held() {
                Some(held) => self.write(out, held, &visits, depth + 1)?,
                None => out.push_str(&null_text(&shape)),
            },
            Def::Callable(handle) if handle.is_nil() => out.push_str(&null_text(&shape)),
            Def::Callable(_) => out.push_str(&callable_text(&shape)),
            Def::Channel(handle) if handle.is_nil() => out.push_str(&null_text(&shape)),
            Def::Channel(_) => out.push_str(&shape.to_string()),
            Def::Opaque => out.push_str(&opaque_text(&shape)),
            Def::Null
            | Def::Bool(_)
            | Def::Int(_)
            | Def::Uint(_)
            | Def::Float(_)
            | Def::Complex { .. }
            | Def::Text(_) => {
                return Err(DiffError::invariant("scalar reached the composite printer"));
            }
        }
        Ok(())
    }
}
