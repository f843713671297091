//! Compiles a diff tree into a side-annotated document.

use deeq_core::Kind;
use deeq_diff_core::{ColorBackend, Document, NodeId, RenderOptions, Side, render_to_string};

use crate::print::CIRCULAR;
use crate::{DiffNode, Entry, Presence, Repr, Sample};

impl DiffNode {
    /// The document this tree renders as.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for id in self.docs(&mut doc) {
            doc.push_root(id);
        }
        doc
    }

    /// Renders the differing parts of this tree, windowed. Empty when the
    /// two sides are equal.
    pub fn render<B: ColorBackend>(&self, opts: &RenderOptions<B>) -> String {
        render_to_string(&self.to_document().lines(), opts)
    }

    fn docs(&self, doc: &mut Document) -> Vec<NodeId> {
        match self {
            DiffNode::Pure { sample, entries }
            | DiffNode::Mixed {
                sample, entries, ..
            } => sample_docs(sample, entries, doc),
            DiffNode::Split { left, right } => {
                let mut ids = left.docs(doc);
                for &id in &ids {
                    doc.force_side(id, Side::Left);
                }
                for id in right.docs(doc) {
                    doc.force_side(id, Side::Right);
                    ids.push(id);
                }
                ids
            }
            DiffNode::Cycle => vec![doc.inline(CIRCULAR)],
            DiffNode::NullMarker { type_name } => vec![doc.inline(format!("{type_name}(nil)"))],
            DiffNode::FormatOverride {
                original,
                left,
                right,
            } => {
                if original.is_equal() {
                    return original.docs(doc);
                }
                let l = doc.inline(left.as_str());
                doc.force_side(l, Side::Left);
                let r = doc.inline(right.as_str());
                doc.force_side(r, Side::Right);
                vec![l, r]
            }
        }
    }
}

fn sample_docs(sample: &Sample, entries: &[Entry], doc: &mut Document) -> Vec<NodeId> {
    let name = &sample.type_name;
    match &sample.repr {
        Repr::Scalar(text) => vec![doc.inline(text.as_str())],
        Repr::Formatted(text) => vec![doc.inline(format!("{name}({text:?})"))],
        Repr::Composite => match sample.kind {
            Kind::Reference => {
                let ids = entry_docs(entries, doc, "");
                for &id in &ids {
                    doc.add_prefix(id, "&");
                }
                ids
            }
            Kind::Text => {
                let body = entry_docs(entries, doc, ",");
                vec![doc.block(format!("{name}("), body, ")")]
            }
            _ => {
                let body = entry_docs(entries, doc, ",");
                vec![doc.block(format!("{name}{{"), body, "}")]
            }
        },
    }
}

/// Docs of every entry: labelled, suffixed, and forced onto their side
/// when only one side holds them.
fn entry_docs(entries: &[Entry], doc: &mut Document, suffix: &str) -> Vec<NodeId> {
    let mut out = Vec::new();
    for entry in entries {
        let ids = entry.value.docs(doc);
        for &id in &ids {
            if let Some(key) = &entry.key {
                doc.add_prefix(id, &format!("{}: ", key.label()));
            }
            doc.add_suffix(id, suffix);
            match entry.presence {
                Presence::Both => {}
                Presence::LeftOnly => doc.force_side(id, Side::Left),
                Presence::RightOnly => doc.force_side(id, Side::Right),
            }
        }
        out.extend(ids);
    }
    out
}
