//! Side-annotated document tree.

use indextree::{Arena, NodeId};

use crate::VirtualLine;

/// Which side of a comparison a piece of output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Present on both sides; shown as context.
    #[default]
    Both,
    /// Only on the left (expected) side.
    Left,
    /// Only on the right (actual) side.
    Right,
}

impl Side {
    /// Whether this side marks a difference.
    pub const fn is_diff(self) -> bool {
        !matches!(self, Side::Both)
    }
}

/// One line's worth of text and its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Text without indentation or marker.
    pub text: String,
    /// Side of the line.
    pub side: Side,
}

impl Fragment {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side: Side::Both,
        }
    }
}

/// A node in the document tree.
///
/// Block bodies are the node's children in the arena; they render one
/// level deeper than the block's open and close lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    /// A single line.
    Inline(Fragment),
    /// An opening line, an indented body, and a closing line.
    Block {
        /// Opening line, e.g. `Vec<i32>{`.
        open: Fragment,
        /// Closing line, e.g. `}`.
        close: Fragment,
    },
}

/// An arena of document nodes plus the ordered list of top-level nodes.
#[derive(Debug, Default)]
pub struct Document {
    tree: Arena<DocNode>,
    roots: Vec<NodeId>,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached inline node.
    pub fn inline(&mut self, text: impl Into<String>) -> NodeId {
        self.tree.new_node(DocNode::Inline(Fragment::new(text)))
    }

    /// Adds a detached block whose body is `body`, in order.
    pub fn block(
        &mut self,
        open: impl Into<String>,
        body: impl IntoIterator<Item = NodeId>,
        close: impl Into<String>,
    ) -> NodeId {
        let node = self.tree.new_node(DocNode::Block {
            open: Fragment::new(open),
            close: Fragment::new(close),
        });
        for child in body {
            node.append(child, &mut self.tree);
        }
        node
    }

    /// Appends a node to the top level.
    pub fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    /// Top-level nodes in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Node by id.
    pub fn get(&self, id: NodeId) -> Option<&DocNode> {
        self.tree.get(id).map(|n| n.get())
    }

    /// Body of a block, in order. Empty for inline nodes.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.tree)
    }

    /// Forces `id` and everything under it onto `side`.
    pub fn force_side(&mut self, id: NodeId, side: Side) {
        let ids: Vec<NodeId> = id.descendants(&self.tree).collect();
        for id in ids {
            match self.tree.get_mut(id).map(|n| n.get_mut()) {
                Some(DocNode::Inline(fragment)) => fragment.side = side,
                Some(DocNode::Block { open, close }) => {
                    open.side = side;
                    close.side = side;
                }
                None => {}
            }
        }
    }

    /// Prepends `prefix` to the first line of `id`.
    pub fn add_prefix(&mut self, id: NodeId, prefix: &str) {
        let fragment = match self.tree.get_mut(id).map(|n| n.get_mut()) {
            Some(DocNode::Inline(fragment)) => fragment,
            Some(DocNode::Block { open, .. }) => open,
            None => return,
        };
        fragment.text.insert_str(0, prefix);
    }

    /// Appends `suffix` to the last line of `id`.
    pub fn add_suffix(&mut self, id: NodeId, suffix: &str) {
        let fragment = match self.tree.get_mut(id).map(|n| n.get_mut()) {
            Some(DocNode::Inline(fragment)) => fragment,
            Some(DocNode::Block { close, .. }) => close,
            None => return,
        };
        fragment.text.push_str(suffix);
    }

    /// Flattens the top-level nodes into lines.
    pub fn lines(&self) -> Vec<VirtualLine> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.flatten(root, 0, &mut out);
        }
        out
    }

    fn flatten(&self, id: NodeId, depth: usize, out: &mut Vec<VirtualLine>) {
        match self.get(id) {
            Some(DocNode::Inline(fragment)) => out.push(VirtualLine::new(fragment, depth)),
            Some(DocNode::Block { open, close }) => {
                let open_at = out.len();
                out.push(VirtualLine::new(open, depth));
                for child in self.children(id) {
                    self.flatten(child, depth + 1, out);
                }
                let body_differs = out[open_at + 1..].iter().any(|l| l.is_diff_line());
                out.push(VirtualLine::new(close, depth));
                if body_differs {
                    out[open_at].is_context = true;
                    if let Some(last) = out.last_mut() {
                        last.is_context = true;
                    }
                }
            }
            None => {}
        }
    }
}
