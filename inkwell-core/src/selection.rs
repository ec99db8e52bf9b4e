//! Host selection model.
//!
//! A host reports where its caret is as a node plus an intra-node offset,
//! and accepts a collapsed caret at a leaf. Only collapsed, single-point
//! selections carry caret state; ranges are reported but never resolved.

use crate::layout::{LeafId, RootId};

/// The node a selection endpoint sits in, as seen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostNode {
    /// Text leaf rendered for a run.
    Text(LeafId),
    /// Text outside of any editable root.
    ForeignText,
    /// A non-text node, optionally inside an editable root.
    Element { root: Option<RootId> },
}

/// Snapshot of the host's current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: HostNode,
    /// Offset inside the anchor node, in UTF-16 units for text nodes.
    pub anchor_offset: usize,
    pub collapsed: bool,
}

impl Selection {
    pub fn caret(anchor: HostNode, anchor_offset: usize) -> Self {
        Self {
            anchor,
            anchor_offset,
            collapsed: true,
        }
    }

    pub fn range(anchor: HostNode, anchor_offset: usize) -> Self {
        Self {
            anchor,
            anchor_offset,
            collapsed: false,
        }
    }
}

/// Concrete caret target inside a rendered leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub leaf: LeafId,
    pub offset: usize,
}

/// Read/write access to the live selection of a host environment.
pub trait SelectionHost {
    fn selection(&self) -> Option<Selection>;

    /// Drop any selection, range or caret.
    fn clear_selection(&mut self);

    /// Place a collapsed caret, replacing whatever was selected.
    fn set_caret(&mut self, anchor: Anchor);
}

/// In-memory selection host.
#[derive(Debug, Clone, Default)]
pub struct VirtualSelection {
    current: Option<Selection>,
    carets_set: u64,
}

impl VirtualSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user clicking into a rendered leaf.
    pub fn place_caret(&mut self, leaf: LeafId, offset: usize) {
        self.current = Some(Selection::caret(HostNode::Text(leaf), offset));
    }

    /// Simulate a drag selection starting at `anchor`.
    pub fn place_range(&mut self, anchor: HostNode, offset: usize) {
        self.current = Some(Selection::range(anchor, offset));
    }

    /// Simulate a caret in text outside the editable root.
    pub fn place_foreign(&mut self, offset: usize) {
        self.current = Some(Selection::caret(HostNode::ForeignText, offset));
    }

    /// Number of times a caret was forced through [`SelectionHost::set_caret`].
    pub fn carets_set(&self) -> u64 {
        self.carets_set
    }

    /// The caret anchor, if the current selection is a caret in a leaf.
    pub fn caret(&self) -> Option<Anchor> {
        match self.current {
            Some(Selection {
                anchor: HostNode::Text(leaf),
                anchor_offset,
                collapsed: true,
            }) => Some(Anchor {
                leaf,
                offset: anchor_offset,
            }),
            _ => None,
        }
    }
}

impl SelectionHost for VirtualSelection {
    fn selection(&self) -> Option<Selection> {
        self.current
    }

    fn clear_selection(&mut self) {
        self.current = None;
    }

    fn set_caret(&mut self, anchor: Anchor) {
        self.carets_set += 1;
        self.current = Some(Selection::caret(HostNode::Text(anchor.leaf), anchor.offset));
    }
}
