//! Rendered projection of a run sequence.
//!
//! A `RunLayout` is what a renderer emits: one addressable leaf per run,
//! each tagged with its start offset. It is rebuilt from the run sequence
//! and offset table on every change and is the only place the resolver and
//! reconciler look up run boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::offsets::OffsetTable;
use crate::run::{Run, RunAttributes};

/// Identity of an editable root region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootId(Uuid);

impl RootId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RootId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of the text leaf rendered for run `run` under `root`.
///
/// Leaves are keyed by run index, so the same address refers to whatever
/// run currently sits at that index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafId {
    pub root: RootId,
    pub run: usize,
}

/// A run as placed in the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedRun {
    pub leaf: LeafId,
    /// Offset of the first unit of this run in the document.
    pub start: usize,
    /// Length in UTF-16 units.
    pub len: usize,
    pub text: String,
    pub attributes: RunAttributes,
}

impl RenderedRun {
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunLayout {
    root: RootId,
    runs: Vec<RenderedRun>,
    total_len: usize,
}

impl RunLayout {
    pub fn empty(root: RootId) -> Self {
        Self {
            root,
            runs: Vec::new(),
            total_len: 0,
        }
    }

    /// Place `runs` under `root` using the start offsets from `table`.
    pub fn build(root: RootId, runs: &[Run], table: &OffsetTable) -> Self {
        let rendered = runs
            .iter()
            .zip(table.starts())
            .enumerate()
            .map(|(index, (run, start))| RenderedRun {
                leaf: LeafId { root, run: index },
                start,
                len: run.len(),
                text: run.insert.clone(),
                attributes: run.style(),
            })
            .collect();

        Self {
            root,
            runs: rendered,
            total_len: table.total_len(),
        }
    }

    pub fn root(&self) -> RootId {
        self.root
    }

    pub fn runs(&self) -> &[RenderedRun] {
        &self.runs
    }

    /// The rendered run behind `leaf`, if it belongs to this root and exists.
    pub fn leaf(&self, leaf: LeafId) -> Option<&RenderedRun> {
        if leaf.root != self.root {
            return None;
        }
        self.runs.get(leaf.run)
    }

    /// Start offset metadata of `leaf`.
    pub fn start_of(&self, leaf: LeafId) -> Option<usize> {
        self.leaf(leaf).map(|run| run.start)
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_world() -> Vec<Run> {
        vec![
            Run::plain("Hello "),
            Run::styled("World!", RunAttributes::BOLD),
        ]
    }

    #[test]
    fn test_build_tags_each_leaf_with_its_start() {
        let runs = hello_world();
        let root = RootId::new();
        let layout = RunLayout::build(root, &runs, &OffsetTable::build(&runs));

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.total_len(), 12);
        assert_eq!(layout.runs()[0].start, 0);
        assert_eq!(layout.runs()[1].start, 6);
        assert_eq!(layout.runs()[1].end(), 12);
        assert!(layout.runs()[1].attributes.bold);
        assert!(layout.runs()[0].attributes.is_plain());
    }

    #[test]
    fn test_leaf_lookup_checks_root() {
        let runs = hello_world();
        let root = RootId::new();
        let layout = RunLayout::build(root, &runs, &OffsetTable::build(&runs));

        assert_eq!(layout.start_of(LeafId { root, run: 1 }), Some(6));
        assert_eq!(layout.start_of(LeafId { root, run: 2 }), None);

        let other = RootId::new();
        assert_eq!(layout.start_of(LeafId { root: other, run: 0 }), None);
    }

    #[test]
    fn test_empty_layout() {
        let layout = RunLayout::empty(RootId::new());
        assert!(layout.is_empty());
        assert_eq!(layout.total_len(), 0);
    }
}
