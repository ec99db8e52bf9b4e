//! Absolute caret position → host caret.
//!
//! The caret is stored as an absolute [`Position`] and re-anchored against
//! the current layout every time the position or the layout changes, so
//! leaf references never outlive the render that produced them.

use log::debug;

use crate::config::EditorConfig;
use crate::layout::{RenderedRun, RunLayout};
use crate::selection::{Anchor, SelectionHost};
use crate::Position;

/// Pick the leaf and intra-leaf offset for `position`.
///
/// The chosen run is the last one whose start is `<= position.index`. A
/// position on a boundary between two runs therefore lands at offset `0` of
/// the run starting there. Past the document end the last run is used and
/// the offset may exceed that run's length.
pub fn anchor_for(position: Position, layout: &RunLayout) -> Option<Anchor> {
    let mut found: Option<&RenderedRun> = None;
    for run in layout.runs() {
        if run.start > position.index {
            break;
        }
        found = Some(run);
    }

    found.map(|run| Anchor {
        leaf: run.leaf,
        offset: position.index - run.start,
    })
}

/// Force the host selection to match `position`.
///
/// Always clears the host selection first. Returns the anchor that was
/// applied, if any.
pub fn reconcile<H>(
    position: Option<Position>,
    layout: &RunLayout,
    host: &mut H,
    config: &EditorConfig,
) -> Option<Anchor>
where
    H: SelectionHost + ?Sized,
{
    host.clear_selection();

    let position = position?;

    let Some(mut anchor) = anchor_for(position, layout) else {
        debug!("reconcile: no run at or before {}", position.index);
        return None;
    };

    if config.clamp_caret_to_run {
        if let Some(run) = layout.leaf(anchor.leaf) {
            anchor.offset = anchor.offset.min(run.len);
        }
    }

    debug!(
        "reconcile: caret {} -> run {} offset {}",
        position.index, anchor.leaf.run, anchor.offset
    );
    host.set_caret(anchor);
    Some(anchor)
}
