//! Selection snapshot → absolute caret position.

use log::trace;

use crate::layout::RunLayout;
use crate::selection::{HostNode, Selection};
use crate::Position;

/// Resolve a host selection against the current layout.
///
/// Returns `None` unless the selection is a caret inside a text leaf of
/// `layout`'s root whose run is still present in the layout.
pub fn resolve_position(selection: Option<&Selection>, layout: &RunLayout) -> Option<Position> {
    let Some(selection) = selection else {
        trace!("resolve: no selection");
        return None;
    };

    if !selection.collapsed {
        trace!("resolve: range selections carry no caret");
        return None;
    }

    let leaf = match selection.anchor {
        HostNode::Text(leaf) => leaf,
        HostNode::ForeignText => {
            trace!("resolve: caret outside the editable root");
            return None;
        }
        HostNode::Element { .. } => {
            trace!("resolve: caret anchored on an element, not a text leaf");
            return None;
        }
    };

    if leaf.root != layout.root() {
        trace!("resolve: leaf belongs to root {}, not {}", leaf.root, layout.root());
        return None;
    }

    let Some(start) = layout.start_of(leaf) else {
        trace!("resolve: no start offset for run {}", leaf.run);
        return None;
    };

    Some(Position::new(start.saturating_add(selection.anchor_offset)))
}
