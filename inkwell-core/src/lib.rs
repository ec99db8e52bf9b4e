//! # inkwell-core — caret tracking over a CRDT-backed rich-text document
//!
//! Maps the styled runs of a `yrs` text (the Yjs delta) onto an editable
//! region with one leaf per run, and keeps a single collapsed caret stable
//! while the run layout is rebuilt underneath it.
//!
//! ## Data flow
//!
//! ```text
//!  TextEngine change ──► Editor::refresh ──► OffsetTable ──► RunLayout
//!                                                              │
//!  host selection ──► resolve_position ──► Position ◄──────────┤
//!                                             │                │
//!                                             ▼                ▼
//!                                   reconcile ──► SelectionHost::set_caret
//! ```
//!
//! All offsets count UTF-16 code units, the unit a browser selection reports
//! and the unit the `yrs` document is configured with.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod editor;
pub mod engine;
pub mod input;
pub mod layout;
pub mod offsets;
pub mod reconcile;
pub mod resolve;
pub mod run;
pub mod selection;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorState};
pub use engine::{EngineError, Subscription, TextEngine, YrsTextEngine};
pub use input::{is_suppressed_key, InputEvent};
pub use layout::{LeafId, RenderedRun, RootId, RunLayout};
pub use offsets::OffsetTable;
pub use reconcile::{anchor_for, reconcile};
pub use resolve::resolve_position;
pub use run::{Run, RunAttributes};
pub use selection::{Anchor, HostNode, Selection, SelectionHost, VirtualSelection};

/// Absolute caret offset into the concatenated document text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
}

impl Position {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// The position `len` units further along.
    pub fn advanced_by(self, len: usize) -> Self {
        Self {
            index: self.index.saturating_add(len),
        }
    }
}
