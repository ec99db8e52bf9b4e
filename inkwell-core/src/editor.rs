//! Editor state: ties the text engine, the rendered layout and the caret.
//!
//! `Editor` is the single owner of caret state for one editable root. It
//! reacts to two event sources:
//!
//! 1. Engine change notifications, which bump a shared counter. `refresh`
//!    re-reads the delta and rebuilds the offset table and layout when the
//!    runs actually changed.
//! 2. Host selection changes, which `handle_selection_change` resolves into
//!    an absolute [`Position`] against the latest layout.
//!
//! `flush` re-applies the stored position to the host whenever either the
//! position or the layout changed since the last flush.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::EditorConfig;
use crate::engine::{Subscription, TextEngine};
use crate::input::InputEvent;
use crate::layout::{RootId, RunLayout};
use crate::offsets::OffsetTable;
use crate::reconcile::reconcile;
use crate::resolve::resolve_position;
use crate::run::{utf16_len, Run};
use crate::selection::{Selection, SelectionHost};
use crate::Position;

/// Serializable view of the editor, for debugging panes and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub selection: Option<Position>,
    pub text: Vec<Run>,
}

pub struct Editor<E: TextEngine> {
    engine: Arc<E>,
    config: EditorConfig,
    root: RootId,

    /// Last observed run sequence; only replaced when it changes.
    runs: Vec<Run>,
    table: OffsetTable,
    layout: RunLayout,

    position: Option<Position>,

    /// Bumped by the engine observer on every mutation.
    changes: Arc<AtomicU64>,
    seen_changes: u64,

    /// Set when the position or layout changed since the last flush.
    needs_reconcile: bool,

    _subscription: Subscription,
}

impl<E: TextEngine> Editor<E> {
    pub fn new(engine: Arc<E>, config: EditorConfig) -> Self {
        let changes = Arc::new(AtomicU64::new(0));
        let counter = changes.clone();
        let subscription = engine.observe(Box::new(move || {
            counter.fetch_add(1, Ordering::AcqRel);
        }));

        let root = RootId::new();
        let runs = engine.to_delta();
        let table = OffsetTable::build(&runs);
        let layout = RunLayout::build(root, &runs, &table);
        let seen_changes = changes.load(Ordering::Acquire);

        debug!("editor {root}: {} runs, length {}", runs.len(), table.total_len());

        Self {
            engine,
            config,
            root,
            runs,
            table,
            layout,
            position: None,
            changes,
            seen_changes,
            needs_reconcile: true,
            _subscription: subscription,
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn root(&self) -> RootId {
        self.root
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.table
    }

    pub fn layout(&self) -> &RunLayout {
        &self.layout
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Whether `runs` is structurally equal to the last observed sequence.
    pub fn is_unchanged(&self, runs: &[Run]) -> bool {
        self.runs.as_slice() == runs
    }

    /// Pick up engine changes. Returns `true` if the layout was rebuilt.
    pub fn refresh(&mut self) -> bool {
        let current = self.changes.load(Ordering::Acquire);
        if current == self.seen_changes {
            return false;
        }
        self.seen_changes = current;

        let runs = self.engine.to_delta();
        if self.is_unchanged(&runs) {
            trace!("editor {}: delta unchanged", self.root);
            return false;
        }

        self.table = OffsetTable::build(&runs);
        self.layout = RunLayout::build(self.root, &runs, &self.table);
        self.runs = runs;
        self.needs_reconcile = true;
        self.position = self.clamped(self.position);

        debug!(
            "editor {}: layout rebuilt, {} runs, length {}",
            self.root,
            self.runs.len(),
            self.table.total_len()
        );
        true
    }

    /// Replace the caret. Returns `true` if it changed.
    pub fn set_position(&mut self, position: Option<Position>) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        self.needs_reconcile = true;
        true
    }

    /// React to a host selection change. Returns `true` if the caret moved.
    pub fn handle_selection_change(&mut self, selection: Option<&Selection>) -> bool {
        self.refresh();
        let position = self.clamped(resolve_position(selection, &self.layout));
        self.set_position(position)
    }

    /// Keep a caret inside `0..=total_len` of the current layout.
    fn clamped(&self, position: Option<Position>) -> Option<Position> {
        let total = self.table.total_len();
        position.map(|pos| {
            if pos.index > total {
                debug!("editor {}: caret {} clamped to {total}", self.root, pos.index);
                Position::new(total)
            } else {
                pos
            }
        })
    }

    /// Apply typed text at the caret.
    ///
    /// Returns `true` if the engine accepted the insertion. Without a caret,
    /// for non-text input, or for empty text this does nothing.
    pub fn handle_before_input(&mut self, input: &InputEvent) -> bool {
        let Some(text) = input.text() else {
            trace!("input: not plain text");
            return false;
        };
        if text.is_empty() {
            return false;
        }
        let Some(position) = self.position else {
            trace!("input: no caret");
            return false;
        };

        if let Err(e) = self.engine.insert(position.index, text, None) {
            warn!("input: dropping insert at {}: {e}", position.index);
            return false;
        }

        self.set_position(Some(position.advanced_by(utf16_len(text))));
        true
    }

    /// Refresh, then force the host caret if anything moved since the last
    /// flush. Returns `true` if the host was touched.
    pub fn flush<H>(&mut self, host: &mut H) -> bool
    where
        H: SelectionHost + ?Sized,
    {
        self.refresh();
        if !self.needs_reconcile {
            return false;
        }
        self.reconcile_now(host);
        true
    }

    /// Force the host caret to the stored position unconditionally.
    pub fn reconcile_now<H>(&mut self, host: &mut H)
    where
        H: SelectionHost + ?Sized,
    {
        reconcile(self.position, &self.layout, host, &self.config);
        self.needs_reconcile = false;
    }

    pub fn state(&self) -> EditorState {
        EditorState {
            selection: self.position,
            text: self.runs.clone(),
        }
    }

    pub fn state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.state())
    }
}
