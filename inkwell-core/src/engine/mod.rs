//! Text engine seam and its `yrs` implementation.
//!
//! The engine owns the replicated text. The editor only ever asks it to
//! insert, reads the full delta back, and listens for change notifications,
//! which fire for local and remote (applied update) edits alike.

use std::sync::Arc;

use thiserror::Error;
use yrs::types::text::{Diff, YChange};
use yrs::types::Attrs;
use yrs::updates::decoder::Decode;
use yrs::{
    Any, Doc, GetString, Observable, OffsetKind, Options, Out, ReadTxn, StateVector, Text,
    TextRef, Transact, Update,
};

use crate::config::EditorConfig;
use crate::run::{utf16_len, Run, RunAttributes};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Index {index} is past the end of the text (length {len})")]
    OutOfBounds { index: usize, len: usize },
    #[error("Failed to decode update: {0}")]
    Decode(String),
    #[error("Failed to apply update: {0}")]
    Update(String),
}

impl From<yrs::encoding::read::Error> for EngineError {
    fn from(e: yrs::encoding::read::Error) -> Self {
        EngineError::Decode(e.to_string())
    }
}

/// Callback fired after every mutation of the text.
pub type ChangeListener = Box<dyn Fn() + Send + Sync + 'static>;

/// Keeps a change listener registered. Dropping it unsubscribes.
pub struct Subscription {
    guard: Option<Box<dyn std::any::Any>>,
}

impl Subscription {
    pub fn new<G: 'static>(guard: G) -> Self {
        Self {
            guard: Some(Box::new(guard)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { guard: None }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.guard.is_some())
            .finish()
    }
}

/// The replicated text as seen by the editor.
pub trait TextEngine {
    /// Insert `text` at `index` (UTF-16 units).
    fn insert(
        &self,
        index: usize,
        text: &str,
        attributes: Option<&RunAttributes>,
    ) -> Result<(), EngineError>;

    /// Full content as an ordered run sequence.
    fn to_delta(&self) -> Vec<Run>;

    fn observe(&self, listener: ChangeListener) -> Subscription;
}

/// `TextEngine` backed by a `yrs` document with UTF-16 offsets.
pub struct YrsTextEngine {
    doc: Doc,
    text: TextRef,
}

impl Default for YrsTextEngine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl std::fmt::Debug for YrsTextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YrsTextEngine")
            .field("client_id", &self.doc.client_id())
            .field("text", &self.text())
            .finish()
    }
}

impl YrsTextEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_name(&config.text_name)
    }

    pub fn with_name(name: &str) -> Self {
        let doc = Doc::with_options(Options {
            offset_kind: OffsetKind::Utf16,
            ..Options::default()
        });
        let text = doc.get_or_insert_text(name);
        Self { doc, text }
    }

    /// Plain content of the text.
    pub fn text(&self) -> String {
        let txn = self.doc.transact();
        self.text.get_string(&txn)
    }

    /// Length in UTF-16 units.
    pub fn len(&self) -> usize {
        utf16_len(&self.text())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `len` units starting at `index`.
    pub fn delete(&self, index: usize, len: usize) -> Result<(), EngineError> {
        let mut txn = self.doc.transact_mut();
        let current = utf16_len(&self.text.get_string(&txn));
        let end = index.saturating_add(len);
        if end > current {
            return Err(EngineError::OutOfBounds {
                index: end,
                len: current,
            });
        }
        self.text
            .remove_range(&mut txn, to_u32(index, current)?, to_u32(len, current)?);
        Ok(())
    }

    pub fn state_vector(&self) -> StateVector {
        let txn = self.doc.transact();
        txn.state_vector()
    }

    /// Whole document state as a v1 update, for seeding another replica.
    pub fn encode_state_as_update(&self) -> Vec<u8> {
        let txn = self.doc.transact();
        txn.encode_state_as_update_v1(&StateVector::default())
    }

    /// Changes a replica at `remote` is missing, as a v1 update.
    pub fn encode_diff(&self, remote: &StateVector) -> Vec<u8> {
        let txn = self.doc.transact();
        txn.encode_diff_v1(remote)
    }

    /// Apply an update produced by another replica.
    pub fn apply_update(&self, update: &[u8]) -> Result<(), EngineError> {
        let update = Update::decode_v1(update)?;
        let mut txn = self.doc.transact_mut();
        txn.apply_update(update)
            .map_err(|e| EngineError::Update(e.to_string()))
    }
}

impl TextEngine for YrsTextEngine {
    fn insert(
        &self,
        index: usize,
        text: &str,
        attributes: Option<&RunAttributes>,
    ) -> Result<(), EngineError> {
        let mut txn = self.doc.transact_mut();
        // yrs panics on out-of-range inserts.
        let len = utf16_len(&self.text.get_string(&txn));
        if index > len {
            return Err(EngineError::OutOfBounds { index, len });
        }
        let at = to_u32(index, len)?;

        match attributes {
            Some(attributes) => {
                self.text
                    .insert_with_attributes(&mut txn, at, text, to_attrs(attributes))
            }
            None => self.text.insert(&mut txn, at, text),
        }
        Ok(())
    }

    fn to_delta(&self) -> Vec<Run> {
        let txn = self.doc.transact();
        self.text
            .diff(&txn, YChange::identity)
            .into_iter()
            .filter_map(run_from_diff)
            .collect()
    }

    fn observe(&self, listener: ChangeListener) -> Subscription {
        let subscription = self.text.observe(move |_txn, _event| listener());
        Subscription::new(subscription)
    }
}

fn to_u32(value: usize, len: usize) -> Result<u32, EngineError> {
    u32::try_from(value).map_err(|_| EngineError::OutOfBounds { index: value, len })
}

fn to_attrs(attributes: &RunAttributes) -> Attrs {
    let mut attrs = Attrs::new();
    if attributes.bold {
        attrs.insert(Arc::from("bold"), Any::Bool(true));
    }
    if attributes.italic {
        attrs.insert(Arc::from("italic"), Any::Bool(true));
    }
    attrs
}

fn flag(attrs: &Attrs, name: &str) -> bool {
    matches!(attrs.get(name), Some(Any::Bool(true)))
}

/// Embeds and other non-string chunks carry no text and are skipped.
fn run_from_diff(diff: Diff<YChange>) -> Option<Run> {
    let insert = match diff.insert {
        Out::Any(Any::String(text)) => text.to_string(),
        _ => return None,
    };

    let attributes = diff
        .attributes
        .map(|attrs| RunAttributes {
            bold: flag(&attrs, "bold"),
            italic: flag(&attrs, "italic"),
        })
        .filter(|attrs| !attrs.is_plain());

    Some(Run { insert, attributes })
}
