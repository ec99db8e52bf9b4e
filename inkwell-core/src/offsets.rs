//! Cumulative offset table over a run sequence.
//!
//! Entry `i` is the first offset strictly after run `i`, so a run's start
//! is the previous entry (or `0` for the first run). Rebuilt from scratch
//! whenever the run sequence changes; never persisted.

use crate::run::Run;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetTable {
    ends: Vec<usize>,
}

impl OffsetTable {
    /// Build the table for `runs`. Lengths are summed with saturation.
    pub fn build(runs: &[Run]) -> Self {
        let mut ends = Vec::with_capacity(runs.len());
        let mut total = 0usize;
        for run in runs {
            total = total.saturating_add(run.len());
            ends.push(total);
        }
        Self { ends }
    }

    /// Start offset of run `run`, `None` past the end of the table.
    pub fn start_of(&self, run: usize) -> Option<usize> {
        match run {
            _ if run >= self.ends.len() => None,
            0 => Some(0),
            _ => Some(self.ends[run - 1]),
        }
    }

    pub fn end_of(&self, run: usize) -> Option<usize> {
        self.ends.get(run).copied()
    }

    /// Total document length.
    pub fn total_len(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Start offsets of every run, in order.
    pub fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(0)
            .chain(self.ends.iter().copied())
            .take(self.ends.len())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.ends
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}
