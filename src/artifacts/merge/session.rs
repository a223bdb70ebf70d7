use crate::artifacts::diff::blocks::{ChangeBlock, compute_blocks};
use crate::artifacts::diff::diff_result::{DiffResult, EntryType};
use crate::artifacts::merge::history::History;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

static SIDE_ALIASES: phf::Map<&'static str, Side> = phf_map! {
    "original" => Side::Original,
    "left" => Side::Original,
    "ours" => Side::Original,
    "changed" => Side::Changed,
    "right" => Side::Changed,
    "theirs" => Side::Changed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Original,
    Changed,
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SIDE_ALIASES
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown side '{s}', expected original or changed"))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => write!(f, "original"),
            Side::Changed => write!(f, "changed"),
        }
    }
}

/// Full copy of the mergeable state, used as an undo/redo element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSnapshot {
    pub merged_lines: Vec<String>,
    pub diff: DiffResult,
    pub elided: BTreeSet<usize>,
}

/// What the caller needs after every merge action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeView<'s> {
    pub merged_lines: &'s [String],
    pub can_undo: bool,
    pub can_redo: bool,
}

/// The live merge: a row-aligned merged buffer over a mutable diff.
///
/// Created from a diff the session owns outright; whatever the display layer
/// holds is a separate copy and never sees these mutations.
#[derive(Debug, Clone)]
pub struct MergeSession {
    merged_lines: Vec<String>,
    diff: DiffResult,
    blocks: Vec<ChangeBlock>,
    // rows where an empty placeholder was accepted; left out of merged_text()
    elided: BTreeSet<usize>,
    history: History<MergeSnapshot>,
}

impl MergeSession {
    pub fn new(diff: DiffResult) -> Self {
        let merged_lines = initial_merge(&diff);
        let blocks = compute_blocks(&diff);

        Self {
            merged_lines,
            diff,
            blocks,
            elided: BTreeSet::new(),
            history: History::default(),
        }
    }

    pub fn diff(&self) -> &DiffResult {
        &self.diff
    }

    pub fn merged_lines(&self) -> &[String] {
        &self.merged_lines
    }

    pub fn blocks(&self) -> &[ChangeBlock] {
        &self.blocks
    }

    pub fn merged_text(&self) -> String {
        self.merged_lines
            .iter()
            .enumerate()
            .filter(|(row, _)| !self.elided.contains(row))
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_resolved(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn view(&self) -> MergeView<'_> {
        MergeView {
            merged_lines: &self.merged_lines,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    pub fn accept_line(&mut self, row: usize, side: Side) -> MergeView<'_> {
        if row >= self.diff.len() {
            debug!(row, rows = self.diff.len(), "accept_line out of range, ignored");
            return self.view();
        }

        self.save_state();
        self.take_side(row, side);
        self.refresh();
        self.view()
    }

    pub fn accept_block(&mut self, start: usize, end: usize, side: Side) -> MergeView<'_> {
        if start > end || end >= self.diff.len() {
            debug!(start, end, rows = self.diff.len(), "accept_block out of range, ignored");
            return self.view();
        }

        self.save_state();
        for row in start..=end {
            self.take_side(row, side);
        }
        self.refresh();
        self.view()
    }

    pub fn accept_all(&mut self, side: Side) -> MergeView<'_> {
        match self.diff.len() {
            0 => self.view(),
            rows => self.accept_block(0, rows - 1, side),
        }
    }

    pub fn undo(&mut self) -> MergeView<'_> {
        if let Some(previous) = self.history.undo(self.snapshot()) {
            self.restore(previous);
        }
        self.view()
    }

    pub fn redo(&mut self) -> MergeView<'_> {
        if let Some(next) = self.history.redo(self.snapshot()) {
            self.restore(next);
        }
        self.view()
    }

    pub fn next_block(&self, after_row: Option<usize>) -> Option<ChangeBlock> {
        self.blocks
            .iter()
            .find(|block| after_row.is_none_or(|row| block.start > row))
            .copied()
    }

    pub fn previous_block(&self, before_row: usize) -> Option<ChangeBlock> {
        self.blocks
            .iter()
            .rev()
            .find(|block| block.end < before_row)
            .copied()
    }

    fn snapshot(&self) -> MergeSnapshot {
        MergeSnapshot {
            merged_lines: self.merged_lines.clone(),
            diff: self.diff.clone(),
            elided: self.elided.clone(),
        }
    }

    fn save_state(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    fn restore(&mut self, snapshot: MergeSnapshot) {
        self.merged_lines = snapshot.merged_lines;
        self.diff = snapshot.diff;
        self.elided = snapshot.elided;
        self.blocks = compute_blocks(&self.diff);
    }

    fn take_side(&mut self, row: usize, side: Side) {
        let (chosen, other) = match side {
            Side::Original => (&mut self.diff.original[row], &mut self.diff.changed[row]),
            Side::Changed => (&mut self.diff.changed[row], &mut self.diff.original[row]),
        };

        // a resolved row keeps whatever elision its first accept decided
        let unresolved =
            chosen.kind != EntryType::Unchanged || other.kind != EntryType::Unchanged;
        if unresolved {
            if chosen.kind == EntryType::Empty {
                self.elided.insert(row);
            } else {
                self.elided.remove(&row);
            }
        }

        other.content = chosen.content.clone();
        chosen.kind = EntryType::Unchanged;
        other.kind = EntryType::Unchanged;

        self.merged_lines[row] = merged_line(&chosen.content, &other.content);
    }

    fn refresh(&mut self) {
        self.diff.recount();
        self.blocks = compute_blocks(&self.diff);
    }
}

fn merged_line(original: &str, changed: &str) -> String {
    if original.is_empty() {
        changed.to_string()
    } else {
        original.to_string()
    }
}

fn initial_merge(diff: &DiffResult) -> Vec<String> {
    diff.original
        .iter()
        .zip(diff.changed.iter())
        .map(|(left, right)| merged_line(&left.content, &right.content))
        .collect()
}
