//! Turns an edit script into two parallel rows of annotated entries.
//!
//! Consecutive non-equal edits form a run. A run holding both deletions and
//! insertions whose counts differ by at most one is "mixed" and its lines are
//! paired up as modifications; every other run is emitted as plain removals
//! followed by plain additions, each padded with an `Empty` placeholder on the
//! opposite side.

use crate::artifacts::diff::diff_algorithm::Edit;
use crate::artifacts::diff::diff_result::{DiffEntry, DiffResult, EntryType};
use crate::artifacts::diff::move_detector::MoveIndex;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Equal { old: usize, new: usize },
    Change(ChangeRun),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub old_start: usize,
    pub deletes: usize,
    pub new_start: usize,
    pub inserts: usize,
}

impl ChangeRun {
    pub fn is_mixed(&self) -> bool {
        self.deletes > 0 && self.inserts > 0 && self.deletes.abs_diff(self.inserts) <= 1
    }
}

/// Collapses the edit script into equal steps and change runs.
///
/// `old_cursor`/`new_cursor` track where the next deletion/insertion of a run
/// would land, which is where a run starts when it opens.
pub fn group_edits(edits: &[Edit]) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut open: Option<ChangeRun> = None;
    let (mut old_cursor, mut new_cursor) = (0, 0);

    for edit in edits {
        match *edit {
            Edit::Equal { old, new } => {
                if let Some(run) = open.take() {
                    groups.push(Group::Change(run));
                }
                groups.push(Group::Equal { old, new });
                (old_cursor, new_cursor) = (old + 1, new + 1);
            }
            Edit::Delete { old } => {
                let run = open.get_or_insert(ChangeRun {
                    old_start: old,
                    deletes: 0,
                    new_start: new_cursor,
                    inserts: 0,
                });
                run.deletes += 1;
                old_cursor = old + 1;
            }
            Edit::Insert { new } => {
                let run = open.get_or_insert(ChangeRun {
                    old_start: old_cursor,
                    deletes: 0,
                    new_start: new,
                    inserts: 0,
                });
                run.inserts += 1;
                new_cursor = new + 1;
            }
        }
    }

    if let Some(run) = open {
        groups.push(Group::Change(run));
    }

    groups
}

pub struct Classifier<'c> {
    original: &'c [String],
    changed: &'c [String],
    moves: &'c MoveIndex,
    left: Vec<DiffEntry>,
    right: Vec<DiffEntry>,
}

impl<'c> Classifier<'c> {
    pub fn new(original: &'c [String], changed: &'c [String], moves: &'c MoveIndex) -> Self {
        Self {
            original,
            changed,
            moves,
            left: Vec::with_capacity(original.len().max(changed.len())),
            right: Vec::with_capacity(original.len().max(changed.len())),
        }
    }

    pub fn classify(mut self, edits: &[Edit]) -> DiffResult {
        let groups = group_edits(edits);
        trace!(groups = groups.len(), edits = edits.len(), "grouped edit script");

        for group in groups {
            match group {
                Group::Equal { old, new } => self.push_equal(old, new),
                Group::Change(run) if run.is_mixed() => self.push_mixed(run),
                Group::Change(run) => {
                    self.push_deletes(run.old_start, run.deletes);
                    self.push_inserts(run.new_start, run.inserts);
                }
            }
        }

        // stats are always recounted from the finished rows
        DiffResult::new(self.left, self.right)
    }

    fn next_number(&self) -> usize {
        self.left.len() + 1
    }

    fn push_row(&mut self, left: DiffEntry, right: DiffEntry) {
        self.left.push(left);
        self.right.push(right);
    }

    fn push_equal(&mut self, old: usize, new: usize) {
        let number = self.next_number();
        let left_moved = self.moves.is_original_moved(old);
        let right_moved = self.moves.is_changed_moved(new);

        self.push_row(
            DiffEntry::new(moved_or(left_moved, EntryType::Unchanged), &self.original[old], number)
                .with_moved(left_moved),
            DiffEntry::new(moved_or(right_moved, EntryType::Unchanged), &self.changed[new], number)
                .with_moved(right_moved),
        );
    }

    fn push_mixed(&mut self, run: ChangeRun) {
        let paired = run.deletes.min(run.inserts);

        for i in 0..paired {
            let number = self.next_number();
            let left = &self.original[run.old_start + i];
            let right = &self.changed[run.new_start + i];
            let kind = if left == right {
                EntryType::Unchanged
            } else {
                EntryType::Modified
            };

            self.push_row(
                DiffEntry::new(kind, left, number),
                DiffEntry::new(kind, right, number),
            );
        }

        self.push_deletes(run.old_start + paired, run.deletes - paired);
        self.push_inserts(run.new_start + paired, run.inserts - paired);
    }

    fn push_deletes(&mut self, start: usize, count: usize) {
        for old in start..start + count {
            let number = self.next_number();
            let moved = self.moves.is_original_moved(old);

            self.push_row(
                DiffEntry::new(moved_or(moved, EntryType::Removed), &self.original[old], number)
                    .with_moved(moved),
                DiffEntry::placeholder(number),
            );
        }
    }

    fn push_inserts(&mut self, start: usize, count: usize) {
        for new in start..start + count {
            let number = self.next_number();
            let moved = self.moves.is_changed_moved(new);

            self.push_row(
                DiffEntry::placeholder(number),
                DiffEntry::new(moved_or(moved, EntryType::Added), &self.changed[new], number)
                    .with_moved(moved),
            );
        }
    }
}

fn moved_or(moved: bool, otherwise: EntryType) -> EntryType {
    if moved { EntryType::Moved } else { otherwise }
}
