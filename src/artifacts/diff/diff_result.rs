use crate::artifacts::core::error::DiffError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Unchanged,
    Added,
    Removed,
    Modified,
    Moved,
    Empty,
}

impl EntryType {
    pub fn is_change(&self) -> bool {
        !matches!(self, EntryType::Unchanged)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryType::Unchanged => "unchanged",
            EntryType::Added => "added",
            EntryType::Removed => "removed",
            EntryType::Modified => "modified",
            EntryType::Moved => "moved",
            EntryType::Empty => "empty",
        };
        write!(f, "{name}")
    }
}

/// One rendered row on one side of a comparison.
///
/// `content` is always the raw input line (or the empty string for an
/// `Empty` placeholder); normalized comparison keys never end up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub content: String,
    pub number: usize,
    #[serde(default)]
    pub moved: bool,
}

impl DiffEntry {
    pub fn new(kind: EntryType, content: impl Into<String>, number: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            number,
            moved: false,
        }
    }

    pub fn placeholder(number: usize) -> Self {
        Self::new(EntryType::Empty, String::new(), number)
    }

    pub fn with_moved(mut self, moved: bool) -> Self {
        self.moved = moved;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub moved: usize,
    pub unchanged: usize,
}

impl Stats {
    /// Counts entry types row by row: every distinct non-empty type present on
    /// either side of a row bumps its counter once.
    pub fn tally(original: &[DiffEntry], changed: &[DiffEntry]) -> Self {
        let mut stats = Stats::default();

        for (left, right) in original.iter().zip(changed.iter()) {
            let kinds: BTreeSet<EntryType> = [left.kind, right.kind]
                .into_iter()
                .filter(|kind| *kind != EntryType::Empty)
                .collect();

            for kind in kinds {
                match kind {
                    EntryType::Added => stats.added += 1,
                    EntryType::Removed => stats.removed += 1,
                    EntryType::Modified => stats.modified += 1,
                    EntryType::Moved => stats.moved += 1,
                    EntryType::Unchanged => stats.unchanged += 1,
                    EntryType::Empty => {}
                }
            }
        }

        stats
    }

    pub fn changes(&self) -> usize {
        self.added + self.removed + self.modified + self.moved
    }

    pub fn is_identical(&self) -> bool {
        self.changes() == 0
    }

    pub fn total(&self) -> usize {
        self.changes() + self.unchanged
    }
}

/// Two parallel, equally long sequences of rows plus their derived counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub original: Vec<DiffEntry>,
    pub changed: Vec<DiffEntry>,
    pub stats: Stats,
}

impl DiffResult {
    pub fn new(original: Vec<DiffEntry>, changed: Vec<DiffEntry>) -> Self {
        let stats = Stats::tally(&original, &changed);
        Self {
            original,
            changed,
            stats,
        }
    }

    /// The structurally valid "nothing computed" result handed out on failure.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<(&DiffEntry, &DiffEntry)> {
        Some((self.original.get(index)?, self.changed.get(index)?))
    }

    pub fn recount(&mut self) {
        self.stats = Stats::tally(&self.original, &self.changed);
    }

    pub fn validate(&self) -> Result<(), DiffError> {
        if self.original.len() != self.changed.len() {
            return Err(DiffError::Malformed(format!(
                "side lengths differ: {} original rows vs {} changed rows",
                self.original.len(),
                self.changed.len()
            )));
        }

        let recounted = Stats::tally(&self.original, &self.changed);
        if recounted != self.stats {
            return Err(DiffError::Malformed(format!(
                "stats drifted from entries: stored {:?}, recounted {:?}",
                self.stats, recounted
            )));
        }

        Ok(())
    }
}
