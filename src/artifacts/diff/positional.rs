use crate::artifacts::diff::diff_result::{DiffEntry, DiffResult, EntryType};
use crate::artifacts::diff::normalizer::Normalizer;
use derive_new::new;

/// Degraded comparison: row `i` on one side is compared with row `i` on the
/// other, no edit distance and no move detection.
///
/// A single inserted line therefore shows every following row as modified.
/// That is accepted; this path only runs when the exact engine cannot.
#[derive(Debug, Clone, Copy, new)]
pub struct PositionalDiff<'n> {
    normalizer: Normalizer<'n>,
}

impl<'n> PositionalDiff<'n> {
    pub fn diff(&self, original: &[String], changed: &[String]) -> DiffResult {
        let rows = original.len().max(changed.len());
        let mut left = Vec::with_capacity(rows);
        let mut right = Vec::with_capacity(rows);

        for row in 0..rows {
            let number = row + 1;

            let (left_entry, right_entry) = match (original.get(row), changed.get(row)) {
                (Some(old), Some(new)) => {
                    let kind = if self.normalizer.key(old) == self.normalizer.key(new) {
                        EntryType::Unchanged
                    } else {
                        EntryType::Modified
                    };
                    (
                        DiffEntry::new(kind, old, number),
                        DiffEntry::new(kind, new, number),
                    )
                }
                (Some(old), None) => (
                    DiffEntry::new(EntryType::Removed, old, number),
                    DiffEntry::placeholder(number),
                ),
                (None, Some(new)) => (
                    DiffEntry::placeholder(number),
                    DiffEntry::new(EntryType::Added, new, number),
                ),
                (None, None) => unreachable!("row is below the longer side's length"),
            };

            left.push(left_entry);
            right.push(right_entry);
        }

        DiffResult::new(left, right)
    }
}
