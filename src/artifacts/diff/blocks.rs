use crate::artifacts::diff::diff_result::DiffResult;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A maximal run of rows where at least one side is not `Unchanged`.
/// Both bounds are inclusive row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ChangeBlock {
    pub start: usize,
    pub end: usize,
}

impl ChangeBlock {
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, row: usize) -> bool {
        (self.start..=self.end).contains(&row)
    }
}

/// Locates change blocks. Reads entry types only; `stats` is never touched.
pub fn compute_blocks(diff: &DiffResult) -> Vec<ChangeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (row, (left, right)) in diff.original.iter().zip(diff.changed.iter()).enumerate() {
        let changed = left.kind.is_change() || right.kind.is_change();

        match (changed, open) {
            (true, None) => open = Some(row),
            (false, Some(start)) => {
                blocks.push(ChangeBlock::new(start, row - 1));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        blocks.push(ChangeBlock::new(start, diff.len() - 1));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_result::{DiffEntry, EntryType};
    use pretty_assertions::assert_eq;

    fn diff_of(rows: &[(EntryType, EntryType)]) -> DiffResult {
        let (left, right): (Vec<_>, Vec<_>) = rows
            .iter()
            .enumerate()
            .map(|(i, (l, r))| (DiffEntry::new(*l, "l", i + 1), DiffEntry::new(*r, "r", i + 1)))
            .unzip();
        DiffResult::new(left, right)
    }

    #[test]
    fn merges_contiguous_changed_rows() {
        use EntryType::*;
        let diff = diff_of(&[
            (Unchanged, Unchanged),
            (Modified, Modified),
            (Removed, Empty),
            (Unchanged, Unchanged),
            (Empty, Added),
        ]);

        assert_eq!(
            compute_blocks(&diff),
            vec![ChangeBlock::new(1, 2), ChangeBlock::new(4, 4)]
        );
    }

    #[test]
    fn moved_rows_count_as_changes() {
        use EntryType::*;
        let diff = diff_of(&[(Moved, Moved), (Unchanged, Unchanged)]);

        assert_eq!(compute_blocks(&diff), vec![ChangeBlock::new(0, 0)]);
    }

    #[test]
    fn leaves_stats_untouched() {
        use EntryType::*;
        let diff = diff_of(&[(Modified, Modified), (Removed, Empty)]);
        let before = diff.stats;

        let blocks = compute_blocks(&diff);

        assert_eq!(blocks, vec![ChangeBlock::new(0, 1)]);
        assert_eq!(diff.stats, before);
        assert!(diff.validate().is_ok());
    }

    #[test]
    fn identical_diff_has_no_blocks() {
        use EntryType::*;
        let diff = diff_of(&[(Unchanged, Unchanged), (Unchanged, Unchanged)]);
        assert!(compute_blocks(&diff).is_empty());
        assert!(compute_blocks(&DiffResult::empty()).is_empty());
    }
}
