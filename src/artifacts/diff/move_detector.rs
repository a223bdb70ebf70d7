use crate::artifacts::diff::normalizer::Normalizer;
use derive_new::new;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MovedPair {
    pub original: usize,
    pub changed: usize,
    pub content: String,
}

/// Lines that occur exactly once on each side but far apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveIndex {
    original: BTreeSet<usize>,
    changed: BTreeSet<usize>,
    pairs: Vec<MovedPair>,
}

impl MoveIndex {
    pub fn is_original_moved(&self, index: usize) -> bool {
        self.original.contains(&index)
    }

    pub fn is_changed_moved(&self, index: usize) -> bool {
        self.changed.contains(&index)
    }

    pub fn pairs(&self) -> &[MovedPair] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub(crate) fn flag(&mut self, pair: MovedPair) {
        self.original.insert(pair.original);
        self.changed.insert(pair.changed);
        self.pairs.push(pair);
    }
}

/// Minimum displacement a unique line needs before it counts as moved.
pub fn move_threshold(original_len: usize) -> usize {
    2.max(original_len / 10)
}

#[derive(Debug, Clone, Copy, new)]
pub struct MoveDetector<'n> {
    normalizer: Normalizer<'n>,
}

impl<'n> MoveDetector<'n> {
    pub fn detect(&self, original: &[String], changed: &[String]) -> MoveIndex {
        let original_keys = self.occurrences(original);
        let changed_keys = self.occurrences(changed);
        let threshold = move_threshold(original.len());
        let mut index = MoveIndex::default();

        // walk the original side in order so pairs come out deterministically
        for (original_idx, line) in original.iter().enumerate() {
            let key = self.normalizer.key(line);

            let (Some(from), Some(to)) = (original_keys.get(key.as_ref()), changed_keys.get(key.as_ref()))
            else {
                continue;
            };

            // ambiguous correspondences are left alone
            if from.len() != 1 || to.len() != 1 {
                continue;
            }

            let changed_idx = to[0];
            if original_idx.abs_diff(changed_idx) > threshold {
                index.flag(MovedPair::new(original_idx, changed_idx, key.into_owned()));
            }
        }

        index
    }

    fn occurrences(&self, lines: &[String]) -> HashMap<String, Vec<usize>> {
        let mut map: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, line) in lines.iter().enumerate() {
            map.entry(self.normalizer.key(line).into_owned())
                .or_default()
                .push(idx);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::normalizer::{DiffOptions, NormalizeFlags};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(0, 2)]
    #[case(19, 2)]
    #[case(30, 3)]
    #[case(105, 10)]
    fn threshold_is_ten_percent_with_a_floor_of_two(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(move_threshold(len), expected);
    }

    #[test]
    fn flags_unique_line_displaced_beyond_threshold() {
        let options = DiffOptions::default();
        let detector = MoveDetector::new(options.normalizer());
        let original = lines(&["header", "a", "b", "c", "d"]);
        let changed = lines(&["a", "b", "c", "d", "header"]);

        let index = detector.detect(&original, &changed);

        assert_eq!(index.pairs(), &[MovedPair::new(0, 4, "header".to_string())]);
        assert!(index.is_original_moved(0));
        assert!(index.is_changed_moved(4));
        assert!(!index.is_original_moved(1));
    }

    #[test]
    fn displacement_equal_to_threshold_is_not_a_move() {
        let options = DiffOptions::default();
        let detector = MoveDetector::new(options.normalizer());
        let original = lines(&["x", "y", "z"]);
        let changed = lines(&["z", "x", "y"]);

        assert!(detector.detect(&original, &changed).is_empty());
    }

    #[test]
    fn duplicated_lines_are_never_flagged() {
        let options = DiffOptions::default();
        let detector = MoveDetector::new(options.normalizer());
        let original = lines(&["dup", "a", "b", "c", "dup"]);
        let changed = lines(&["a", "b", "c", "dup", "x", "y", "z"]);

        assert!(detector.detect(&original, &changed).is_empty());
    }

    #[test]
    fn uses_normalized_keys_for_matching() {
        let options = DiffOptions::new(NormalizeFlags::IGNORE_SPACES_CASE, None);
        let detector = MoveDetector::new(options.normalizer());
        let original = lines(&["Moved   Line", "a", "b", "c", "d"]);
        let changed = lines(&["a", "b", "c", "d", "moved line"]);

        let index = detector.detect(&original, &changed);

        assert_eq!(index.pairs(), &[MovedPair::new(0, 4, "moved line".to_string())]);
    }
}
