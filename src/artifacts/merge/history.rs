use std::collections::VecDeque;

pub const MAX_UNDO: usize = 20;

/// Bounded undo stack plus an unbounded redo stack of owned snapshots.
///
/// Snapshots are moved in and out by value, so nothing in history can alias
/// the live state.
#[derive(Debug, Clone)]
pub struct History<S> {
    undo: VecDeque<S>,
    redo: Vec<S>,
    capacity: usize,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::with_capacity(MAX_UNDO)
    }
}

impl<S> History<S> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Records the state as it was before a new action. Clears redo.
    pub fn record(&mut self, snapshot: S) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Swaps `current` for the most recent undo snapshot.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Swaps `current` for the most recent redo snapshot.
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_and_redo_swap_with_current_state() {
        let mut history = History::default();
        history.record(1);
        history.record(2);

        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), None);
        assert_eq!(history.redo(1), Some(2));
        assert_eq!(history.redo(2), Some(3));
        assert_eq!(history.redo(3), None);
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::default();
        history.record("a");
        assert_eq!(history.undo("b"), Some("a"));
        assert!(history.can_redo());

        history.record("c");

        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn drops_oldest_snapshots_beyond_capacity() {
        let mut history = History::default();
        for state in 0..25 {
            history.record(state);
        }

        assert_eq!(history.undo_depth(), MAX_UNDO);

        let mut current = 25;
        let mut restored = Vec::new();
        while let Some(previous) = history.undo(current) {
            restored.push(previous);
            current = previous;
        }

        assert_eq!(restored.first(), Some(&24));
        assert_eq!(restored.last(), Some(&5));
    }
}
