use crate::areas::pattern::resolve_pattern;
use crate::artifacts::diff::normalizer::{DiffOptions, NormalizeFlags};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Comparison options as a caller states them; the pattern is still a raw
/// string here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    pub ignore_spaces_case: bool,
    pub ignore_blank: bool,
    pub regex: Option<String>,
}

impl CompareOptions {
    pub fn flags(&self) -> NormalizeFlags {
        let mut flags = NormalizeFlags::NONE;
        flags.set(NormalizeFlags::IGNORE_SPACES_CASE, self.ignore_spaces_case);
        flags.set(NormalizeFlags::IGNORE_BLANK, self.ignore_blank);
        flags
    }

    /// Validates the pattern and builds the engine options. A rejected
    /// pattern is dropped and comes back as a warning.
    pub async fn resolve(&self, pattern_budget: Duration) -> (DiffOptions, Vec<String>) {
        let (pattern, warning) = resolve_pattern(self.regex.as_deref(), pattern_budget).await;

        (
            DiffOptions::new(self.flags(), pattern),
            warning.into_iter().collect(),
        )
    }
}
