//! Limits and budgets for comparisons
//!
//! Loaded with `confy` from an explicit file; without one the built-in
//! defaults apply and nothing is written to disk.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-side input size above which a comparison is refused.
    pub max_input_bytes: usize,
    /// Per-side line count above which a comparison is refused.
    pub max_lines: usize,
    /// Combined line count above which the positional engine is used directly.
    /// The exact search keeps a trace quadratic in the edit distance, which is
    /// at most this many lines.
    pub exact_line_ceiling: usize,
    pub worker_timeout_ms: u64,
    pub pattern_timeout_ms: u64,
    pub preview_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_input_bytes: 10 * 1024 * 1024,
            max_lines: 50_000,
            exact_line_ceiling: 5_000,
            worker_timeout_ms: 30_000,
            pattern_timeout_ms: 50,
            preview_chars: 200,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let settings: Settings = confy::load_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        info!("Loaded settings from {:?}", path);

        Ok(settings)
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_timeout_ms)
    }

    pub fn pattern_timeout(&self) -> Duration {
        Duration::from_millis(self.pattern_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults_per_field() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("diffmerge.toml");
        std::fs::write(&path, "max_lines = 10\nworker_timeout_ms = 5\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.max_lines, 10);
        assert_eq!(settings.worker_timeout(), Duration::from_millis(5));
        assert_eq!(settings.pattern_timeout_ms, Settings::default().pattern_timeout_ms);
    }

    #[test]
    fn default_ceiling_bounds_the_exact_search() {
        let ceiling = Settings::default().exact_line_ceiling;

        // one isize per diagonal per round, summed over every round
        let worst_trace_bytes = ceiling * ceiling * std::mem::size_of::<isize>();
        assert!(worst_trace_bytes <= 256 * 1024 * 1024);
        assert!(ceiling <= Settings::default().max_lines);
    }
}
