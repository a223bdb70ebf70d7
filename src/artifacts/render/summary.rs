use crate::artifacts::diff::diff_result::Stats;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// What a comparison looked like when it was computed.
///
/// Built from the display copy of a diff, never from the merge session's copy,
/// so later merge actions cannot change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub timestamp: DateTime<Utc>,
    pub stats: Stats,
    pub preview_original: String,
    pub preview_changed: String,
}

impl ComparisonSummary {
    pub fn capture(stats: Stats, original: &str, changed: &str, preview_chars: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            stats,
            preview_original: original.chars().take(preview_chars).collect(),
            preview_changed: changed.chars().take(preview_chars).collect(),
        }
    }
}

pub fn write_stats(writer: &mut dyn Write, stats: &Stats) -> anyhow::Result<()> {
    if stats.is_identical() {
        writeln!(writer, "{}", "No differences found".bold())?;
        return Ok(());
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("+{} added", stats.added).green());
    }
    if stats.removed > 0 {
        parts.push(format!("-{} removed", stats.removed).red());
    }
    if stats.modified > 0 {
        parts.push(format!("~{} modified", stats.modified).yellow());
    }
    if stats.moved > 0 {
        parts.push(format!(">{} moved", stats.moved).cyan());
    }

    let line = parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{line}")?;

    Ok(())
}
