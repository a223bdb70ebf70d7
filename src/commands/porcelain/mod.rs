//! Porcelain commands (user-facing comparison workflows)
//!
//! Porcelain commands read two files, run a full comparison and present the
//! result or merge it.
//!
//! ## Commands
//!
//! - `diff`: Show the differences as a unified, side-by-side or JSON view
//! - `blocks`: List the change blocks
//! - `merge`: Resolve change blocks with scripted steps and emit the merged text

pub mod blocks;
pub mod diff;
pub mod merge;

use crate::areas::comparison::{Comparison, ComparisonReport};
use crate::areas::options::CompareOptions;
use anyhow::Context;
use std::path::Path;

pub(crate) fn read_inputs(original: &Path, changed: &Path) -> anyhow::Result<(String, String)> {
    let original_text = std::fs::read_to_string(original)
        .with_context(|| format!("Failed to read {}", original.display()))?;
    let changed_text = std::fs::read_to_string(changed)
        .with_context(|| format!("Failed to read {}", changed.display()))?;

    Ok((original_text, changed_text))
}

impl Comparison {
    pub(crate) async fn compare_files(
        &mut self,
        original: &Path,
        changed: &Path,
        options: &CompareOptions,
    ) -> anyhow::Result<ComparisonReport> {
        let (original_text, changed_text) = read_inputs(original, changed)?;
        let report = self.compare(&original_text, &changed_text, options).await?;

        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }

        Ok(report)
    }
}
