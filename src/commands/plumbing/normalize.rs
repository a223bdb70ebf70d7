use crate::areas::comparison::{Comparison, split_lines};
use crate::areas::options::CompareOptions;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Comparison {
    /// Prints the key each line of `file` is compared by, one per row.
    pub async fn normalize(&self, file: &Path, options: &CompareOptions) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;

        let (diff_options, warnings) = options.resolve(self.settings().pattern_timeout()).await;
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }

        let normalizer = diff_options.normalizer();
        for (row, line) in split_lines(&text).iter().enumerate() {
            writeln!(self.writer(), "{:>4} {}", row + 1, normalizer.key(line))?;
        }

        Ok(())
    }
}
