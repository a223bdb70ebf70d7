use crate::areas::comparison::Comparison;
use crate::areas::options::CompareOptions;
use std::io::Write;
use std::path::Path;

impl Comparison {
    /// Lists change blocks as inclusive 1-based row ranges.
    pub async fn blocks(
        &mut self,
        original: &Path,
        changed: &Path,
        options: &CompareOptions,
    ) -> anyhow::Result<()> {
        let report = self.compare_files(original, changed, options).await?;

        for block in &report.blocks {
            writeln!(self.writer(), "{}-{}", block.start + 1, block.end + 1)?;
        }

        Ok(())
    }
}
