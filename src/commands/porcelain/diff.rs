use crate::areas::comparison::Comparison;
use crate::areas::options::CompareOptions;
use crate::artifacts::render::side_by_side::SideBySideView;
use crate::artifacts::render::summary::write_stats;
use crate::artifacts::render::unified::UnifiedView;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiffViewOptions {
    pub side_by_side: bool,
    pub collapse: bool,
    pub json: bool,
}

impl Comparison {
    pub async fn diff(
        &mut self,
        original: &Path,
        changed: &Path,
        options: &CompareOptions,
        view: DiffViewOptions,
    ) -> anyhow::Result<()> {
        let report = self.compare_files(original, changed, options).await?;

        if view.json {
            serde_json::to_writer_pretty(&mut *self.writer(), &report)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        write_stats(&mut *self.writer(), &report.summary.stats)?;
        if report.is_identical() {
            return Ok(());
        }
        writeln!(self.writer())?;

        if view.side_by_side {
            SideBySideView::new(view.collapse).write(&mut *self.writer(), &report.diff)?;
        } else {
            UnifiedView::new(view.collapse).write(&mut *self.writer(), &report.diff)?;
        }

        Ok(())
    }
}
