use crate::areas::comparison::Comparison;
use crate::areas::options::CompareOptions;
use crate::artifacts::merge::step::MergeStep;
use crate::commands::porcelain::read_inputs;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub steps: Vec<MergeStep>,
    pub output: Option<PathBuf>,
}

impl Comparison {
    pub async fn merge(
        &mut self,
        original: &Path,
        changed: &Path,
        options: &CompareOptions,
        merge: &MergeOptions,
    ) -> anyhow::Result<()> {
        let (original_text, changed_text) = read_inputs(original, changed)?;
        let report = self.compare(&original_text, &changed_text, options).await?;
        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }

        let Some(session) = self.session_mut() else {
            eprintln!("No differences found, nothing to merge");
            return self.emit_merged(&original_text, merge.output.as_deref());
        };

        for step in &merge.steps {
            let view = step.apply(session);
            debug!(?step, can_undo = view.can_undo, can_redo = view.can_redo, "applied merge step");
        }

        let view = session.view();
        eprintln!(
            "undo: {}, redo: {}",
            availability(view.can_undo),
            availability(view.can_redo)
        );
        let unresolved = session.blocks().len();
        if unresolved > 0 {
            eprintln!("{unresolved} change block(s) left unresolved");
        }

        let merged = session.merged_text();
        self.emit_merged(&merged, merge.output.as_deref())
    }

    fn emit_merged(&self, text: &str, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                std::fs::write(path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Wrote merged text to {}", path.display());
            }
            None => write!(self.writer(), "{text}")?,
        }

        Ok(())
    }
}

fn availability(available: bool) -> &'static str {
    if available { "available" } else { "unavailable" }
}
