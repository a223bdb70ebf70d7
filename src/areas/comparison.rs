use crate::areas::engine::{PositionalEngine, compute_diff};
use crate::areas::options::CompareOptions;
use crate::areas::settings::Settings;
use crate::areas::worker::DiffWorker;
use crate::artifacts::core::OutputSink;
use crate::artifacts::core::error::DiffError;
use crate::artifacts::diff::blocks::{ChangeBlock, compute_blocks};
use crate::artifacts::diff::diff_result::DiffResult;
use crate::artifacts::diff::normalizer::DiffOptions;
use crate::artifacts::merge::session::MergeSession;
use crate::artifacts::render::summary::ComparisonSummary;
use anyhow::bail;
use serde::Serialize;
use std::cell::{RefCell, RefMut};
use tracing::{error, info, warn};

/// Everything the display side gets back from one comparison.
///
/// `diff` is the display copy; the merge session owns a separate one.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub summary: ComparisonSummary,
    pub diff: DiffResult,
    pub blocks: Vec<ChangeBlock>,
    pub warnings: Vec<String>,
}

impl ComparisonReport {
    pub fn is_identical(&self) -> bool {
        self.summary.stats.is_identical()
    }
}

/// The controller: owns the limits, the output, the diff worker and, while a
/// comparison with differences is active, the merge session.
pub struct Comparison {
    settings: Settings,
    writer: RefCell<OutputSink>,
    worker: DiffWorker,
    session: Option<MergeSession>,
}

impl Comparison {
    /// Spawns the diff worker, so this needs a running tokio runtime.
    pub fn new(settings: Settings, writer: OutputSink) -> Self {
        let worker = DiffWorker::spawn(settings.worker_timeout());

        Comparison {
            settings,
            writer: RefCell::new(writer),
            worker,
            session: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn writer(&'_ self) -> RefMut<'_, OutputSink> {
        self.writer.borrow_mut()
    }

    pub fn session(&self) -> Option<&MergeSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut MergeSession> {
        self.session.as_mut()
    }

    /// Runs a comparison and, if the texts differ, starts a fresh merge
    /// session over it. Any previous session is discarded either way.
    pub async fn compare(
        &mut self,
        original_text: &str,
        changed_text: &str,
        options: &CompareOptions,
    ) -> anyhow::Result<ComparisonReport> {
        self.session = None;
        self.validate_input(original_text, changed_text)?;

        let original = split_lines(original_text);
        let changed = split_lines(changed_text);
        let (options, mut warnings) = options.resolve(self.settings.pattern_timeout()).await;

        let result = self.run_tiers(original, changed, &options).await;
        if result.is_empty() {
            warnings.push("The comparison could not be computed".to_string());
        }

        let display = result.clone();
        let summary = ComparisonSummary::capture(
            display.stats,
            original_text,
            changed_text,
            self.settings.preview_chars,
        );
        let blocks = compute_blocks(&display);

        if summary.stats.is_identical() {
            info!("texts are identical");
        } else {
            info!(blocks = blocks.len(), "starting merge session");
            self.session = Some(MergeSession::new(result));
        }

        Ok(ComparisonReport {
            summary,
            diff: display,
            blocks,
            warnings,
        })
    }

    /// Back to idle: no session, nothing to merge.
    pub fn clear(&mut self) {
        self.session = None;
    }

    fn validate_input(&self, original_text: &str, changed_text: &str) -> anyhow::Result<()> {
        if original_text.is_empty() && changed_text.is_empty() {
            bail!("Nothing to compare: enter text in at least one of the inputs");
        }

        let mut violations = Vec::new();
        for (what, text) in [("original", original_text), ("changed", changed_text)] {
            if text.len() > self.settings.max_input_bytes {
                violations.push(DiffError::InputTooLarge {
                    what: format!("{what} text"),
                    actual: text.len(),
                    limit: self.settings.max_input_bytes,
                });
            }

            let lines = text.split('\n').count();
            if lines > self.settings.max_lines {
                violations.push(DiffError::InputTooLarge {
                    what: format!("{what} line count"),
                    actual: lines,
                    limit: self.settings.max_lines,
                });
            }
        }

        if !violations.is_empty() {
            let message = violations
                .iter()
                .map(|violation| violation.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            bail!("Input rejected: {message}");
        }

        Ok(())
    }

    async fn run_tiers(
        &self,
        original: Vec<String>,
        changed: Vec<String>,
        options: &DiffOptions,
    ) -> DiffResult {
        let total = original.len() + changed.len();
        if total > self.settings.exact_line_ceiling {
            info!(
                total,
                ceiling = self.settings.exact_line_ceiling,
                "input above the exact ceiling, comparing by position"
            );
            return compute_diff(&PositionalEngine, &original, &changed, options);
        }

        match self
            .worker
            .run(original.clone(), changed.clone(), options.clone())
            .await
        {
            Ok(result) => result,
            Err(e) if e.is_recoverable() => {
                warn!(
                    error = %e,
                    budget = ?self.worker.budget(),
                    "exact diff failed, comparing by position"
                );
                compute_diff(&PositionalEngine, &original, &changed, options)
            }
            Err(e) => {
                error!(error = %e, "diff failed");
                DiffResult::empty()
            }
        }
    }
}

/// Splits on `'\n'` only; a trailing newline leaves a trailing empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_result::{EntryType, Stats};
    use crate::artifacts::merge::session::Side;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn comparison(settings: Settings) -> Comparison {
        Comparison::new(settings, OutputSink::captured())
    }

    #[rstest]
    #[case("a\nb", vec!["a", "b"])]
    #[case("a\nb\n", vec!["a", "b", ""])]
    #[case("a\r\nb", vec!["a\r", "b"])]
    #[case("", vec![""])]
    fn splits_on_newlines_only(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(text), expected);
    }

    #[tokio::test]
    async fn differing_texts_start_a_session() {
        let mut comparison = comparison(Settings::default());

        let report = comparison
            .compare("a\nb\nc", "a\nB\nc", &CompareOptions::default())
            .await
            .unwrap();

        assert!(!report.is_identical());
        assert_eq!(report.summary.stats.modified, 1);
        assert_eq!(report.blocks, vec![ChangeBlock::new(1, 1)]);
        let session = comparison.session().unwrap();
        assert_eq!(session.diff(), &report.diff);
    }

    #[tokio::test]
    async fn identical_texts_leave_the_session_idle() {
        let mut comparison = comparison(Settings::default());
        comparison
            .compare("a", "b", &CompareOptions::default())
            .await
            .unwrap();

        let report = comparison
            .compare("same\ntext", "same\ntext", &CompareOptions::default())
            .await
            .unwrap();

        assert!(report.is_identical());
        assert_eq!(
            report.summary.stats,
            Stats {
                unchanged: 2,
                ..Stats::default()
            }
        );
        assert!(comparison.session().is_none());
    }

    #[tokio::test]
    async fn merging_does_not_touch_the_display_copy() {
        let mut comparison = comparison(Settings::default());
        let report = comparison
            .compare("a\nb", "a\nc", &CompareOptions::default())
            .await
            .unwrap();

        let session = comparison.session_mut().unwrap();
        session.accept_line(1, Side::Changed);

        assert_eq!(session.diff().original[1].kind, EntryType::Unchanged);
        assert_eq!(report.diff.original[1].kind, EntryType::Modified);
        assert_eq!(report.summary.stats.modified, 1);
    }

    #[tokio::test]
    async fn refuses_two_empty_inputs() {
        let mut comparison = comparison(Settings::default());

        let error = comparison
            .compare("", "", &CompareOptions::default())
            .await
            .unwrap_err();

        assert!(error.to_string().starts_with("Nothing to compare"));
    }

    #[tokio::test]
    async fn reports_every_oversized_input() {
        let settings = Settings {
            max_input_bytes: 4,
            max_lines: 2,
            ..Settings::default()
        };
        let mut comparison = comparison(settings);

        let error = comparison
            .compare("a\nb\nc", "abcdef", &CompareOptions::default())
            .await
            .unwrap_err()
            .to_string();

        assert!(error.contains("original text is too large (5 > 4 limit)"));
        assert!(error.contains("original line count is too large (3 > 2 limit)"));
        assert!(error.contains("changed text is too large (6 > 4 limit)"));
    }

    #[tokio::test]
    async fn large_inputs_are_compared_by_position() {
        let settings = Settings {
            exact_line_ceiling: 3,
            ..Settings::default()
        };
        let mut comparison = comparison(settings);

        let report = comparison
            .compare("a\nb", "x\na\nb", &CompareOptions::default())
            .await
            .unwrap();

        // a shifted insert is reported row by row on this tier
        assert_eq!(report.summary.stats.modified, 2);
        assert_eq!(report.summary.stats.added, 1);
    }

    #[tokio::test]
    async fn an_unsafe_pattern_is_a_warning() {
        let mut comparison = comparison(Settings::default());
        let options = CompareOptions {
            regex: Some("[".to_string()),
            ..CompareOptions::default()
        };

        let report = comparison.compare("a", "a ", &options).await.unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.summary.stats.modified, 1);
    }

    #[tokio::test]
    async fn clear_drops_the_session() {
        let mut comparison = comparison(Settings::default());
        comparison
            .compare("a", "b", &CompareOptions::default())
            .await
            .unwrap();

        comparison.clear();

        assert!(comparison.session().is_none());
    }

    #[tokio::test]
    async fn summary_previews_are_capped() {
        let settings = Settings {
            preview_chars: 3,
            ..Settings::default()
        };
        let mut comparison = comparison(settings);

        let report = comparison
            .compare("abcdef", "uvwxyz", &CompareOptions::default())
            .await
            .unwrap();

        assert_eq!(report.summary.preview_original, "abc");
        assert_eq!(report.summary.preview_changed, "uvw");
    }
}
