//! Diff engine tiers
//!
//! Both tiers produce the same `DiffResult` shape, so a caller cannot tell
//! which one ran other than by weaker classification from the positional one.

use crate::artifacts::core::error::DiffError;
use crate::artifacts::diff::classifier::Classifier;
use crate::artifacts::diff::diff_algorithm::{Cancellation, DiffAlgorithm, MyersDiff};
use crate::artifacts::diff::diff_result::{DiffEntry, DiffResult, EntryType};
use crate::artifacts::diff::move_detector::MoveDetector;
use crate::artifacts::diff::normalizer::DiffOptions;
use crate::artifacts::diff::positional::PositionalDiff;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error};

pub trait DiffEngine {
    fn name(&self) -> &'static str;

    /// Long running engines should give up with `DiffError::Cancelled` once
    /// `cancel` is set.
    fn compute(
        &self,
        original: &[String],
        changed: &[String],
        options: &DiffOptions,
        cancel: &Cancellation,
    ) -> Result<DiffResult, DiffError>;
}

/// Exact tier: Myers' edit script over normalized keys, move overlay, then
/// classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersEngine;

impl DiffEngine for MyersEngine {
    fn name(&self) -> &'static str {
        "myers"
    }

    fn compute(
        &self,
        original: &[String],
        changed: &[String],
        options: &DiffOptions,
        cancel: &Cancellation,
    ) -> Result<DiffResult, DiffError> {
        let normalizer = options.normalizer();

        // single differing lines pair up directly, no search needed
        if let ([old], [new]) = (original, changed)
            && normalizer.key(old) != normalizer.key(new)
        {
            return Ok(DiffResult::new(
                vec![DiffEntry::new(EntryType::Modified, old, 1)],
                vec![DiffEntry::new(EntryType::Modified, new, 1)],
            ));
        }

        let original_keys = normalizer.keys(original);
        let changed_keys = normalizer.keys(changed);

        let edits = MyersDiff::new(&original_keys, &changed_keys)
            .with_cancellation(cancel)
            .diff()?;
        let distance = edits.iter().filter(|edit| !edit.is_equal()).count();
        debug!(
            original = original.len(),
            changed = changed.len(),
            distance,
            "computed edit script"
        );

        let moves = MoveDetector::new(normalizer).detect(original, changed);
        debug!(moved_pairs = moves.pairs().len(), "detected moved lines");

        let result = Classifier::new(original, changed, &moves).classify(&edits);
        result.validate()?;

        Ok(result)
    }
}

/// Degraded tier: row `i` against row `i`, no moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalEngine;

impl DiffEngine for PositionalEngine {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn compute(
        &self,
        original: &[String],
        changed: &[String],
        options: &DiffOptions,
        _cancel: &Cancellation,
    ) -> Result<DiffResult, DiffError> {
        let result = PositionalDiff::new(options.normalizer()).diff(original, changed);
        result.validate()?;

        Ok(result)
    }
}

/// Runs an engine and turns any failure, panics included, into a result
/// with no rows and all-zero stats.
pub fn compute_diff(
    engine: &dyn DiffEngine,
    original: &[String],
    changed: &[String],
    options: &DiffOptions,
) -> DiffResult {
    match try_compute(engine, original, changed, options, &Cancellation::default()) {
        Ok(result) => result,
        Err(e) => {
            error!(engine = engine.name(), error = %e, "diff computation failed");
            DiffResult::empty()
        }
    }
}

/// Like `compute_diff`, but cancellable, and hands the failure back so the
/// caller can retry with another tier.
pub fn try_compute(
    engine: &dyn DiffEngine,
    original: &[String],
    changed: &[String],
    options: &DiffOptions,
    cancel: &Cancellation,
) -> Result<DiffResult, DiffError> {
    catch_unwind(AssertUnwindSafe(|| engine.compute(original, changed, options, cancel)))
        .map_err(|panic| DiffError::Computation(panic_message(panic.as_ref())))?
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "engine panicked".to_string()
    }
}
