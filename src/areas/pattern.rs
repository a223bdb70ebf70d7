//! Validation of user supplied strip patterns
//!
//! A pattern is compiled and run once against a fixed sample input on the
//! blocking pool, under a short timeout. Anything that fails to compile or
//! does not finish in time is dropped: the comparison then runs as if no
//! pattern had been given, and the caller gets a warning.

use crate::artifacts::core::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::time::Duration;
use tracing::{debug, warn};

const SAMPLE_LEN: usize = 1000;
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// `Ok(None)` for a blank pattern, `Ok(Some(_))` for a usable one.
pub async fn validate_pattern(
    pattern: &str,
    budget: Duration,
) -> Result<Option<Regex>, PatternError> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }

    let source = pattern.to_string();
    let check = tokio::task::spawn_blocking(move || -> Result<Regex, PatternError> {
        let regex = RegexBuilder::new(&source)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build()?;
        let matched = regex.is_match(&"a".repeat(SAMPLE_LEN));
        debug!(pattern = %source, matched, "checked strip pattern");
        Ok(regex)
    });

    match tokio::time::timeout(budget, check).await {
        Ok(Ok(result)) => result.map(Some),
        Ok(Err(join_error)) => Err(PatternError::Aborted(join_error.to_string())),
        Err(_) => Err(PatternError::TimedOut(budget)),
    }
}

/// Like `validate_pattern`, but a rejected pattern becomes "no pattern" plus
/// a warning message for the user.
pub async fn resolve_pattern(
    pattern: Option<&str>,
    budget: Duration,
) -> (Option<Regex>, Option<String>) {
    let Some(pattern) = pattern else {
        return (None, None);
    };

    match validate_pattern(pattern, budget).await {
        Ok(regex) => (regex, None),
        Err(e) => {
            warn!(pattern, error = %e, "ignoring unsafe strip pattern");
            (
                None,
                Some(format!("Ignoring regex '{pattern}': {e}")),
            )
        }
    }
}
