//! Line diffing
//!
//! This module implements the line-level comparison pipeline:
//!
//! - `normalizer`: comparison keys (pattern strip, space/case and blank folding)
//! - `diff_algorithm`: Myers' diff producing an index based edit script
//! - `move_detector`: unique lines displaced beyond a threshold
//! - `classifier`: edit script + moves into two parallel annotated rows
//! - `diff_result`: the row/entry/stats model shared by every consumer
//! - `blocks`: contiguous changed regions used for bulk merge actions
//! - `positional`: the degraded index-by-index comparison
//!
//! Displayed content always stays the raw input; normalized keys are only
//! used for equality.

pub mod blocks;
pub mod classifier;
pub mod diff_algorithm;
pub mod diff_result;
pub mod move_detector;
pub mod normalizer;
pub mod positional;
