//! Command implementations
//!
//! Commands are `impl Comparison` blocks, organized into two categories:
//!
//! - `plumbing`: Low-level inspection of the comparison machinery (normalize, check-pattern)
//! - `porcelain`: User-facing comparison workflows (diff, blocks, merge)
//!
//! Plumbing commands expose single building blocks, while porcelain commands
//! run full comparisons and render or merge the result.

pub mod plumbing;
pub mod porcelain;
