//! Plumbing commands (low-level operations)
//!
//! Plumbing commands expose the individual steps a comparison is built from.
//! They're mostly useful for debugging why two lines do or do not match.
//!
//! ## Commands
//!
//! - `normalize`: Print the comparison key of every line of a file
//! - `check-pattern`: Validate a strip pattern the way a comparison would

pub mod check_pattern;
pub mod normalize;
