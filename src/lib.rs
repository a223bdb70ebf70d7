//! Line-based diff and interactive merge
//!
//! - `areas`: the comparison controller and its stateful collaborators
//! - `artifacts`: diff and merge data structures and algorithms
//! - `commands`: command implementations on top of `Comparison`

pub mod areas;
pub mod artifacts;
pub mod commands;
