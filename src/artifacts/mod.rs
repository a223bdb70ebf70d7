//! Diff data structures and algorithms
//!
//! - `core`: error taxonomy and the command output sink
//! - `diff`: normalization, Myers' diff, move detection, classification,
//!   change blocks and the positional fallback
//! - `merge`: merge session, bounded undo/redo history, scripted steps
//! - `render`: unified, side-by-side and summary text views

pub mod core;
pub mod diff;
pub mod merge;
pub mod render;
