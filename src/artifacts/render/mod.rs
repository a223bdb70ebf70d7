//! Plain-text views over a `DiffResult`
//!
//! Rendering only reads rows; it never reclassifies them. Colours come from
//! `colored` and switch off by themselves when output is not a terminal.

pub mod side_by_side;
pub mod summary;
pub mod unified;

use crate::artifacts::diff::diff_result::EntryType;
use colored::{ColoredString, Colorize};

pub fn marker(kind: EntryType) -> char {
    match kind {
        EntryType::Unchanged => ' ',
        EntryType::Added => '+',
        EntryType::Removed => '-',
        EntryType::Modified => '~',
        EntryType::Moved => '>',
        EntryType::Empty => ' ',
    }
}

pub fn paint(kind: EntryType, text: String) -> ColoredString {
    match kind {
        EntryType::Added => text.green(),
        EntryType::Removed => text.red(),
        EntryType::Modified => text.yellow(),
        EntryType::Moved => text.cyan(),
        EntryType::Unchanged | EntryType::Empty => text.normal(),
    }
}
