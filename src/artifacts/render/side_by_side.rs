use crate::artifacts::diff::diff_result::{DiffEntry, DiffResult, EntryType};
use crate::artifacts::render::{marker, paint};
use derive_new::new;
use std::io::Write;

const MAX_COLUMN_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, new)]
pub struct SideBySideView {
    collapse: bool,
}

impl SideBySideView {
    pub fn write(&self, writer: &mut dyn Write, diff: &DiffResult) -> anyhow::Result<()> {
        let width = diff
            .original
            .iter()
            .map(|entry| entry.content.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_COLUMN_WIDTH);

        for (left, right) in diff.original.iter().zip(diff.changed.iter()) {
            if self.collapse
                && left.kind == EntryType::Unchanged
                && right.kind == EntryType::Unchanged
            {
                continue;
            }

            let line = format!(
                "{} │ {}",
                paint(left.kind, cell(left, width)),
                paint(right.kind, cell(right, 0))
            );
            writeln!(writer, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

fn cell(entry: &DiffEntry, width: usize) -> String {
    let number = match entry.kind {
        EntryType::Empty => String::new(),
        _ => entry.number.to_string(),
    };
    format!(
        "{:>4} {} {:<width$}",
        number,
        marker(entry.kind),
        entry.content,
        width = width
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pads_the_original_column_and_blanks_placeholders() {
        colored::control::set_override(false);
        let diff = DiffResult::new(
            vec![
                DiffEntry::new(EntryType::Unchanged, "same", 1),
                DiffEntry::new(EntryType::Removed, "gone", 2),
                DiffEntry::placeholder(3),
            ],
            vec![
                DiffEntry::new(EntryType::Unchanged, "same", 1),
                DiffEntry::placeholder(2),
                DiffEntry::new(EntryType::Added, "new", 3),
            ],
        );
        let mut out = Vec::new();

        SideBySideView::new(false).write(&mut out, &diff).unwrap();

        let expected = format!(
            "   1   same │    1   same\n   2 - gone │\n{}│    3 + new\n",
            " ".repeat(12)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
