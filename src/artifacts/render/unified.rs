use crate::artifacts::diff::diff_result::{DiffEntry, DiffResult, EntryType};
use crate::artifacts::render::{marker, paint};
use derive_new::new;
use std::io::Write;

/// Single column view: every row once, a modified row as its original line
/// followed by its changed line.
#[derive(Debug, Clone, Copy, new)]
pub struct UnifiedView {
    collapse: bool,
}

impl UnifiedView {
    pub fn write(&self, writer: &mut dyn Write, diff: &DiffResult) -> anyhow::Result<()> {
        for (left, right) in diff.original.iter().zip(diff.changed.iter()) {
            let both_unchanged =
                left.kind == EntryType::Unchanged && right.kind == EntryType::Unchanged;
            if self.collapse && both_unchanged {
                continue;
            }

            match (left.kind, right.kind) {
                (EntryType::Modified, EntryType::Modified) => {
                    write_entry(writer, left)?;
                    write_entry(writer, right)?;
                }
                (EntryType::Empty, _) => write_entry(writer, right)?,
                (_, EntryType::Empty) => write_entry(writer, left)?,
                (EntryType::Unchanged, kind) if kind != EntryType::Unchanged => {
                    write_entry(writer, right)?
                }
                _ => write_entry(writer, left)?,
            }
        }

        Ok(())
    }
}

fn write_entry(writer: &mut dyn Write, entry: &DiffEntry) -> anyhow::Result<()> {
    write_line(writer, entry.number, entry.kind, &entry.content)
}

fn write_line(
    writer: &mut dyn Write,
    number: usize,
    kind: EntryType,
    content: &str,
) -> anyhow::Result<()> {
    let text = format!("{:>4} {} {}", number, marker(kind), content);
    writeln!(writer, "{}", paint(kind, text))?;
    Ok(())
}
