use crate::artifacts::merge::session::{MergeSession, MergeView, Side};
use anyhow::{Context, bail};
use std::str::FromStr;

/// One scripted merge action, as written on the command line.
///
/// Rows are 1-based like the rendered row numbers:
/// `line:ROW:SIDE`, `block:START-END:SIDE`, `all:SIDE`, `undo`, `redo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep {
    Line { row: usize, side: Side },
    Block { start: usize, end: usize, side: Side },
    All { side: Side },
    Undo,
    Redo,
}

impl MergeStep {
    pub fn apply<'s>(&self, session: &'s mut MergeSession) -> MergeView<'s> {
        match *self {
            MergeStep::Line { row, side } => session.accept_line(row - 1, side),
            MergeStep::Block { start, end, side } => session.accept_block(start - 1, end - 1, side),
            MergeStep::All { side } => session.accept_all(side),
            MergeStep::Undo => session.undo(),
            MergeStep::Redo => session.redo(),
        }
    }
}

fn parse_row(raw: &str) -> anyhow::Result<usize> {
    let row = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid row number '{raw}'"))?;
    if row == 0 {
        bail!("row numbers start at 1");
    }
    Ok(row)
}

impl FromStr for MergeStep {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(':').collect::<Vec<_>>();

        match parts.as_slice() {
            ["undo"] => Ok(MergeStep::Undo),
            ["redo"] => Ok(MergeStep::Redo),
            ["all", side] => Ok(MergeStep::All {
                side: side.parse()?,
            }),
            ["line", row, side] => Ok(MergeStep::Line {
                row: parse_row(row)?,
                side: side.parse()?,
            }),
            ["block", range, side] => {
                let (start, end) = range
                    .split_once('-')
                    .with_context(|| format!("invalid block range '{range}', expected START-END"))?;
                Ok(MergeStep::Block {
                    start: parse_row(start)?,
                    end: parse_row(end)?,
                    side: side.parse()?,
                })
            }
            _ => bail!(
                "invalid merge step '{s}', expected line:ROW:SIDE, block:START-END:SIDE, all:SIDE, undo or redo"
            ),
        }
    }
}
