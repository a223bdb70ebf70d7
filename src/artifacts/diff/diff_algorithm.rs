use crate::artifacts::core::error::DiffError;
use derive_new::new;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One step of an edit script, addressed by line index.
///
/// `old` indexes the original sequence, `new` the changed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

impl Edit {
    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }
}

pub trait DiffAlgorithm<'d, T> {
    type Trace;
    type EditScript;

    fn compute_shortest_edit(&self) -> Result<Self::Trace, DiffError>;
    fn backtrack(&self) -> Result<Self::EditScript, DiffError>;
    fn diff(&self) -> Result<Self::EditScript, DiffError>;
}

/// Stop signal for a running diff. Clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Furthest reaching x per diagonal, snapshotted at the start of one round.
///
/// Only diagonals `-d..=d` can be read when stepping back from round `d`, so
/// that window is all that is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontier {
    lowest_k: isize,
    reach: Vec<isize>,
}

impl Frontier {
    fn capture(v: &[isize], offset: usize, d: isize) -> Self {
        let from = offset as isize - d;
        let to = offset as isize + d;
        Self {
            lowest_k: -d,
            reach: v[from as usize..=to as usize].to_vec(),
        }
    }

    fn reach(&self, k: isize) -> isize {
        self.reach[(k - self.lowest_k) as usize]
    }
}

/// Myers' O(ND) shortest edit script over any sequence of comparable keys.
#[derive(Debug, Clone, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
    #[new(default)]
    cancel: Option<&'d Cancellation>,
}

impl<'d, T: Eq> MyersDiff<'d, T> {
    /// Checked once per edit distance round; a cancelled search gives up with
    /// `DiffError::Cancelled`.
    pub fn with_cancellation(self, cancel: &'d Cancellation) -> Self {
        Self {
            cancel: Some(cancel),
            ..self
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(Cancellation::is_cancelled)
    }

    fn bounds(&self) -> (isize, isize) {
        (self.a.len() as isize, self.b.len() as isize)
    }
}

impl<'d, T: Eq> DiffAlgorithm<'d, T> for MyersDiff<'d, T> {
    type Trace = Vec<Frontier>;
    type EditScript = Vec<Edit>;

    fn compute_shortest_edit(&self) -> Result<Self::Trace, DiffError> {
        let (n, m) = self.bounds();
        let offset = (n + m) as usize;
        let mut trace = Vec::new();

        if offset == 0 {
            return Ok(trace);
        }

        let mut v = vec![0; 2 * offset + 2];

        for d in 0..=(n + m) {
            if self.is_cancelled() {
                return Err(DiffError::Cancelled);
            }
            trace.push(Frontier::capture(&v, offset, d));

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d {
                    // only reachable from k+1, an insertion
                    v[idx + 1]
                } else if k == d {
                    // only reachable from k-1, a deletion
                    v[idx - 1] + 1
                } else {
                    let x_del = v[idx - 1] + 1;
                    let x_ins = v[idx + 1];
                    if x_del > x_ins { x_del } else { x_ins }
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return Ok(trace);
                }
            }
        }

        Ok(trace)
    }

    fn backtrack(&self) -> Result<Self::EditScript, DiffError> {
        let (mut x, mut y) = self.bounds();
        let mut edits = Vec::new();

        let trace = self.compute_shortest_edit()?;

        for (d, frontier) in trace.iter().enumerate().rev() {
            let d = d as isize;
            if d == 0 {
                break;
            }

            let k = x - y;
            let prev_k = if k == -d {
                k + 1
            } else if k == d {
                k - 1
            } else if frontier.reach(k - 1) + 1 > frontier.reach(k + 1) {
                k - 1
            } else {
                k + 1
            };

            let prev_x = frontier.reach(prev_k);
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edits.push(Edit::Equal {
                    old: (x - 1) as usize,
                    new: (y - 1) as usize,
                });
                x -= 1;
                y -= 1;
            }

            if x == prev_x {
                edits.push(Edit::Insert {
                    new: prev_y as usize,
                });
            } else {
                edits.push(Edit::Delete {
                    old: prev_x as usize,
                });
            }

            (x, y) = (prev_x, prev_y);
        }

        // whatever is left is the common prefix
        while x > 0 && y > 0 {
            edits.push(Edit::Equal {
                old: (x - 1) as usize,
                new: (y - 1) as usize,
            });
            x -= 1;
            y -= 1;
        }

        edits.reverse();
        Ok(edits)
    }

    fn diff(&self) -> Result<Self::EditScript, DiffError> {
        if self.a.is_empty() {
            return Ok((0..self.b.len()).map(|new| Edit::Insert { new }).collect());
        }
        if self.b.is_empty() {
            return Ok((0..self.a.len()).map(|old| Edit::Delete { old }).collect());
        }

        self.backtrack()
    }
}
