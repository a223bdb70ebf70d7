//! Core utilities and shared types
//!
//! - `error`: the typed failure taxonomy of the engine
//! - `OutputSink`: where command output goes (pager, stdout or a capture)

pub mod error;

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Destination for command output.
///
/// Interactive sessions get the `minus` pager; pipes, redirects and
/// `NO_PAGER=1` get plain stdout. `Captured` keeps everything in memory so
/// command output can be asserted on without a process boundary.
pub enum OutputSink {
    Paged(Pager),
    Stdout(io::Stdout),
    Captured(Vec<u8>),
}

impl OutputSink {
    pub fn detect() -> Self {
        let pager_disabled = std::env::var_os("NO_PAGER").is_some();

        if !pager_disabled && io::stdout().is_terminal() {
            OutputSink::Paged(Pager::new())
        } else {
            OutputSink::Stdout(io::stdout())
        }
    }

    pub fn captured() -> Self {
        OutputSink::Captured(Vec::new())
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, OutputSink::Paged(_))
    }

    pub fn captured_text(&self) -> Option<String> {
        match self {
            OutputSink::Captured(buffer) => Some(String::from_utf8_lossy(buffer).into_owned()),
            _ => None,
        }
    }

    /// Hands buffered output to the pager. A no-op for the other sinks.
    pub fn finish(&mut self) -> anyhow::Result<()> {
        match self {
            OutputSink::Paged(pager) => {
                minus::page_all(pager.clone())?;
                Ok(())
            }
            OutputSink::Stdout(stdout) => {
                stdout.flush()?;
                Ok(())
            }
            OutputSink::Captured(_) => Ok(()),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Paged(pager) => {
                let text = std::str::from_utf8(buf)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                pager.push_str(text).map_err(io::Error::other)?;
                Ok(buf.len())
            }
            OutputSink::Stdout(stdout) => stdout.write(buf),
            OutputSink::Captured(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Paged(_) => Ok(()),
            OutputSink::Stdout(stdout) => stdout.flush(),
            OutputSink::Captured(buffer) => buffer.flush(),
        }
    }
}
