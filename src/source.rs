//! Line transports for the runtime
//!
//! The core consumes "an ordered source of text lines"; these are the
//! process-level implementations. EOF semantics live here, not in the
//! core — a drained source simply ends the run.

use signalgate_engine::runtime::SignalSource;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Reads signals line-by-line from a file.
pub struct FileSource {
    lines: io::Lines<BufReader<File>>,
}

impl FileSource {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl SignalSource for FileSource {
    fn next_signal(&mut self) -> Option<String> {
        loop {
            match self.lines.next()? {
                Ok(line) => return Some(line),
                Err(e) => warn!("Unreadable line skipped: {}", e),
            }
        }
    }
}

/// Reads signals from stdin until EOF.
pub struct StdinSource {
    lines: io::Lines<BufReader<io::Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for StdinSource {
    fn next_signal(&mut self) -> Option<String> {
        loop {
            match self.lines.next()? {
                Ok(line) => return Some(line),
                Err(e) => warn!("Unreadable line skipped: {}", e),
            }
        }
    }
}
