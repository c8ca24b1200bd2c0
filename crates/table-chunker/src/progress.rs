//! Console progress markers.

use std::io::{self, Write};

use crate::chunk::ChunkRange;
use crate::chunker::CopyStats;
use crate::core::traits::ProgressSink;

/// Prints one `.` per copied chunk and a newline when the run ends.
///
/// Write failures are ignored: progress output never aborts a copy.
pub struct DotProgress<W: Write + Send> {
    out: W,
}

impl DotProgress<io::Stdout> {
    /// Dots on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> DotProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressSink for DotProgress<W> {
    fn chunk_copied(&mut self, _chunk: &ChunkRange, _affected_rows: u64) {
        let _ = self.out.write_all(b".");
        let _ = self.out.flush();
    }

    fn finished(&mut self, _stats: &CopyStats) {
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
    }
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn chunk_copied(&mut self, _chunk: &ChunkRange, _affected_rows: u64) {}

    fn finished(&mut self, _stats: &CopyStats) {}
}
