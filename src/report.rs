//! Ordered benchmark report
//!
//! Lines render exactly as the classic binary-trees output:
//!
//! ```text
//! stretch tree of depth 7	 check: 255
//! 64	 trees of depth 4	 check: 1984
//! 16	 trees of depth 6	 check: 2032
//! long lived tree of depth 6	 check: 127
//! ```

use std::fmt;

use crate::schedule::{PositionTag, WorkKind};

/// Result of one work item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportLine {
    /// Position in the report
    pub tag: PositionTag,

    /// Which kind of item produced it
    pub kind: WorkKind,

    /// Tree depth
    pub depth: u32,

    /// Node count, summed over iterations
    pub check: u64,
}

impl ReportLine {
    /// Trees that contributed to `check`
    pub fn iterations(&self) -> u32 {
        match self.kind {
            WorkKind::Iterated { iterations } => iterations,
            WorkKind::Stretch | WorkKind::LongLived => 1,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WorkKind::Stretch => {
                write!(f, "stretch tree of depth {}\t check: {}", self.depth, self.check)
            }
            WorkKind::Iterated { iterations } => write!(
                f,
                "{}\t trees of depth {}\t check: {}",
                iterations, self.depth, self.check
            ),
            WorkKind::LongLived => {
                write!(f, "long lived tree of depth {}\t check: {}", self.depth, self.check)
            }
        }
    }
}

/// All lines of a run, sorted by position tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    /// Sort collected lines into report order
    pub fn from_unordered(mut lines: Vec<ReportLine>) -> Self {
        lines.sort_by_key(|line| line.tag);
        Self { lines }
    }

    /// Lines in report order
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Rendered text, one line per item
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Digest of the rendered text
    pub fn fingerprint(&self) -> blake3::Hash {
        blake3::hash(self.render().as_bytes())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
