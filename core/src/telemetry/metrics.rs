use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::LineOutcome;

/// Run-lifetime tallies, one per line outcome.
#[derive(Debug, Default)]
pub struct ReadingCounters {
    summary: Summary,
}

/// Snapshot of the counters at the end of (or during) a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub lines_read: usize,
    pub in_range: usize,
    pub outside_range: usize,
    pub skipped_zero: usize,
    pub discarded_outliers: usize,
    pub malformed_lines: usize,
}

impl ReadingCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &LineOutcome) {
        let summary = &mut self.summary;
        summary.lines_read += 1;
        match outcome {
            LineOutcome::InvalidFormat | LineOutcome::InvalidLine => summary.malformed_lines += 1,
            LineOutcome::ZeroSkipped => summary.skipped_zero += 1,
            LineOutcome::Outlier { .. } => summary.discarded_outliers += 1,
            LineOutcome::InRange { .. } => summary.in_range += 1,
            LineOutcome::OutsideRange { .. } => summary.outside_range += 1,
        }
    }

    pub fn snapshot(&self) -> Summary {
        self.summary
    }
}

impl Summary {
    /// Every line read lands in exactly one bucket.
    pub fn is_balanced(&self) -> bool {
        self.in_range
            + self.outside_range
            + self.skipped_zero
            + self.discarded_outliers
            + self.malformed_lines
            == self.lines_read
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "Total readings in range: {}", self.in_range)?;
        writeln!(f, "Skipped zero readings: {}", self.skipped_zero)?;
        writeln!(f, "Discarded outlier readings: {}", self.discarded_outliers)?;
        writeln!(f, "Readings outside range: {}", self.outside_range)?;
        writeln!(f, "Malformed lines: {}", self.malformed_lines)?;
        write!(f, "Lines read: {}", self.lines_read)
    }
}
