//! Per-run counters

use serde::Serialize;

/// Counts of processed files by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files with no cached entry for this command
    pub new: usize,
    /// Files whose cached entry was out of date
    pub changed: usize,
    /// Files whose cached entry was reused
    pub unchanged: usize,
    /// Files skipped because they could not be read or the command failed
    pub failed: usize,
}

impl RunSummary {
    /// Files that were processed successfully (new + changed + unchanged)
    pub fn total(&self) -> usize {
        self.new + self.changed + self.unchanged
    }
}
