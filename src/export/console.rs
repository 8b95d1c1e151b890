//! Console (human-readable) exporter

use crate::core::{FileReport, RunSummary};
use crate::error::Result;
use crate::export::Exporter;
use std::io::Write;

/// Echoes each executed command and its output, then a summary line.
/// Reused results are not printed again.
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn file_processed(&mut self, report: &FileReport, writer: &mut dyn Write) -> Result<()> {
        if let (Some(command), Some(output)) = (&report.command, &report.output) {
            writeln!(writer, "> {}", command)?;
            writeln!(writer, "{}", output)?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary, writer: &mut dyn Write) -> Result<()> {
        writeln!(
            writer,
            "Found {} files. New: {}. Changed: {}. Unchanged: {}.",
            summary.total(),
            summary.new,
            summary.changed,
            summary.unchanged
        )?;
        Ok(())
    }
}
