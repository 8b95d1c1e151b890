//! Run reporting

mod console;
mod json;

use crate::config::OutputFormat;
use crate::core::{FileReport, RunSummary};
use crate::error::Result;
use std::io::Write;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

/// Trait for reporting a batch run
pub trait Exporter {
    /// Called once per input file, in input order
    fn file_processed(&mut self, report: &FileReport, writer: &mut dyn Write) -> Result<()>;

    /// Called once after the last file
    fn finish(&mut self, summary: &RunSummary, writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter::default()),
    }
}
