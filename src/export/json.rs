//! JSON exporter

use crate::core::{FileReport, RunSummary};
use crate::error::Result;
use crate::export::Exporter;
use serde::Serialize;
use std::io::Write;

/// Collects every file report and writes one JSON document at the end
#[derive(Default)]
pub struct JsonExporter {
    files: Vec<FileReport>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: &'a [FileReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    found: usize,
    new: usize,
    changed: usize,
    unchanged: usize,
    failed: usize,
}

impl Exporter for JsonExporter {
    fn file_processed(&mut self, report: &FileReport, _writer: &mut dyn Write) -> Result<()> {
        self.files.push(report.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary, writer: &mut dyn Write) -> Result<()> {
        let output = JsonOutput {
            files: &self.files,
            summary: JsonSummary {
                found: summary.total(),
                new: summary.new,
                changed: summary.changed,
                unchanged: summary.unchanged,
                failed: summary.failed,
            },
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
