//! One pass over the input file list

use crate::core::{for_each_path, CommandRunner, Memoizer, RunSummary};
use crate::error::{PcacheError, Result};
use crate::export::Exporter;
use std::io::{BufRead, Write};

/// What happened during a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub summary: RunSummary,
    /// Failure reading the file list; files read before it were processed
    pub input: Result<usize>,
    /// First failure writing per-file output
    pub output: Result<()>,
}

/// Run every path from `input` through the memoizer and the exporter.
///
/// Neither an input nor an output failure discards work already done;
/// the caller decides what to persist and how to exit.
pub fn run_batch<R, I>(
    memoizer: &mut Memoizer<'_, R>,
    exporter: &mut dyn Exporter,
    input: I,
    writer: &mut dyn Write,
) -> BatchOutcome
where
    R: CommandRunner,
    I: BufRead,
{
    let mut write_error: Option<PcacheError> = None;

    let input = for_each_path(input, |path| {
        let report = memoizer.process(path);
        if write_error.is_none() {
            if let Err(e) = exporter.file_processed(&report, &mut *writer) {
                write_error = Some(e);
            }
        }
    });

    let summary = memoizer.summary();
    if summary.failed > 0 {
        log::info!("{} file(s) skipped", summary.failed);
    }

    BatchOutcome {
        summary,
        input,
        output: write_error.map_or(Ok(()), Err),
    }
}
