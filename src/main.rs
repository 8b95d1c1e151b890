//! pcache - memoize a command over a list of files
//!
//! Reads file names from stdin, runs the configured command once per file
//! and records its output. On later runs, files whose fingerprint is
//! unchanged for the same command line are skipped.

mod cache;
mod cli;
mod config;
mod core;
mod error;
mod export;
mod logging;

use cache::{clear_cache, load_store, save_store};
use clap::Parser;
use cli::Cli;
use crate::core::{run_batch, Memoizer, ProcessRunner};
use error::PcacheError;
use export::create_exporter;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Convert to config
    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init_logging(config.verbose, config.quiet);

    // === Phase 0: Handle --clear-cache ===
    if config.clear_cache {
        log::info!("Clearing cache '{}'", config.cache_path.display());
        if let Err(e) = clear_cache(&config.cache_path) {
            log::warn!("Failed to clear cache: {}", e);
        }
    }

    // === Phase 1: Load Snapshot ===
    let mut store = match load_store(&config.cache_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if store.is_empty() {
        log::debug!("Starting with an empty cache");
    }
    let signature = config.command_signature();
    log::debug!(
        "{} cached entries for '{}'",
        store.bucket(&signature).map_or(0, |b| b.files.len()),
        signature
    );

    // === Phase 2: Process Files ===
    let runner = ProcessRunner;
    let mut memoizer = Memoizer::new(&config, &mut store, &runner);
    let mut exporter = create_exporter(config.output_format);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = run_batch(
        &mut memoizer,
        exporter.as_mut(),
        io::stdin().lock(),
        &mut out,
    );

    // === Phase 3: Save Snapshot ===
    if let Err(e) = save_store(&store, &config.cache_path) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    if let Err(e) = outcome.input {
        eprintln!("Error: {}", e);
        return ExitCode::from(1);
    }

    // === Phase 4: Report ===
    let finished = outcome.output.and_then(|_| {
        exporter
            .finish(&outcome.summary, &mut out)
            .and_then(|_| out.flush().map_err(PcacheError::from))
    });
    if let Err(e) = finished {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
