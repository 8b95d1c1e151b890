//! Hit/miss decision and command execution
//!
//! For each file the memoizer fingerprints it, compares against the cached
//! entry for the current command signature, and only runs the command when
//! there is no entry or the entry is stale. A successful run replaces the
//! entry wholesale; a failed run leaves the store untouched.

use crate::cache::{CacheEntry, CacheStore};
use crate::config::{Config, FingerprintMode};
use crate::core::{CommandRunner, Fingerprint, RunSummary};
use crate::error::{PcacheError, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

/// How a single input file was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// No cached entry; command executed
    New,
    /// Cached entry was stale; command executed
    Changed,
    /// Cached entry reused; command not executed
    Unchanged,
    /// File unreadable or command failed; nothing cached
    Failed,
}

/// Result of processing one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    /// Command line that was run, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Captured output, present only when the command ran in this batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-run context: the store, the command being memoized and the counters
pub struct Memoizer<'a, R: CommandRunner> {
    store: &'a mut CacheStore,
    runner: &'a R,
    command: &'a [String],
    signature: String,
    mode: FingerprintMode,
    refresh_last_seen: bool,
    summary: RunSummary,
}

impl<'a, R: CommandRunner> Memoizer<'a, R> {
    pub fn new(config: &'a Config, store: &'a mut CacheStore, runner: &'a R) -> Self {
        Self {
            store,
            runner,
            command: &config.command,
            signature: config.command_signature(),
            mode: config.fingerprint_mode,
            refresh_last_seen: config.refresh_last_seen,
            summary: RunSummary::default(),
        }
    }

    /// Counters accumulated so far
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Process one file. File-level failures are logged and reported as
    /// [`FileStatus::Failed`]; they never abort the batch.
    pub fn process(&mut self, path: &str) -> FileReport {
        match self.memoize(path) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Skipping '{}': {}", path, e);
                self.summary.failed += 1;
                let command = match &e {
                    PcacheError::Execution { command, .. } => Some(command.clone()),
                    _ => None,
                };
                FileReport {
                    path: path.to_string(),
                    status: FileStatus::Failed,
                    command,
                    output: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn memoize(&mut self, path: &str) -> Result<FileReport> {
        let fingerprint = Fingerprint::compute(Path::new(path), self.mode)?;

        let status = match self.store.get(&self.signature, path) {
            Some(entry) if entry.fingerprint.matches(&fingerprint, self.mode) => {
                FileStatus::Unchanged
            }
            Some(_) => FileStatus::Changed,
            None => FileStatus::New,
        };

        if status == FileStatus::Unchanged {
            log::debug!("Cache hit for '{}'", path);
            if self.refresh_last_seen {
                self.store.touch(&self.signature, path, Utc::now());
            }
            self.summary.unchanged += 1;
            return Ok(FileReport {
                path: path.to_string(),
                status,
                command: None,
                output: None,
                error: None,
            });
        }

        let mut argv = self.command.to_vec();
        argv.push(path.to_string());
        let command_line = argv.join(" ");
        log::debug!("Running '{}' ({:?})", command_line, status);

        let output = self.runner.run(&argv)?;

        self.store.put(
            &self.signature,
            path,
            CacheEntry::new(output.clone(), fingerprint, Utc::now()),
        );
        match status {
            FileStatus::New => self.summary.new += 1,
            _ => self.summary.changed += 1,
        }

        Ok(FileReport {
            path: path.to_string(),
            status,
            command: Some(command_line),
            output: Some(output),
            error: None,
        })
    }
}
