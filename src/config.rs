//! Configuration types for pcache

use std::path::PathBuf;

/// Default location of the snapshot file, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "pc-cache.json";

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Echo each executed command and its output, then a summary line
    #[default]
    Console,
    /// A single JSON document written after the batch
    Json,
}

/// Which file attributes decide whether a cached result is still valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FingerprintMode {
    /// Content hash and modification time must both match
    #[default]
    Strict,
    /// Content hash alone decides
    Content,
    /// Size and modification time only; file content is never read.
    /// Edits that keep the size and restore the timestamp go unnoticed.
    Metadata,
}

/// Configuration options for pcache
#[derive(Debug, Clone)]
pub struct Config {
    /// Command and fixed arguments; the file name is appended per invocation
    pub command: Vec<String>,

    /// Snapshot file location (default: pc-cache.json)
    pub cache_path: PathBuf,

    /// How fingerprints are compared
    pub fingerprint_mode: FingerprintMode,

    /// Update `last_seen` on entries that are reused
    pub refresh_last_seen: bool,

    /// Remove the snapshot before running
    pub clear_cache: bool,

    /// Output format (console or json)
    pub output_format: OutputFormat,

    /// Verbosity count (-v, -vv)
    pub verbose: u8,

    /// Only log errors
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            fingerprint_mode: FingerprintMode::Strict,
            refresh_last_seen: true,
            clear_cache: false,
            output_format: OutputFormat::Console,
            verbose: 0,
            quiet: false,
        }
    }
}

impl Config {
    /// Key under which results for this command are cached.
    ///
    /// The per-file argument is not part of the key, so every file run
    /// through the same command line shares one bucket. Reordering or
    /// changing arguments yields a different key.
    pub fn command_signature(&self) -> String {
        self.command.join(" ")
    }
}
