//! CLI argument parsing using clap

use crate::config::{Config, FingerprintMode, OutputFormat};
use crate::error::{PcacheError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Fingerprint mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FingerprintArg {
    /// Content hash and modification time
    Strict,
    /// Content hash only
    Content,
    /// Size and modification time, without reading the file
    Metadata,
}

impl From<FingerprintArg> for FingerprintMode {
    fn from(arg: FingerprintArg) -> Self {
        match arg {
            FingerprintArg::Strict => FingerprintMode::Strict,
            FingerprintArg::Content => FingerprintMode::Content,
            FingerprintArg::Metadata => FingerprintMode::Metadata,
        }
    }
}

/// Run a command for each file named on stdin, reusing results for unchanged files
#[derive(Parser, Debug)]
#[command(name = "pcache")]
#[command(version)]
#[command(
    about = "Run a command for each file read from stdin, skipping files that have not changed",
    long_about = None
)]
pub struct Cli {
    /// Command and fixed arguments; each file name is appended as the last argument
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,

    /// Snapshot file holding cached results
    #[arg(
        short = 'c',
        long = "cache-file",
        value_name = "PATH",
        env = "PCACHE_FILE",
        default_value = crate::config::DEFAULT_CACHE_FILE
    )]
    pub cache_file: PathBuf,

    /// Which file attributes decide whether a cached result is reused
    #[arg(
        short = 'f',
        long = "fingerprint",
        value_enum,
        value_name = "MODE",
        default_value = "strict"
    )]
    pub fingerprint: FingerprintArg,

    /// Leave last_seen untouched on reused entries
    #[arg(long = "no-refresh-last-seen")]
    pub no_refresh_last_seen: bool,

    /// Remove the snapshot before running
    #[arg(long = "clear-cache")]
    pub clear_cache: bool,

    /// Print a JSON report instead of command output
    #[arg(long = "json")]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> Result<Config> {
        if self
            .command
            .first()
            .map_or(true, |program| program.trim().is_empty())
        {
            return Err(PcacheError::InvalidConfig(
                "command must not be empty".to_string(),
            ));
        }

        let output_format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Console
        };

        Ok(Config {
            command: self.command,
            cache_path: self.cache_file,
            fingerprint_mode: self.fingerprint.into(),
            refresh_last_seen: !self.no_refresh_last_seen,
            clear_cache: self.clear_cache,
            output_format,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
