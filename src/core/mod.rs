//! Change detection and memoized command execution

pub mod batch;
pub mod fingerprint;
pub mod input;
pub mod memoizer;
pub mod runner;
pub mod summary;

pub use batch::run_batch;
pub use fingerprint::Fingerprint;
pub use input::for_each_path;
pub use memoizer::{FileReport, Memoizer};
pub use runner::{CommandRunner, ProcessRunner};
pub use summary::RunSummary;
