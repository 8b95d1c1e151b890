//! Persistent result cache
//!
//! Results are grouped per command signature and keyed by file path. The
//! whole store is read once at startup and written back once at the end
//! of the run.

mod entry;
mod storage;

pub use entry::{CacheEntry, CacheStore};
pub use storage::{clear_cache, load_store, save_store};
