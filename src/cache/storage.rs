//! Snapshot file storage

use crate::cache::CacheStore;
use crate::error::{PcacheError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Load the store from the snapshot file.
///
/// A missing snapshot is created empty on disk before returning, so a
/// first run leaves a valid file behind. A snapshot that exists but does
/// not parse is reported as [`PcacheError::SnapshotCorrupt`].
pub fn load_store(path: &Path) -> Result<CacheStore> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No cache at '{}', creating an empty one", path.display());
            let store = CacheStore::new();
            save_store(&store, path)?;
            return Ok(store);
        }
        Err(e) => {
            return Err(PcacheError::CacheError(format!(
                "Failed to open cache file '{}': {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    let store: CacheStore =
        serde_json::from_reader(reader).map_err(|e| PcacheError::SnapshotCorrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    log::debug!(
        "Loaded {} cached entries from '{}'",
        store.len(),
        path.display()
    );
    Ok(store)
}

/// Write the whole store to the snapshot file.
///
/// Data goes to a sibling temporary file first and is renamed over the
/// target, so an interrupted save leaves the previous snapshot intact.
pub fn save_store(store: &CacheStore, path: &Path) -> Result<()> {
    let tmp_path = temp_path(path);

    let file = File::create(&tmp_path).map_err(|e| {
        PcacheError::CacheError(format!(
            "Failed to create cache file '{}': {}",
            tmp_path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, store)
        .map_err(|e| PcacheError::CacheError(format!("Failed to write cache: {}", e)))?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| PcacheError::CacheError(format!("Failed to write cache: {}", e)))?;
    drop(writer);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PcacheError::CacheError(format!(
            "Failed to replace cache file '{}': {}",
            path.display(),
            e
        )));
    }

    log::debug!("Saved {} cached entries to '{}'", store.len(), path.display());
    Ok(())
}

/// Remove the snapshot file if it exists
pub fn clear_cache(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PcacheError::CacheError(format!(
            "Failed to remove cache file '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// `pc-cache.json` -> `pc-cache.json.tmp`, in the same directory
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
