//! File fingerprints for change detection

use crate::config::FingerprintMode;
use crate::error::{PcacheError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read buffer size for hashing
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Snapshot of the attributes of a file that decide cache validity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Hex SHA-256 of the file content; empty when computed in metadata mode
    pub hash: String,
    /// Last modification time reported by the filesystem
    pub modified: DateTime<Utc>,
    /// File size in bytes
    #[serde(default)]
    pub size: u64,
}

impl Fingerprint {
    /// Fingerprint the file at `path`.
    ///
    /// In [`FingerprintMode::Metadata`] the content is not read and the
    /// hash is left empty.
    pub fn compute(path: &Path, mode: FingerprintMode) -> Result<Self> {
        let access_error = |e: io::Error| PcacheError::FileAccess {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let metadata = fs::metadata(path).map_err(access_error)?;
        if metadata.is_dir() {
            return Err(PcacheError::FileAccess {
                path: path.display().to_string(),
                reason: "is a directory".to_string(),
            });
        }
        let modified = metadata.modified().map_err(access_error)?;

        let hash = match mode {
            FingerprintMode::Metadata => String::new(),
            FingerprintMode::Strict | FingerprintMode::Content => {
                hash_file(path).map_err(access_error)?
            }
        };

        Ok(Self {
            hash,
            modified: DateTime::<Utc>::from(modified),
            size: metadata.len(),
        })
    }

    /// Whether a cached fingerprint still describes the file under `mode`
    pub fn matches(&self, current: &Fingerprint, mode: FingerprintMode) -> bool {
        match mode {
            FingerprintMode::Strict => {
                !self.hash.is_empty()
                    && self.hash == current.hash
                    && self.modified == current.modified
            }
            FingerprintMode::Content => !self.hash.is_empty() && self.hash == current.hash,
            FingerprintMode::Metadata => {
                self.size == current.size && self.modified == current.modified
            }
        }
    }
}

/// Hex-encoded SHA-256 of the full file content
fn hash_file(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use tempfile::TempDir;

    /// SHA-256 of "hello\n"
    const HELLO_SHA256: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    fn write_file(dir: &Path, name: &str, content: &str, mtime_secs: i64) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
        path
    }

    #[test]
    fn test_compute_hash_and_metadata() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "hello\n", 1_700_000_000);

        let fp = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        assert_eq!(fp.hash, HELLO_SHA256);
        assert_eq!(fp.size, 6);
        assert_eq!(fp.modified.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "same\n", 1_700_000_000);

        let fp1 = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();
        let fp2 = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        assert_eq!(fp1, fp2);
    }

    #[test]
    fn test_metadata_mode_skips_hash() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "hello\n", 1_700_000_000);

        let fp = Fingerprint::compute(&path, FingerprintMode::Metadata).unwrap();

        assert!(fp.hash.is_empty());
        assert_eq!(fp.size, 6);
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Fingerprint::compute(&temp.path().join("nope.txt"), FingerprintMode::Strict);

        assert!(matches!(result, Err(PcacheError::FileAccess { .. })));
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = Fingerprint::compute(temp.path(), FingerprintMode::Content);

        assert!(matches!(result, Err(PcacheError::FileAccess { .. })));
    }

    #[test]
    fn test_strict_detects_touch_without_content_change() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "hello\n", 1_700_000_000);
        let before = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        filetime::set_file_mtime(&path, FileTime::from_unix_time(1_700_000_100, 0)).unwrap();
        let after = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        assert!(!before.matches(&after, FingerprintMode::Strict));
        assert!(before.matches(&after, FingerprintMode::Content));
        assert!(!before.matches(&after, FingerprintMode::Metadata));
    }

    #[test]
    fn test_content_change_with_same_size_and_mtime() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "aaaa\n", 1_700_000_000);
        let before = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        let path = write_file(temp.path(), "a.txt", "bbbb\n", 1_700_000_000);
        let after = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        assert!(!before.matches(&after, FingerprintMode::Strict));
        assert!(!before.matches(&after, FingerprintMode::Content));
        // Size-preserving edits are invisible to metadata mode
        assert!(before.matches(&after, FingerprintMode::Metadata));
    }

    #[test]
    fn test_empty_cached_hash_never_matches_hash_modes() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "a.txt", "x", 1_700_000_000);
        let metadata_only = Fingerprint::compute(&path, FingerprintMode::Metadata).unwrap();
        let current = Fingerprint::compute(&path, FingerprintMode::Strict).unwrap();

        assert!(!metadata_only.matches(&current, FingerprintMode::Strict));
        assert!(!metadata_only.matches(&current, FingerprintMode::Content));
    }
}
