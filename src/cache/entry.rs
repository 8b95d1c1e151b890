//! In-memory cache model
//!
//! The serialized form of [`CacheStore`] is the snapshot document:
//! `{"commands": {signature: {"files": {path: entry}}}}`.

use crate::core::Fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Cached result of one command run against one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Captured standard output of the command
    pub output: String,
    /// File state the output was produced from
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
    /// Last time the entry was produced or confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn new(output: String, fingerprint: Fingerprint, last_seen: DateTime<Utc>) -> Self {
        Self {
            output,
            fingerprint,
            last_seen: Some(last_seen),
        }
    }
}

/// All entries recorded for one command signature, keyed by file path as given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBucket {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: BTreeMap<String, CacheEntry>,
}

/// Every cached result, keyed by command signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStore {
    #[serde(default, deserialize_with = "null_as_default")]
    commands: BTreeMap<String, CommandBucket>,
}

impl CacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for a file under a command signature.
    ///
    /// A missing bucket and a missing file are both `None`; there is no
    /// default entry that could be mistaken for a real fingerprint.
    pub fn get(&self, signature: &str, path: &str) -> Option<&CacheEntry> {
        self.commands.get(signature)?.files.get(path)
    }

    /// Insert or replace the entry for a file, creating the bucket if needed
    pub fn put(&mut self, signature: &str, path: &str, entry: CacheEntry) {
        self.commands
            .entry(signature.to_string())
            .or_default()
            .files
            .insert(path.to_string(), entry);
    }

    /// Set `last_seen` on an existing entry. Returns false if there is none.
    pub fn touch(&mut self, signature: &str, path: &str, seen: DateTime<Utc>) -> bool {
        match self
            .commands
            .get_mut(signature)
            .and_then(|bucket| bucket.files.get_mut(path))
        {
            Some(entry) => {
                entry.last_seen = Some(seen);
                true
            }
            None => false,
        }
    }

    /// Bucket for a command signature, if any file has been processed under it
    pub fn bucket(&self, signature: &str) -> Option<&CommandBucket> {
        self.commands.get(signature)
    }

    /// Total number of cached entries across all commands
    pub fn len(&self) -> usize {
        self.commands.values().map(|b| b.files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
