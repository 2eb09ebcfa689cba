//! Per-topic attempt counter for custom quizzes.
//!
//! Each custom topic gets its own counter so that asking for the same topic
//! twice produces a fresh quiz. Counters live in a plain key-value store and
//! are never expired.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix put in front of every normalized topic.
pub const DEFAULT_KEY_PREFIX: &str = "chronokwiz_attempt_";

/// Errors raised by a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store that lives for the current process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every `set` rewrites the whole file. Concurrent writers are not
/// coordinated; the last write wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Normalizes a free-form topic: trimmed, single-spaced, lowercase.
pub fn normalize_topic(topic: &str) -> String {
    topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Counts how many quizzes were requested per topic.
#[derive(Debug)]
pub struct AttemptCounter<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> AttemptCounter<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Storage key for a topic.
    pub fn key(&self, topic: &str) -> String {
        format!("{}{}", self.prefix, normalize_topic(topic))
    }

    /// Current attempt number; 1 when unset or unreadable.
    pub fn get_attempt_count(&self, topic: &str) -> u32 {
        self.store
            .get(&self.key(topic))
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|count| *count >= 1)
            .unwrap_or(1)
    }

    /// Bumps the counter for a topic and returns the new value.
    pub fn increment_attempt_count(&mut self, topic: &str) -> Result<u32, StoreError> {
        let next = self.get_attempt_count(topic).saturating_add(1);
        let key = self.key(topic);
        self.store.set(&key, &next.to_string())?;
        tracing::debug!("Attempt counter {} is now {}", key, next);
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
