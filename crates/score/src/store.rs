//! Store module - key-value persistence for the high score
//!
//! The tracker only ever needs `get(key, default)` / `set(key, value)` over
//! integer values. [`JsonFileStore`] keeps them in a small JSON document;
//! a missing or unreadable file degrades to defaults and writes are
//! best-effort. [`MemoryStore`] backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Key-value persistence port.
pub trait ScoreStore {
    fn get(&self, key: &str, default: u64) -> u64;
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store. State dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: BTreeMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str, default: u64) -> u64 {
        self.scores.get(key).copied().unwrap_or(default)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.scores.insert(key.to_string(), value);
    }
}

/// On-disk document format.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    scores: BTreeMap<String, u64>,
}

/// JSON-file-backed store. Every `set` rewrites the document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    file: ScoreFile,
}

impl JsonFileStore {
    /// Load the store, falling back to an empty document when the file is
    /// missing or does not parse.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = fs::read_to_string(&path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default();
        Self { path, file }
    }

    fn persist(&self) {
        if let Ok(json) = serde_json::to_string_pretty(&self.file) {
            let _ = fs::write(&self.path, json);
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str, default: u64) -> u64 {
        self.file.scores.get(key).copied().unwrap_or(default)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.file.scores.insert(key.to_string(), value);
        self.persist();
    }
}
