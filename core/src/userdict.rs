//! User dictionary: session-added custom words with frequencies.
//!
//! Responsibilities:
//! - `InMemoryUserDict`: thread-safe in-memory store (learn/merge/prefix)
//! - `RedbUserDict`: persistent, ACID-backed storage using `redb`
//! - `UserDict`: backend switch dispatched by match
//!
//! Custom words feed the prediction fallback path and boost ranking; they
//! are learned when the user commits a word or accepts a suggestion.

use redb::ReadableTable;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe in-memory user dictionary.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserDict {
    inner: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryUserDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn a word: increment its count by 1.
    pub fn learn(&self, word: &str) {
        self.learn_with_count(word, 1);
    }

    /// Learn a word with a custom increment (imports, batch updates).
    pub fn learn_with_count(&self, word: &str, delta: u64) {
        if delta == 0 || word.is_empty() {
            return;
        }
        if let Ok(mut map) = self.inner.write() {
            let entry = map.entry(word.to_string()).or_insert(0);
            *entry = entry.saturating_add(delta);
        }
    }

    /// Learned frequency for a word.
    pub fn frequency(&self, word: &str) -> u64 {
        if let Ok(map) = self.inner.read() {
            map.get(word).copied().unwrap_or(0)
        } else {
            0
        }
    }

    /// All learned words starting with `prefix`, highest frequency first.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<(String, u64)> {
        let mut out: Vec<(String, u64)> = match self.inner.read() {
            Ok(map) => map
                .iter()
                .filter(|(w, _)| w.starts_with(prefix))
                .map(|(w, f)| (w.clone(), *f))
                .collect(),
            Err(_) => Vec::new(),
        };
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Merge another in-memory dictionary into this one, summing counts.
    pub fn merge_from(&self, other: &InMemoryUserDict) {
        if let (Ok(mut dst), Ok(src)) = (self.inner.write(), other.inner.read()) {
            for (k, v) in src.iter() {
                let entry = dst.entry(k.clone()).or_insert(0);
                *entry = entry.saturating_add(*v);
            }
        }
    }

    /// Snapshot of the current data.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.inner.read().map(|m| m.clone()).unwrap_or_default()
    }

    /// Replace the entire contents atomically (loading persisted state).
    pub fn replace_with(&self, data: HashMap<String, u64>) {
        if let Ok(mut map) = self.inner.write() {
            *map = data;
        }
    }
}

/// Backend switch for the user dictionary.
#[derive(Clone, Debug)]
pub enum UserDict {
    InMemory(InMemoryUserDict),
    Redb(RedbUserDict),
}

impl UserDict {
    /// Construct a default in-memory user dictionary.
    pub fn new_in_memory() -> Self {
        UserDict::InMemory(InMemoryUserDict::new())
    }

    /// Construct a redb-backed user dictionary at the provided path.
    pub fn new_redb<P: AsRef<std::path::Path>>(path: P) -> Result<Self, redb::Error> {
        Ok(UserDict::Redb(RedbUserDict::new(path)?))
    }

    /// Learn a word (increment by 1).
    pub fn learn(&self, word: &str) {
        match self {
            UserDict::InMemory(m) => m.learn(word),
            UserDict::Redb(r) => {
                let _ = r.learn(word);
            }
        }
    }

    /// Learn with a custom delta.
    pub fn learn_with_count(&self, word: &str, delta: u64) {
        match self {
            UserDict::InMemory(m) => m.learn_with_count(word, delta),
            UserDict::Redb(r) => {
                let _ = r.learn_with_count(word, delta);
            }
        }
    }

    /// Learned frequency for a word.
    pub fn frequency(&self, word: &str) -> u64 {
        match self {
            UserDict::InMemory(m) => m.frequency(word),
            UserDict::Redb(r) => r.frequency(word).unwrap_or(0),
        }
    }

    /// All learned words starting with `prefix`, highest frequency first.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<(String, u64)> {
        match self {
            UserDict::InMemory(m) => m.words_with_prefix(prefix),
            UserDict::Redb(r) => r.words_with_prefix(prefix).unwrap_or_default(),
        }
    }

    /// Snapshot the contents.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        match self {
            UserDict::InMemory(m) => m.snapshot(),
            UserDict::Redb(r) => r.snapshot().unwrap_or_default(),
        }
    }

    /// Export all entries as a JSON object of word -> count.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let mut entries: Vec<(String, u64)> = self.snapshot().into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::from(v)))
            .collect();
        serde_json::to_string_pretty(&serde_json::Value::Object(map))
    }

    /// Import entries from a JSON object of word -> count, summing counts.
    pub fn import_json(&self, json: &str) -> serde_json::Result<usize> {
        let map: HashMap<String, u64> = serde_json::from_str(json)?;
        let mut imported = 0;
        for (word, count) in map {
            self.learn_with_count(&word, count);
            imported += 1;
        }
        Ok(imported)
    }
}

/// Redb-backed user dictionary.
///
/// Atomic increments via write transactions, reads via read transactions.
#[derive(Clone)]
pub struct RedbUserDict {
    db: Arc<redb::Database>,
    path: std::path::PathBuf,
}

impl std::fmt::Debug for RedbUserDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbUserDict")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbUserDict {
    /// Table of word -> count.
    const TABLE_DEF: redb::TableDefinition<'static, &'static str, u64> =
        redb::TableDefinition::new("user_dict");

    /// Create or open a redb database at `path`.
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Result<Self, redb::Error> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref())?;
        Ok(RedbUserDict {
            db: Arc::new(db),
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Increment word count by 1.
    pub fn learn(&self, word: &str) -> Result<(), redb::Error> {
        self.learn_with_count(word, 1)
    }

    /// Increment word count by `delta`.
    pub fn learn_with_count(&self, word: &str, delta: u64) -> Result<(), redb::Error> {
        if delta == 0 || word.is_empty() {
            return Ok(());
        }
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            let current = table.get(word)?.map(|v| v.value()).unwrap_or(0);
            table.insert(word, current.saturating_add(delta))?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Stored frequency for a word.
    pub fn frequency(&self, word: &str) -> Result<u64, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::TABLE_DEF)?;
        Ok(table.get(word)?.map(|v| v.value()).unwrap_or(0))
    }

    /// All stored words starting with `prefix`, highest frequency first.
    pub fn words_with_prefix(&self, prefix: &str) -> Result<Vec<(String, u64)>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::TABLE_DEF)?;
        let mut out = Vec::new();
        for item in table.iter()? {
            let (k, v) = item?;
            if k.value().starts_with(prefix) {
                out.push((k.value().to_string(), v.value()));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(out)
    }

    /// Snapshot full contents.
    pub fn snapshot(&self) -> Result<HashMap<String, u64>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::TABLE_DEF)?;
        let mut out = HashMap::new();
        for item in table.iter()? {
            let (k, v) = item?;
            out.insert(k.value().to_string(), v.value());
        }
        Ok(out)
    }
}
