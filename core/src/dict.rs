//! Dictionary-source boundary and stores.
//!
//! `LookupSource` is the contract to the dictionary engine: a unigram query
//! takes a prefix; n-gram queries take one or two base words plus a prefix.
//! All queries return up to `limit` scored candidates and may be empty, but
//! never malformed: a candidate with an empty word is dropped individually
//! (engine noise), never failing the whole result set.
//!
//! Two implementations:
//! - `MemoryStore`: in-memory maps with dynamic insertion
//! - `NgramStore`: FST key index + bincode payload artifacts on disk

use crate::candidate::{sort_candidates, Candidate};
use anyhow::{Context, Result};
use fst::{IntoStreamer, Map, Streamer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Artifact file names produced by the `build_dict` tool.
pub const UNIGRAM_FST: &str = "unigram.fst";
pub const UNIGRAM_BIN: &str = "unigram.bin";
pub const NGRAM_FST: &str = "ngram.fst";
pub const NGRAM_BIN: &str = "ngram.bin";

/// Separator joining context words into one n-gram key.
pub const KEY_SEP: char = '\u{1}';

/// Join one or two context words into the n-gram key form.
pub fn ngram_key(words: &[&str]) -> String {
    let mut key = String::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEP);
        }
        key.push_str(w);
    }
    key
}

/// One stored dictionary entry, shared by the store payloads and the
/// `build_dict` converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub word: String,
    pub annotation: String,
    pub freq: u32,
    pub is_emoji: bool,
}

impl DictEntry {
    pub fn new<T: Into<String>>(word: T, freq: u32) -> Self {
        Self {
            word: word.into(),
            annotation: String::new(),
            freq,
            is_emoji: false,
        }
    }
}

/// Convert raw entries into sorted candidates, applying the prefix filter
/// and dropping malformed entries one at a time.
fn candidates_from_entries<'a, I>(entries: I, prefix: &str, limit: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a DictEntry>,
{
    let mut out: Vec<Candidate> = Vec::new();
    for entry in entries {
        if entry.word.is_empty() {
            tracing::debug!("dropping malformed dictionary candidate (empty word)");
            continue;
        }
        if !entry.word.starts_with(prefix) {
            continue;
        }
        let mut cand = Candidate::with_annotation(&entry.word, &entry.annotation, entry.freq as f32);
        cand.is_emoji = entry.is_emoji;
        out.push(cand);
    }
    sort_candidates(&mut out);
    out.truncate(limit);
    out
}

/// Boundary contract to the dictionary engine.
///
/// Errors mean "engine unavailable" and are recovered by the selector's
/// local fallback; they are never surfaced to the user.
pub trait LookupSource {
    /// Scored completions of `prefix`, best first.
    fn unigram(&self, prefix: &str, limit: usize) -> Result<Vec<Candidate>>;

    /// Scored completions of `prefix` following `previous`.
    fn bigram(&self, previous: &str, prefix: &str, limit: usize) -> Result<Vec<Candidate>>;

    /// Scored completions of `prefix` following `earlier previous`.
    fn trigram(&self, earlier: &str, previous: &str, prefix: &str, limit: usize)
        -> Result<Vec<Candidate>>;
}

/// In-memory dictionary store with dynamic insertion.
///
/// Unigrams live in an ordered map so prefix queries are range scans;
/// n-gram entries are keyed by their joined context words.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    unigrams: BTreeMap<String, DictEntry>,
    ngrams: ahash::AHashMap<String, Vec<DictEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word with a plain frequency.
    pub fn insert_word<T: Into<String>>(&mut self, word: T, freq: u32) {
        let entry = DictEntry::new(word, freq);
        self.unigrams.insert(entry.word.clone(), entry);
    }

    /// Insert a full entry (annotation, emoji flag).
    pub fn insert_entry(&mut self, entry: DictEntry) {
        self.unigrams.insert(entry.word.clone(), entry);
    }

    /// Insert an n-gram continuation: `context` is one word (bigram) or two
    /// words earlier-first (trigram).
    pub fn insert_ngram(&mut self, context: &[&str], word: &str, freq: u32) {
        self.ngrams
            .entry(ngram_key(context))
            .or_default()
            .push(DictEntry::new(word, freq));
    }

    fn ngram_lookup(&self, key: &str, prefix: &str, limit: usize) -> Vec<Candidate> {
        match self.ngrams.get(key) {
            Some(entries) => candidates_from_entries(entries, prefix, limit),
            None => Vec::new(),
        }
    }
}

impl LookupSource for MemoryStore {
    fn unigram(&self, prefix: &str, limit: usize) -> Result<Vec<Candidate>> {
        let entries = self
            .unigrams
            .range(prefix.to_string()..)
            .take_while(|(word, _)| word.starts_with(prefix))
            .map(|(_, entry)| entry);
        Ok(candidates_from_entries(entries, prefix, limit))
    }

    fn bigram(&self, previous: &str, prefix: &str, limit: usize) -> Result<Vec<Candidate>> {
        Ok(self.ngram_lookup(&ngram_key(&[previous]), prefix, limit))
    }

    fn trigram(
        &self,
        earlier: &str,
        previous: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        Ok(self.ngram_lookup(&ngram_key(&[earlier, previous]), prefix, limit))
    }
}

/// Dictionary store backed by FST key maps and bincode payload vectors.
///
/// - `unigram.fst` maps each word to an index into the `unigram.bin`
///   `Vec<DictEntry>`; prefix queries are FST range scans.
/// - `ngram.fst` maps a joined context key to an index into the `ngram.bin`
///   `Vec<Vec<DictEntry>>` of continuations.
#[derive(Debug)]
pub struct NgramStore {
    unigram_map: Map<Vec<u8>>,
    unigram_payload: Vec<DictEntry>,
    ngram_map: Map<Vec<u8>>,
    ngram_payload: Vec<Vec<DictEntry>>,
}

impl NgramStore {
    /// Load artifacts from a data directory.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let unigram_map = load_fst(&dir.join(UNIGRAM_FST))?;
        let unigram_payload: Vec<DictEntry> = load_bincode(&dir.join(UNIGRAM_BIN))?;
        let ngram_map = load_fst(&dir.join(NGRAM_FST))?;
        let ngram_payload: Vec<Vec<DictEntry>> = load_bincode(&dir.join(NGRAM_BIN))?;

        Ok(Self {
            unigram_map,
            unigram_payload,
            ngram_map,
            ngram_payload,
        })
    }

    fn ngram_lookup(&self, key: &str, prefix: &str, limit: usize) -> Vec<Candidate> {
        match self.ngram_map.get(key) {
            Some(idx) => match self.ngram_payload.get(idx as usize) {
                Some(entries) => candidates_from_entries(entries, prefix, limit),
                None => Vec::new(),
            },
            None => Vec::new(),
        }
    }
}

fn load_fst(path: &Path) -> Result<Map<Vec<u8>>> {
    let bytes = fs::read(path).with_context(|| format!("open fst {}", path.display()))?;
    Map::new(bytes).with_context(|| format!("parse fst {}", path.display()))
}

fn load_bincode<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("open payload {}", path.display()))?;
    bincode::deserialize(&bytes).with_context(|| format!("deserialize payload {}", path.display()))
}

impl LookupSource for NgramStore {
    fn unigram(&self, prefix: &str, limit: usize) -> Result<Vec<Candidate>> {
        // Range scan over the sorted key space, stopping past the prefix.
        let mut matched: Vec<&DictEntry> = Vec::new();
        let mut stream = self.unigram_map.range().ge(prefix).into_stream();
        while let Some((key, idx)) = stream.next() {
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            if let Some(entry) = self.unigram_payload.get(idx as usize) {
                matched.push(entry);
            }
        }
        Ok(candidates_from_entries(matched, prefix, limit))
    }

    fn bigram(&self, previous: &str, prefix: &str, limit: usize) -> Result<Vec<Candidate>> {
        Ok(self.ngram_lookup(&ngram_key(&[previous]), prefix, limit))
    }

    fn trigram(
        &self,
        earlier: &str,
        previous: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        Ok(self.ngram_lookup(&ngram_key(&[earlier, previous]), prefix, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        let mut s = MemoryStore::new();
        s.insert_word("வணக்கம்", 50);
        s.insert_word("வண்டி", 30);
        s.insert_word("வயல்", 20);
        s.insert_word("அம்மா", 80);
        s.insert_ngram(&["நான்"], "வருகிறேன்", 40);
        s.insert_ngram(&["நான்"], "வந்தேன்", 25);
        s.insert_ngram(&["வீட்டுக்கு", "நான்"], "வந்தேன்", 60);
        s
    }

    #[test]
    fn unigram_prefix_scan_sorted() {
        let s = store();
        let out = s.unigram("வ", 10).unwrap();
        let words: Vec<&str> = out.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["வணக்கம்", "வண்டி", "வயல்"]);
    }

    #[test]
    fn unigram_limit_truncates() {
        let s = store();
        let out = s.unigram("வ", 2).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].word, "வணக்கம்");
    }

    #[test]
    fn bigram_filters_by_prefix() {
        let s = store();
        let out = s.bigram("நான்", "வரு", 10).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].word, "வருகிறேன்");
    }

    #[test]
    fn trigram_context_is_earlier_then_previous() {
        let s = store();
        let out = s.trigram("வீட்டுக்கு", "நான்", "", 10).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].word, "வந்தேன்");
    }

    #[test]
    fn malformed_entry_dropped_not_whole_set() {
        let mut s = MemoryStore::new();
        s.insert_ngram(&["ஒரு"], "", 99);
        s.insert_ngram(&["ஒரு"], "நாள்", 10);
        let out = s.bigram("ஒரு", "", 10).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].word, "நாள்");
    }

    #[test]
    fn missing_context_yields_empty() {
        let s = store();
        assert!(s.bigram("இல்லாத", "", 10).unwrap().is_empty());
    }
}
