//! Context-aware prediction selector.
//!
//! Given the in-progress word and up to two previously committed words, the
//! selector decides which n-gram queries to issue and in what order:
//!
//! - `FirstAvailable` (default): trigram if both context words are present
//!   and the result is non-empty, else bigram, else unigram.
//! - `ForceTrigram` / `ForceBigram` / `UnigramOnly`: query only the named
//!   source and return its result, possibly empty, without falling back.
//!
//! Engine failures (not empty results) are recovered by the local fallback
//! lexicon and never surfaced. Results are memoized in an LRU cache keyed
//! by policy, context and limit; learning a custom word invalidates it.

use crate::candidate::{sort_candidates, Candidate};
use crate::context::WordContext;
use crate::dict::LookupSource;
use crate::fallback::FallbackLexicon;
use crate::userdict::UserDict;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::num::NonZeroUsize;

/// N-gram selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NgramPolicy {
    FirstAvailable,
    ForceTrigram,
    ForceBigram,
    UnigramOnly,
}

impl NgramPolicy {
    /// Successor in the diagnostic cycle. Not used by the normal runtime
    /// path; diagnostics and tests step through policies with it.
    pub fn next(self) -> Self {
        match self {
            NgramPolicy::FirstAvailable => NgramPolicy::ForceTrigram,
            NgramPolicy::ForceTrigram => NgramPolicy::ForceBigram,
            NgramPolicy::ForceBigram => NgramPolicy::UnigramOnly,
            NgramPolicy::UnigramOnly => NgramPolicy::FirstAvailable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NgramPolicy::FirstAvailable => "first_available",
            NgramPolicy::ForceTrigram => "force_trigram",
            NgramPolicy::ForceBigram => "force_bigram",
            NgramPolicy::UnigramOnly => "unigram_only",
        }
    }
}

/// Outcome of one source query: candidates, or engine failure.
enum Tier {
    Hit(Vec<Candidate>),
    Unavailable,
}

/// Prediction selector over a dictionary source.
///
/// `D` is the dictionary boundary implementation; `None` models an engine
/// that never initialized (every query served by the fallback).
pub struct Selector<D> {
    source: Option<D>,
    fallback: FallbackLexicon,
    use_fallback: bool,
    cache: RefCell<lru::LruCache<String, Vec<Candidate>>>,
}

impl<D: LookupSource> Selector<D> {
    pub fn new(source: Option<D>, custom_words: UserDict) -> Self {
        Self::with_cache_size(source, custom_words, 256)
    }

    pub fn with_cache_size(source: Option<D>, custom_words: UserDict, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            fallback: FallbackLexicon::new(custom_words),
            use_fallback: true,
            cache: RefCell::new(lru::LruCache::new(capacity)),
        }
    }

    /// Disable the built-in fallback (diagnostics only).
    pub fn set_fallback_enabled(&mut self, enabled: bool) {
        self.use_fallback = enabled;
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Borrow the underlying source, if any (diagnostics and tests).
    pub fn source_ref(&self) -> Option<&D> {
        self.source.as_ref()
    }

    /// Learn a custom word for the fallback path and invalidate memoized
    /// results that could now rank differently.
    pub fn learn_custom_word(&self, word: &str) {
        self.fallback.learn(word);
        self.cache.borrow_mut().clear();
    }

    /// Produce ranked candidates for the given context under `policy`.
    pub fn predict(&self, ctx: &WordContext, policy: NgramPolicy, limit: usize) -> Vec<Candidate> {
        if limit == 0 {
            return Vec::new();
        }

        let key = cache_key(ctx, policy, limit);
        if let Some(cached) = self.cache.borrow_mut().get(&key) {
            return cached.clone();
        }

        let mut result = self.select(ctx, policy, limit);
        sort_candidates(&mut result);
        result.truncate(limit);

        self.cache.borrow_mut().put(key, result.clone());
        result
    }

    fn select(&self, ctx: &WordContext, policy: NgramPolicy, limit: usize) -> Vec<Candidate> {
        let prefix = ctx.current_word.as_str();
        let previous = ctx.previous_word.as_deref();
        let earlier = ctx.earlier_word.as_deref();

        match policy {
            NgramPolicy::ForceTrigram => match (earlier, previous) {
                (Some(e), Some(p)) => match self.query_trigram(e, p, prefix, limit) {
                    Tier::Hit(v) => v,
                    Tier::Unavailable => self.local_fallback(prefix, limit),
                },
                // Forced tier without enough context: nothing to query.
                _ => Vec::new(),
            },
            NgramPolicy::ForceBigram => match previous {
                Some(p) => match self.query_bigram(p, prefix, limit) {
                    Tier::Hit(v) => v,
                    Tier::Unavailable => self.local_fallback(prefix, limit),
                },
                _ => Vec::new(),
            },
            NgramPolicy::UnigramOnly => match self.query_unigram(prefix, limit) {
                Tier::Hit(v) => v,
                Tier::Unavailable => self.local_fallback(prefix, limit),
            },
            NgramPolicy::FirstAvailable => {
                if let (Some(e), Some(p)) = (earlier, previous) {
                    if let Tier::Hit(v) = self.query_trigram(e, p, prefix, limit) {
                        if !v.is_empty() {
                            return v;
                        }
                    }
                }
                if let Some(p) = previous {
                    if let Tier::Hit(v) = self.query_bigram(p, prefix, limit) {
                        if !v.is_empty() {
                            return v;
                        }
                    }
                }
                match self.query_unigram(prefix, limit) {
                    Tier::Hit(v) => v,
                    Tier::Unavailable => self.local_fallback(prefix, limit),
                }
            }
        }
    }

    fn query_trigram(&self, earlier: &str, previous: &str, prefix: &str, limit: usize) -> Tier {
        match &self.source {
            Some(src) => match src.trigram(earlier, previous, prefix, limit) {
                Ok(v) => Tier::Hit(v),
                Err(err) => {
                    tracing::debug!(%err, "trigram source unavailable");
                    Tier::Unavailable
                }
            },
            None => Tier::Unavailable,
        }
    }

    fn query_bigram(&self, previous: &str, prefix: &str, limit: usize) -> Tier {
        match &self.source {
            Some(src) => match src.bigram(previous, prefix, limit) {
                Ok(v) => Tier::Hit(v),
                Err(err) => {
                    tracing::debug!(%err, "bigram source unavailable");
                    Tier::Unavailable
                }
            },
            None => Tier::Unavailable,
        }
    }

    fn query_unigram(&self, prefix: &str, limit: usize) -> Tier {
        match &self.source {
            Some(src) => match src.unigram(prefix, limit) {
                Ok(v) => Tier::Hit(v),
                Err(err) => {
                    tracing::debug!(%err, "unigram source unavailable");
                    Tier::Unavailable
                }
            },
            None => Tier::Unavailable,
        }
    }

    fn local_fallback(&self, prefix: &str, limit: usize) -> Vec<Candidate> {
        if !self.use_fallback {
            return Vec::new();
        }
        tracing::debug!(prefix, "serving candidates from local fallback");
        self.fallback.suggest(prefix, limit)
    }
}

fn cache_key(ctx: &WordContext, policy: NgramPolicy, limit: usize) -> String {
    format!(
        "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}",
        policy.label(),
        ctx.earlier_word.as_deref().unwrap_or(""),
        ctx.previous_word.as_deref().unwrap_or(""),
        ctx.current_word,
        limit
    )
}
