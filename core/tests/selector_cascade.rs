// Cascade contract of the prediction selector.
//
// These tests drive the selector against a recording mock source so the
// exact query order is observable:
// - first_available returns the first non-empty tier and stops
// - forced policies touch exactly one tier and never fall through
// - engine failure activates the local fallback, never an error
// - returned lists are sorted by score descending, stable on ties

use anyhow::anyhow;
use libindic_core::{Candidate, LookupSource, NgramPolicy, Selector, UserDict, WordContext};
use std::cell::RefCell;

/// One tier's scripted behavior: candidates, or simulated engine failure.
#[derive(Clone)]
enum Scripted {
    Returns(Vec<Candidate>),
    Fails,
}

struct MockSource {
    trigram: Scripted,
    bigram: Scripted,
    unigram: Scripted,
    calls: RefCell<Vec<&'static str>>,
}

impl MockSource {
    fn new(trigram: Scripted, bigram: Scripted, unigram: Scripted) -> Self {
        Self {
            trigram,
            bigram,
            unigram,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn run(&self, tier: &Scripted, name: &'static str) -> anyhow::Result<Vec<Candidate>> {
        self.calls.borrow_mut().push(name);
        match tier {
            Scripted::Returns(v) => Ok(v.clone()),
            Scripted::Fails => Err(anyhow!("engine unreachable")),
        }
    }
}

impl LookupSource for MockSource {
    fn unigram(&self, _prefix: &str, _limit: usize) -> anyhow::Result<Vec<Candidate>> {
        self.run(&self.unigram, "unigram")
    }

    fn bigram(&self, _previous: &str, _prefix: &str, _limit: usize) -> anyhow::Result<Vec<Candidate>> {
        self.run(&self.bigram, "bigram")
    }

    fn trigram(
        &self,
        _earlier: &str,
        _previous: &str,
        _prefix: &str,
        _limit: usize,
    ) -> anyhow::Result<Vec<Candidate>> {
        self.run(&self.trigram, "trigram")
    }
}

fn full_context() -> WordContext {
    WordContext::new(
        "வ",
        Some("X".to_string()),
        Some("Y".to_string()),
    )
}

fn selector(source: MockSource) -> Selector<MockSource> {
    Selector::new(Some(source), UserDict::new_in_memory())
}

#[test]
fn empty_trigram_falls_to_bigram_and_stops() {
    let source = MockSource::new(
        Scripted::Returns(vec![]),
        Scripted::Returns(vec![Candidate::new("A", 2.0), Candidate::new("B", 1.0)]),
        Scripted::Returns(vec![Candidate::new("never", 9.0)]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::FirstAvailable, 8);
    let words: Vec<&str> = out.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["A", "B"]);

    // Bigram satisfied the query; the unigram source was never invoked.
    assert_eq!(selector_calls(&selector), vec!["trigram", "bigram"]);
}

#[test]
fn non_empty_trigram_short_circuits() {
    let source = MockSource::new(
        Scripted::Returns(vec![Candidate::new("T", 1.0)]),
        Scripted::Returns(vec![Candidate::new("B", 1.0)]),
        Scripted::Returns(vec![Candidate::new("U", 1.0)]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::FirstAvailable, 8);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].word, "T");
    assert_eq!(selector_calls(&selector), vec!["trigram"]);
}

#[test]
fn without_earlier_word_cascade_starts_at_bigram() {
    let source = MockSource::new(
        Scripted::Returns(vec![Candidate::new("T", 1.0)]),
        Scripted::Returns(vec![]),
        Scripted::Returns(vec![Candidate::new("U", 1.0)]),
    );
    let selector = selector(source);

    let ctx = WordContext::new("வ", Some("X".to_string()), None);
    let out = selector.predict(&ctx, NgramPolicy::FirstAvailable, 8);
    assert_eq!(out[0].word, "U");
    assert_eq!(selector_calls(&selector), vec!["bigram", "unigram"]);
}

#[test]
fn unigram_only_never_touches_ngram_sources() {
    let source = MockSource::new(
        Scripted::Returns(vec![Candidate::new("T", 1.0)]),
        Scripted::Returns(vec![Candidate::new("B", 1.0)]),
        Scripted::Returns(vec![Candidate::new("U", 1.0)]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::UnigramOnly, 8);
    assert_eq!(out[0].word, "U");
    assert_eq!(selector_calls(&selector), vec!["unigram"]);
}

#[test]
fn forced_bigram_returns_empty_without_fallthrough() {
    let source = MockSource::new(
        Scripted::Returns(vec![Candidate::new("T", 1.0)]),
        Scripted::Returns(vec![]),
        Scripted::Returns(vec![Candidate::new("U", 1.0)]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::ForceBigram, 8);
    assert!(out.is_empty());
    assert_eq!(selector_calls(&selector), vec!["bigram"]);
}

#[test]
fn engine_failure_recovers_via_fallback() {
    let source = MockSource::new(Scripted::Fails, Scripted::Fails, Scripted::Fails);
    let selector = selector(source);

    let ctx = WordContext::new("அ", Some("X".to_string()), Some("Y".to_string()));
    let out = selector.predict(&ctx, NgramPolicy::FirstAvailable, 8);
    assert!(!out.is_empty(), "fallback must serve when the engine fails");
    assert!(out.iter().all(|c| c.word.starts_with("அ")));
    assert_eq!(selector_calls(&selector), vec!["trigram", "bigram", "unigram"]);
}

#[test]
fn failed_tier_is_skipped_mid_cascade() {
    let source = MockSource::new(
        Scripted::Fails,
        Scripted::Returns(vec![Candidate::new("B", 1.0)]),
        Scripted::Returns(vec![Candidate::new("U", 1.0)]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::FirstAvailable, 8);
    assert_eq!(out[0].word, "B");
    assert_eq!(selector_calls(&selector), vec!["trigram", "bigram"]);
}

#[test]
fn results_sorted_descending_stable() {
    let source = MockSource::new(
        Scripted::Returns(vec![]),
        Scripted::Returns(vec![
            Candidate::new("low", 0.5),
            Candidate::new("tie1", 2.0),
            Candidate::new("tie2", 2.0),
            Candidate::new("high", 3.0),
        ]),
        Scripted::Returns(vec![]),
    );
    let selector = selector(source);

    let out = selector.predict(&full_context(), NgramPolicy::FirstAvailable, 8);
    let words: Vec<&str> = out.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["high", "tie1", "tie2", "low"]);
}

#[test]
fn limit_truncates_results() {
    let cands: Vec<Candidate> = (0..10)
        .map(|i| Candidate::new(format!("w{}", i), (10 - i) as f32))
        .collect();
    let source = MockSource::new(
        Scripted::Returns(vec![]),
        Scripted::Returns(vec![]),
        Scripted::Returns(cands),
    );
    let selector = selector(source);

    let ctx = WordContext::new("w", None, None);
    let out = selector.predict(&ctx, NgramPolicy::FirstAvailable, 3);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].word, "w0");
}

// The mock lives inside the selector; recover its call log through the
// source reference the selector holds.
fn selector_calls(selector: &Selector<MockSource>) -> Vec<&'static str> {
    selector
        .source_ref()
        .map(|s| s.calls())
        .unwrap_or_default()
}
