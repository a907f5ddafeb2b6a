//! Local fallback lexicon.
//!
//! When the dictionary engine is unavailable, candidates are drawn from a
//! small built-in word list plus any session-added custom words, filtered
//! by prefix match, with synthetic descending scores. This path never
//! surfaces an engine failure to the user.

use crate::candidate::{sort_candidates, Candidate};
use crate::userdict::UserDict;

/// Common Tamil words served when no dictionary engine is reachable.
const BUILTIN_WORDS: &[&str] = &[
    "அம்மா",
    "அப்பா",
    "வணக்கம்",
    "நன்றி",
    "தமிழ்",
    "நான்",
    "நீ",
    "நாம்",
    "அவன்",
    "அவள்",
    "அவர்",
    "அது",
    "இது",
    "என்ன",
    "எப்படி",
    "எங்கே",
    "ஆம்",
    "இல்லை",
    "வீடு",
    "பள்ளி",
    "புத்தகம்",
    "தண்ணீர்",
    "சாப்பாடு",
    "காலை",
    "மாலை",
    "இரவு",
    "நல்ல",
    "பெரிய",
    "சிறிய",
    "வந்து",
    "போக",
    "செய்ய",
    "பார்க்க",
    "சொல்ல",
    "கொடு",
    "எடு",
    "அன்பு",
    "நண்பன்",
    "குடும்பம்",
    "ஊர்",
    "நாடு",
    "மொழி",
    "பாடம்",
    "வேலை",
    "நேரம்",
    "இன்று",
    "நாளை",
    "நேற்று",
];

/// Built-in words plus learned custom words, prefix-filtered.
#[derive(Debug, Clone)]
pub struct FallbackLexicon {
    custom: UserDict,
}

impl FallbackLexicon {
    pub fn new(custom: UserDict) -> Self {
        Self { custom }
    }

    /// Learn a custom word into the session dictionary.
    pub fn learn(&self, word: &str) {
        self.custom.learn(word);
    }

    /// Suggest up to `limit` words starting with `prefix`.
    ///
    /// Custom words rank above the built-in list; within each group scores
    /// descend in list order so the output ordering is deterministic.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Candidate> {
        let base = BUILTIN_WORDS.len() as f32;
        let mut out: Vec<Candidate> = Vec::new();

        for (word, freq) in self.custom.words_with_prefix(prefix) {
            out.push(Candidate::user_word(word, base + freq as f32));
        }

        for (i, word) in BUILTIN_WORDS.iter().enumerate() {
            if word.starts_with(prefix) {
                out.push(Candidate::new(*word, base - i as f32));
            }
        }

        sort_candidates(&mut out);
        out.truncate(limit);
        out
    }
}
