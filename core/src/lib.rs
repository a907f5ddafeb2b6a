//! libindic-core
//!
//! Script-agnostic machinery shared by Indic input schemes: composition
//! state, the script-translator boundary, word-context extraction, the
//! n-gram prediction selector, dictionary stores and the persistent user
//! dictionary.
//!
//! Public API:
//! - `Composition` / `UnitKind` - in-progress composition state
//! - `TranslationResult` / `ScriptTranslator` - translator boundary
//! - `WordContext` / `extract_context` - committed-word context
//! - `Selector` / `NgramPolicy` - prediction cascade with fallback
//! - `LookupSource` / `NgramStore` / `MemoryStore` - dictionary boundary
//! - `UserDict` - custom-word learning and persistence
//! - `Config` - configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod candidate;
pub use candidate::{sort_candidates, Candidate, CandidateList};

pub mod composition;
pub use composition::{Composition, LastOp, UnitKind};

pub mod translate;
pub use translate::{ScriptTranslator, TranslationResult, SENTINEL, ZWJ};

pub mod context;
pub use context::{extract_context, ImeContext, InputPurpose, WordContext};

pub mod dict;
pub use dict::{DictEntry, LookupSource, MemoryStore, NgramStore};

pub mod selector;
pub use selector::{NgramPolicy, Selector};

pub mod fallback;
pub use fallback::FallbackLexicon;

pub mod userdict;
pub use userdict::UserDict;

pub mod debounce;
pub use debounce::RefreshTimer;

pub mod session;
pub use session::{InputMode, Session};

/// Generic configuration for the composition and prediction core.
///
/// Contains only script-agnostic fields. Scheme-specific options (layout
/// selection, scheme toggles) belong in the language crates, which flatten
/// this struct into their own config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Maximum number of prediction candidates returned per query.
    pub max_candidates: usize,

    /// Default n-gram selection policy. The forced variants exist for
    /// diagnostics and testing; normal sessions run `first_available`.
    pub policy: NgramPolicy,

    /// Re-predict the next word after a suggestion is accepted (debounced).
    pub predict_after_accept: bool,

    /// Delay before the post-accept prediction refresh fires, in ms.
    pub predict_refresh_delay_ms: u64,

    /// Serve candidates from the built-in word list plus learned custom
    /// words when the dictionary engine is unavailable.
    pub fallback_enabled: bool,

    /// Candidates per page in the candidate list.
    pub page_size: usize,

    /// Maximum number of entries in the prediction result cache.
    pub max_cache_size: usize,

    /// Learn committed words into the user dictionary.
    pub learn_committed_words: bool,

    /// Minimum length (in scalars) for a committed word to be learned.
    pub min_learn_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_candidates: 8,
            policy: NgramPolicy::FirstAvailable,
            predict_after_accept: true,
            predict_refresh_delay_ms: 300,
            fallback_enabled: true,
            page_size: 5,
            max_cache_size: 256,
            learn_committed_words: true,
            min_learn_length: 2,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize externally supplied strings (NFC) and trim whitespace.
    ///
    /// Context words come from the host text buffer and may arrive in any
    /// normalization form; dictionary keys are stored NFC.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_round_trip() {
        let mut config = Config::default();
        config.max_candidates = 12;
        config.policy = NgramPolicy::UnigramOnly;

        let text = config.to_toml_string().expect("serialize");
        let back = Config::from_toml_str(&text).expect("parse");
        assert_eq!(back.max_candidates, 12);
        assert_eq!(back.policy, NgramPolicy::UnigramOnly);
        assert!(back.fallback_enabled);
    }

    #[test]
    fn normalize_applies_nfc() {
        // KA + combining vowel sign II, decomposed vs precomposed forms.
        assert_eq!(utils::normalize("  கீ  "), "கீ");
    }
}
