//! Closed dispatch over the available script translators.
//!
//! The variant set is fixed and known at compile time, so translators are a
//! tagged enum dispatched by match rather than an open trait-object
//! hierarchy. All translator state lives in the caller's `Composition`
//! session; the translator values themselves are plain table carriers.

use crate::anjal::Anjal;
use crate::tamil99::Tamil99;
use crate::typewriter::Typewriter;
use libindic_core::{Composition, ScriptTranslator, TranslationResult};
use serde::{Deserialize, Serialize};

/// Input scheme identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Direct one-key-per-glyph layout with auto-virama rules
    Tamil99,
    /// Multi-keystroke QWERTY-mnemonic phonetic scheme
    Anjal,
    /// Visual-order layout with left-sign reordering
    Typewriter,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Tamil99
    }
}

/// One of the three scheme translators.
#[derive(Debug, Clone, Copy)]
pub enum Translator {
    Tamil99(Tamil99),
    Anjal(Anjal),
    Typewriter(Typewriter),
}

impl Translator {
    pub fn new(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Tamil99 => Translator::Tamil99(Tamil99::new()),
            Scheme::Anjal => Translator::Anjal(Anjal::new()),
            Scheme::Typewriter => Translator::Typewriter(Typewriter::new()),
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Translator::Tamil99(_) => Scheme::Tamil99,
            Translator::Anjal(_) => Scheme::Anjal,
            Translator::Typewriter(_) => Scheme::Typewriter,
        }
    }

    pub fn translate_key(&self, key: char, shifted: bool, session: &mut Composition) -> TranslationResult {
        match self {
            Translator::Tamil99(t) => t.translate_key(key, shifted, session),
            Translator::Anjal(t) => t.translate_key(key, shifted, session),
            Translator::Typewriter(t) => t.translate_key(key, shifted, session),
        }
    }

    pub fn process_delete(&self, session: &mut Composition) -> TranslationResult {
        match self {
            Translator::Tamil99(t) => t.process_delete(session),
            Translator::Anjal(t) => t.process_delete(session),
            Translator::Typewriter(t) => t.process_delete(session),
        }
    }
}

/// Remove a dangling zero width joiner left at the buffer tail after a
/// deletion (conjunct-suppression artifact), folding the extra scalars into
/// the returned delete count.
pub(crate) fn sweep_trailing_zwj(
    session: &mut Composition,
    mut res: TranslationResult,
) -> TranslationResult {
    while res.insert_text.is_empty() && session.last_scalar() == Some(crate::chars::ZWJ) {
        let swept = session.apply_deletion(TranslationResult::replace(1, String::new()));
        res.delete_count += swept.delete_count;
    }
    res
}
