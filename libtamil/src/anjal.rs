//! Anjal phonetic translator.
//!
//! A QWERTY-mnemonic scheme where vowels and consonant variants are built
//! across two keystrokes. The transition state lives in the composition's
//! `UnitKind`; digraphs are recognized against the previous *raw key*, not
//! the previous output:
//!
//! - a consonant key emits {consonant, virama} and defers virama removal
//! - a vowel key after a consonant removes the virama and attaches the
//!   dependent sign (the inherent vowel attaches nothing)
//! - two-key vowel digraphs (aa, ii, ee, uu, oo, ai, au) replace the first
//!   vowel's form with the combined one
//! - two-key consonant digraphs (th, dh, ch, sh, zh, ng, nj, ny) replace
//!   the first consonant with the combined letter
//! - "n" is dental at a word start (or after backspace-to-empty) and
//!   alveolar mid-word, decided by the transition state
//! - the virama key pressed twice in immediate succession emits a bare,
//!   visible virama
//!
//! Deletion pops the most recent unit; when the composition empties the
//! state machine resets to `None`, not `WordBoundary`.

use crate::chars;
use libindic_core::{Composition, ScriptTranslator, TranslationResult, UnitKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Explicit virama key.
const VIRAMA_KEY: char = 'f';

/// Two-key vowel digraphs: (previous raw key, key) -> combined vowel
/// (scheme data).
static VOWEL_DIGRAPHS: Lazy<HashMap<(char, char), char>> = Lazy::new(|| {
    [
        (('a', 'a'), 'ஆ'),
        (('i', 'i'), 'ஈ'),
        (('e', 'e'), 'ஏ'),
        (('u', 'u'), 'ஊ'),
        (('o', 'o'), 'ஓ'),
        (('a', 'i'), 'ஐ'),
        (('a', 'u'), 'ஔ'),
    ]
    .into_iter()
    .collect()
});

/// Two-key consonant digraphs: (previous raw key, key) -> combined
/// consonant (scheme data).
static CONSONANT_DIGRAPHS: Lazy<HashMap<(char, char), char>> = Lazy::new(|| {
    [
        (('t', 'h'), 'த'),
        (('d', 'h'), 'த'),
        (('c', 'h'), 'ச'),
        (('s', 'h'), 'ஷ'),
        (('z', 'h'), 'ழ'),
        (('n', 'g'), 'ங'),
        (('n', 'j'), 'ஞ'),
        (('n', 'y'), 'ஞ'),
    ]
    .into_iter()
    .collect()
});

/// Single-key vowels (scheme data). Uppercase keys are the long forms.
fn vowel(key: char) -> Option<char> {
    match key {
        'a' => Some('அ'),
        'A' => Some('ஆ'),
        'i' => Some('இ'),
        'I' => Some('ஈ'),
        'u' => Some('உ'),
        'U' => Some('ஊ'),
        'e' => Some('எ'),
        'E' => Some('ஏ'),
        'o' => Some('ஒ'),
        'O' => Some('ஓ'),
        _ => None,
    }
}

/// Single-key consonants (scheme data). The dental/alveolar split for "n"
/// is decided by the caller from the transition state.
fn consonant(key: char, word_start: bool) -> Option<char> {
    match key {
        'k' | 'g' => Some('க'),
        'c' | 's' => Some('ச'),
        'j' => Some('ஜ'),
        't' | 'd' => Some('ட'),
        'T' | 'D' => Some('ட'),
        'N' => Some('ண'),
        'n' => Some(if word_start { 'ந' } else { 'ன' }),
        'p' | 'b' => Some('ப'),
        'm' => Some('ம'),
        'y' => Some('ய'),
        'r' => Some('ர'),
        'R' => Some('ற'),
        'l' => Some('ல'),
        'L' => Some('ள'),
        'z' => Some('ழ'),
        'v' | 'w' => Some('வ'),
        'S' => Some('ஸ'),
        'h' => Some('ஹ'),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Anjal;

impl Anjal {
    pub fn new() -> Self {
        Self
    }

    fn word_start(state: UnitKind) -> bool {
        matches!(state, UnitKind::None | UnitKind::WordBoundary)
    }

    fn in_cluster(state: UnitKind) -> bool {
        matches!(state, UnitKind::FirstConsonant | UnitKind::SecondConsonant)
    }

    fn emit_vowel(&self, key: char, glyph: char, session: &mut Composition) -> TranslationResult {
        let state = session.last_unit();
        let prev_key = session.prev_key();

        if Self::in_cluster(state) {
            // The deferred virama comes off; the dependent sign goes on.
            let result = match chars::dependent_sign(glyph) {
                Some(sign) => TranslationResult::replace(1, sign),
                None => TranslationResult::replace(1, String::new()),
            };
            return session.apply_keystroke(Some(key), UnitKind::FirstVowelSign, result);
        }

        if state == UnitKind::FirstVowel {
            if let Some(&combined) = prev_key.and_then(|p| VOWEL_DIGRAPHS.get(&(p, key))) {
                return session.apply_keystroke(
                    Some(key),
                    UnitKind::SecondVowel,
                    TranslationResult::replace(1, combined),
                );
            }
        }

        if state == UnitKind::FirstVowelSign {
            if let Some(&combined) = prev_key.and_then(|p| VOWEL_DIGRAPHS.get(&(p, key))) {
                if let Some(sign) = chars::dependent_sign(combined) {
                    // The inherent vowel left no sign behind; anything else
                    // left exactly one scalar to replace.
                    let had_sign = session.last_scalar().map(chars::is_vowel_sign).unwrap_or(false);
                    let delete = usize::from(had_sign);
                    return session.apply_keystroke(
                        Some(key),
                        UnitKind::SecondVowelSign,
                        TranslationResult::replace(delete, sign),
                    );
                }
            }
        }

        // Fresh independent vowel.
        session.apply_keystroke(Some(key), UnitKind::FirstVowel, TranslationResult::insert(glyph))
    }

    fn emit_consonant(&self, key: char, session: &mut Composition) -> TranslationResult {
        let state = session.last_unit();
        let prev_key = session.prev_key();

        if state == UnitKind::FirstConsonant {
            if let Some(&combined) = prev_key.and_then(|p| CONSONANT_DIGRAPHS.get(&(p, key))) {
                let mut text = String::new();
                text.push(combined);
                text.push(chars::VIRAMA);
                return session.apply_keystroke(
                    Some(key),
                    UnitKind::SecondConsonant,
                    TranslationResult::replace(2, text),
                );
            }
        }

        let glyph = match consonant(key, Self::word_start(state)) {
            Some(c) => c,
            // Caller guarantees this is a consonant key.
            None => return TranslationResult::none(),
        };
        let mut text = String::new();
        text.push(glyph);
        text.push(chars::VIRAMA);
        session.apply_keystroke(Some(key), UnitKind::FirstConsonant, TranslationResult::insert(text))
    }
}

impl ScriptTranslator for Anjal {
    fn translate_key(&self, key: char, shifted: bool, session: &mut Composition) -> TranslationResult {
        let key = if shifted && key.is_ascii_alphabetic() {
            key.to_ascii_uppercase()
        } else {
            key
        };

        if key.is_whitespace() {
            return session.apply_keystroke(
                Some(key),
                UnitKind::WordBoundary,
                TranslationResult::insert(key),
            );
        }

        if key == VIRAMA_KEY {
            // Twice in immediate succession: force a visible bare virama.
            // The first press just closes the current unit, so a following
            // vowel keeps its independent form.
            let result = if session.prev_key() == Some(VIRAMA_KEY) {
                TranslationResult::insert(chars::VIRAMA)
            } else {
                TranslationResult::none()
            };
            return session.apply_keystroke(Some(key), UnitKind::UnitComplete, result);
        }

        if key == 'q' {
            return session.apply_keystroke(
                Some(key),
                UnitKind::UnitComplete,
                TranslationResult::insert(chars::AYTHAM),
            );
        }

        if let Some(glyph) = vowel(key) {
            return self.emit_vowel(key, glyph, session);
        }

        if consonant(key, true).is_some() {
            return self.emit_consonant(key, session);
        }

        // Key with no phonetic meaning: pass it through unmodified.
        session.apply_keystroke(Some(key), UnitKind::UnitComplete, TranslationResult::insert(key))
    }

    fn process_delete(&self, session: &mut Composition) -> TranslationResult {
        if let Some(res) = session.undo_last() {
            return res;
        }
        if session.is_empty() {
            return TranslationResult::none();
        }

        // Pop the most recent unit: a consonant carries its deferred
        // virama; everything else is one scalar.
        let delete = if session.last_scalar() == Some(chars::VIRAMA)
            && session
                .scalar_from_end(1)
                .map(chars::is_consonant)
                .unwrap_or(false)
        {
            2
        } else {
            1
        };
        let res = session.apply_deletion(TranslationResult::replace(delete, String::new()));
        if !session.is_empty() {
            session.set_last_unit(UnitKind::UnitComplete);
        }
        res
    }
}
