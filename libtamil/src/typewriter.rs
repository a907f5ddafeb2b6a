//! Visual-order (typewriter) translator.
//!
//! In this scheme the left-rendering vowel signs (E, EE, AI) are typed
//! before their consonant, exactly as they appear on paper. The translator
//! reorders them into logical storage:
//!
//! - a left sign typed alone rides on a zero-width placeholder; at most one
//!   placeholder is ever outstanding
//! - the next consonant replaces {placeholder, sign} with {consonant, sign}
//! - a length mark after an attached left sign composes the two-part signs
//!   (O, OO, AU)
//!
//! Deletion is what-you-see: the visually newest element goes first, driven
//! by the four-case priority of `process_delete`. Keys with no mapping pass
//! through unmodified.

use crate::chars;
use crate::translator::sweep_trailing_zwj;
use libindic_core::{Composition, ScriptTranslator, TranslationResult, UnitKind};
use phf::phf_map;

/// Unshifted layer: left signs, right matras, pulli and the base
/// consonants (representative visual-order layout data).
static BASE: phf::Map<char, char> = phf_map! {
    // Left-half vowel signs
    'q' => 'ெ', 'w' => 'ே', 'e' => 'ை',
    // Right matras and marks
    'r' => 'ா', 't' => 'ி', 'y' => 'ீ', 'u' => 'ு', 'i' => 'ூ',
    'o' => '\u{0BD7}', 'p' => '\u{0BCD}',
    // Consonants
    'a' => 'க', 's' => 'ச', 'd' => 'ட', 'f' => 'த', 'g' => 'ப',
    'h' => 'ற', 'j' => 'ந', 'k' => 'ம', 'l' => 'ய',
    'z' => 'ர', 'x' => 'ல', 'c' => 'வ', 'v' => 'ழ', 'b' => 'ள',
    'n' => 'ன', 'm' => 'ண',
};

/// Shift layer: remaining consonants, independent vowels and aytham
/// (representative visual-order layout data).
static SHIFT: phf::Map<char, char> = phf_map! {
    'a' => 'ங', 's' => 'ஞ', 'd' => 'ஸ', 'f' => 'ஷ', 'g' => 'ஜ', 'h' => 'ஹ',
    'q' => 'அ', 'w' => 'ஆ', 'e' => 'இ', 'r' => 'ஈ', 't' => 'உ', 'y' => 'ஊ',
    'u' => 'எ', 'i' => 'ஏ', 'o' => 'ஐ', 'p' => 'ஒ',
    'z' => 'ஓ', 'x' => 'ஔ', 'c' => 'ஃ',
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Typewriter;

impl Typewriter {
    pub fn new() -> Self {
        Self
    }

    fn emit_left_sign(&self, key: char, sign: char, session: &mut Composition) -> TranslationResult {
        if session.left_sign_pending() {
            // Never more than one outstanding: the new sign replaces the
            // one riding the placeholder.
            let res = session.apply_keystroke(
                Some(key),
                UnitKind::FirstVowelSign,
                TranslationResult::replace(1, sign),
            );
            session.set_left_sign_pending(true);
            return res;
        }
        let mut text = String::new();
        text.push(chars::PLACEHOLDER);
        text.push(sign);
        let res = session.apply_keystroke(
            Some(key),
            UnitKind::FirstVowelSign,
            TranslationResult::insert(text),
        );
        session.set_left_sign_pending(true);
        res
    }

    fn emit_consonant(&self, key: char, glyph: char, session: &mut Composition) -> TranslationResult {
        if session.left_sign_pending() {
            // The consonant slides in under the waiting sign:
            // {placeholder, sign} -> {consonant, sign}.
            let sign = session.last_scalar().unwrap_or('ெ');
            let mut text = String::new();
            text.push(glyph);
            text.push(sign);
            let res = session.apply_keystroke(
                Some(key),
                UnitKind::FirstConsonant,
                TranslationResult::replace(2, text),
            );
            session.set_left_sign_pending(false);
            return res;
        }
        session.apply_keystroke(Some(key), UnitKind::FirstConsonant, TranslationResult::insert(glyph))
    }

    fn emit_mark(&self, key: char, mark: char, session: &mut Composition) -> TranslationResult {
        // A length mark may complete a two-part sign already attached to a
        // consonant.
        if !session.left_sign_pending() {
            if let Some(last) = session.last_scalar() {
                if chars::is_left_sign(last)
                    && session
                        .scalar_from_end(1)
                        .map(chars::is_consonant)
                        .unwrap_or(false)
                {
                    if let Some(two_part) = chars::combine_two_part(last, mark) {
                        return session.apply_keystroke(
                            Some(key),
                            UnitKind::FirstVowelSign,
                            TranslationResult::replace(1, two_part),
                        );
                    }
                }
            }
        }
        session.apply_keystroke(Some(key), UnitKind::FirstVowelSign, TranslationResult::insert(mark))
    }

    /// Keys with no phonetic meaning pass through unmodified.
    fn pass_unmapped(&self, key: char, session: &mut Composition) -> TranslationResult {
        let unit = if key.is_whitespace() {
            UnitKind::WordBoundary
        } else {
            UnitKind::UnitComplete
        };
        session.apply_keystroke(Some(key), unit, TranslationResult::insert(key))
    }
}

impl ScriptTranslator for Typewriter {
    fn translate_key(&self, key: char, shifted: bool, session: &mut Composition) -> TranslationResult {
        let table = if shifted { &SHIFT } else { &BASE };
        let Some(&glyph) = table.get(&key) else {
            return self.pass_unmapped(key, session);
        };

        if chars::is_left_sign(glyph) {
            return self.emit_left_sign(key, glyph, session);
        }
        if chars::is_consonant(glyph) {
            return self.emit_consonant(key, glyph, session);
        }
        if chars::is_vowel_sign(glyph) {
            return self.emit_mark(key, glyph, session);
        }
        if glyph == chars::VIRAMA {
            return session.apply_keystroke(
                Some(key),
                UnitKind::UnitComplete,
                TranslationResult::insert(glyph),
            );
        }
        // Independent vowels and aytham.
        session.apply_keystroke(Some(key), UnitKind::FirstVowel, TranslationResult::insert(glyph))
    }

    fn process_delete(&self, session: &mut Composition) -> TranslationResult {
        if let Some(res) = session.undo_last() {
            return sweep_trailing_zwj(session, res);
        }
        if session.is_empty() {
            return TranslationResult::none();
        }

        let last = session.last_scalar();
        let before = session.scalar_from_end(1);

        // Case 1: left sign attached to a consonant. The consonant is the
        // visually newest element; it goes, the sign stays on a
        // placeholder. Buffer length is unchanged.
        if let (Some(sign), Some(prev)) = (last, before) {
            if chars::is_left_sign(sign) && chars::is_consonant(prev) {
                let mut text = String::new();
                text.push(chars::PLACEHOLDER);
                text.push(sign);
                let res = session.apply_deletion(TranslationResult::replace(2, text));
                session.set_left_sign_pending(true);
                session.set_last_unit(UnitKind::FirstVowelSign);
                return res;
            }
        }

        // Case 2: left sign riding its placeholder. This is the real
        // deletion point: both go.
        if let (Some(sign), Some(prev)) = (last, before) {
            if chars::is_left_sign(sign) && prev == chars::PLACEHOLDER {
                let res = session.apply_deletion(TranslationResult::replace(2, String::new()));
                session.set_left_sign_pending(false);
                return sweep_trailing_zwj(session, res);
            }
        }

        // Case 3: two-part sign on a consonant. Only the length mark goes;
        // the implied left component remains.
        if let (Some(sign), Some(prev)) = (last, before) {
            if chars::is_consonant(prev) {
                if let Some((left, _mark)) = chars::split_two_part(sign) {
                    let res = session.apply_deletion(TranslationResult::replace(1, left));
                    session.set_left_sign_pending(false);
                    session.set_last_unit(UnitKind::FirstVowelSign);
                    return res;
                }
            }
        }

        // Case 4: plain single-scalar deletion.
        let res = session.apply_deletion(TranslationResult::replace(1, String::new()));
        if session.last_scalar().map(chars::is_vowel_sign).unwrap_or(false) {
            session.set_left_sign_pending(false);
        }
        sweep_trailing_zwj(session, res)
    }
}
