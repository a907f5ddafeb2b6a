//! Tamil99 direct keyboard translator.
//!
//! One keystroke per glyph: consonant and vowel keys map straight to Tamil
//! letters. The translator supplies the orthography:
//! - a vowel key after a consonant emits the dependent sign; the inherent
//!   vowel emits nothing
//! - a consonant after a consonant takes an automatic virama when the pair
//!   is in the fixed rule table (doubled, or homorganic nasal+stop)
//! - the Grantha shift layer carries the whole-unit conjuncts
//! - shift+pulli after a formed KA+VIRAMA+SSA inserts a zero width joiner
//!   to suppress the ligature
//!
//! This translator is logical-order only: deletion is pop-last-scalar, with
//! the one-shot exact undo of the immediately preceding keystroke.

use crate::chars;
use crate::translator::sweep_trailing_zwj;
use libindic_core::{Composition, ScriptTranslator, TranslationResult, UnitKind};
use phf::phf_map;

/// Key map of the unshifted layer (Tamil99 standard layout data).
static BASE: phf::Map<char, char> = phf_map! {
    'q' => 'ஆ', 'w' => 'ஈ', 'e' => 'ஊ', 'r' => 'ஐ', 't' => 'ஏ',
    'y' => 'ள', 'u' => 'ற', 'i' => 'ன', 'o' => 'ட', 'p' => 'ண',
    '[' => 'ச', ']' => 'ஞ',
    'a' => 'அ', 's' => 'இ', 'd' => 'உ', 'f' => '\u{0BCD}', 'g' => 'எ',
    'h' => 'க', 'j' => 'ப', 'k' => 'ம', 'l' => 'த', ';' => 'ந', '\'' => 'ய',
    'z' => 'ஔ', 'x' => 'ஓ', 'c' => 'ஒ', 'v' => 'வ', 'b' => 'ங',
    'n' => 'ல', 'm' => 'ர', ',' => 'ழ',
};

/// Shift layer: aytham and the Grantha letters, including the whole-unit
/// conjuncts (layout data).
static SHIFT: phf::Map<char, &'static str> = phf_map! {
    'a' => "ஃ",
    'w' => "ஶ",
    'e' => "ஜ",
    'r' => "ஷ",
    't' => "ஸ",
    'y' => "ஹ",
    'u' => "க்ஷ",
    'i' => "ஸ்ரீ",
};

/// The pulli key; shifted it becomes the conjunct-break disambiguation key.
const PULLI_KEY: char = 'f';

#[derive(Debug, Clone, Copy, Default)]
pub struct Tamil99;

impl Tamil99 {
    pub fn new() -> Self {
        Self
    }

    fn emit_glyph(&self, key: char, glyph: char, session: &mut Composition) -> TranslationResult {
        let last = session.last_scalar();

        if glyph == chars::VIRAMA {
            return session.apply_keystroke(
                Some(key),
                UnitKind::UnitComplete,
                TranslationResult::insert(chars::VIRAMA),
            );
        }

        if chars::is_consonant(glyph) {
            let result = match last {
                Some(prev) if chars::auto_virama_pair(prev, glyph) => {
                    let mut text = String::new();
                    text.push(chars::VIRAMA);
                    text.push(glyph);
                    TranslationResult::insert(text)
                }
                _ => TranslationResult::insert(glyph),
            };
            return session.apply_keystroke(Some(key), UnitKind::FirstConsonant, result);
        }

        if chars::is_independent_vowel(glyph) || glyph == chars::AYTHAM {
            let after_consonant = last.map(chars::is_consonant).unwrap_or(false);
            let result = if after_consonant && glyph == 'அ' {
                // Inherent vowel: already implied by the bare consonant.
                TranslationResult::none()
            } else if after_consonant {
                match chars::dependent_sign(glyph) {
                    Some(sign) => TranslationResult::insert(sign),
                    None => TranslationResult::insert(glyph),
                }
            } else {
                TranslationResult::insert(glyph)
            };
            return session.apply_keystroke(Some(key), UnitKind::UnitComplete, result);
        }

        // Not reachable from the tables; pass through defensively.
        session.apply_keystroke(Some(key), UnitKind::UnitComplete, TranslationResult::insert(glyph))
    }

    /// Shift+pulli after a formed KA+VIRAMA+SSA: reinsert the final
    /// consonant behind a zero width joiner so the ligature cannot form.
    fn break_conjunct(&self, key: char, session: &mut Composition) -> TranslationResult {
        let formed = session.last_scalar() == Some('ஷ')
            && session.scalar_from_end(1) == Some(chars::VIRAMA)
            && session.scalar_from_end(2) == Some('க');
        if !formed {
            return session.apply_keystroke(Some(key), session.last_unit(), TranslationResult::none());
        }
        let mut text = String::new();
        text.push(chars::ZWJ);
        text.push('ஷ');
        session.apply_keystroke(Some(key), UnitKind::FirstConsonant, TranslationResult::replace(1, text))
    }
}

impl ScriptTranslator for Tamil99 {
    fn translate_key(&self, key: char, shifted: bool, session: &mut Composition) -> TranslationResult {
        if shifted {
            if key == PULLI_KEY {
                return self.break_conjunct(key, session);
            }
            if let Some(out) = SHIFT.get(&key) {
                let mut chars_iter = out.chars();
                let first = chars_iter.next();
                return match (first, chars_iter.next()) {
                    // Single letter: same rules as the base layer.
                    (Some(glyph), None) => self.emit_glyph(key, glyph, session),
                    // Whole-unit conjunct, inserted as-is.
                    _ => {
                        let unit = if out.ends_with(|c| chars::is_consonant(c)) {
                            UnitKind::FirstConsonant
                        } else {
                            UnitKind::UnitComplete
                        };
                        session.apply_keystroke(Some(key), unit, TranslationResult::insert(*out))
                    }
                };
            }
        } else if let Some(&glyph) = BASE.get(&key) {
            return self.emit_glyph(key, glyph, session);
        }

        // Unknown key: pass it through unmodified.
        let unit = if key.is_whitespace() {
            UnitKind::WordBoundary
        } else {
            UnitKind::UnitComplete
        };
        session.apply_keystroke(Some(key), unit, TranslationResult::insert(key))
    }

    fn process_delete(&self, session: &mut Composition) -> TranslationResult {
        if let Some(res) = session.undo_last() {
            return sweep_trailing_zwj(session, res);
        }
        if session.is_empty() {
            return TranslationResult::none();
        }
        let res = session.apply_deletion(TranslationResult::replace(1, String::new()));
        sweep_trailing_zwj(session, res)
    }
}
