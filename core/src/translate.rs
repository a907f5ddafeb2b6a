//! Structured translation results and the legacy sentinel protocol.
//!
//! Translators return `TranslationResult { delete_count, insert_text }`: the
//! caller deletes exactly `delete_count` previously inserted scalars, then
//! inserts `insert_text`, as one atomic replace-tail operation. The legacy
//! wire form embeds the delete count in the output string behind a sentinel
//! scalar; `encode_legacy`/`decode_legacy` exist only for consumers still
//! speaking that protocol.

use crate::composition::Composition;

/// Sentinel scalar opening a legacy compound instruction: the sentinel,
/// then one or more ASCII digits (scalars to delete), then the insert text.
pub const SENTINEL: char = '\u{2421}';

/// Zero width joiner, emitted by conjunct-suppression rules. Deletion paths
/// sweep a dangling ZWJ left at the buffer tail.
pub const ZWJ: char = '\u{200D}';

/// A replace-tail instruction: delete `delete_count` scalars, insert
/// `insert_text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationResult {
    pub delete_count: usize,
    pub insert_text: String,
}

impl TranslationResult {
    /// No deletion, no insertion.
    pub fn none() -> Self {
        Self::default()
    }

    /// Plain insertion.
    pub fn insert<T: Into<String>>(text: T) -> Self {
        Self {
            delete_count: 0,
            insert_text: text.into(),
        }
    }

    /// Delete `count` scalars, then insert `text`.
    pub fn replace<T: Into<String>>(count: usize, text: T) -> Self {
        Self {
            delete_count: count,
            insert_text: text.into(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.delete_count == 0 && self.insert_text.is_empty()
    }

    /// Encode into the legacy sentinel form.
    ///
    /// With no deletion this is just the insert text; otherwise the sentinel
    /// scalar, the decimal delete count, then the insert text.
    pub fn encode_legacy(&self) -> String {
        if self.delete_count == 0 {
            return self.insert_text.clone();
        }
        let mut out = String::new();
        out.push(SENTINEL);
        out.push_str(&self.delete_count.to_string());
        out.push_str(&self.insert_text);
        out
    }

    /// Decode a legacy sentinel string back into a structured result.
    ///
    /// A string not starting with the sentinel is a plain insertion. The
    /// digit run after the sentinel is the delete count; everything after it
    /// is the insert text.
    pub fn decode_legacy(s: &str) -> Self {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c == SENTINEL => {}
            _ => return Self::insert(s),
        }

        let rest = chars.as_str();
        let digits_end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let count = rest[..digits_end].parse::<usize>().unwrap_or(0);
        Self::replace(count, &rest[digits_end..])
    }
}

/// Common capability of every script translator.
///
/// Implementations are stateless over their rule tables; all mutable state
/// lives in the `Composition` session passed by the caller, which must
/// serialize all calls (one active composition per session).
pub trait ScriptTranslator {
    /// Translate one keystroke against the current composition.
    ///
    /// Applies the resulting replace-tail edit to `session` and returns the
    /// same instruction for the host surface. Key codes outside the scheme's
    /// tables pass through unmodified.
    fn translate_key(&self, key: char, shifted: bool, session: &mut Composition) -> TranslationResult;

    /// Process one backspace against the current composition.
    ///
    /// The immediately preceding keystroke is undone exactly; older history
    /// is deleted per-scheme (last scalar, last unit, or the visual-order
    /// placeholder rules).
    fn process_delete(&self, session: &mut Composition) -> TranslationResult;
}
