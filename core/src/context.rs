//! Word context extraction and the platform communication DTO.
//!
//! `extract_context` derives "current word / previous word / word before
//! that" from the surrounding text and cursor position. Words split on
//! whitespace and punctuation within the current line only; context never
//! crosses a line or paragraph boundary.
//!
//! `ImeContext` is a zero-abstraction data container the host surface reads
//! after each key event: preedit, replace-tail instruction, commit text,
//! candidate strings. No callbacks, no traits; platform code reads fields
//! directly.

use crate::translate::TranslationResult;
use crate::utils;

/// Committed-word context for one prediction query. Derived per query, not
/// persisted.
///
/// `earlier_word` is populated only when `previous_word` is: it is the word
/// before `previous_word`, never a forward-looking value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordContext {
    pub current_word: String,
    pub previous_word: Option<String>,
    pub earlier_word: Option<String>,
}

impl WordContext {
    /// Build a context, enforcing the earlier-requires-previous invariant.
    pub fn new(
        current_word: impl Into<String>,
        previous_word: Option<String>,
        earlier_word: Option<String>,
    ) -> Self {
        let previous_word = previous_word.filter(|w| !w.is_empty());
        let earlier_word = if previous_word.is_some() {
            earlier_word.filter(|w| !w.is_empty())
        } else {
            None
        };
        Self {
            current_word: current_word.into(),
            previous_word,
            earlier_word,
        }
    }
}

/// Word separators: whitespace plus common punctuation. Zero-width scalars
/// and combining marks are never separators.
fn is_word_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(c, '“' | '”' | '‘' | '’' | '—' | '–' | '…' | '।' | '॥')
}

/// Derive the word context at `cursor` (a byte offset into `text`).
///
/// The current word is the run of non-separator scalars ending at the
/// cursor; the previous and earlier words are the two complete words before
/// it on the same line. Context words are NFC-normalized.
pub fn extract_context(text: &str, cursor: usize) -> WordContext {
    let mut cut = cursor.min(text.len());
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let before = &text[..cut];

    // Never cross a line boundary when building context.
    let line = match before.rfind(['\n', '\r']) {
        Some(i) => &before[i + 1..],
        None => before,
    };

    let current_start = line
        .char_indices()
        .rev()
        .find(|(_, c)| is_word_separator(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let current = &line[current_start..];

    let mut previous: Option<&str> = None;
    let mut earlier: Option<&str> = None;
    for word in line[..current_start]
        .split(is_word_separator)
        .filter(|w| !w.is_empty())
    {
        earlier = previous;
        previous = Some(word);
    }

    WordContext::new(
        current.to_string(),
        previous.map(utils::normalize),
        earlier.map(utils::normalize),
    )
}

/// Input purpose hint supplied by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPurpose {
    /// Free-form text input (default)
    #[default]
    FreeForm,
    /// Email address
    Email,
    /// URL
    Url,
    /// Password (suggestions disabled)
    Password,
    /// Number input
    Number,
}

/// IME context for platform communication.
///
/// After processing a key event the platform reads these fields to update
/// its UI and text buffer:
///
/// - `translation`: the replace-tail edit to apply to the text buffer
/// - `preedit_text`: the in-progress composition (displayed underlined)
/// - `commit_text`: finalized text (consume and clear)
/// - `candidates`: prediction words for the current page
/// - `candidate_cursor`: highlighted candidate (0-based)
/// - `auxiliary_text`: optional hint text (page indicator)
#[derive(Debug, Clone, Default)]
pub struct ImeContext {
    /// Replace-tail instruction from the last key event.
    pub translation: TranslationResult,

    /// Text being composed.
    pub preedit_text: String,

    /// Text to commit to the application.
    pub commit_text: String,

    /// Candidate words for the current page.
    pub candidates: Vec<String>,

    /// Currently highlighted candidate index (0-based).
    pub candidate_cursor: usize,

    /// Auxiliary text for UI hints (page numbers).
    pub auxiliary_text: String,

    /// Input purpose hint for context-aware behavior.
    pub input_purpose: InputPurpose,
}

impl ImeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear visible state (preedit, candidates, auxiliary, translation).
    /// Does NOT clear `commit_text`; the platform consumes that first.
    pub fn clear(&mut self) {
        self.translation = TranslationResult::none();
        self.preedit_text.clear();
        self.candidates.clear();
        self.candidate_cursor = 0;
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// Whether predictions should run for the current input purpose.
    pub fn predictions_enabled(&self) -> bool {
        !matches!(self.input_purpose, InputPurpose::Password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_previous_and_earlier() {
        let text = "நான் வீடு போ";
        let ctx = extract_context(text, text.len());
        assert_eq!(ctx.current_word, "போ");
        assert_eq!(ctx.previous_word.as_deref(), Some("வீடு"));
        assert_eq!(ctx.earlier_word.as_deref(), Some("நான்"));
    }

    #[test]
    fn cursor_after_separator_gives_empty_current() {
        let text = "வணக்கம் ";
        let ctx = extract_context(text, text.len());
        assert_eq!(ctx.current_word, "");
        assert_eq!(ctx.previous_word.as_deref(), Some("வணக்கம்"));
        assert_eq!(ctx.earlier_word, None);
    }

    #[test]
    fn context_never_crosses_line_boundary() {
        let text = "முதல் வரி\nஇரண்டாம்";
        let ctx = extract_context(text, text.len());
        assert_eq!(ctx.current_word, "இரண்டாம்");
        assert_eq!(ctx.previous_word, None);
        assert_eq!(ctx.earlier_word, None);
    }

    #[test]
    fn punctuation_separates_words() {
        let text = "சரி, வா";
        let ctx = extract_context(text, text.len());
        assert_eq!(ctx.current_word, "வா");
        assert_eq!(ctx.previous_word.as_deref(), Some("சரி"));
    }

    #[test]
    fn earlier_requires_previous() {
        let ctx = WordContext::new("க", None, Some("நான்".to_string()));
        assert_eq!(ctx.earlier_word, None);
    }

    #[test]
    fn cursor_mid_text_ignores_following_words() {
        let text = "ஒன்று இரண்டு மூன்று";
        // Cursor right after "இரண்டு".
        let cursor = "ஒன்று இரண்டு".len();
        let ctx = extract_context(text, cursor);
        assert_eq!(ctx.current_word, "இரண்டு");
        assert_eq!(ctx.previous_word.as_deref(), Some("ஒன்று"));
        assert_eq!(ctx.earlier_word, None);
    }

    #[test]
    fn password_purpose_disables_predictions() {
        let mut ctx = ImeContext::new();
        assert!(ctx.predictions_enabled());
        ctx.input_purpose = InputPurpose::Password;
        assert!(!ctx.predictions_enabled());
    }
}
