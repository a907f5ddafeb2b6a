//! In-progress composition state.
//!
//! `Composition` is the mutable record of one composition session: the
//! buffer of translator-produced scalars, the kind of the most recently
//! produced unit (doubling as the transition state of the multi-keystroke
//! state machine), the previous raw key, the visual-order left-sign flag,
//! and a one-shot record of the last keystroke's effect so a single delete
//! can undo it exactly.
//!
//! The session is exclusively owned by one active composition; it is reset
//! (not merely cleared) on commit, cursor relocation outside the span, or
//! explicit termination. Only the owning translator writes to the buffer.

use crate::translate::TranslationResult;

/// Kind of the most recently produced unit / transition state of the
/// multi-keystroke phonetic state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitKind {
    /// Nothing composed yet (also the state after backspace-to-empty).
    #[default]
    None,
    /// Last key was whitespace.
    WordBoundary,
    /// A closed unit (independent vowel, forced virama, passthrough).
    UnitComplete,
    FirstVowel,
    SecondVowel,
    FirstVowelSign,
    SecondVowelSign,
    FirstConsonant,
    SecondConsonant,
}

/// Exact effect of the most recent keystroke: `inserted` scalars were
/// appended after `replaced` was removed from the tail, starting from the
/// recorded prior state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOp {
    pub inserted: usize,
    pub replaced: String,
    pub prev_unit: UnitKind,
    pub prev_key: Option<char>,
    pub prev_left_pending: bool,
}

/// Mutable state of one in-progress composition.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    buffer: String,
    last_unit: UnitKind,
    prev_key: Option<char>,
    left_sign_pending: bool,
    last_op: Option<LastOp>,
    // Text removed by the edit in flight, consumed when the undo entry is
    // recorded.
    replaced_snapshot: Option<String>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// The composed, not-yet-committed text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Number of Unicode scalars in the buffer.
    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn last_unit(&self) -> UnitKind {
        self.last_unit
    }

    pub fn set_last_unit(&mut self, unit: UnitKind) {
        self.last_unit = unit;
    }

    pub fn prev_key(&self) -> Option<char> {
        self.prev_key
    }

    pub fn left_sign_pending(&self) -> bool {
        self.left_sign_pending
    }

    pub fn set_left_sign_pending(&mut self, pending: bool) {
        self.left_sign_pending = pending;
    }

    /// Last scalar in the buffer, if any.
    pub fn last_scalar(&self) -> Option<char> {
        self.buffer.chars().next_back()
    }

    /// Scalar at `n` positions from the end (0 = last).
    pub fn scalar_from_end(&self, n: usize) -> Option<char> {
        self.buffer.chars().rev().nth(n)
    }

    /// Full reset: buffer, state machine, key history and undo record.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a keystroke's replace-tail edit, recording it for exact undo.
    ///
    /// The delete count is clamped to the scalars actually present; a clamp
    /// is a programming-invariant violation in the calling translator and is
    /// logged, never allowed to fail the edit. Returns the (possibly
    /// clamped) instruction the caller forwards to the host surface.
    pub fn apply_keystroke(
        &mut self,
        key: Option<char>,
        unit: UnitKind,
        result: TranslationResult,
    ) -> TranslationResult {
        let prev_unit = self.last_unit;
        let prev_key = self.prev_key;
        let prev_left_pending = self.left_sign_pending;

        let result = self.edit(result);
        // A keystroke that touched nothing (inherent vowel, cluster lock)
        // leaves the previous record live: the buffer tail it describes is
        // still accurate, so the next delete stays visible.
        if !result.is_noop() {
            self.last_op = Some(LastOp {
                inserted: result.insert_text.chars().count(),
                replaced: self.replaced_snapshot.take().unwrap_or_default(),
                prev_unit,
                prev_key,
                prev_left_pending,
            });
        } else {
            self.replaced_snapshot = None;
        }
        self.last_unit = unit;
        self.prev_key = key;
        result
    }

    /// Undo the most recent keystroke exactly, if one is recorded.
    ///
    /// Restores the buffer, state machine, previous key and left-sign flag
    /// to their pre-keystroke values and returns the replace-tail edit the
    /// host must apply. The record is one-shot: a second delete falls back
    /// to the scheme's own deletion rules.
    pub fn undo_last(&mut self) -> Option<TranslationResult> {
        let op = self.last_op.take()?;
        let result = self.edit(TranslationResult::replace(op.inserted, op.replaced));
        self.last_unit = op.prev_unit;
        self.prev_key = op.prev_key;
        self.left_sign_pending = op.prev_left_pending;
        Some(result)
    }

    /// Apply a deletion-path edit without recording an undo entry.
    ///
    /// Clears any stale undo record: after a delete, the keystroke it
    /// described no longer matches the buffer tail.
    pub fn apply_deletion(&mut self, result: TranslationResult) -> TranslationResult {
        self.last_op = None;
        self.prev_key = None;
        let result = self.edit(result);
        self.replaced_snapshot = None;
        if self.buffer.is_empty() {
            self.last_unit = UnitKind::None;
            self.left_sign_pending = false;
        }
        result
    }

    /// Remove `count` scalars from the tail, then append `insert_text`,
    /// clamping and logging an excessive delete count.
    fn edit(&mut self, result: TranslationResult) -> TranslationResult {
        let available = self.char_count();
        let mut result = result;
        if result.delete_count > available {
            tracing::warn!(
                requested = result.delete_count,
                available,
                "delete count exceeds composition length; clamping (translator bug)"
            );
            result.delete_count = available;
        }

        let removed = if result.delete_count > 0 {
            let cut = self
                .buffer
                .char_indices()
                .rev()
                .nth(result.delete_count - 1)
                .map(|(i, _)| i)
                .unwrap_or(0);
            let removed = self.buffer[cut..].to_string();
            self.buffer.truncate(cut);
            removed
        } else {
            String::new()
        };
        self.replaced_snapshot = Some(removed);
        self.buffer.push_str(&result.insert_text);
        result
    }
}
