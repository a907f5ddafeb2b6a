//! Candidate types for word prediction.
//!
//! This module provides:
//! - `Candidate`: a single predicted word with score and metadata
//! - `CandidateList`: paginated list with cursor navigation

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single prediction candidate.
///
/// Scores are on a relative scale; higher is better. Within one returned
/// list candidates are sorted by score descending, ties broken by the
/// original engine order (stable sort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    /// Optional display annotation (transliteration hint, emoji name).
    pub annotation: String,
    pub score: f32,
    /// Word learned from this user rather than the shipped dictionary.
    pub is_user_word: bool,
    pub is_emoji: bool,
}

impl Candidate {
    pub fn new<T: Into<String>>(word: T, score: f32) -> Self {
        Candidate {
            word: word.into(),
            annotation: String::new(),
            score,
            is_user_word: false,
            is_emoji: false,
        }
    }

    pub fn with_annotation<T: Into<String>, A: Into<String>>(word: T, annotation: A, score: f32) -> Self {
        Candidate {
            word: word.into(),
            annotation: annotation.into(),
            score,
            is_user_word: false,
            is_emoji: false,
        }
    }

    pub fn user_word<T: Into<String>>(word: T, score: f32) -> Self {
        Candidate {
            word: word.into(),
            annotation: String::new(),
            score,
            is_user_word: true,
            is_emoji: false,
        }
    }
}

/// Sort candidates by score descending, keeping engine order on ties.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// A paginated list of candidates with cursor navigation.
#[derive(Debug, Clone)]
pub struct CandidateList {
    candidates: Vec<Candidate>,

    /// Number of candidates per page
    page_size: usize,

    /// Current page index (0-based)
    current_page: usize,

    /// Cursor position within the current page (0-based)
    cursor: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            page_size: 5,
            current_page: 0,
            cursor: 0,
        }
    }

    /// Create a candidate list with specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
            cursor: 0,
        }
    }

    /// Set the candidates, resetting pagination state.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.current_page = 0;
        self.cursor = 0;
    }

    /// Get all candidates.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Get the total number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        if self.candidates.is_empty() {
            0
        } else {
            self.candidates.len().div_ceil(self.page_size)
        }
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Get the cursor position within the current page (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current_page_len(&self) -> usize {
        let range = self.current_page_range();
        range.end.saturating_sub(range.start)
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = self.current_page * self.page_size;
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    /// Get the candidates for the current page.
    pub fn current_page_candidates(&self) -> &[Candidate] {
        if self.candidates.is_empty() {
            return &[];
        }
        &self.candidates[self.current_page_range()]
    }

    /// Get the currently selected candidate (under cursor).
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.current_page_candidates().get(self.cursor)
    }

    /// Move cursor to previous candidate on the current page.
    /// Returns true if the cursor moved.
    pub fn cursor_up(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move cursor to next candidate on the current page.
    /// Returns true if the cursor moved.
    pub fn cursor_down(&mut self) -> bool {
        let page_len = self.current_page_len();
        if page_len > 0 && self.cursor < page_len - 1 {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            let page_len = self.current_page_len();
            if page_len > 0 && self.cursor >= page_len {
                self.cursor = page_len - 1;
            }
            true
        } else {
            false
        }
    }

    /// Move to the next page. Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        let num_pages = self.num_pages();
        if num_pages > 0 && self.current_page < num_pages - 1 {
            self.current_page += 1;
            let page_len = self.current_page_len();
            if page_len > 0 && self.cursor >= page_len {
                self.cursor = page_len - 1;
            }
            true
        } else {
            false
        }
    }

    /// Select a candidate by index within the current page.
    /// Returns the selected candidate if the index is valid.
    pub fn select_by_index(&mut self, page_index: usize) -> Option<&Candidate> {
        if page_index < self.current_page_len() {
            self.cursor = page_index;
            self.selected_candidate()
        } else {
            None
        }
    }

    /// Clear the candidate list.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.current_page = 0;
        self.cursor = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}
