//! Input session state.
//!
//! `Session` combines the composition, the candidate list and the current
//! input mode into one unit of state tracked across key events. The session
//! is separate from the engine: the engine provides translation and
//! prediction, the session holds what the user currently sees.

use crate::candidate::CandidateList;
use crate::composition::Composition;
use crate::context::ImeContext;

/// Current mode of the input session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Initial state, no input yet
    #[default]
    Init,
    /// A composition is in progress
    Composing,
    /// Next-word suggestions shown after a commit
    Suggestion,
    /// Keys not processed by the IME
    Passthrough,
}

/// Session state combining composition, candidates and mode.
#[derive(Debug, Clone, Default)]
pub struct Session {
    composition: Composition,
    candidates: CandidateList,
    mode: InputMode,
    active: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: CandidateList::with_page_size(page_size),
            ..Self::default()
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Whether the session holds state.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Reset all session state and return to `Init`.
    pub fn clear(&mut self) {
        self.composition.reset();
        self.candidates.clear();
        self.mode = InputMode::Init;
        self.active = false;
    }

    /// Populate an `ImeContext` from the session for the host surface.
    pub fn sync_to_context(&self, context: &mut ImeContext) {
        context.preedit_text.clear();
        context.candidates.clear();
        context.auxiliary_text.clear();

        context.preedit_text.push_str(self.composition.buffer());

        let page = self.candidates.current_page_candidates();
        context.candidates = page.iter().map(|c| c.word.clone()).collect();
        context.candidate_cursor = self.candidates.cursor();

        if self.candidates.num_pages() > 1 {
            context.auxiliary_text = format!(
                "பக்கம் {}/{}",
                self.candidates.current_page() + 1,
                self.candidates.num_pages()
            );
        }
    }
}
