//! Input-method engine with session management and key event processing.
//!
//! `InputMethod` wires a script translator to the prediction selector and
//! tracks session state across key events:
//!
//! keystroke -> translator -> replace-tail instruction -> context
//! extraction -> selector -> ranked candidates.
//!
//! All operations are synchronous on the caller's thread. The only timer is
//! the debounced post-accept prediction refresh, polled by the host loop;
//! any new keystroke supersedes it.

use crate::config::TamilConfig;
use crate::translator::{Scheme, Translator};
use libindic_core::{
    extract_context, Candidate, ImeContext, InputMode, InputPurpose, LookupSource, RefreshTimer,
    Selector, Session, TranslationResult, UserDict,
};
use std::time::{Duration, Instant};

/// Key event types the engine processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input
    Char(char),
    /// Character input with shift held
    Shifted(char),
    /// Backspace key
    Backspace,
    /// Space key (commit the composition)
    Space,
    /// Enter key (commit without trailing space)
    Enter,
    /// Escape key (terminate the composition)
    Escape,
    /// Candidate selection key (1-9, within the current page)
    Number(u8),
    /// Candidate cursor up
    Up,
    /// Candidate cursor down
    Down,
    /// Candidate page up
    PageUp,
    /// Candidate page down
    PageDown,
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The engine consumed the key.
    Handled,
    /// Pass the key through to the application.
    NotHandled,
}

/// Input-method engine over a dictionary source `D`.
pub struct InputMethod<D> {
    translator: Translator,
    session: Session,
    selector: Selector<D>,
    userdict: UserDict,
    context: ImeContext,
    refresh: RefreshTimer,
    config: TamilConfig,
    /// Committed text before the composition span, maintained by commits
    /// and `relocate`.
    surrounding: String,
}

impl<D: LookupSource> InputMethod<D> {
    /// Create an engine. `source` is the dictionary boundary; `None` means
    /// the engine is unavailable and the local fallback serves predictions.
    pub fn new(config: TamilConfig, source: Option<D>, userdict: UserDict) -> Self {
        let mut selector =
            Selector::with_cache_size(source, userdict.clone(), config.base.max_cache_size);
        selector.set_fallback_enabled(config.base.fallback_enabled);
        Self {
            translator: Translator::new(config.scheme),
            session: Session::with_page_size(config.base.page_size),
            selector,
            userdict,
            context: ImeContext::new(),
            refresh: RefreshTimer::new(),
            config,
            surrounding: String::new(),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.translator.scheme()
    }

    /// Switch schemes mid-session; terminates any open composition.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        self.reset();
        self.translator = Translator::new(scheme);
        self.config.scheme = scheme;
    }

    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.context
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &TamilConfig {
        &self.config
    }

    pub fn userdict(&self) -> &UserDict {
        &self.userdict
    }

    pub fn set_input_purpose(&mut self, purpose: InputPurpose) {
        self.context.input_purpose = purpose;
    }

    /// The host moved the cursor outside the composition span: terminate
    /// the composition and adopt the new preceding text.
    pub fn relocate(&mut self, surrounding: &str) {
        self.reset();
        self.surrounding = surrounding.to_string();
    }

    /// Terminate the composition immediately and synchronously.
    pub fn reset(&mut self) {
        self.session.clear();
        self.context.clear();
        self.refresh.supersede();
    }

    /// Process a key event and update engine state.
    ///
    /// After this returns the host reads `context()`: the replace-tail
    /// `translation` to apply, `commit_text` to consume, and the current
    /// preedit and candidates.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        self.context.commit_text.clear();
        self.context.translation = TranslationResult::none();

        match key {
            KeyEvent::Char(' ') | KeyEvent::Space => self.commit(true),
            KeyEvent::Char(c) => self.handle_char(c, false),
            KeyEvent::Shifted(c) => self.handle_char(c, true),
            KeyEvent::Backspace => self.handle_backspace(),
            KeyEvent::Enter => {
                if self.session.composition().is_empty() {
                    KeyResult::NotHandled
                } else {
                    self.commit(false)
                }
            }
            KeyEvent::Escape => {
                if self.session.is_active() {
                    self.reset();
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            KeyEvent::Number(n) => {
                if n == 0 || self.session.candidates().is_empty() {
                    return KeyResult::NotHandled;
                }
                self.accept_candidate((n - 1) as usize)
            }
            KeyEvent::Up => self.navigate(|s| s.candidates_mut().cursor_up()),
            KeyEvent::Down => self.navigate(|s| s.candidates_mut().cursor_down()),
            KeyEvent::PageUp => self.navigate(|s| s.candidates_mut().page_up()),
            KeyEvent::PageDown => self.navigate(|s| s.candidates_mut().page_down()),
        }
    }

    /// Poll the debounced refresh timer. Returns true when a next-word
    /// prediction pass ran and the context changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.refresh.fire(now) {
            return false;
        }
        if !self.context.predictions_enabled() {
            return false;
        }
        let ctx = extract_context(&self.surrounding, self.surrounding.len());
        let candidates = self.predict(&ctx);
        if candidates.is_empty() {
            return false;
        }
        self.session.activate();
        self.session.set_mode(InputMode::Suggestion);
        self.session.candidates_mut().set_candidates(candidates);
        self.session.sync_to_context(&mut self.context);
        true
    }

    fn handle_char(&mut self, c: char, shifted: bool) -> KeyResult {
        // A keystroke supersedes any pending post-accept refresh.
        self.refresh.supersede();

        self.session.activate();
        self.session.set_mode(InputMode::Composing);
        let result = self
            .translator
            .translate_key(c, shifted, self.session.composition_mut());
        self.context.translation = result;

        self.refresh_predictions();
        self.session.sync_to_context(&mut self.context);
        KeyResult::Handled
    }

    fn handle_backspace(&mut self) -> KeyResult {
        self.refresh.supersede();

        if self.session.composition().is_empty() {
            return KeyResult::NotHandled;
        }
        let result = self.translator.process_delete(self.session.composition_mut());
        self.context.translation = result;

        self.refresh_predictions();
        self.session.sync_to_context(&mut self.context);
        KeyResult::Handled
    }

    fn commit(&mut self, append_space: bool) -> KeyResult {
        self.refresh.supersede();

        let word = self.session.composition().buffer().to_string();
        if word.is_empty() {
            return KeyResult::NotHandled;
        }

        self.learn(&word);
        self.surrounding.push_str(&word);
        self.surrounding.push(' ');

        self.context.commit_text = if append_space {
            format!("{} ", word)
        } else {
            word
        };
        self.session.clear();
        self.session.sync_to_context(&mut self.context);

        self.schedule_refresh();
        KeyResult::Handled
    }

    /// Accept the candidate at `page_index` on the current page: the
    /// composed prefix is replaced by the full word.
    pub fn accept_candidate(&mut self, page_index: usize) -> KeyResult {
        let word = match self.session.candidates_mut().select_by_index(page_index) {
            Some(c) => c.word.clone(),
            None => return KeyResult::NotHandled,
        };

        let composed = self.session.composition().char_count();
        self.context.translation = TranslationResult::replace(composed, word.clone());
        self.context.commit_text = word.clone();

        self.learn(&word);
        self.surrounding.push_str(&word);
        self.surrounding.push(' ');

        self.session.clear();
        self.session.sync_to_context(&mut self.context);

        self.schedule_refresh();
        KeyResult::Handled
    }

    fn navigate<F: FnOnce(&mut Session) -> bool>(&mut self, f: F) -> KeyResult {
        if self.session.candidates().is_empty() {
            return KeyResult::NotHandled;
        }
        if f(&mut self.session) {
            self.session.sync_to_context(&mut self.context);
        }
        KeyResult::Handled
    }

    /// Re-derive the word context and refresh candidates after a buffer
    /// mutation.
    fn refresh_predictions(&mut self) {
        if !self.context.predictions_enabled() {
            self.session.candidates_mut().clear();
            return;
        }
        let mut text = self.surrounding.clone();
        text.push_str(self.session.composition().buffer());
        let ctx = extract_context(&text, text.len());
        let candidates = self.predict(&ctx);
        self.session.candidates_mut().set_candidates(candidates);
    }

    fn predict(&self, ctx: &libindic_core::WordContext) -> Vec<Candidate> {
        let mut candidates =
            self.selector
                .predict(ctx, self.config.base.policy, self.config.base.max_candidates);
        if !self.config.emoji_suggestions {
            candidates.retain(|c| !c.is_emoji);
        }
        candidates
    }

    fn learn(&mut self, word: &str) {
        if !self.config.base.learn_committed_words {
            return;
        }
        if word.chars().count() < self.config.base.min_learn_length {
            return;
        }
        // The selector shares the custom-word store; learning through it
        // also invalidates memoized predictions.
        self.selector.learn_custom_word(word);
    }

    fn schedule_refresh(&mut self) {
        // Policy flag lives here at the call site, not in the selector.
        if self.config.base.predict_after_accept {
            self.refresh.schedule(
                Instant::now(),
                Duration::from_millis(self.config.base.predict_refresh_delay_ms),
            );
        }
    }
}
