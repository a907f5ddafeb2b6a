//! Engine-level workflow: composing, candidate refresh, commit, suggestion
//! acceptance, the debounced next-word refresh and termination.

use libindic_core::{InputMode, InputPurpose, MemoryStore, NgramPolicy, UserDict};
use libtamil::{demo_store, InputMethod, KeyEvent, KeyResult, Scheme, TamilConfig};
use std::time::Instant;

fn engine_with(config: TamilConfig) -> InputMethod<MemoryStore> {
    InputMethod::new(config, Some(demo_store()), UserDict::new_in_memory())
}

fn anjal_config() -> TamilConfig {
    let mut config = TamilConfig::with_scheme(Scheme::Anjal);
    config.base.predict_refresh_delay_ms = 0;
    config
}

#[test]
fn composing_refreshes_prefix_candidates() {
    let mut engine = engine_with(anjal_config());

    assert_eq!(engine.process_key(KeyEvent::Char('v')), KeyResult::Handled);
    assert_eq!(engine.process_key(KeyEvent::Char('a')), KeyResult::Handled);

    let ctx = engine.context();
    assert_eq!(ctx.preedit_text, "வ");
    assert!(!ctx.candidates.is_empty());
    assert_eq!(ctx.candidates[0], "வணக்கம்");
    assert!(ctx.candidates.iter().all(|w| w.starts_with("வ")));
}

#[test]
fn backspace_routes_through_translator() {
    let mut engine = engine_with(anjal_config());

    engine.process_key(KeyEvent::Char('k'));
    engine.process_key(KeyEvent::Char('i'));
    engine.process_key(KeyEvent::Char('i'));
    assert_eq!(engine.context().preedit_text, "கீ");

    assert_eq!(engine.process_key(KeyEvent::Backspace), KeyResult::Handled);
    assert_eq!(engine.context().preedit_text, "கி");
    assert_eq!(engine.context().translation.delete_count, 1);
    assert_eq!(engine.context().translation.insert_text, "ி");
}

#[test]
fn backspace_on_empty_passes_through() {
    let mut engine = engine_with(anjal_config());
    assert_eq!(engine.process_key(KeyEvent::Backspace), KeyResult::NotHandled);
}

#[test]
fn space_commits_and_learns() {
    let mut engine = engine_with(anjal_config());

    for key in "naan".chars() {
        engine.process_key(KeyEvent::Char(key));
    }
    assert_eq!(engine.context().preedit_text, "நான்");

    assert_eq!(engine.process_key(KeyEvent::Space), KeyResult::Handled);
    assert_eq!(engine.context().commit_text, "நான் ");
    assert!(engine.context().preedit_text.is_empty());
    assert_eq!(engine.session().mode(), InputMode::Init);
    assert_eq!(engine.userdict().frequency("நான்"), 1);
}

#[test]
fn space_without_composition_passes_through() {
    let mut engine = engine_with(anjal_config());
    assert_eq!(engine.process_key(KeyEvent::Space), KeyResult::NotHandled);
}

#[test]
fn debounced_next_word_prediction_after_commit() {
    let mut engine = engine_with(anjal_config());

    for key in "naan".chars() {
        engine.process_key(KeyEvent::Char(key));
    }
    engine.process_key(KeyEvent::Space);

    // Zero delay: the refresh fires on the next poll.
    assert!(engine.poll(Instant::now()));
    assert_eq!(engine.session().mode(), InputMode::Suggestion);
    // Bigram continuations of the committed word, best first.
    assert_eq!(engine.context().candidates[0], "வருகிறேன்");
}

#[test]
fn keystroke_supersedes_pending_refresh() {
    let mut engine = engine_with(anjal_config());

    for key in "naan".chars() {
        engine.process_key(KeyEvent::Char(key));
    }
    engine.process_key(KeyEvent::Space);
    engine.process_key(KeyEvent::Char('k'));

    // The pending refresh was superseded by the keystroke.
    assert!(!engine.poll(Instant::now()));
    assert_eq!(engine.session().mode(), InputMode::Composing);
}

#[test]
fn refresh_disabled_by_policy_flag() {
    let mut config = anjal_config();
    config.base.predict_after_accept = false;
    let mut engine = engine_with(config);

    for key in "naan".chars() {
        engine.process_key(KeyEvent::Char(key));
    }
    engine.process_key(KeyEvent::Space);
    assert!(!engine.poll(Instant::now()));
}

#[test]
fn accepting_candidate_replaces_composed_prefix() {
    let mut engine = engine_with(anjal_config());

    engine.process_key(KeyEvent::Char('v'));
    engine.process_key(KeyEvent::Char('a'));
    assert_eq!(engine.context().candidates[0], "வணக்கம்");

    assert_eq!(engine.process_key(KeyEvent::Number(1)), KeyResult::Handled);
    let ctx = engine.context();
    assert_eq!(ctx.commit_text, "வணக்கம்");
    // One composed scalar is replaced by the accepted word.
    assert_eq!(ctx.translation.delete_count, 1);
    assert_eq!(ctx.translation.insert_text, "வணக்கம்");
    assert_eq!(engine.userdict().frequency("வணக்கம்"), 1);
}

#[test]
fn escape_terminates_synchronously() {
    let mut engine = engine_with(anjal_config());

    engine.process_key(KeyEvent::Char('k'));
    assert!(engine.session().is_active());

    assert_eq!(engine.process_key(KeyEvent::Escape), KeyResult::Handled);
    assert!(!engine.session().is_active());
    assert!(engine.context().preedit_text.is_empty());
    assert!(engine.context().candidates.is_empty());

    // Nothing left to terminate.
    assert_eq!(engine.process_key(KeyEvent::Escape), KeyResult::NotHandled);
}

#[test]
fn relocate_resets_composition_and_adopts_context() {
    let mut engine = engine_with(anjal_config());

    engine.process_key(KeyEvent::Char('k'));
    engine.relocate("நான் ");
    assert!(engine.session().composition().is_empty());

    // Predictions now run against the adopted context.
    engine.process_key(KeyEvent::Char('v'));
    engine.process_key(KeyEvent::Char('a'));
    assert_eq!(engine.context().candidates[0], "வருகிறேன்");
}

#[test]
fn password_purpose_suppresses_candidates() {
    let mut engine = engine_with(anjal_config());
    engine.set_input_purpose(InputPurpose::Password);

    engine.process_key(KeyEvent::Char('v'));
    engine.process_key(KeyEvent::Char('a'));
    assert_eq!(engine.context().preedit_text, "வ");
    assert!(engine.context().candidates.is_empty());
}

#[test]
fn unavailable_engine_serves_fallback_words() {
    let config = anjal_config();
    let mut engine: InputMethod<MemoryStore> =
        InputMethod::new(config, None, UserDict::new_in_memory());

    engine.process_key(KeyEvent::Char('a'));
    assert_eq!(engine.context().preedit_text, "அ");
    let ctx = engine.context();
    assert!(!ctx.candidates.is_empty());
    assert!(ctx.candidates.iter().all(|w| w.starts_with("அ")));
}

#[test]
fn forced_unigram_policy_flows_through_engine() {
    let mut config = anjal_config();
    config.base.policy = NgramPolicy::UnigramOnly;
    let mut engine = engine_with(config);

    engine.relocate("நேற்று நான் ");
    engine.process_key(KeyEvent::Char('v'));
    engine.process_key(KeyEvent::Char('a'));
    // Unigram ranking, not the trigram continuation.
    assert_eq!(engine.context().candidates[0], "வணக்கம்");
}

#[test]
fn candidate_navigation() {
    let mut engine = engine_with(anjal_config());

    engine.process_key(KeyEvent::Char('v'));
    engine.process_key(KeyEvent::Char('a'));
    let first = engine.context().candidates[0].clone();

    assert_eq!(engine.process_key(KeyEvent::Down), KeyResult::Handled);
    assert_eq!(engine.context().candidate_cursor, 1);

    assert_eq!(engine.process_key(KeyEvent::Up), KeyResult::Handled);
    assert_eq!(engine.context().candidate_cursor, 0);
    assert_eq!(engine.context().candidates[0], first);
}

#[test]
fn scheme_switch_resets_session() {
    let mut engine = engine_with(anjal_config());
    engine.process_key(KeyEvent::Char('k'));

    engine.set_scheme(Scheme::Tamil99);
    assert!(engine.session().composition().is_empty());
    assert_eq!(engine.scheme(), Scheme::Tamil99);

    engine.process_key(KeyEvent::Char('h'));
    assert_eq!(engine.context().preedit_text, "க");
}
