//! Visual-order translator behavior: placeholder reordering, two-part
//! signs, and the four-case deletion priority.

use libindic_core::{Composition, ScriptTranslator};
use libtamil::Typewriter;

const PLACEHOLDER: char = '\u{200B}';

fn type_keys(session: &mut Composition, keys: &[(char, bool)]) {
    let t = Typewriter::new();
    for &(key, shifted) in keys {
        t.translate_key(key, shifted, session);
    }
}

#[test]
fn left_sign_rides_placeholder_until_consonant() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    // Left sign typed first, as on paper.
    t.translate_key('q', false, &mut session);
    assert_eq!(session.buffer(), format!("{}ெ", PLACEHOLDER));
    assert!(session.left_sign_pending());

    // The consonant slides in under the sign.
    let res = t.translate_key('a', false, &mut session);
    assert_eq!(res.delete_count, 2);
    assert_eq!(res.insert_text, "கெ");
    assert_eq!(session.buffer(), "கெ");
    assert!(!session.left_sign_pending());
}

#[test]
fn at_most_one_placeholder_outstanding() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('q', false), ('w', false)]);
    // Replacing the pending sign keeps a single placeholder.
    assert_eq!(session.buffer(), format!("{}ே", PLACEHOLDER));
    assert!(session.left_sign_pending());
    assert_eq!(session.char_count(), 2);
}

#[test]
fn buffer_length_is_units_plus_pending_placeholder() {
    let mut session = Composition::new();
    // ka + pending sign: two logical units plus one placeholder.
    type_keys(&mut session, &[('a', false), ('q', false)]);
    assert_eq!(session.char_count(), 3);
    assert!(session.left_sign_pending());

    // Attaching the consonant collapses the placeholder.
    type_keys(&mut session, &[('s', false)]);
    assert_eq!(session.buffer(), "கசெ");
    assert_eq!(session.char_count(), 3);
    assert!(!session.left_sign_pending());
}

#[test]
fn two_part_sign_composes() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    type_keys(&mut session, &[('q', false), ('a', false)]);
    assert_eq!(session.buffer(), "கெ");

    let res = t.translate_key('r', false, &mut session);
    assert_eq!(res.delete_count, 1);
    assert_eq!(res.insert_text, "ொ");
    assert_eq!(session.buffer(), "கொ");
}

#[test]
fn au_sign_composes_from_e_and_mark() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('q', false), ('a', false), ('o', false)]);
    assert_eq!(session.buffer(), "கௌ");
}

#[test]
fn right_matra_appends_directly() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('a', false), ('t', false)]);
    assert_eq!(session.buffer(), "கி");
}

#[test]
fn deletion_walks_the_four_cases() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    type_keys(&mut session, &[('q', false), ('a', false), ('r', false)]);
    assert_eq!(session.buffer(), "கொ");

    // Two-part sign: only the length mark goes (case 3 via exact undo).
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 1);
    assert_eq!(res.insert_text, "ெ");
    assert_eq!(session.buffer(), "கெ");

    // Left sign on a consonant: the consonant goes, the sign stays on a
    // placeholder; buffer length unchanged (case 1).
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 2);
    assert_eq!(res.insert_text, format!("{}ெ", PLACEHOLDER));
    assert_eq!(session.buffer(), format!("{}ெ", PLACEHOLDER));
    assert!(session.left_sign_pending());

    // Sign on its placeholder: the real deletion point (case 2).
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 2);
    assert_eq!(res.insert_text, "");
    assert!(session.is_empty());
    assert!(!session.left_sign_pending());
}

#[test]
fn case_three_from_older_history() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    // Build கொ, then append a consonant and undo it so no keystroke
    // record covers the two-part sign.
    type_keys(&mut session, &[('q', false), ('a', false), ('r', false), ('s', false)]);
    assert_eq!(session.buffer(), "கொச");
    t.process_delete(&mut session); // exact undo of the consonant
    assert_eq!(session.buffer(), "கொ");

    // Case 3 applies from the deletion rules themselves.
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 1);
    assert_eq!(res.insert_text, "ெ");
    assert_eq!(session.buffer(), "கெ");
    assert!(!session.left_sign_pending());
}

#[test]
fn default_deletion_clears_left_flag_before_sign() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    // கி + pending sign, then delete the pending pair and the matra.
    type_keys(&mut session, &[('a', false), ('t', false), ('q', false)]);
    assert!(session.left_sign_pending());

    t.process_delete(&mut session); // exact undo of the pending sign
    assert_eq!(session.buffer(), "கி");
    assert!(!session.left_sign_pending());

    // Default case: one scalar.
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 1);
    assert_eq!(session.buffer(), "க");
}

#[test]
fn mid_word_visual_cluster() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('a', false), ('q', false), ('s', false)]);
    assert_eq!(session.buffer(), "கசெ");

    let t = Typewriter::new();
    // Undo the consonant: back to the pending sign after க.
    t.process_delete(&mut session);
    assert_eq!(session.buffer(), format!("க{}ெ", PLACEHOLDER));
    assert!(session.left_sign_pending());

    // Case 2 removes sign and placeholder together.
    let res = t.process_delete(&mut session);
    assert_eq!(res.delete_count, 2);
    assert_eq!(session.buffer(), "க");
}

#[test]
fn shift_layer_and_independents() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('q', true), ('a', true)]);
    assert_eq!(session.buffer(), "அங");
}

#[test]
fn unmapped_key_passes_through() {
    let t = Typewriter::new();
    let mut session = Composition::new();

    let res = t.translate_key('7', false, &mut session);
    assert_eq!(res.delete_count, 0);
    assert_eq!(res.insert_text, "7");
    assert_eq!(session.buffer(), "7");
}

#[test]
fn pulli_key_appends() {
    let mut session = Composition::new();
    type_keys(&mut session, &[('a', false), ('p', false)]);
    assert_eq!(session.buffer(), "க்");
}

#[test]
fn every_insert_round_trips_through_delete() {
    let t = Typewriter::new();
    let sequences: &[&[(char, bool)]] = &[
        &[('q', false)],
        &[('q', false), ('a', false)],
        &[('q', false), ('w', false)],
        &[('q', false), ('a', false), ('r', false)],
        &[('a', false), ('t', false)],
        &[('a', false), ('q', false)],
    ];

    for keys in sequences {
        let mut session = Composition::new();
        let (last, prefix) = keys.split_last().unwrap();
        type_keys(&mut session, prefix);
        let before = session.buffer().to_string();
        let pending_before = session.left_sign_pending();

        t.translate_key(last.0, last.1, &mut session);
        t.process_delete(&mut session);
        assert_eq!(session.buffer(), before, "sequence {:?}", keys);
        assert_eq!(session.left_sign_pending(), pending_before, "sequence {:?}", keys);
    }
}
