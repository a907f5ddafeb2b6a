//! libtamil
//!
//! Tamil input schemes built on `libindic-core`:
//! - `Tamil99`: direct one-key-per-glyph layout with auto-virama rules
//! - `Anjal`: multi-keystroke QWERTY-mnemonic phonetic scheme
//! - `Typewriter`: visual-order layout with left-sign reordering
//!
//! `Translator` is the closed dispatch over the three schemes;
//! `InputMethod` wires a translator to the prediction selector for full
//! key-event processing.

pub mod chars;

pub mod tamil99;
pub use tamil99::Tamil99;

pub mod anjal;
pub use anjal::Anjal;

pub mod typewriter;
pub use typewriter::Typewriter;

pub mod translator;
pub use translator::{Scheme, Translator};

pub mod config;
pub use config::TamilConfig;

pub mod engine;
pub use engine::{InputMethod, KeyEvent, KeyResult};

use libindic_core::MemoryStore;

/// Small in-memory dictionary for demos and tests when no artifact
/// directory is available.
pub fn demo_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (word, freq) in [
        ("வணக்கம்", 90),
        ("வண்டி", 40),
        ("வந்தேன்", 60),
        ("வருகிறேன்", 55),
        ("அம்மா", 95),
        ("அப்பா", 85),
        ("நன்றி", 80),
        ("நான்", 75),
        ("தமிழ்", 70),
        ("கடல்", 30),
        ("கண்", 25),
    ] {
        store.insert_word(word, freq);
    }
    store.insert_ngram(&["நான்"], "வருகிறேன்", 50);
    store.insert_ngram(&["நான்"], "போகிறேன்", 35);
    store.insert_ngram(&["வணக்கம்"], "நண்பா", 20);
    store.insert_ngram(&["நேற்று", "நான்"], "வந்தேன்", 65);
    store
}
